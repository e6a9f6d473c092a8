//! The agent: memory, context window and the step loop.

use crate::trace::StepTrace;
use enactive_core::{
    ContextDepth, EnactiveError, EngineConfig, Environment, InteractionId, Mood, PrimitiveSpec,
};
use enactive_memory::Memory;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// One agent living in one environment.
///
/// Owns its memory outright; nothing else mutates it. Every public mutating
/// entry point other than construction goes through [`Existence::step`].
pub struct Existence<E> {
    pub(crate) memory: Memory,
    pub(crate) environment: E,
    pub(crate) config: EngineConfig,
    pub(crate) rng: StdRng,
    /// Interaction enacted at t-1.
    pub(crate) context_interaction: Option<InteractionId>,
    /// Composite `<t-2, t-1>` learned at the end of the previous step.
    pub(crate) context_pair_interaction: Option<InteractionId>,
    pub(crate) mood: Option<Mood>,
    pub(crate) step_count: u64,
}

impl<E: Environment> Existence<E> {
    /// Build an agent whose primitive universe is exactly `table`.
    pub fn new(
        table: &[PrimitiveSpec],
        environment: E,
        config: EngineConfig,
    ) -> Result<Self, EnactiveError> {
        let memory = Memory::from_primitives(table)?;
        Self::with_memory(memory, environment, config)
    }

    /// Build an agent around an existing memory. The memory must hold at
    /// least one primitive.
    pub fn with_memory(
        memory: Memory,
        environment: E,
        config: EngineConfig,
    ) -> Result<Self, EnactiveError> {
        if memory.primitives().next().is_none() {
            return Err(EnactiveError::EmptyPrimitiveTable);
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        tracing::info!(
            "Existence created: depth {:?}, proposal {:?}, selection by {:?}, {} primitives",
            config.context_depth,
            config.proposal,
            config.selection_key,
            memory.len()
        );
        Ok(Self {
            memory,
            environment,
            config,
            rng,
            context_interaction: None,
            context_pair_interaction: None,
            mood: None,
            step_count: 0,
        })
    }

    /// Run one full control-loop iteration. Never fails: a broken
    /// expectation is reported in the trace and learned from.
    pub fn step(&mut self) -> StepTrace {
        self.step_count += 1;

        let anticipations = self.anticipate();
        let intention = self.select(&anticipations);
        let intended = intention.interaction;

        let enacted = self.enact(intended);
        let violated = enacted != intended;
        if violated {
            tracing::debug!(
                "Expected {} but enacted {}",
                self.memory.label(intended),
                self.memory.label(enacted)
            );
            self.memory.record_alternative(intended, enacted);
            if let Some(experiment) = intention.experiment {
                if self.memory.experiment(experiment).is_abstract() {
                    self.memory.record_enacted(experiment, enacted);
                }
            }
        }

        let mood = self.config.mood_threshold.mood_for(self.memory.valence(enacted));
        self.mood = Some(mood);

        let learned = self.learn(enacted);

        let trace = StepTrace {
            step: self.step_count,
            intended: self.memory.label(intended).to_string(),
            enacted: self.memory.label(enacted).to_string(),
            valence: self.memory.valence(enacted),
            weight: self.memory.weight(enacted),
            mood,
            violated,
            learned: learned
                .iter()
                .map(|id| self.memory.label(*id).to_string())
                .collect(),
        };
        tracing::debug!("Step {}: {}", trace.step, trace);
        trace
    }

    /// Fold `enacted` into memory and rotate the context window.
    ///
    /// Returns the composites reinforced, in order: `<context, enacted>`,
    /// then at depth 2 `<pre(context_pair), <context, enacted>>` and
    /// `<context_pair, enacted>`.
    pub(crate) fn learn(&mut self, enacted: InteractionId) -> Vec<InteractionId> {
        let mut learned = Vec::with_capacity(3);
        let mut enacted_pair = None;

        if let Some(context) = self.context_interaction {
            let pair = self.reinforce(context, enacted);
            learned.push(pair);
            enacted_pair = Some(pair);

            if self.config.context_depth == ContextDepth::Two {
                if let Some(context_pair) = self.context_pair_interaction {
                    if let Some(penultimate) = self.memory.interaction(context_pair).pre() {
                        learned.push(self.reinforce(penultimate, pair));
                    }
                    learned.push(self.reinforce(context_pair, enacted));
                }
            }
        }

        self.context_pair_interaction = enacted_pair;
        self.context_interaction = Some(enacted);
        learned
    }

    fn reinforce(&mut self, pre: InteractionId, post: InteractionId) -> InteractionId {
        let id = self.memory.reinforce(pre, post);
        let interaction = self.memory.interaction(id);
        if interaction.weight() == 1 {
            tracing::debug!("Learned {}", interaction);
        } else {
            tracing::debug!("Reinforced {}", interaction);
        }
        id
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut E {
        &mut self.environment
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn context_interaction(&self) -> Option<InteractionId> {
        self.context_interaction
    }

    pub fn context_pair_interaction(&self) -> Option<InteractionId> {
        self.context_pair_interaction
    }

    /// Mood after the last step; `None` before the first one.
    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn steps(&self) -> u64 {
        self.step_count
    }

    /// Give back the memory and the environment.
    pub fn into_parts(self) -> (Memory, E) {
        (self.memory, self.environment)
    }
}
