//! Interaction memory: one arena per agent.
//!
//! Interactions, experiments and outcomes live in append-only vectors and are
//! addressed by index handles. A label index on each arena makes every label
//! resolve to exactly one instance, so re-deriving a label (for example
//! `<e1r2e2r1>` from its parts) always returns the entity created first.
//!
//! Nothing is ever evicted. A handle minted by a `Memory` stays valid for the
//! life of that `Memory`; handles are not meaningful across memories.

use enactive_core::interaction::{abstract_experiment_label, composite_label, primitive_label};
use enactive_core::{
    EnactiveError, Experiment, ExperimentId, Interaction, InteractionId, InteractionKind, Outcome,
    OutcomeId, PrimitiveSpec, Valence,
};
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct Memory {
    interactions: Vec<Interaction>,
    interaction_index: HashMap<String, InteractionId>,
    experiments: Vec<Experiment>,
    experiment_index: HashMap<String, ExperimentId>,
    outcomes: Vec<Outcome>,
    outcome_index: HashMap<String, OutcomeId>,
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a memory holding exactly the primitives of `table`.
    pub fn from_primitives(table: &[PrimitiveSpec]) -> Result<Self, EnactiveError> {
        PrimitiveSpec::validate_table(table)?;
        let mut memory = Self::new();
        for spec in table {
            let experiment = memory.experiment_or_insert(&spec.experiment);
            let outcome = memory.outcome_or_insert(&spec.result);
            memory.primitive_or_insert(experiment, outcome, spec.valence, Some(spec.meaning.clone()));
        }
        tracing::debug!(
            "Memory initialized with {} primitives over {} experiments",
            memory.interactions.len(),
            memory.experiments.len()
        );
        Ok(memory)
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Resolve an interaction label. A miss is `None`, never an error.
    pub fn lookup(&self, label: &str) -> Option<InteractionId> {
        self.interaction_index.get(label).copied()
    }

    pub fn lookup_experiment(&self, label: &str) -> Option<ExperimentId> {
        self.experiment_index.get(label).copied()
    }

    pub fn lookup_outcome(&self, label: &str) -> Option<OutcomeId> {
        self.outcome_index.get(label).copied()
    }

    /// Look up the primitive coupling `experiment` with `outcome`.
    pub fn lookup_primitive(&self, experiment: ExperimentId, outcome: OutcomeId) -> Option<InteractionId> {
        let label = primitive_label(self.experiment(experiment).label(), self.outcome(outcome).label());
        self.lookup(&label)
    }

    /// Look up the composite `pre` then `post`.
    pub fn lookup_composite(&self, pre: InteractionId, post: InteractionId) -> Option<InteractionId> {
        let label = composite_label(self.interaction(pre).label(), self.interaction(post).label());
        self.lookup(&label)
    }

    // ========================================================================
    // Get-or-create
    // ========================================================================

    /// Return the interaction stored under `label`, or store the one produced
    /// by `build` for the next free handle.
    pub fn get_or_create<F>(&mut self, label: &str, build: F) -> InteractionId
    where
        F: FnOnce(InteractionId) -> Interaction,
    {
        if let Some(id) = self.lookup(label) {
            return id;
        }
        let id = InteractionId::new(self.interactions.len());
        let interaction = build(id);
        debug_assert_eq!(interaction.id(), id);
        debug_assert_eq!(interaction.label(), label);
        self.interactions.push(interaction);
        self.interaction_index.insert(label.to_string(), id);
        id
    }

    pub fn experiment_or_insert(&mut self, label: &str) -> ExperimentId {
        if let Some(id) = self.lookup_experiment(label) {
            return id;
        }
        let id = ExperimentId::new(self.experiments.len());
        self.experiments.push(Experiment::primitive(id, label));
        self.experiment_index.insert(label.to_string(), id);
        id
    }

    pub fn outcome_or_insert(&mut self, label: &str) -> OutcomeId {
        if let Some(id) = self.lookup_outcome(label) {
            return id;
        }
        let id = OutcomeId::new(self.outcomes.len());
        self.outcomes.push(Outcome::new(id, label));
        self.outcome_index.insert(label.to_string(), id);
        id
    }

    /// Get or create the primitive `experiment`+`outcome`. `valence` and
    /// `meaning` only apply when the primitive is new.
    pub fn primitive_or_insert(
        &mut self,
        experiment: ExperimentId,
        outcome: OutcomeId,
        valence: Valence,
        meaning: Option<String>,
    ) -> InteractionId {
        let label = primitive_label(self.experiment(experiment).label(), self.outcome(outcome).label());
        self.get_or_create(&label, |id| {
            Interaction::primitive(id, label.as_str(), experiment, outcome, valence, meaning)
        })
    }

    /// Get or create the composite `pre` then `post`.
    ///
    /// A new composite starts with weight 0 and valence
    /// `valence(pre) + valence(post)`, saturating at the bounds of
    /// [`Valence`]. It is registered together with the abstract experiment
    /// that intends it, so the sequence can later be chosen as an action in
    /// its own right.
    pub fn composite_or_insert(&mut self, pre: InteractionId, post: InteractionId) -> InteractionId {
        let label = composite_label(self.interaction(pre).label(), self.interaction(post).label());
        if let Some(id) = self.lookup(&label) {
            return id;
        }
        let valence = self.valence(pre).saturating_add(self.valence(post));
        let id = self.get_or_create(&label, |id| {
            Interaction::composite(id, label.as_str(), pre, post, valence)
        });

        let experiment_label = abstract_experiment_label(&label);
        let experiment = match self.lookup_experiment(&experiment_label) {
            Some(existing) => existing,
            None => {
                let eid = ExperimentId::new(self.experiments.len());
                self.experiments
                    .push(Experiment::abstracting(eid, experiment_label.as_str(), id));
                self.experiment_index.insert(experiment_label, eid);
                eid
            }
        };
        self.interactions[id.index()].attach_abstract_experiment(experiment);

        tracing::trace!("Created composite {} (valence {})", label, valence);
        id
    }

    /// Get or create the composite `pre` then `post` and bump its weight.
    pub fn reinforce(&mut self, pre: InteractionId, post: InteractionId) -> InteractionId {
        let id = self.composite_or_insert(pre, post);
        self.interactions[id.index()].reinforce();
        id
    }

    /// Record that `enacted` happened when `intended` was attempted.
    /// Returns `true` if this alternative is new.
    pub fn record_alternative(&mut self, intended: InteractionId, enacted: InteractionId) -> bool {
        self.interactions[intended.index()].add_alternative(enacted)
    }

    /// Record that `enacted` happened when `experiment` was attempted.
    pub fn record_enacted(&mut self, experiment: ExperimentId, enacted: InteractionId) -> bool {
        self.experiments[experiment.index()].record_enacted(enacted)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// # Panics
    /// If `id` was not minted by this memory.
    pub fn interaction(&self, id: InteractionId) -> &Interaction {
        &self.interactions[id.index()]
    }

    /// # Panics
    /// If `id` was not minted by this memory.
    pub fn experiment(&self, id: ExperimentId) -> &Experiment {
        &self.experiments[id.index()]
    }

    /// # Panics
    /// If `id` was not minted by this memory.
    pub fn outcome(&self, id: OutcomeId) -> &Outcome {
        &self.outcomes[id.index()]
    }

    pub fn label(&self, id: InteractionId) -> &str {
        self.interaction(id).label()
    }

    pub fn valence(&self, id: InteractionId) -> Valence {
        self.interaction(id).valence()
    }

    pub fn weight(&self, id: InteractionId) -> u32 {
        self.interaction(id).weight()
    }

    /// Valence summed over the primitive leaves, ignoring cached values.
    pub fn recomputed_valence(&self, id: InteractionId) -> Valence {
        match self.interaction(id).parts() {
            None => self.valence(id),
            Some((pre, post)) => self
                .recomputed_valence(pre)
                .saturating_add(self.recomputed_valence(post)),
        }
    }

    /// The primitive experiment attempted first when enacting `id`.
    pub fn leading_experiment(&self, id: InteractionId) -> ExperimentId {
        let mut current = id;
        loop {
            match *self.interaction(current).kind() {
                InteractionKind::Primitive { experiment, .. } => return experiment,
                InteractionKind::Composite { pre, .. } => current = pre,
            }
        }
    }

    /// The primitive experiment attempted last when enacting `id` in full.
    pub fn trailing_experiment(&self, id: InteractionId) -> ExperimentId {
        let mut current = id;
        loop {
            match *self.interaction(current).kind() {
                InteractionKind::Primitive { experiment, .. } => return experiment,
                InteractionKind::Composite { post, .. } => current = post,
            }
        }
    }

    /// The interaction choosing `experiment` aims for: the composite of an
    /// abstract experiment, or the best-valued primitive of a primitive one
    /// (earliest created on ties).
    pub fn intended_interaction(&self, experiment: ExperimentId) -> Option<InteractionId> {
        if let Some(intended) = self.experiment(experiment).intended() {
            return Some(intended);
        }
        let mut best: Option<&Interaction> = None;
        for candidate in self.primitives().filter(|i| i.experiment() == Some(experiment)) {
            if best.map_or(true, |b| candidate.valence() > b.valence()) {
                best = Some(candidate);
            }
        }
        best.map(Interaction::id)
    }

    /// All interactions in creation order.
    pub fn interactions(&self) -> impl Iterator<Item = &Interaction> {
        self.interactions.iter()
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Interaction> {
        self.interactions.iter().filter(|i| i.is_primitive())
    }

    pub fn composites(&self) -> impl Iterator<Item = &Interaction> {
        self.interactions.iter().filter(|i| !i.is_primitive())
    }

    pub fn experiments(&self) -> impl Iterator<Item = &Experiment> {
        self.experiments.iter()
    }

    pub fn primitive_experiments(&self) -> impl Iterator<Item = &Experiment> {
        self.experiments.iter().filter(|e| !e.is_abstract())
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter()
    }

    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    pub fn composite_count(&self) -> usize {
        self.composites().count()
    }
}
