//! Property-based tests for the enactive engine.
//!
//! The world answers from a random script, so these hold whatever the agent
//! happens to experience.

use enactive_core::{EngineConfig, Environment, Intent, PrimitiveSpec};
use enactive_engine::Existence;
use proptest::prelude::*;
use std::collections::HashMap;

// ============================================================================
// Strategies
// ============================================================================

/// Cycles through a fixed list of result labels.
struct Scripted {
    answers: Vec<&'static str>,
    cursor: usize,
}

impl Environment for Scripted {
    fn enact_primitive(&mut self, _intent: &Intent<'_>) -> String {
        let answer = self.answers[self.cursor % self.answers.len()];
        self.cursor += 1;
        answer.to_string()
    }
}

fn arb_answers() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop_oneof![Just("r1"), Just("r2")], 1..12)
}

fn arb_config() -> impl Strategy<Value = EngineConfig> {
    (
        prop_oneof![
            Just(EngineConfig::simple()),
            Just(EngineConfig::recursive()),
            Just(EngineConfig::constructive()),
        ],
        any::<u64>(),
    )
        .prop_map(|(config, seed)| config.with_seed(seed))
}

fn agent(config: EngineConfig, answers: Vec<&'static str>) -> Existence<Scripted> {
    let world = Scripted { answers, cursor: 0 };
    Existence::new(&PrimitiveSpec::default_table(), world, config).unwrap()
}

// ============================================================================
// Step invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Learning keeps every composite's valence equal to the sum of its parts.
    #[test]
    fn valence_stays_additive(config in arb_config(), answers in arb_answers(), steps in 1usize..40) {
        let mut agent = agent(config, answers);
        for _ in 0..steps {
            agent.step();
        }
        let memory = agent.memory();
        for composite in memory.composites() {
            let (pre, post) = composite.parts().unwrap();
            prop_assert_eq!(composite.valence(), memory.valence(pre) + memory.valence(post));
        }
    }

    /// Weights never decrease from one step to the next.
    #[test]
    fn weights_are_monotonic(config in arb_config(), answers in arb_answers(), steps in 1usize..40) {
        let mut agent = agent(config, answers);
        let mut previous: HashMap<String, u32> = HashMap::new();
        for _ in 0..steps {
            agent.step();
            for interaction in agent.memory().interactions() {
                let before = previous.get(interaction.label()).copied().unwrap_or(0);
                prop_assert!(interaction.weight() >= before);
                previous.insert(interaction.label().to_string(), interaction.weight());
            }
        }
    }

    /// Every trace is consistent with the configured mood threshold and
    /// with the context it leaves behind.
    #[test]
    fn traces_agree_with_state(config in arb_config(), answers in arb_answers(), steps in 1usize..40) {
        let threshold = config.mood_threshold;
        let mut agent = agent(config, answers);
        for _ in 0..steps {
            let trace = agent.step();
            prop_assert_eq!(trace.mood, threshold.mood_for(trace.valence));
            prop_assert_eq!(Some(trace.mood), agent.mood());
            prop_assert_eq!(trace.violated, trace.intended != trace.enacted);
            let context = agent.context_interaction().unwrap();
            prop_assert_eq!(agent.memory().label(context), trace.enacted.as_str());
            prop_assert!(matches!(trace.learned.len(), 0 | 1 | 3));
        }
    }

    /// The same seed against the same world replays the same run.
    #[test]
    fn seeded_runs_are_reproducible(config in arb_config(), answers in arb_answers()) {
        let mut first = agent(config.clone(), answers.clone());
        let mut second = agent(config, answers);
        for _ in 0..25 {
            prop_assert_eq!(first.step(), second.step());
        }
    }
}
