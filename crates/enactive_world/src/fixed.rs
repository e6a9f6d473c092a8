use enactive_core::{Environment, Intent};
use std::collections::HashMap;

/// Answers each experiment with the same result every time.
#[derive(Debug, Clone)]
pub struct FixedWorld {
    answers: HashMap<String, String>,
    fallback: String,
}

impl FixedWorld {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            answers: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    pub fn with_answer(mut self, experiment: impl Into<String>, result: impl Into<String>) -> Self {
        self.answers.insert(experiment.into(), result.into());
        self
    }

    /// e1 gives r2, everything else r1.
    pub fn scenario() -> Self {
        Self::new("r1").with_answer("e1", "r2").with_answer("e2", "r1")
    }
}

impl Environment for FixedWorld {
    fn enact_primitive(&mut self, intent: &Intent<'_>) -> String {
        self.answers
            .get(intent.experiment)
            .unwrap_or(&self.fallback)
            .clone()
    }
}
