//! Worlds that reward patterns in the order experiments are attempted.

use enactive_core::{Environment, Intent};

/// r2 iff the experiment differs from the previous one, else r1.
#[derive(Debug, Clone, Default)]
pub struct AlternationWorld {
    previous: Option<String>,
}

impl AlternationWorld {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Environment for AlternationWorld {
    fn enact_primitive(&mut self, intent: &Intent<'_>) -> String {
        let changed = self.previous.as_deref() != Some(intent.experiment);
        self.previous = Some(intent.experiment.to_string());
        let result = if changed { "r2" } else { "r1" };
        tracing::trace!("{} -> {}", intent.experiment, result);
        result.to_string()
    }
}

/// r2 iff the experiment repeats the previous one and differs from the one
/// before it, else r1. Only a depth-2 learner can get r2 consistently.
#[derive(Debug, Clone, Default)]
pub struct RepetitionWorld {
    penultimate: Option<String>,
    previous: Option<String>,
}

impl RepetitionWorld {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Environment for RepetitionWorld {
    fn enact_primitive(&mut self, intent: &Intent<'_>) -> String {
        let repeats = self.previous.as_deref() == Some(intent.experiment);
        let fresh = self.penultimate.as_deref() != Some(intent.experiment);
        let result = if repeats && fresh { "r2" } else { "r1" };

        self.penultimate = self.previous.take();
        self.previous = Some(intent.experiment.to_string());
        tracing::trace!("{} -> {}", intent.experiment, result);
        result.to_string()
    }
}
