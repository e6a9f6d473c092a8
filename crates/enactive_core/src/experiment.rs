//! Experiments (what the agent attempts) and outcomes (what the world reports).

use crate::interaction::InteractionId;
use serde::{Deserialize, Serialize};

/// Handle of an experiment inside its memory arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExperimentId(usize);

impl ExperimentId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle of an outcome inside its memory arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutcomeId(usize);

impl OutcomeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A class of action the agent may choose.
///
/// Primitive experiments come from the initialization table and are handed
/// to the world as-is. Abstract experiments wrap a composite interaction: choosing
/// one means trying to enact that whole sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experiment {
    id: ExperimentId,
    label: String,
    intended: Option<InteractionId>,
    /// Interactions actually enacted when this experiment failed.
    enacted: Vec<InteractionId>,
}

impl Experiment {
    pub fn primitive(id: ExperimentId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            intended: None,
            enacted: Vec::new(),
        }
    }

    pub fn abstracting(id: ExperimentId, label: impl Into<String>, intended: InteractionId) -> Self {
        Self {
            id,
            label: label.into(),
            intended: Some(intended),
            enacted: Vec::new(),
        }
    }

    pub fn id(&self) -> ExperimentId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_abstract(&self) -> bool {
        self.intended.is_some()
    }

    /// The composite this abstract experiment tries to enact.
    pub fn intended(&self) -> Option<InteractionId> {
        self.intended
    }

    pub fn enacted(&self) -> &[InteractionId] {
        &self.enacted
    }

    /// Record an interaction enacted while attempting this experiment.
    /// Returns `false` if it was already recorded.
    pub fn record_enacted(&mut self, interaction: InteractionId) -> bool {
        if self.intended == Some(interaction) || self.enacted.contains(&interaction) {
            return false;
        }
        self.enacted.push(interaction);
        true
    }
}

/// An observed result label reported by the world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    id: OutcomeId,
    label: String,
}

impl Outcome {
    pub fn new(id: OutcomeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    pub fn id(&self) -> OutcomeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
