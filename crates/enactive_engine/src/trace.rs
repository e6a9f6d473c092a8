//! Per-step summary returned by [`crate::Existence::step`].

use enactive_core::{Mood, Valence};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTrace {
    /// 1-based step number.
    pub step: u64,
    pub intended: String,
    pub enacted: String,
    pub valence: Valence,
    /// Weight of the enacted interaction after learning.
    pub weight: u32,
    pub mood: Mood,
    /// Enacted differs from intended.
    pub violated: bool,
    /// Composites reinforced by this step, in learning order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub learned: Vec<String>,
}

impl StepTrace {
    pub fn is_happy(&self) -> bool {
        self.mood.is_happy()
    }
}

impl fmt::Display for StepTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, valence {}, weight {} {}",
            self.enacted, self.valence, self.weight, self.mood
        )
    }
}
