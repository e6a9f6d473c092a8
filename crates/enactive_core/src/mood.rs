//! Mood: a two-valued affect derived from the sign of the last enacted valence.
//!
//! Mood keeps no memory of its own. It is recomputed every step from the
//! enacted interaction, and the threshold that splits HAPPY from SAD is part
//! of the engine configuration: with [`MoodThreshold::Positive`] a valence of
//! exactly zero is SAD, with [`MoodThreshold::NonNegative`] it is HAPPY.

use crate::interaction::Valence;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mood {
    Happy,
    Sad,
}

impl Mood {
    pub fn is_happy(self) -> bool {
        self == Mood::Happy
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "HAPPY",
            Mood::Sad => "SAD",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which valences count as pleasant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodThreshold {
    /// HAPPY iff valence > 0
    Positive,
    /// HAPPY iff valence >= 0
    #[default]
    NonNegative,
}

impl MoodThreshold {
    pub fn mood_for(self, valence: Valence) -> Mood {
        let happy = match self {
            MoodThreshold::Positive => valence > 0,
            MoodThreshold::NonNegative => valence >= 0,
        };
        if happy {
            Mood::Happy
        } else {
            Mood::Sad
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_valence_depends_on_threshold() {
        assert_eq!(MoodThreshold::Positive.mood_for(0), Mood::Sad);
        assert_eq!(MoodThreshold::NonNegative.mood_for(0), Mood::Happy);
    }

    #[test]
    fn test_sign_decides_mood() {
        for threshold in [MoodThreshold::Positive, MoodThreshold::NonNegative] {
            assert_eq!(threshold.mood_for(5), Mood::Happy);
            assert_eq!(threshold.mood_for(-1), Mood::Sad);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Mood::Happy.to_string(), "HAPPY");
        assert_eq!(Mood::Sad.to_string(), "SAD");
        assert!(Mood::Happy.is_happy());
    }
}
