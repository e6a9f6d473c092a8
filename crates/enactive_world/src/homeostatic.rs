//! A world with one internal variable the agent has to keep up.
//!
//! `e1` senses the level (r1 rising, r2 stable, r3 falling since the
//! previous call), `e2` eats (+1), `e3` moves (-1, or r2 when already
//! exhausted). The level also drains by one every `decay_every` calls.

use enactive_core::{Environment, Intent, PrimitiveSpec};

pub const MAX_LEVEL: u8 = 10;

#[derive(Debug, Clone)]
pub struct HomeostaticWorld {
    level: u8,
    previous_level: u8,
    decay_every: u64,
    calls: u64,
}

impl Default for HomeostaticWorld {
    fn default() -> Self {
        Self::new(5, 3)
    }
}

impl HomeostaticWorld {
    pub fn new(level: u8, decay_every: u64) -> Self {
        let level = level.min(MAX_LEVEL);
        Self {
            level,
            previous_level: level,
            decay_every: decay_every.max(1),
            calls: 0,
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    /// Primitives matching this world's answers.
    pub fn primitive_table() -> Vec<PrimitiveSpec> {
        vec![
            PrimitiveSpec::new("sense rising", "e1", "r1", 2),
            PrimitiveSpec::new("sense stable", "e1", "r2", 0),
            PrimitiveSpec::new("sense falling", "e1", "r3", -2),
            PrimitiveSpec::new("eat", "e2", "r1", 1),
            PrimitiveSpec::new("move", "e3", "r1", -1),
            PrimitiveSpec::new("exhausted", "e3", "r2", -5),
        ]
    }
}

impl Environment for HomeostaticWorld {
    fn enact_primitive(&mut self, intent: &Intent<'_>) -> String {
        let before = self.level;
        let result = match intent.experiment {
            "e1" => {
                if self.level > self.previous_level {
                    "r1"
                } else if self.level == self.previous_level {
                    "r2"
                } else {
                    "r3"
                }
            }
            "e2" => {
                self.level = (self.level + 1).min(MAX_LEVEL);
                "r1"
            }
            "e3" if self.level == 0 => "r2",
            "e3" => {
                self.level -= 1;
                "r1"
            }
            _ => "r1",
        };
        self.previous_level = before;

        self.calls += 1;
        if self.calls % self.decay_every == 0 {
            self.level = self.level.saturating_sub(1);
        }
        tracing::trace!("{} -> {} (level {})", intent.experiment, result, self.level);
        result.to_string()
    }
}
