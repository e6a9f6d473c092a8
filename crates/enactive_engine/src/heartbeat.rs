//! Step pacing for drivers that run the agent on a clock.
//!
//! The engine never sleeps; a driver reads this to decide how long to wait
//! between calls to `step()`.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartbeatConfig {
    /// Pause between steps. Zero runs steps back to back.
    pub interval: Duration,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self::unpaced()
    }
}

impl HeartbeatConfig {
    pub fn from_millis(millis: u64) -> Self {
        Self {
            interval: Duration::from_millis(millis),
        }
    }

    pub fn unpaced() -> Self {
        Self {
            interval: Duration::ZERO,
        }
    }

    /// One step every half second, slow enough to follow by eye.
    pub fn watchable() -> Self {
        Self::from_millis(500)
    }

    pub fn is_paced(&self) -> bool {
        !self.interval.is_zero()
    }
}
