use enactive_core::{Environment, Intent};

/// e1 gives r1 and everything else r2, except that the answers are swapped
/// while the call clock is in `(t1, t2]`.
#[derive(Debug, Clone)]
pub struct SwitchingWorld {
    t1: u64,
    t2: u64,
    clock: u64,
}

impl Default for SwitchingWorld {
    fn default() -> Self {
        Self::new(8, 15)
    }
}

impl SwitchingWorld {
    pub fn new(t1: u64, t2: u64) -> Self {
        Self { t1, t2, clock: 0 }
    }

    fn swapped(&self) -> bool {
        self.clock > self.t1 && self.clock <= self.t2
    }
}

impl Environment for SwitchingWorld {
    fn enact_primitive(&mut self, intent: &Intent<'_>) -> String {
        self.clock += 1;
        if self.clock == self.t1 + 1 || self.clock == self.t2 + 1 {
            tracing::debug!("Switching world flips at call {}", self.clock);
        }
        let first = intent.experiment == "e1";
        let result = if first != self.swapped() { "r1" } else { "r2" };
        result.to_string()
    }
}
