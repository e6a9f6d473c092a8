//! Stand-in worlds for the enactive agent.
//!
//! Each world answers a primitive act with a result label computed only from
//! its own call history. None of them look at valences; they only know the
//! experiment being attempted.

pub mod fixed;
pub mod homeostatic;
pub mod sequence;
pub mod switching;

pub use fixed::FixedWorld;
pub use homeostatic::HomeostaticWorld;
pub use sequence::{AlternationWorld, RepetitionWorld};
pub use switching::SwitchingWorld;

use enactive_core::{EnactiveError, Environment, Intent, PrimitiveSpec};

/// Any of the built-in worlds, selectable by name.
#[derive(Debug, Clone)]
pub enum World {
    Fixed(FixedWorld),
    Alternation(AlternationWorld),
    Repetition(RepetitionWorld),
    Switching(SwitchingWorld),
    Homeostatic(HomeostaticWorld),
}

impl World {
    pub const NAMES: [&'static str; 5] = [
        "fixed",
        "alternation",
        "repetition",
        "switching",
        "homeostatic",
    ];

    /// Build a world in its initial state from its configuration name.
    pub fn from_name(name: &str) -> Result<Self, EnactiveError> {
        let world = match name.trim().to_lowercase().as_str() {
            "fixed" => World::Fixed(FixedWorld::scenario()),
            "alternation" => World::Alternation(AlternationWorld::new()),
            "repetition" => World::Repetition(RepetitionWorld::new()),
            "switching" => World::Switching(SwitchingWorld::default()),
            "homeostatic" => World::Homeostatic(HomeostaticWorld::default()),
            _ => return Err(EnactiveError::UnknownWorld(name.to_string())),
        };
        tracing::debug!("World {} selected", world.name());
        Ok(world)
    }

    pub fn name(&self) -> &'static str {
        match self {
            World::Fixed(_) => "fixed",
            World::Alternation(_) => "alternation",
            World::Repetition(_) => "repetition",
            World::Switching(_) => "switching",
            World::Homeostatic(_) => "homeostatic",
        }
    }

    /// The primitive table whose results this world produces.
    pub fn primitive_table(&self) -> Vec<PrimitiveSpec> {
        match self {
            World::Homeostatic(_) => HomeostaticWorld::primitive_table(),
            _ => PrimitiveSpec::default_table(),
        }
    }
}

impl Environment for World {
    fn enact_primitive(&mut self, intent: &Intent<'_>) -> String {
        match self {
            World::Fixed(world) => world.enact_primitive(intent),
            World::Alternation(world) => world.enact_primitive(intent),
            World::Repetition(world) => world.enact_primitive(intent),
            World::Switching(world) => world.enact_primitive(intent),
            World::Homeostatic(world) => world.enact_primitive(intent),
        }
    }
}

/// Shorthand for asking a world about a bare experiment label.
#[cfg(test)]
pub(crate) fn attempt<E: Environment>(world: &mut E, experiment: &str) -> String {
    world.enact_primitive(&Intent {
        experiment,
        interaction: experiment,
        meaning: None,
    })
}
