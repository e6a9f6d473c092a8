//! # Enactive Core
//!
//! Shared vocabulary of the enactive agent: the tokens the world and the
//! agent exchange (experiments and outcomes), the interactions built from
//! them, the anticipations proposed each step, the derived mood, and the
//! configuration that selects an engine variant.
//!
//! Nothing in here owns state across steps. The interaction memory lives in
//! `enactive_memory`, the control loop in `enactive_engine`.

pub mod anticipation;
pub mod config;
pub mod environment;
pub mod error;
pub mod experiment;
pub mod interaction;
pub mod mood;

pub use anticipation::{Anticipation, Anticipations, Candidate, Proclivity};
pub use config::{
    AgentConfig, ContextDepth, EngineConfig, EngineSection, Mode, MoodStrategy, NegativePolicy,
    PrimitiveSpec, Proposal, RunConfig, SelectionKey,
};
pub use environment::{Environment, Intent};
pub use error::EnactiveError;
pub use experiment::{Experiment, ExperimentId, Outcome, OutcomeId};
pub use interaction::{Interaction, InteractionId, InteractionKind, Valence};
pub use mood::{Mood, MoodThreshold};
