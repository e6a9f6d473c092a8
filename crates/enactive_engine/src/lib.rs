//! # Enactive Engine
//!
//! The control loop of an agent that learns which sequences of interactions
//! are worth repeating, driven by valence alone.
//!
//! ## Step
//!
//! Each call to [`Existence::step`] runs to completion:
//! 1. **Anticipate**: propose every primitive (or primitive experiment) at
//!    proclivity 0, then let composites activated by the context propose
//!    their post parts with `weight * valence`.
//! 2. **Select**: rank the proposals and pick one intention.
//! 3. **Enact**: recursively try the intention against the world, stopping
//!    at the first part that does not go as expected.
//! 4. **Learn**: reinforce the composites linking the context to what was
//!    enacted, then rotate the two-step context window.
//!
//! Mood is read off the enacted valence and returned in the trace.
//!
//! ## Concurrency
//!
//! None. An `Existence` is the only mutator of its memory and every step is
//! synchronous. Wrappers that need concurrency must funnel steps through a
//! single owner.

mod anticipate;
mod enact;
mod existence;
mod heartbeat;
mod select;
mod trace;

pub use existence::Existence;
pub use heartbeat::HeartbeatConfig;
pub use select::Intention;
pub use trace::StepTrace;
