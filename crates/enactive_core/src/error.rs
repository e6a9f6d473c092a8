use thiserror::Error;

/// Errors raised while building an agent. Stepping an agent never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnactiveError {
    #[error("primitive table is empty")]
    EmptyPrimitiveTable,
    #[error("primitive interaction {label} defined twice (meanings {first:?} and {second:?})")]
    DuplicatePrimitive {
        label: String,
        first: String,
        second: String,
    },
    #[error("unknown engine mode: {0}")]
    UnknownMode(String),
    #[error("unknown world: {0}")]
    UnknownWorld(String),
    #[error("invalid context depth {0}, expected 1 or 2")]
    InvalidContextDepth(u8),
}
