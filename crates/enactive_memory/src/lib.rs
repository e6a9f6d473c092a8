pub mod snapshot;
pub mod store;

pub use snapshot::{ExperimentRecord, InteractionRecord, MemorySnapshot};
pub use store::Memory;
