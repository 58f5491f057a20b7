//! Extraction pipeline
//!
//! Files are read by one task each, split into candidates and validated
//! under a process-wide concurrency gate. Accepted URLs flow into a single
//! result sink drained by one consumer.

pub mod coordinator;
pub mod extractor;
pub mod gate;
pub mod summary;

// Re-export commonly used items
pub use coordinator::{Coordinator, PipelineSettings};
pub use extractor::{Extractor, ReadStrategy, candidate, is_delimiter, split_segments};
pub use gate::{ConcurrencyGate, GatePermit};
pub use summary::{RunStats, RunSummary};
