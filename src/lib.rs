//! Scan files for comma-separated candidate URLs and keep the live ones.
//!
//! Every discovered file gets its own task. Candidates are probed with a
//! `HEAD` request under a process-wide concurrency gate, and accepted URLs
//! are streamed to a single consumer as soon as they are validated.

pub mod config;
pub mod core;
pub mod discovery;
pub mod pipeline;
pub mod reporting;
pub mod ui;
pub mod validation;

pub use crate::config::Config;
pub use crate::core::{Result, SieveError};
pub use crate::pipeline::{ConcurrencyGate, Coordinator, Extractor, PipelineSettings, RunSummary};
pub use crate::validation::{HttpValidator, ValidateUrl, Verdict};
