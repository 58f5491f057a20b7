//! URL validation logic
//!
//! This module probes candidates over HTTP and applies the
//! accept/reject policy to the response metadata.

pub mod validator;

// Re-export commonly used items
pub use validator::{HttpValidator, ValidateUrl, Verdict};
