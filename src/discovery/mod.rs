//! File discovery
//!
//! This module walks the input paths and yields every file
//! found beneath them.

pub mod walker;

// Re-export commonly used items
pub use walker::{spawn_walk, walk_paths};
