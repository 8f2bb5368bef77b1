//! Test utilities for the myhash workspace
//!
//! Known-answer vectors and builders for files with deterministic
//! content, shared by the core test suites.

pub mod builders;
pub mod vectors;

// Re-export commonly used types
pub use builders::{TestFileBuilder, deterministic_bytes};
pub use vectors::{BOUNDARY_LENGTHS, KNOWN_VECTORS, KnownVector};
