//! Validation related error types

use thiserror::Error;

/// Validation and configuration errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// No descriptor matches the requested name
    #[error("There isn't a hash algorithm named '{name}' (available: md5, sha256)")]
    UnknownAlgorithm { name: String },

    /// Output buffer does not match the algorithm's digest size
    #[error("{algorithm} produces {expected}-byte digests, got a {actual}-byte buffer")]
    DigestLength {
        algorithm: String,
        expected: usize,
        actual: usize,
    },

    /// Invalid input parameter
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },

    /// A job was submitted without input files
    #[error("A hash job needs at least one input file")]
    EmptyJob,
}

impl ValidationError {
    /// Create an unknown algorithm error
    pub fn unknown_algorithm(name: &str) -> Self {
        Self::UnknownAlgorithm {
            name: name.to_string(),
        }
    }

    /// Create a digest length mismatch error
    pub fn digest_length(algorithm: &str, expected: usize, actual: usize) -> Self {
        Self::DigestLength {
            algorithm: algorithm.to_string(),
            expected,
            actual,
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }
}
