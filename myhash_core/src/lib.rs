//! myhash core library
//!
//! Streaming MD5 / SHA-256 digest engine, chunked byte sources and the
//! concurrent job runner used by the `myhash` command line tool.

pub mod buffer;
pub mod error;
pub mod file_io;
pub mod hashing;
pub mod jobs;

// Re-export main types
pub use buffer::{DEFAULT_CHUNK_SIZE, DEFAULT_MEMORY_LIMIT, MemoryTracker};
pub use error::{Error, Result};
pub use file_io::{ByteSource, FileSource, MemorySource};
pub use hashing::{
    AlgorithmRegistry, Digest, DigestContext, HashAlgorithm, HashAlgorithmImpl, HashCalculator,
    HashResult,
};
pub use jobs::{HashJob, JobOutcome, JobRunner, OutputSink};

/// Core hashing configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct HashConfig {
    /// Size of each read from a byte source
    pub chunk_size: usize,
    /// Upper bound on simultaneously running jobs, `None` runs every job at once
    ///
    /// Defaults to the available parallelism; each running job holds one
    /// open file.
    pub max_concurrent_jobs: Option<usize>,
    /// Print results in job order after all workers finish
    pub ordered_output: bool,
    /// Bytes available for chunk buffers across all running jobs
    pub memory_limit: usize,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_concurrent_jobs: Some(default_max_concurrent_jobs()),
            ordered_output: false,
            memory_limit: DEFAULT_MEMORY_LIMIT,
        }
    }
}

/// One running job per available CPU
pub fn default_max_concurrent_jobs() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

impl HashConfig {
    /// Create a test configuration
    pub fn test() -> Self {
        Self {
            chunk_size: 7, // odd size so chunks straddle block boundaries
            max_concurrent_jobs: Some(2),
            ordered_output: true,
            memory_limit: 1024 * 1024,
        }
    }

    /// Check that the configuration can drive a job runner
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(error::ValidationError::invalid_parameter(
                "chunk_size",
                "must be greater than zero",
            )
            .into());
        }
        if self.max_concurrent_jobs == Some(0) {
            return Err(error::ValidationError::invalid_parameter(
                "max_concurrent_jobs",
                "must be greater than zero",
            )
            .into());
        }
        if self.memory_limit < self.chunk_size {
            return Err(error::ValidationError::invalid_parameter(
                "memory_limit",
                "must hold at least one chunk",
            )
            .into());
        }
        Ok(())
    }
}
