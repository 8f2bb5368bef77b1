//! Internal library error types

use thiserror::Error;

/// Internal library errors
#[derive(Error, Debug)]
pub enum InternalError {
    /// Memory limit exceeded
    #[error(
        "Memory limit exceeded: current usage {current} bytes would exceed limit of {limit} bytes"
    )]
    MemoryLimitExceeded { limit: usize, current: usize },

    /// The allocator refused a buffer
    #[error("Memory allocation of {size} bytes failed: {message}")]
    BufferAllocation { size: usize, message: String },

    /// A worker task panicked or was cancelled
    #[error("Worker for job {job} failed: {message}")]
    WorkerFailed { job: usize, message: String },
}

impl InternalError {
    /// Create a memory limit exceeded error
    pub fn memory_limit_exceeded(limit: usize, current: usize) -> Self {
        Self::MemoryLimitExceeded { limit, current }
    }

    /// Create a buffer allocation error
    pub fn buffer_allocation(size: usize, message: impl Into<String>) -> Self {
        Self::BufferAllocation {
            size,
            message: message.into(),
        }
    }

    /// Create a worker failure error
    pub fn worker_failed(job: usize, message: impl Into<String>) -> Self {
        Self::WorkerFailed {
            job,
            message: message.into(),
        }
    }

    /// Check if this error only affects the job that raised it
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MemoryLimitExceeded { .. } | Self::BufferAllocation { .. }
        )
    }
}
