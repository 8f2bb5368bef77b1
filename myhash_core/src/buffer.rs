//! Buffer management module with memory tracking
//!
//! Read buffers are charged against a shared limit so that many concurrent
//! jobs cannot exhaust memory. A `TrackedBuffer` returns its share when
//! dropped.

use crate::{Error, Result, error::InternalError, error::ValidationError};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Default read chunk size (4KB)
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Default memory limit shared by all read buffers (64MB)
pub const DEFAULT_MEMORY_LIMIT: usize = 64 * 1024 * 1024;

/// Largest single buffer the tracker will hand out (1GB)
const MAX_SINGLE_ALLOCATION: usize = 1024 * 1024 * 1024;

/// Memory tracker for managing memory allocation limits
#[derive(Debug, Clone)]
pub struct MemoryTracker {
    /// Current memory usage
    memory_used: Arc<AtomicUsize>,
    /// Memory limit
    memory_limit: usize,
}

impl Default for MemoryTracker {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_LIMIT)
    }
}

impl MemoryTracker {
    /// Create a new memory tracker with the specified limit
    pub fn new(limit: usize) -> Self {
        Self {
            memory_used: Arc::new(AtomicUsize::new(0)),
            memory_limit: limit,
        }
    }

    /// Get the current memory limit
    pub fn limit(&self) -> usize {
        self.memory_limit
    }

    /// Get current memory usage
    pub fn used(&self) -> usize {
        self.memory_used.load(Ordering::Relaxed)
    }

    /// Allocate a zeroed buffer of `size` bytes charged against the limit
    pub fn allocate(&self, size: usize) -> Result<TrackedBuffer> {
        if size > MAX_SINGLE_ALLOCATION {
            return Err(Error::Validation(ValidationError::invalid_parameter(
                "buffer_size",
                &format!(
                    "{} MB in a single buffer exceeds reasonable limits",
                    size / 1024 / 1024
                ),
            )));
        }

        self.reserve(size)?;

        let mut data = Vec::new();
        if let Err(e) = data.try_reserve_exact(size) {
            self.release(size);
            return Err(Error::Internal(InternalError::buffer_allocation(
                size,
                e.to_string(),
            )));
        }
        data.resize(size, 0);

        Ok(TrackedBuffer {
            data,
            tracker: self.clone(),
        })
    }

    fn reserve(&self, size: usize) -> Result<()> {
        let mut current = self.memory_used.load(Ordering::Relaxed);
        loop {
            let requested = current.saturating_add(size);
            if requested > self.memory_limit {
                return Err(Error::Internal(InternalError::memory_limit_exceeded(
                    self.memory_limit,
                    requested,
                )));
            }

            match self.memory_used.compare_exchange_weak(
                current,
                requested,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Ok(()),
                Err(actual) => current = actual,
            }
        }
    }

    fn release(&self, size: usize) {
        // Saturating so a double release can never underflow
        let _ = self
            .memory_used
            .fetch_update(Ordering::AcqRel, Ordering::Relaxed, |used| {
                Some(used.saturating_sub(size))
            });
    }
}

/// Buffer whose size is accounted in a `MemoryTracker` until dropped
pub struct TrackedBuffer {
    data: Vec<u8>,
    tracker: MemoryTracker,
}

impl std::fmt::Debug for TrackedBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedBuffer")
            .field("len", &self.data.len())
            .finish()
    }
}

impl Deref for TrackedBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl DerefMut for TrackedBuffer {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl Drop for TrackedBuffer {
    fn drop(&mut self) {
        self.tracker.release(self.data.len());
    }
}
