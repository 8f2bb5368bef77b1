//! Hash calculation functionality for the myhash core library
//!
//! This module contains the block transforms, the streaming digest context,
//! the algorithm descriptors and a calculator that drives them over byte
//! sources.

use crate::buffer::MemoryTracker;
use crate::file_io::{ByteSource, FileSource, hash_reader};
use crate::{Error, HashConfig, Result, error::ValidationError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

mod algorithms;
mod block_buffer;
mod context;
mod registry;
mod traits;

pub use algorithms::{MD5_OUTPUT_SIZE, Md5Algorithm, SHA256_OUTPUT_SIZE, Sha256Algorithm};
pub use block_buffer::BLOCK_SIZE;
pub use context::{BlockContext, Digest, DigestContext, MAX_DIGEST_SIZE};
pub use registry::AlgorithmRegistry;
pub use traits::{BlockTransform, HashAlgorithmImpl, LengthEncoding};

/// Hash algorithms supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5 (RFC 1321)
    MD5,
    /// SHA-256 (FIPS 180-4)
    SHA256,
}

impl HashAlgorithm {
    /// Every supported algorithm, in registry order
    pub fn all() -> &'static [HashAlgorithm] {
        &[HashAlgorithm::MD5, HashAlgorithm::SHA256]
    }

    /// Static descriptor for this algorithm
    pub fn descriptor(self) -> &'static dyn HashAlgorithmImpl {
        AlgorithmRegistry::get(self)
    }

    /// Digest length in bytes
    pub fn digest_size(self) -> usize {
        self.descriptor().digest_size()
    }

    /// Upper-case name used in output lines
    pub fn display_name(self) -> &'static str {
        self.descriptor().name()
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.descriptor().id())
    }
}

impl std::str::FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        AlgorithmRegistry::find(s).map(|descriptor| descriptor.algorithm())
    }
}

/// Result of hash calculation
#[derive(Debug, Clone, Serialize)]
pub struct HashResult {
    pub algorithm: HashAlgorithm,
    pub digest: Digest,
    pub input_size: u64,
    pub duration: Duration,
}

impl HashResult {
    /// Lowercase hex rendering of the digest
    pub fn hash(&self) -> String {
        self.digest.to_hex()
    }
}

/// Hash calculator for in-memory data and file streams
#[derive(Clone)]
pub struct HashCalculator {
    /// Memory tracker for chunk buffers
    memory_tracker: MemoryTracker,
    /// Bytes requested from a source per read
    chunk_size: usize,
}

impl std::fmt::Debug for HashCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HashCalculator")
            .field("chunk_size", &self.chunk_size)
            .field("memory_limit", &self.memory_tracker.limit())
            .field("memory_used", &self.memory_tracker.used())
            .finish()
    }
}

impl HashCalculator {
    /// Create a new hash calculator with default settings
    pub fn new() -> Self {
        Self::with_config(&HashConfig::default())
    }

    /// Create a hash calculator with its own memory budget from `config`
    pub fn with_config(config: &HashConfig) -> Self {
        Self::with_tracker(MemoryTracker::new(config.memory_limit), config.chunk_size)
    }

    /// Create a hash calculator that charges buffers to an existing tracker
    pub fn with_tracker(memory_tracker: MemoryTracker, chunk_size: usize) -> Self {
        Self {
            memory_tracker,
            chunk_size,
        }
    }

    /// Get the memory tracker for this calculator
    pub fn memory_tracker(&self) -> &MemoryTracker {
        &self.memory_tracker
    }

    /// Bytes requested per read
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Calculate hash for byte data
    pub fn calculate_bytes(&self, algorithm: HashAlgorithm, data: &[u8]) -> Result<HashResult> {
        let start_time = Instant::now();
        let digest = algorithm.descriptor().hash_bytes(data);

        Ok(HashResult {
            algorithm,
            digest,
            input_size: data.len() as u64,
            duration: start_time.elapsed(),
        })
    }

    /// Calculate hash over the concatenation of `sources`, in order
    pub async fn calculate_sources(
        &self,
        algorithm: HashAlgorithm,
        sources: &mut [&mut dyn ByteSource],
    ) -> Result<HashResult> {
        let start_time = Instant::now();
        let mut buffer = self.memory_tracker.allocate(self.chunk_size)?;
        let mut context = DigestContext::new(algorithm);
        let mut input_size = 0;

        for source in sources.iter_mut() {
            input_size += hash_reader(&mut context, &mut **source, &mut buffer).await?;
        }

        Ok(HashResult {
            algorithm,
            digest: context.finalize(),
            input_size,
            duration: start_time.elapsed(),
        })
    }

    /// Calculate hash for a file using streaming to avoid loading entire file into memory
    pub async fn calculate_file(
        &self,
        file_path: &Path,
        algorithm: HashAlgorithm,
    ) -> Result<HashResult> {
        self.calculate_files(&[file_path.to_path_buf()], algorithm)
            .await
    }

    /// Calculate one hash over the concatenated contents of `file_paths`
    ///
    /// Files are opened one at a time, in order. The first failure aborts
    /// the computation and no digest is produced.
    pub async fn calculate_files(
        &self,
        file_paths: &[PathBuf],
        algorithm: HashAlgorithm,
    ) -> Result<HashResult> {
        if file_paths.is_empty() {
            return Err(ValidationError::EmptyJob.into());
        }

        let start_time = Instant::now();
        let mut buffer = self.memory_tracker.allocate(self.chunk_size)?;
        let mut context = DigestContext::new(algorithm);
        let mut input_size = 0;

        for path in file_paths {
            log::debug!("Hashing {} with {}", path.display(), algorithm);
            let mut source = FileSource::open(path).await?;
            input_size += hash_reader(&mut context, &mut source, &mut buffer).await?;
        }

        let result = HashResult {
            algorithm,
            digest: context.finalize(),
            input_size,
            duration: start_time.elapsed(),
        };
        log::debug!(
            "{} of {} file(s): {} bytes in {:?}",
            algorithm.display_name(),
            file_paths.len(),
            result.input_size,
            result.duration
        );
        Ok(result)
    }

    /// Check if an algorithm is supported
    pub fn supports_algorithm(&self, algorithm: HashAlgorithm) -> bool {
        AlgorithmRegistry::all()
            .iter()
            .any(|descriptor| descriptor.algorithm() == algorithm)
    }
}

impl Default for HashCalculator {
    fn default() -> Self {
        Self::new()
    }
}
