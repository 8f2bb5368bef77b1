//! Per-stream digest state: Init / Update / Finalize
//!
//! `BlockContext<T>` pairs the state words of one algorithm with a
//! `BlockBuffer`. `DigestContext` is the closed set of supported contexts,
//! sized per variant, which callers select at runtime.

use super::HashAlgorithm;
use super::algorithms::{Md5, Sha256};
use super::block_buffer::BlockBuffer;
use super::traits::BlockTransform;
use crate::{Result, error::ValidationError};
use serde::{Serialize, Serializer};

/// Largest digest produced by any supported algorithm
pub const MAX_DIGEST_SIZE: usize = 32;

/// Streaming state for a single algorithm
pub struct BlockContext<T: BlockTransform> {
    state: T::State,
    buffer: BlockBuffer,
}

impl<T: BlockTransform> BlockContext<T> {
    /// Create a context that is ready for `update`
    pub fn new() -> Self {
        Self {
            state: T::INITIAL_STATE,
            buffer: BlockBuffer::new(),
        }
    }

    /// Reload the initial state words and drop any buffered input
    pub fn init(&mut self) {
        self.state = T::INITIAL_STATE;
        self.buffer.reset();
    }

    /// Feed the next bytes of the stream
    pub fn update(&mut self, data: &[u8]) {
        let state = &mut self.state;
        self.buffer.update(data, |block| T::transform(state, block));
    }

    /// Total bits consumed so far
    pub fn bit_count(&self) -> u64 {
        self.buffer.bit_count()
    }

    /// Pad, compress the final block(s) and serialize the state into `out`
    ///
    /// `out` must be exactly `T::DIGEST_SIZE` bytes long.
    pub fn finalize_into(self, out: &mut [u8]) {
        let Self { mut state, buffer } = self;
        buffer.finalize(T::LENGTH_ENCODING, |block| T::transform(&mut state, block));
        T::write_digest(&state, out);
    }
}

impl<T: BlockTransform> Default for BlockContext<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BlockTransform> Clone for BlockContext<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state,
            buffer: self.buffer.clone(),
        }
    }
}

impl<T: BlockTransform> std::fmt::Debug for BlockContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockContext")
            .field("buffer", &self.buffer)
            .finish_non_exhaustive()
    }
}

/// Running digest computation for one of the supported algorithms
///
/// A context is owned by a single job from creation to `finalize`, which
/// consumes it. Cloning forks the computation.
#[derive(Clone, Debug)]
pub enum DigestContext {
    Md5(BlockContext<Md5>),
    Sha256(BlockContext<Sha256>),
}

impl DigestContext {
    /// Create an initialized context for `algorithm`
    pub fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::MD5 => Self::Md5(BlockContext::new()),
            HashAlgorithm::SHA256 => Self::Sha256(BlockContext::new()),
        }
    }

    /// Algorithm computed by this context
    pub fn algorithm(&self) -> HashAlgorithm {
        match self {
            Self::Md5(_) => HashAlgorithm::MD5,
            Self::Sha256(_) => HashAlgorithm::SHA256,
        }
    }

    /// Restart the computation from the initial state
    pub fn init(&mut self) {
        match self {
            Self::Md5(context) => context.init(),
            Self::Sha256(context) => context.init(),
        }
    }

    /// Append `data` to the stream
    ///
    /// Any chunking of the same byte sequence yields the same digest.
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(context) => context.update(data),
            Self::Sha256(context) => context.update(data),
        }
    }

    /// Number of input bytes consumed so far
    pub fn bytes_processed(&self) -> u64 {
        let bits = match self {
            Self::Md5(context) => context.bit_count(),
            Self::Sha256(context) => context.bit_count(),
        };
        bits / 8
    }

    /// Finish the computation and return the digest
    pub fn finalize(self) -> Digest {
        let algorithm = self.algorithm();
        let len = algorithm.digest_size();
        let mut bytes = [0u8; MAX_DIGEST_SIZE];
        self.write_digest(&mut bytes[..len]);

        Digest {
            algorithm,
            bytes,
            len,
        }
    }

    /// Finish the computation into a caller-provided buffer
    ///
    /// The buffer length must equal the algorithm's digest size.
    pub fn finalize_into(self, out: &mut [u8]) -> Result<()> {
        let algorithm = self.algorithm();
        if out.len() != algorithm.digest_size() {
            return Err(ValidationError::digest_length(
                algorithm.display_name(),
                algorithm.digest_size(),
                out.len(),
            )
            .into());
        }

        self.write_digest(out);
        Ok(())
    }

    fn write_digest(self, out: &mut [u8]) {
        match self {
            Self::Md5(context) => context.finalize_into(out),
            Self::Sha256(context) => context.finalize_into(out),
        }
    }
}

/// Fixed-length digest bytes tagged with the algorithm that produced them
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest {
    algorithm: HashAlgorithm,
    bytes: [u8; MAX_DIGEST_SIZE],
    len: usize,
}

impl Digest {
    /// Algorithm that produced this digest
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Digest bytes in output order
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Digest length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the digest holds no bytes
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Lowercase hexadecimal rendering, most significant nibble first
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest({}:{})", self.algorithm, self.to_hex())
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}
