//! Core traits for the hash algorithm extensibility system

use super::block_buffer::BLOCK_SIZE;
use super::{Digest, DigestContext, HashAlgorithm};

/// Byte order of the 64-bit bit-length field written during padding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthEncoding {
    LittleEndian,
    BigEndian,
}

impl LengthEncoding {
    /// Encode a bit count in this byte order
    pub fn encode(self, bit_count: u64) -> [u8; 8] {
        match self {
            Self::LittleEndian => bit_count.to_le_bytes(),
            Self::BigEndian => bit_count.to_be_bytes(),
        }
    }
}

/// A Merkle-Damgard compression function over 64-byte blocks
///
/// Implementations are pure: no I/O, no allocation, no shared state.
pub trait BlockTransform {
    /// Running hash accumulator carried between blocks
    type State: Copy + Send + Sync + 'static;

    /// State words loaded at Init
    const INITIAL_STATE: Self::State;

    /// How the message length is stored in the last block
    const LENGTH_ENCODING: LengthEncoding;

    /// Number of digest bytes produced by `write_digest`
    const DIGEST_SIZE: usize;

    /// Fold one block into the state
    fn transform(state: &mut Self::State, block: &[u8; BLOCK_SIZE]);

    /// Serialize the state words; `out` is exactly `DIGEST_SIZE` bytes
    fn write_digest(state: &Self::State, out: &mut [u8]);
}

/// Descriptor trait that every supported algorithm implements
///
/// Descriptors are stateless process-wide constants and may be shared
/// freely between concurrent jobs.
pub trait HashAlgorithmImpl: Send + Sync {
    /// Tag for this algorithm
    fn algorithm(&self) -> HashAlgorithm;

    /// Lowercase identifier accepted on the command line
    fn id(&self) -> &'static str;

    /// Display name used in output lines
    fn name(&self) -> &'static str;

    /// Digest length in bytes
    fn digest_size(&self) -> usize;

    /// In-memory size of the running context
    fn context_size(&self) -> usize;

    /// Input block length in bytes
    fn block_size(&self) -> usize {
        BLOCK_SIZE
    }

    /// Create an initialized context for this algorithm
    fn init(&self) -> DigestContext;

    /// Hash in-memory data in one call
    fn hash_bytes(&self, data: &[u8]) -> Digest {
        let mut context = self.init();
        context.update(data);
        context.finalize()
    }
}
