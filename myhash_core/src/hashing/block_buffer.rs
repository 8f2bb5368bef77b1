//! Fixed-size block buffering and message padding
//!
//! `BlockBuffer` turns an arbitrarily chunked byte stream into whole
//! 64-byte blocks and produces the final padded block(s). It is shared by
//! every algorithm; the caller supplies the compression function.

use super::traits::LengthEncoding;

/// Input block length shared by MD5 and SHA-256
pub const BLOCK_SIZE: usize = 64;

/// Offset of the 64-bit length field inside the final block
const LENGTH_OFFSET: usize = BLOCK_SIZE - 8;

/// Padding marker: a single set bit followed by zeros
const PADDING_MARKER: u8 = 0x80;

/// Partial block plus the running message length
#[derive(Clone)]
pub struct BlockBuffer {
    buffer: [u8; BLOCK_SIZE],
    /// Number of valid bytes at the front of `buffer`, always < BLOCK_SIZE
    len: usize,
    /// Total message length in bits, modulo 2^64
    bit_count: u64,
}

impl Default for BlockBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BlockBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockBuffer")
            .field("buffered", &self.len)
            .field("bit_count", &self.bit_count)
            .finish()
    }
}

impl BlockBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            buffer: [0; BLOCK_SIZE],
            len: 0,
            bit_count: 0,
        }
    }

    /// Forget all buffered input and the message length
    pub fn reset(&mut self) {
        self.len = 0;
        self.bit_count = 0;
    }

    /// Total bits consumed so far
    pub fn bit_count(&self) -> u64 {
        self.bit_count
    }

    /// Bytes waiting for the next block
    pub fn buffered(&self) -> &[u8] {
        &self.buffer[..self.len]
    }

    /// Append `data`, calling `compress` once per completed block
    pub fn update(&mut self, mut data: &[u8], mut compress: impl FnMut(&[u8; BLOCK_SIZE])) {
        self.bit_count = self
            .bit_count
            .wrapping_add((data.len() as u64).wrapping_mul(8));

        if self.len > 0 {
            let room = BLOCK_SIZE - self.len;
            if data.len() < room {
                self.buffer[self.len..self.len + data.len()].copy_from_slice(data);
                self.len += data.len();
                return;
            }

            let (head, rest) = data.split_at(room);
            self.buffer[self.len..].copy_from_slice(head);
            compress(&self.buffer);
            self.len = 0;
            data = rest;
        }

        // Whole blocks go straight from the input without a copy
        let (blocks, tail) = data.as_chunks::<BLOCK_SIZE>();
        for block in blocks {
            compress(block);
        }

        self.buffer[..tail.len()].copy_from_slice(tail);
        self.len = tail.len();
        debug_assert_eq!(self.len as u64, (self.bit_count / 8) % BLOCK_SIZE as u64);
    }

    /// Pad the message and compress the final block(s)
    ///
    /// Writes the marker byte, zero fill and the bit length in
    /// `encoding` order. One extra block is compressed when fewer than
    /// eight bytes remain after the marker.
    pub fn finalize(
        mut self,
        encoding: LengthEncoding,
        mut compress: impl FnMut(&[u8; BLOCK_SIZE]),
    ) {
        let length = encoding.encode(self.bit_count);

        let mut index = self.len;
        self.buffer[index] = PADDING_MARKER;
        index += 1;

        if index > LENGTH_OFFSET {
            self.buffer[index..].fill(0);
            compress(&self.buffer);
            index = 0;
        }

        self.buffer[index..LENGTH_OFFSET].fill(0);
        self.buffer[LENGTH_OFFSET..].copy_from_slice(&length);
        compress(&self.buffer);
    }
}
