//! Known-answer vectors (RFC 1321, FIPS 180-4)

use myhash_core::HashAlgorithm;

/// Input and expected lowercase hex digest
#[derive(Debug, Clone, Copy)]
pub struct KnownVector {
    pub algorithm: HashAlgorithm,
    pub input: &'static [u8],
    pub hex: &'static str,
}

/// Input lengths around the padding and block boundaries
pub const BOUNDARY_LENGTHS: [usize; 7] = [55, 56, 63, 64, 65, 119, 120];

pub const KNOWN_VECTORS: &[KnownVector] = &[
    KnownVector {
        algorithm: HashAlgorithm::MD5,
        input: b"",
        hex: "d41d8cd98f00b204e9800998ecf8427e",
    },
    KnownVector {
        algorithm: HashAlgorithm::MD5,
        input: b"abc",
        hex: "900150983cd24fb0d6963f7d28e17f72",
    },
    KnownVector {
        algorithm: HashAlgorithm::MD5,
        input: b"message digest",
        hex: "f96b697d7cb7938d525a2f31aaf161d0",
    },
    KnownVector {
        algorithm: HashAlgorithm::MD5,
        input: b"The quick brown fox jumps over the lazy dog",
        hex: "9e107d9d372bb6826bd81d3542a419d6",
    },
    KnownVector {
        algorithm: HashAlgorithm::SHA256,
        input: b"",
        hex: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    },
    KnownVector {
        algorithm: HashAlgorithm::SHA256,
        input: b"abc",
        hex: "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
    },
    KnownVector {
        algorithm: HashAlgorithm::SHA256,
        input: b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq",
        hex: "248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1",
    },
    KnownVector {
        algorithm: HashAlgorithm::SHA256,
        input: b"The quick brown fox jumps over the lazy dog",
        hex: "d7a8fbb307d7809469ca9abcb0082e4f8d5651e46d3cdb762d02d0bf37c9e592",
    },
];
