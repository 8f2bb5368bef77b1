//! Known-answer and block boundary tests
//!
//! Digests are checked against published vectors and, for the boundary
//! lengths, against the `md-5` and `sha2` crates.

use md5::Digest as _;
use myhash_core::hashing::{AlgorithmRegistry, HashAlgorithm};
use myhash_core::{DigestContext, HashCalculator};
use myhash_test_utils::{BOUNDARY_LENGTHS, KNOWN_VECTORS, deterministic_bytes};

fn reference_hex(algorithm: HashAlgorithm, data: &[u8]) -> String {
    match algorithm {
        HashAlgorithm::MD5 => hex::encode(md5::Md5::digest(data)),
        HashAlgorithm::SHA256 => hex::encode(sha2::Sha256::digest(data)),
    }
}

#[test]
fn test_published_vectors() {
    let calculator = HashCalculator::new();

    for vector in KNOWN_VECTORS {
        let result = calculator
            .calculate_bytes(vector.algorithm, vector.input)
            .unwrap();
        assert_eq!(
            result.hash(),
            vector.hex,
            "{} of {:?}",
            vector.algorithm,
            String::from_utf8_lossy(vector.input)
        );
    }
}

#[test]
fn test_block_boundary_lengths() {
    for algorithm in HashAlgorithm::all() {
        for len in BOUNDARY_LENGTHS {
            let data = deterministic_bytes(len, len as u64);
            let digest = algorithm.descriptor().hash_bytes(&data);

            assert_eq!(
                digest.to_hex(),
                reference_hex(*algorithm, &data),
                "{algorithm} at {len} bytes"
            );
        }
    }
}

#[test]
fn test_boundary_lengths_split_at_every_offset() {
    // Every split point exercises the top-up path with a different fill level
    for algorithm in HashAlgorithm::all() {
        for len in BOUNDARY_LENGTHS {
            let data = deterministic_bytes(len, 99);
            let expected = reference_hex(*algorithm, &data);

            for split in 0..=len {
                let mut context = DigestContext::new(*algorithm);
                context.update(&data[..split]);
                context.update(&data[split..]);
                assert_eq!(
                    context.finalize().to_hex(),
                    expected,
                    "{algorithm} at {len} bytes split at {split}"
                );
            }
        }
    }
}

#[test]
fn test_byte_at_a_time_matches_reference() {
    let data = deterministic_bytes(1000, 3);

    for algorithm in HashAlgorithm::all() {
        let mut context = DigestContext::new(*algorithm);
        for byte in &data {
            context.update(std::slice::from_ref(byte));
        }
        assert_eq!(context.finalize().to_hex(), reference_hex(*algorithm, &data));
    }
}

#[test]
fn test_md5_million_a() {
    let mut context = DigestContext::new(HashAlgorithm::MD5);
    for _ in 0..10_000 {
        context.update(&[b'a'; 100]);
    }

    assert_eq!(
        context.finalize().to_hex(),
        "7707d6ae4e027c70eea2a935c2296f21"
    );
}

#[test]
fn test_length_field_endianness() {
    // Same 3-byte input, same block layout, length written in opposite byte order
    let md5 = AlgorithmRegistry::find("md5").unwrap().hash_bytes(b"xyz");
    let sha256 = AlgorithmRegistry::find("sha256")
        .unwrap()
        .hash_bytes(b"xyz");

    assert_eq!(md5.to_hex(), reference_hex(HashAlgorithm::MD5, b"xyz"));
    assert_eq!(sha256.to_hex(), reference_hex(HashAlgorithm::SHA256, b"xyz"));
}

#[test]
fn test_descriptor_sizes() {
    for descriptor in AlgorithmRegistry::all() {
        let digest = descriptor.hash_bytes(b"");
        assert_eq!(digest.len(), descriptor.digest_size());
        assert!(descriptor.context_size() > descriptor.digest_size());
    }
}
