//! Performance benchmarks for the digest engine
//!
//! Measures raw block throughput per algorithm, the cost of feeding the
//! same bytes in small chunks, and end-to-end file hashing.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use myhash_core::hashing::{HashAlgorithm, HashCalculator};
use myhash_core::{DigestContext, HashConfig, HashJob, JobRunner, OutputSink};
use std::hint::black_box;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::runtime::Runtime;

/// Benchmark both algorithms with different input sizes
fn benchmark_hash_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_algorithms");
    let calculator = HashCalculator::new();

    let sizes = vec![
        64,        // one block
        1_024,     // 1KB
        102_400,   // 100KB
        1_048_576, // 1MB
    ];

    for size in sizes {
        let data = generate_test_data(size);
        group.throughput(Throughput::Bytes(size as u64));

        for algorithm in HashAlgorithm::all() {
            group.bench_with_input(
                BenchmarkId::new(algorithm.to_string(), format_size(size)),
                &data,
                |b, data| {
                    b.iter(|| {
                        let result = calculator
                            .calculate_bytes(*algorithm, black_box(data))
                            .unwrap();
                        black_box(result.digest);
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the buffering path with chunk sizes that straddle blocks
fn benchmark_update_chunking(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_chunking");
    let data = generate_test_data(1_048_576);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for chunk_size in [7usize, 63, 64, 4096] {
        for algorithm in HashAlgorithm::all() {
            group.bench_with_input(
                BenchmarkId::new(algorithm.to_string(), chunk_size),
                &data,
                |b, data| {
                    b.iter(|| {
                        let mut context = DigestContext::new(*algorithm);
                        for chunk in data.chunks(chunk_size) {
                            context.update(black_box(chunk));
                        }
                        black_box(context.finalize());
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark streaming a file from disk
fn benchmark_file_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_hashing");
    let rt = Runtime::new().unwrap();
    let temp_dir = TempDir::new().unwrap();
    let calculator = HashCalculator::new();

    for size in [102_400usize, 10_485_760] {
        let file_path = temp_dir.path().join(format!("bench_{size}.bin"));
        std::fs::write(&file_path, generate_test_data(size)).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        for algorithm in HashAlgorithm::all() {
            group.bench_with_input(
                BenchmarkId::new(algorithm.to_string(), format_size(size)),
                &file_path,
                |b, path| {
                    b.iter(|| {
                        rt.block_on(async {
                            let result = calculator
                                .calculate_file(black_box(path), *algorithm)
                                .await
                                .unwrap();
                            black_box(result);
                        });
                    })
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the job runner over many small files
fn benchmark_job_runner(c: &mut Criterion) {
    let mut group = c.benchmark_group("job_runner");
    let rt = Runtime::new().unwrap();
    let temp_dir = TempDir::new().unwrap();

    let files: Vec<_> = (0..64)
        .map(|i| {
            let path = temp_dir.path().join(format!("job_{i}.bin"));
            std::fs::write(&path, generate_test_data(16_384)).unwrap();
            path
        })
        .collect();
    group.throughput(Throughput::Bytes(64 * 16_384));

    for limit in [Some(1), Some(4), None] {
        let runner = JobRunner::new(HashConfig {
            max_concurrent_jobs: limit,
            ..HashConfig::default()
        })
        .unwrap();

        group.bench_function(BenchmarkId::new("separate_sha256", format!("{limit:?}")), |b| {
            b.iter(|| {
                rt.block_on(async {
                    let sink = Arc::new(OutputSink::new(
                        Box::new(std::io::sink()),
                        Box::new(std::io::sink()),
                        Box::new(DiscardFormatter),
                    ));
                    let jobs = HashJob::separate(HashAlgorithm::SHA256, files.clone()).unwrap();
                    black_box(runner.run(jobs, sink).await.unwrap());
                });
            })
        });
    }

    group.finish();
}

struct DiscardFormatter;

impl myhash_core::jobs::OutcomeFormatter for DiscardFormatter {
    fn format_success(&self, _job: &HashJob, _result: &myhash_core::HashResult) -> String {
        String::new()
    }

    fn format_failure(&self, _job: &HashJob, _error: &myhash_core::Error) -> String {
        String::new()
    }
}

// Helper functions

fn generate_test_data(size: usize) -> Vec<u8> {
    // Generate deterministic test data for reproducible benchmarks
    let mut data = Vec::with_capacity(size);
    let mut seed = 0x12345678u32;

    for _ in 0..size {
        data.push((seed & 0xFF) as u8);
        seed = seed.wrapping_mul(1664525).wrapping_add(1013904223);
    }

    data
}

fn format_size(size: usize) -> String {
    if size >= 1_048_576 {
        format!("{}MB", size / 1_048_576)
    } else if size >= 1_024 {
        format!("{}KB", size / 1_024)
    } else {
        format!("{size}B")
    }
}

criterion_group!(
    benches,
    benchmark_hash_algorithms,
    benchmark_update_chunking,
    benchmark_file_hashing,
    benchmark_job_runner
);

criterion_main!(benches);
