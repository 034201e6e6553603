//! # Hash Function Benchmarks
//!
//! Raw FNV-1a and MurmurHash3 throughput over key lengths typical of k-mers
//! and short reads, plus full index derivation for one key.

use biobloom_filter::domain::{compute_hash_positions, fnv_hash32, murmur3_32};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use rand::Rng;

fn random_key(len: usize) -> Vec<u8> {
    const BASES: &[u8] = b"ACGT";
    let mut rng = rand::thread_rng();
    (0..len).map(|_| BASES[rng.gen_range(0..4)]).collect()
}

pub fn bench_hash_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash-functions");

    for len in [21, 31, 100, 1_000] {
        let key = random_key(len);
        group.throughput(Throughput::Bytes(len as u64));

        group.bench_with_input(BenchmarkId::new("fnv1a_32", len), &key, |b, key| {
            b.iter(|| black_box(fnv_hash32(black_box(key))))
        });
        group.bench_with_input(BenchmarkId::new("murmur3_32", len), &key, |b, key| {
            b.iter(|| black_box(murmur3_32(black_box(key))))
        });
    }

    group.finish();
}

pub fn bench_index_derivation(c: &mut Criterion) {
    let mut group = c.benchmark_group("index-derivation");
    let key = random_key(31);

    for k in [4, 7, 10, 14] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| black_box(compute_hash_positions(&key, k, 5_532)))
        });
    }

    group.finish();
}
