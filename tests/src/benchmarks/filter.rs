//! # Filter Benchmarks
//!
//! - Bulk load: sizing plus inserting n keys
//! - Query: present and absent keys against a loaded filter
//! - Scalable chain: query cost as the chain grows

use biobloom_filter::{BloomFilter, ScalableBloomFilter};
use criterion::{black_box, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

fn keys(count: usize, prefix: &str) -> Vec<String> {
    (0..count).map(|i| format!("{}{:08}", prefix, i)).collect()
}

pub fn bench_bulk_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk-load");
    group.measurement_time(Duration::from_secs(10));

    for n in [1_000, 10_000, 100_000] {
        let input = keys(n, "key-");
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("p=0.01", n), &input, |b, input| {
            b.iter(|| {
                let mut filter = BloomFilter::new_with_fpr(input.len(), 0.01)
                    .expect("valid parameters");
                for key in input {
                    filter.add(key.as_bytes());
                }
                black_box(filter.bits_set())
            })
        });
    }

    group.finish();
}

pub fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    let present = keys(100_000, "key-");
    let absent = keys(1_000, "miss-");
    let mut filter = BloomFilter::new_with_fpr(present.len(), 0.01).expect("valid parameters");
    for key in &present {
        filter.add(key.as_bytes());
    }

    group.throughput(Throughput::Elements(1_000));
    group.bench_function("present", |b| {
        b.iter(|| {
            present[..1_000]
                .iter()
                .filter(|k| filter.query(k.as_bytes()))
                .count()
        })
    });
    // Absent keys usually stop at the first clear bit
    group.bench_function("absent", |b| {
        b.iter(|| absent.iter().filter(|k| filter.query(k.as_bytes())).count())
    });

    group.finish();
}

pub fn bench_scalable_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalable-query");

    for filters in [1, 4, 16] {
        let mut chain = ScalableBloomFilter::new(1_000, 0.01).expect("valid parameters");
        for key in keys(filters * 1_000, "key-") {
            chain.add(key.as_bytes()).expect("growth within limits");
        }

        group.bench_with_input(BenchmarkId::from_parameter(filters), &chain, |b, chain| {
            b.iter(|| black_box(chain.query(b"not-in-chain")))
        });
    }

    group.finish();
}
