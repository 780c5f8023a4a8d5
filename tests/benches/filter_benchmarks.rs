//! # Remote Bloom Benchmarks
//!
//! | Path | Target |
//! |------|--------|
//! | fnv1a_32 / murmur3_32 on 8-byte keys | < 20ns |
//! | k = 10 position generation | < 100ns |
//! | add + exists against the in-memory store | < 5us |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::RngCore;
use std::sync::Arc;

use remote_bloom::domain::{compute_positions, fnv1a_32, murmur3_32, HashPair};
use remote_bloom::{InMemoryBitStore, MembershipFilter, RemoteBloomFilter};

fn bench_hashes(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash-functions");

    for len in [8usize, 32, 256] {
        let mut key = vec![0u8; len];
        rand::thread_rng().fill_bytes(&mut key);

        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("fnv1a_32", len), &key, |b, key| {
            b.iter(|| black_box(fnv1a_32(black_box(key))))
        });
        group.bench_with_input(BenchmarkId::new("murmur3_32", len), &key, |b, key| {
            b.iter(|| black_box(murmur3_32(black_box(key), 0)))
        });
    }

    group.finish();
}

fn bench_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("positions");
    let hashes = HashPair::default();
    let key = b"bench_key_0x1234";

    for k in [4u32, 10, 20] {
        group.bench_with_input(BenchmarkId::new("double_hashing", k), &k, |b, &k| {
            b.iter(|| black_box(compute_positions(black_box(key), &hashes, k, 143_776)))
        });
    }

    group.finish();
}

fn bench_filter_operations(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let store = Arc::new(InMemoryBitStore::new());
    let filter = RemoteBloomFilter::new(store, "bench", 100_000, 0.001).expect("valid filter");

    let mut group = c.benchmark_group("filter-in-memory");
    group.bench_function("add", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            runtime
                .block_on(filter.add(&i.to_le_bytes()))
                .expect("add")
        })
    });
    group.bench_function("exists", |b| {
        let mut i = 0u64;
        b.iter(|| {
            i += 1;
            black_box(
                runtime
                    .block_on(filter.exists(&i.to_le_bytes()))
                    .expect("exists"),
            )
        })
    });
    group.finish();
}

criterion_group!(benches, bench_hashes, bench_positions, bench_filter_operations);
criterion_main!(benches);
