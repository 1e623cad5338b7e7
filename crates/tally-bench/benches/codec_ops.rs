//! Criterion micro-benchmarks for record encode/decode and file round-trips.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tally_bench::{sample_buffer, BENCH_LENGTHS};
use tally_codec::{decode_from_slice, encode_to_vec, encoded_len};
use tally_store::{Store, StoreConfig, WriteMode};

/// Benchmark: encode records of each reference length.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_encode");
    for len in BENCH_LENGTHS {
        let buf = sample_buffer(len).unwrap();
        group.throughput(Throughput::Bytes(encoded_len(&buf) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &buf, |b, buf| {
            b.iter(|| {
                let bytes = encode_to_vec(buf).unwrap();
                black_box(bytes);
            });
        });
    }
    group.finish();
}

/// Benchmark: decode the same records from memory.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec_decode");
    for len in BENCH_LENGTHS {
        let bytes = encode_to_vec(&sample_buffer(len).unwrap()).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &bytes, |b, bytes| {
            b.iter(|| {
                let decoded = decode_from_slice(black_box(bytes)).unwrap();
                black_box(decoded);
            });
        });
    }
    group.finish();
}

/// Benchmark: save + load through a temp file, without fsync so the
/// numbers reflect the store rather than the disk.
fn bench_store_roundtrip(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.bin");
    let buf = sample_buffer(4_096).unwrap();

    let mut group = c.benchmark_group("store_roundtrip");
    for mode in [WriteMode::Atomic, WriteMode::Truncate] {
        let store = Store::new(StoreConfig {
            sync: false,
            ..StoreConfig::with_write_mode(mode)
        })
        .unwrap();
        group.bench_function(format!("{mode:?}"), |b| {
            b.iter(|| {
                store.save(&buf, &path).unwrap();
                black_box(store.load(&path).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_store_roundtrip);
criterion_main!(benches);
