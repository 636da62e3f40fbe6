//! Criterion benchmarks for the merge and decode hot paths.
//!
//! Run with: cargo bench --bench merge_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hitspool_core::record::{decode_all, encode_record, RecordHeader};
use hitspool_core::stream::{MergeStream, VecSource};

const HITS_PER_SOURCE: u64 = 10_000;

/// Interleaved sources: source `i` holds timestamps `i, i + n, i + 2n, ...`.
fn interleaved_sources(n: u64) -> Vec<VecSource> {
    (0..n)
        .map(|i| {
            let ts: Vec<u64> = (0..HITS_PER_SOURCE).map(|k| i + k * n).collect();
            VecSource::from_timestamps(&format!("{:02}-01", i + 1), &ts)
        })
        .collect()
}

fn merge_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for hubs in [1u64, 8, 86] {
        group.throughput(Throughput::Elements(hubs * HITS_PER_SOURCE));
        group.bench_with_input(BenchmarkId::new("hubs", hubs), &hubs, |b, &hubs| {
            b.iter_batched(
                || interleaved_sources(hubs),
                |sources| {
                    let mut merge = MergeStream::open(sources).unwrap();
                    let mut count = 0u64;
                    while let Some(hit) = merge.next_hit().unwrap() {
                        black_box(hit.timestamp());
                        count += 1;
                    }
                    count
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

fn decode_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let trailer = vec![0u8; 200];
    let mut wire = Vec::new();
    for ts in 0..HITS_PER_SOURCE {
        let header = RecordHeader {
            record_length: (RecordHeader::LEN + trailer.len()) as i32,
            word0: 0x4005_c020,
            word1: 0x8120_4c1e,
            ..RecordHeader::test_header(0x0000_1111_aaaa, ts)
        };
        wire.extend_from_slice(&encode_record(&header, &trailer).unwrap());
    }

    group.throughput(Throughput::Bytes(wire.len() as u64));
    group.bench_function("decode_all", |b| {
        b.iter(|| decode_all(black_box(&wire)).unwrap().len());
    });

    group.finish();
}

criterion_group!(benches, merge_throughput, decode_throughput);
criterion_main!(benches);
