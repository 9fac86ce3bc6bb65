//! Benchmarks for BitBuffer construction and BitCursor reads
//!
//! This benchmark suite evaluates:
//! - Bit-at-a-time and multi-bit appends
//! - Fixed-width reads through BitCursor
//! - Symbol chunking used by the codecs

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxipack_core::BitBuffer;
use std::hint::black_box;

/// Standard data sizes for benchmarking
mod data_sizes {
    pub const SMALL: usize = 256; // 256 B
    pub const MEDIUM: usize = 4 * 1024; // 4 KB
    pub const LARGE: usize = 64 * 1024; // 64 KB
}

fn text_like(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. ";
    text.iter().copied().cycle().take(size).collect()
}

/// Benchmark appending 5-bit fields
fn bench_push_bits(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_bits");

    for (size_name, size) in [
        ("256B", data_sizes::SMALL),
        ("4KB", data_sizes::MEDIUM),
        ("64KB", data_sizes::LARGE),
    ] {
        let data = text_like(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size_name), &data, |b, data| {
            b.iter(|| {
                let mut bits = BitBuffer::with_capacity(data.len() * 5);
                for &byte in data.iter() {
                    bits.push_bits(byte as u64, 5);
                }
                black_box(bits);
            });
        });
    }

    group.finish();
}

/// Benchmark reading fixed-width fields back
fn bench_cursor_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("cursor_reads");

    for width in [1u32, 8, 17] {
        let bits = BitBuffer::from_bytes(&text_like(data_sizes::LARGE));

        group.throughput(Throughput::Bytes(data_sizes::LARGE as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &bits, |b, bits| {
            b.iter(|| {
                let mut cursor = bits.cursor();
                let mut sum = 0u64;
                while cursor.remaining() >= width as usize {
                    sum = sum.wrapping_add(cursor.read_bits(width).unwrap());
                }
                black_box(sum);
            });
        });
    }

    group.finish();
}

/// Benchmark symbol chunking
fn bench_chunks(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunks");
    let bits = BitBuffer::from_bytes(&text_like(data_sizes::LARGE));

    for width in [1u32, 8, 12] {
        group.throughput(Throughput::Bytes(data_sizes::LARGE as u64));
        group.bench_with_input(BenchmarkId::from_parameter(width), &bits, |b, bits| {
            b.iter(|| black_box(bits.chunks(width).count()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_push_bits, bench_cursor_reads, bench_chunks);
criterion_main!(benches);
