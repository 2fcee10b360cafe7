//! Fletcher-4 benchmarks.
//!
//! Run: `cargo bench -p checksum -- fletcher4`
//! Native: `RUSTFLAGS='-C target-cpu=native' cargo bench -p checksum -- fletcher4`
//!
//! This benchmarks:
//! - The hashers (auto-selected kernel, scalar below the threshold)
//! - Every lane kernel directly through its operations record
//! - The scalar reference

use checksum::{Checksum, Fletcher4, Fletcher4Byteswap, Fletcher4Lanes, fletcher4};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Standard benchmark sizes (multiples of the 16-byte block).
const SIZES: [usize; 7] = [64, 256, 1024, 4096, 16384, 65536, 1048576];

fn gen_bytes(len: usize) -> Vec<u8> {
  (0..len).map(|i| (i as u8).wrapping_mul(167).wrapping_add(13)).collect()
}

fn bench_hashers(c: &mut Criterion) {
  let mut group = c.benchmark_group("fletcher4/hasher");
  eprintln!("fletcher4 backend: {}", fletcher4::selected_backend());

  for size in SIZES {
    let data = gen_bytes(size);
    group.throughput(Throughput::Bytes(size as u64));

    group.bench_with_input(BenchmarkId::new("native", size), &data, |b, data| {
      b.iter(|| core::hint::black_box(Fletcher4::checksum(data)));
    });
    group.bench_with_input(BenchmarkId::new("byteswap", size), &data, |b, data| {
      b.iter(|| core::hint::black_box(Fletcher4Byteswap::checksum(data)));
    });
  }

  group.finish();
}

/// Benchmark each lane kernel directly (bypasses the threshold).
fn bench_kernels(c: &mut Criterion) {
  for ops in fletcher4::ops::all() {
    if !(ops.valid)() {
      eprintln!("skipping {}: not supported on this CPU", ops.name);
      continue;
    }
    let mut group = c.benchmark_group(format!("fletcher4/{}", ops.name));

    for size in SIZES {
      let data = gen_bytes(size);
      let (blocks, _) = data.as_chunks::<16>();
      group.throughput(Throughput::Bytes(size as u64));

      group.bench_with_input(BenchmarkId::new("native", size), blocks, |b, blocks| {
        b.iter(|| {
          let mut lanes = Fletcher4Lanes::new();
          (ops.compute_native)(&mut lanes, blocks);
          core::hint::black_box((ops.fini)(&lanes))
        });
      });
      group.bench_with_input(BenchmarkId::new("byteswap", size), blocks, |b, blocks| {
        b.iter(|| {
          let mut lanes = Fletcher4Lanes::new();
          (ops.compute_byteswap)(&mut lanes, blocks);
          core::hint::black_box((ops.fini)(&lanes))
        });
      });
    }

    group.finish();
  }
}

fn bench_reference(c: &mut Criterion) {
  let mut group = c.benchmark_group("fletcher4/reference");

  for size in [64, 1024, 16384] {
    let data = gen_bytes(size);
    group.throughput(Throughput::Bytes(size as u64));
    group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
      b.iter(|| core::hint::black_box(fletcher4::reference::fletcher4_native(data)));
    });
  }

  group.finish();
}

criterion_group!(benches, bench_hashers, bench_kernels, bench_reference);
criterion_main!(benches);
