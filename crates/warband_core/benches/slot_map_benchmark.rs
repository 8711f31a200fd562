//! # Slot Map Performance Benchmark
//!
//! ARCHITECT'S REQUIREMENTS:
//! - O(1) get/set/remove regardless of key-space size
//! - Growth rebuilds must stay off the per-key cost
//!
//! Run with: `cargo bench --package warband_core`

// Benchmarks don't need docs and may have intentionally unused code
#![allow(missing_docs)]
#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use warband_core::SlotMap;

/// Key space used by the steady-state benchmarks.
const KEY_RANGE: u32 = 100_000;

/// Benchmark: insert entries at increasing live densities.
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("slot_map_insert");

    for count in [100u32, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut map: SlotMap<u64> = SlotMap::new(KEY_RANGE);
                for key in 0..count {
                    map.set(key, u64::from(key) + 1);
                }
                black_box(map.len())
            });
        });
    }

    group.finish();
}

/// Benchmark: random-ish reads against a half-full map.
fn bench_get(c: &mut Criterion) {
    let mut map: SlotMap<u64> = SlotMap::new(KEY_RANGE);
    for key in (0..KEY_RANGE).step_by(2) {
        map.set(key, u64::from(key) + 1);
    }

    // stride through the key space so the lookup table is not walked
    // in cache-friendly order
    let keys: Vec<u32> = (0..10_000u32).map(|i| (i * 7919) % KEY_RANGE).collect();

    c.bench_function("slot_map_get_10K_strided", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for &key in &keys {
                sum = sum.wrapping_add(map.get(key));
            }
            black_box(sum)
        });
    });
}

/// Benchmark: remove/re-insert churn, the swap-compaction hot path.
fn bench_churn(c: &mut Criterion) {
    c.bench_function("slot_map_churn_10K", |b| {
        let mut map: SlotMap<u64> = SlotMap::new(KEY_RANGE);
        for key in 0..10_000u32 {
            map.set(key, u64::from(key) + 1);
        }
        b.iter(|| {
            for key in 0..10_000u32 {
                map.remove(key);
                map.set(key, u64::from(key) + 2);
            }
            black_box(map.len())
        });
    });
}

/// Benchmark: bulk setter vs the same work key-by-key.
fn bench_bulk_set(c: &mut Criterion) {
    let keys: Vec<u32> = (0..50_000u32).collect();
    let values: Vec<u64> = (0..50_000u64).map(|v| v + 1).collect();

    let mut group = c.benchmark_group("slot_map_bulk");

    group.bench_function("set_many_50K", |b| {
        b.iter(|| {
            let mut map: SlotMap<u64> = SlotMap::new(KEY_RANGE);
            map.set_many(&keys, &values);
            black_box(map.len())
        });
    });

    group.bench_function("set_loop_50K", |b| {
        b.iter(|| {
            let mut map: SlotMap<u64> = SlotMap::new(KEY_RANGE);
            for (&key, &value) in keys.iter().zip(values.iter()) {
                map.set(key, value);
            }
            black_box(map.len())
        });
    });

    group.finish();
}

/// Benchmark: growth from the 8-bit width to 16 bits mid-fill.
fn bench_upsize_growth(c: &mut Criterion) {
    c.bench_function("slot_map_grow_to_40K", |b| {
        b.iter(|| {
            let mut map: SlotMap<u64> = SlotMap::new(KEY_RANGE);
            for key in 0..40_000u32 {
                map.set(key, u64::from(key) + 1);
            }
            black_box(map.len())
        });
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_get,
    bench_churn,
    bench_bulk_set,
    bench_upsize_growth,
);

criterion_main!(benches);
