// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shapemap contributors
//!
//! Benchmark: registry and compiled-cache lookups
//!
//! Lookup cost with a populated registry, and contention when several
//! threads hit the same handler.

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::unwrap_used)] // bench scaffolding

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shapemap::types::{PrimitiveKind, TypeDescriptorBuilder};
use shapemap::{MapHandler, TypeHandle};

/// `count` distinct struct types with the same single field.
fn struct_types(count: usize) -> Vec<TypeHandle> {
    (0..count)
        .map(|i| {
            TypeDescriptorBuilder::new(format!("Type{i}"))
                .qualified_name(format!("bench::Type{i}"))
                .field("value", PrimitiveKind::I64)
                .build_handle()
        })
        .collect()
}

/// Handler with a mapper registered for every consecutive pair.
fn warmed(types: &[TypeHandle]) -> MapHandler {
    let handler = MapHandler::new();
    for pair in types.windows(2) {
        handler.mapper_for(&pair[0], &pair[1]).unwrap();
    }
    handler
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry_lookup");

    for size in [16usize, 256, 4096] {
        let types = struct_types(size);
        let handler = warmed(&types);
        let (src, tgt) = (&types[size / 2], &types[size / 2 + 1]);

        group.bench_with_input(BenchmarkId::new("hit", size), &size, |b, _| {
            b.iter(|| black_box(handler.registry().try_get(src, tgt)))
        });
        group.bench_with_input(BenchmarkId::new("miss", size), &size, |b, _| {
            b.iter(|| black_box(handler.registry().try_get(tgt, src)))
        });
    }
    group.finish();
}

fn bench_compiled_cache(c: &mut Criterion) {
    let types = struct_types(2);
    let handler = warmed(&types);
    let factory = handler.factory();

    c.bench_function("compiled_cache_hit", |b| {
        b.iter(|| black_box(factory.create_mapper(&types[0], &types[1])))
    });
}

fn bench_contended(c: &mut Criterion) {
    let types = struct_types(2);
    let handler = warmed(&types);
    let mut group = c.benchmark_group("contended_lookup");

    for threads in [1usize, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            b.iter(|| {
                crossbeam::scope(|s| {
                    for _ in 0..threads {
                        s.spawn(|_| {
                            for _ in 0..256 {
                                black_box(handler.registry().try_get(&types[0], &types[1]));
                            }
                        });
                    }
                })
                .unwrap();
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lookup, bench_compiled_cache, bench_contended);
criterion_main!(benches);
