//! Criterion micro-benchmarks for arena allocation, recycling, and the
//! full session path (hex in, add, hex out).

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use lanecarry::prelude::*;
use lanecarry_arena::LimbArena;
use lanecarry_bench::{operands, Profile};

/// Benchmark: alloc/release cycles that stay below the watermark until the
/// region fills, then recycle.
fn bench_alloc_release(c: &mut Criterion) {
    let mut arena = LimbArena::initialised(ArenaConfig::new(1 << 20)).unwrap();
    c.bench_function("arena_alloc_release_64", |b| {
        b.iter(|| {
            let h = arena.alloc(black_box(64)).unwrap();
            black_box(arena.release(h).unwrap())
        });
    });
}

/// Benchmark: one forced recycle of a 1 MiB region (zeroing included).
fn bench_recycle(c: &mut Criterion) {
    let mut arena = LimbArena::initialised(ArenaConfig::new(1 << 20)).unwrap();
    let fill = arena.capacity_bytes() / 8 / 2 + 8;
    c.bench_function("arena_recycle_1mib", |b| {
        b.iter(|| {
            let h = arena.alloc(fill).unwrap();
            black_box(arena.release(h).unwrap())
        });
    });
}

/// Benchmark: parse, reconcile, add, format through a session.
fn bench_session_hex_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("session_hex_add");
    let mut session = Session::new().unwrap();
    for bits in [256, 4096, 65536] {
        // Full-width digits: reconcile must not regrow mid-iteration.
        let (a_hex, b_hex) = operands(Profile::Random, bits, 7).hex();
        let digits = bits / 4;
        let (a_hex, b_hex) = (
            format!("{a_hex:0>digits$}"),
            format!("{b_hex:0>digits$}"),
        );
        group.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |b, _| {
            b.iter(|| {
                let mut a = session.parse_hex(&a_hex).unwrap();
                let mut x = session.parse_hex(&b_hex).unwrap();
                session.reconcile_sizes(&mut a, &mut x).unwrap();
                let mut r = session.allocate(a.size()).unwrap();
                session.add(&mut r, &a, &x).unwrap();
                let text = session.format_hex(&r).unwrap();
                for v in [a, x, r] {
                    session.release(v).unwrap();
                }
                black_box(text)
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_alloc_release,
    bench_recycle,
    bench_session_hex_add
);
criterion_main!(benches);
