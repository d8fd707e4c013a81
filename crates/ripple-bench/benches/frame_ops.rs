//! Criterion benchmarks for whole frames: drain, sweep, colorize, package.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use ripple_bench::{reference_profile, seeded_pushes, stress_profile};
use ripple_engine::codec::encode_frame;
use ripple_engine::WaveEngine;

fn bench_reference_frame(c: &mut Criterion) {
    let config = reference_profile();
    let pushes = seeded_pushes(&config, 8, 42);
    let mut engine = WaveEngine::new(config).unwrap();
    c.bench_function("frame_reference_with_pushes", |b| {
        b.iter(|| {
            for &(tile, cell) in &pushes {
                engine.disturb(tile, cell);
            }
            black_box(engine.step())
        });
    });
}

fn bench_stress_frame(c: &mut Criterion) {
    let mut engine = WaveEngine::new(stress_profile()).unwrap();
    let mut group = c.benchmark_group("stress");
    group.sample_size(20);
    group.bench_function("frame", |b| b.iter(|| black_box(engine.step())));
    group.finish();
}

fn bench_frame_encoding(c: &mut Criterion) {
    let mut engine = WaveEngine::new(reference_profile()).unwrap();
    let frame = engine.step();
    c.bench_function("encode_reference_frame", |b| {
        b.iter(|| black_box(encode_frame(black_box(&frame)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_reference_frame,
    bench_stress_frame,
    bench_frame_encoding
);
criterion_main!(benches);
