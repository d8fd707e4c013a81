//! Criterion micro-benchmarks for the propagation sweep and colour mapping.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use ripple_core::TileId;
use ripple_propagator::{ColorMapper, PropagationStep};
use ripple_test_utils::flat_grid;

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    for (tiles, cells) in [(1u32, 128usize), (4, 32), (16, 8)] {
        let mut grid = flat_grid(tiles, tiles, cells, cells);
        let (src, res) = grid.tile_pair_mut(TileId::new(0, 0)).unwrap();
        src.set(0, -1.0);
        res.set(0, 1.0);
        let step = PropagationStep::new(0.99).unwrap();
        let id = format!("{tiles}x{tiles}_tiles_of_{cells}x{cells}");
        group.bench_function(BenchmarkId::from_parameter(id), |b| {
            b.iter(|| {
                let stats = step.sweep(black_box(&mut grid));
                grid.settle();
                black_box(stats)
            });
        });
    }
    group.finish();
}

fn bench_colorize(c: &mut Criterion) {
    let grid = flat_grid(1, 1, 64, 64);
    let mapper = ColorMapper::new(grid.bounds());
    let field = &grid.sources()[0];
    c.bench_function("colorize_64x64", |b| {
        b.iter(|| black_box(mapper.colorize(black_box(field))));
    });
}

criterion_group!(benches, bench_sweep, bench_colorize);
criterion_main!(benches);
