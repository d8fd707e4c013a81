//! Test fixtures for Ripple development.
//!
//! Grid builders, energy and boundedness checks, and a slow reference
//! stepper built on `TileGrid::neighbor_depth` for cross-checking the
//! optimised sweep.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use ripple_core::{DepthBounds, Direction, TileId};
use ripple_field::{TileGrid, TileTopology};

/// `[-1, 1]`, baseline 0.
pub fn symmetric_bounds() -> DepthBounds {
    DepthBounds::new(-1.0, 1.0).expect("static bounds are valid")
}

/// A grid at baseline with symmetric bounds.
pub fn flat_grid(tile_rows: u32, tile_cols: u32, cell_rows: usize, cell_cols: usize) -> TileGrid {
    let topo = TileTopology::new(tile_rows, tile_cols, cell_rows, cell_cols)
        .expect("fixture dimensions are valid");
    TileGrid::at_baseline(topo, symmetric_bounds())
}

/// Template of `len` cells at depth 0.
pub fn zero_template(len: usize) -> Vec<f32> {
    vec![0.0; len]
}

/// Sum of squared deviations from baseline across every source cell.
pub fn energy(grid: &TileGrid) -> f64 {
    let baseline = grid.bounds().baseline() as f64;
    grid.sources()
        .iter()
        .flat_map(|f| f.as_slice().iter())
        .map(|&v| {
            let d = v as f64 - baseline;
            d * d
        })
        .sum()
}

/// Whether every source and result cell lies within the grid's bounds.
pub fn within_bounds(grid: &TileGrid) -> bool {
    let b = grid.bounds();
    grid.sources()
        .iter()
        .chain(grid.results())
        .all(|f| f.as_slice().iter().all(|&v| b.contains(v)))
}

/// Whether every source and result cell equals `value`.
pub fn all_cells_equal(grid: &TileGrid, value: f32) -> bool {
    grid.sources()
        .iter()
        .chain(grid.results())
        .all(|f| f.as_slice().iter().all(|&v| v == value))
}

/// Expected post-sweep sources, computed cell by cell through
/// `neighbor_depth` with no tile-level shortcuts.
///
/// Returns one `Vec<f32>` per tile in arena order. Does not mutate `grid`.
pub fn reference_sweep(grid: &TileGrid, damping: f32) -> Vec<Vec<f32>> {
    let topo = *grid.topology();
    let bounds = grid.bounds();
    (0..topo.tile_count())
        .map(|ti| {
            let tile: TileId = topo.tile_id(ti);
            let previous = grid.results()[ti].as_slice();
            (0..topo.cells_per_tile())
                .map(|cell| {
                    let sum: f32 = Direction::ALL
                        .iter()
                        .filter_map(|&d| grid.neighbor_depth(tile, cell, d))
                        .sum();
                    let raw = bounds.clamp(sum / 2.0 - previous[cell]);
                    let v = bounds.clamp(raw * damping);
                    if v.is_nan() {
                        bounds.baseline()
                    } else {
                        v
                    }
                })
                .collect()
        })
        .collect()
}
