//! The cellular wave recurrence and the grid-wide sweep.
//!
//! Per cell, reading neighbours from the *source* slot and using the
//! *result* slot as both the previous-previous state and the write target:
//!
//! ```text
//! neighbor_sum = sum of up to 4 source neighbours (stitched across tiles)
//! raw          = clamp(neighbor_sum / 2 - result[cell], min, max)
//! result[cell] = clamp(raw * damping, min, max)   // NaN becomes the baseline
//! ```
//!
//! Reusing `result` as the previous-previous state is what makes this a
//! second-order recurrence; it must never be replaced with a fresh
//! buffer. Every tile computes from the old sources before the grid swaps
//! once.

use ripple_core::{ConfigError, DepthBounds, TileId};
use ripple_field::{HeightField, SweepView, TileGrid, TileTopology};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::damping::{damping_for_rows, validate_damping};

/// Outcome of one propagation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Cells updated.
    pub cells: usize,
    /// Cells whose computed depth was NaN and was replaced by the baseline.
    pub nan_substitutions: u64,
}

/// The per-cell update rule plus sweep orchestration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropagationStep {
    damping: f32,
}

/// Source-slot indices of the tiles adjacent to one tile.
#[derive(Clone, Copy)]
struct Adjacent {
    up: Option<usize>,
    down: Option<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

impl Adjacent {
    fn of(topology: &TileTopology, tile_index: usize) -> Self {
        let t = topology.tile_id(tile_index);
        let at = |dr: i64, dc: i64| {
            let r = u32::try_from(t.row as i64 + dr).ok()?;
            let c = u32::try_from(t.col as i64 + dc).ok()?;
            topology.tile_index(TileId::new(r, c))
        };
        Self {
            up: at(-1, 0),
            down: at(1, 0),
            left: at(0, -1),
            right: at(0, 1),
        }
    }
}

impl PropagationStep {
    /// Step with an explicit damping factor in `[0, 1)`.
    pub fn new(damping: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            damping: validate_damping(damping)?,
        })
    }

    /// Step with the damping derived from the grid's total row count.
    pub fn for_topology(topology: &TileTopology) -> Result<Self, ConfigError> {
        Self::new(damping_for_rows(topology.total_rows())?)
    }

    /// The damping factor in use.
    pub fn damping(&self) -> f32 {
        self.damping
    }

    /// Apply the recurrence to a single cell.
    ///
    /// Returns the new depth and whether a NaN had to be replaced by the
    /// baseline. The damped value is clamped again so boundedness holds
    /// even when the bounds do not straddle zero.
    #[inline]
    pub fn update_cell(&self, neighbor_sum: f32, previous: f32, bounds: DepthBounds) -> (f32, bool) {
        let raw = bounds.clamp(neighbor_sum * 0.5 - previous);
        let damped = bounds.clamp(raw * self.damping);
        if damped.is_nan() {
            (bounds.baseline(), true)
        } else {
            (damped, false)
        }
    }

    /// Full sweep: compute every tile's result from the current sources,
    /// then swap the whole grid. Tiles are left `Swapped`; the caller
    /// settles them after colorizing.
    pub fn sweep(&self, grid: &mut TileGrid) -> SweepStats {
        let stats = self.propagate(grid.begin_sweep());
        grid.complete_sweep();
        stats
    }

    /// Compute results for every tile without swapping.
    pub fn propagate(&self, view: SweepView<'_>) -> SweepStats {
        let SweepView {
            topology,
            bounds,
            sources,
            results,
        } = view;

        let step_one = |(ti, result): (usize, &mut HeightField)| {
            self.step_tile(topology, bounds, sources, ti, result)
        };

        #[cfg(feature = "parallel")]
        let nan_substitutions: u64 = results.par_iter_mut().enumerate().map(step_one).sum();
        #[cfg(not(feature = "parallel"))]
        let nan_substitutions: u64 = results.iter_mut().enumerate().map(step_one).sum();

        if nan_substitutions > 0 {
            log::trace!("replaced {nan_substitutions} NaN cells with baseline depth");
        }

        SweepStats {
            cells: topology.cell_count(),
            nan_substitutions,
        }
    }

    /// Update one tile's result in place. Returns the NaN substitution count.
    fn step_tile(
        &self,
        topology: &TileTopology,
        bounds: DepthBounds,
        sources: &[HeightField],
        tile_index: usize,
        result: &mut HeightField,
    ) -> u64 {
        let rows = topology.cell_rows();
        let cols = topology.cell_cols();
        let adj = Adjacent::of(topology, tile_index);
        let src = sources[tile_index].as_slice();
        let up = adj.up.map(|t| sources[t].as_slice());
        let down = adj.down.map(|t| sources[t].as_slice());
        let left = adj.left.map(|t| sources[t].as_slice());
        let right = adj.right.map(|t| sources[t].as_slice());

        let out = result.as_mut_slice();
        let mut nans = 0u64;
        for r in 0..rows {
            for c in 0..cols {
                let i = r * cols + c;
                let mut sum = 0.0f32;

                if r > 0 {
                    sum += src[i - cols];
                } else if let Some(above) = up {
                    sum += above[(rows - 1) * cols + c];
                }
                if r + 1 < rows {
                    sum += src[i + cols];
                } else if let Some(below) = down {
                    sum += below[c];
                }
                if c > 0 {
                    sum += src[i - 1];
                } else if let Some(l) = left {
                    sum += l[r * cols + cols - 1];
                }
                if c + 1 < cols {
                    sum += src[i + 1];
                } else if let Some(rt) = right {
                    sum += rt[r * cols];
                }

                let (depth, was_nan) = self.update_cell(sum, out[i], bounds);
                out[i] = depth;
                nans += u64::from(was_nan);
            }
        }
        nans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> DepthBounds {
        DepthBounds::new(-1.0, 1.0).unwrap()
    }

    #[test]
    fn rejects_bad_damping() {
        assert!(PropagationStep::new(1.0).is_err());
        assert!(PropagationStep::new(f32::NAN).is_err());
    }

    #[test]
    fn for_topology_uses_total_rows() {
        let topo = TileTopology::new(2, 1, 10, 4).unwrap();
        let step = PropagationStep::for_topology(&topo).unwrap();
        assert_eq!(step.damping(), 0.9);
    }

    #[test]
    fn update_cell_rule() {
        let step = PropagationStep::new(0.5).unwrap();
        // (1.0 / 2 - 0.2) * 0.5
        let (d, nan) = step.update_cell(1.0, 0.2, bounds());
        assert!((d - 0.15).abs() < 1e-6);
        assert!(!nan);
    }

    #[test]
    fn update_cell_clamps_before_damping() {
        let step = PropagationStep::new(0.5).unwrap();
        let (d, _) = step.update_cell(10.0, -10.0, bounds());
        assert_eq!(d, 0.5);
    }

    #[test]
    fn update_cell_replaces_nan_with_baseline() {
        let step = PropagationStep::new(0.9).unwrap();
        let b = DepthBounds::new(0.0, 2.0).unwrap();
        let (d, nan) = step.update_cell(f32::NAN, 0.0, b);
        assert_eq!(d, 1.0);
        assert!(nan);
    }

    #[test]
    fn update_cell_stays_bounded_for_positive_bounds() {
        let step = PropagationStep::new(0.5).unwrap();
        let b = DepthBounds::new(0.5, 1.0).unwrap();
        let (d, _) = step.update_cell(2.0, 0.0, b);
        assert!(b.contains(d));
    }

    #[test]
    fn damped_depth_is_clamped_again() {
        let step = PropagationStep::new(0.2).unwrap();
        let b = DepthBounds::new(0.5, 1.0).unwrap();
        let (d, nan) = step.update_cell(2.0, 0.0, b);
        assert_eq!(d, 0.5);
        assert!(!nan);
    }

    #[test]
    fn flat_grid_at_zero_stays_flat() {
        let topo = TileTopology::new(2, 2, 3, 3).unwrap();
        let mut grid = TileGrid::at_baseline(topo, bounds());
        let step = PropagationStep::new(0.9).unwrap();
        let stats = step.sweep(&mut grid);
        grid.settle();
        assert_eq!(stats.cells, 36);
        assert_eq!(stats.nan_substitutions, 0);
        assert!(grid
            .sources()
            .iter()
            .all(|f| f.as_slice().iter().all(|&v| v == 0.0)));
    }

    #[test]
    fn nan_in_result_is_repaired_locally() {
        let topo = TileTopology::new(1, 1, 3, 3).unwrap();
        let mut grid = TileGrid::at_baseline(topo, bounds());
        grid.result_mut(TileId::new(0, 0)).unwrap().set(4, f32::NAN);
        let stats = PropagationStep::new(0.9).unwrap().sweep(&mut grid);
        assert_eq!(stats.nan_substitutions, 1);
        let src = grid.source(TileId::new(0, 0)).unwrap();
        assert_eq!(src.get(4), 0.0);
        assert!(src.as_slice().iter().all(|v| !v.is_nan()));
    }

    #[test]
    fn sweep_reads_neighbour_tiles_from_old_sources() {
        // A spike on the left edge of tile (0,1) must reach the right edge
        // of tile (0,0) in the same sweep, computed from pre-sweep values.
        let topo = TileTopology::new(1, 2, 1, 2).unwrap();
        let mut grid = TileGrid::at_baseline(topo, bounds());
        grid.source_mut(TileId::new(0, 1)).unwrap().set(0, 1.0);
        let step = PropagationStep::new(0.5).unwrap();
        step.sweep(&mut grid);

        let left = grid.source(TileId::new(0, 0)).unwrap();
        // Neighbours of (0,0) cell 1: cell 0 of its own tile (0.0) and
        // cell 0 of tile (0,1) (1.0): (1.0 / 2 - 0) * 0.5 = 0.25.
        assert!((left.get(1) - 0.25).abs() < 1e-6);
        // Far-left cell only sees its own tile's cell 1, which was 0.
        assert_eq!(left.get(0), 0.0);
    }
}
