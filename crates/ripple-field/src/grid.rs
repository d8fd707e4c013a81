//! The tile grid: topology, bounds, and double-buffered tile storage.

use ripple_core::{ConfigError, DepthBounds, Direction, TileId};

use crate::height::HeightField;
use crate::pingpong::{PingPong, TileState};
use crate::topology::TileTopology;

/// Borrowed view handed to the stepper for the duration of one sweep.
///
/// Sources are shared and results exclusive, so every tile can read any
/// neighbour's source while writing only its own result.
pub struct SweepView<'a> {
    /// Grid shape.
    pub topology: &'a TileTopology,
    /// Depth bounds for clamping.
    pub bounds: DepthBounds,
    /// Source fields, indexed by tile arena index.
    pub sources: &'a [HeightField],
    /// Result fields, indexed by tile arena index.
    pub results: &'a mut [HeightField],
}

/// A 2D arrangement of uniformly sized tiles.
///
/// Tiles live in a flat row-major arena and find each other by coordinate
/// through [`TileTopology`]. The grid is sized once at construction and
/// never reallocated; [`reset_to`](Self::reset_to) writes in place.
#[derive(Clone, Debug)]
pub struct TileGrid {
    topology: TileTopology,
    bounds: DepthBounds,
    buffers: PingPong,
}

impl TileGrid {
    /// Build a grid whose every tile starts as a copy of `template`, in
    /// both the source and result slots.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TemplateSizeMismatch` if the template length
    /// differs from the per-tile cell count, and
    /// `ConfigError::NonFiniteTemplate` if it holds a NaN or infinity.
    pub fn new(
        topology: TileTopology,
        bounds: DepthBounds,
        template: &[f32],
    ) -> Result<Self, ConfigError> {
        let expected = topology.cells_per_tile();
        if template.len() != expected {
            return Err(ConfigError::TemplateSizeMismatch {
                expected,
                got: template.len(),
            });
        }
        if let Some(index) = template.iter().position(|v| !v.is_finite()) {
            return Err(ConfigError::NonFiniteTemplate { index });
        }
        let template = HeightField::from_template(template);
        Ok(Self {
            topology,
            bounds,
            buffers: PingPong::new(topology.tile_count(), &template),
        })
    }

    /// Build a grid with every cell at the baseline depth.
    pub fn at_baseline(topology: TileTopology, bounds: DepthBounds) -> Self {
        let template = HeightField::filled(topology.cells_per_tile(), bounds.baseline());
        Self {
            topology,
            bounds,
            buffers: PingPong::new(topology.tile_count(), &template),
        }
    }

    /// Grid shape.
    pub fn topology(&self) -> &TileTopology {
        &self.topology
    }

    /// Depth bounds shared by all tiles.
    pub fn bounds(&self) -> DepthBounds {
        self.bounds
    }

    /// Current readable state of `tile`.
    pub fn source(&self, tile: TileId) -> Option<&HeightField> {
        let i = self.topology.tile_index(tile)?;
        Some(&self.buffers.sources()[i])
    }

    /// In-progress (or two-sweeps-old) state of `tile`.
    pub fn result(&self, tile: TileId) -> Option<&HeightField> {
        let i = self.topology.tile_index(tile)?;
        Some(&self.buffers.results()[i])
    }

    /// Mutable source of `tile`.
    pub fn source_mut(&mut self, tile: TileId) -> Option<&mut HeightField> {
        let i = self.topology.tile_index(tile)?;
        Some(&mut self.buffers.both_mut().0[i])
    }

    /// Mutable result of `tile`.
    pub fn result_mut(&mut self, tile: TileId) -> Option<&mut HeightField> {
        let i = self.topology.tile_index(tile)?;
        Some(&mut self.buffers.both_mut().1[i])
    }

    /// Both slots of `tile`, mutably, as `(source, result)`.
    pub fn tile_pair_mut(&mut self, tile: TileId) -> Option<(&mut HeightField, &mut HeightField)> {
        let i = self.topology.tile_index(tile)?;
        let (sources, results) = self.buffers.both_mut();
        Some((&mut sources[i], &mut results[i]))
    }

    /// All source fields in arena order.
    pub fn sources(&self) -> &[HeightField] {
        self.buffers.sources()
    }

    /// All result fields in arena order.
    pub fn results(&self) -> &[HeightField] {
        self.buffers.results()
    }

    /// Source depth of the neighbour of `(tile, cell)` in `direction`.
    ///
    /// Crosses tile edges as described on [`TileTopology::neighbor`].
    /// Returns `None` past the grid's outer edge (open boundary, the
    /// neighbour contributes nothing) or if `(tile, cell)` is invalid.
    pub fn neighbor_depth(&self, tile: TileId, cell: usize, direction: Direction) -> Option<f32> {
        if !self.topology.contains(tile, cell) {
            return None;
        }
        let (nt, nc) = self.topology.neighbor(tile, cell, direction)?;
        let i = self.topology.tile_index(nt)?;
        Some(self.buffers.sources()[i].get(nc))
    }

    /// Set every cell of both slots of every tile to `value`.
    pub fn reset_to(&mut self, value: f32) {
        self.buffers.fill(value);
    }

    /// Sweep state of `tile`.
    pub fn tile_state(&self, tile: TileId) -> Option<TileState> {
        let i = self.topology.tile_index(tile)?;
        Some(self.buffers.state(i))
    }

    /// Mark every tile `Computing` and lend out the sweep buffers.
    pub fn begin_sweep(&mut self) -> SweepView<'_> {
        self.buffers.begin();
        let (sources, results) = self.buffers.split_mut();
        SweepView {
            topology: &self.topology,
            bounds: self.bounds,
            sources,
            results,
        }
    }

    /// Swap source and result for the whole grid at once.
    ///
    /// Must follow [`begin_sweep`](Self::begin_sweep) after every tile's
    /// result has been written.
    pub fn complete_sweep(&mut self) {
        self.buffers.swap();
    }

    /// Return every tile to `Idle` once the new sources have been consumed.
    pub fn settle(&mut self) {
        self.buffers.settle();
    }
}
