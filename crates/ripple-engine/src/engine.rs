//! The synchronous frame engine.
//!
//! [`WaveEngine`] owns the tile grid, the disturbance queue, and the
//! propagation rule. Each call to [`step()`](WaveEngine::step) runs one
//! frame through four phases:
//!
//! 1. **Drain**: apply queued pushes, or flatten the grid on a reset.
//! 2. **Propagate**: compute every tile's result from the current sources.
//! 3. **Swap**: flip source and result for the whole grid at once.
//! 4. **Colorize**: copy depths and colours into fresh per-tile buffers.

use std::time::Instant;

use ripple_core::{ConfigError, DisturbanceEvent, FrameId, TileId};
use ripple_field::TileGrid;
use ripple_propagator::{ColorMapper, PropagationStep};

use crate::config::EngineConfig;
use crate::disturbance::{DisturbanceQueue, DrainReport};
use crate::metrics::SweepMetrics;
use crate::protocol::FrameResult;

/// Where the engine is within a frame. Outside `step()` it is always
/// [`FramePhase::Idle`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramePhase {
    /// Between frames.
    Idle,
    /// Applying queued disturbances.
    DrainDisturbances,
    /// Running the per-cell recurrence.
    Propagate,
    /// Flipping source and result.
    Swap,
    /// Building the outgoing buffers.
    Colorize,
}

/// Single-threaded wave engine.
///
/// Buffers returned in a [`FrameResult`] are newly allocated on every
/// frame; the engine never hands out views into its own storage.
pub struct WaveEngine {
    grid: TileGrid,
    stepper: PropagationStep,
    colors: ColorMapper,
    queue: DisturbanceQueue,
    frame: FrameId,
    phase: FramePhase,
    metrics: SweepMetrics,
}

impl WaveEngine {
    /// Build an engine from a validated configuration. The template is
    /// consumed.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let topology = config.topology()?;
        let bounds = config.bounds()?;
        let stepper = PropagationStep::new(config.resolved_damping()?)?;
        let grid = TileGrid::new(topology, bounds, &config.template)?;

        log::debug!(
            "wave engine initialized: {}x{} tiles of {}x{} cells, damping {}",
            topology.tile_rows(),
            topology.tile_cols(),
            topology.cell_rows(),
            topology.cell_cols(),
            stepper.damping(),
        );

        Ok(Self {
            grid,
            stepper,
            colors: ColorMapper::new(bounds),
            queue: DisturbanceQueue::with_capacity(topology.cell_count()),
            frame: FrameId::default(),
            phase: FramePhase::Idle,
            metrics: SweepMetrics::default(),
        })
    }

    /// Queue a push on `(tile, cell)` for the next frame.
    ///
    /// Pushes outside the grid are refused here and reported as discarded
    /// by the next frame, so the queue never holds more than one entry per
    /// cell. Returns whether the push was queued.
    pub fn disturb(&mut self, tile: TileId, cell: usize) -> bool {
        if self.grid.topology().contains(tile, cell) && self.queue.enqueue_push(tile, cell) {
            true
        } else {
            self.queue.record_dropped(1);
            false
        }
    }

    /// Queue a flatten-to-baseline for the next frame.
    pub fn reset(&mut self) {
        self.queue.enqueue_reset();
    }

    /// Queue either kind of disturbance. Returns `false` if a push was
    /// refused.
    pub fn enqueue(&mut self, event: DisturbanceEvent) -> bool {
        match event {
            DisturbanceEvent::Push { tile, cell } => self.disturb(tile, cell),
            DisturbanceEvent::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Re-queue disturbances collected before this engine existed,
    /// applying the same range check as [`disturb`](Self::disturb).
    pub fn take_pending(&mut self, pending: DisturbanceQueue) {
        if pending.reset_pending() {
            self.reset();
        }
        for (tile, cell) in pending.pushes() {
            self.disturb(tile, cell);
        }
        self.queue.record_dropped(pending.dropped());
    }

    /// Disturbances waiting for the next frame.
    pub fn queue(&self) -> &DisturbanceQueue {
        &self.queue
    }

    /// Apply pending disturbances now, without sweeping.
    ///
    /// `step()` does this itself; calling it separately lets a host
    /// inspect the kicked grid before the next sweep.
    pub fn drain_disturbances(&mut self) -> DrainReport {
        let report = self.queue.drain_into(&mut self.grid);
        if report.reset {
            self.metrics.resets += 1;
        }
        report
    }

    /// Run one complete frame and package its output.
    pub fn step(&mut self) -> FrameResult {
        let frame_start = Instant::now();

        self.phase = FramePhase::DrainDisturbances;
        let drain_start = Instant::now();
        let drained = self.drain_disturbances();
        let drain_us = drain_start.elapsed().as_micros() as u64;

        self.phase = FramePhase::Propagate;
        let propagate_start = Instant::now();
        let stats = self.stepper.propagate(self.grid.begin_sweep());
        self.phase = FramePhase::Swap;
        self.grid.complete_sweep();
        let propagate_us = propagate_start.elapsed().as_micros() as u64;

        self.phase = FramePhase::Colorize;
        let colorize_start = Instant::now();
        let positions: Vec<Vec<f32>> = self.grid.sources().iter().map(|f| f.to_vec()).collect();
        let colors: Vec<Vec<f32>> = self
            .grid
            .sources()
            .iter()
            .map(|f| self.colors.colorize(f))
            .collect();
        self.grid.settle();
        let colorize_us = colorize_start.elapsed().as_micros() as u64;

        self.frame = FrameId(self.frame.0 + 1);
        self.phase = FramePhase::Idle;

        self.metrics = SweepMetrics {
            total_us: frame_start.elapsed().as_micros() as u64,
            drain_us,
            propagate_us,
            colorize_us,
            pushes_applied: drained.applied,
            pushes_discarded: drained.discarded,
            nan_substitutions: stats.nan_substitutions,
            resets: self.metrics.resets,
            total_nan_substitutions: self.metrics.total_nan_substitutions
                + stats.nan_substitutions,
        };

        FrameResult {
            frame: self.frame,
            positions,
            colors,
        }
    }

    /// The grid as of the last completed frame.
    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Number of the last completed frame; zero before the first.
    pub fn current_frame(&self) -> FrameId {
        self.frame
    }

    /// Current frame phase.
    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Damping factor in use.
    pub fn damping(&self) -> f32 {
        self.stepper.damping()
    }

    /// Metrics from the most recent frame.
    pub fn last_metrics(&self) -> &SweepMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> WaveEngine {
        let config = EngineConfig::builder()
            .tiles(1, 2)
            .cells_per_tile(4, 4)
            .damping(0.9)
            .build()
            .unwrap();
        WaveEngine::new(config).unwrap()
    }

    #[test]
    fn frames_are_numbered_from_one() {
        let mut e = engine();
        assert_eq!(e.current_frame(), FrameId(0));
        assert_eq!(e.step().frame, FrameId(1));
        assert_eq!(e.step().frame, FrameId(2));
        assert_eq!(e.phase(), FramePhase::Idle);
    }

    #[test]
    fn frame_buffers_have_tile_shapes() {
        let mut e = engine();
        let frame = e.step();
        assert_eq!(frame.tile_count(), 2);
        assert!(frame.positions.iter().all(|p| p.len() == 16));
        assert!(frame.colors.iter().all(|c| c.len() == 48));
    }

    #[test]
    fn flat_surface_is_pale_blue() {
        let mut e = engine();
        let frame = e.step();
        assert_eq!(&frame.colors_of(0).unwrap()[..3], &[0.5, 0.5, 1.0]);
    }

    #[test]
    fn metrics_count_pushes_and_resets() {
        let mut e = engine();
        e.disturb(TileId::new(0, 0), 3);
        e.disturb(TileId::new(0, 5), 0);
        e.step();
        assert_eq!(e.last_metrics().pushes_applied, 1);
        assert_eq!(e.last_metrics().pushes_discarded, 1);

        e.reset();
        e.step();
        e.step();
        assert_eq!(e.last_metrics().resets, 1);
        assert_eq!(e.last_metrics().pushes_applied, 0);
    }

    #[test]
    fn out_of_range_pushes_never_reach_the_queue() {
        let mut e = engine();
        for cell in 16..10_016 {
            assert!(!e.disturb(TileId::new(0, 0), cell));
        }
        assert!(!e.enqueue(DisturbanceEvent::Push {
            tile: TileId::new(3, 0),
            cell: 0,
        }));
        assert!(e.disturb(TileId::new(0, 1), 15));
        assert_eq!(e.queue().len(), 1);

        e.step();
        assert_eq!(e.last_metrics().pushes_applied, 1);
        assert_eq!(e.last_metrics().pushes_discarded, 10_001);
    }

    #[test]
    fn pending_disturbances_are_range_checked() {
        let mut pending = DisturbanceQueue::new();
        pending.enqueue_push(TileId::new(0, 0), 5);
        pending.enqueue_push(TileId::new(0, 0), 99);
        pending.record_dropped(2);
        let mut e = engine();
        e.take_pending(pending);
        assert_eq!(e.queue().len(), 1);
        e.step();
        assert_eq!(e.last_metrics().pushes_applied, 1);
        assert_eq!(e.last_metrics().pushes_discarded, 3);
    }

    #[test]
    fn invalid_config_is_refused() {
        let mut config = EngineConfig::builder().build().unwrap();
        config.template.truncate(3);
        assert!(matches!(
            WaveEngine::new(config),
            Err(ConfigError::TemplateSizeMismatch { .. })
        ));
    }

    #[test]
    fn frame_positions_are_copies() {
        let mut e = engine();
        e.disturb(TileId::new(0, 1), 5);
        let mut frame = e.step();
        frame.positions[1][5] = 42.0;
        assert_ne!(e.grid().source(TileId::new(0, 1)).unwrap().get(5), 42.0);
    }
}
