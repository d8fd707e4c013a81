//! Pending disturbances, applied in one batch at the start of a frame.
//!
//! Pushes are deduplicated in an insertion-ordered set, so a cell pushed
//! several times between frames is kicked once. A pending reset overrides
//! every push queued alongside it. The set is bounded: once `capacity`
//! distinct pushes are pending, new ones are refused until the next drain.

use indexmap::IndexSet;
use ripple_core::{DisturbanceEvent, TileId};
use ripple_field::TileGrid;

/// What one drain did to the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// A reset was applied and every push was dropped.
    pub reset: bool,
    /// Unique in-range pushes written to the grid.
    pub applied: usize,
    /// Pushes dropped because their tile or cell was out of range, or
    /// because a reset superseded them.
    pub discarded: usize,
}

/// Disturbances waiting for the next frame.
#[derive(Clone, Debug)]
pub struct DisturbanceQueue {
    pushes: IndexSet<(TileId, usize)>,
    reset_pending: bool,
    capacity: usize,
    dropped: usize,
}

impl Default for DisturbanceQueue {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl DisturbanceQueue {
    /// Distinct pushes held by a queue built with [`new`](Self::new).
    pub const DEFAULT_CAPACITY: usize = 4096;

    /// An empty queue holding up to [`DEFAULT_CAPACITY`](Self::DEFAULT_CAPACITY)
    /// distinct pushes.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty queue holding up to `capacity` distinct pushes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pushes: IndexSet::new(),
            reset_pending: false,
            capacity,
            dropped: 0,
        }
    }

    /// Queue a push on `(tile, cell)`. Repeats collapse into one entry.
    ///
    /// Returns `false` if the queue is full and the push is new; the
    /// caller decides whether that counts as a drop.
    pub fn enqueue_push(&mut self, tile: TileId, cell: usize) -> bool {
        if self.pushes.len() >= self.capacity && !self.pushes.contains(&(tile, cell)) {
            return false;
        }
        self.pushes.insert((tile, cell));
        true
    }

    /// Count `n` pushes refused before reaching the queue. They are
    /// reported as discarded by the next drain.
    pub fn record_dropped(&mut self, n: usize) {
        self.dropped += n;
    }

    /// Pushes refused since the last drain.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Most distinct pushes this queue holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Queue a reset. Repeats collapse into one.
    pub fn enqueue_reset(&mut self) {
        self.reset_pending = true;
    }

    /// Queue either kind of event. Returns `false` if a push was refused.
    pub fn enqueue(&mut self, event: DisturbanceEvent) -> bool {
        match event {
            DisturbanceEvent::Push { tile, cell } => self.enqueue_push(tile, cell),
            DisturbanceEvent::Reset => {
                self.enqueue_reset();
                true
            }
        }
    }

    /// Unique pushes pending.
    pub fn len(&self) -> usize {
        self.pushes.len()
    }

    /// No pushes and no reset pending.
    pub fn is_empty(&self) -> bool {
        self.pushes.is_empty() && !self.reset_pending
    }

    /// Whether a reset will be applied at the next drain.
    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// Pending pushes in insertion order.
    pub fn pushes(&self) -> impl Iterator<Item = (TileId, usize)> + '_ {
        self.pushes.iter().copied()
    }

    /// Apply everything pending to `grid` and empty the queue.
    ///
    /// A pending reset flattens both slots of every tile to the baseline and
    /// discards the pushes. Otherwise each in-range push sets the cell's
    /// source to `min` and its result to `max`, which the next sweep reads
    /// as an upward-moving trough.
    pub fn drain_into(&mut self, grid: &mut TileGrid) -> DrainReport {
        let pushes = std::mem::take(&mut self.pushes);
        let reset = std::mem::replace(&mut self.reset_pending, false);
        let dropped = std::mem::replace(&mut self.dropped, 0);

        if reset {
            grid.reset_to(grid.bounds().baseline());
            log::debug!("reset applied, {} pending pushes dropped", pushes.len());
            return DrainReport {
                reset: true,
                applied: 0,
                discarded: pushes.len() + dropped,
            };
        }

        let bounds = grid.bounds();
        let cells = grid.topology().cells_per_tile();
        let mut report = DrainReport {
            discarded: dropped,
            ..DrainReport::default()
        };
        for (tile, cell) in pushes {
            let pair = if cell < cells {
                grid.tile_pair_mut(tile)
            } else {
                None
            };
            match pair {
                Some((source, result)) => {
                    source.set(cell, bounds.min());
                    result.set(cell, bounds.max());
                    report.applied += 1;
                }
                None => report.discarded += 1,
            }
        }
        report
    }
}
