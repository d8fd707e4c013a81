//! Two-slot ring of per-tile height fields.
//!
//! [`PingPong`] keeps two parallel arrays of [`HeightField`]s (slot A and
//! slot B) and a single grid-wide flag saying which slot is current. The
//! current slot is the *source* (readable state); the other is the
//! *result* (being computed into). Because cross-tile stitching reads
//! neighbouring tiles' sources, the flag flips once for the whole grid,
//! after every tile has finished computing.
//!
//! The lifecycle per sweep is:
//! 1. `begin()`: every tile moves `Idle → Computing`
//! 2. the stepper writes results via [`PingPong::split_mut`]
//! 3. `swap()`: flag flips, every tile moves `Computing → Swapped`
//! 4. `settle()`: every tile moves `Swapped → Idle`
//!
//! The result slot is not cleared on swap: the stepper reads it as the
//! state from two sweeps ago before overwriting it.

use crate::height::HeightField;

/// Per-tile position in the sweep cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileState {
    /// Between sweeps; source is the readable state.
    Idle,
    /// Result slot is being written.
    Computing,
    /// Slots have swapped; the new source awaits colorizing.
    Swapped,
}

/// Double-buffered tile storage with one current-slot flag.
#[derive(Clone, Debug)]
pub struct PingPong {
    slot_a: Vec<HeightField>,
    slot_b: Vec<HeightField>,
    /// `false` = slot A is the source, `true` = slot B is the source.
    b_is_current: bool,
    states: Vec<TileState>,
}

impl PingPong {
    /// `tile_count` tiles, both slots initialised from `template`.
    pub fn new(tile_count: usize, template: &HeightField) -> Self {
        Self {
            slot_a: vec![template.clone(); tile_count],
            slot_b: vec![template.clone(); tile_count],
            b_is_current: false,
            states: vec![TileState::Idle; tile_count],
        }
    }

    /// Number of tiles.
    pub fn tile_count(&self) -> usize {
        self.states.len()
    }

    /// Source fields, indexed by tile.
    pub fn sources(&self) -> &[HeightField] {
        if self.b_is_current {
            &self.slot_b
        } else {
            &self.slot_a
        }
    }

    /// Result fields, indexed by tile.
    pub fn results(&self) -> &[HeightField] {
        if self.b_is_current {
            &self.slot_a
        } else {
            &self.slot_b
        }
    }

    /// Borrow sources immutably and results mutably at the same time.
    pub fn split_mut(&mut self) -> (&[HeightField], &mut [HeightField]) {
        if self.b_is_current {
            (&self.slot_b, &mut self.slot_a)
        } else {
            (&self.slot_a, &mut self.slot_b)
        }
    }

    /// Borrow both slots mutably as `(sources, results)`.
    pub fn both_mut(&mut self) -> (&mut [HeightField], &mut [HeightField]) {
        if self.b_is_current {
            (&mut self.slot_b, &mut self.slot_a)
        } else {
            (&mut self.slot_a, &mut self.slot_b)
        }
    }

    /// State of tile `index`.
    pub fn state(&self, index: usize) -> TileState {
        self.states[index]
    }

    /// Whether every tile is `Idle`.
    pub fn is_idle(&self) -> bool {
        self.states.iter().all(|&s| s == TileState::Idle)
    }

    /// Start a sweep: `Idle → Computing` for every tile.
    pub fn begin(&mut self) {
        debug_assert!(self.is_idle(), "begin() while a sweep is in flight");
        self.states.fill(TileState::Computing);
    }

    /// Flip the current slot: `Computing → Swapped` for every tile.
    pub fn swap(&mut self) {
        debug_assert!(
            self.states.iter().all(|&s| s == TileState::Computing),
            "swap() before every tile finished computing"
        );
        self.b_is_current = !self.b_is_current;
        self.states.fill(TileState::Swapped);
    }

    /// Finish a sweep: `Swapped → Idle` for every tile.
    pub fn settle(&mut self) {
        self.states.fill(TileState::Idle);
    }

    /// Set every cell of both slots to `value`.
    pub fn fill(&mut self, value: f32) {
        for field in self.slot_a.iter_mut().chain(self.slot_b.iter_mut()) {
            field.fill(value);
        }
    }
}
