//! Seeded random rain: one push on a random cell per interval.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ripple_core::TileId;
use ripple_field::TileTopology;

use crate::protocol::Request;

/// Emits `Disturb` requests at uniformly random cells on a fixed cadence.
///
/// The same seed over the same topology produces the same drop sequence.
#[derive(Clone, Debug)]
pub struct RainGenerator {
    topology: TileTopology,
    interval: Duration,
    rng: ChaCha8Rng,
    next_due: Option<Instant>,
    enabled: bool,
}

impl RainGenerator {
    /// An enabled generator. The first drop is due one `interval` after
    /// the first [`poll`](Self::poll).
    pub fn new(topology: TileTopology, interval: Duration, seed: u64) -> Self {
        Self {
            topology,
            interval,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_due: None,
            enabled: true,
        }
    }

    /// A drop at a uniformly random tile and cell, regardless of timing.
    pub fn next_drop(&mut self) -> Request {
        let row = self.rng.gen_range(0..self.topology.tile_rows());
        let col = self.rng.gen_range(0..self.topology.tile_cols());
        let cell = self.rng.gen_range(0..self.topology.cells_per_tile());
        Request::Disturb {
            tile: TileId::new(row, col),
            cell,
        }
    }

    /// At most one drop if an interval has elapsed by `now`.
    ///
    /// A caller that polls late gets a single drop, not a burst, and the
    /// schedule restarts from `now`.
    pub fn poll(&mut self, now: Instant) -> Option<Request> {
        if !self.enabled {
            return None;
        }
        match self.next_due {
            None => {
                self.next_due = Some(now + self.interval);
                None
            }
            Some(due) if now >= due => {
                let next = due + self.interval;
                self.next_due = Some(if next > now { next } else { now + self.interval });
                Some(self.next_drop())
            }
            Some(_) => None,
        }
    }

    /// Turn rain on or off. Turning it off forgets the schedule.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled {
            self.next_due = None;
        }
        self.enabled = enabled;
    }

    /// Whether rain is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Time between drops.
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
