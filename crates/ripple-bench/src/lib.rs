//! Benchmark profiles for the Ripple wave engine.
//!
//! - [`reference_profile`]: 4x4 tiles of 32x32 cells (16K cells)
//! - [`stress_profile`]: 8x8 tiles of 64x64 cells (~262K cells)
//! - [`seeded_pushes`]: deterministic disturbance placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::time::Duration;

use ripple_core::TileId;
use ripple_engine::{EngineConfig, RainGenerator, Request};

/// Reference profile: 4x4 tiles of 32x32 cells, bounds `[-1, 1]`, derived
/// damping (N = 128).
pub fn reference_profile() -> EngineConfig {
    EngineConfig::builder()
        .tiles(4, 4)
        .cells_per_tile(32, 32)
        .build()
        .expect("reference profile is valid")
}

/// Stress profile: 8x8 tiles of 64x64 cells.
pub fn stress_profile() -> EngineConfig {
    EngineConfig::builder()
        .tiles(8, 8)
        .cells_per_tile(64, 64)
        .build()
        .expect("stress profile is valid")
}

/// `count` pushes at seeded random cells of `config`'s grid.
pub fn seeded_pushes(config: &EngineConfig, count: usize, seed: u64) -> Vec<(TileId, usize)> {
    let topology = config.topology().expect("profile topology is valid");
    let mut rain = RainGenerator::new(topology, Duration::ZERO, seed);
    (0..count)
        .filter_map(|_| match rain.next_drop() {
            Request::Disturb { tile, cell } => Some((tile, cell)),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_validate() {
        assert!(reference_profile().validate().is_ok());
        assert!(stress_profile().validate().is_ok());
    }

    #[test]
    fn seeded_pushes_are_deterministic() {
        let config = reference_profile();
        assert_eq!(seeded_pushes(&config, 16, 9), seeded_pushes(&config, 16, 9));
        assert_eq!(seeded_pushes(&config, 16, 9).len(), 16);
    }
}
