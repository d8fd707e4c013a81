//! Tiled, double-buffered height-field storage for Ripple.
//!
//! The grid is partitioned into uniform tiles. Each tile owns two
//! [`HeightField`]s held in a [`PingPong`] pair: the *source* slot is read
//! during a sweep and the *result* slot is written. [`TileGrid`] resolves
//! neighbour lookups across tile edges by coordinate through the
//! [`TileTopology`], so tiles never hold references to one another.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;
pub mod height;
pub mod pingpong;
pub mod topology;

pub use grid::{SweepView, TileGrid};
pub use height::HeightField;
pub use pingpong::{PingPong, TileState};
pub use topology::TileTopology;
