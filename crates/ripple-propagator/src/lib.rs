//! Wave propagation step and depth colouring for Ripple.
//!
//! [`PropagationStep`] applies the cellular wave recurrence to every tile
//! of a [`TileGrid`](ripple_field::TileGrid), then swaps buffers for the
//! whole grid at once. [`ColorMapper`] turns the resulting depths into
//! render-ready RGB triples.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod color;
pub mod damping;
pub mod step;

pub use color::ColorMapper;
pub use damping::{damping_for_rows, validate_damping};
pub use step::{PropagationStep, SweepStats};
