//! Core types for the Ripple wave-propagation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the rest of the workspace: tile identifiers,
//! depth bounds, neighbour directions, disturbance events, and the
//! configuration error type.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod bounds;
pub mod direction;
pub mod error;
pub mod event;
pub mod id;

pub use bounds::DepthBounds;
pub use direction::Direction;
pub use error::ConfigError;
pub use event::DisturbanceEvent;
pub use id::{FrameId, TileId};
