//! Ripple: tiled, double-buffered wave propagation for interactive water
//! surfaces.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Ripple sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use ripple::prelude::*;
//!
//! let config = EngineConfig::builder()
//!     .tiles(2, 2)
//!     .cells_per_tile(8, 8)
//!     .build()
//!     .unwrap();
//! let mut engine = WaveEngine::new(config).unwrap();
//!
//! engine.disturb(TileId::new(0, 1), 27);
//! let frame = engine.step();
//! assert_eq!(frame.frame, FrameId(1));
//! assert_eq!(frame.positions.len(), 4);
//! assert_eq!(frame.colors[0].len(), 3 * 64);
//! ```
//!
//! To keep the sweep off the render thread, run the same engine behind
//! the request protocol:
//!
//! ```rust
//! use ripple::prelude::*;
//! use ripple::engine::protocol::InitParams;
//!
//! let mut worker = EngineWorker::spawn().unwrap();
//! worker.send(Request::Init(InitParams {
//!     tile_rows: 1,
//!     tile_cols: 1,
//!     cells_per_tile_row: 4,
//!     cells_per_tile_col: 4,
//!     min_depth: -1.0,
//!     max_depth: 1.0,
//!     damping: None,
//!     template: vec![0.0; 16],
//! })).unwrap();
//! assert!(matches!(worker.recv().unwrap(), Response::Initialized { cell_count: 16 }));
//!
//! worker.send(Request::ReadyForNext).unwrap();
//! assert!(matches!(worker.recv().unwrap(), Response::Frame(_)));
//! worker.shutdown();
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ripple-core` | IDs, depth bounds, directions, events, errors |
//! | [`field`] | `ripple-field` | Tile topology, ping-pong buffers, the tile grid |
//! | [`propagator`] | `ripple-propagator` | The wave recurrence, damping, colour mapping |
//! | [`engine`] | `ripple-engine` | Frame engine, protocol, worker thread, codec, rain |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, IDs, and errors (`ripple-core`).
pub use ripple_core as types;

/// Tile topology and double-buffered storage (`ripple-field`).
///
/// [`field::TileGrid`] is the unit the propagator sweeps.
pub use ripple_field as field;

/// The per-cell recurrence and colour mapping (`ripple-propagator`).
pub use ripple_propagator as propagator;

/// Frame engine and background worker (`ripple-engine`).
///
/// [`engine::WaveEngine`] for synchronous stepping,
/// [`engine::EngineWorker`] for a dedicated engine thread.
pub use ripple_engine as engine;

/// Common imports for typical Ripple usage.
pub mod prelude {
    // Core types
    pub use ripple_core::{ConfigError, DepthBounds, Direction, DisturbanceEvent, FrameId, TileId};

    // Storage
    pub use ripple_field::{TileGrid, TileTopology};

    // Propagation
    pub use ripple_propagator::{ColorMapper, PropagationStep};

    // Engine
    pub use ripple_engine::{
        EngineConfig, EngineContext, EngineWorker, FrameResult, RainGenerator, Request, Response,
        SweepMetrics, WaveEngine,
    };
}
