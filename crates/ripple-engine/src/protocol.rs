//! Messages exchanged between a consumer and the engine.
//!
//! Both enums are closed: the only way to express an unrecognised message
//! kind is through the byte codec, which rejects unknown tags with
//! [`CodecError::UnknownKind`](crate::codec::CodecError::UnknownKind).

use ripple_core::{ConfigError, FrameId, TileId};

/// Grid layout, depth range, and surface template sent with
/// [`Request::Init`].
#[derive(Clone, Debug, PartialEq)]
pub struct InitParams {
    /// Tiles along the vertical axis.
    pub tile_rows: u32,
    /// Tiles along the horizontal axis.
    pub tile_cols: u32,
    /// Cell rows in every tile.
    pub cells_per_tile_row: usize,
    /// Cell columns in every tile.
    pub cells_per_tile_col: usize,
    /// Lowest representable depth.
    pub min_depth: f32,
    /// Highest representable depth.
    pub max_depth: f32,
    /// Damping factor in `[0, 1)`. `None` derives it from the grid's
    /// total row count.
    pub damping: Option<f32>,
    /// Per-tile starting depths, row-major. Consumed by the engine.
    pub template: Vec<f32>,
}

/// Consumer-to-engine message.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    /// Build the grid. Valid once per engine lifetime.
    Init(InitParams),
    /// Queue a push on `(tile, cell)` for the next frame.
    Disturb {
        /// Target tile.
        tile: TileId,
        /// Row-major cell index within the tile.
        cell: usize,
    },
    /// Queue a flatten-to-baseline for the next frame.
    Reset,
    /// The consumer has taken the previous frame and wants another.
    ReadyForNext,
}

/// Engine-to-consumer message.
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
    /// `Init` succeeded; the engine accepts `ReadyForNext` from now on.
    Initialized {
        /// Total cells across every tile.
        cell_count: usize,
    },
    /// `Init` was refused. The engine stays uninitialized.
    InitFailed(ConfigError),
    /// One completed frame.
    Frame(FrameResult),
}

/// The per-tile output of one frame. Every buffer is freshly allocated
/// and owned by the receiver.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameResult {
    /// Monotonic frame number, starting at 1 for the first frame.
    pub frame: FrameId,
    /// One depth buffer per tile in arena order, `cells_per_tile` long.
    pub positions: Vec<Vec<f32>>,
    /// One flat RGB buffer per tile in arena order, `3 * cells_per_tile` long.
    pub colors: Vec<Vec<f32>>,
}

impl FrameResult {
    /// Number of tiles carried.
    pub fn tile_count(&self) -> usize {
        self.positions.len()
    }

    /// Depths for the tile at `index`.
    pub fn positions_of(&self, index: usize) -> Option<&[f32]> {
        self.positions.get(index).map(Vec::as_slice)
    }

    /// Colours for the tile at `index`.
    pub fn colors_of(&self, index: usize) -> Option<&[f32]> {
        self.colors.get(index).map(Vec::as_slice)
    }
}
