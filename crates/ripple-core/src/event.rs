//! External disturbance events.

use crate::id::TileId;

/// A request to force a depth change on the grid.
///
/// Produced by touch input, rain, or a reset control, and applied by the
/// engine at the start of the next frame.
///
/// # Examples
///
/// ```
/// use ripple_core::{DisturbanceEvent, TileId};
///
/// let push = DisturbanceEvent::Push { tile: TileId::new(0, 1), cell: 5 };
/// assert!(matches!(push, DisturbanceEvent::Push { cell: 5, .. }));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DisturbanceEvent {
    /// Force one cell to the minimum depth.
    Push {
        /// Tile containing the cell.
        tile: TileId,
        /// Row-major cell index within the tile.
        cell: usize,
    },
    /// Return every cell of every tile to the baseline depth.
    Reset,
}
