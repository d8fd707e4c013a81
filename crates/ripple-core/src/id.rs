//! Strongly-typed identifiers.

use std::fmt;

/// Position of a tile within the tile grid.
///
/// Tiles are addressed by `(row, col)`; row 0 is the top of the grid
/// and column 0 the left edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    /// Tile row.
    pub row: u32,
    /// Tile column.
    pub col: u32,
}

impl TileId {
    /// Construct a tile id from its row and column.
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(u32, u32)> for TileId {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}

/// Monotonically increasing frame counter.
///
/// Incremented each time the engine completes a sweep.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for FrameId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_id_orders_row_major() {
        let mut ids = vec![TileId::new(1, 0), TileId::new(0, 1), TileId::new(0, 0)];
        ids.sort();
        assert_eq!(
            ids,
            vec![TileId::new(0, 0), TileId::new(0, 1), TileId::new(1, 0)]
        );
    }

    #[test]
    fn tile_id_display() {
        assert_eq!(TileId::from((2, 3)).to_string(), "(2, 3)");
    }
}
