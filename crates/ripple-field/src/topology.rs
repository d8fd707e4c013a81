//! Tile-grid topology: index arithmetic and cross-tile neighbour resolution.
//!
//! The unified grid is `tile_rows * cell_rows` rows by
//! `tile_cols * cell_cols` columns. Tiles are stored in a flat row-major
//! arena; a neighbour lookup that leaves a tile is resolved by coordinate
//! into the adjacent tile's mirrored edge cell. The outer boundary is
//! open: there is no neighbour past the last tile.

use ripple_core::{ConfigError, Direction, TileId};
use smallvec::SmallVec;

/// Shape of a tiled grid.
///
/// # Examples
///
/// ```
/// use ripple_core::{Direction, TileId};
/// use ripple_field::TileTopology;
///
/// // Two tiles stacked vertically, each 4x4 cells.
/// let topo = TileTopology::new(2, 1, 4, 4).unwrap();
/// assert_eq!(topo.total_rows(), 8);
///
/// // Bottom row of the upper tile sees the top row of the lower tile.
/// let below = topo.neighbor(TileId::new(0, 0), 14, Direction::Down);
/// assert_eq!(below, Some((TileId::new(1, 0), 2)));
///
/// // Nothing above the top edge.
/// assert_eq!(topo.neighbor(TileId::new(0, 0), 2, Direction::Up), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileTopology {
    tile_rows: u32,
    tile_cols: u32,
    cell_rows: usize,
    cell_cols: usize,
}

impl TileTopology {
    /// Largest grid accepted, in cells. Each cell is stored twice (source
    /// and result), so this caps the engine's buffers at 512 MiB.
    pub const MAX_CELLS: usize = 1 << 26;

    /// Create a topology of `tile_rows x tile_cols` tiles, each holding
    /// `cell_rows x cell_cols` cells.
    ///
    /// Returns `Err(ConfigError::ZeroDimension)` if any dimension is zero
    /// and `Err(ConfigError::CellCountOverflow)` if the total cell count
    /// exceeds [`MAX_CELLS`](Self::MAX_CELLS).
    pub fn new(
        tile_rows: u32,
        tile_cols: u32,
        cell_rows: usize,
        cell_cols: usize,
    ) -> Result<Self, ConfigError> {
        for (name, value) in [
            ("tile_rows", tile_rows as usize),
            ("tile_cols", tile_cols as usize),
            ("cells_per_tile_row", cell_rows),
            ("cells_per_tile_col", cell_cols),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroDimension { name });
            }
        }
        let cells = (tile_rows as usize)
            .checked_mul(tile_cols as usize)
            .and_then(|t| t.checked_mul(cell_rows))
            .and_then(|t| t.checked_mul(cell_cols))
            .ok_or(ConfigError::CellCountOverflow)?;
        if cells > Self::MAX_CELLS {
            return Err(ConfigError::CellCountOverflow);
        }
        Ok(Self {
            tile_rows,
            tile_cols,
            cell_rows,
            cell_cols,
        })
    }

    /// Number of tile rows.
    pub fn tile_rows(&self) -> u32 {
        self.tile_rows
    }

    /// Number of tile columns.
    pub fn tile_cols(&self) -> u32 {
        self.tile_cols
    }

    /// Cell rows inside one tile.
    pub fn cell_rows(&self) -> usize {
        self.cell_rows
    }

    /// Cell columns inside one tile.
    pub fn cell_cols(&self) -> usize {
        self.cell_cols
    }

    /// Number of tiles.
    pub fn tile_count(&self) -> usize {
        self.tile_rows as usize * self.tile_cols as usize
    }

    /// Number of cells in one tile.
    pub fn cells_per_tile(&self) -> usize {
        self.cell_rows * self.cell_cols
    }

    /// Number of cells in the whole grid.
    pub fn cell_count(&self) -> usize {
        self.tile_count() * self.cells_per_tile()
    }

    /// Rows of the unified grid.
    pub fn total_rows(&self) -> usize {
        self.tile_rows as usize * self.cell_rows
    }

    /// Columns of the unified grid.
    pub fn total_cols(&self) -> usize {
        self.tile_cols as usize * self.cell_cols
    }

    /// Whether `tile` lies inside the grid.
    pub fn contains_tile(&self, tile: TileId) -> bool {
        tile.row < self.tile_rows && tile.col < self.tile_cols
    }

    /// Whether `(tile, cell)` names a real cell.
    pub fn contains(&self, tile: TileId, cell: usize) -> bool {
        self.contains_tile(tile) && cell < self.cells_per_tile()
    }

    /// Arena index of `tile`, or `None` if it is outside the grid.
    pub fn tile_index(&self, tile: TileId) -> Option<usize> {
        self.contains_tile(tile)
            .then(|| tile.row as usize * self.tile_cols as usize + tile.col as usize)
    }

    /// Tile id at arena index `index`.
    ///
    /// # Panics
    ///
    /// Debug builds panic if `index >= tile_count()`.
    pub fn tile_id(&self, index: usize) -> TileId {
        debug_assert!(index < self.tile_count(), "tile index {index} out of range");
        let cols = self.tile_cols as usize;
        TileId::new((index / cols) as u32, (index % cols) as u32)
    }

    /// `(row, col)` of `cell` within its tile.
    #[inline]
    pub fn cell_row_col(&self, cell: usize) -> (usize, usize) {
        (cell / self.cell_cols, cell % self.cell_cols)
    }

    /// Linear index of the cell at `(row, col)` within a tile.
    #[inline]
    pub fn cell_index(&self, row: usize, col: usize) -> usize {
        row * self.cell_cols + col
    }

    /// Map a unified-grid coordinate to `(tile, cell)`.
    ///
    /// This is what a hit-testing collaborator calls after projecting a
    /// pointer onto the surface. Returns `None` outside the grid.
    pub fn locate(&self, global_row: usize, global_col: usize) -> Option<(TileId, usize)> {
        if global_row >= self.total_rows() || global_col >= self.total_cols() {
            return None;
        }
        let tile = TileId::new(
            (global_row / self.cell_rows) as u32,
            (global_col / self.cell_cols) as u32,
        );
        let cell = self.cell_index(global_row % self.cell_rows, global_col % self.cell_cols);
        Some((tile, cell))
    }

    /// Unified-grid `(row, col)` of `cell` in `tile`. Inverse of [`locate`](Self::locate).
    pub fn global_row_col(&self, tile: TileId, cell: usize) -> (usize, usize) {
        let (r, c) = self.cell_row_col(cell);
        (
            tile.row as usize * self.cell_rows + r,
            tile.col as usize * self.cell_cols + c,
        )
    }

    /// Resolve the neighbour of `(tile, cell)` in `direction`.
    ///
    /// Within the tile this is plain index arithmetic. Across a tile edge
    /// it returns the mirrored edge cell of the adjacent tile: stepping
    /// `Up` out of row 0 lands on the bottom row of the tile above at the
    /// same column. Returns `None` past the outer edge of the grid.
    pub fn neighbor(
        &self,
        tile: TileId,
        cell: usize,
        direction: Direction,
    ) -> Option<(TileId, usize)> {
        let (r, c) = self.cell_row_col(cell);
        let (dr, dc) = direction.offset();
        let (tile_row, row) = step_axis(tile.row, r, dr, self.cell_rows, self.tile_rows)?;
        let (tile_col, col) = step_axis(tile.col, c, dc, self.cell_cols, self.tile_cols)?;
        Some((TileId::new(tile_row, tile_col), self.cell_index(row, col)))
    }

    /// All existing neighbours of `(tile, cell)`, at most four.
    pub fn neighbors(&self, tile: TileId, cell: usize) -> SmallVec<[(TileId, usize); 4]> {
        Direction::ALL
            .iter()
            .filter_map(|&d| self.neighbor(tile, cell, d))
            .collect()
    }
}

/// Move one step along a single axis, crossing into the adjacent tile when
/// the step leaves `[0, len)`. Returns `None` past the outermost tile.
#[inline]
fn step_axis(
    tile: u32,
    pos: usize,
    delta: i64,
    len: usize,
    tiles: u32,
) -> Option<(u32, usize)> {
    let next = pos as i64 + delta;
    if next < 0 {
        let t = tile.checked_sub(1)?;
        Some((t, len - 1))
    } else if next as usize >= len {
        let t = tile + 1;
        (t < tiles).then_some((t, 0))
    } else {
        Some((tile, next as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            TileTopology::new(0, 1, 4, 4),
            Err(ConfigError::ZeroDimension { name: "tile_rows" })
        );
        assert_eq!(
            TileTopology::new(1, 1, 4, 0),
            Err(ConfigError::ZeroDimension {
                name: "cells_per_tile_col"
            })
        );
    }

    #[test]
    fn rejects_overflow() {
        assert_eq!(
            TileTopology::new(u32::MAX, u32::MAX, usize::MAX, 2),
            Err(ConfigError::CellCountOverflow)
        );
    }

    #[test]
    fn oversized_grids_are_refused_before_allocation() {
        assert_eq!(
            TileTopology::new(u32::MAX, u32::MAX, 1, 1),
            Err(ConfigError::CellCountOverflow)
        );
        assert_eq!(
            TileTopology::new(1, 1, TileTopology::MAX_CELLS + 1, 1),
            Err(ConfigError::CellCountOverflow)
        );
        let at_limit = TileTopology::new(1, 1, TileTopology::MAX_CELLS, 1).unwrap();
        assert_eq!(at_limit.cell_count(), TileTopology::MAX_CELLS);
    }

    #[test]
    fn counts() {
        let t = TileTopology::new(2, 3, 4, 5).unwrap();
        assert_eq!(t.tile_count(), 6);
        assert_eq!(t.cells_per_tile(), 20);
        assert_eq!(t.cell_count(), 120);
        assert_eq!(t.total_rows(), 8);
        assert_eq!(t.total_cols(), 15);
    }

    #[test]
    fn tile_index_round_trips() {
        let t = TileTopology::new(3, 4, 2, 2).unwrap();
        for i in 0..t.tile_count() {
            assert_eq!(t.tile_index(t.tile_id(i)), Some(i));
        }
        assert_eq!(t.tile_index(TileId::new(3, 0)), None);
        assert_eq!(t.tile_index(TileId::new(0, 4)), None);
    }

    #[test]
    fn interior_neighbors_stay_in_tile() {
        let t = TileTopology::new(1, 1, 4, 4).unwrap();
        let tile = TileId::new(0, 0);
        assert_eq!(t.neighbor(tile, 5, Direction::Up), Some((tile, 1)));
        assert_eq!(t.neighbor(tile, 5, Direction::Down), Some((tile, 9)));
        assert_eq!(t.neighbor(tile, 5, Direction::Left), Some((tile, 4)));
        assert_eq!(t.neighbor(tile, 5, Direction::Right), Some((tile, 6)));
    }

    #[test]
    fn single_tile_corner_has_two_neighbors() {
        let t = TileTopology::new(1, 1, 4, 4).unwrap();
        let nbs = t.neighbors(TileId::new(0, 0), 0);
        assert_eq!(nbs.len(), 2);
        assert!(nbs.contains(&(TileId::new(0, 0), 1)));
        assert!(nbs.contains(&(TileId::new(0, 0), 4)));
    }

    #[test]
    fn crossing_left_and_right_mirrors_columns() {
        let t = TileTopology::new(1, 2, 3, 3).unwrap();
        // Cell (1,2) of tile (0,0) → cell (1,0) of tile (0,1).
        assert_eq!(
            t.neighbor(TileId::new(0, 0), 5, Direction::Right),
            Some((TileId::new(0, 1), 3))
        );
        assert_eq!(
            t.neighbor(TileId::new(0, 1), 3, Direction::Left),
            Some((TileId::new(0, 0), 5))
        );
        assert_eq!(t.neighbor(TileId::new(0, 1), 5, Direction::Right), None);
    }

    #[test]
    fn crossing_up_reads_bottom_row_of_tile_above() {
        let t = TileTopology::new(2, 1, 4, 4).unwrap();
        assert_eq!(
            t.neighbor(TileId::new(1, 0), 2, Direction::Up),
            Some((TileId::new(0, 0), 14))
        );
    }

    #[test]
    fn locate_examples() {
        let t = TileTopology::new(2, 2, 4, 4).unwrap();
        assert_eq!(t.locate(0, 0), Some((TileId::new(0, 0), 0)));
        assert_eq!(t.locate(5, 6), Some((TileId::new(1, 1), 6)));
        assert_eq!(t.locate(8, 0), None);
        assert_eq!(t.global_row_col(TileId::new(1, 1), 6), (5, 6));
    }

    proptest! {
        #[test]
        fn neighbor_matches_unified_grid(
            tr in 1u32..4, tc in 1u32..4, cr in 1usize..6, cc in 1usize..6,
            gr_seed in 0usize..1000, gc_seed in 0usize..1000, dir in 0usize..4,
        ) {
            let t = TileTopology::new(tr, tc, cr, cc).unwrap();
            let gr = gr_seed % t.total_rows();
            let gc = gc_seed % t.total_cols();
            let (tile, cell) = t.locate(gr, gc).unwrap();
            let d = Direction::ALL[dir];
            let (dr, dc) = d.offset();
            let ngr = gr as i64 + dr;
            let ngc = gc as i64 + dc;
            let expected = if ngr < 0 || ngc < 0 {
                None
            } else {
                t.locate(ngr as usize, ngc as usize)
            };
            prop_assert_eq!(t.neighbor(tile, cell, d), expected);
        }

        #[test]
        fn neighbor_is_reciprocal(
            tr in 1u32..4, tc in 1u32..4, cr in 1usize..6, cc in 1usize..6,
            gr_seed in 0usize..1000, gc_seed in 0usize..1000, dir in 0usize..4,
        ) {
            let t = TileTopology::new(tr, tc, cr, cc).unwrap();
            let (tile, cell) = t
                .locate(gr_seed % t.total_rows(), gc_seed % t.total_cols())
                .unwrap();
            let d = Direction::ALL[dir];
            if let Some((nt, nc)) = t.neighbor(tile, cell, d) {
                prop_assert_eq!(t.neighbor(nt, nc, d.opposite()), Some((tile, cell)));
            }
        }
    }
}
