//! Integration test: tile-boundary reciprocity.
//!
//! Vertically adjacent cells that sit on either side of a tile edge must
//! see each other through `TileGrid::neighbor_depth`, in both directions,
//! with the depth each one holds in its source buffer.

use proptest::prelude::*;
use ripple_core::{DepthBounds, Direction, TileId};
use ripple_field::{TileGrid, TileTopology};

fn bounds() -> DepthBounds {
    DepthBounds::new(-1.0, 1.0).unwrap()
}

#[test]
fn two_by_one_grid_bottom_and_top_rows_see_each_other() {
    let topo = TileTopology::new(2, 1, 4, 4).unwrap();
    let mut grid = TileGrid::at_baseline(topo, bounds());

    let upper = TileId::new(0, 0);
    let lower = TileId::new(1, 0);
    let upper_cell = topo.cell_index(3, 2);
    let lower_cell = topo.cell_index(0, 2);
    assert_eq!(upper_cell, 14);
    assert_eq!(lower_cell, 2);

    grid.source_mut(upper).unwrap().set(upper_cell, 0.25);
    grid.source_mut(lower).unwrap().set(lower_cell, -0.5);

    assert_eq!(
        grid.neighbor_depth(upper, upper_cell, Direction::Down),
        Some(grid.source(lower).unwrap().get(lower_cell))
    );
    assert_eq!(
        grid.neighbor_depth(lower, lower_cell, Direction::Up),
        Some(grid.source(upper).unwrap().get(upper_cell))
    );
    assert_eq!(grid.neighbor_depth(upper, upper_cell, Direction::Down), Some(-0.5));
    assert_eq!(grid.neighbor_depth(lower, lower_cell, Direction::Up), Some(0.25));
}

#[test]
fn outer_edges_have_no_neighbor() {
    let topo = TileTopology::new(2, 1, 4, 4).unwrap();
    let grid = TileGrid::at_baseline(topo, bounds());
    assert_eq!(grid.neighbor_depth(TileId::new(0, 0), 2, Direction::Up), None);
    assert_eq!(grid.neighbor_depth(TileId::new(1, 0), 14, Direction::Down), None);
    assert_eq!(grid.neighbor_depth(TileId::new(1, 0), 4, Direction::Left), None);
    assert_eq!(grid.neighbor_depth(TileId::new(1, 0), 7, Direction::Right), None);
}

#[test]
fn neighbor_depth_ignores_result_buffer() {
    let topo = TileTopology::new(2, 1, 4, 4).unwrap();
    let mut grid = TileGrid::at_baseline(topo, bounds());
    grid.result_mut(TileId::new(1, 0)).unwrap().set(2, 1.0);
    assert_eq!(
        grid.neighbor_depth(TileId::new(0, 0), 14, Direction::Down),
        Some(0.0)
    );
}

proptest! {
    /// Writing a unique value into every source cell, each neighbour read
    /// through the grid equals the value at the unified-grid neighbour.
    #[test]
    fn stitched_reads_match_unified_grid(
        tr in 1u32..4, tc in 1u32..4, cr in 1usize..5, cc in 1usize..5,
    ) {
        let topo = TileTopology::new(tr, tc, cr, cc).unwrap();
        let mut grid = TileGrid::at_baseline(topo, DepthBounds::new(-1e6, 1e6).unwrap());
        let cols = topo.total_cols();
        let value_at = |gr: usize, gc: usize| (gr * cols + gc) as f32;

        for gr in 0..topo.total_rows() {
            for gc in 0..cols {
                let (tile, cell) = topo.locate(gr, gc).unwrap();
                grid.source_mut(tile).unwrap().set(cell, value_at(gr, gc));
            }
        }

        for gr in 0..topo.total_rows() {
            for gc in 0..cols {
                let (tile, cell) = topo.locate(gr, gc).unwrap();
                for d in Direction::ALL {
                    let (dr, dc) = d.offset();
                    let (nr, nc) = (gr as i64 + dr, gc as i64 + dc);
                    let expected = if nr < 0 || nc < 0
                        || nr as usize >= topo.total_rows() || nc as usize >= cols
                    {
                        None
                    } else {
                        Some(value_at(nr as usize, nc as usize))
                    };
                    prop_assert_eq!(grid.neighbor_depth(tile, cell, d), expected);
                }
            }
        }
    }
}
