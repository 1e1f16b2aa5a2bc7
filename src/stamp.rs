//! Stamp engine: snapping, previews and clipped write-through
//!
//! Stamps are aligned to a lattice of tile-sized blocks anchored at (0, 0),
//! not to the cursor. Pointing anywhere inside a block places the tile at the
//! block's top-left corner.

use std::collections::BTreeSet;

use crate::grid::{Cell, Grid};
use crate::paint::Tool;

/// Snap a cell to the top-left corner of its tile-aligned block.
///
/// Uses floor division, so negative coordinates snap towards negative
/// infinity (`-1` with a tile height of 8 snaps to `-8`). An origin below
/// `i32::MIN` saturates; such blocks are far off any canvas.
pub fn snap_to_tile_origin(cell: Cell, tile_width: usize, tile_height: usize) -> Cell {
    Cell::new(snap_axis(cell.row, tile_height), snap_axis(cell.col, tile_width))
}

fn snap_axis(at: i32, size: usize) -> i32 {
    let size = i64::try_from(size.max(1)).unwrap_or(i64::MAX);
    let origin = i64::from(at).div_euclid(size) * size;
    i32::try_from(origin).unwrap_or(i32::MIN)
}

/// `origin` shifted by a tile-local offset, or `None` past the `i32` range.
fn offset(origin: Cell, row: usize, col: usize) -> Option<Cell> {
    let row = i32::try_from(row).ok().and_then(|r| origin.row.checked_add(r))?;
    let col = i32::try_from(col).ok().and_then(|c| origin.col.checked_add(c))?;
    Some(Cell::new(row, col))
}

/// Absolute coordinates of every on cell of `tile` placed at `origin`.
///
/// Not clipped: entries may lie outside the canvas. Renderers skip them.
/// Cells past the `i32` range are dropped.
pub fn preview_set(tile: &Grid, origin: Cell) -> BTreeSet<Cell> {
    tile.on_cells()
        .filter_map(|c| offset(origin, c.row as usize, c.col as usize))
        .collect()
}

/// Overwrite `grid` with `tile` at `origin`, in place.
///
/// Off tile cells clear the grid. Cells that land outside the grid are
/// skipped. Returns whether any grid cell changed value.
pub fn stamp_in_place(grid: &mut Grid, tile: &Grid, origin: Cell) -> bool {
    let mut changed = false;
    for (r, row) in tile.rows().iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            let Some(target) = offset(origin, r, c) else {
                continue;
            };
            if grid.contains(target) && grid.is_on(target) != value {
                grid.set(target, value);
                changed = true;
            }
        }
    }
    changed
}

/// Return a copy of `grid` with `tile` stamped at `origin`.
pub fn stamp(grid: &Grid, tile: &Grid, origin: Cell) -> Grid {
    let mut next = grid.clone();
    stamp_in_place(&mut next, tile, origin);
    next
}

/// The live stamp overlay for the current hover position.
///
/// Derived on demand from the tool, the selected stamp tile and the hover
/// cell; empty whenever any of them is missing or the pen is active.
pub fn stamp_preview(
    tool: Tool,
    stamp_tile: Option<&Grid>,
    hover: Option<Cell>,
    tile_width: usize,
    tile_height: usize,
) -> BTreeSet<Cell> {
    match (tool, stamp_tile, hover) {
        (Tool::Stamp, Some(tile), Some(hover)) => {
            preview_set(tile, snap_to_tile_origin(hover, tile_width, tile_height))
        }
        _ => BTreeSet::new(),
    }
}
