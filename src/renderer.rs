//! Grid rendering to image buffers

use image::{Rgba, RgbaImage};
use std::collections::BTreeSet;

use crate::color::{parse_color, ColorError, DEFAULT_OFF_COLOR, DEFAULT_ON_COLOR};
use crate::grid::{Cell, Grid};
use crate::tile::TileSet;

/// Color of the gutter between tiles in a tile sheet
const GUTTER: Rgba<u8> = Rgba([0x2a, 0x2a, 0x3e, 255]);

/// Colors used to draw a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellColors {
    pub on: Rgba<u8>,
    pub off: Rgba<u8>,
}

impl Default for CellColors {
    fn default() -> Self {
        CellColors { on: Rgba([0xF0, 0xE0, 0x40, 255]), off: Rgba([0x11, 0x11, 0x22, 255]) }
    }
}

impl CellColors {
    /// Parse both colors; `None` keeps the default for that slot.
    pub fn parse(on: Option<&str>, off: Option<&str>) -> Result<Self, ColorError> {
        Ok(CellColors {
            on: parse_color(on.unwrap_or(DEFAULT_ON_COLOR))?,
            off: parse_color(off.unwrap_or(DEFAULT_OFF_COLOR))?,
        })
    }

    /// Color for a cell that is off but covered by the stamp preview: the
    /// midpoint between off and on.
    pub fn preview(&self) -> Rgba<u8> {
        let mix = |a: u8, b: u8| ((a as u16 + b as u16) / 2) as u8;
        Rgba([
            mix(self.on[0], self.off[0]),
            mix(self.on[1], self.off[1]),
            mix(self.on[2], self.off[2]),
            255,
        ])
    }
}

/// Render a grid at one pixel per cell.
pub fn render_grid(grid: &Grid, colors: &CellColors) -> RgbaImage {
    render_grid_with_preview(grid, &BTreeSet::new(), colors)
}

/// Render a grid, shading off cells that the stamp preview would turn on.
///
/// Preview entries outside the grid are ignored.
pub fn render_grid_with_preview(
    grid: &Grid,
    preview: &BTreeSet<Cell>,
    colors: &CellColors,
) -> RgbaImage {
    let preview_color = colors.preview();
    let mut image = RgbaImage::from_pixel(grid.width() as u32, grid.height() as u32, colors.off);
    for (r, row) in grid.rows().iter().enumerate() {
        for (c, &on) in row.iter().enumerate() {
            let color = if on {
                colors.on
            } else if preview.contains(&Cell::new(r as i32, c as i32)) {
                preview_color
            } else {
                continue;
            };
            image.put_pixel(c as u32, r as u32, color);
        }
    }
    image
}

/// Render every tile side by side, separated by a one-pixel gutter.
///
/// Returns `None` for an empty tile set.
pub fn render_tile_sheet(tiles: &TileSet, colors: &CellColors) -> Option<RgbaImage> {
    let first = tiles.iter().next()?;
    let (tw, th) = (first.cells.width() as u32, first.cells.height() as u32);
    let count = tiles.len() as u32;
    let width = count * tw + (count - 1);
    let mut sheet = RgbaImage::from_pixel(width, th, GUTTER);

    for (i, tile) in tiles.iter().enumerate() {
        let x0 = i as u32 * (tw + 1);
        let image = render_grid(&tile.cells, colors);
        image::imageops::replace(&mut sheet, &image, x0 as i64, 0);
    }
    Some(sheet)
}
