//! Terminal rendering of grids
//!
//! Two renderings are available: a true-color ANSI view (each cell drawn as
//! two colored spaces) and a plain-text coordinate view with row and column
//! headers. Both can overlay a stamp preview.

use image::Rgba;
use std::collections::BTreeSet;

use crate::grid::{Cell, Grid};
use crate::renderer::CellColors;

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Glyph for an on cell in the plain view
pub const ON_GLYPH: char = '#';
/// Glyph for an off cell in the plain view
pub const OFF_GLYPH: char = '.';
/// Glyph for an off cell covered by the stamp preview
pub const PREVIEW_GLYPH: char = '+';

/// Convert RGBA color to ANSI 24-bit background escape sequence.
///
/// Transparent colors (alpha = 0) are rendered as a dark gray background.
///
/// # Examples
///
/// ```
/// use tilepaint::terminal::color_to_ansi_bg;
/// use image::Rgba;
///
/// assert_eq!(color_to_ansi_bg(Rgba([255, 0, 0, 255])), "\x1b[48;2;255;0;0m");
/// assert_eq!(color_to_ansi_bg(Rgba([0, 0, 0, 0])), "\x1b[48;5;236m");
/// ```
pub fn color_to_ansi_bg(rgba: Rgba<u8>) -> String {
    if rgba[3] == 0 {
        "\x1b[48;5;236m".to_string()
    } else {
        format!("\x1b[48;2;{};{};{}m", rgba[0], rgba[1], rgba[2])
    }
}

/// Render a grid with ANSI background colors, two spaces per cell.
pub fn render_ansi_grid(grid: &Grid, preview: &BTreeSet<Cell>, colors: &CellColors) -> String {
    let preview_color = colors.preview();
    let mut output = String::new();
    for (r, row) in grid.rows().iter().enumerate() {
        for (c, &on) in row.iter().enumerate() {
            let color = if on {
                colors.on
            } else if preview.contains(&Cell::new(r as i32, c as i32)) {
                preview_color
            } else {
                colors.off
            };
            output.push_str(&color_to_ansi_bg(color));
            output.push_str("  ");
        }
        output.push_str(ANSI_RESET);
        output.push('\n');
    }
    output
}

/// Render a grid as plain text with coordinate headers.
///
/// ```
/// use tilepaint::grid::{Cell, Grid};
/// use tilepaint::terminal::render_coordinate_grid;
///
/// let mut grid = Grid::empty(3, 2);
/// grid.set(Cell::new(1, 2), true);
/// let text = render_coordinate_grid(&grid, &Default::default());
/// assert_eq!(text, "    0 1 2\n   \u{250C}──────\n 0 │ . . .\n 1 │ . . #\n");
/// ```
pub fn render_coordinate_grid(grid: &Grid, preview: &BTreeSet<Cell>) -> String {
    if grid.is_empty() {
        return String::new();
    }

    let row_num_width = (grid.height() - 1).to_string().len().max(2);
    let mut output = String::new();

    // Column header shows the last digit of each column index
    output.push_str(&" ".repeat(row_num_width + 1));
    for col in 0..grid.width() {
        output.push_str(&format!(" {}", col % 10));
    }
    output.push('\n');

    output.push_str(&" ".repeat(row_num_width));
    output.push_str(" \u{250C}");
    output.push_str(&"\u{2500}".repeat(grid.width() * 2));
    output.push('\n');

    for (r, row) in grid.rows().iter().enumerate() {
        output.push_str(&format!("{:>width$} \u{2502}", r, width = row_num_width));
        for (c, &on) in row.iter().enumerate() {
            let glyph = if on {
                ON_GLYPH
            } else if preview.contains(&Cell::new(r as i32, c as i32)) {
                PREVIEW_GLYPH
            } else {
                OFF_GLYPH
            };
            output.push(' ');
            output.push(glyph);
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_ansi_bg_opaque() {
        assert_eq!(color_to_ansi_bg(Rgba([255, 0, 0, 255])), "\x1b[48;2;255;0;0m");
        assert_eq!(color_to_ansi_bg(Rgba([0, 0, 255, 255])), "\x1b[48;2;0;0;255m");
    }

    #[test]
    fn test_color_to_ansi_bg_transparent() {
        assert_eq!(color_to_ansi_bg(Rgba([255, 0, 0, 0])), "\x1b[48;5;236m");
    }

    #[test]
    fn test_render_ansi_grid_cells() {
        let mut grid = Grid::empty(2, 1);
        grid.set(Cell::new(0, 0), true);
        let colors = CellColors::default();
        let text = render_ansi_grid(&grid, &BTreeSet::new(), &colors);
        let expected = format!(
            "{}  {}  {}\n",
            color_to_ansi_bg(colors.on),
            color_to_ansi_bg(colors.off),
            ANSI_RESET
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_ansi_grid_preview() {
        let grid = Grid::empty(1, 1);
        let colors = CellColors::default();
        let preview: BTreeSet<Cell> = [Cell::new(0, 0)].into_iter().collect();
        let text = render_ansi_grid(&grid, &preview, &colors);
        assert!(text.starts_with(&color_to_ansi_bg(colors.preview())));
    }

    #[test]
    fn test_coordinate_grid_preview_and_clipping() {
        let mut grid = Grid::empty(2, 2);
        grid.set(Cell::new(0, 0), true);
        let preview: BTreeSet<Cell> =
            [Cell::new(0, 0), Cell::new(1, 1), Cell::new(2, 2)].into_iter().collect();
        let text = render_coordinate_grid(&grid, &preview);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[2], " 0 │ # .");
        assert_eq!(lines[3], " 1 │ . +");
    }

    #[test]
    fn test_coordinate_grid_wide_rows() {
        let grid = Grid::empty(12, 11);
        let text = render_coordinate_grid(&grid, &BTreeSet::new());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "    0 1 2 3 4 5 6 7 8 9 0 1");
        assert_eq!(lines[12], "10 │ . . . . . . . . . . . .");
    }

    #[test]
    fn test_empty_grid_renders_nothing() {
        assert_eq!(render_coordinate_grid(&Grid::empty(0, 0), &BTreeSet::new()), "");
    }
}
