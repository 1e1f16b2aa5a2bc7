//! Boolean cell grids
//!
//! A [`Grid`] is a rectangular matrix of on/off cells. It backs both the main
//! canvas (40x48) and every tile. Grids are never jagged: each row holds
//! exactly `width` cells.
//!
//! The transforming operations come in two flavours: pure ones that return a
//! new grid ([`Grid::toggled`], [`Grid::resized`]) and in-place ones used by
//! the editor so a drag does not reallocate the canvas on every event.

use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Width of the main canvas in cells.
pub const COLS: usize = 40;
/// Height of the main canvas in cells.
pub const ROWS: usize = 48;

/// A signed cell coordinate.
///
/// Coordinates may fall outside any grid (stamp previews near the edge do);
/// only in-range cells address grid storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((row, col): (i32, i32)) -> Self {
        Self { row, col }
    }
}

/// A rectangular on/off matrix, indexed as `cells[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Grid {
    cells: Vec<Vec<bool>>,
    width: usize,
}

impl Grid {
    /// Create a grid with every cell off.
    pub fn empty(width: usize, height: usize) -> Self {
        Self::with_value(width, height, false)
    }

    /// Create a grid with every cell on.
    pub fn filled(width: usize, height: usize) -> Self {
        Self::with_value(width, height, true)
    }

    fn with_value(width: usize, height: usize, value: bool) -> Self {
        Grid { cells: vec![vec![value; width]; height], width }
    }

    /// The default main canvas: `COLS` x `ROWS`, all off.
    pub fn canvas() -> Self {
        Self::empty(COLS, ROWS)
    }

    /// Build a grid from rows, padding short rows with `false` to the widest
    /// row so the result is never jagged.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        let cells = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, false);
                row
            })
            .collect();
        Grid { cells, width }
    }

    /// Coerce an arbitrary JSON value into a grid.
    ///
    /// Returns `None` unless the value is an array of arrays. Inside the rows,
    /// anything that is not `true` reads as off, and jagged rows are padded.
    pub fn from_json_lenient(value: &Value) -> Option<Self> {
        let rows = value.as_array()?;
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let row = row.as_array()?;
            out.push(row.iter().map(|v| v.as_bool().unwrap_or(false)).collect());
        }
        Some(Self::from_rows(out))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Borrow the rows.
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.cells
    }

    /// Convert a signed coordinate into storage indices if it is in range.
    pub fn index_of(&self, cell: Cell) -> Option<(usize, usize)> {
        let row = usize::try_from(cell.row).ok()?;
        let col = usize::try_from(cell.col).ok()?;
        (row < self.height() && col < self.width).then_some((row, col))
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.index_of(cell).is_some()
    }

    /// Value at `(row, col)`, or `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Value at a signed coordinate; out-of-range cells read as off.
    pub fn is_on(&self, cell: Cell) -> bool {
        self.index_of(cell).map(|(r, c)| self.cells[r][c]).unwrap_or(false)
    }

    /// Set a cell. Out-of-range writes are ignored.
    pub fn set(&mut self, cell: Cell, value: bool) {
        if let Some((r, c)) = self.index_of(cell) {
            self.cells[r][c] = value;
        }
    }

    /// Invert a cell in place. Out-of-range coordinates are a no-op.
    pub fn toggle(&mut self, cell: Cell) {
        if let Some((r, c)) = self.index_of(cell) {
            self.cells[r][c] = !self.cells[r][c];
        }
    }

    /// Return a copy with one cell inverted.
    pub fn toggled(&self, cell: Cell) -> Self {
        let mut next = self.clone();
        next.toggle(cell);
        next
    }

    /// Return a grid of the new size. Cells inside both the old and new
    /// bounds keep their value; everything else is off.
    pub fn resized(&self, new_width: usize, new_height: usize) -> Self {
        let cells = (0..new_height)
            .map(|r| (0..new_width).map(|c| self.get(r, c).unwrap_or(false)).collect())
            .collect();
        Grid { cells, width: new_width }
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: bool) {
        for row in &mut self.cells {
            row.iter_mut().for_each(|c| *c = value);
        }
    }

    /// Number of cells that are on.
    pub fn count_on(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.width * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over the coordinates of every cell that is on.
    pub fn on_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, &on)| on)
                .map(move |(c, _)| Cell::new(r as i32, c as i32))
        })
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cells.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Grid::from_json_lenient(&value)
            .ok_or_else(|| D::Error::custom("expected an array of boolean rows"))
    }
}
