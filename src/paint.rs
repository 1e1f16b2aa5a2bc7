//! Pointer-driven painting
//!
//! [`PaintSession`] turns a stream of pointer events into grid mutations.
//! It understands two tools:
//!
//! - **Pen**: the first press decides a paint value (the inverse of the
//!   pressed cell) and every cell entered during the drag is brought to that
//!   value. Re-entering a painted cell does nothing, so a wobbling pointer
//!   never flips cells back and forth.
//! - **Stamp**: the press stamps the selected tile at the snapped origin.
//!   While dragging, a new stamp is committed only when the pointer crosses
//!   into a different tile-aligned block.
//!
//! The session also tracks the hover cell, which drives the stamp preview.
//!
//! # Event scripts
//!
//! Events can be written as text, one per line or separated by `;`:
//!
//! ```text
//! down 3,4; enter 3,5; enter 3,6; up
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::grid::{Cell, Grid};
use crate::stamp::{snap_to_tile_origin, stamp_in_place};

/// Active editing tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand toggle painting
    #[default]
    Pen,
    /// Stamp the selected tile onto tile-aligned blocks
    Stamp,
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Pen => write!(f, "pen"),
            Tool::Stamp => write!(f, "stamp"),
        }
    }
}

/// A pointer event over a grid surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// Button pressed over a cell
    Down(Cell),
    /// Pointer moved onto a cell
    Enter(Cell),
    /// Button released
    Up,
    /// Pointer left the surface
    Leave,
}

impl fmt::Display for PointerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerEvent::Down(cell) => write!(f, "down {}", cell),
            PointerEvent::Enter(cell) => write!(f, "enter {}", cell),
            PointerEvent::Up => write!(f, "up"),
            PointerEvent::Leave => write!(f, "leave"),
        }
    }
}

/// Error parsing an event script.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown event '{0}', expected down, enter, up or leave")]
    UnknownEvent(String),
    #[error("event '{0}' needs a ROW,COL coordinate")]
    MissingCell(String),
    #[error("invalid coordinate '{0}', expected ROW,COL")]
    InvalidCell(String),
    #[error("event '{0}' takes no arguments")]
    UnexpectedArgument(String),
    #[error("event {index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<ScriptError>,
    },
}

/// Parse a `ROW,COL` pair.
pub fn parse_cell(s: &str) -> Result<Cell, ScriptError> {
    let (row, col) = s.split_once(',').ok_or_else(|| ScriptError::InvalidCell(s.to_string()))?;
    let row = row.trim().parse().map_err(|_| ScriptError::InvalidCell(s.to_string()))?;
    let col = col.trim().parse().map_err(|_| ScriptError::InvalidCell(s.to_string()))?;
    Ok(Cell::new(row, col))
}

impl FromStr for PointerEvent {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (kind, rest) = match s.split_once(char::is_whitespace) {
            Some((kind, rest)) => (kind, rest.trim()),
            None => (s, ""),
        };
        let kind_lower = kind.to_lowercase();
        match kind_lower.as_str() {
            "down" | "enter" => {
                if rest.is_empty() {
                    return Err(ScriptError::MissingCell(kind.to_string()));
                }
                let cell = parse_cell(rest)?;
                Ok(if kind_lower == "down" {
                    PointerEvent::Down(cell)
                } else {
                    PointerEvent::Enter(cell)
                })
            }
            "up" | "leave" => {
                if !rest.is_empty() {
                    return Err(ScriptError::UnexpectedArgument(kind.to_string()));
                }
                Ok(if kind_lower == "up" { PointerEvent::Up } else { PointerEvent::Leave })
            }
            _ => Err(ScriptError::UnknownEvent(kind.to_string())),
        }
    }
}

/// Parse an event script. Blank entries and `#` comments are skipped.
pub fn parse_script(script: &str) -> Result<Vec<PointerEvent>, ScriptError> {
    script
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(|line| line.split(';'))
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .map(|(index, entry)| {
            entry
                .parse()
                .map_err(|e| ScriptError::AtIndex { index: index + 1, source: Box::new(e) })
        })
        .collect()
}

/// Drag state of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// Pen drag bringing entered cells to `value`
    Painting { value: bool },
    /// Stamp drag; `last_origin` is the most recently stamped block
    Stamping { last_origin: Cell },
}

/// What a pointer event paints with.
#[derive(Debug, Clone, Copy)]
pub enum Brush<'a> {
    Pen,
    /// Stamp `tile` (if one is selected) on a `tile_width` x `tile_height`
    /// lattice.
    Stamp { tile: Option<&'a Grid>, tile_width: usize, tile_height: usize },
}

impl Brush<'_> {
    pub fn tool(&self) -> Tool {
        match self {
            Brush::Pen => Tool::Pen,
            Brush::Stamp { .. } => Tool::Stamp,
        }
    }
}

/// Transient interaction state for one grid surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaintSession {
    drag: DragState,
    hover: Option<Cell>,
}

impl PaintSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Cell under the pointer, if the pointer is over the surface.
    pub fn hover(&self) -> Option<Cell> {
        self.hover
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != DragState::Idle
    }

    /// Drop drag and hover state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Apply one event to `grid`. Returns whether the grid changed.
    pub fn handle(&mut self, event: PointerEvent, brush: Brush<'_>, grid: &mut Grid) -> bool {
        match event {
            PointerEvent::Down(cell) => {
                self.hover = Some(cell);
                self.press(cell, brush, grid)
            }
            PointerEvent::Enter(cell) => {
                self.hover = Some(cell);
                self.drag_over(cell, brush, grid)
            }
            PointerEvent::Up => {
                self.drag = DragState::Idle;
                false
            }
            PointerEvent::Leave => {
                self.drag = DragState::Idle;
                self.hover = None;
                false
            }
        }
    }

    fn press(&mut self, cell: Cell, brush: Brush<'_>, grid: &mut Grid) -> bool {
        match brush {
            Brush::Pen => {
                let value = !grid.is_on(cell);
                self.drag = DragState::Painting { value };
                let changed = grid.contains(cell);
                grid.toggle(cell);
                changed
            }
            Brush::Stamp { tile: Some(tile), tile_width, tile_height } => {
                let origin = snap_to_tile_origin(cell, tile_width, tile_height);
                self.drag = DragState::Stamping { last_origin: origin };
                stamp_in_place(grid, tile, origin)
            }
            Brush::Stamp { tile: None, .. } => {
                self.drag = DragState::Idle;
                false
            }
        }
    }

    fn drag_over(&mut self, cell: Cell, brush: Brush<'_>, grid: &mut Grid) -> bool {
        match (self.drag, brush) {
            (DragState::Painting { value }, Brush::Pen) => {
                if grid.contains(cell) && grid.is_on(cell) != value {
                    grid.toggle(cell);
                    true
                } else {
                    false
                }
            }
            (
                DragState::Stamping { last_origin },
                Brush::Stamp { tile: Some(tile), tile_width, tile_height },
            ) => {
                let origin = snap_to_tile_origin(cell, tile_width, tile_height);
                if origin == last_origin {
                    return false;
                }
                self.drag = DragState::Stamping { last_origin: origin };
                stamp_in_place(grid, tile, origin)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(session: &mut PaintSession, brush: Brush<'_>, grid: &mut Grid, script: &str) -> usize {
        parse_script(script)
            .unwrap()
            .into_iter()
            .filter(|&e| session.handle(e, brush, grid))
            .count()
    }

    #[test]
    fn test_pen_down_toggles_and_sets_paint_value() {
        let mut grid = Grid::empty(4, 4);
        let mut s = PaintSession::new();
        assert!(s.handle(PointerEvent::Down(Cell::new(1, 1)), Brush::Pen, &mut grid));
        assert!(grid.is_on(Cell::new(1, 1)));
        assert_eq!(s.drag(), DragState::Painting { value: true });
    }

    #[test]
    fn test_pen_repeated_enter_toggles_once() {
        let mut grid = Grid::empty(4, 4);
        let mut s = PaintSession::new();
        let changes = run(&mut s, Brush::Pen, &mut grid, "down 2,2; enter 2,2; enter 2,2; enter 2,2");
        assert_eq!(changes, 1);
        assert!(grid.is_on(Cell::new(2, 2)));
        assert_eq!(grid.count_on(), 1);
    }

    #[test]
    fn test_pen_drag_paints_to_uniform_value() {
        let mut grid = Grid::empty(5, 1);
        grid.set(Cell::new(0, 2), true);
        let mut s = PaintSession::new();
        run(&mut s, Brush::Pen, &mut grid, "down 0,0; enter 0,1; enter 0,2; enter 0,3; enter 0,1; up");
        // (0,2) was already on, so it is left alone
        assert_eq!(grid.rows()[0], vec![true, true, true, true, false]);
        assert_eq!(s.drag(), DragState::Idle);
    }

    #[test]
    fn test_pen_erase_drag() {
        let mut grid = Grid::filled(3, 1);
        let mut s = PaintSession::new();
        run(&mut s, Brush::Pen, &mut grid, "down 0,0; enter 0,1; enter 0,2");
        assert_eq!(grid.count_on(), 0);
    }

    #[test]
    fn test_enter_without_press_only_hovers() {
        let mut grid = Grid::empty(3, 3);
        let mut s = PaintSession::new();
        assert!(!s.handle(PointerEvent::Enter(Cell::new(1, 1)), Brush::Pen, &mut grid));
        assert_eq!(s.hover(), Some(Cell::new(1, 1)));
        assert_eq!(grid.count_on(), 0);
    }

    #[test]
    fn test_up_ends_drag_keeps_hover_leave_clears_both() {
        let mut grid = Grid::empty(3, 3);
        let mut s = PaintSession::new();
        run(&mut s, Brush::Pen, &mut grid, "down 0,0; up");
        assert!(!s.is_dragging());
        assert_eq!(s.hover(), Some(Cell::new(0, 0)));

        // After release, entering a cell must not paint
        run(&mut s, Brush::Pen, &mut grid, "enter 0,1");
        assert!(!grid.is_on(Cell::new(0, 1)));

        run(&mut s, Brush::Pen, &mut grid, "down 1,1; leave");
        assert!(!s.is_dragging());
        assert_eq!(s.hover(), None);
    }

    #[test]
    fn test_pen_out_of_range_is_noop() {
        let mut grid = Grid::empty(2, 2);
        let mut s = PaintSession::new();
        let changes = run(&mut s, Brush::Pen, &mut grid, "down -1,0; enter 5,5; enter 0,0");
        assert_eq!(changes, 1);
        assert_eq!(grid.count_on(), 1);
    }

    #[test]
    fn test_stamp_commits_once_per_block() {
        let mut grid = Grid::empty(8, 8);
        let tile = Grid::filled(4, 4);
        let brush = Brush::Stamp { tile: Some(&tile), tile_width: 4, tile_height: 4 };
        let mut s = PaintSession::new();

        run(&mut s, brush, &mut grid, "down 1,1");
        assert_eq!(s.drag(), DragState::Stamping { last_origin: Cell::new(0, 0) });
        assert_eq!(grid.count_on(), 16);

        // Clear a stamped cell; moving inside the same block must not restamp
        grid.set(Cell::new(0, 0), false);
        run(&mut s, brush, &mut grid, "enter 2,3; enter 3,0");
        assert!(!grid.is_on(Cell::new(0, 0)));

        run(&mut s, brush, &mut grid, "enter 5,5");
        assert_eq!(s.drag(), DragState::Stamping { last_origin: Cell::new(4, 4) });
        assert_eq!(grid.count_on(), 31);
    }

    #[test]
    fn test_stamp_at_i32_extremes_does_not_touch_canvas() {
        let mut grid = Grid::empty(8, 8);
        let tile = Grid::filled(3, 3);
        let brush = Brush::Stamp { tile: Some(&tile), tile_width: 3, tile_height: 3 };
        let mut s = PaintSession::new();
        let script = "down 2147483647,0; enter -2147483648,-2147483648; up";
        assert_eq!(run(&mut s, brush, &mut grid, script), 0);
        assert_eq!(grid.count_on(), 0);
    }

    #[test]
    fn test_stamp_hover_tracked_without_drag() {
        let mut grid = Grid::empty(8, 8);
        let tile = Grid::filled(2, 2);
        let brush = Brush::Stamp { tile: Some(&tile), tile_width: 2, tile_height: 2 };
        let mut s = PaintSession::new();
        run(&mut s, brush, &mut grid, "enter 3,3; enter 6,1");
        assert_eq!(s.hover(), Some(Cell::new(6, 1)));
        assert_eq!(grid.count_on(), 0);
    }

    #[test]
    fn test_stamp_without_tile_does_nothing() {
        let mut grid = Grid::empty(4, 4);
        let brush = Brush::Stamp { tile: None, tile_width: 2, tile_height: 2 };
        let mut s = PaintSession::new();
        assert_eq!(run(&mut s, brush, &mut grid, "down 0,0; enter 2,2"), 0);
        assert!(!s.is_dragging());
        assert_eq!(s.hover(), Some(Cell::new(2, 2)));
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut grid = Grid::empty(3, 3);
        let mut s = PaintSession::new();
        run(&mut s, Brush::Pen, &mut grid, "down 1,1");
        s.reset();
        assert_eq!(s, PaintSession::new());
    }

    #[test]
    fn test_parse_events() {
        assert_eq!("down 3,4".parse::<PointerEvent>(), Ok(PointerEvent::Down(Cell::new(3, 4))));
        assert_eq!("ENTER  -1, 2".parse::<PointerEvent>(), Ok(PointerEvent::Enter(Cell::new(-1, 2))));
        assert_eq!("up".parse::<PointerEvent>(), Ok(PointerEvent::Up));
        assert_eq!(" leave ".parse::<PointerEvent>(), Ok(PointerEvent::Leave));
        assert!(matches!("jump 1,1".parse::<PointerEvent>(), Err(ScriptError::UnknownEvent(_))));
        assert!(matches!("down".parse::<PointerEvent>(), Err(ScriptError::MissingCell(_))));
        assert!(matches!("down 1".parse::<PointerEvent>(), Err(ScriptError::InvalidCell(_))));
        assert!(matches!("up 1,1".parse::<PointerEvent>(), Err(ScriptError::UnexpectedArgument(_))));
    }

    #[test]
    fn test_parse_script_separators_and_comments() {
        let events = parse_script("down 0,0; enter 0,1\n# drag done\nup\n\n").unwrap();
        assert_eq!(
            events,
            vec![
                PointerEvent::Down(Cell::new(0, 0)),
                PointerEvent::Enter(Cell::new(0, 1)),
                PointerEvent::Up,
            ]
        );
        let err = parse_script("down 0,0; bogus").unwrap_err();
        assert_eq!(err.to_string(), "event 2: unknown event 'bogus', expected down, enter, up or leave");
    }

    #[test]
    fn test_event_display_round_trips_through_parse() {
        for e in [PointerEvent::Down(Cell::new(1, 2)), PointerEvent::Up, PointerEvent::Leave] {
            assert_eq!(e.to_string().parse::<PointerEvent>(), Ok(e));
        }
    }
}
