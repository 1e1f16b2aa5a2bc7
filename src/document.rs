//! The editable document and its JSON save format
//!
//! A [`Document`] is the unit of save, load and autosave:
//!
//! ```json
//! {
//!   "name": "untitled",
//!   "cols": 40,
//!   "rows": 48,
//!   "cells": [[false, ...], ...],
//!   "tiles": [{"id": "...", "name": "tile", "cells": [[...]]}],
//!   "tileWidth": 8,
//!   "tileHeight": 8
//! }
//! ```
//!
//! Loading is lenient per field and all-or-nothing per call: the whole input
//! is parsed and coerced first, then every well-typed field is applied in
//! one step. Malformed fields are skipped and reported; only unparsable JSON
//! fails, and then the document is left untouched.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::grid::{Grid, COLS, ROWS};
use crate::tile::{
    clamp_tile_height, clamp_tile_width, Tile, TileSet, DEFAULT_TILE_SIZE, MAX_TILE_HEIGHT,
    MAX_TILE_WIDTH,
};

/// Name of a document nobody has named yet.
pub const DEFAULT_NAME: &str = "untitled";

/// Error loading a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Input is not valid JSON
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// Input parsed but the top level is not an object
    #[error("expected a JSON object at the top level, found {0}")]
    NotAnObject(&'static str),
}

/// Which fields a load applied and which it skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub applied: Vec<&'static str>,
    pub ignored: Vec<&'static str>,
}

impl LoadReport {
    pub fn is_empty(&self) -> bool {
        self.applied.is_empty()
    }
}

/// A tile map document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub name: String,
    pub cells: Grid,
    pub tiles: TileSet,
    pub tile_width: usize,
    pub tile_height: usize,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            name: DEFAULT_NAME.to_string(),
            cells: Grid::canvas(),
            tiles: TileSet::new(),
            tile_width: DEFAULT_TILE_SIZE,
            tile_height: DEFAULT_TILE_SIZE,
        }
    }
}

/// On-disk shape. `cols` and `rows` always carry the standard canvas size
/// and are ignored on load.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentFile<'a> {
    name: &'a str,
    cols: usize,
    rows: usize,
    cells: &'a Grid,
    tiles: &'a TileSet,
    tile_width: usize,
    tile_height: usize,
}

/// Fully coerced load input, applied in one go.
#[derive(Debug, Default)]
struct DocumentPatch {
    name: Option<String>,
    cells: Option<Grid>,
    tiles: Option<TileSet>,
    tile_width: Option<usize>,
    tile_height: Option<usize>,
}

impl Document {
    /// Create an empty document with the given name and tile size.
    pub fn new(name: impl Into<String>, tile_width: usize, tile_height: usize) -> Self {
        Document {
            name: name.into(),
            tile_width: tile_width.clamp(1, MAX_TILE_WIDTH),
            tile_height: tile_height.clamp(1, MAX_TILE_HEIGHT),
            ..Document::default()
        }
    }

    /// Build a document from JSON, starting from defaults.
    pub fn from_json(text: &str) -> Result<Self, DocumentError> {
        let mut doc = Document::default();
        doc.apply_json(text)?;
        Ok(doc)
    }

    /// Merge a (possibly partial) JSON document into this one.
    ///
    /// On error nothing changes. After a successful load every tile is
    /// resized to the resulting tile size.
    pub fn apply_json(&mut self, text: &str) -> Result<LoadReport, DocumentError> {
        let value: Value = serde_json::from_str(text)?;
        let obj = match &value {
            Value::Object(obj) => obj,
            Value::Array(_) => return Err(DocumentError::NotAnObject("an array")),
            Value::String(_) => return Err(DocumentError::NotAnObject("a string")),
            Value::Number(_) => return Err(DocumentError::NotAnObject("a number")),
            Value::Bool(_) => return Err(DocumentError::NotAnObject("a boolean")),
            Value::Null => return Err(DocumentError::NotAnObject("null")),
        };

        let (patch, report) = DocumentPatch::coerce(obj);
        self.apply_patch(patch);
        Ok(report)
    }

    fn apply_patch(&mut self, patch: DocumentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(cells) = patch.cells {
            self.cells = cells;
        }
        if let Some(tiles) = patch.tiles {
            self.tiles = tiles;
        }
        if let Some(w) = patch.tile_width {
            self.tile_width = w;
        }
        if let Some(h) = patch.tile_height {
            self.tile_height = h;
        }
        self.tiles.resize_all(self.tile_width, self.tile_height);
    }

    /// Serialize to compact JSON (autosave).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.file_view())
    }

    /// Serialize to indented JSON (save file).
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.file_view())
    }

    fn file_view(&self) -> DocumentFile<'_> {
        DocumentFile {
            name: &self.name,
            cols: COLS,
            rows: ROWS,
            cells: &self.cells,
            tiles: &self.tiles,
            tile_width: self.tile_width,
            tile_height: self.tile_height,
        }
    }

    /// Default file name for a save of this document.
    pub fn save_file_name(&self) -> String {
        format!("{}.json", self.display_name())
    }

    /// The name, or `untitled` when blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            DEFAULT_NAME
        } else {
            &self.name
        }
    }
}

impl DocumentPatch {
    fn coerce(obj: &Map<String, Value>) -> (Self, LoadReport) {
        let mut patch = DocumentPatch::default();
        let mut report = LoadReport::default();

        let mut note = |field: &'static str, present: bool, ok: bool| {
            if ok {
                report.applied.push(field);
            } else if present {
                report.ignored.push(field);
            }
        };

        let name = obj.get("name");
        patch.name = name.and_then(Value::as_str).filter(|s| !s.is_empty()).map(String::from);
        note("name", name.is_some(), patch.name.is_some());

        let cells = obj.get("cells");
        patch.cells = cells.and_then(Grid::from_json_lenient);
        note("cells", cells.is_some(), patch.cells.is_some());

        let tiles = obj.get("tiles");
        patch.tiles = tiles
            .and_then(Value::as_array)
            .map(|arr| TileSet::from_tiles(arr.iter().filter_map(Tile::from_json_lenient)));
        note("tiles", tiles.is_some(), patch.tiles.is_some());

        let width = obj.get("tileWidth");
        patch.tile_width = width.and_then(positive_int).map(clamp_tile_width);
        note("tileWidth", width.is_some(), patch.tile_width.is_some());

        let height = obj.get("tileHeight");
        patch.tile_height = height.and_then(positive_int).map(clamp_tile_height);
        note("tileHeight", height.is_some(), patch.tile_height.is_some());

        (patch, report)
    }
}

/// Any number of at least 1, truncated. `8.0` and `8.5` both read as 8.
fn positive_int(value: &Value) -> Option<i64> {
    value.as_f64().filter(|n| *n >= 1.0).map(|n| n as i64)
}
