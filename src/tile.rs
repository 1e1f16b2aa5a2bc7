//! Tiles and the tile library
//!
//! A [`Tile`] is a named sub-grid that can be stamped onto the main canvas.
//! Every tile in a [`TileSet`] has the same dimensions: the document-wide
//! tile size. Changing that size resizes all tiles at once.

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::grid::Grid;

/// Largest allowed tile width (the canvas width).
pub const MAX_TILE_WIDTH: usize = crate::grid::COLS;
/// Largest allowed tile height (the canvas height).
pub const MAX_TILE_HEIGHT: usize = crate::grid::ROWS;
/// Tile size used when nothing else is configured.
pub const DEFAULT_TILE_SIZE: usize = 8;
/// Name given to freshly created tiles.
pub const DEFAULT_TILE_NAME: &str = "tile";

/// Opaque tile identifier, stable for the tile's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(String);

impl TileId {
    /// Generate a random UUID-shaped identifier.
    pub fn generate() -> Self {
        let bits: u128 = rand::thread_rng().gen();
        let hex = format!("{:032x}", bits);
        TileId(format!(
            "{}-{}-4{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[13..16],
            &hex[16..20],
            &hex[20..32]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TileId {
    fn from(s: &str) -> Self {
        TileId(s.to_string())
    }
}

impl From<String> for TileId {
    fn from(s: String) -> Self {
        TileId(s)
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, stampable sub-grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub name: String,
    pub cells: Grid,
}

impl Tile {
    /// Create an empty tile with a fresh id and the default name.
    pub fn new(width: usize, height: usize) -> Self {
        Tile {
            id: TileId::generate(),
            name: DEFAULT_TILE_NAME.to_string(),
            cells: Grid::empty(width, height),
        }
    }

    /// Coerce a loosely-typed JSON tile.
    ///
    /// The entry must be an object. A missing or non-string id gets a fresh
    /// one, a missing name becomes `"tile"`, and malformed cells become an
    /// empty 0x0 grid (the caller resizes to the tile size afterwards).
    pub fn from_json_lenient(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = match obj.get("id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => TileId::from(id),
            _ => TileId::generate(),
        };
        let name = obj
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_TILE_NAME)
            .to_string();
        let cells = obj.get("cells").and_then(Grid::from_json_lenient).unwrap_or_default();
        Some(Tile { id, name, cells })
    }
}

/// Clamp a requested tile width into `1..=MAX_TILE_WIDTH`.
pub fn clamp_tile_width(width: i64) -> usize {
    width.clamp(1, MAX_TILE_WIDTH as i64) as usize
}

/// Clamp a requested tile height into `1..=MAX_TILE_HEIGHT`.
pub fn clamp_tile_height(height: i64) -> usize {
    height.clamp(1, MAX_TILE_HEIGHT as i64) as usize
}

/// Insertion-ordered tile collection with unique ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl TileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set, dropping later tiles whose id is already present.
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Self {
        let mut set = TileSet::new();
        for tile in tiles {
            set.push(tile);
        }
        set
    }

    /// Append a tile. Returns `false` (and leaves the set alone) if a tile
    /// with the same id already exists.
    pub fn push(&mut self, tile: Tile) -> bool {
        if self.contains(&tile.id) {
            return false;
        }
        self.tiles.push(tile);
        true
    }

    /// Create a fresh empty tile, append it and return its id.
    pub fn create(&mut self, width: usize, height: usize) -> TileId {
        let tile = Tile::new(width, height);
        let id = tile.id.clone();
        self.tiles.push(tile);
        id
    }

    /// Remove the tile with `id`. Returns the removed tile, if any.
    pub fn remove(&mut self, id: &TileId) -> Option<Tile> {
        let idx = self.position(id)?;
        Some(self.tiles.remove(idx))
    }

    /// Resize every tile's cells, keeping ids, names and order.
    pub fn resize_all(&mut self, width: usize, height: usize) {
        for tile in &mut self.tiles {
            tile.cells = tile.cells.resized(width, height);
        }
    }

    pub fn get(&self, id: &TileId) -> Option<&Tile> {
        self.tiles.iter().find(|t| &t.id == id)
    }

    pub fn get_mut(&mut self, id: &TileId) -> Option<&mut Tile> {
        self.tiles.iter_mut().find(|t| &t.id == id)
    }

    pub fn contains(&self, id: &TileId) -> bool {
        self.get(id).is_some()
    }

    pub fn position(&self, id: &TileId) -> Option<usize> {
        self.tiles.iter().position(|t| &t.id == id)
    }

    /// First tile with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.name == name)
    }

    /// Resolve a user-supplied reference: an exact id first, then a name.
    pub fn resolve(&self, key: &str) -> Option<&Tile> {
        self.get(&TileId::from(key)).or_else(|| self.find_by_name(key))
    }

    /// Rename a tile. Returns `false` if the id is unknown.
    pub fn rename(&mut self, id: &TileId, name: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(tile) => {
                tile.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

impl<'a> IntoIterator for &'a TileSet {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use serde_json::json;

    #[test]
    fn test_new_tile_defaults() {
        let tile = Tile::new(8, 4);
        assert_eq!(tile.name, "tile");
        assert_eq!(tile.cells.width(), 8);
        assert_eq!(tile.cells.height(), 4);
        assert_eq!(tile.cells.count_on(), 0);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = TileId::generate();
        let b = TileId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
        assert_eq!(a.as_str().matches('-').count(), 4);
    }

    #[test]
    fn test_resize_all_preserves_identity_and_order() {
        let mut set = TileSet::new();
        let first = set.create(4, 4);
        let second = set.create(4, 4);
        set.rename(&second, "wall");
        set.get_mut(&first).unwrap().cells.set(Cell::new(1, 1), true);
        set.get_mut(&first).unwrap().cells.set(Cell::new(3, 3), true);

        set.resize_all(2, 6);

        let ids: Vec<&TileId> = set.iter().map(|t| &t.id).collect();
        assert_eq!(ids, vec![&first, &second]);
        let t = set.get(&first).unwrap();
        assert_eq!((t.cells.width(), t.cells.height()), (2, 6));
        assert!(t.cells.is_on(Cell::new(1, 1)));
        assert_eq!(t.cells.count_on(), 1);
        assert_eq!(set.get(&second).unwrap().name, "wall");
    }

    #[test]
    fn test_remove() {
        let mut set = TileSet::new();
        let a = set.create(2, 2);
        let b = set.create(2, 2);
        assert!(set.remove(&a).is_some());
        assert!(!set.contains(&a));
        assert!(set.contains(&b));
        // Absent id is a no-op
        assert!(set.remove(&TileId::from("missing")).is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let tile = Tile::new(2, 2);
        let mut set = TileSet::new();
        assert!(set.push(tile.clone()));
        assert!(!set.push(tile));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_resolve_by_id_then_name() {
        let mut set = TileSet::new();
        let id = set.create(2, 2);
        set.rename(&id, "brick");
        assert_eq!(set.resolve(id.as_str()).unwrap().id, id);
        assert_eq!(set.resolve("brick").unwrap().id, id);
        assert!(set.resolve("stone").is_none());
    }

    #[test]
    fn test_clamp_tile_size() {
        assert_eq!(clamp_tile_width(0), 1);
        assert_eq!(clamp_tile_width(-3), 1);
        assert_eq!(clamp_tile_width(16), 16);
        assert_eq!(clamp_tile_width(99), 40);
        assert_eq!(clamp_tile_height(99), 48);
    }

    #[test]
    fn test_tile_from_json_lenient() {
        let t = Tile::from_json_lenient(&json!({"id": "abc", "cells": [[true, false]]})).unwrap();
        assert_eq!(t.id.as_str(), "abc");
        assert_eq!(t.name, "tile");
        assert_eq!(t.cells.count_on(), 1);

        let t = Tile::from_json_lenient(&json!({"name": "x", "cells": 5})).unwrap();
        assert_eq!(t.name, "x");
        assert!(t.cells.is_empty());

        assert!(Tile::from_json_lenient(&json!([1])).is_none());
    }

    #[test]
    fn test_tileset_serializes_as_array() {
        let mut set = TileSet::new();
        set.push(Tile { id: "t1".into(), name: "a".into(), cells: Grid::empty(1, 1) });
        let text = serde_json::to_string(&set).unwrap();
        assert_eq!(text, r#"[{"id":"t1","name":"a","cells":[[false]]}]"#);
    }
}
