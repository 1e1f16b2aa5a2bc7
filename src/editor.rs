//! Editor state container
//!
//! [`Editor`] owns the [`Document`] together with the transient UI state
//! around it: the active tool, the tile being edited, the tile selected for
//! stamping, and the pointer session. Every change to the document is
//! autosaved through the injected [`DocumentStore`]; store failures are
//! logged and otherwise ignored.
//!
//! Two surfaces accept pointer events: the main canvas (pen or stamp) and the
//! tile editor (always pen, on the tile currently being edited). Moving to a
//! different surface, tool or edited tile drops any drag and hover state.

use clap::ValueEnum;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::document::{Document, DocumentError, LoadReport};
use crate::export::asm::{encode_with, AsmOptions};
use crate::grid::{Cell, Grid, COLS, ROWS};
use crate::paint::{Brush, PaintSession, PointerEvent, Tool};
use crate::stamp::stamp_preview;
use crate::store::{DocumentStore, StoreError};
use crate::tile::{clamp_tile_height, clamp_tile_width, Tile, TileId};

/// Grid surface a pointer event targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Surface {
    /// The main 40x48 canvas
    #[default]
    Canvas,
    /// The tile currently being edited
    #[value(name = "tile")]
    TileEditor,
}

/// The document plus editing state, bound to a store.
#[derive(Debug)]
pub struct Editor<S: DocumentStore> {
    doc: Document,
    store: S,
    tool: Tool,
    selected_tile: Option<TileId>,
    editing_tile: Option<TileId>,
    surface: Surface,
    session: PaintSession,
}

impl<S: DocumentStore> Editor<S> {
    /// Start from whatever the store holds, or the default document.
    pub fn open(store: S) -> Self {
        let doc = match store.load() {
            Some(doc) => {
                debug!(name = %doc.name, tiles = doc.tiles.len(), "restored document");
                doc
            }
            None => Document::default(),
        };
        Self::with_document(doc, store)
    }

    /// Start from an explicit document. Nothing is saved until it changes.
    pub fn with_document(doc: Document, store: S) -> Self {
        Editor {
            doc,
            store,
            tool: Tool::Pen,
            selected_tile: None,
            editing_tile: None,
            surface: Surface::Canvas,
            session: PaintSession::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_parts(self) -> (Document, S) {
        (self.doc, self.store)
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn hover(&self) -> Option<Cell> {
        self.session.hover()
    }

    pub fn session(&self) -> &PaintSession {
        &self.session
    }

    pub fn selected_tile_id(&self) -> Option<&TileId> {
        self.selected_tile.as_ref()
    }

    pub fn editing_tile_id(&self) -> Option<&TileId> {
        self.editing_tile.as_ref()
    }

    /// Tile used by the stamp tool.
    pub fn selected_tile(&self) -> Option<&Tile> {
        self.selected_tile.as_ref().and_then(|id| self.doc.tiles.get(id))
    }

    /// Tile shown in the tile editor.
    pub fn editing_tile(&self) -> Option<&Tile> {
        self.editing_tile.as_ref().and_then(|id| self.doc.tiles.get(id))
    }

    /// Persist the document now.
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.store.save(&self.doc)
    }

    fn commit(&mut self) {
        if let Err(e) = self.store.save(&self.doc) {
            warn!(error = %e, "autosave failed");
        }
    }

    fn reset_session(&mut self) {
        self.session.reset();
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name != self.doc.name {
            self.doc.name = name;
            self.commit();
        }
    }

    /// Reset the canvas to the standard size with every cell off.
    pub fn clear_canvas(&mut self) {
        self.doc.cells = Grid::canvas();
        self.commit();
    }

    /// Reset the canvas to the standard size with every cell on.
    pub fn fill_canvas(&mut self) {
        self.doc.cells = Grid::filled(COLS, ROWS);
        self.commit();
    }

    /// Append a new empty tile at the current tile size and start editing it.
    pub fn add_tile(&mut self) -> TileId {
        let id = self.doc.tiles.create(self.doc.tile_width, self.doc.tile_height);
        info!(id = %id, "tile added");
        self.editing_tile = Some(id.clone());
        self.reset_session();
        self.commit();
        id
    }

    /// Delete a tile, clearing the editing and selected references that
    /// pointed at it. Returns `false` if no such tile exists.
    pub fn delete_tile(&mut self, id: &TileId) -> bool {
        if self.doc.tiles.remove(id).is_none() {
            return false;
        }
        if self.editing_tile.as_ref() == Some(id) {
            self.editing_tile = None;
            self.reset_session();
        }
        if self.selected_tile.as_ref() == Some(id) {
            self.selected_tile = None;
        }
        info!(id = %id, "tile deleted");
        self.commit();
        true
    }

    /// Pick a tile from the library: it becomes the edited tile and, while
    /// the stamp tool is active, the stamp selection too.
    pub fn select_tile(&mut self, id: &TileId) -> bool {
        if !self.doc.tiles.contains(id) {
            return false;
        }
        if self.editing_tile.as_ref() != Some(id) {
            self.editing_tile = Some(id.clone());
            self.reset_session();
        }
        if self.tool == Tool::Stamp {
            self.selected_tile = Some(id.clone());
        }
        true
    }

    pub fn rename_tile(&mut self, id: &TileId, name: impl Into<String>) -> bool {
        let renamed = self.doc.tiles.rename(id, name);
        if renamed {
            self.commit();
        }
        renamed
    }

    /// Switch tools. The stamp tool needs at least one tile; switching to it
    /// adopts the edited tile as the stamp selection.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        if tool == Tool::Stamp && self.doc.tiles.is_empty() {
            debug!("stamp tool unavailable without tiles");
            return false;
        }
        self.tool = tool;
        if tool == Tool::Stamp {
            if let Some(id) = &self.editing_tile {
                self.selected_tile = Some(id.clone());
            }
        }
        self.reset_session();
        true
    }

    /// Change the tile width (clamped to 1..=40), resizing every tile.
    pub fn set_tile_width(&mut self, width: i64) {
        self.set_tile_size(clamp_tile_width(width), self.doc.tile_height);
    }

    /// Change the tile height (clamped to 1..=48), resizing every tile.
    pub fn set_tile_height(&mut self, height: i64) {
        self.set_tile_size(self.doc.tile_width, clamp_tile_height(height));
    }

    fn set_tile_size(&mut self, width: usize, height: usize) {
        self.doc.tile_width = width;
        self.doc.tile_height = height;
        self.doc.tiles.resize_all(width, height);
        self.reset_session();
        self.commit();
    }

    /// Feed a pointer event to a surface. Returns whether the document changed.
    pub fn pointer(&mut self, surface: Surface, event: PointerEvent) -> bool {
        if surface != self.surface {
            self.surface = surface;
            self.reset_session();
        }

        let changed = match surface {
            Surface::Canvas => {
                let brush = match self.tool {
                    Tool::Pen => Brush::Pen,
                    Tool::Stamp => Brush::Stamp {
                        tile: self
                            .selected_tile
                            .as_ref()
                            .and_then(|id| self.doc.tiles.get(id))
                            .map(|t| &t.cells),
                        tile_width: self.doc.tile_width,
                        tile_height: self.doc.tile_height,
                    },
                };
                self.session.handle(event, brush, &mut self.doc.cells)
            }
            Surface::TileEditor => {
                let tile = self.editing_tile.as_ref().and_then(|id| self.doc.tiles.get_mut(id));
                match tile {
                    Some(tile) => self.session.handle(event, Brush::Pen, &mut tile.cells),
                    None => false,
                }
            }
        };

        if changed {
            self.commit();
        }
        changed
    }

    /// Feed a sequence of events to one surface. Returns how many changed
    /// the document.
    pub fn pointer_all(
        &mut self,
        surface: Surface,
        events: impl IntoIterator<Item = PointerEvent>,
    ) -> usize {
        events.into_iter().filter(|&e| self.pointer(surface, e)).count()
    }

    /// Cells the stamp would turn on at the current hover position.
    ///
    /// Only meaningful on the canvas; unclipped, so entries may lie outside
    /// the grid.
    pub fn preview(&self) -> BTreeSet<Cell> {
        if self.surface != Surface::Canvas {
            return BTreeSet::new();
        }
        stamp_preview(
            self.tool,
            self.selected_tile().map(|t| &t.cells),
            self.session.hover(),
            self.doc.tile_width,
            self.doc.tile_height,
        )
    }

    /// Merge a JSON document into the current one.
    ///
    /// On success the tile references are cleared; on failure nothing
    /// changes.
    pub fn load_json(&mut self, text: &str) -> Result<LoadReport, DocumentError> {
        let report = self.doc.apply_json(text)?;
        self.selected_tile = None;
        self.editing_tile = None;
        self.reset_session();
        info!(applied = ?report.applied, ignored = ?report.ignored, "document loaded");
        self.commit();
        Ok(report)
    }

    /// Assembly source for the canvas.
    pub fn export_asm(&self, options: &AsmOptions) -> String {
        encode_with(&self.doc.name, &self.doc.cells, options)
    }
}
