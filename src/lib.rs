//! Tilepaint - library for editing two-color tile maps
//!
//! This library provides functionality to:
//! - Model a fixed 40x48 boolean canvas and a library of small tiles
//! - Paint with pointer events (pen) or stamp tiles onto tile-aligned blocks
//! - Save, autosave and leniently load documents as JSON
//! - Export the canvas as byte-packed assembly data
//! - Render grids to PNG and to the terminal

pub mod cli;
pub mod color;
pub mod config;
pub mod document;
pub mod editor;
pub mod export;
pub mod grid;
pub mod output;
pub mod paint;
pub mod renderer;
pub mod stamp;
pub mod store;
pub mod terminal;
pub mod tile;
