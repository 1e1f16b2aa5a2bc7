//! Info command implementation

use serde::Serialize;

use crate::export::sanitize_label;

use super::{CliResult, Context};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TileSummary<'a> {
    id: &'a str,
    name: &'a str,
    cells_on: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocumentSummary<'a> {
    name: &'a str,
    label: String,
    cols: usize,
    rows: usize,
    cells_on: usize,
    bytes_per_row: usize,
    tile_width: usize,
    tile_height: usize,
    tiles: Vec<TileSummary<'a>>,
}

/// Execute the info command
pub fn run_info(ctx: &Context, json: bool) -> CliResult {
    let doc = ctx.read_document()?;
    let summary = DocumentSummary {
        name: &doc.name,
        label: format!("{}{}", sanitize_label(&doc.name), ctx.config.export.label_suffix),
        cols: doc.cells.width(),
        rows: doc.cells.height(),
        cells_on: doc.cells.count_on(),
        bytes_per_row: doc.cells.width().div_ceil(8),
        tile_width: doc.tile_width,
        tile_height: doc.tile_height,
        tiles: doc
            .tiles
            .iter()
            .map(|t| TileSummary { id: t.id.as_str(), name: &t.name, cells_on: t.cells.count_on() })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Name:       {}", summary.name);
    println!("Label:      {}", summary.label);
    println!(
        "Canvas:     {}x{} ({} cells on, {} bytes per row)",
        summary.cols, summary.rows, summary.cells_on, summary.bytes_per_row
    );
    println!("Tile size:  {}x{}", summary.tile_width, summary.tile_height);
    println!("Tiles:      {}", summary.tiles.len());
    for tile in &summary.tiles {
        println!("  {}  {} ({} cells on)", tile.id, tile.name, tile.cells_on);
    }
    Ok(())
}
