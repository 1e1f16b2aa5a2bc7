//! Show command implementation (terminal display)

use std::collections::BTreeSet;

use crate::editor::{Editor, Surface};
use crate::paint::{parse_cell, PointerEvent, Tool};
use crate::renderer::CellColors;
use crate::store::MemoryStore;
use crate::terminal::{render_ansi_grid, render_coordinate_grid};

use super::{resolve_tile, CliError, CliResult, Context};

/// Execute the show command - display the canvas or a tile in the terminal
pub fn run_show(
    ctx: &Context,
    tile: Option<&str>,
    stamp: Option<&str>,
    at: Option<&str>,
    plain: bool,
) -> CliResult {
    let doc = ctx.read_document()?;

    let (grid, preview, title) = match (tile, stamp) {
        (Some(key), _) => {
            let id = resolve_tile(&doc, key)?;
            let tile = doc.tiles.get(&id).ok_or_else(|| {
                CliError::InvalidArgs(format!("tile '{}' not found", key))
            })?;
            (tile.cells.clone(), BTreeSet::new(), format!("tile {} ({})", tile.name, tile.id))
        }
        (None, Some(key)) => {
            let hover = match at {
                Some(at) => parse_cell(at)?,
                None => return Err(CliError::InvalidArgs("--stamp needs --at".to_string())),
            };
            let id = resolve_tile(&doc, key)?;

            // Replay the hover on a throwaway editor to get the same preview
            // the stamp tool would show.
            let mut editor = Editor::with_document(doc.clone(), MemoryStore::new());
            editor.select_tile(&id);
            editor.set_tool(Tool::Stamp);
            editor.pointer(Surface::Canvas, PointerEvent::Enter(hover));
            let preview = editor.preview();
            let title = format!("{} (stamp preview at {})", doc.display_name(), hover);
            (doc.cells.clone(), preview, title)
        }
        (None, None) => (doc.cells.clone(), BTreeSet::new(), doc.display_name().to_string()),
    };

    println!("{} {}x{}", title, grid.width(), grid.height());
    if plain {
        print!("{}", render_coordinate_grid(&grid, &preview));
    } else {
        let render = &ctx.config.render;
        let colors = CellColors::parse(Some(&render.on_color), Some(&render.off_color))?;
        print!("{}", render_ansi_grid(&grid, &preview, &colors));
    }
    Ok(())
}
