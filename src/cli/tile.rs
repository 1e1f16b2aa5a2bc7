//! Tile library commands

use clap::Subcommand;

use super::{resolve_tile, CliError, CliResult, Context};

#[derive(Subcommand)]
pub enum TileAction {
    /// Add an empty tile at the document's tile size
    Add {
        /// Name of the new tile (default: "tile")
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Remove a tile
    Remove {
        /// Tile id or name
        tile: String,
    },
    /// Rename a tile
    Rename {
        /// Tile id or name
        tile: String,
        /// New name
        name: String,
    },
    /// List tiles in library order
    List,
    /// Change the tile size, cropping or padding every tile
    Resize {
        /// New tile width (clamped to 1-40)
        #[arg(long)]
        width: Option<i64>,
        /// New tile height (clamped to 1-48)
        #[arg(long)]
        height: Option<i64>,
    },
}

/// Execute a tile subcommand
pub fn run_tile(ctx: &Context, action: TileAction) -> CliResult {
    match action {
        TileAction::Add { name } => {
            let mut editor = ctx.open_editor()?;
            let id = editor.add_tile();
            if let Some(name) = name {
                editor.rename_tile(&id, name);
            }
            editor.save()?;
            println!("{}", id);
        }
        TileAction::Remove { tile } => {
            let mut editor = ctx.open_editor()?;
            let id = resolve_tile(editor.document(), &tile)?;
            editor.delete_tile(&id);
            editor.save()?;
            eprintln!("Removed tile {}", id);
        }
        TileAction::Rename { tile, name } => {
            let mut editor = ctx.open_editor()?;
            let id = resolve_tile(editor.document(), &tile)?;
            editor.rename_tile(&id, name);
            editor.save()?;
        }
        TileAction::List => {
            let doc = ctx.read_document()?;
            if doc.tiles.is_empty() {
                eprintln!("No tiles");
            }
            for (i, tile) in doc.tiles.iter().enumerate() {
                println!(
                    "{:>3}  {}  {:<16} {} cells on",
                    i,
                    tile.id,
                    tile.name,
                    tile.cells.count_on()
                );
            }
        }
        TileAction::Resize { width, height } => {
            if width.is_none() && height.is_none() {
                return Err(CliError::InvalidArgs(
                    "tile resize needs --width and/or --height".to_string(),
                ));
            }
            let mut editor = ctx.open_editor()?;
            if let Some(w) = width {
                editor.set_tile_width(w);
            }
            if let Some(h) = height {
                editor.set_tile_height(h);
            }
            editor.save()?;
            let doc = editor.document();
            eprintln!("Tile size: {}x{}", doc.tile_width, doc.tile_height);
        }
    }
    Ok(())
}
