//! Document editing commands (new, paint, clear, fill, rename, load)

use std::path::Path;

use crate::editor::Surface;
use crate::paint::{parse_script, Tool};
use crate::store::DocumentStore;

use super::{read_source, resolve_tile, CliError, CliResult, Context};

/// Execute the new command
pub fn run_new(
    ctx: &Context,
    name: Option<&str>,
    tile_width: Option<u8>,
    tile_height: Option<u8>,
    force: bool,
) -> CliResult {
    let mut store = ctx.store();
    if store.path().exists() && !force {
        return Err(CliError::InvalidArgs(format!(
            "'{}' already exists (use --force to overwrite)",
            store.path().display()
        )));
    }

    let mut doc = ctx.new_document();
    if let Some(name) = name {
        doc.name = name.to_string();
    }
    if let Some(w) = tile_width {
        doc.tile_width = w as usize;
    }
    if let Some(h) = tile_height {
        doc.tile_height = h as usize;
    }

    store.save(&doc)?;
    eprintln!("Created: {}", store.path().display());
    Ok(())
}

/// Execute the paint command
pub fn run_paint(
    ctx: &Context,
    events: Option<&str>,
    events_file: Option<&Path>,
    tool: Tool,
    tile: Option<&str>,
    surface: Surface,
) -> CliResult {
    let script = match (events, events_file) {
        (Some(script), _) => script.to_string(),
        (None, Some(path)) => read_source(path)?,
        (None, None) => {
            return Err(CliError::InvalidArgs(
                "either --events or --events-file is required".to_string(),
            ))
        }
    };
    let events = parse_script(&script)?;

    let mut editor = ctx.open_editor()?;
    if let Some(key) = tile {
        let id = resolve_tile(editor.document(), key)?;
        editor.select_tile(&id);
    }
    if !editor.set_tool(tool) {
        return Err(CliError::InvalidArgs(
            "the stamp tool needs at least one tile (add one with `tilepaint tile add`)"
                .to_string(),
        ));
    }
    if surface == Surface::TileEditor && editor.editing_tile().is_none() {
        return Err(CliError::InvalidArgs("painting a tile needs --tile".to_string()));
    }

    let total = events.len();
    let changed = editor.pointer_all(surface, events);
    editor.save()?;
    eprintln!(
        "Painted: {} ({} of {} events changed cells)",
        editor.store().path().display(),
        changed,
        total
    );
    Ok(())
}

/// Execute the clear command
pub fn run_clear(ctx: &Context) -> CliResult {
    let mut editor = ctx.open_editor()?;
    editor.clear_canvas();
    editor.save()?;
    eprintln!("Cleared: {}", editor.store().path().display());
    Ok(())
}

/// Execute the fill command
pub fn run_fill(ctx: &Context) -> CliResult {
    let mut editor = ctx.open_editor()?;
    editor.fill_canvas();
    editor.save()?;
    eprintln!("Filled: {}", editor.store().path().display());
    Ok(())
}

/// Execute the rename command
pub fn run_rename(ctx: &Context, name: &str) -> CliResult {
    let mut editor = ctx.open_editor()?;
    editor.set_name(name);
    editor.save()?;
    eprintln!("Renamed: {} -> {}", editor.store().path().display(), editor.document().name);
    Ok(())
}

/// Execute the load command
pub fn run_load(ctx: &Context, source: &Path) -> CliResult {
    let text = read_source(source)?;
    let mut editor = ctx.open_editor()?;
    let report = editor.load_json(&text)?;
    editor.save()?;

    if report.is_empty() {
        eprintln!("Warning: '{}' contained no usable fields", source.display());
    } else {
        println!("Applied: {}", report.applied.join(", "));
    }
    if !report.ignored.is_empty() {
        eprintln!("Ignored malformed fields: {}", report.ignored.join(", "));
    }
    Ok(())
}
