//! Render command implementation

use std::path::Path;

use crate::config::{merge_cli_overrides, CliOverrides};
use crate::output::{generate_output_path, save_png, scale_image};
use crate::renderer::{render_grid, render_tile_sheet, CellColors};

use super::{CliError, CliResult, Context};

/// Execute the render command
pub fn run_render(
    mut ctx: Context,
    output: Option<&Path>,
    scale: Option<u8>,
    on_color: Option<String>,
    off_color: Option<String>,
    tiles: bool,
) -> CliResult {
    let overrides = CliOverrides { on_color, off_color, scale, ..Default::default() };
    merge_cli_overrides(&mut ctx.config, &overrides);
    let render = &ctx.config.render;
    let colors = CellColors::parse(Some(&render.on_color), Some(&render.off_color))?;

    let doc = ctx.read_document()?;
    let (image, suffix) = if tiles {
        let sheet = render_tile_sheet(&doc.tiles, &colors)
            .ok_or_else(|| CliError::InvalidArgs("the document has no tiles".to_string()))?;
        (sheet, Some("tiles"))
    } else {
        (render_grid(&doc.cells, &colors), None)
    };

    let image = scale_image(image, render.scale);
    let store = ctx.store();
    let path = generate_output_path(store.path(), suffix, output);
    save_png(&image, &path)?;
    eprintln!("Saved: {}", path.display());
    Ok(())
}
