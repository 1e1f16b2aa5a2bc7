//! Export command implementation

use std::path::Path;

use crate::config::{merge_cli_overrides, CliOverrides};
use crate::export::{ExportFormat, ExportOptions};

use super::{CliResult, Context};

/// Execute the export command
#[allow(clippy::too_many_arguments)]
pub fn run_export(
    mut ctx: Context,
    format: ExportFormat,
    output: Option<&Path>,
    stdout: bool,
    directive: Option<String>,
    bytes_per_line: Option<usize>,
    label_colon: bool,
    compact: bool,
) -> CliResult {
    let overrides = CliOverrides {
        directive,
        bytes_per_line,
        label_colon: label_colon.then_some(true),
        ..Default::default()
    };
    merge_cli_overrides(&mut ctx.config, &overrides);

    let doc = ctx.read_document()?;
    let options = ExportOptions { pretty: !compact, asm: ctx.config.export.asm_options() };
    let exporter = format.exporter();

    if stdout {
        print!("{}", exporter.export_to_string(&doc, &options)?);
        return Ok(());
    }

    let store = ctx.store();
    let path = exporter.output_path(&doc, store.path(), output);
    exporter.export(&doc, &path, &options)?;
    eprintln!("Exported {}: {}", exporter.format_name(), path.display());
    Ok(())
}
