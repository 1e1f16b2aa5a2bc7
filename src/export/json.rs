//! JSON save-file export.
//!
//! Writes the whole document (canvas, tiles and tile size) in the same
//! format the loader and the autosave slot read.

use crate::document::Document;
use crate::export::{ExportOptions, Exporter, Result};

/// JSON format exporter.
#[derive(Debug, Default)]
pub struct JsonExporter;

impl JsonExporter {
    /// Create a new JSON exporter.
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for JsonExporter {
    fn export_to_string(&self, doc: &Document, options: &ExportOptions) -> Result<String> {
        let json = if options.pretty { doc.to_json_pretty()? } else { doc.to_json()? };
        Ok(json)
    }

    fn format_name(&self) -> &'static str {
        "json"
    }

    fn default_file_name(&self, doc: &Document) -> String {
        doc.save_file_name()
    }
}
