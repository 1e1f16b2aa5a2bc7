//! Export formats for documents.
//!
//! # Supported Formats
//!
//! - **asm**: byte-packed assembly source of the canvas, one bit per cell
//! - **json**: the document save file
//!
//! # Example
//!
//! ```ignore
//! use tilepaint::document::Document;
//! use tilepaint::export::{AsmExporter, ExportOptions, Exporter};
//!
//! let doc = Document::default();
//! AsmExporter::new().export(&doc, "untitledData.asm".as_ref(), &ExportOptions::default())?;
//! ```

pub mod asm;
pub mod json;

pub use asm::{encode, encode_with, pack_row, sanitize_label, AsmExporter, AsmOptions};
pub use json::JsonExporter;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::document::Document;

/// Common error type for export operations.
#[derive(Debug)]
pub enum ExportError {
    /// IO error during file writing
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "IO error: {}", e),
            ExportError::Serialization(e) => write!(f, "Serialization error: {}", e),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Options for export operations.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Pretty print JSON output (with indentation)
    pub pretty: bool,
    /// Assembly layout
    pub asm: AsmOptions,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { pretty: true, asm: AsmOptions::default() }
    }
}

/// Selectable export format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Assembly byte data
    #[default]
    Asm,
    /// Document save file
    Json,
}

impl ExportFormat {
    pub fn exporter(self) -> Box<dyn Exporter> {
        match self {
            ExportFormat::Asm => Box::new(AsmExporter::new()),
            ExportFormat::Json => Box::new(JsonExporter::new()),
        }
    }
}

/// Trait for export format implementations.
pub trait Exporter {
    /// Render the document in this format.
    fn export_to_string(&self, doc: &Document, options: &ExportOptions) -> Result<String>;

    /// Get the format name for this exporter.
    fn format_name(&self) -> &'static str;

    /// File name used when no output path is given.
    fn default_file_name(&self, doc: &Document) -> String;

    /// Export the document to the specified path.
    fn export(&self, doc: &Document, output_path: &Path, options: &ExportOptions) -> Result<()> {
        let text = self.export_to_string(doc, options)?;
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(output_path, text)?;
        Ok(())
    }

    /// Output path next to `input`, or `output` if one was given.
    fn output_path(&self, doc: &Document, input: &Path, output: Option<&Path>) -> PathBuf {
        match output {
            Some(path) if path.as_os_str().to_string_lossy().ends_with('/') || path.is_dir() => {
                path.join(self.default_file_name(doc))
            }
            Some(path) => path.to_path_buf(),
            None => input.parent().unwrap_or(Path::new("")).join(self.default_file_name(doc)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_options_default() {
        let options = ExportOptions::default();
        assert!(options.pretty);
        assert_eq!(options.asm, AsmOptions::default());
    }

    #[test]
    fn test_export_error_display() {
        let io_err =
            ExportError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"));
        assert!(io_err.to_string().contains("IO error"));

        let ser_err = ExportError::Serialization("invalid json".to_string());
        assert!(ser_err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_output_path_rules() {
        let mut doc = Document::default();
        doc.name = "level".to_string();
        let asm = ExportFormat::Asm.exporter();
        let input = Path::new("maps/level.json");

        assert_eq!(asm.output_path(&doc, input, None), PathBuf::from("maps/levelData.asm"));
        assert_eq!(
            asm.output_path(&doc, input, Some(Path::new("out/"))),
            PathBuf::from("out/levelData.asm")
        );
        assert_eq!(
            asm.output_path(&doc, input, Some(Path::new("x.s"))),
            PathBuf::from("x.s")
        );

        let json = ExportFormat::Json.exporter();
        assert_eq!(json.output_path(&doc, input, None), PathBuf::from("maps/level.json"));
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("sub/out.asm");
        AsmExporter::new().export(&Document::default(), &path, &ExportOptions::default()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("; untitled"));
    }
}
