//! Assembly byte-data export.
//!
//! Packs the canvas into bytes, eight horizontally adjacent cells per byte,
//! most significant bit first, and emits assembler source:
//!
//! ```text
//! ; level1 (40x48, 5 bytes per row)
//! level1Data
//!     .byte $F8,$00,$00,$00,$00
//!     ...
//! ```
//!
//! Each row is packed on its own. When the width is not a multiple of 8 the
//! last byte of the row is padded with zero bits on the low end. The output
//! depends only on the name, the grid and the options.

use regex::Regex;
use std::fmt::Write as _;
use std::sync::OnceLock;

use crate::document::{Document, DEFAULT_NAME};
use crate::export::{ExportOptions, Exporter, Result};
use crate::grid::Grid;

/// Layout knobs for the assembly output. The defaults give the canonical
/// format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmOptions {
    /// Data directive placed before each byte list
    pub directive: String,
    /// Appended to the sanitized name to form the label
    pub label_suffix: String,
    /// Bytes per output line; 0 writes one line per grid row
    pub bytes_per_line: usize,
    /// Terminate the label with `:`
    pub label_colon: bool,
}

impl Default for AsmOptions {
    fn default() -> Self {
        AsmOptions {
            directive: ".byte".to_string(),
            label_suffix: "Data".to_string(),
            bytes_per_line: 0,
            label_colon: false,
        }
    }
}

fn non_symbol_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^A-Za-z0-9_]").expect("static regex is valid"))
}

/// Turn a document name into a valid assembler symbol.
///
/// Characters outside `[A-Za-z0-9_]` are dropped, a leading digit gets a `_`
/// prefix, and an empty result falls back to `untitled`.
pub fn sanitize_label(name: &str) -> String {
    let stripped = non_symbol_chars().replace_all(name, "");
    if stripped.is_empty() {
        DEFAULT_NAME.to_string()
    } else if stripped.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", stripped)
    } else {
        stripped.into_owned()
    }
}

/// Pack one row of cells into bytes, MSB first, zero padded.
pub fn pack_row(row: &[bool]) -> Vec<u8> {
    row.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, &on)| if on { byte | (0x80 >> i) } else { byte })
        })
        .collect()
}

/// Encode with the default layout.
pub fn encode(name: &str, grid: &Grid) -> String {
    encode_with(name, grid, &AsmOptions::default())
}

/// Encode a grid as assembly source.
pub fn encode_with(name: &str, grid: &Grid, options: &AsmOptions) -> String {
    let bytes_per_row = grid.width().div_ceil(8);
    let comment_name = name.replace(['\r', '\n'], " ");
    let mut out = String::new();

    let _ = writeln!(
        out,
        "; {} ({}x{}, {} bytes per row)",
        comment_name,
        grid.width(),
        grid.height(),
        bytes_per_row
    );
    let _ = writeln!(
        out,
        "{}{}{}",
        sanitize_label(name),
        options.label_suffix,
        if options.label_colon { ":" } else { "" }
    );

    let rows: Vec<Vec<u8>> = grid.rows().iter().map(|row| pack_row(row)).collect();
    if options.bytes_per_line == 0 {
        for row in rows.iter().filter(|r| !r.is_empty()) {
            write_byte_line(&mut out, &options.directive, row);
        }
    } else {
        let all: Vec<u8> = rows.into_iter().flatten().collect();
        for line in all.chunks(options.bytes_per_line) {
            write_byte_line(&mut out, &options.directive, line);
        }
    }
    out
}

fn write_byte_line(out: &mut String, directive: &str, bytes: &[u8]) {
    let list: Vec<String> = bytes.iter().map(|b| format!("${:02X}", b)).collect();
    let _ = writeln!(out, "    {} {}", directive, list.join(","));
}

/// Assembly format exporter.
#[derive(Debug, Default)]
pub struct AsmExporter;

impl AsmExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for AsmExporter {
    fn export_to_string(&self, doc: &Document, options: &ExportOptions) -> Result<String> {
        Ok(encode_with(&doc.name, &doc.cells, &options.asm))
    }

    fn format_name(&self) -> &'static str {
        "asm"
    }

    fn default_file_name(&self, doc: &Document) -> String {
        format!("{}Data.asm", sanitize_label(doc.display_name()))
    }
}
