//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations. Every command works on one
//! document: the file given with `--file`, or the autosave slot when no file
//! is given.

mod edit;
mod export;
mod info;
mod render;
mod show;
mod tile;

use clap::{ArgAction, Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::color::ColorError;
use crate::config::{load_config, ConfigError, TilepaintConfig};
use crate::document::{Document, DocumentError};
use crate::editor::{Editor, Surface};
use crate::export::{ExportError, ExportFormat};
use crate::output::OutputError;
use crate::paint::{ScriptError, Tool};
use crate::store::{DocumentStore, FileStore, StoreError};
use crate::tile::TileId;

pub use tile::TileAction;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Tilepaint - edit two-color tile maps and export them as assembly data
#[derive(Parser)]
#[command(name = "tilepaint")]
#[command(about = "Tilepaint - edit two-color tile maps and export them as assembly byte data")]
#[command(version)]
pub struct Cli {
    /// Document file (default: the autosave slot)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Configuration file (default: nearest tilepaint.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new empty document
    New {
        /// Document name (default: from config, then "untitled")
        #[arg(short, long)]
        name: Option<String>,

        /// Tile width (1-40)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=40))]
        tile_width: Option<u8>,

        /// Tile height (1-48)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=48))]
        tile_height: Option<u8>,

        /// Overwrite an existing document
        #[arg(long)]
        force: bool,
    },
    /// Print a summary of the document
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replay pointer events onto the canvas or a tile
    Paint {
        /// Event script, e.g. "down 3,4; enter 3,5; up"
        #[arg(short, long, conflicts_with = "events_file")]
        events: Option<String>,

        /// Read the event script from a file ("-" for stdin)
        #[arg(long)]
        events_file: Option<PathBuf>,

        /// Tool used on the canvas
        #[arg(short, long, value_enum, default_value = "pen")]
        tool: Tool,

        /// Tile (id or name) to stamp with or to edit
        #[arg(long)]
        tile: Option<String>,

        /// Surface receiving the events
        #[arg(short, long, value_enum, default_value = "canvas")]
        surface: Surface,
    },
    /// Turn every canvas cell off
    Clear,
    /// Turn every canvas cell on
    Fill,
    /// Rename the document
    Rename {
        /// New document name
        name: String,
    },
    /// Manage the tile library
    Tile {
        #[command(subcommand)]
        action: TileAction,
    },
    /// Merge a JSON document into the current one
    Load {
        /// JSON file to load ("-" for stdin)
        source: PathBuf,
    },
    /// Export the canvas as assembly data or the document as JSON
    Export {
        /// Output format
        #[arg(long, value_enum, default_value = "asm")]
        format: ExportFormat,

        /// Output file or directory (default: next to the document)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Write to stdout instead of a file
        #[arg(long)]
        stdout: bool,

        /// Data directive (default: .byte)
        #[arg(long)]
        directive: Option<String>,

        /// Bytes per line (0 = one line per grid row)
        #[arg(long)]
        bytes_per_line: Option<usize>,

        /// Terminate the label with a colon
        #[arg(long)]
        label_colon: bool,

        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },
    /// Render the canvas (or the tile sheet) to PNG
    Render {
        /// Output file or directory (default: next to the document)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Scale output by integer factor (1-64)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=64))]
        scale: Option<u8>,

        /// Color of on cells (#RRGGBB or a name)
        #[arg(long)]
        on_color: Option<String>,

        /// Color of off cells (#RRGGBB or a name)
        #[arg(long)]
        off_color: Option<String>,

        /// Render every tile side by side instead of the canvas
        #[arg(long)]
        tiles: bool,
    },
    /// Show the canvas or a tile in the terminal
    Show {
        /// Show this tile (id or name) instead of the canvas
        #[arg(long, conflicts_with = "stamp")]
        tile: Option<String>,

        /// Overlay the preview of stamping this tile (id or name)
        #[arg(long, requires = "at")]
        stamp: Option<String>,

        /// Hover cell for the stamp preview, as ROW,COL
        #[arg(long)]
        at: Option<String>,

        /// Plain text with coordinates instead of ANSI colors
        #[arg(long)]
        plain: bool,
    },
}

/// Failure of a command, mapped to an exit code.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    InvalidArgs(String),
    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{}: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
    #[error(transparent)]
    Load(#[from] DocumentError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error(transparent)]
    Color(#[from] ColorError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::InvalidArgs(_) | CliError::Script(_) | CliError::Color(_) => {
                EXIT_INVALID_ARGS
            }
            _ => EXIT_ERROR,
        }
    }
}

pub(crate) type CliResult = Result<(), CliError>;

/// Settings shared by every command.
pub(crate) struct Context {
    pub file: Option<PathBuf>,
    pub config: TilepaintConfig,
}

impl Context {
    /// Store backing the current document.
    pub fn store(&self) -> FileStore {
        match &self.file {
            Some(path) => FileStore::new(path),
            None => {
                let dir = self.config.editor.autosave_dir.as_deref().unwrap_or(Path::new("."));
                FileStore::autosave_in(dir)
            }
        }
    }

    /// A fresh document using the configured defaults.
    pub fn new_document(&self) -> Document {
        let editor = &self.config.editor;
        Document::new(&editor.default_name, editor.tile_width, editor.tile_height)
    }

    /// Load the current document for reading.
    ///
    /// An explicit file must exist and parse. The autosave slot falls back to
    /// a fresh document when it is missing or corrupt.
    pub fn read_document(&self) -> Result<Document, CliError> {
        match &self.file {
            Some(path) => {
                let text = read_source(path)?;
                Document::from_json(&text)
                    .map_err(|source| CliError::Document { path: path.clone(), source })
            }
            None => Ok(self.store().load().unwrap_or_else(|| self.new_document())),
        }
    }

    /// Open the current document for editing; changes autosave to its store.
    pub fn open_editor(&self) -> Result<Editor<FileStore>, CliError> {
        let doc = self.read_document()?;
        debug!(path = %self.store().path().display(), "editing document");
        Ok(Editor::with_document(doc, self.store()))
    }
}

/// Read a file, or stdin for "-".
pub(crate) fn read_source(path: &Path) -> Result<String, CliError> {
    let result = if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map(|_| text)
    } else {
        fs::read_to_string(path)
    };
    result.map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}

/// Find a tile by id, then by name.
pub(crate) fn resolve_tile(doc: &Document, key: &str) -> Result<TileId, CliError> {
    doc.tiles.resolve(key).map(|t| t.id.clone()).ok_or_else(|| {
        let known: Vec<&str> = doc.tiles.iter().map(|t| t.name.as_str()).collect();
        if known.is_empty() {
            CliError::InvalidArgs(format!("tile '{}' not found: the document has no tiles", key))
        } else {
            CliError::InvalidArgs(format!(
                "tile '{}' not found. Available tiles: {}",
                key,
                known.join(", ")
            ))
        }
    })
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn load_context(cli: &Cli) -> Result<Context, ConfigError> {
    let config = load_config(cli.config.as_deref())?;
    Ok(Context { file: cli.file.clone(), config })
}

/// Parse arguments, run the command and map the outcome to an exit code.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = match load_context(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let result = match cli.command {
        Commands::New { name, tile_width, tile_height, force } => {
            edit::run_new(&ctx, name.as_deref(), tile_width, tile_height, force)
        }
        Commands::Info { json } => info::run_info(&ctx, json),
        Commands::Paint { events, events_file, tool, tile, surface } => edit::run_paint(
            &ctx,
            events.as_deref(),
            events_file.as_deref(),
            tool,
            tile.as_deref(),
            surface,
        ),
        Commands::Clear => edit::run_clear(&ctx),
        Commands::Fill => edit::run_fill(&ctx),
        Commands::Rename { name } => edit::run_rename(&ctx, &name),
        Commands::Tile { action } => tile::run_tile(&ctx, action),
        Commands::Load { source } => edit::run_load(&ctx, &source),
        Commands::Export {
            format,
            output,
            stdout,
            directive,
            bytes_per_line,
            label_colon,
            compact,
        } => export::run_export(
            ctx,
            format,
            output.as_deref(),
            stdout,
            directive,
            bytes_per_line,
            label_colon,
            compact,
        ),
        Commands::Render { output, scale, on_color, off_color, tiles } => {
            render::run_render(ctx, output.as_deref(), scale, on_color, off_color, tiles)
        }
        Commands::Show { tile, stamp, at, plain } => {
            show::run_show(&ctx, tile.as_deref(), stamp.as_deref(), at.as_deref(), plain)
        }
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::TempDir;

    fn context(file: Option<PathBuf>) -> Context {
        Context { file, config: TilepaintConfig::default() }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_paint_with_global_file_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tilepaint",
            "paint",
            "--events",
            "down 0,0; up",
            "--tool",
            "stamp",
            "-f",
            "doc.json",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("doc.json")));
        match cli.command {
            Commands::Paint { tool, surface, events, .. } => {
                assert_eq!(tool, Tool::Stamp);
                assert_eq!(surface, Surface::Canvas);
                assert_eq!(events.as_deref(), Some("down 0,0; up"));
            }
            _ => panic!("expected paint"),
        }
    }

    #[test]
    fn test_parse_tile_surface_name() {
        let cli =
            Cli::try_parse_from(["tilepaint", "paint", "-e", "up", "--surface", "tile"]).unwrap();
        assert!(matches!(cli.command, Commands::Paint { surface: Surface::TileEditor, .. }));
    }

    #[test]
    fn test_show_stamp_requires_at() {
        assert!(Cli::try_parse_from(["tilepaint", "show", "--stamp", "a"]).is_err());
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(CliError::InvalidArgs("x".into()).exit_code(), EXIT_INVALID_ARGS);
        assert_eq!(CliError::Color(ColorError::Empty).exit_code(), EXIT_INVALID_ARGS);
        let read = CliError::Read {
            path: PathBuf::from("a"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(read.exit_code(), EXIT_ERROR);
    }

    #[test]
    fn test_read_document_explicit_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let ctx = context(Some(dir.path().join("missing.json")));
        assert!(matches!(ctx.read_document(), Err(CliError::Read { .. })));
    }

    #[test]
    fn test_read_document_autosave_falls_back_to_config_defaults() {
        let dir = TempDir::new().unwrap();
        let mut ctx = context(None);
        ctx.config.editor.autosave_dir = Some(dir.path().to_path_buf());
        ctx.config.editor.default_name = "fresh".to_string();
        ctx.config.editor.tile_width = 4;

        std::fs::write(dir.path().join("atari-tile-editor.json"), "not json").unwrap();
        let doc = ctx.read_document().unwrap();
        assert_eq!(doc.name, "fresh");
        assert_eq!(doc.tile_width, 4);
    }

    #[test]
    fn test_read_document_reports_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        let err = context(Some(path)).read_document().unwrap_err();
        assert!(err.to_string().contains("expected a JSON object"));
    }

    #[test]
    fn test_resolve_tile_by_name_and_id() {
        let mut doc = Document::default();
        let id = doc.tiles.create(8, 8);
        doc.tiles.rename(&id, "wall");

        assert_eq!(resolve_tile(&doc, "wall").unwrap(), id);
        assert_eq!(resolve_tile(&doc, id.as_str()).unwrap(), id);
        let err = resolve_tile(&doc, "floor").unwrap_err();
        assert!(err.to_string().contains("Available tiles: wall"));
    }
}
