//! Configuration loading and discovery for `tilepaint.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::TilepaintConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "tilepaint.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse tilepaint.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the on-cell color
    pub on_color: Option<String>,
    /// Override the off-cell color
    pub off_color: Option<String>,
    /// Override the PNG scale factor
    pub scale: Option<u8>,
    /// Override the data directive
    pub directive: Option<String>,
    /// Override bytes per output line
    pub bytes_per_line: Option<usize>,
    /// Override the label colon
    pub label_colon: Option<bool>,
    /// Override the autosave directory
    pub autosave_dir: Option<PathBuf>,
}

/// Find tilepaint.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for tilepaint.toml
/// 2. Check XDG_CONFIG_HOME/tilepaint/tilepaint.toml (or ~/.config/tilepaint/tilepaint.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find tilepaint.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("tilepaint").join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find tilepaint.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a tilepaint.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the default
/// configuration.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("art/tilepaint.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<TilepaintConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<TilepaintConfig, ConfigError> {
    tracing::debug!(path = %path.display(), "loading config");
    let contents = fs::read_to_string(path)?;
    let mut config: TilepaintConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    // Relative autosave directories are relative to the config file
    if let (Some(dir), Some(root)) = (config.editor.autosave_dir.as_ref(), path.parent()) {
        config.editor.autosave_dir = Some(resolve_path(root, dir));
    }

    Ok(config)
}

/// Configuration used when no tilepaint.toml is found.
pub fn default_config() -> TilepaintConfig {
    TilepaintConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut TilepaintConfig, overrides: &CliOverrides) {
    if let Some(ref on) = overrides.on_color {
        config.render.on_color = on.clone();
    }
    if let Some(ref off) = overrides.off_color {
        config.render.off_color = off.clone();
    }
    if let Some(scale) = overrides.scale {
        config.render.scale = scale;
    }

    if let Some(ref directive) = overrides.directive {
        config.export.directive = directive.clone();
    }
    if let Some(bytes_per_line) = overrides.bytes_per_line {
        config.export.bytes_per_line = bytes_per_line;
    }
    if let Some(label_colon) = overrides.label_colon {
        config.export.label_colon = label_colon;
    }

    if let Some(ref dir) = overrides.autosave_dir {
        config.editor.autosave_dir = Some(dir.clone());
    }
}

/// Resolve a path relative to the directory holding the config file.
///
/// If the path is absolute, returns it unchanged.
pub fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
