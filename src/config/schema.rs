//! Configuration schema types for `tilepaint.toml`
//!
//! Defines the structure and validation rules for editor configuration.
//! Every section is optional; an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::color::{parse_color, DEFAULT_OFF_COLOR, DEFAULT_ON_COLOR};
use crate::document::DEFAULT_NAME;
use crate::export::AsmOptions;
use crate::tile::{DEFAULT_TILE_SIZE, MAX_TILE_HEIGHT, MAX_TILE_WIDTH};

/// Settings for new documents and the autosave slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Name given to new documents
    #[serde(default = "default_name")]
    pub default_name: String,
    /// Tile width of new documents
    #[serde(default = "default_tile_size")]
    pub tile_width: usize,
    /// Tile height of new documents
    #[serde(default = "default_tile_size")]
    pub tile_height: usize,
    /// Directory holding the autosave slot (`atari-tile-editor.json`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub autosave_dir: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_name: default_name(),
            tile_width: default_tile_size(),
            tile_height: default_tile_size(),
            autosave_dir: None,
        }
    }
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_tile_size() -> usize {
    DEFAULT_TILE_SIZE
}

/// PNG and terminal rendering settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Color of cells that are on
    #[serde(default = "default_on_color")]
    pub on_color: String,
    /// Color of cells that are off
    #[serde(default = "default_off_color")]
    pub off_color: String,
    /// Integer scale factor for PNG output
    #[serde(default = "default_scale")]
    pub scale: u8,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { on_color: default_on_color(), off_color: default_off_color(), scale: default_scale() }
    }
}

fn default_on_color() -> String {
    DEFAULT_ON_COLOR.to_string()
}

fn default_off_color() -> String {
    DEFAULT_OFF_COLOR.to_string()
}

fn default_scale() -> u8 {
    1
}

/// Assembly export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Data directive, e.g. `.byte` or `dc.b`
    #[serde(default = "default_directive")]
    pub directive: String,
    /// Suffix appended to the sanitized document name to form the label
    #[serde(default = "default_label_suffix")]
    pub label_suffix: String,
    /// Bytes per output line (0 = one line per grid row)
    #[serde(default)]
    pub bytes_per_line: usize,
    /// Terminate the label with a colon
    #[serde(default)]
    pub label_colon: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directive: default_directive(),
            label_suffix: default_label_suffix(),
            bytes_per_line: 0,
            label_colon: false,
        }
    }
}

fn default_directive() -> String {
    ".byte".to_string()
}

fn default_label_suffix() -> String {
    "Data".to_string()
}

impl ExportConfig {
    /// Assembly options described by this section.
    pub fn asm_options(&self) -> AsmOptions {
        AsmOptions {
            directive: self.directive.clone(),
            label_suffix: self.label_suffix.clone(),
            bytes_per_line: self.bytes_per_line,
            label_colon: self.label_colon,
        }
    }
}

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TilepaintConfig {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

/// A single validation problem
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "render.scale")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tilepaint.toml: '{}' {}", self.field, self.message)
    }
}

impl TilepaintConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut push = |field: &str, message: String| {
            errors.push(ConfigValidationError { field: field.to_string(), message });
        };

        if self.editor.tile_width == 0 || self.editor.tile_width > MAX_TILE_WIDTH {
            push("editor.tile_width", format!("must be between 1 and {}", MAX_TILE_WIDTH));
        }
        if self.editor.tile_height == 0 || self.editor.tile_height > MAX_TILE_HEIGHT {
            push("editor.tile_height", format!("must be between 1 and {}", MAX_TILE_HEIGHT));
        }

        if let Err(e) = parse_color(&self.render.on_color) {
            push("render.on_color", format!("is not a valid color: {}", e));
        }
        if let Err(e) = parse_color(&self.render.off_color) {
            push("render.off_color", format!("is not a valid color: {}", e));
        }
        if self.render.scale == 0 {
            push("render.scale", "must be a positive integer".to_string());
        }

        if self.export.directive.trim().is_empty() {
            push("export.directive", "must be a non-empty string".to_string());
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_parse() {
        let config: TilepaintConfig = toml::from_str("").unwrap();
        assert_eq!(config.editor.default_name, "untitled");
        assert_eq!(config.editor.tile_width, 8);
        assert_eq!(config.render.on_color, "#f0e040");
        assert_eq!(config.render.scale, 1);
        assert_eq!(config.export.directive, ".byte");
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let config: TilepaintConfig = toml::from_str(
            r##"
[editor]
default_name = "level"
tile_width = 4
tile_height = 16
autosave_dir = "/tmp/tiles"

[render]
on_color = "#fff"
off_color = "black"
scale = 8

[export]
directive = "dc.b"
label_suffix = "_pf"
bytes_per_line = 16
label_colon = true
"##,
        )
        .unwrap();
        assert_eq!(config.editor.default_name, "level");
        assert_eq!(config.editor.tile_height, 16);
        assert_eq!(config.editor.autosave_dir, Some(PathBuf::from("/tmp/tiles")));
        assert_eq!(config.render.scale, 8);
        let asm = config.export.asm_options();
        assert_eq!(asm.directive, "dc.b");
        assert_eq!(asm.bytes_per_line, 16);
        assert!(asm.label_colon);
        assert!(config.is_valid());
    }

    #[test]
    fn test_default_asm_options_match_encoder_defaults() {
        assert_eq!(ExportConfig::default().asm_options(), AsmOptions::default());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = TilepaintConfig::default();
        config.editor.tile_width = 0;
        config.editor.tile_height = 49;
        config.render.on_color = "#12".to_string();
        config.render.scale = 0;
        config.export.directive = " ".to_string();

        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "editor.tile_width",
                "editor.tile_height",
                "render.on_color",
                "render.scale",
                "export.directive"
            ]
        );
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigValidationError {
            field: "render.scale".to_string(),
            message: "must be a positive integer".to_string(),
        };
        assert_eq!(err.to_string(), "tilepaint.toml: 'render.scale' must be a positive integer");
    }
}
