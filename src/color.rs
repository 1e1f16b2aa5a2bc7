//! Color parsing for on/off cell colors
//!
//! Supports hex colors (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`) and a few
//! named colors.

use image::Rgba;
use thiserror::Error;

/// Default color of cells that are on (the editor's yellow).
pub const DEFAULT_ON_COLOR: &str = "#f0e040";
/// Default color of cells that are off.
pub const DEFAULT_OFF_COLOR: &str = "#111122";

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// Not a hex color and not a known name
    #[error("unknown color name '{0}'")]
    UnknownName(String),
}

/// Parse a color string into RGBA.
///
/// # Examples
///
/// ```
/// use tilepaint::color::parse_color;
///
/// assert_eq!(parse_color("#F00").unwrap(), image::Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("#f0e040").unwrap(), image::Rgba([240, 224, 64, 255]));
/// assert_eq!(parse_color("black").unwrap(), image::Rgba([0, 0, 0, 255]));
/// ```
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    match s.strip_prefix('#') {
        Some(hex) => parse_hex_color(hex),
        None => named_color(s),
    }
}

fn named_color(name: &str) -> Result<Rgba<u8>, ColorError> {
    let rgba = match name.to_lowercase().as_str() {
        "black" => [0, 0, 0, 255],
        "white" => [255, 255, 255, 255],
        "red" => [255, 0, 0, 255],
        "green" => [0, 128, 0, 255],
        "blue" => [0, 0, 255, 255],
        "yellow" => [255, 255, 0, 255],
        "transparent" => [0, 0, 0, 0],
        _ => return Err(ColorError::UnknownName(name.to_string())),
    };
    Ok(Rgba(rgba))
}

/// Parse the digits of a hex color (without the leading `#`).
fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, ColorError> {
    let digits = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ColorError::InvalidHex(c)))
        .collect::<Result<Vec<u8>, _>>()?;

    match digits.as_slice() {
        // #RGB / #RGBA: each digit doubled
        [r, g, b] => Ok(Rgba([r * 17, g * 17, b * 17, 255])),
        [r, g, b, a] => Ok(Rgba([r * 17, g * 17, b * 17, a * 17])),
        [r1, r0, g1, g0, b1, b0] => Ok(Rgba([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, 255])),
        [r1, r0, g1, g0, b1, b0, a1, a0] => {
            Ok(Rgba([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, a1 * 16 + a0]))
        }
        _ => Err(ColorError::InvalidLength(digits.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_forms() {
        assert_eq!(parse_color("#F00"), Ok(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_color("#F008"), Ok(Rgba([255, 0, 0, 136])));
        assert_eq!(parse_color("#112233"), Ok(Rgba([0x11, 0x22, 0x33, 255])));
        assert_eq!(parse_color("#11223344"), Ok(Rgba([0x11, 0x22, 0x33, 0x44])));
    }

    #[test]
    fn test_defaults_parse() {
        assert_eq!(parse_color(DEFAULT_ON_COLOR), Ok(Rgba([0xF0, 0xE0, 0x40, 255])));
        assert_eq!(parse_color(DEFAULT_OFF_COLOR), Ok(Rgba([0x11, 0x11, 0x22, 255])));
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(parse_color("#12"), Err(ColorError::InvalidLength(2)));
        assert_eq!(parse_color("#GG0000"), Err(ColorError::InvalidHex('G')));
        assert_eq!(parse_color("mauve"), Err(ColorError::UnknownName("mauve".to_string())));
    }

    #[test]
    fn test_named_case_insensitive() {
        assert_eq!(parse_color("White"), Ok(Rgba([255, 255, 255, 255])));
    }
}
