//! Colour handling for markers and traces.
//!
//! Depth banding for event markers plus parsing of user-supplied colour
//! strings into RGBA for the static renderers.

pub mod depth;

pub use depth::{depth_band, depth_color, depth_palette, DEPTH_THRESHOLDS};

use crate::error::{Result, SeisvizError};

/// Parse a CSS colour string (`#rrggbb`, `#rgb`, `rgb(...)`, ...) into RGBA
pub fn parse_color(color: &str) -> Result<[u8; 4]> {
    colorgrad::Color::from_html(color)
        .map(|c| c.to_rgba8())
        .map_err(|e| SeisvizError::InvalidParameter {
            param: "color".to_string(),
            message: format!("Unknown colour '{}': {}", color, e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_color("#ff0000").unwrap(), [255, 0, 0, 255]);
        assert_eq!(parse_color("#2c7fb8").unwrap(), [44, 127, 184, 255]);
    }

    #[test]
    fn test_parse_invalid_color() {
        assert!(parse_color("not-a-colour").is_err());
    }
}
