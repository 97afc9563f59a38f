//! RGB colors for particles and backgrounds.
//!
//! Colors are written the way a stylesheet writes them, either
//! `rgb(255, 100, 50)` or `#ff6432`, and serialize back to the `rgb(...)` form.
//!
//! ```ignore
//! let ember: Color = "rgb(255, 100, 50)".parse()?;
//! assert_eq!(ember, Color::rgb(255, 100, 50));
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque 8-bit RGB color. Transparency is carried separately per particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Create a color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The color as RGBA bytes with the given opacity (clamped to 0-1).
    pub fn to_rgba(self, alpha: f32) -> [u8; 4] {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r, self.g, self.b, a]
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ConfigError::InvalidColor(s.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        let body = trimmed
            .strip_prefix("rgb")
            .map(str::trim_start)
            .and_then(|rest| rest.strip_prefix('('))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let channels: Vec<u8> = body
            .split(',')
            .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<_, _>>()?;

        match channels.as_slice() {
            [r, g, b] => Ok(Color::rgb(*r, *g, *b)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ConfigError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!("rgb(255, 100, 50)".parse::<Color>().unwrap(), Color::rgb(255, 100, 50));
        // Stray whitespace like "rgb(0, 0,0 )" is accepted
        assert_eq!("rgb(0, 0,0 )".parse::<Color>().unwrap(), Color::BLACK);
        assert_eq!("  rgb (1,2,3)".parse::<Color>().unwrap(), Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#ff6432".parse::<Color>().unwrap(), Color::rgb(255, 100, 50));
        assert!("#ff643".parse::<Color>().is_err());
        assert!("#gg0000".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("red".parse::<Color>().is_err());
        assert!("rgb(256, 0, 0)".parse::<Color>().is_err());
        assert!("rgb(1, 2)".parse::<Color>().is_err());
        assert!("rgb(1, 2, 3, 4)".parse::<Color>().is_err());
    }

    #[test]
    fn test_serde_uses_css_form() {
        let json = serde_json::to_string(&Color::rgb(184, 15, 10)).unwrap();
        assert_eq!(json, "\"rgb(184, 15, 10)\"");

        let back: Color = serde_json::from_str("\"#0064ff\"").unwrap();
        assert_eq!(back, Color::rgb(0, 100, 255));

        assert!(serde_json::from_str::<Color>("\"blue\"").is_err());
    }

    #[test]
    fn test_to_rgba_clamps_alpha() {
        assert_eq!(Color::WHITE.to_rgba(2.0), [255, 255, 255, 255]);
        assert_eq!(Color::WHITE.to_rgba(-1.0), [255, 255, 255, 0]);
        assert_eq!(Color::rgb(1, 2, 3).to_rgba(0.5), [1, 2, 3, 128]);
    }
}
