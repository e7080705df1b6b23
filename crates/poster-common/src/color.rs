//! Hex color values used throughout themes and palettes.
//!
//! Colors are always normalized to lowercase `#rrggbb` so that two themes built
//! from the same inputs serialize identically.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PosterError;

/// An opaque 8-bit RGB color, displayed as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const WHITE: HexColor = HexColor::new(255, 255, 255);
    pub const BLACK: HexColor = HexColor::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from float channels in `[0, 1]`.
    ///
    /// Channels are clamped and rounded to the nearest 8-bit value.
    pub fn from_unit_rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b))
    }

    /// Convert to an opaque RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    pub fn to_rgb(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = PosterError;

    /// Parse `#rrggbb` or `#rgb`. The leading `#` is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || PosterError::Validation(format!("invalid hex color '{}'", s));

        if !hex.is_ascii() {
            return Err(invalid());
        }

        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
                let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
                let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
                Ok(Self::new(r, g, b))
            }
            3 => {
                let digit = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|d| d * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::new(digit(0)?, digit(1)?, digit(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for HexColor {
    type Error = PosterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        assert_eq!("#FF0000".parse::<HexColor>().unwrap(), HexColor::new(255, 0, 0));
        assert_eq!("00ff00".parse::<HexColor>().unwrap(), HexColor::new(0, 255, 0));
    }

    #[test]
    fn test_parse_short_form() {
        assert_eq!("#fff".parse::<HexColor>().unwrap(), HexColor::WHITE);
        assert_eq!("#000".parse::<HexColor>().unwrap(), HexColor::BLACK);
        assert_eq!("#a1b".parse::<HexColor>().unwrap(), HexColor::new(0xaa, 0x11, 0xbb));
    }

    #[test]
    fn test_parse_invalid() {
        assert!("#GGGGGG".parse::<HexColor>().is_err());
        assert!("#12345".parse::<HexColor>().is_err());
        assert!("".parse::<HexColor>().is_err());
        assert!("#ééé".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(HexColor::new(0xE7, 0x7F, 0x67).to_string(), "#e77f67");
    }

    #[test]
    fn test_from_unit_rgb() {
        assert_eq!(HexColor::from_unit_rgb(1.0, 0.5, 0.0).to_string(), "#ff8000");
        assert_eq!(HexColor::from_unit_rgb(-1.0, 2.0, 0.0), HexColor::new(0, 255, 0));
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&HexColor::new(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        let back: HexColor = serde_json::from_str("\"#ABC\"").unwrap();
        assert_eq!(back, HexColor::new(0xaa, 0xbb, 0xcc));
    }
}
