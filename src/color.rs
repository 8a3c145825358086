//! Hex color handling
//!
//! Colors travel through the system as validated `#RRGGBB` strings. Anything
//! that fails to parse is rejected at the edge, so the store only ever holds
//! well-formed values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// An opaque sRGB color, stored in canonical uppercase `#RRGGBB` form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    pub const BLACK: HexColor = HexColor::from_rgb(0, 0, 0);
    pub const WHITE: HexColor = HexColor::from_rgb(0xFF, 0xFF, 0xFF);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `RRGGBB` (either case)
    ///
    /// Shorthand (`#FFF`) and alpha (`#AARRGGBB`) forms are rejected.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        let hex = input.strip_prefix('#').unwrap_or(input);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidHexColor(input.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ConfigError::InvalidHexColor(input.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xFF]
    }

    /// Linear interpolation between two colors, `t` clamped to [0, 1]
    pub fn lerp(&self, other: &HexColor, t: f32) -> [u8; 4] {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        [mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b), 0xFF]
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(color: HexColor) -> Self {
        color.to_string()
    }
}

/// Background paint: a flat color or fully transparent (no gradient path)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Color(HexColor),
    Transparent,
}

impl Background {
    pub const TRANSPARENT: &'static str = "transparent";

    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        if input.trim().eq_ignore_ascii_case(Self::TRANSPARENT) {
            Ok(Background::Transparent)
        } else {
            HexColor::parse(input.trim()).map(Background::Color)
        }
    }

    pub fn rgba(&self) -> [u8; 4] {
        match self {
            Background::Color(color) => color.rgba(),
            Background::Transparent => [0, 0, 0, 0],
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Color(color) => color.fmt(f),
            Background::Transparent => f.write_str(Self::TRANSPARENT),
        }
    }
}

impl Serialize for Background {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Background {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Background::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_hash() {
        assert_eq!(HexColor::parse("#00f260").unwrap(), HexColor::from_rgb(0x00, 0xF2, 0x60));
        assert_eq!(HexColor::parse("0575E6").unwrap(), HexColor::from_rgb(0x05, 0x75, 0xE6));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "#", "#FFF", "#GGGGGG", "#FF00FF00", "12345", "#12 456"] {
            assert!(HexColor::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_display_is_uppercase() {
        let color = HexColor::parse("#a1b2c3").unwrap();
        assert_eq!(color.to_string(), "#A1B2C3");
    }

    #[test]
    fn test_serde_as_string() {
        let color = HexColor::parse("#123abc").unwrap();
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#123ABC\"");

        let back: HexColor = serde_json::from_str("\"#123ABC\"").unwrap();
        assert_eq!(back, color);
        assert!(serde_json::from_str::<HexColor>("\"blue\"").is_err());
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = HexColor::BLACK;
        let b = HexColor::WHITE;
        assert_eq!(a.lerp(&b, 0.0), [0, 0, 0, 255]);
        assert_eq!(a.lerp(&b, 1.0), [255, 255, 255, 255]);
        assert_eq!(a.lerp(&b, 7.0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_background_parse() {
        assert_eq!(Background::parse("transparent").unwrap(), Background::Transparent);
        assert_eq!(Background::parse("Transparent").unwrap(), Background::Transparent);
        assert_eq!(
            Background::parse("#0a0a12").unwrap(),
            Background::Color(HexColor::from_rgb(0x0A, 0x0A, 0x12))
        );
        assert!(Background::parse("none").is_err());
        assert_eq!(serde_json::to_string(&Background::Transparent).unwrap(), "\"transparent\"");
    }
}
