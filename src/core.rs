use serde::{Deserialize, Serialize};

use crate::error::{TrackvizError, TrackvizResult};

pub use kurbo::{Point, Rect};

/// 0-based index of a frame within a video sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FrameIndex(pub u64);

/// Stroke width, in pixels, used when the caller does not pick one.
pub const DEFAULT_STROKE_WIDTH: f64 = 1.0;

/// Opaque RGB color used for box outlines and path identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Build a color from RGB channel values.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` hex color (case-insensitive, leading `#` optional).
    pub fn from_hex(s: &str) -> TrackvizResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> TrackvizResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| TrackvizError::validation(format!("invalid hex byte \"{pair}\"")))
        }

        if s.len() != 6 {
            return Err(TrackvizError::validation(
                "hex color must be #RRGGBB (case-insensitive)",
            ));
        }

        Ok(Self {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
        })
    }

    /// Format as `#RRGGBB` (uppercase).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Default palette cycled over boxes and paths, in assignment order.
pub const DEFAULT_PALETTE: [Color; 9] = [
    Color::rgb(0xFF, 0x00, 0xFF),
    Color::rgb(0xFF, 0x00, 0x00),
    Color::rgb(0xFF, 0x80, 0x00),
    Color::rgb(0xFF, 0xD1, 0x00),
    Color::rgb(0x00, 0x80, 0x00),
    Color::rgb(0x00, 0x80, 0xFF),
    Color::rgb(0x00, 0x00, 0xFF),
    Color::rgb(0x00, 0x00, 0x80),
    Color::rgb(0x80, 0x00, 0x80),
];
