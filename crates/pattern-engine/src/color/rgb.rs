//! 8-bit RGB color type
//!
//! Pattern colors are byte triples taken straight from the decoded image or
//! the reference catalog. No color space conversion happens anywhere in the
//! pattern pipeline, so the type stays a plain value usable as a map key.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::palette::ParseColorError;

/// Luminance below which labels are drawn in a light tone.
const LIGHT_TEXT_THRESHOLD: f64 = 0.5;

/// A color as three 8-bit channels.
///
/// `Rgb` is `Hash + Eq`, so it is used directly as the key of frequency
/// tables and the active color map instead of a formatted `"r,g,b"` string.
///
/// Serializes as a `[r, g, b]` array, matching the reference palette file
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

/// Tone used for a cell label so it stays legible on its fill color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTone {
    /// White text, used on dark fills.
    Light,
    /// Black text, used on light fills.
    #[default]
    Dark,
}

impl TextTone {
    /// CSS hex notation of the tone.
    pub fn hex(self) -> &'static str {
        match self {
            TextTone::Light => "#ffffff",
            TextTone::Dark => "#000000",
        }
    }
}

impl Rgb {
    /// Create a color from its three channels.
    ///
    /// # Example
    /// ```
    /// use pattern_engine::Rgb;
    /// let red = Rgb::new(255, 0, 0);
    /// assert_eq!(red.packed(), 0xFF0000);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Read the first three bytes of an RGBA (or RGB) pixel.
    ///
    /// # Panics
    ///
    /// Panics if `pixel` has fewer than three bytes.
    #[inline]
    pub fn from_rgba(pixel: &[u8]) -> Self {
        Self::new(pixel[0], pixel[1], pixel[2])
    }

    /// Unpack a `0xRRGGBB` integer. Bits above 24 are ignored.
    #[inline]
    pub const fn from_packed(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }

    /// Pack into a `0xRRGGBB` integer.
    #[inline]
    pub const fn packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Channels as a byte array.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Lowercase `#rrggbb` notation.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Squared Euclidean distance in RGB space.
    ///
    /// Ordering by squared distance is identical to ordering by the true
    /// distance, and stays exact in integers.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    /// Euclidean distance in RGB space.
    #[inline]
    pub fn distance(self, other: Rgb) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// Relative luminance (Rec. 709 weights) normalized to `0.0..=1.0`.
    ///
    /// Computed directly on the byte values without gamma decoding.
    pub fn relative_luminance(self) -> f64 {
        0.2126 * (self.r as f64 / 255.0)
            + 0.7152 * (self.g as f64 / 255.0)
            + 0.0722 * (self.b as f64 / 255.0)
    }

    /// Label tone for a cell filled with this color.
    ///
    /// # Example
    /// ```
    /// use pattern_engine::{Rgb, TextTone};
    /// assert_eq!(Rgb::new(0, 0, 0).text_tone(), TextTone::Light);
    /// assert_eq!(Rgb::new(255, 255, 255).text_tone(), TextTone::Dark);
    /// ```
    pub fn text_tone(self) -> TextTone {
        if self.relative_luminance() < LIGHT_TEXT_THRESHOLD {
            TextTone::Light
        } else {
            TextTone::Dark
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.to_bytes()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a hex color: `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`.
    ///
    /// Case-insensitive, surrounding whitespace is trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }
        if let Some(c) = s.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidHex(c));
        }

        // Every byte is a hex digit from here on
        let digits: Vec<u8> = s
            .chars()
            .filter_map(|c| c.to_digit(16))
            .map(|d| d as u8)
            .collect();
        match digits.as_slice() {
            // #F00 -> #FF0000
            &[r, g, b] => Ok(Self::new(r * 17, g * 17, b * 17)),
            &[r1, r0, g1, g0, b1, b0] => Ok(Self::new(r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0)),
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
