//! Color swatch helpers.

use crate::error::RenderError;
use serde::{Deserialize, Serialize};

/// Weighted luminance above which a dark label is used.
pub const LUMINANCE_THRESHOLD: u32 = 125;

/// An sRGB color parsed from "#RRGGBB".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn parse_hex(hex: &str) -> Result<Self, RenderError> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(|| RenderError::InvalidColor(hex.to_string()))?;

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| RenderError::InvalidColor(hex.to_string()))
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// `299·r + 587·g + 114·b`, i.e. luminance scaled by 1000.
    fn weighted_sum(&self) -> u32 {
        299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b)
    }

    /// Perceived luminance in `[0, 255]`.
    pub fn luminance(&self) -> f64 {
        f64::from(self.weighted_sum()) / 1000.0
    }

    pub fn foreground(&self) -> Foreground {
        if self.luminance() > f64::from(LUMINANCE_THRESHOLD) {
            Foreground::Dark
        } else {
            Foreground::Light
        }
    }
}

/// Label color for text drawn on a swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Foreground {
    Dark,
    Light,
}

impl Foreground {
    pub fn as_str(&self) -> &'static str {
        match self {
            Foreground::Dark => "dark",
            Foreground::Light => "light",
        }
    }
}

impl std::fmt::Display for Foreground {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Readable label color for a "#RRGGBB" background.
pub fn foreground_for(hex: &str) -> Result<Foreground, RenderError> {
    Rgb::parse_hex(hex).map(|rgb| rgb.foreground())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_and_black() {
        assert_eq!(foreground_for("#FFFFFF").unwrap(), Foreground::Dark);
        assert_eq!(foreground_for("#000000").unwrap(), Foreground::Light);
    }

    #[test]
    fn test_threshold_is_strict() {
        // 0x7D = 125 on every channel gives exactly 125.0, which is not > 125.
        assert_eq!(Rgb::parse_hex("#7D7D7D").unwrap().luminance(), 125.0);
        assert_eq!(foreground_for("#7D7D7D").unwrap(), Foreground::Light);
        assert_eq!(foreground_for("#7E7E7E").unwrap(), Foreground::Dark);
    }

    #[test]
    fn test_channel_weights() {
        // Pure green is bright, pure blue is dark.
        assert_eq!(foreground_for("#00FF00").unwrap(), Foreground::Dark);
        assert_eq!(foreground_for("#0000FF").unwrap(), Foreground::Light);
        // Pure red: 299 * 255 / 1000 = 76.245
        assert_eq!(foreground_for("#FF0000").unwrap(), Foreground::Light);
    }

    #[test]
    fn test_lowercase_hex() {
        let rgb = Rgb::parse_hex("#1e90ff").unwrap();
        assert_eq!(rgb, Rgb { r: 0x1e, g: 0x90, b: 0xff });
    }

    #[test]
    fn test_invalid_colors() {
        for bad in ["", "FFFFFF", "#FFF", "#GGGGGG", "#FFFFFFF", "#ffé0ff"] {
            assert!(Rgb::parse_hex(bad).is_err(), "{bad} should be rejected");
        }
    }
}
