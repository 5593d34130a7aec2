//! Hex color value shared by the extractor, the renderers and the session layer.

use std::{fmt, str::FromStr};

use palette::Srgb;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a string is not a `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexColorError {
    /// Not seven characters.
    #[error("color `{0}` must be exactly 7 characters long")]
    Length(String),
    /// First character is not `#`.
    #[error("color `{0}` must start with `#`")]
    MissingHash(String),
    /// Something other than `0-9a-fA-F` after the `#`.
    #[error("color `{0}` contains non-hexadecimal digits")]
    Digits(String),
}

/// A 24-bit RGB color written as `#` followed by six hex digits.
///
/// The original casing is preserved, so `#FF5733` and `#ff5733` round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
    /// Validate and wrap a `#rrggbb` string.
    pub fn parse(value: &str) -> Result<Self, HexColorError> {
        if value.len() != 7 {
            return Err(HexColorError::Length(value.to_owned()));
        }
        let Some(digits) = value.strip_prefix('#') else {
            return Err(HexColorError::MissingHash(value.to_owned()));
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HexColorError::Digits(value.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }

    /// Build a lowercase color from its channels, each zero-padded to two digits.
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(format!("#{red:02x}{green:02x}{blue:02x}"))
    }

    /// Red, green and blue channels.
    pub fn rgb(&self) -> [u8; 3] {
        let channel = |start: usize| u8::from_str_radix(&self.0[start..start + 2], 16).unwrap_or(0);
        [channel(1), channel(3), channel(5)]
    }

    /// Color converted to a floating point sRGB value.
    pub fn to_srgb(&self) -> Srgb {
        let [r, g, b] = self.rgb();
        Srgb::<u8>::new(r, g, b).into_format()
    }

    /// Borrow the `#rrggbb` text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = HexColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_cases_and_keeps_them() {
        assert_eq!(HexColor::parse("#FF5733").unwrap().as_str(), "#FF5733");
        assert_eq!(HexColor::parse("#ffc300").unwrap().as_str(), "#ffc300");
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(HexColor::parse("FF5733"), Err(HexColorError::Length(_))));
        assert!(matches!(HexColor::parse("#FF573"), Err(HexColorError::Length(_))));
        assert!(matches!(HexColor::parse("xFF5733"), Err(HexColorError::MissingHash(_))));
        assert!(matches!(HexColor::parse("#GG5733"), Err(HexColorError::Digits(_))));
        assert!(matches!(HexColor::parse("#ff 733"), Err(HexColorError::Digits(_))));
    }

    #[test]
    fn from_rgb_pads_each_channel() {
        let color = HexColor::from_rgb(0x0a, 0, 0xff);
        assert_eq!(color.as_str(), "#0a00ff");
        assert_eq!(color.rgb(), [0x0a, 0, 0xff]);
    }

    #[test]
    fn serde_rejects_invalid_strings() {
        let ok: HexColor = serde_json::from_str("\"#00FF00\"").unwrap();
        assert_eq!(ok.rgb(), [0, 255, 0]);
        assert!(serde_json::from_str::<HexColor>("\"green\"").is_err());
    }
}
