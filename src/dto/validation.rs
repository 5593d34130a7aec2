//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::state::color::HexColor;

/// Validates that a color is `#` followed by exactly six hexadecimal digits.
///
/// # Examples
///
/// ```ignore
/// validate_hex_color("#FF5733") // Ok
/// validate_hex_color("#ff5733") // Ok
/// validate_hex_color("FF5733")  // Err - missing '#'
/// validate_hex_color("#FF573")  // Err - too short
/// ```
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    HexColor::parse(color).map(|_| ()).map_err(|err| {
        let mut error = ValidationError::new("hex_color");
        error.message = Some(err.to_string().into());
        error
    })
}

/// Validates every entry of a color list.
pub fn validate_hex_colors(colors: &[String]) -> Result<(), ValidationError> {
    colors
        .iter()
        .try_for_each(|color| validate_hex_color(color))
}
