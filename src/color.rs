use egui::Color32;

use crate::error::{SketchError, SketchResult};

/// Parse a hex color string as emitted by the color picker.
///
/// Accepts `#rrggbb` and `#rgb`, with or without the leading `#`.
pub fn parse_hex_color(text: &str) -> SketchResult<Color32> {
    let trimmed = text.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let invalid = || SketchError::InvalidColor(text.to_owned());

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

    match digits.len() {
        6 => Ok(Color32::from_rgb(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        3 => {
            // #abc expands to #aabbcc
            let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
            Ok(Color32::from_rgb(short(0)?, short(1)?, short(2)?))
        }
        _ => Err(invalid()),
    }
}

/// Format a color as lowercase `#rrggbb`, dropping alpha.
pub fn to_hex(color: Color32) -> String {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    format!("#{r:02x}{g:02x}{b:02x}")
}
