//! Text sanitizer: everything emitted to the canvas goes through here.
//!
//! The legacy output glyph tables only cover the Basic Multilingual Plane
//! (U+0000..U+FFFF). Characters outside it (emoji, some CJK extensions)
//! are replaced with a visible replacement glyph rather than dropped, so
//! readers can see something was there.

use log::warn;

/// Sentinel emitted for missing data. Deliberately loud: silently
/// emitting an empty string for a missing value is never acceptable.
pub const NO_TEXT_SENTINEL: &str = "THERE IS NO TEXT!!!!";

/// Replacement glyph for characters the output format cannot carry.
const REPLACEMENT: char = '\u{fffd}';

/// Normalize arbitrary text into a renderable form.
///
/// `None` yields [`NO_TEXT_SENTINEL`]. Otherwise every character above
/// U+FFFF is replaced with U+FFFD and reported once per call. Total and
/// idempotent: sanitizing already-sanitized text is a no-op.
pub fn sanitize(input: Option<&str>) -> String {
    let Some(text) = input else {
        return NO_TEXT_SENTINEL.to_string();
    };

    let removed: Vec<char> = text.chars().filter(|c| *c as u32 > 0xFFFF).collect();
    if removed.is_empty() {
        return text.to_string();
    }
    warn!("Removed/marked non-BMP characters: {removed:?}");
    text.chars()
        .map(|c| if c as u32 > 0xFFFF { REPLACEMENT } else { c })
        .collect()
}
