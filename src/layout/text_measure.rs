//! Text Measurement
//!
//! Utilities for measuring text dimensions in host cells.
//!
//! Cell width depends on Unicode character widths:
//! - ASCII characters: 1 cell
//! - CJK characters: 2 cells (fullwidth)
//! - Emoji: 2 cells (most)
//! - Zero-width characters: 0 cells
//!
//! Measurements use the unicode-width crate for accuracy.

use unicode_width::UnicodeWidthChar;

use crate::types::Size;

/// Measure the display width of a string in host cells.
///
/// Control characters have no width. Everything else is measured per
/// Unicode Standard Annex #11 via unicode-width.
pub fn string_width(s: &str) -> u16 {
    let mut width = 0u16;

    for c in s.chars() {
        let char_width = if c.is_control() {
            0
        } else {
            c.width().unwrap_or(0) as u16
        };
        width = width.saturating_add(char_width);
    }

    width
}

/// Measure the natural content extents of unwrapped text.
///
/// The content is laid out as-is (no soft wrapping - the widget's underlying
/// control preserves whitespace), so the natural size is the widest line by
/// the number of lines. A trailing newline opens a new empty line and counts
/// toward the height. Empty text measures 0x0.
pub fn content_size(text: &str) -> Size {
    if text.is_empty() {
        return Size::ZERO;
    }

    let mut width = 0u16;
    let mut lines = 0u16;

    // split('\n') yields the empty segment after a trailing newline,
    // which is exactly the extra line the host control shows.
    for line in text.split('\n') {
        lines = lines.saturating_add(1);
        width = width.max(string_width(line));
    }

    Size::new(width, lines)
}
