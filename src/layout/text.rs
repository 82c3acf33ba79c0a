//! Greedy word wrapping and vertical centering.
//!
//! ## Wrapping
//!
//! Words (whitespace separated) are appended to the current line while the
//! measured width of `line + " " + word` stays within `max_width`. When it
//! would not, the current line is committed and the word starts a new one.
//! A word that is wider than `max_width` on its own is never split; it
//! becomes its own line and overflows.
//!
//! ## Placement
//!
//! ```text
//! line_height  = font_size * 1.2
//! total_height = (n - 1) * line_height
//! first_y      = center_y - total_height / 2
//! line i at      first_y + i * line_height
//! ```
//!
//! so the block's middle sits on the anchor regardless of line count.

use super::{FontSpec, TextMeasure};

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Break `text` into lines no wider than `max_width` (single long words excepted).
///
/// Empty or whitespace-only input yields no lines.
pub fn wrap<M: TextMeasure + ?Sized>(text: &str, max_width: f32, font: &FontSpec, measure: &M) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if measure.measure(font, &candidate) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Vertical metrics of a block of `count` lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineBlock {
    pub count: usize,
    pub line_height: f32,
    /// Distance from the first line's anchor to the last line's.
    pub total_height: f32,
    /// Anchor `y` of the first line.
    pub start_y: f32,
}

impl LineBlock {
    /// Block centered on `center_y`.
    pub fn centered(count: usize, font_size: f32, center_y: f32) -> Self {
        let line_height = font_size * LINE_HEIGHT_FACTOR;
        let total_height = count.saturating_sub(1) as f32 * line_height;
        Self {
            count,
            line_height,
            total_height,
            start_y: center_y - total_height / 2.0,
        }
    }

    /// Block whose first line box starts at `top` (each line's anchor is
    /// the middle of its line box).
    pub fn from_top(count: usize, font_size: f32, top: f32) -> Self {
        let line_height = font_size * LINE_HEIGHT_FACTOR;
        Self {
            count,
            line_height,
            total_height: count.saturating_sub(1) as f32 * line_height,
            start_y: top + line_height / 2.0,
        }
    }

    /// Anchor `y` of line `index`.
    pub fn line_y(&self, index: usize) -> f32 {
        self.start_y + index as f32 * self.line_height
    }

    pub fn line_ys(&self) -> impl Iterator<Item = f32> + '_ {
        (0..self.count).map(|i| self.line_y(i))
    }
}
