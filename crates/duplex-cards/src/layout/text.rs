//! Text fitting
//!
//! Wraps a string into a fixed box and centers the block on the box center.
//!
//! Wrapping is greedy and character-wise: a line is closed as soon as the
//! next character would overflow the width, wherever that falls. This suits
//! scripts written without spaces (Japanese, Chinese) and will split words
//! in space-delimited text. An explicit `\n` always starts a new line.

use super::{OverflowPolicy, TextBox};

/// Width measurement for a font at a given size.
pub trait TextMeasure {
    /// Advance width of one character in points.
    fn char_width(&self, ch: char, size: f32) -> f32;

    /// Advance width of a string in points.
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().map(|ch| self.char_width(ch, size)).sum()
    }
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn char_width(&self, ch: char, size: f32) -> f32 {
        (**self).char_width(ch, size)
    }
}

/// Sizing rules for one text block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub initial_size: f32,
    pub min_size: f32,
    /// Decrement per shrink attempt
    pub shrink_step: f32,
    pub line_height_multiplier: f32,
    pub policy: OverflowPolicy,
}

impl TextStyle {
    pub fn fixed(size: f32) -> Self {
        Self {
            initial_size: size,
            min_size: size,
            shrink_step: 0.5,
            line_height_multiplier: 1.2,
            policy: OverflowPolicy::Truncate,
        }
    }
}

/// How an oversized block was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOverflow {
    /// Trailing lines were dropped to fit the box.
    Truncated { dropped_lines: usize },
    /// The minimum size still overflows; the block is kept as is.
    AcceptedAtFloor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FittedLine {
    pub text: String,
    /// Rendered width at the block's font size
    pub width: f32,
}

/// Wrapped, sized and vertically positioned text.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBlock {
    /// Lines top to bottom
    pub lines: Vec<FittedLine>,
    /// Size actually used after any shrinking
    pub font_size: f32,
    pub line_height: f32,
    /// Baseline of the first line
    pub start_y: f32,
    pub overflow: Option<TextOverflow>,
}

impl RenderedBlock {
    pub fn total_height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// `(text, x, baseline)` for every line, each centered on `center_x`.
    pub fn positioned_lines(&self, center_x: f32) -> impl Iterator<Item = (&str, f32, f32)> + '_ {
        self.lines.iter().enumerate().map(move |(i, line)| {
            (
                line.text.as_str(),
                center_x - line.width / 2.0,
                self.start_y - i as f32 * self.line_height,
            )
        })
    }
}

/// Greedy character wrap at a fixed size.
pub fn wrap_chars(text: &str, font: &impl TextMeasure, size: f32, max_width: f32) -> Vec<FittedLine> {
    let mut lines = Vec::new();
    if text.is_empty() {
        return lines;
    }

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0;

        for ch in paragraph.chars().filter(|&ch| ch != '\r') {
            let advance = font.char_width(ch, size);
            // A lone character always stays, even if wider than the box.
            if !current.is_empty() && current_width + advance > max_width {
                lines.push(FittedLine {
                    text: std::mem::take(&mut current),
                    width: current_width,
                });
                current_width = 0.0;
            }
            current.push(ch);
            current_width += advance;
        }

        lines.push(FittedLine {
            text: current,
            width: current_width,
        });
    }

    lines
}

/// Fit `text` into `bounds` under `style.policy`.
pub fn fit_text(text: &str, font: &impl TextMeasure, bounds: &TextBox, style: &TextStyle) -> RenderedBlock {
    match style.policy {
        OverflowPolicy::Truncate => fit_truncating(text, font, bounds, style),
        OverflowPolicy::ShrinkToFit => fit_shrinking(text, font, bounds, style),
    }
}

fn fit_truncating(text: &str, font: &impl TextMeasure, bounds: &TextBox, style: &TextStyle) -> RenderedBlock {
    let size = style.initial_size;
    let line_height = size * style.line_height_multiplier;
    let mut lines = wrap_chars(text, font, size, bounds.max_width);

    let mut overflow = None;
    if lines.len() as f32 * line_height > bounds.max_height {
        let keep = (bounds.max_height.max(0.0) / line_height).floor() as usize;
        let dropped_lines = lines.len() - keep.min(lines.len());
        lines.truncate(keep);
        log::debug!("truncated text block by {dropped_lines} line(s)");
        overflow = Some(TextOverflow::Truncated { dropped_lines });
    }

    centered(lines, size, line_height, bounds, overflow)
}

fn fit_shrinking(text: &str, font: &impl TextMeasure, bounds: &TextBox, style: &TextStyle) -> RenderedBlock {
    let floor = style.min_size.min(style.initial_size);
    let step = if style.shrink_step > 0.0 {
        style.shrink_step
    } else {
        f32::INFINITY
    };

    let mut size = style.initial_size;
    loop {
        let line_height = size * style.line_height_multiplier;
        let lines = wrap_chars(text, font, size, bounds.max_width);
        let fits = lines.len() as f32 * line_height <= bounds.max_height;

        if fits {
            return centered(lines, size, line_height, bounds, None);
        }
        if size <= floor {
            log::debug!("text still overflows at minimum size {size}pt");
            return centered(lines, size, line_height, bounds, Some(TextOverflow::AcceptedAtFloor));
        }
        // A step too small to change an f32 would never reach the floor
        let next = (size - step).max(floor);
        size = if next < size { next } else { floor };
    }
}

fn centered(
    lines: Vec<FittedLine>,
    font_size: f32,
    line_height: f32,
    bounds: &TextBox,
    overflow: Option<TextOverflow>,
) -> RenderedBlock {
    let total_height = lines.len() as f32 * line_height;
    RenderedBlock {
        lines,
        font_size,
        line_height,
        start_y: bounds.center_y + total_height / 2.0 - line_height,
        overflow,
    }
}
