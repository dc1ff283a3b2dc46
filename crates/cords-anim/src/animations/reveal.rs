//! Dual-layer typewriter reveal.
//!
//! A dim layer types the text out quickly while a bright layer follows
//! after a short delay, expressed as a negative starting progress.

use cords_core::{ColorTheme, EasingKind};
use cords_fonts::{GLYPH_HEIGHT, word_art, word_width};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use crate::color::tinted;
use crate::easing::Tween;

/// Alpha of the dim layer.
pub const DIM_ALPHA: f32 = 0.2;

/// Alpha of the bright layer.
pub const BRIGHT_ALPHA: f32 = 0.85;

/// Duration of the dim layer's reveal.
pub const DIM_DURATION_MS: u64 = 400;

/// Duration of the bright layer's reveal, including its delay phase.
pub const BRIGHT_DURATION_MS: u64 = 500;

/// Starting progress of the bright layer; the negative part is a pure delay.
pub const BRIGHT_START: f32 = -20.0;

/// Visible prefixes of both layers at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealLayers<'a> {
    pub dim: &'a str,
    /// Present once the bright layer's progress is above zero.
    pub bright: Option<&'a str>,
}

/// Typewriter reveal of a fixed piece of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextReveal {
    text: String,
    char_count: usize,
    dim: Tween,
    bright: Tween,
}

impl TextReveal {
    /// Start revealing `text` at `now_ms`.
    pub fn new(text: impl Into<String>, now_ms: u64) -> Self {
        let text = text.into();
        let char_count = text.chars().count();
        Self {
            text,
            char_count,
            dim: Tween::new(0.0, 100.0, DIM_DURATION_MS, EasingKind::Linear).starting_at(now_ms),
            bright: Tween::new(BRIGHT_START, 100.0, BRIGHT_DURATION_MS, EasingKind::Linear)
                .starting_at(now_ms),
        }
    }

    /// Advance both layers to `now_ms`.
    pub fn update(&mut self, now_ms: u64) {
        self.dim.update(now_ms);
        self.bright.update(now_ms);
    }

    /// The full text being revealed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the text in characters.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Number of characters shown by the dim layer.
    pub fn visible_dim(&self) -> usize {
        self.visible_for(self.dim.value())
    }

    /// Number of characters shown by the bright layer.
    pub fn visible_bright(&self) -> usize {
        let progress = self.bright.value();
        if progress >= 0.0 {
            self.visible_for(progress)
        } else {
            0
        }
    }

    /// Whether the bright layer is drawn at all.
    pub fn shows_bright(&self) -> bool {
        self.bright.value() > 0.0
    }

    /// Whether both layers have finished.
    pub fn is_finished(&self) -> bool {
        self.dim.is_finished() && self.bright.is_finished()
    }

    /// Visible prefixes of both layers.
    pub fn layers(&self) -> RevealLayers<'_> {
        RevealLayers {
            dim: char_prefix(&self.text, self.visible_dim()),
            bright: self
                .shows_bright()
                .then(|| char_prefix(&self.text, self.visible_bright())),
        }
    }

    fn visible_for(&self, progress: f32) -> usize {
        let shown = (self.char_count as f32 * (progress / 100.0)).floor();
        (shown.max(0.0) as usize).min(self.char_count)
    }

    /// Number of characters drawn bright and the total drawn.
    fn split(&self) -> (usize, usize) {
        let bright = if self.shows_bright() {
            self.visible_bright()
        } else {
            0
        };
        (bright, self.visible_dim().max(bright))
    }

    /// Render as a single line padded to the full text width.
    ///
    /// The bright layer is drawn over the dim one, so the leading
    /// characters use the bright style and the rest use the dim style.
    pub fn render_line(&self, theme: ColorTheme) -> Line<'static> {
        let (bright, total) = self.split();
        let chars: Vec<char> = self.text.chars().collect();

        let bright_text: String = chars[..bright].iter().collect();
        let dim_text: String = chars[bright..total].iter().collect();
        let padding = " ".repeat(self.char_count - total);

        Line::from(vec![
            Span::styled(bright_text, Style::new().fg(tinted(theme, BRIGHT_ALPHA))),
            Span::styled(dim_text, Style::new().fg(tinted(theme, DIM_ALPHA))),
            Span::raw(padding),
        ])
    }

    /// Render the text as block glyph art, revealing glyph by glyph.
    ///
    /// Every row is padded to the width of the full word.
    pub fn render_art(&self, theme: ColorTheme) -> Vec<Line<'static>> {
        let (bright, total) = self.split();
        let chars: Vec<char> = self.text.chars().collect();

        let bright_art = word_art(&chars[..bright].iter().collect::<String>());
        let dim_art = word_art(&chars[bright..total].iter().collect::<String>());
        let full_width = word_width(self.char_count);
        let bright_style = Style::new()
            .fg(tinted(theme, BRIGHT_ALPHA))
            .add_modifier(Modifier::BOLD);
        let dim_style = Style::new().fg(tinted(theme, DIM_ALPHA));

        (0..GLYPH_HEIGHT)
            .map(|row| {
                let mut spans = Vec::with_capacity(3);
                let mut width = 0;
                if bright > 0 {
                    width += word_width(bright);
                    spans.push(Span::styled(bright_art[row].clone(), bright_style));
                }
                if total > bright {
                    let gap = if bright > 0 { 1 } else { 0 };
                    width += gap + word_width(total - bright);
                    spans.push(Span::styled(
                        format!("{}{}", " ".repeat(gap), dim_art[row]),
                        dim_style,
                    ));
                }
                spans.push(Span::raw(" ".repeat(full_width.saturating_sub(width))));
                Line::from(spans)
            })
            .collect()
    }
}

/// Width of [`TextReveal::render_art`] output for `text`.
pub fn art_width(text: &str) -> usize {
    word_width(text.chars().count())
}

/// The first `count` characters of `text`.
fn char_prefix(text: &str, count: usize) -> &str {
    match text.char_indices().nth(count) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
