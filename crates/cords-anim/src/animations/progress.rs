//! Cycling progress indicator shown while the intro loads.

use cords_core::ColorTheme;
use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::chars::{MARK_HEAVY, MARK_LIGHT};
use crate::color::tinted;
use crate::timing::Ticker;

/// Time between indicator steps.
pub const STEP_MS: u64 = 400;

/// Number of distinct steps before the cycle repeats.
pub const STEP_COUNT: u8 = 5;

/// Number of marks drawn, left to right.
pub const MARK_COUNT: usize = 9;

/// Alpha of the highlighted marks.
pub const LIT_ALPHA: f32 = 0.8;

/// Alpha of the other marks.
pub const UNLIT_ALPHA: f32 = 0.2;

/// Step on which each mark is highlighted.
///
/// The centre lights first, then the pairs at increasing distance from it,
/// then both outer edges.
const MARK_STEPS: [u8; MARK_COUNT] = [4, 3, 2, 1, 0, 1, 2, 3, 4];

/// Columns between marks.
const MARK_GAP: usize = 3;

/// Five-step highlight cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressIndicator {
    step: u8,
    ticker: Ticker,
}

impl ProgressIndicator {
    /// Start cycling at `now_ms`.
    pub fn new(now_ms: u64) -> Self {
        Self {
            step: 0,
            ticker: Ticker::new(STEP_MS, now_ms),
        }
    }

    /// Advance to `now_ms`.
    pub fn update(&mut self, now_ms: u64) {
        if self.ticker.poll(now_ms) {
            self.step = (self.step + 1) % STEP_COUNT;
        }
    }

    /// Current step in `0..STEP_COUNT`.
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Alpha of each mark for the current step.
    pub fn mark_alphas(&self) -> [f32; MARK_COUNT] {
        MARK_STEPS.map(|s| if s == self.step { LIT_ALPHA } else { UNLIT_ALPHA })
    }

    /// Render the marks as a single line.
    pub fn render_line(&self, theme: ColorTheme) -> Line<'static> {
        let gap = " ".repeat(MARK_GAP);
        let mut spans = Vec::with_capacity(MARK_COUNT * 2);

        for (i, alpha) in self.mark_alphas().into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(gap.clone()));
            }
            // Outer edges and the centre use the heavier stroke.
            let ch = if MARK_STEPS[i] == 0 || MARK_STEPS[i] == STEP_COUNT - 1 {
                MARK_HEAVY
            } else {
                MARK_LIGHT
            };
            spans.push(Span::styled(
                ch.to_string(),
                Style::new().fg(tinted(theme, alpha)),
            ));
        }

        Line::from(spans)
    }
}

/// Width of [`ProgressIndicator::render_line`] output.
pub const fn indicator_width() -> usize {
    MARK_COUNT + (MARK_COUNT - 1) * MARK_GAP
}
