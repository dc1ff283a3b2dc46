//! Launch countdown sequencer.

use cords_core::{ColorTheme, EasingKind};
use cords_fonts::digit_art;
use log::info;
use ratatui::{
    style::{Modifier, Style},
    text::Line,
};

use crate::color::tinted;
use crate::easing::Tween;
use crate::timing::Ticker;

/// First value shown by the countdown.
pub const COUNTDOWN_START: u8 = 6;

/// Time between countdown steps.
pub const TICK_MS: u64 = 1_000;

/// Duration of each digit's fade in.
pub const FADE_MS: u64 = 1_000;

/// Caption shown while counting down.
pub const CAPTION_COUNTING: &str = "LAUNCHING IN...";

/// Caption shown once the countdown reaches zero.
pub const CAPTION_COMPLETED: &str = "LAUNCH COMPLETED";

/// Countdown from [`COUNTDOWN_START`] to zero, one step per second.
///
/// The value starts unset and only ever decreases. Zero is terminal.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    value: Option<u8>,
    ticker: Ticker,
    fade: Option<Tween>,
}

impl Countdown {
    /// Start a countdown whose first tick is due one period after `now_ms`.
    pub fn new(now_ms: u64) -> Self {
        Self {
            value: None,
            ticker: Ticker::new(TICK_MS, now_ms),
            fade: None,
        }
    }

    /// Advance to `now_ms`. Returns true when the displayed value changed.
    pub fn update(&mut self, now_ms: u64) -> bool {
        let mut changed = false;

        if !self.is_complete() && self.ticker.poll(now_ms) {
            let next = match self.value {
                None => COUNTDOWN_START,
                Some(n) => n.saturating_sub(1),
            };
            self.value = Some(next);
            self.fade = Some(
                Tween::new(0.0, 100.0, FADE_MS, EasingKind::FastOutLinearIn).starting_at(now_ms),
            );
            info!("countdown: {next}");
            changed = true;
        }

        if let Some(fade) = &mut self.fade {
            fade.update(now_ms);
        }
        changed
    }

    /// Currently displayed value, if the first tick has happened.
    pub fn value(&self) -> Option<u8> {
        self.value
    }

    /// Whether the countdown has reached zero.
    pub fn is_complete(&self) -> bool {
        self.value == Some(0)
    }

    /// Caption for the current value.
    pub fn caption(&self) -> Option<&'static str> {
        match self.value {
            None => None,
            Some(0) => Some(CAPTION_COMPLETED),
            Some(_) => Some(CAPTION_COUNTING),
        }
    }

    /// Alpha of the current digit (0.0 - 1.0).
    pub fn digit_alpha(&self) -> f32 {
        self.fade.as_ref().map_or(0.0, |f| f.value() / 100.0)
    }

    /// Render the current digit as block art faded to its alpha.
    pub fn render_digit(&self, theme: ColorTheme) -> Vec<Line<'static>> {
        let Some(value) = self.value else {
            return Vec::new();
        };
        let style = Style::new()
            .fg(tinted(theme, self.digit_alpha()))
            .add_modifier(Modifier::BOLD);

        digit_art(value)
            .into_iter()
            .map(|row| Line::styled(row, style))
            .collect()
    }
}
