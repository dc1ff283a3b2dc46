//! Core types shared by the cords crates.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Named easing curve used to shape a tween's progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EasingKind {
    /// Identity mapping.
    #[default]
    Linear,
    /// Starts fast and finishes linearly, cubic bezier (0.4, 0.0, 1.0, 1.0).
    FastOutLinearIn,
    /// Standard ease-in-out, cubic bezier (0.4, 0.0, 0.2, 1.0).
    FastOutSlowIn,
}

impl EasingKind {
    /// Control points `(x1, y1, x2, y2)` of the cubic bezier for this curve.
    ///
    /// Returns `None` for [`EasingKind::Linear`], which needs no solving.
    pub fn control_points(self) -> Option<(f32, f32, f32, f32)> {
        match self {
            EasingKind::Linear => None,
            EasingKind::FastOutLinearIn => Some((0.4, 0.0, 1.0, 1.0)),
            EasingKind::FastOutSlowIn => Some((0.4, 0.0, 0.2, 1.0)),
        }
    }
}

/// Top-level scene selector.
///
/// Only ever moves forward: Intro, then Countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SceneKind {
    #[default]
    Intro,
    Countdown,
}

impl SceneKind {
    /// The scene that follows this one, if any.
    pub fn next(self) -> Option<Self> {
        match self {
            SceneKind::Intro => Some(SceneKind::Countdown),
            SceneKind::Countdown => None,
        }
    }
}

/// Foreground tint applied to text, digits and cords.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    White,
    Cyan,
    Green,
    Magenta,
    Yellow,
    Red,
    Blue,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(self) -> Self {
        match self {
            ColorTheme::White => ColorTheme::Cyan,
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
        }
    }

    /// Full-intensity RGB components of the theme.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTheme::White => (255, 255, 255),
            ColorTheme::Cyan => (80, 220, 235),
            ColorTheme::Green => (90, 230, 120),
            ColorTheme::Magenta => (225, 110, 225),
            ColorTheme::Yellow => (240, 220, 90),
            ColorTheme::Red => (240, 95, 90),
            ColorTheme::Blue => (100, 150, 250),
        }
    }

    /// Convert theme to a Ratatui color at full intensity.
    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::Rgb(r, g, b)
    }
}
