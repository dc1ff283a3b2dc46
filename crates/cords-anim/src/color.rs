//! Color utility functions for alpha-blended terminal drawing.

use cords_core::ColorTheme;
use ratatui::style::Color;

/// Backdrop the foreground is blended over.
pub const BACKDROP: (u8, u8, u8) = (10, 8, 16);

/// Color of the static background grid.
pub const GRID: (u8, u8, u8) = (42, 32, 58);

/// Blend `fg` over `bg` with the given alpha (0.0 - 1.0).
pub fn blend(bg: (u8, u8, u8), fg: (u8, u8, u8), alpha: f32) -> Color {
    let a = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    let mix = |b: u8, f: u8| (b as f32 + (f as f32 - b as f32) * a).round() as u8;
    Color::Rgb(mix(bg.0, fg.0), mix(bg.1, fg.1), mix(bg.2, fg.2))
}

/// Theme color at the given alpha over the backdrop.
pub fn tinted(theme: ColorTheme, alpha: f32) -> Color {
    blend(BACKDROP, theme.rgb(), alpha)
}

/// Fade an already drawn color toward the backdrop.
///
/// RGB colors are blended. Named colors cannot be, so they hold until the
/// halfway point and then drop to the backdrop.
pub fn fade(color: Color, alpha: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => blend(BACKDROP, (r, g, b), alpha),
        Color::Reset => Color::Reset,
        _ if alpha >= 0.5 => color,
        _ => {
            let (r, g, b) = BACKDROP;
            Color::Rgb(r, g, b)
        }
    }
}

/// Grid color over the backdrop.
pub fn grid_color() -> Color {
    let (r, g, b) = GRID;
    Color::Rgb(r, g, b)
}
