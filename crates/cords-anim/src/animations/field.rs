//! Rising cord field (stateful).
//!
//! A bounded set of short vertical segments that spawn at the bottom of the
//! screen on random lanes and rise until they leave through the top.

use cords_core::ColorTheme;
use rand::{Rng, SeedableRng, rngs::StdRng};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::chars::{CORD_BODY, CORD_HEAD, GRID_CROSS, GRID_HORIZONTAL, GRID_VERTICAL};
use crate::color::{grid_color, tinted};

/// Position a new cord spawns at, in percent of the screen height.
pub const SPAWN_POSITION: f32 = 100.0;

/// Cords at or above this position are culled.
pub const CULL_POSITION: f32 = -10.0;

/// Visible length of a cord, in percent of the screen height.
pub const CORD_LENGTH: f32 = 7.0;

/// Source of uniform integer draws for the simulator.
pub trait Dice {
    /// Draw an integer in `[0, sides)`. Zero sides always yields 0.
    fn roll(&mut self, sides: u32) -> u32;
}

impl<R: Rng> Dice for R {
    fn roll(&mut self, sides: u32) -> u32 {
        if sides == 0 { 0 } else { self.gen_range(0..sides) }
    }
}

/// Tunables for the cord field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldParams {
    /// Maximum number of live cords.
    pub max_cords: usize,
    /// Number of lanes cords can spawn on.
    pub lanes: u32,
    /// Chance, out of 100, that a frame spawns a cord.
    pub spawn_chance_percent: u32,
    /// Rise speed in percent of the screen height per second.
    pub rise_speed: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            max_cords: 15,
            lanes: 25,
            spawn_chance_percent: 7,
            rise_speed: 50.0,
        }
    }
}

/// A single live cord.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cord {
    /// Lane (column index) the cord travels on.
    pub lane: u32,
    /// Position of the cord's head, in percent of the screen height.
    pub position: f32,
}

/// Cord field simulator.
#[derive(Debug)]
pub struct CordField<D: Dice = StdRng> {
    cords: Vec<Cord>,
    params: FieldParams,
    dice: D,
    last_update_ms: Option<u64>,
}

impl CordField<StdRng> {
    /// Create a field with a reproducible random sequence.
    pub fn seeded(params: FieldParams, seed: u64) -> Self {
        Self::new(params, StdRng::seed_from_u64(seed))
    }

    /// Create a field seeded from the operating system.
    pub fn from_entropy(params: FieldParams) -> Self {
        Self::new(params, StdRng::from_entropy())
    }
}

impl<D: Dice> CordField<D> {
    /// Create an empty field drawing randomness from `dice`.
    pub fn new(params: FieldParams, dice: D) -> Self {
        Self {
            cords: Vec::new(),
            params,
            dice,
            last_update_ms: None,
        }
    }

    /// Advance the simulation by `elapsed_secs`.
    ///
    /// Negative or NaN elapsed time counts as zero. Culling happens before
    /// spawning so the live count never exceeds the cap.
    pub fn advance(&mut self, elapsed_secs: f32) {
        let elapsed = if elapsed_secs > 0.0 { elapsed_secs } else { 0.0 };
        let rise = elapsed * self.params.rise_speed;

        self.cords.retain_mut(|cord| {
            cord.position -= rise;
            cord.position > CULL_POSITION
        });

        if self.cords.len() < self.params.max_cords
            && self.dice.roll(100) < self.params.spawn_chance_percent
        {
            let lane = self.dice.roll(self.params.lanes);
            self.cords.push(Cord {
                lane,
                position: SPAWN_POSITION,
            });
        }
    }

    /// Advance using a frame timestamp in milliseconds.
    ///
    /// The first frame advances by zero, as does any timestamp earlier
    /// than the previous one.
    pub fn update(&mut self, now_ms: u64) {
        let delta_ms = match self.last_update_ms {
            Some(prev) => now_ms.saturating_sub(prev),
            None => 0,
        };
        self.last_update_ms = Some(now_ms);
        self.advance(delta_ms as f32 / 1000.0);
    }

    /// Live cords, oldest first.
    pub fn cords(&self) -> &[Cord] {
        &self.cords
    }

    /// Field parameters.
    pub fn params(&self) -> &FieldParams {
        &self.params
    }
}

/// Cell geometry of the field for a given area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldGrid {
    pub width: u16,
    pub height: u16,
    /// Columns between lanes.
    pub col_spacing: u16,
    /// Rows between horizontal grid lines.
    pub row_spacing: u16,
}

impl FieldGrid {
    /// Fit `lanes` lanes across `width` columns.
    pub fn new(width: u16, height: u16, lanes: u32) -> Self {
        let lanes = lanes.clamp(1, u16::MAX as u32) as u16;
        let col_spacing = (width / lanes).max(1);
        Self {
            width,
            height,
            col_spacing,
            // Terminal cells are roughly twice as tall as they are wide.
            row_spacing: (col_spacing / 2).max(1),
        }
    }

    /// Screen column of a lane.
    pub fn lane_column(&self, lane: u32) -> u32 {
        lane.saturating_mul(self.col_spacing as u32)
    }

    /// Grid line character at a cell, if any.
    fn grid_char(&self, x: u16, y: u16) -> Option<char> {
        if self.col_spacing < 2 {
            return None;
        }
        let vertical = x > 0 && x % self.col_spacing == 0;
        let horizontal = y > 0 && y % self.row_spacing == 0;
        match (vertical, horizontal) {
            (true, true) => Some(GRID_CROSS),
            (true, false) => Some(GRID_VERTICAL),
            (false, true) => Some(GRID_HORIZONTAL),
            (false, false) => None,
        }
    }
}

/// Screen-space extent of a cord.
#[derive(Debug, Clone, Copy)]
struct CordSpan {
    column: u16,
    head: f32,
    tail: f32,
}

impl CordSpan {
    fn new(cord: &Cord, grid: &FieldGrid) -> Option<Self> {
        let column = grid.lane_column(cord.lane);
        if column >= grid.width as u32 {
            return None;
        }

        let height = grid.height as f32;
        let head = height * (cord.position / 100.0).min(1.0);
        let tail = height * ((cord.position + CORD_LENGTH) / 100.0).min(1.0);
        if tail <= head {
            return None;
        }

        Some(Self {
            column: column as u16,
            head,
            tail,
        })
    }
}

/// Alpha along a cord, `f` running from the head (0.0) to the tail (1.0).
pub fn cord_alpha(f: f32) -> f32 {
    let f = f.clamp(0.0, 1.0);
    if f <= 0.3 {
        1.0 - 0.1 * (f / 0.3)
    } else {
        0.9 * (1.0 - (f - 0.3) / 0.7)
    }
}

/// Render a single field cell.
fn render_char(
    spans: &[CordSpan],
    grid: &FieldGrid,
    x: u16,
    y: u16,
    show_grid: bool,
    theme: ColorTheme,
) -> Span<'static> {
    let row = y as f32;
    let mut best: Option<(f32, char)> = None;

    for span in spans.iter().filter(|s| s.column == x) {
        // Cell [row, row + 1) overlaps the segment [head, tail)
        if row + 1.0 <= span.head || row >= span.tail {
            continue;
        }
        let f = (row.max(span.head) - span.head) / (span.tail - span.head);
        let alpha = cord_alpha(f);
        let ch = if row <= span.head { CORD_HEAD } else { CORD_BODY };
        if best.is_none_or(|(a, _)| alpha > a) {
            best = Some((alpha, ch));
        }
    }

    if let Some((alpha, ch)) = best {
        return Span::styled(ch.to_string(), Style::new().fg(tinted(theme, alpha)));
    }

    match grid.grid_char(x, y) {
        Some(ch) if show_grid => Span::styled(ch.to_string(), Style::new().fg(grid_color())),
        _ => Span::raw(" "),
    }
}

/// Render the grid and cords into `area`.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    cords: &[Cord],
    lanes: u32,
    show_grid: bool,
    theme: ColorTheme,
) {
    let grid = FieldGrid::new(area.width, area.height, lanes);
    let spans: Vec<CordSpan> = cords
        .iter()
        .filter_map(|c| CordSpan::new(c, &grid))
        .collect();

    let lines: Vec<Line> = (0..area.height)
        .map(|y| {
            let cells: Vec<Span> = (0..area.width)
                .map(|x| render_char(&spans, &grid, x, y, show_grid, theme))
                .collect();
            Line::from(cells)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), area);
}
