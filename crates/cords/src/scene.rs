//! Scene composition: the staged intro and the launch countdown.

use cords_anim::{
    CordField, Countdown, FieldParams, ProgressIndicator, Stages, TextReveal, Tween, art_width,
    fade, field, indicator_width, tinted,
};
use cords_config::{FieldSettings, Settings};
use cords_core::{ColorTheme, EasingKind, SceneKind};
use cords_fonts::{GLYPH_HEIGHT, LOGO};
use log::{debug, info};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    symbols::border,
    text::Line,
    widgets::{Block, Paragraph},
};

/// Title revealed as block art.
pub const TITLE: &str = "CORDS";

/// Subtitle revealed under the title.
pub const SUBTITLE: &str = "COMPOSE RELEASE AND DISTRIBUTION SYSTEM";

/// Label of the launch control.
pub const LAUNCH_LABEL: &str = "LAUNCH A NEW VERSION";

/// Intro delays: title, then logo, then the end of loading.
const INTRO_DELAYS_MS: [u64; 3] = [700, 500, 2_500];

/// Duration of the logo crossfade.
const LOGO_FADE_MS: u64 = 800;

/// Duration of the crossfade between scenes.
const CROSSFADE_MS: u64 = 300;

/// Columns between the title and the logo.
const LOGO_GAP: u16 = 4;

/// Width of the logo art.
const LOGO_WIDTH: u16 = 9;

/// Cord field parameters from the user's field settings.
fn field_params(settings: &FieldSettings) -> FieldParams {
    FieldParams {
        max_cords: settings.max_cords,
        lanes: settings.lanes,
        spawn_chance_percent: settings.spawn_chance_percent,
        rise_speed: settings.rise_speed,
    }
}

/// Intro scene: staged title, logo and loading indicator.
#[derive(Debug)]
pub struct IntroScene {
    stages: Stages,
    subtitle: TextReveal,
    title: Option<TextReveal>,
    logo: Option<Tween>,
    progress: Option<ProgressIndicator>,
}

impl IntroScene {
    fn new(now_ms: u64) -> Self {
        Self {
            stages: Stages::new(&INTRO_DELAYS_MS, now_ms),
            subtitle: TextReveal::new(SUBTITLE, now_ms),
            title: None,
            logo: None,
            progress: Some(ProgressIndicator::new(now_ms)),
        }
    }

    fn update(&mut self, now_ms: u64) {
        let completed = self.stages.update(now_ms);

        if completed >= 1 && self.title.is_none() {
            debug!("intro: showing title");
            self.title = Some(TextReveal::new(TITLE, now_ms));
        }
        if completed >= 2 && self.logo.is_none() {
            debug!("intro: showing logo");
            self.logo = Some(
                Tween::new(0.0, 1.0, LOGO_FADE_MS, EasingKind::Linear).starting_at(now_ms),
            );
        }
        if completed >= 3 && self.progress.take().is_some() {
            info!("intro: loading finished, launch available");
        }

        self.subtitle.update(now_ms);
        if let Some(title) = &mut self.title {
            title.update(now_ms);
        }
        if let Some(logo) = &mut self.logo {
            logo.update(now_ms);
        }
        if let Some(progress) = &mut self.progress {
            progress.update(now_ms);
        }
    }

    /// Current logo alpha, zero until the logo is shown.
    pub fn logo_alpha(&self) -> f32 {
        self.logo.as_ref().map_or(0.0, Tween::value)
    }

    /// Whether the loading indicator is still running.
    pub fn is_loading(&self) -> bool {
        self.progress.is_some()
    }

    /// Whether the launch control is available.
    pub fn is_launch_ready(&self) -> bool {
        self.stages.is_done() && !self.is_loading()
    }

    fn render(&self, frame: &mut Frame, theme: ColorTheme) {
        let area = frame.area();
        let chunks = Layout::vertical([
            Constraint::Fill(1),                        // Top padding
            Constraint::Length(GLYPH_HEIGHT as u16),    // Title and logo
            Constraint::Length(2),                      // Spacing
            Constraint::Length(1),                      // Subtitle
            Constraint::Fill(1),                        // Bottom padding
            Constraint::Length(3),                      // Indicator or launch control
            Constraint::Length(1),                      // Spacing
            Constraint::Length(1),                      // Help text
        ])
        .split(area);

        if let Some(title) = &self.title {
            let row = Layout::horizontal([
                Constraint::Fill(1),
                Constraint::Length(art_width(TITLE) as u16),
                Constraint::Length(LOGO_GAP),
                Constraint::Length(LOGO_WIDTH),
                Constraint::Fill(1),
            ])
            .split(chunks[1]);

            frame.render_widget(Paragraph::new(title.render_art(theme)), row[1]);

            if self.logo.is_some() {
                let style = Style::new().fg(tinted(theme, self.logo_alpha()));
                let logo: Vec<Line> = LOGO.iter().map(|r| Line::styled(*r, style)).collect();
                frame.render_widget(Paragraph::new(logo), row[3]);
            }
        }

        let subtitle = Paragraph::new(self.subtitle.render_line(theme)).alignment(Alignment::Center);
        frame.render_widget(subtitle, chunks[3]);

        match &self.progress {
            Some(progress) => {
                let slot = centered(chunks[5], indicator_width() as u16, 1, 1);
                frame.render_widget(Paragraph::new(progress.render_line(theme)), slot);
            }
            None => render_launch_control(frame, chunks[5], theme),
        }

        let color = theme.color();
        let help = if self.is_launch_ready() {
            Line::from(vec![
                "enter".bold().fg(color),
                " launch  ".dark_gray(),
                "c".bold().fg(color),
                " cycle color  ".dark_gray(),
                "q".bold().fg(color),
                " quit".dark_gray(),
            ])
        } else {
            Line::from(vec![
                "c".bold().fg(color),
                " cycle color  ".dark_gray(),
                "q".bold().fg(color),
                " quit".dark_gray(),
            ])
        };
        frame.render_widget(help.centered(), chunks[7]);
    }
}

/// Countdown scene: the cord field behind the countdown digits.
#[derive(Debug)]
pub struct CountdownScene {
    field: CordField,
    countdown: Countdown,
    caption: Option<TextReveal>,
}

impl CountdownScene {
    fn new(params: FieldParams, seed: Option<u64>, now_ms: u64) -> Self {
        let mut field = match seed {
            Some(seed) => CordField::seeded(params, seed),
            None => CordField::from_entropy(params),
        };
        field.update(now_ms);

        Self {
            field,
            countdown: Countdown::new(now_ms),
            caption: None,
        }
    }

    fn update(&mut self, now_ms: u64) {
        self.field.update(now_ms);

        if self.countdown.update(now_ms)
            && let Some(text) = self.countdown.caption()
            && self.caption.as_ref().is_none_or(|c| c.text() != text)
        {
            self.caption = Some(TextReveal::new(text, now_ms));
        }

        if let Some(caption) = &mut self.caption {
            caption.update(now_ms);
        }
    }

    fn render(&self, frame: &mut Frame, theme: ColorTheme, show_grid: bool) {
        let area = frame.area();
        field::render(
            frame,
            area,
            self.field.cords(),
            self.field.params().lanes,
            show_grid,
            theme,
        );

        let chunks = Layout::vertical([
            Constraint::Length(2),                      // Top padding
            Constraint::Length(1),                      // Caption
            Constraint::Fill(1),                        // Padding
            Constraint::Length(GLYPH_HEIGHT as u16),    // Digit
            Constraint::Fill(1),                        // Padding
            Constraint::Length(1),                      // Help text
        ])
        .split(area);

        if let Some(caption) = &self.caption {
            let caption = Paragraph::new(caption.render_line(theme)).alignment(Alignment::Center);
            frame.render_widget(caption, chunks[1]);
        }

        let digit = Paragraph::new(self.countdown.render_digit(theme)).alignment(Alignment::Center);
        frame.render_widget(digit, chunks[3]);

        let color = theme.color();
        let help = Line::from(vec![
            "c".bold().fg(color),
            " cycle color  ".dark_gray(),
            "q".bold().fg(color),
            " quit".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[5]);
    }
}

/// The active scene together with its state.
#[derive(Debug)]
enum ActiveScene {
    Intro(IntroScene),
    Countdown(CountdownScene),
}

/// The intro fading out underneath the countdown.
#[derive(Debug)]
struct Crossfade {
    /// Frozen at the moment of launch.
    outgoing: IntroScene,
    progress: Tween,
}

/// Owns the active scene and composes it into frames.
#[derive(Debug)]
pub struct Composer {
    active: ActiveScene,
    crossfade: Option<Crossfade>,
    theme: ColorTheme,
    show_grid: bool,
    field_params: FieldParams,
    seed: Option<u64>,
}

impl Composer {
    /// Enter the intro scene at `now_ms`.
    pub fn new(settings: &Settings, now_ms: u64) -> Self {
        info!("entering intro");
        Self {
            active: ActiveScene::Intro(IntroScene::new(now_ms)),
            crossfade: None,
            theme: settings.theme,
            show_grid: settings.show_grid,
            field_params: field_params(&settings.field),
            seed: settings.seed,
        }
    }

    /// Currently selected scene.
    pub fn scene(&self) -> SceneKind {
        match self.active {
            ActiveScene::Intro(_) => SceneKind::Intro,
            ActiveScene::Countdown(_) => SceneKind::Countdown,
        }
    }

    /// Cycle to the next color theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        debug!("theme: {:?}", self.theme);
    }

    /// Advance the active scene to `now_ms`.
    pub fn update(&mut self, now_ms: u64) {
        match &mut self.active {
            ActiveScene::Intro(intro) => intro.update(now_ms),
            ActiveScene::Countdown(countdown) => countdown.update(now_ms),
        }

        let faded = self.crossfade.as_mut().is_some_and(|crossfade| {
            crossfade.progress.update(now_ms);
            crossfade.progress.is_finished()
        });
        if faded {
            debug!("crossfade finished");
            self.crossfade = None;
        }
    }

    /// Handle the launch action.
    ///
    /// Leaves the intro for the countdown once the launch control is shown.
    /// Returns true only for the call that switched scenes.
    pub fn launch(&mut self, now_ms: u64) -> bool {
        let ready = match &self.active {
            ActiveScene::Intro(intro) => intro.is_launch_ready(),
            ActiveScene::Countdown(_) => false,
        };

        match self.scene().next() {
            Some(next) if ready => {
                info!("launch: entering {next:?}");
                let incoming =
                    ActiveScene::Countdown(CountdownScene::new(self.field_params, self.seed, now_ms));
                // The outgoing intro is no longer updated, which cancels its
                // pending stages and indicator.
                if let ActiveScene::Intro(outgoing) = std::mem::replace(&mut self.active, incoming) {
                    self.crossfade = Some(Crossfade {
                        outgoing,
                        progress: Tween::new(0.0, 1.0, CROSSFADE_MS, EasingKind::FastOutSlowIn)
                            .starting_at(now_ms),
                    });
                }
                true
            }
            Some(_) => {
                debug!("launch ignored: intro still loading");
                false
            }
            None => {
                debug!("launch ignored: countdown already running");
                false
            }
        }
    }

    /// Render the active scene, crossfaded with the outgoing one while a
    /// scene change is in progress.
    pub fn render(&self, frame: &mut Frame) {
        match &self.active {
            ActiveScene::Intro(intro) => intro.render(frame, self.theme),
            ActiveScene::Countdown(countdown) => countdown.render(frame, self.theme, self.show_grid),
        }

        let Some(crossfade) = &self.crossfade else {
            return;
        };
        let incoming = frame.buffer_mut().clone();
        frame.buffer_mut().reset();
        crossfade.outgoing.render(frame, self.theme);
        blend_scenes(frame.buffer_mut(), &incoming, crossfade.progress.value());
    }
}

/// Blend the `incoming` scene over the outgoing one already in `buffer`.
///
/// Each layer fades against the backdrop. Where both draw a glyph the
/// outgoing one is kept until the halfway point.
fn blend_scenes(buffer: &mut Buffer, incoming: &Buffer, progress: f32) {
    let area = buffer.area.intersection(incoming.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            let next = &incoming[(x, y)];
            let cell = &mut buffer[(x, y)];
            let show_next =
                is_blank(cell.symbol()) || (!is_blank(next.symbol()) && progress >= 0.5);
            if show_next {
                *cell = next.clone();
                cell.fg = fade(next.fg, progress);
            } else {
                cell.fg = fade(cell.fg, 1.0 - progress);
            }
        }
    }
}

fn is_blank(symbol: &str) -> bool {
    symbol.trim().is_empty()
}

/// Draw the launch control centred in `area`.
fn render_launch_control(frame: &mut Frame, area: Rect, theme: ColorTheme) {
    let width = LAUNCH_LABEL.len() as u16 + 4;
    let slot = centered(area, width, 3, 0);
    // Two cut corners, top left and bottom right.
    let cut_corners = border::Set {
        top_left: "╱",
        bottom_right: "╱",
        ..border::PLAIN
    };
    let button = Paragraph::new(LAUNCH_LABEL)
        .alignment(Alignment::Center)
        .style(Style::new().fg(theme.color()))
        .block(
            Block::bordered()
                .border_set(cut_corners)
                .border_style(Style::new().fg(tinted(theme, 0.6))),
        );
    frame.render_widget(button, slot);
}

/// A `width` x `height` rectangle centred horizontally in `area`,
/// `top` rows below its top edge and clipped to it.
fn centered(area: Rect, width: u16, height: u16, top: u16) -> Rect {
    let width = width.min(area.width);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + top.min(area.height);
    let height = height.min(area.height.saturating_sub(y - area.y));
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn settings() -> Settings {
        Settings {
            seed: Some(7),
            ..Settings::default()
        }
    }

    /// Drive `composer` in 16ms frames from `from` up to and including `to`.
    fn run_frames(composer: &mut Composer, from: u64, to: u64) {
        for now in (from..=to).step_by(16) {
            composer.update(now);
        }
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (area.y..area.bottom())
            .map(|y| {
                (area.x..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn intro(composer: &Composer) -> &IntroScene {
        match &composer.active {
            ActiveScene::Intro(intro) => intro,
            ActiveScene::Countdown(_) => panic!("expected intro"),
        }
    }

    fn countdown(composer: &Composer) -> &CountdownScene {
        match &composer.active {
            ActiveScene::Countdown(countdown) => countdown,
            ActiveScene::Intro(_) => panic!("expected countdown"),
        }
    }

    #[test]
    fn test_intro_stages() {
        let mut composer = Composer::new(&settings(), 0);
        assert_eq!(composer.scene(), SceneKind::Intro);

        run_frames(&mut composer, 0, 688);
        assert!(intro(&composer).title.is_none());
        assert!(intro(&composer).is_loading());

        run_frames(&mut composer, 704, 1_200);
        assert!(intro(&composer).title.is_some());
        assert_eq!(intro(&composer).logo_alpha(), 0.0);

        run_frames(&mut composer, 1_216, 2_400);
        assert!(intro(&composer).logo_alpha() > 0.9);
        assert!(intro(&composer).is_loading());
        assert!(!intro(&composer).is_launch_ready());

        run_frames(&mut composer, 2_416, 4_000);
        assert!(!intro(&composer).is_loading());
        assert!(intro(&composer).is_launch_ready());
    }

    #[test]
    fn test_launch_ignored_while_loading() {
        let mut composer = Composer::new(&settings(), 0);
        run_frames(&mut composer, 0, 1_000);
        assert!(!composer.launch(1_000));
        assert_eq!(composer.scene(), SceneKind::Intro);
    }

    #[test]
    fn test_launch_switches_scene_once() {
        let mut composer = Composer::new(&settings(), 0);
        run_frames(&mut composer, 0, 4_000);

        assert!(composer.launch(4_000));
        assert_eq!(composer.scene(), SceneKind::Countdown);

        assert!(!composer.launch(4_016));
        assert_eq!(composer.scene(), SceneKind::Countdown);
        assert_eq!(countdown(&composer).countdown.value(), None);
    }

    #[test]
    fn test_launch_crossfades_into_countdown() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut composer = Composer::new(&settings(), 0);
        run_frames(&mut composer, 0, 4_000);
        assert!(composer.crossfade.is_none());

        assert!(composer.launch(4_000));
        assert!(composer.crossfade.is_some());
        terminal.draw(|frame| composer.render(frame)).unwrap();
        assert!(buffer_text(terminal.backend().buffer()).contains("LAUNCH"));

        run_frames(&mut composer, 4_016, 4_144);
        let progress = composer.crossfade.as_ref().map(|c| c.progress.value());
        assert!(progress.is_some_and(|p| p > 0.0 && p < 1.0), "{progress:?}");
        assert_eq!(composer.scene(), SceneKind::Countdown);

        run_frames(&mut composer, 4_160, 4_304);
        assert!(composer.crossfade.is_none());
        terminal.draw(|frame| composer.render(frame)).unwrap();
        assert!(!buffer_text(terminal.backend().buffer()).contains("LAUNCH"));
    }

    #[test]
    fn test_blend_scenes_prefers_outgoing_until_halfway() {
        let incoming = Buffer::with_lines(["ab "]);
        let mut early = Buffer::with_lines(["x  "]);
        blend_scenes(&mut early, &incoming, 0.25);
        assert_eq!(early[(0, 0)].symbol(), "x");
        assert_eq!(early[(1, 0)].symbol(), "b");

        let mut late = Buffer::with_lines(["x  "]);
        blend_scenes(&mut late, &incoming, 0.75);
        assert_eq!(late[(0, 0)].symbol(), "a");
        assert_eq!(late[(2, 0)].symbol(), " ");
    }

    #[test]
    fn test_oversized_cord_cap_launches() {
        let settings = Settings::parse("seed = 7\n[field]\nmax_cords = 9223372036854775807").unwrap();
        let mut composer = Composer::new(&settings, 0);
        run_frames(&mut composer, 0, 4_000);
        assert!(composer.launch(4_000));
        run_frames(&mut composer, 4_016, 4_400);
        assert!(countdown(&composer).field.params().max_cords <= 1_000);
    }

    #[test]
    fn test_countdown_scene_composes_field_and_digits() {
        let mut composer = Composer::new(
            &Settings {
                field: FieldSettings {
                    spawn_chance_percent: 100,
                    ..FieldSettings::default()
                },
                ..settings()
            },
            0,
        );
        run_frames(&mut composer, 0, 4_000);
        composer.launch(4_000);

        // First tick lands on the first frame at or after 5000.
        run_frames(&mut composer, 4_000, 5_008);
        let scene = countdown(&composer);
        assert_eq!(scene.countdown.value(), Some(6));
        assert_eq!(scene.caption.as_ref().map(TextReveal::text), Some("LAUNCHING IN..."));
        assert!(!scene.field.cords().is_empty());
        assert!(scene.field.cords().len() <= 15);

        run_frames(&mut composer, 5_024, 12_000);
        let scene = countdown(&composer);
        assert!(scene.countdown.is_complete());
        assert_eq!(scene.caption.as_ref().map(TextReveal::text), Some("LAUNCH COMPLETED"));
    }

    #[test]
    fn test_caption_reveal_persists_across_digits() {
        let mut composer = Composer::new(&settings(), 0);
        run_frames(&mut composer, 0, 4_000);
        composer.launch(4_000);
        run_frames(&mut composer, 4_000, 5_600);
        let before = countdown(&composer).caption.clone();

        run_frames(&mut composer, 5_616, 6_100);
        let scene = countdown(&composer);
        assert_eq!(scene.countdown.value(), Some(5));
        // Same caption text, so the reveal keeps running rather than restarting.
        assert!(scene.caption.as_ref().unwrap().is_finished());
        assert_eq!(before.map(|c| c.visible_dim()), Some(15));
    }

    #[test]
    fn test_render_intro_and_countdown() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let mut composer = Composer::new(&settings(), 0);
        run_frames(&mut composer, 0, 4_000);

        terminal.draw(|frame| composer.render(frame)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains(SUBTITLE));
        assert!(text.contains(LAUNCH_LABEL));

        composer.launch(4_000);
        run_frames(&mut composer, 4_000, 5_600);
        terminal.draw(|frame| composer.render(frame)).unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("LAUNCHING IN..."));
    }

    #[test]
    fn test_theme_cycles() {
        let mut composer = Composer::new(&settings(), 0);
        assert_eq!(composer.theme, ColorTheme::White);
        composer.cycle_theme();
        assert_eq!(composer.theme, ColorTheme::Cyan);
    }

    #[test]
    fn test_centered_clips_to_area() {
        let area = Rect::new(0, 0, 10, 2);
        assert_eq!(centered(area, 4, 3, 0), Rect::new(3, 0, 4, 2));
        assert_eq!(centered(area, 20, 1, 1), Rect::new(0, 1, 10, 1));
    }
}
