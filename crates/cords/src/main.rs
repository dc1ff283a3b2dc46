use std::time::{Duration, Instant};

use cords_anim::FrameClock;
use cords_config::Settings;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::info;
use ratatui::DefaultTerminal;

mod logging;
mod scene;

use scene::Composer;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let settings = Settings::load()?;
    logging::init(&settings.log_level);
    info!("starting cords at {} fps", settings.frame_rate);

    let terminal = ratatui::init();
    let result = App::new(&settings).run(terminal);
    ratatui::restore();
    info!("exiting");
    result
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Source of frame timestamps.
    clock: FrameClock,
    /// Active scene and its animations.
    composer: Composer,
    /// Target duration of one frame.
    frame_budget: Duration,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(settings: &Settings) -> Self {
        let clock = FrameClock::new();
        Self {
            running: false,
            composer: Composer::new(settings, clock.now_ms()),
            clock,
            frame_budget: settings.frame_budget(),
        }
    }

    /// Run the application's main loop, one iteration per frame.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let frame_start = Instant::now();
            self.composer.update(self.clock.now_ms());
            terminal.draw(|frame| self.composer.render(frame))?;

            let remaining = self.frame_budget.saturating_sub(frame_start.elapsed());
            self.handle_crossterm_events(remaining)?;
        }
        Ok(())
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most `timeout` so the next frame starts on time.
    fn handle_crossterm_events(&mut self, timeout: Duration) -> color_eyre::Result<()> {
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(_) => {}
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('l')) => self.launch(),
            (_, KeyCode::Char('c')) => self.composer.cycle_theme(),
            _ => {}
        }
    }

    /// Forward the launch action to the composer.
    fn launch(&mut self) {
        self.composer.launch(self.clock.now_ms());
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
