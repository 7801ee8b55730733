mod host;
mod logging;

use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::{
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
};
use emberdrift_background::{AnimationLoop, BackgroundState, Debouncer, FrameOutcome};
use emberdrift_canvas::PixelCanvas;
use emberdrift_config::Config;
use emberdrift_core::BackgroundStyle;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
    style::{Color, Stylize},
    text::Line,
};
use tracing::{debug, info, warn};

use crate::host::CanvasWidget;

/// Event poll timeout while animating, a little above the frame rate.
const ACTIVE_POLL: Duration = Duration::from_millis(1000 / 60);
/// Event poll timeout while nothing moves.
const IDLE_POLL: Duration = Duration::from_millis(100);
/// Accent used for the key hints.
const ACCENT: Color = Color::Rgb(0xc8, 0x9b, 0x3c);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = Config::load()?;
    logging::init(&config)?;
    write_default_config(&config);

    let terminal = ratatui::init();
    execute!(stdout(), EnableFocusChange)?;
    let result = App::new(config).run(terminal);
    if let Err(err) = execute!(stdout(), DisableFocusChange) {
        warn!(%err, "failed to disable focus reporting");
    }
    ratatui::restore();
    result
}

/// Create the config file on first run so there is something to edit.
fn write_default_config(config: &Config) {
    if Config::path().is_none_or(|path| path.exists()) {
        return;
    }
    match config.save() {
        Ok(()) => info!("wrote default config"),
        Err(err) => warn!(%err, "could not write default config"),
    }
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    config: Config,
    /// Is the application running?
    running: bool,
    /// Style to use when the background is (re)attached.
    style: BackgroundStyle,
    seed: u64,
    /// Absent until the terminal is large enough to draw into.
    animation: Option<AnimationLoop<PixelCanvas>>,
    /// Pending terminal size, applied once resizing settles.
    resize: Debouncer<(u16, u16)>,
    started: Instant,
    focused: bool,
    paused: bool,
    /// Something other than the animation changed and needs a redraw.
    dirty: bool,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let seed = config.seed_or_clock();
        Self {
            style: config.style,
            seed,
            config,
            running: false,
            animation: None,
            resize: Debouncer::default(),
            started: Instant::now(),
            focused: true,
            paused: false,
            dirty: true,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        let size = terminal.size()?;
        self.rebuild(size.width, size.height);

        while self.running {
            let now = self.now_ms();
            if let Some((cols, rows)) = self.resize.poll(now) {
                self.rebuild(cols, rows);
            }
            let outcome = self.animation.as_mut().and_then(|a| a.step(now));
            if outcome == Some(FrameOutcome::Painted) || self.dirty {
                terminal.draw(|frame| self.render(frame))?;
                self.dirty = false;
            }
            self.handle_crossterm_events()?;
        }

        if let Some(animation) = self.animation.as_mut() {
            animation.stop();
        }
        Ok(())
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    /// Size the background for a `cols` x `rows` terminal. The last row is
    /// kept for the key hints.
    fn rebuild(&mut self, cols: u16, rows: u16) {
        let viewport = self.config.viewport(cols, rows.saturating_sub(1));
        debug!(cols, rows, ?viewport, "rebuilding background");
        if !viewport.is_empty()
            && let Some(animation) = self.animation.as_mut()
        {
            animation.configure(viewport);
        } else {
            let mut state = BackgroundState::new(self.style, self.seed);
            state.set_visible(self.is_visible(), self.now_ms());
            self.animation =
                AnimationLoop::attach(PixelCanvas::for_viewport(viewport), viewport, state);
        }
        self.dirty = true;
    }

    fn is_visible(&self) -> bool {
        self.focused && !self.paused
    }

    fn sync_visibility(&mut self) {
        let visible = self.is_visible();
        let now = self.now_ms();
        if let Some(animation) = self.animation.as_mut() {
            animation.state_mut().set_visible(visible, now);
        }
        self.dirty = true;
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let chunks =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).split(frame.area());

        if let Some(animation) = &self.animation {
            frame.render_widget(CanvasWidget::new(animation.surface()), chunks[0]);
        }

        let status = if self.paused { " resume" } else { " pause" };
        let help = Line::from(vec![
            "q".bold().fg(ACCENT),
            " quit  ".dark_gray(),
            "b".bold().fg(ACCENT),
            format!(" background: {}  ", self.style.name()).dark_gray(),
            "p".bold().fg(ACCENT),
            status.dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = match (&self.animation, self.is_visible()) {
            (Some(_), true) => ACTIVE_POLL,
            _ => IDLE_POLL,
        };
        let timeout = match self.resize.remaining_ms(self.now_ms()) {
            Some(ms) => timeout.min(Duration::from_secs_f64(ms.max(0.0) / 1000.0)),
            None => timeout,
        };
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Resize(cols, rows) => {
                    let now = self.now_ms();
                    self.resize.notify(now, (cols, rows));
                }
                Event::FocusGained => {
                    self.focused = true;
                    self.sync_visibility();
                }
                Event::FocusLost => {
                    self.focused = false;
                    self.sync_visibility();
                }
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
            (_, KeyCode::Char('b')) => self.cycle_style(),
            (_, KeyCode::Char('p')) => self.toggle_pause(),
            _ => {}
        }
    }

    /// Cycle through the available backgrounds.
    fn cycle_style(&mut self) {
        self.style = self.style.next();
        if let Some(animation) = self.animation.as_mut() {
            animation.state_mut().set_style(self.style);
        }
        self.dirty = true;
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        info!(paused = self.paused, "pause toggled");
        self.sync_visibility();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
