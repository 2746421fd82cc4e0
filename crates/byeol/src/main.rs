use std::io::stdout;
use std::time::{Duration, Instant};

use byeol_config::Config;
use byeol_core::Palette;
use byeol_engine::{FieldEngine, Scheduler, Tickable, TrailEngine};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::{
    DefaultTerminal, Frame,
    layout::Rect,
    style::Stylize,
    text::Line,
    widgets::Paragraph,
};

mod sparkles;
mod surface;

use sparkles::GlyphHost;
use surface::CellSurface;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // Config loads (and may warn) before the alternate screen takes over
    // stderr.
    env_logger::init();
    let config = Config::load();
    let terminal = ratatui::init();
    let result = run(terminal, config);
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn run(mut terminal: DefaultTerminal, config: Config) -> color_eyre::Result<()> {
    execute!(stdout(), EnableMouseCapture)?;
    let size = terminal.size()?;
    App::new(config, size.width, size.height)?.run(terminal)
}

/// The main application: owns both engines, the frame scheduler, and the
/// render surface.
pub struct App {
    /// Is the application running?
    running: bool,
    /// Target delay between frames.
    frame_interval: Duration,
    /// Epoch for the monotonic frame timestamps.
    started: Instant,
    scheduler: Scheduler,
    field: FieldEngine,
    trail: TrailEngine<GlyphHost>,
    trail_enabled: bool,
    /// Current palette, cycled with `c`.
    palette: Palette,
    surface: CellSurface,
    /// Accumulated wheel offset handed to the field as absolute scroll.
    scroll_x: f32,
    scroll_y: f32,
}

impl App {
    /// Construct a new instance of [`App`] over a terminal viewport.
    pub fn new(config: Config, width: u16, height: u16) -> color_eyre::Result<Self> {
        let palette = config.field.palette;
        let field = FieldEngine::new(config.field, width as f32, height as f32)?;
        let trail = TrailEngine::new(config.trail, GlyphHost::default())?;

        Ok(Self {
            running: false,
            frame_interval: Duration::from_millis(config.frame_interval_ms.max(1)),
            started: Instant::now(),
            scheduler: Scheduler::new(),
            field,
            trail,
            trail_enabled: config.trail_enabled,
            palette,
            surface: CellSurface::new(width, height),
            scroll_x: 0.0,
            scroll_y: 0.0,
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let now_ms = self.now_ms();
            self.step(now_ms);
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// Advance both engines one frame.
    fn step(&mut self, now_ms: u64) {
        let trail_enabled = self.trail_enabled;
        let Self {
            scheduler,
            field,
            trail,
            ..
        } = self;

        if trail_enabled {
            let mut components: [&mut dyn Tickable; 2] = [field, trail];
            scheduler.step(now_ms, &mut components);
        } else {
            let mut components: [&mut dyn Tickable; 1] = [field];
            scheduler.step(now_ms, &mut components);
        }
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Resync the surface if the terminal changed size under us.
        if area.width != self.surface.width() || area.height != self.surface.height() {
            self.surface.resize(area.width, area.height);
            self.field.set_viewport(area.width as f32, area.height as f32);
        }

        self.field.render(&mut self.surface);
        frame.render_widget(Paragraph::new(self.surface.to_lines()), area);

        if self.trail_enabled {
            self.trail.host().render(frame.buffer_mut());
        }

        if area.height > 0 {
            let help = Line::from(vec![
                "q".bold().cyan(),
                " quit  ".dark_gray(),
                "p".bold().cyan(),
                " parallax  ".dark_gray(),
                "c".bold().cyan(),
                " palette  ".dark_gray(),
                "t".bold().cyan(),
                " trail".dark_gray(),
            ])
            .centered();
            let bottom = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            frame.render_widget(help, bottom);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polling with the frame interval as timeout keeps the animation
    /// smooth while events arrive between frames.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.frame_interval)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(width, height) => {
                    self.field.set_viewport(width as f32, height as f32);
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
            (_, KeyCode::Char('p')) => self.toggle_parallax(),
            (_, KeyCode::Char('c')) => self.cycle_palette(),
            (_, KeyCode::Char('t')) => self.toggle_trail(),
            _ => {}
        }
    }

    /// Handles pointer movement and wheel scrolling. Handlers only ever
    /// overwrite input state; the engines read it on the next tick.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                let (x, y) = (mouse.column as f32, mouse.row as f32);
                self.field.set_pointer(x, y);
                if self.trail_enabled {
                    let now_ms = self.now_ms();
                    self.trail.on_pointer_move(x, y, now_ms);
                }
            }
            MouseEventKind::ScrollUp => self.scroll_by(0.0, -1.0),
            MouseEventKind::ScrollDown => self.scroll_by(0.0, 1.0),
            MouseEventKind::ScrollLeft => self.scroll_by(-1.0, 0.0),
            MouseEventKind::ScrollRight => self.scroll_by(1.0, 0.0),
            _ => {}
        }
    }

    /// Accumulate wheel movement and hand the field the new absolute
    /// offset.
    fn scroll_by(&mut self, dx: f32, dy: f32) {
        self.scroll_x += dx;
        self.scroll_y += dy;
        self.field.set_scroll(self.scroll_x, self.scroll_y);
    }

    /// Force parallax on or off, skipping the warm-up window.
    fn toggle_parallax(&mut self) {
        let active = self.field.parallax_active();
        self.field.set_parallax(!active);
    }

    /// Cycle through available palettes.
    fn cycle_palette(&mut self) {
        self.palette = self.palette.next();
        self.field.set_palette(self.palette);
    }

    /// Toggle the trail engine. Disabling it clears the live sparkles.
    fn toggle_trail(&mut self) {
        self.trail_enabled = !self.trail_enabled;
        if !self.trail_enabled {
            self.trail.clear();
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
