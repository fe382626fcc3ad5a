/// Terminal frontend: drives the knot animation and shows it with crossterm
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use knot3d_core::{animation::knot_at, AnimationFrame, Animator, FrameStats, KnotParams, TorusKnot};

pub mod config;
pub mod error;
pub mod renderer;

pub use config::{Command, Config, ConfigError, USAGE};
pub use error::AppError;
pub use renderer::TerminalRenderer;

/// Rotation applied per key press (radians)
const NUDGE: f64 = 0.1;

/// Text rows used by the header above the image
const HEADER_LINES: u16 = 1;
/// Text rows used by the footer below the image
const FOOTER_LINES: u16 = 1;

/// Main application struct for the terminal knot animation
pub struct TerminalApp {
    config: Config,
    animator: Animator,
    knot: TorusKnot,
    renderer: TerminalRenderer,
    stats: FrameStats,
    rebuilds: u64,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mut config: Config) -> io::Result<Self> {
        if config.fit_terminal {
            let (columns, rows) = terminal::size()?;
            (config.width, config.height) = fit_to_terminal(columns, rows);
        }

        let mut animator = Animator::new();
        animator.set_auto_rotate(config.auto_rotate);
        let knot = TorusKnot::with_resolution(knot_at(0.0), config.resolution);

        Ok(Self {
            renderer: TerminalRenderer::new(config.width, config.height),
            config,
            animator,
            knot,
            stats: FrameStats::default(),
            rebuilds: 0,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        first_error([
            result,
            terminal::disable_raw_mode(),
            execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show),
        ])
    }

    /// Frames produced so far
    pub fn frames_rendered(&self) -> u64 {
        self.animator.frame()
    }

    pub fn knot_params(&self) -> KnotParams {
        self.knot.params()
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running && !self.finished() {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::ZERO)? {
                let event = event::read()?;
                self.handle_event(event)?;
            }

            // Update and render
            let frame = self.step();
            self.draw(&frame)?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.config.frame_delay {
                std::thread::sleep(self.config.frame_delay - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn finished(&self) -> bool {
        self.config
            .max_frames
            .is_some_and(|max| self.animator.frame() >= max)
    }

    /// Advance the animation by one frame and rasterize it
    fn step(&mut self) -> AnimationFrame {
        let frame = self.animator.next_frame();

        if frame.regenerate_due {
            if let Some(knot) = self.knot.regenerated(frame.knot) {
                self.knot = knot;
                self.rebuilds += 1;
            }
        }

        self.stats = self.renderer.render_mesh(self.knot.mesh(), &frame.params);
        frame
    }

    fn handle_event(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Resize(columns, rows) if self.config.fit_terminal => {
                (self.config.width, self.config.height) = fit_to_terminal(columns, rows);
                self.renderer = TerminalRenderer::new(self.config.width, self.config.height);
                execute!(stdout(), terminal::Clear(ClearType::All))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, KeyEvent { code, modifiers, .. }: KeyEvent) {
        match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
            }
            KeyCode::Char(' ') => {
                self.animator.toggle_auto_rotate();
            }
            KeyCode::Char('w') | KeyCode::Up => {
                self.animator.nudge(NUDGE, 0.0, 0.0);
            }
            KeyCode::Char('s') | KeyCode::Down => {
                self.animator.nudge(-NUDGE, 0.0, 0.0);
            }
            KeyCode::Char('a') | KeyCode::Left => {
                self.animator.nudge(0.0, -NUDGE, 0.0);
            }
            KeyCode::Char('d') | KeyCode::Right => {
                self.animator.nudge(0.0, NUDGE, 0.0);
            }
            KeyCode::Char('e') => {
                self.animator.nudge(0.0, 0.0, NUDGE);
            }
            KeyCode::Char('r') => {
                self.animator.nudge(0.0, 0.0, -NUDGE);
            }
            _ => {}
        }
    }

    fn draw(&self, frame: &AnimationFrame) -> io::Result<()> {
        let mut stdout = stdout();

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(header(&frame.knot, frame.params.zoom, self.fps)),
            ResetColor
        )?;

        self.renderer.draw(&mut stdout, HEADER_LINES)?;

        queue!(
            stdout,
            cursor::MoveTo(0, footer_row(self.renderer.text_lines())),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::DarkGrey),
            Print(footer(&self.stats, self.rebuilds, self.animator.auto_rotate())),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

/// Framebuffer size filling a terminal of `columns × rows`, leaving room for
/// the header and footer
pub fn fit_to_terminal(columns: u16, rows: u16) -> (usize, usize) {
    let image_rows = rows.saturating_sub(HEADER_LINES + FOOTER_LINES).max(1);
    (columns.max(1) as usize, image_rows as usize * 2)
}

/// Text row of the footer below `text_lines` rows of image, kept on the last
/// row `MoveTo` can address
pub fn footer_row(text_lines: usize) -> u16 {
    u16::try_from(text_lines)
        .unwrap_or(u16::MAX)
        .saturating_add(HEADER_LINES)
        .min(u16::MAX - 1)
}

/// First error among steps that have all already run
fn first_error<const N: usize>(results: [io::Result<()>; N]) -> io::Result<()> {
    results.into_iter().collect()
}

/// Status line; `knot` is the shape the animation is heading for, which
/// can run ahead of the mesh on screen until the next rebuild
pub fn header(knot: &KnotParams, zoom: f64, fps: f32) -> String {
    format!(
        "Dynamic Torus Knot | ({},{}) Zoom:{:.1}x | Color Cycling | FPS: {:.1}",
        knot.p, knot.q, zoom, fps
    )
}

pub fn footer(stats: &FrameStats, rebuilds: u64, auto_rotate: bool) -> String {
    format!(
        "Space={} WASD/Arrows=Rotate E/R=Roll Q=Quit | drawn {}/{} | rebuilds {}",
        if auto_rotate { "Pause" } else { "Resume" },
        stats.drawn,
        stats.transformed,
        rebuilds
    )
}
