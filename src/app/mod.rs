//! Interactive terminal app: canvas, instance panel and quiz.

pub mod config;
mod input;
mod menubar;
mod panel;
mod scheduler;
pub mod state;
mod ui;

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{event, execute, terminal};
use log::{debug, info};

use crate::surface::{PixelCanvas, Surface};
use crate::term::TerminalSession;

use config::AppConfig;
use input::Action;
use state::AppState;
use ui::Layout;

/// Longest the loop sleeps when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);

pub struct App {
    state: AppState,
    canvas: PixelCanvas,
    layout: Layout,
}

impl App {
    /// Build the app from config, loading a custom catalog if one is set.
    pub fn new(config: AppConfig) -> Result<Self> {
        let catalog = config.load_catalog()?;

        let (term_w, term_h) = terminal::size()?;
        let layout = Layout::compute(term_w, term_h);
        let canvas = PixelCanvas::for_terminal(layout.canvas_width, layout.canvas_height, config.unit);
        let (w, h) = canvas.size();

        let mut state = AppState::new(config, catalog, w, h);
        state.add_startup_objects();
        Ok(App {
            state,
            canvas,
            layout,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        let mut session = TerminalSession::enter()?;
        self.main_loop(session.out())
    }

    fn main_loop(&mut self, stdout: &mut io::Stdout) -> Result<()> {
        self.state.sim.redraw(&mut self.canvas);
        self.full_redraw(stdout)?;

        loop {
            let now = Instant::now();
            let timeout = [
                self.state.scheduler.time_until_due(now),
                self.state.reveal.remaining(now),
            ]
            .into_iter()
            .flatten()
            .fold(IDLE_POLL, Duration::min);

            if event::poll(timeout)? {
                let action = input::handle_event(&mut self.state, event::read()?, Instant::now());
                match action {
                    Action::Continue => {}
                    Action::Redraw => {
                        if !self.state.sim.is_running() {
                            self.state.sim.redraw(&mut self.canvas);
                        }
                        self.full_redraw(stdout)?;
                    }
                    Action::Resize => {
                        self.resize()?;
                        self.full_redraw(stdout)?;
                    }
                    Action::Quit => break,
                }
            }

            let now = Instant::now();
            if let Some(handle) = self.state.scheduler.due(now) {
                if self.state.on_frame(handle, &mut self.canvas) {
                    ui::render_canvas(stdout, &self.layout, &self.canvas.to_cells())?;
                    panel::render_right_panel(stdout, &self.layout, &self.state)?;
                    stdout.flush()?;
                }
            }
            if self.state.poll_reveal(now) {
                self.full_redraw(stdout)?;
            }
        }

        info!("quit with {} objects", self.state.sim.instances().len());
        Ok(())
    }

    /// Rebuild the canvas for the current terminal size and relayout.
    fn resize(&mut self) -> Result<()> {
        let (term_w, term_h) = terminal::size()?;
        self.layout = Layout::compute(term_w, term_h);
        self.canvas = PixelCanvas::for_terminal(
            self.layout.canvas_width,
            self.layout.canvas_height,
            self.state.config.unit,
        );
        let (w, h) = self.canvas.size();
        debug!("resized to {term_w}x{term_h}, canvas {w}x{h}");
        self.state.sim.resize(w, h);
        self.state.sim.redraw(&mut self.canvas);
        Ok(())
    }

    fn full_redraw(&self, stdout: &mut io::Stdout) -> Result<()> {
        execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

        menubar::render_menubar(stdout, &self.layout, &self.state)?;
        ui::render_canvas(stdout, &self.layout, &self.canvas.to_cells())?;
        panel::render_right_panel(stdout, &self.layout, &self.state)?;
        ui::render_status(stdout, &self.layout, &self.state)?;

        stdout.flush()?;
        Ok(())
    }
}
