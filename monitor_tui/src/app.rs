use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use monitor_core::{MonitorFrame, MonitorSession};
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use tracing::{info, trace};

use crate::ui::{draw_ui, UiState};

const FRAME_INTERVAL: Duration = Duration::from_millis(20);
const IDLE_POLL: Duration = Duration::from_millis(50);

pub struct MonitorApp {
    terminal: Terminal<CrosstermBackend<std::io::Stdout>>,
    ui_state: UiState,
    session: MonitorSession<MonitorFrame>,
    log_receiver: Receiver<String>,
    started: Instant,
}

impl MonitorApp {
    pub fn new(
        session: MonitorSession<MonitorFrame>,
        log_receiver: Receiver<String>,
    ) -> Result<Self> {
        let stdout = std::io::stdout();
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        crossterm::terminal::enable_raw_mode()?;
        terminal.clear()?;
        terminal.hide_cursor()?;
        Ok(Self {
            terminal,
            ui_state: UiState::default(),
            session,
            log_receiver,
            started: Instant::now(),
        })
    }

    pub fn run(mut self) -> Result<()> {
        self.started = Instant::now();
        self.session.start();
        let mut last_draw: Option<Instant> = None;

        loop {
            self.session.pump(self.started.elapsed());
            if let Some(step) = self.session.state().last_step.as_ref() {
                self.ui_state.record_step(step);
            }

            while let Ok(line) = self.log_receiver.try_recv() {
                self.ui_state.push_log(line);
            }

            if last_draw.map_or(true, |at| at.elapsed() >= FRAME_INTERVAL) {
                let session = &self.session;
                let ui_state = &self.ui_state;
                self.terminal.draw(|frame| draw_ui(frame, ui_state, session))?;
                last_draw = Some(Instant::now());
            }

            let timeout = self
                .session
                .time_until_next(self.started.elapsed())
                .unwrap_or(IDLE_POLL)
                .min(IDLE_POLL);
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('s') | KeyCode::Char(' ') => {
                            if let Some(step) = self.session.on_simulate_clicked() {
                                trace!(step = step.step, "Manual simulate");
                                self.ui_state.record_step(&step);
                            }
                        }
                        KeyCode::Char('a') | KeyCode::Char('A') => {
                            let enabled = self.session.on_auto_toggled();
                            info!("Auto-simulate {}", if enabled { "enabled" } else { "paused" });
                        }
                        _ => {}
                    }
                }
            }
        }

        // Cancel outstanding ticks before the terminal is handed back.
        self.session.on_window_close();
        self.terminal.show_cursor()?;
        crossterm::terminal::disable_raw_mode()?;
        Ok(())
    }
}
