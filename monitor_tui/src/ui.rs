use std::collections::VecDeque;
use std::f64::consts::PI;

use monitor_core::{MonitorFrame, MonitorSession, MoodState, Rgb, SimulationStep};
use ratatui::layout::{Constraint, Direction, Layout, Margin};
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Rectangle};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const CRADLE_CANVAS_WIDTH: f64 = 200.0;
const CRADLE_CANVAS_HEIGHT: f64 = 100.0;
const CRADLE_BODY_WIDTH: f64 = 80.0;
const CRADLE_BODY_HEIGHT: f64 = 40.0;
const STAND_HEIGHT: f64 = 15.0;
const STAND_BASE_Y: f64 = 10.0;
const CELL_WIDTH: usize = 4;

pub struct StepSummary {
    pub step: u64,
    pub mood: MoodState,
    pub peak: u8,
    pub active_mean: f64,
    pub amplitude: u32,
}

pub struct UiState {
    pub recent_steps: VecDeque<StepSummary>,
    pub max_history: usize,
    pub logs: VecDeque<String>,
    pub max_logs: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            recent_steps: VecDeque::new(),
            max_history: 16,
            logs: VecDeque::new(),
            max_logs: 8,
        }
    }
}

impl UiState {
    /// Remember a simulate step once, newest first.
    pub fn record_step(&mut self, step: &SimulationStep) {
        if self.latest_step().is_some_and(|latest| latest >= step.step) {
            return;
        }
        self.recent_steps.push_front(StepSummary {
            step: step.step,
            mood: step.mood,
            peak: step.matrix.peak(),
            active_mean: step.matrix.active_mean(),
            amplitude: step.amplitude,
        });
        while self.recent_steps.len() > self.max_history {
            self.recent_steps.pop_back();
        }
    }

    pub fn push_log<S: Into<String>>(&mut self, line: S) {
        let mut text: String = line.into();
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        if text.is_empty() {
            return;
        }
        self.logs.push_front(text);
        while self.logs.len() > self.max_logs {
            self.logs.pop_back();
        }
    }

    pub fn latest_step(&self) -> Option<u64> {
        self.recent_steps.front().map(|summary| summary.step)
    }
}

pub fn draw_ui(frame: &mut Frame, state: &UiState, session: &MonitorSession<MonitorFrame>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(5),
            Constraint::Min(5),
        ])
        .split(frame.size());

    let view = session.sinks();
    draw_header(frame, chunks[0], view);
    draw_indicator(frame, chunks[1], view);
    draw_cradle(frame, chunks[2], session.config().rest_x + view.cradle_offset);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((CELL_WIDTH * monitor_core::GRID_SIZE + 2) as u16),
            Constraint::Min(20),
        ])
        .split(chunks[3]);
    draw_grid(frame, middle[0], view);
    draw_recent_steps(frame, middle[1], state);

    draw_commands(frame, chunks[4]);
    draw_logs(frame, chunks[5], state);
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn mood_color(mood: MoodState) -> Color {
    match mood {
        MoodState::Asleep => Color::Gray,
        MoodState::Awake => Color::LightBlue,
        MoodState::Cranky => Color::Blue,
    }
}

fn draw_header(frame: &mut Frame, area: Rect, view: &MonitorFrame) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("MomEcho Baby Simulator");
    let line = Line::from(vec![
        Span::styled(
            view.mood_label.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(view.auto_label.clone(), Style::default().fg(Color::Green)),
        Span::raw(" | q to exit"),
    ]);
    let text = Paragraph::new(line).wrap(Wrap { trim: true });
    frame.render_widget(block, area);
    frame.render_widget(
        text,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn draw_indicator(frame: &mut Frame, area: Rect, view: &MonitorFrame) {
    let block = Block::default().borders(Borders::ALL).title("Intensity");
    let inner = area.inner(&Margin {
        vertical: 1,
        horizontal: 1,
    });
    let bar = Paragraph::new(Line::from(Span::styled(
        " ".repeat(inner.width as usize),
        Style::default().bg(to_color(view.indicator)),
    )));
    frame.render_widget(block, area);
    frame.render_widget(bar, inner);
}

fn draw_cradle(frame: &mut Frame, area: Rect, cx: f64) {
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title("Cradle"))
        .marker(Marker::Braille)
        .background_color(Color::LightYellow)
        .x_bounds([0.0, CRADLE_CANVAS_WIDTH])
        .y_bounds([0.0, CRADLE_CANVAS_HEIGHT])
        .paint(move |ctx| paint_cradle(ctx, cx));
    frame.render_widget(canvas, area);
}

/// Basket with a rounded bottom resting on a trapezoid stand, centred on `cx`.
fn paint_cradle(ctx: &mut Context, cx: f64) {
    let half_body = CRADLE_BODY_WIDTH / 2.0;
    let half_stand = half_body + 10.0;
    let stand_top = STAND_BASE_Y + STAND_HEIGHT;
    let rim = stand_top + CRADLE_BODY_HEIGHT;
    let wood = Color::Rgb(0x8b, 0x45, 0x13);
    let basket = Color::Rgb(0xde, 0xb8, 0x87);

    ctx.draw(&CanvasLine {
        x1: cx - half_stand,
        y1: STAND_BASE_Y,
        x2: cx - half_body,
        y2: stand_top,
        color: wood,
    });
    ctx.draw(&CanvasLine {
        x1: cx + half_stand,
        y1: STAND_BASE_Y,
        x2: cx + half_body,
        y2: stand_top,
        color: wood,
    });
    ctx.draw(&CanvasLine {
        x1: cx - half_body,
        y1: stand_top,
        x2: cx + half_body,
        y2: stand_top,
        color: wood,
    });

    let body_base = stand_top + CRADLE_BODY_HEIGHT / 2.0;
    ctx.draw(&Rectangle {
        x: cx - half_body,
        y: body_base,
        width: CRADLE_BODY_WIDTH,
        height: rim - body_base,
        color: basket,
    });

    let segments = 16;
    let radius_y = body_base - stand_top;
    for i in 0..segments {
        let a0 = PI + PI * i as f64 / segments as f64;
        let a1 = PI + PI * (i + 1) as f64 / segments as f64;
        ctx.draw(&CanvasLine {
            x1: cx + half_body * a0.cos(),
            y1: body_base + radius_y * a0.sin(),
            x2: cx + half_body * a1.cos(),
            y2: body_base + radius_y * a1.sin(),
            color: Color::Black,
        });
    }
}

fn draw_grid(frame: &mut Frame, area: Rect, view: &MonitorFrame) {
    let block = Block::default().borders(Borders::ALL).title("Pressure");
    let lines: Vec<Line> = view
        .cells
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| {
                        Span::styled(
                            " ".repeat(CELL_WIDTH),
                            Style::default().bg(to_color(cell.rgb())),
                        )
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    let paragraph = Paragraph::new(lines);
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn draw_recent_steps(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default().borders(Borders::ALL).title("Recent Steps");
    let lines: Vec<Line> = state
        .recent_steps
        .iter()
        .map(|summary| {
            Line::from(vec![
                Span::styled(
                    format!("step {:>4}", summary.step),
                    Style::default().fg(Color::Yellow),
                ),
                Span::raw(" | "),
                Span::styled(
                    format!("{:<6}", summary.mood.as_str().to_uppercase()),
                    Style::default().fg(mood_color(summary.mood)),
                ),
                Span::raw(" | peak "),
                Span::styled(
                    format!("{:>3}", summary.peak),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(" | mean "),
                Span::raw(format!("{:>6.1}", summary.active_mean)),
                Span::raw(" | amp "),
                Span::styled(
                    format!("{:>2}", summary.amplitude),
                    Style::default().fg(Color::Magenta),
                ),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn draw_commands(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled("s", Style::default().fg(Color::Yellow)),
            Span::raw("      simulate next"),
        ]),
        Line::from(vec![
            Span::styled("a", Style::default().fg(Color::Yellow)),
            Span::raw("      toggle auto-simulate (1s)"),
        ]),
        Line::from(vec![
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw("      close monitor"),
        ]),
    ];
    let block = Block::default().borders(Borders::ALL).title("Commands");
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}

fn draw_logs(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default().borders(Borders::ALL).title("Logs");
    let lines: Vec<Line> = state
        .logs
        .iter()
        .map(|entry| Line::from(Span::raw(entry)))
        .collect();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(block, area);
    frame.render_widget(
        paragraph,
        area.inner(&Margin {
            vertical: 1,
            horizontal: 1,
        }),
    );
}
