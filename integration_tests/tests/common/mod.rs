#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use monitor_core::{
    AutoLabelSink, CellColor, CellGridSink, CradleSink, IndicatorSink, MonitorConfig,
    MonitorSession, MoodLabelSink, Rgb,
};

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

pub fn seeded_config(seed: u64) -> MonitorConfig {
    MonitorConfig {
        seed: Some(seed),
        ..MonitorConfig::default()
    }
}

pub fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[derive(Debug, Clone, PartialEq)]
pub enum SinkEvent {
    MoodLabel(String),
    Indicator(Rgb),
    Cell(usize, usize, CellColor),
    AutoLabel(String),
    Cradle(f64),
}

/// Sink that records every widget update in call order.
#[derive(Debug, Default)]
pub struct RecordingSinks {
    pub events: Vec<SinkEvent>,
}

impl RecordingSinks {
    pub fn cradle_moves(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SinkEvent::Cradle(_)))
            .count()
    }

    pub fn cradle_offset(&self) -> f64 {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Cradle(dx) => Some(*dx),
                _ => None,
            })
            .sum()
    }

    pub fn last_mood_label(&self) -> Option<&str> {
        self.events.iter().rev().find_map(|event| match event {
            SinkEvent::MoodLabel(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

impl CellGridSink for RecordingSinks {
    fn paint_cell(&mut self, row: usize, col: usize, color: CellColor) {
        self.events.push(SinkEvent::Cell(row, col, color));
    }
}

impl MoodLabelSink for RecordingSinks {
    fn set_mood_label(&mut self, text: &str) {
        self.events.push(SinkEvent::MoodLabel(text.to_string()));
    }
}

impl IndicatorSink for RecordingSinks {
    fn set_indicator(&mut self, color: Rgb) {
        self.events.push(SinkEvent::Indicator(color));
    }
}

impl AutoLabelSink for RecordingSinks {
    fn set_auto_label(&mut self, text: &str) {
        self.events.push(SinkEvent::AutoLabel(text.to_string()));
    }
}

impl CradleSink for RecordingSinks {
    fn move_cradle(&mut self, dx: f64) {
        self.events.push(SinkEvent::Cradle(dx));
    }
}

pub fn recording_session(seed: u64) -> MonitorSession<RecordingSinks> {
    MonitorSession::new(&seeded_config(seed), RecordingSinks::default())
        .expect("seeded config is valid")
}

/// Pump `session` every `step_ms` from `from_ms` (exclusive) up to `to_ms`.
pub fn run_until<S: monitor_core::MonitorSinks>(
    session: &mut MonitorSession<S>,
    from_ms: u64,
    to_ms: u64,
    step_ms: u64,
) -> usize {
    let mut fired = 0;
    let mut now = from_ms;
    while now < to_ms {
        now = (now + step_ms).min(to_ms);
        fired += session.pump(ms(now));
    }
    fired
}
