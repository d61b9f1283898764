//! Display capabilities the session writes to.
//!
//! A UI shell implements these traits for its widgets; [`MonitorFrame`] is a
//! plain in-memory surface that shells can draw from directly.

use crate::pressure::GRID_SIZE;
use crate::render::{CellColor, CellColors, Rgb};

pub const INITIAL_MOOD_LABEL: &str = "State: -";

pub trait CellGridSink {
    fn paint_cell(&mut self, row: usize, col: usize, color: CellColor);
}

pub trait MoodLabelSink {
    fn set_mood_label(&mut self, text: &str);
}

pub trait IndicatorSink {
    fn set_indicator(&mut self, color: Rgb);
}

pub trait AutoLabelSink {
    fn set_auto_label(&mut self, text: &str);
}

/// The movable cradle graphic.
pub trait CradleSink {
    fn move_cradle(&mut self, dx: f64);
}

/// Everything a monitor session needs from the shell.
pub trait MonitorSinks:
    CellGridSink + MoodLabelSink + IndicatorSink + AutoLabelSink + CradleSink
{
}

impl<T> MonitorSinks for T where
    T: CellGridSink + MoodLabelSink + IndicatorSink + AutoLabelSink + CradleSink
{
}

pub fn auto_label(enabled: bool) -> &'static str {
    if enabled {
        "Auto: ON"
    } else {
        "Auto: OFF"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonitorFrame {
    pub cells: CellColors,
    pub mood_label: String,
    pub indicator: Rgb,
    pub auto_label: String,
    /// Horizontal displacement of the cradle from where it was drawn.
    pub cradle_offset: f64,
    pub cells_painted: u64,
    pub cradle_moves: u64,
}

impl Default for MonitorFrame {
    fn default() -> Self {
        Self {
            cells: [[CellColor::Empty; GRID_SIZE]; GRID_SIZE],
            mood_label: INITIAL_MOOD_LABEL.to_string(),
            indicator: crate::mood::MoodState::Asleep.indicator_color(),
            auto_label: auto_label(false).to_string(),
            cradle_offset: 0.0,
            cells_painted: 0,
            cradle_moves: 0,
        }
    }
}

impl MonitorFrame {
    pub fn cell(&self, row: usize, col: usize) -> Option<CellColor> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }
}

impl CellGridSink for MonitorFrame {
    fn paint_cell(&mut self, row: usize, col: usize, color: CellColor) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = color;
            self.cells_painted += 1;
        }
    }
}

impl MoodLabelSink for MonitorFrame {
    fn set_mood_label(&mut self, text: &str) {
        self.mood_label.clear();
        self.mood_label.push_str(text);
    }
}

impl IndicatorSink for MonitorFrame {
    fn set_indicator(&mut self, color: Rgb) {
        self.indicator = color;
    }
}

impl AutoLabelSink for MonitorFrame {
    fn set_auto_label(&mut self, text: &str) {
        self.auto_label.clear();
        self.auto_label.push_str(text);
    }
}

impl CradleSink for MonitorFrame {
    fn move_cradle(&mut self, dx: f64) {
        self.cradle_offset += dx;
        self.cradle_moves += 1;
    }
}
