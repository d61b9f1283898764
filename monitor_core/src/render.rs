//! Maps pressure matrices to display colors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::pressure::{PressureMatrix, GRID_SIZE};
use crate::sinks::CellGridSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Background of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CellColor {
    /// Cell with no pressure reading.
    #[default]
    Empty,
    Gray(u8),
}

impl CellColor {
    pub const fn from_value(value: u8) -> Self {
        if value == 0 {
            CellColor::Empty
        } else {
            CellColor::Gray(value)
        }
    }

    pub const fn rgb(self) -> Rgb {
        match self {
            CellColor::Empty => Rgb::WHITE,
            CellColor::Gray(value) => Rgb::gray(value),
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, CellColor::Empty)
    }
}

impl fmt::Display for CellColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.rgb(), f)
    }
}

pub type CellColors = [[CellColor; GRID_SIZE]; GRID_SIZE];

pub fn render(matrix: &PressureMatrix) -> CellColors {
    let mut colors = [[CellColor::Empty; GRID_SIZE]; GRID_SIZE];
    for (row, values) in matrix.rows().iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            colors[row][col] = CellColor::from_value(*value);
        }
    }
    colors
}

/// Render `matrix` and write every cell into `sink`.
pub fn paint<S: CellGridSink + ?Sized>(matrix: &PressureMatrix, sink: &mut S) {
    for (row, colors) in render(matrix).iter().enumerate() {
        for (col, color) in colors.iter().enumerate() {
            sink.paint_cell(row, col, *color);
        }
    }
}
