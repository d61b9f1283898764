//! Simulated pressure-sensor readings.
//!
//! Every cell of the grid is drawn from a normal distribution keyed by the
//! current mood, then masked so only the sensor zone (rows 2-4, columns 3-4)
//! carries a reading.

use std::ops::RangeInclusive;

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::mood::MoodState;

pub const GRID_SIZE: usize = 8;

pub const ACTIVE_ROWS: RangeInclusive<usize> = 2..=4;
pub const ACTIVE_COLS: RangeInclusive<usize> = 3..=4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressureProfile {
    pub mean: f64,
    pub std_dev: f64,
}

impl PressureProfile {
    pub const fn for_mood(mood: MoodState) -> Self {
        match mood {
            MoodState::Asleep => Self {
                mean: 80.0,
                std_dev: 3.0,
            },
            MoodState::Awake => Self {
                mean: 100.0,
                std_dev: 10.0,
            },
            MoodState::Cranky => Self {
                mean: 120.0,
                std_dev: 30.0,
            },
        }
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let z: f64 = rng.sample(StandardNormal);
        self.mean + self.std_dev * z
    }
}

pub fn is_active_cell(row: usize, col: usize) -> bool {
    ACTIVE_ROWS.contains(&row) && ACTIVE_COLS.contains(&col)
}

/// Number of cells covered by the sensor zone.
pub fn active_cell_count() -> usize {
    ACTIVE_ROWS.count() * ACTIVE_COLS.count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PressureMatrix {
    cells: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl PressureMatrix {
    pub const fn from_rows(cells: [[u8; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn rows(&self) -> &[[u8; GRID_SIZE]; GRID_SIZE] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, values)| {
            values
                .iter()
                .enumerate()
                .map(move |(col, value)| (row, col, *value))
        })
    }

    pub fn peak(&self) -> u8 {
        self.iter().map(|(_, _, value)| value).max().unwrap_or(0)
    }

    pub fn active_mean(&self) -> f64 {
        let total: u32 = self
            .iter()
            .filter(|(row, col, _)| is_active_cell(*row, *col))
            .map(|(_, _, value)| u32::from(value))
            .sum();
        f64::from(total) / active_cell_count() as f64
    }
}

/// Draw a fresh 8×8 reading for `mood`.
///
/// Cells are drawn in row-major order and masked cells still consume a draw,
/// so a seeded generator reproduces the same matrix.
pub fn sample<R: Rng + ?Sized>(mood: MoodState, rng: &mut R) -> PressureMatrix {
    let profile = PressureProfile::for_mood(mood);
    let mut cells = [[0u8; GRID_SIZE]; GRID_SIZE];
    for (row, values) in cells.iter_mut().enumerate() {
        for (col, cell) in values.iter_mut().enumerate() {
            let raw = profile.draw(rng);
            let mask = if is_active_cell(row, col) { 1.0 } else { 0.0 };
            *cell = quantize(raw * mask);
        }
    }
    PressureMatrix { cells }
}

fn quantize(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    // Truncation toward zero after the clamp.
    value.clamp(0.0, 255.0) as u8
}
