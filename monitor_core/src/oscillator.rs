use crate::mood::MoodState;

pub const DEFAULT_PHASE_STEP: f64 = 0.1;
pub const DEFAULT_REST_X: f64 = 100.0;

/// Phase-accumulating driver for the rocking cradle.
///
/// The phase only ever grows. Amplitude changes take effect on the next
/// [`CradleOscillator::step`] without resetting the phase.
#[derive(Debug, Clone, PartialEq)]
pub struct CradleOscillator {
    phase: f64,
    phase_step: f64,
    amplitude: f64,
    rest_x: f64,
    current_x: f64,
}

impl Default for CradleOscillator {
    fn default() -> Self {
        Self::new(DEFAULT_REST_X, DEFAULT_PHASE_STEP)
    }
}

impl CradleOscillator {
    pub fn new(rest_x: f64, phase_step: f64) -> Self {
        Self {
            phase: 0.0,
            phase_step,
            amplitude: 0.0,
            rest_x,
            current_x: rest_x,
        }
    }

    pub fn set_target_for(&mut self, mood: MoodState) {
        self.amplitude = f64::from(mood.target_amplitude());
    }

    /// Advance one animation tick and return the horizontal delta the cradle
    /// has to move by.
    pub fn step(&mut self) -> f64 {
        let target_x = self.rest_x + self.phase.sin() * self.amplitude;
        let dx = target_x - self.current_x;
        self.current_x = target_x;
        self.phase += self.phase_step;
        dx
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn rest_x(&self) -> f64 {
        self.rest_x
    }

    pub fn position(&self) -> f64 {
        self.current_x
    }

    pub fn offset(&self) -> f64 {
        self.current_x - self.rest_x
    }
}
