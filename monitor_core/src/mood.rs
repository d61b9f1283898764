use std::fmt;
use std::str::FromStr;

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::MonitorConfigError;
use crate::render::Rgb;

/// Tolerance used when checking that mood weights sum to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodState {
    Asleep,
    Awake,
    Cranky,
}

impl MoodState {
    pub const VARIANTS: [MoodState; 3] = [MoodState::Asleep, MoodState::Awake, MoodState::Cranky];

    pub const fn as_str(&self) -> &'static str {
        match self {
            MoodState::Asleep => "asleep",
            MoodState::Awake => "awake",
            MoodState::Cranky => "cranky",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            MoodState::Asleep => 0,
            MoodState::Awake => 1,
            MoodState::Cranky => 2,
        }
    }

    pub const fn variants() -> &'static [MoodState; 3] {
        &Self::VARIANTS
    }

    /// Peak horizontal displacement of the cradle while in this mood.
    pub const fn target_amplitude(self) -> u32 {
        match self {
            MoodState::Asleep => 0,
            MoodState::Awake => 15,
            MoodState::Cranky => 35,
        }
    }

    /// Fill of the intensity indicator bar.
    pub const fn indicator_color(self) -> Rgb {
        match self {
            MoodState::Asleep => Rgb::new(0xbe, 0xbe, 0xbe),
            MoodState::Awake => Rgb::new(0xad, 0xd8, 0xe6),
            MoodState::Cranky => Rgb::new(0x00, 0x00, 0xff),
        }
    }

    /// Text shown by the mood label, e.g. `State: CRANKY`.
    pub fn label(self) -> String {
        format!("State: {}", self.as_str().to_uppercase())
    }
}

impl fmt::Display for MoodState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodState {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asleep" => Ok(MoodState::Asleep),
            "awake" => Ok(MoodState::Awake),
            "cranky" => Ok(MoodState::Cranky),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoodWeights {
    pub asleep: f64,
    pub awake: f64,
    pub cranky: f64,
}

impl Default for MoodWeights {
    fn default() -> Self {
        Self {
            asleep: 0.4,
            awake: 0.3,
            cranky: 0.3,
        }
    }
}

impl MoodWeights {
    pub fn as_array(&self) -> [f64; 3] {
        [self.asleep, self.awake, self.cranky]
    }

    pub fn weight(&self, mood: MoodState) -> f64 {
        self.as_array()[mood.index()]
    }

    pub fn validate(&self) -> Result<(), MonitorConfigError> {
        let weights = self.as_array();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(MonitorConfigError::InvalidWeights(weights));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(MonitorConfigError::InvalidWeights(weights));
        }
        Ok(())
    }
}

/// Weighted random choice among the three moods.
#[derive(Debug, Clone)]
pub struct MoodSelector {
    weights: MoodWeights,
    index: WeightedIndex<f64>,
}

impl MoodSelector {
    pub fn new(weights: MoodWeights) -> Result<Self, MonitorConfigError> {
        weights.validate()?;
        let index = WeightedIndex::new(weights.as_array())
            .map_err(|_| MonitorConfigError::InvalidWeights(weights.as_array()))?;
        Ok(Self { weights, index })
    }

    pub fn weights(&self) -> &MoodWeights {
        &self.weights
    }

    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> MoodState {
        MoodState::VARIANTS[self.index.sample(rng)]
    }
}

impl Default for MoodSelector {
    fn default() -> Self {
        let weights = MoodWeights::default();
        let index =
            WeightedIndex::new(weights.as_array()).expect("default mood weights should be valid");
        Self { weights, index }
    }
}

/// Pick a mood with the default weights (asleep 0.4, awake 0.3, cranky 0.3).
pub fn select_mood<R: Rng + ?Sized>(rng: &mut R) -> MoodState {
    MoodSelector::default().select(rng)
}
