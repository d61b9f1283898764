//! Runtime configuration for the monitor session.
//!
//! Loaded from `monitor_config.json` with support for an environment
//! variable override.

use std::{
    env, fs, io,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mood::MoodWeights;
use crate::oscillator::{DEFAULT_PHASE_STEP, DEFAULT_REST_X};

pub const BUILTIN_MONITOR_CONFIG: &str = include_str!("data/monitor_config.json");
pub const MONITOR_CONFIG_ENV: &str = "MOMECHO_CONFIG_PATH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub animation_period_ms: u64,
    pub auto_period_ms: u64,
    pub phase_step: f64,
    pub rest_x: f64,
    pub mood_weights: MoodWeights,
    pub auto_start: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            animation_period_ms: 20,
            auto_period_ms: 1000,
            phase_step: DEFAULT_PHASE_STEP,
            rest_x: DEFAULT_REST_X,
            mood_weights: MoodWeights::default(),
            auto_start: false,
        }
    }
}

impl MonitorConfig {
    pub fn builtin() -> Arc<Self> {
        Arc::new(
            serde_json::from_str(BUILTIN_MONITOR_CONFIG)
                .expect("builtin monitor config should parse"),
        )
    }

    pub fn from_json_str(json: &str) -> Result<Self, MonitorConfigError> {
        let config: MonitorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, MonitorConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| MonitorConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        MonitorConfig::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), MonitorConfigError> {
        if self.animation_period_ms == 0 {
            return Err(MonitorConfigError::InvalidPeriod("animation_period_ms"));
        }
        if self.auto_period_ms == 0 {
            return Err(MonitorConfigError::InvalidPeriod("auto_period_ms"));
        }
        if !self.phase_step.is_finite() || self.phase_step <= 0.0 {
            return Err(MonitorConfigError::InvalidPhaseStep(self.phase_step));
        }
        self.mood_weights.validate()
    }

    pub fn animation_period(&self) -> Duration {
        Duration::from_millis(self.animation_period_ms)
    }

    pub fn auto_period(&self) -> Duration {
        Duration::from_millis(self.auto_period_ms)
    }
}

#[derive(Debug, Error)]
pub enum MonitorConfigError {
    #[error("failed to parse monitor config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read monitor config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0} must be greater than zero")]
    InvalidPeriod(&'static str),
    #[error("phase step must be positive and finite, got {0}")]
    InvalidPhaseStep(f64),
    #[error("mood weights must be non-negative and sum to 1.0, got {0:?}")]
    InvalidWeights([f64; 3]),
}

/// Load the monitor configuration from `MOMECHO_CONFIG_PATH`, falling back to
/// the builtin copy. Returns the path that was used, if any.
pub fn load_monitor_config_from_env() -> (Arc<MonitorConfig>, Option<PathBuf>) {
    let Some(path) = env::var(MONITOR_CONFIG_ENV).ok().map(PathBuf::from) else {
        tracing::info!(target: "momecho::config", "monitor_config.loaded=builtin");
        return (MonitorConfig::builtin(), None);
    };

    match MonitorConfig::from_file(&path) {
        Ok(config) => {
            tracing::info!(
                target: "momecho::config",
                path = %path.display(),
                "monitor_config.loaded=file"
            );
            (Arc::new(config), Some(path))
        }
        Err(err) => {
            tracing::warn!(
                target: "momecho::config",
                path = %path.display(),
                error = %err,
                "monitor_config.load_failed"
            );
            (MonitorConfig::builtin(), None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_config_matches_default() {
        let config = MonitorConfig::builtin();
        assert_eq!(*config, MonitorConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config = MonitorConfig::from_json_str(r#"{ "seed": 9, "auto_start": true }"#)
            .expect("config parses");
        assert_eq!(config.seed, Some(9));
        assert!(config.auto_start);
        assert_eq!(config.animation_period(), Duration::from_millis(20));
        assert_eq!(config.auto_period(), Duration::from_secs(1));
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            MonitorConfig::from_json_str(r#"{ "animation_period_ms": 0 }"#),
            Err(MonitorConfigError::InvalidPeriod("animation_period_ms"))
        ));
        assert!(matches!(
            MonitorConfig::from_json_str(r#"{ "phase_step": -0.1 }"#),
            Err(MonitorConfigError::InvalidPhaseStep(_))
        ));
        assert!(matches!(
            MonitorConfig::from_json_str(r#"{ "mood_weights": { "asleep": 0.9 } }"#),
            Err(MonitorConfigError::InvalidWeights(_))
        ));
        assert!(matches!(
            MonitorConfig::from_json_str("{ not json"),
            Err(MonitorConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = MonitorConfig::from_file(Path::new("/nonexistent/monitor_config.json"))
            .expect_err("file is missing");
        assert!(err.to_string().contains("/nonexistent/monitor_config.json"));
    }
}
