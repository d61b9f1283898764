//! Core simulation crate for the MomEcho baby monitor toy.
//!
//! A [`MonitorSession`] picks a mood on every simulate step, samples a masked
//! pressure matrix for it, paints the matrix into an injected cell grid and
//! retargets the rocking cradle. Timing is cooperative: the shell pumps the
//! session with the elapsed time and the session fires whatever ticks are due.

pub mod config;
pub mod mood;
pub mod oscillator;
pub mod pressure;
pub mod render;
pub mod scheduler;
pub mod session;
pub mod sinks;

pub use config::{load_monitor_config_from_env, MonitorConfig, MonitorConfigError};
pub use mood::{select_mood, MoodSelector, MoodState, MoodWeights};
pub use oscillator::CradleOscillator;
pub use pressure::{is_active_cell, sample, PressureMatrix, GRID_SIZE};
pub use render::{paint, render, CellColor, CellColors, Rgb};
pub use scheduler::{TaskHandle, TickScheduler};
pub use session::{Lifecycle, MonitorSession, SessionState, SimulationStep, Tick};
pub use sinks::{
    AutoLabelSink, CellGridSink, CradleSink, IndicatorSink, MonitorFrame, MonitorSinks,
    MoodLabelSink,
};
