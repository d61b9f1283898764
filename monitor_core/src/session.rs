//! Monitor session: owns the simulation state and drives both periodic ticks.

use std::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use crate::config::{MonitorConfig, MonitorConfigError};
use crate::mood::{MoodSelector, MoodState};
use crate::oscillator::CradleOscillator;
use crate::pressure::{self, PressureMatrix};
use crate::render;
use crate::scheduler::{TaskHandle, TickScheduler};
use crate::sinks::{auto_label, MonitorSinks};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tick {
    Animate,
    AutoSimulate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Running,
    Closed,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    pub oscillator: CradleOscillator,
    pub auto: bool,
    pub steps: u64,
    pub last_step: Option<SimulationStep>,
}

impl SessionState {
    pub fn mood(&self) -> Option<MoodState> {
        self.last_step.as_ref().map(|step| step.mood)
    }
}

/// Outcome of one simulate step.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationStep {
    pub step: u64,
    pub mood: MoodState,
    pub matrix: PressureMatrix,
    pub amplitude: u32,
}

pub struct MonitorSession<S> {
    config: MonitorConfig,
    state: SessionState,
    selector: MoodSelector,
    rng: ChaCha8Rng,
    scheduler: TickScheduler<Tick>,
    sinks: S,
    animation_job: Option<TaskHandle>,
    auto_job: Option<TaskHandle>,
    lifecycle: Lifecycle,
}

impl<S: MonitorSinks> MonitorSession<S> {
    pub fn new(config: &MonitorConfig, sinks: S) -> Result<Self, MonitorConfigError> {
        config.validate()?;
        let selector = MoodSelector::new(config.mood_weights)?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            config: config.clone(),
            state: SessionState {
                oscillator: CradleOscillator::new(config.rest_x, config.phase_step),
                auto: config.auto_start,
                steps: 0,
                last_step: None,
            },
            selector,
            rng,
            scheduler: TickScheduler::new(),
            sinks,
            animation_job: None,
            auto_job: None,
            lifecycle: Lifecycle::Idle,
        })
    }

    /// Run the first animation tick and register both periodic tasks.
    pub fn start(&mut self) {
        if self.lifecycle != Lifecycle::Idle {
            return;
        }
        self.lifecycle = Lifecycle::Running;
        self.sinks.set_auto_label(auto_label(self.state.auto));
        self.auto_job = Some(
            self.scheduler
                .schedule(self.config.auto_period(), Tick::AutoSimulate),
        );
        self.animate();
        info!(
            target: "momecho::session",
            auto = self.state.auto,
            seed = ?self.config.seed,
            "session.started"
        );
    }

    pub fn on_simulate_clicked(&mut self) -> Option<SimulationStep> {
        if self.is_closed() {
            return None;
        }
        let mood = self.selector.select(&mut self.rng);
        Some(self.simulate(mood))
    }

    /// Run a simulate step with `mood` instead of a random pick.
    pub fn simulate_as(&mut self, mood: MoodState) -> Option<SimulationStep> {
        if self.is_closed() {
            return None;
        }
        Some(self.simulate(mood))
    }

    pub fn on_auto_toggled(&mut self) -> bool {
        if self.is_closed() {
            return self.state.auto;
        }
        self.state.auto = !self.state.auto;
        self.sinks.set_auto_label(auto_label(self.state.auto));
        debug!(target: "momecho::session", auto = self.state.auto, "auto.toggled");
        self.state.auto
    }

    /// Cancel every pending registration before the shell releases its
    /// widgets. Calling this twice is harmless.
    pub fn on_window_close(&mut self) {
        if self.is_closed() {
            return;
        }
        info!(target: "momecho::session", steps = self.state.steps, "Closing application");
        if let Some(handle) = self.animation_job.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.auto_job.take() {
            self.scheduler.cancel(handle);
        }
        self.scheduler.clear();
        self.lifecycle = Lifecycle::Closed;
    }

    /// Fire every task due at `now` (time since the session started).
    pub fn pump(&mut self, now: Duration) -> usize {
        let mut fired = 0;
        while !self.is_closed() {
            let Some((handle, tick)) = self.scheduler.pop_due(now) else {
                break;
            };
            fired += 1;
            match tick {
                Tick::Animate => {
                    if self.animation_job == Some(handle) {
                        self.animation_job = None;
                    }
                    self.animate();
                }
                Tick::AutoSimulate => {
                    if self.auto_job == Some(handle) {
                        self.auto_job = None;
                    }
                    self.auto_simulate();
                }
            }
        }
        fired
    }

    fn simulate(&mut self, mood: MoodState) -> SimulationStep {
        let matrix = pressure::sample(mood, &mut self.rng);

        self.sinks.set_mood_label(&mood.label());
        self.sinks.set_indicator(mood.indicator_color());
        render::paint(&matrix, &mut self.sinks);
        self.state.oscillator.set_target_for(mood);

        self.state.steps += 1;
        let step = SimulationStep {
            step: self.state.steps,
            mood,
            matrix,
            amplitude: mood.target_amplitude(),
        };
        info!(
            target: "momecho::session",
            step = step.step,
            mood = %mood,
            peak = matrix.peak(),
            amplitude = step.amplitude,
            "simulate.step"
        );
        self.state.last_step = Some(step.clone());
        step
    }

    fn animate(&mut self) {
        if self.is_closed() {
            return;
        }
        let dx = self.state.oscillator.step();
        self.sinks.move_cradle(dx);
        trace!(
            target: "momecho::session",
            phase = self.state.oscillator.phase(),
            x = self.state.oscillator.position(),
            "cradle.tick"
        );
        self.animation_job = Some(
            self.scheduler
                .schedule(self.config.animation_period(), Tick::Animate),
        );
    }

    fn auto_simulate(&mut self) {
        if self.is_closed() {
            return;
        }
        if self.state.auto {
            let mood = self.selector.select(&mut self.rng);
            self.simulate(mood);
        }
        self.auto_job = Some(
            self.scheduler
                .schedule(self.config.auto_period(), Tick::AutoSimulate),
        );
    }
}

impl<S> MonitorSession<S> {
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn sinks(&self) -> &S {
        &self.sinks
    }

    pub fn sinks_mut(&mut self) -> &mut S {
        &mut self.sinks
    }

    pub fn into_sinks(self) -> S {
        self.sinks
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn is_closed(&self) -> bool {
        self.lifecycle == Lifecycle::Closed
    }

    pub fn animation_job(&self) -> Option<TaskHandle> {
        self.animation_job
    }

    pub fn auto_job(&self) -> Option<TaskHandle> {
        self.auto_job
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    pub fn time_until_next(&self, now: Duration) -> Option<Duration> {
        self.scheduler.time_until_next(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pressure::is_active_cell;
    use crate::sinks::MonitorFrame;

    fn seeded(seed: u64) -> MonitorSession<MonitorFrame> {
        let config = MonitorConfig {
            seed: Some(seed),
            ..MonitorConfig::default()
        };
        MonitorSession::new(&config, MonitorFrame::default()).expect("valid config")
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn start_registers_both_ticks() {
        let mut session = seeded(1);
        session.start();

        assert_eq!(session.lifecycle(), Lifecycle::Running);
        assert_eq!(session.pending_tasks(), 2);
        assert_eq!(session.animation_job().map(|h| h.deadline()), Some(ms(20)));
        assert_eq!(session.auto_job().map(|h| h.deadline()), Some(ms(1000)));
        // First animation tick runs immediately.
        assert_eq!(session.sinks().cradle_moves, 1);
    }

    #[test]
    fn forced_cranky_step_updates_everything() {
        let mut session = seeded(2);
        session.start();
        let step = session.simulate_as(MoodState::Cranky).expect("running");

        assert_eq!(step.amplitude, 35);
        assert_eq!(session.state().mood(), Some(MoodState::Cranky));
        assert_eq!(session.state().oscillator.amplitude(), 35.0);
        assert_eq!(session.sinks().mood_label, "State: CRANKY");
        assert_eq!(session.sinks().indicator.to_hex(), "#0000ff");
        for (row, col, value) in step.matrix.iter() {
            if value != 0 {
                assert!(is_active_cell(row, col));
            }
            assert_eq!(session.sinks().cell(row, col), Some(render::CellColor::from_value(value)));
        }
    }

    #[test]
    fn auto_tick_only_simulates_when_enabled() {
        let mut session = seeded(3);
        session.start();

        session.pump(ms(1000));
        assert_eq!(session.state().steps, 0);
        assert!(session.auto_job().is_some());

        assert!(session.on_auto_toggled());
        assert_eq!(session.sinks().auto_label, "Auto: ON");
        session.pump(ms(2000));
        assert_eq!(session.state().steps, 1);

        assert!(!session.on_auto_toggled());
        session.pump(ms(3000));
        assert_eq!(session.state().steps, 1);
        assert!(session.auto_job().is_some());
    }

    #[test]
    fn close_cancels_everything() {
        let mut session = seeded(4);
        session.start();
        session.pump(ms(100));
        session.on_window_close();

        assert!(session.is_closed());
        assert_eq!(session.pending_tasks(), 0);
        assert!(session.animation_job().is_none());
        assert!(session.auto_job().is_none());

        let moves = session.sinks().cradle_moves;
        assert_eq!(session.pump(ms(60_000)), 0);
        assert_eq!(session.sinks().cradle_moves, moves);
        assert!(session.on_simulate_clicked().is_none());

        session.on_window_close();
        assert!(session.is_closed());
    }

    #[test]
    fn seeded_sessions_agree() {
        let mut a = seeded(99);
        let mut b = seeded(99);
        for _ in 0..20 {
            assert_eq!(a.on_simulate_clicked(), b.on_simulate_clicked());
        }
    }

    #[test]
    fn phase_survives_mood_changes() {
        let mut session = seeded(5);
        session.start();
        session.simulate_as(MoodState::Cranky);
        session.pump(ms(200));
        let phase = session.state().oscillator.phase();
        session.simulate_as(MoodState::Asleep);
        assert_eq!(session.state().oscillator.phase(), phase);
    }
}
