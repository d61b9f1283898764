mod common;

use common::{recording_session, run_until, SinkEvent};
use monitor_core::{is_active_cell, CellColor, MoodState, GRID_SIZE};

#[test]
fn forced_cranky_step_drives_every_sink() {
    let mut session = recording_session(17);
    session.start();
    let before = session.sinks().events.len();

    let step = session.simulate_as(MoodState::Cranky).expect("session open");

    assert_eq!(session.state().oscillator.amplitude(), 35.0);
    assert_eq!(step.amplitude, 35);
    for (row, col, value) in step.matrix.iter() {
        if value != 0 {
            assert!(is_active_cell(row, col), "({row}, {col}) outside mask");
        }
    }

    let events = &session.sinks().events[before..];
    assert_eq!(events.len(), 2 + GRID_SIZE * GRID_SIZE);
    assert_eq!(events[0], SinkEvent::MoodLabel("State: CRANKY".to_string()));
    assert_eq!(
        events[1],
        SinkEvent::Indicator(MoodState::Cranky.indicator_color())
    );
    for event in &events[2..] {
        let SinkEvent::Cell(row, col, color) = event else {
            panic!("expected a cell update, got {event:?}");
        };
        let value = step.matrix.get(*row, *col).expect("cell in range");
        assert_eq!(*color, CellColor::from_value(value));
    }
}

#[test]
fn random_steps_respect_mask_and_labels() {
    let mut session = recording_session(23);
    for _ in 0..500 {
        let step = session.on_simulate_clicked().expect("session open");
        assert_eq!(step.amplitude, step.mood.target_amplitude());
        assert_eq!(session.sinks().last_mood_label(), Some(step.mood.label().as_str()));
        for (row, col, value) in step.matrix.iter() {
            if !is_active_cell(row, col) {
                assert_eq!(value, 0);
            }
        }
    }
    assert_eq!(session.state().steps, 500);
}

#[test]
fn ten_seconds_of_auto_simulate() {
    let mut session = recording_session(31);
    session.start();
    assert!(session.on_auto_toggled());

    run_until(&mut session, 0, 10_000, 20);

    assert_eq!(session.state().steps, 10);
    // Immediate first tick plus one per 20ms pump.
    assert_eq!(session.sinks().cradle_moves(), 1 + 10_000 / 20);
    assert_eq!(session.pending_tasks(), 2);
}

#[test]
fn auto_off_never_simulates_but_keeps_ticking() {
    let mut session = recording_session(37);
    session.start();

    run_until(&mut session, 0, 5_000, 20);

    assert_eq!(session.state().steps, 0);
    assert!(session.sinks().last_mood_label().is_none());
    assert!(session.auto_job().is_some());
    // Asleep-equivalent amplitude: the cradle has not moved at all.
    assert_eq!(session.sinks().cradle_offset(), 0.0);
}

#[test]
fn cradle_stays_within_amplitude() {
    let mut session = recording_session(41);
    session.start();
    session.simulate_as(MoodState::Awake);

    let rest = session.config().rest_x;
    let mut now = 0;
    for _ in 0..2_000 {
        now += 20;
        session.pump(common::ms(now));
        let offset = session.sinks().cradle_offset();
        assert!(offset.abs() <= 15.0 + 1e-9, "offset {offset}");
        let position = session.state().oscillator.position();
        assert!((position - (rest + offset)).abs() < 1e-6);
    }

    session.simulate_as(MoodState::Asleep);
    now += 20;
    session.pump(common::ms(now));
    assert!(session.sinks().cradle_offset().abs() < 1e-9);
}
