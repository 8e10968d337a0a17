//! Core domain: tests for countdowns and stage bookkeeping.

use std::time::Duration;

use super::{Countdown, StageClock};

#[test]
fn test_idle_countdown_is_expired() {
    assert!(Countdown::idle().expired());
    assert!(Countdown::default().expired());
}

#[test]
fn test_countdown_expires_after_duration() {
    let mut countdown = Countdown::new(0.5);
    assert!(!countdown.expired());

    countdown.tick(Duration::from_secs_f32(0.2));
    assert!(!countdown.expired());

    countdown.tick(Duration::from_secs_f32(0.4));
    assert!(countdown.expired());
}

#[test]
fn test_countdown_restart_rearms() {
    let mut countdown = Countdown::new(0.1);
    countdown.tick_secs(0.2);
    assert!(countdown.expired());

    countdown.restart(1.0);
    assert!(!countdown.expired());
    assert!((countdown.duration_secs() - 1.0).abs() < 1e-6);
}

#[test]
fn test_countdown_finish_forces_expiry() {
    let mut countdown = Countdown::new(10.0);
    countdown.finish();
    assert!(countdown.expired());
}

#[test]
fn test_negative_duration_is_clamped() {
    let countdown = Countdown::new(-3.0);
    assert!(countdown.expired());
}

#[test]
fn test_non_finite_durations_do_not_panic() {
    assert!(Countdown::new(f32::INFINITY).expired());
    assert!(Countdown::new(f32::NAN).expired());

    let mut countdown = Countdown::idle();
    countdown.restart(f32::INFINITY);
    assert_eq!(countdown.duration_secs(), 0.0);

    let mut countdown = Countdown::new(0.5);
    countdown.tick_secs(f32::INFINITY);
    countdown.tick_secs(f32::NAN);
    assert!(!countdown.expired());
    assert_eq!(countdown.remaining_secs(), 0.5);
}

#[test]
fn test_stage_clock_begin_resets_attempt() {
    let mut clock = StageClock::default();
    assert_eq!(clock.begin_stage(), 1);
    clock.advance(2.5);
    clock.record_death();

    assert_eq!(clock.begin_stage(), 2);
    assert_eq!(clock.elapsed_secs, 0.0);
    assert_eq!(clock.deaths, 0);
}
