//! Core domain: tick-driven countdowns used for every timed wait.

use std::time::Duration;

use bevy::prelude::*;

/// A one-shot countdown advanced by the tick loop.
///
/// Grace windows, cooldowns and invincibility windows are all expressed with
/// this type instead of suspended sequences, so every wait is visible state
/// that can be inspected or reset.
#[derive(Debug, Clone)]
pub struct Countdown {
    timer: Timer,
}

impl Default for Countdown {
    fn default() -> Self {
        Self::idle()
    }
}

impl Countdown {
    /// Negative, NaN and infinite durations collapse to an expired countdown.
    pub fn new(duration_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(finite_secs(duration_secs), TimerMode::Once),
        }
    }

    /// A countdown that has already expired.
    pub fn idle() -> Self {
        Self::new(0.0)
    }

    /// Re-arm with a new duration.
    pub fn restart(&mut self, duration_secs: f32) {
        *self = Self::new(duration_secs);
    }

    pub fn tick(&mut self, delta: Duration) {
        self.timer.tick(delta);
    }

    pub fn tick_secs(&mut self, dt: f32) {
        self.tick(Duration::from_secs_f32(finite_secs(dt)));
    }

    pub fn expired(&self) -> bool {
        self.timer.remaining_secs() <= 0.0
    }

    pub fn remaining_secs(&self) -> f32 {
        self.timer.remaining_secs()
    }

    pub fn duration_secs(&self) -> f32 {
        self.timer.duration().as_secs_f32()
    }

    /// Force expiry without waiting.
    pub fn finish(&mut self) {
        let remaining = self.timer.remaining();
        self.timer.tick(remaining);
    }
}

fn finite_secs(secs: f32) -> f32 {
    if secs.is_finite() { secs.max(0.0) } else { 0.0 }
}
