//! Player domain: identity, run speed and lives.

use bevy::prelude::*;

#[derive(Component, Debug)]
pub struct Player;

/// Horizontal auto-run speed. `base` is the configured value and is never
/// modulated; `current` is what gets committed each tick.
#[derive(Component, Debug, Clone, Copy)]
pub struct RunSpeed {
    pub base: f32,
    pub current: f32,
}

impl RunSpeed {
    pub fn new(base: f32) -> Self {
        Self {
            base,
            current: base,
        }
    }
}

/// Damage and lives as seen by the state machine.
pub trait LivesSource {
    fn take_damage(&mut self);
    fn lives_remaining(&self) -> u32;
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lives {
    remaining: u32,
    max: u32,
}

impl Lives {
    pub fn new(max: u32) -> Self {
        let max = max.max(1);
        Self {
            remaining: max,
            max,
        }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn refill(&mut self) {
        self.remaining = self.max;
    }
}

impl LivesSource for Lives {
    fn take_damage(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    fn lives_remaining(&self) -> u32 {
        self.remaining
    }
}
