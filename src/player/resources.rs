//! Player domain: tuning and the flip input latch.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub run_speed: f32,
    /// +1 runs right, -1 runs left
    pub run_direction: f32,
    /// Minimum time between accepted flips
    pub flip_cooldown: f32,
    /// How long GravityFlipping lasts (the player is invincible meanwhile)
    pub flip_duration: f32,
    /// Invincibility after non-fatal damage
    pub damage_invincibility: f32,
    /// Vertical speed below which the body counts as settled
    pub vertical_epsilon: f32,
    pub max_lives: u32,
    pub size: [f32; 2],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            run_speed: 280.0,
            run_direction: 1.0,
            flip_cooldown: 0.25,
            flip_duration: 0.2,
            damage_invincibility: 1.5,
            vertical_epsilon: 5.0,
            max_lives: 1,
            size: [24.0, 48.0],
        }
    }
}

impl PlayerTuning {
    pub fn run_sign(&self) -> f32 {
        if self.run_direction < 0.0 { -1.0 } else { 1.0 }
    }
}

/// Flip presses sampled every frame and consumed by the fixed tick.
#[derive(Resource, Debug, Default)]
pub struct FlipInput {
    pending: bool,
}

impl FlipInput {
    pub fn press(&mut self) {
        self.pending = true;
    }

    /// Consume a pending press.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending = false;
    }
}
