//! Gravity domain: direction, configuration and its pristine snapshot.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Sign of the vertical forces the player experiences.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GravityDirection {
    #[default]
    Down,
    Up,
}

impl GravityDirection {
    /// Multiplier applied to the resolved gravity vector.
    pub fn sign(self) -> f32 {
        match self {
            GravityDirection::Down => 1.0,
            GravityDirection::Up => -1.0,
        }
    }

    /// The "up" the player stands relative to (opposite of the pull).
    pub fn up_vector(self) -> Vec2 {
        match self {
            GravityDirection::Down => Vec2::Y,
            GravityDirection::Up => Vec2::NEG_Y,
        }
    }

    pub fn down_vector(self) -> Vec2 {
        -self.up_vector()
    }

    pub fn flipped(self) -> Self {
        match self {
            GravityDirection::Down => GravityDirection::Up,
            GravityDirection::Up => GravityDirection::Down,
        }
    }

    pub fn flip(&mut self) {
        *self = self.flipped();
    }
}

/// Player physics tunables that recovery must never invent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfiguration {
    /// Integrate gravity manually instead of deferring to the physics engine
    pub use_custom_gravity: bool,
    pub gravity_scale: f32,
    /// Keep part of the vertical speed (inverted) across a flip
    pub maintain_inertia: bool,
    /// Fraction of vertical speed lost on a flip (0 keeps everything)
    pub inertia_decay: f32,
    pub smooth_gravity_transition: bool,
    /// Rate of the smoothing interpolation (per second)
    pub transition_speed: f32,
    /// Largest velocity change gravity may apply in one tick
    pub max_velocity_change: f32,
}

impl Default for GravityConfiguration {
    fn default() -> Self {
        Self {
            use_custom_gravity: true,
            gravity_scale: 1.0,
            maintain_inertia: true,
            inertia_decay: 0.3,
            smooth_gravity_transition: true,
            transition_speed: 12.0,
            max_velocity_change: 120.0,
        }
    }
}

impl GravityConfiguration {
    /// Momentum-preservation ratio applied to vertical speed on a flip.
    pub fn momentum_retention(&self) -> f32 {
        if self.maintain_inertia {
            (1.0 - self.inertia_decay).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Immutable copy of the configuration captured when the player spawns.
///
/// Has no mutators. Respawn restores the live settings from this snapshot.
#[derive(Component, Debug, Clone)]
pub struct PristineGravityConfig {
    snapshot: GravityConfiguration,
}

impl PristineGravityConfig {
    pub fn capture(config: &GravityConfiguration) -> Self {
        Self {
            snapshot: config.clone(),
        }
    }

    pub fn snapshot(&self) -> &GravityConfiguration {
        &self.snapshot
    }
}

/// Live, player-tunable gravity settings. All writes go through the setters.
#[derive(Component, Debug, Clone)]
pub struct GravitySettings {
    config: GravityConfiguration,
}

impl GravitySettings {
    pub fn new(config: GravityConfiguration) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GravityConfiguration {
        &self.config
    }

    pub fn set_gravity_scale(&mut self, scale: f32) {
        if scale.is_finite() {
            self.config.gravity_scale = scale.max(0.0);
        }
    }

    pub fn set_inertia(&mut self, maintain: bool, decay: f32) {
        self.config.maintain_inertia = maintain;
        if decay.is_finite() {
            self.config.inertia_decay = decay.clamp(0.0, 1.0);
        }
    }

    pub fn set_smoothing(&mut self, enabled: bool, transition_speed: f32) {
        self.config.smooth_gravity_transition = enabled;
        if transition_speed.is_finite() && transition_speed > 0.0 {
            self.config.transition_speed = transition_speed;
        }
    }

    pub fn set_max_velocity_change(&mut self, max_change: f32) {
        if max_change.is_finite() && max_change > 0.0 {
            self.config.max_velocity_change = max_change;
        }
    }

    pub fn set_use_custom_gravity(&mut self, enabled: bool) {
        self.config.use_custom_gravity = enabled;
    }

    /// Replace the live settings with the pristine snapshot.
    pub fn restore_from(&mut self, pristine: &PristineGravityConfig) {
        self.config = pristine.snapshot().clone();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TransitionCurve {
    Linear,
    #[default]
    Exponential,
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityTuning {
    pub configuration: GravityConfiguration,
    /// World gravity direction, normalised on load
    pub global_direction: [f32; 2],
    pub global_strength: f32,
    /// Target changes larger than this begin a smoothed transition
    pub change_threshold: f32,
    pub transition_curve: TransitionCurve,
    /// Gravity magnitudes above this are clamped and reported
    pub anomaly_ceiling: f32,
    /// Velocity magnitudes above this are clamped and reported
    pub max_speed: f32,
    /// Terminal speed along the gravity vector
    pub max_fall_speed: f32,
}

impl Default for GravityTuning {
    fn default() -> Self {
        Self {
            configuration: GravityConfiguration::default(),
            global_direction: [0.0, -1.0],
            global_strength: 1800.0,
            change_threshold: 1.0,
            transition_curve: TransitionCurve::Exponential,
            anomaly_ceiling: 20000.0,
            max_speed: 4000.0,
            max_fall_speed: 900.0,
        }
    }
}
