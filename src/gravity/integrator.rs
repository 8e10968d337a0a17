//! Gravity domain: the per-body gravity integrator.

use bevy::prelude::*;

use crate::gravity::sources::{FALLBACK_GRAVITY, GravitySource};
use crate::gravity::types::{GravityConfiguration, GravityTuning, TransitionCurve};

/// Remaining distance below which a smoothed transition snaps to its target.
const SNAP_EPSILON: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyKind {
    NonFiniteGravity,
    GravityOverCeiling,
    NonFiniteVelocity,
    VelocityOverLimit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityAnomaly {
    pub kind: AnomalyKind,
    pub observed: Vec2,
    pub substituted: Vec2,
}

/// Outcome of one integrator tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravityTick {
    pub gravity: Vec2,
    pub anomaly: Option<GravityAnomaly>,
}

/// Smooths the effective gravity vector towards its resolved target and
/// validates it every tick.
///
/// Anomalies are reported once per occurrence: a corrupt source that stays
/// corrupt for several ticks produces a single report. A clean tick or a
/// different kind of corruption re-arms reporting.
#[derive(Component, Debug, Clone)]
pub struct GravityIntegrator {
    current: Vec2,
    target: Vec2,
    transition_from: Vec2,
    source: GravitySource,
    transitioning: bool,
    suspended: bool,
    last_good_gravity: Vec2,
    last_good_velocity: Vec2,
    gravity_anomaly: Option<AnomalyKind>,
    velocity_anomaly: Option<AnomalyKind>,
}

impl Default for GravityIntegrator {
    fn default() -> Self {
        Self::new(FALLBACK_GRAVITY)
    }
}

impl GravityIntegrator {
    pub fn new(initial: Vec2) -> Self {
        let initial = if initial.is_finite() {
            initial
        } else {
            FALLBACK_GRAVITY
        };
        Self {
            current: initial,
            target: initial,
            transition_from: initial,
            source: GravitySource::Fallback,
            transitioning: false,
            suspended: false,
            last_good_gravity: initial,
            last_good_velocity: Vec2::ZERO,
            gravity_anomaly: None,
            velocity_anomaly: None,
        }
    }

    pub fn current_gravity(&self) -> Vec2 {
        self.current
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn source(&self) -> GravitySource {
        self.source
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn last_good_gravity(&self) -> Vec2 {
        self.last_good_gravity
    }

    /// Stop applying gravity (player frozen while dead).
    pub fn suspend(&mut self) {
        self.suspended = true;
        self.transitioning = false;
    }

    /// Resume at `gravity` without smoothing, clearing anomaly state.
    pub fn resume_at(&mut self, gravity: Vec2) {
        let gravity = if gravity.is_finite() {
            gravity
        } else {
            self.last_good_gravity
        };
        self.current = gravity;
        self.target = gravity;
        self.transition_from = gravity;
        self.transitioning = false;
        self.suspended = false;
        self.last_good_gravity = gravity;
        self.last_good_velocity = Vec2::ZERO;
        self.gravity_anomaly = None;
        self.velocity_anomaly = None;
    }

    /// Advance one physics tick towards `candidate`.
    pub fn tick(
        &mut self,
        candidate: Vec2,
        source: GravitySource,
        dt: f32,
        config: &GravityConfiguration,
        tuning: &GravityTuning,
    ) -> GravityTick {
        let (target, mut anomaly) = self.validate_gravity(candidate, tuning.anomaly_ceiling);
        self.source = source;
        self.retarget(target, config, tuning);

        if self.transitioning {
            self.advance_transition(dt, config, tuning.transition_curve);
        }

        // The smoothed value itself can be corrupted (e.g. by a NaN dt)
        if !self.current.is_finite() {
            let substituted = self.last_good_gravity;
            let kind = AnomalyKind::NonFiniteGravity;
            if anomaly.is_none() && self.gravity_anomaly != Some(kind) {
                anomaly = Some(GravityAnomaly {
                    kind,
                    observed: self.current,
                    substituted,
                });
            }
            self.gravity_anomaly = Some(kind);
            self.current = substituted;
            self.transitioning = false;
        }

        GravityTick {
            gravity: self.current,
            anomaly,
        }
    }

    fn validate_gravity(&mut self, candidate: Vec2, ceiling: f32) -> (Vec2, Option<GravityAnomaly>) {
        let (value, kind) = if !candidate.is_finite() {
            (self.last_good_gravity, Some(AnomalyKind::NonFiniteGravity))
        } else if candidate.length() > ceiling {
            (
                candidate.clamp_length_max(ceiling),
                Some(AnomalyKind::GravityOverCeiling),
            )
        } else {
            (candidate, None)
        };

        let Some(kind) = kind else {
            self.gravity_anomaly = None;
            self.last_good_gravity = value;
            return (value, None);
        };

        let report = (self.gravity_anomaly != Some(kind)).then_some(GravityAnomaly {
            kind,
            observed: candidate,
            substituted: value,
        });
        self.gravity_anomaly = Some(kind);
        (value, report)
    }

    fn retarget(&mut self, target: Vec2, config: &GravityConfiguration, tuning: &GravityTuning) {
        if target == self.target {
            if !self.transitioning {
                self.current = target;
            }
            return;
        }

        self.target = target;
        let jump = (target - self.current).length();
        if config.smooth_gravity_transition && jump > tuning.change_threshold {
            self.transition_from = self.current;
            self.transitioning = true;
        } else {
            self.current = target;
            self.transitioning = false;
        }
    }

    fn advance_transition(&mut self, dt: f32, config: &GravityConfiguration, curve: TransitionCurve) {
        let rate = config.transition_speed.max(0.0);
        match curve {
            TransitionCurve::Linear => {
                let span = (self.target - self.transition_from).length();
                let step = span * rate * dt;
                let remaining = self.target - self.current;
                let distance = remaining.length();
                if distance <= step || distance <= SNAP_EPSILON {
                    self.current = self.target;
                } else {
                    self.current += remaining / distance * step;
                }
            }
            TransitionCurve::Exponential => {
                let blend = 1.0 - (-rate * dt).exp();
                self.current += (self.target - self.current) * blend;
            }
        }

        if (self.target - self.current).length() <= SNAP_EPSILON {
            self.current = self.target;
            self.transitioning = false;
        }
    }

    /// Replace a corrupt or runaway velocity with the last good value or a
    /// clamped one.
    pub fn sanitize_velocity(&mut self, velocity: Vec2, max_speed: f32) -> (Vec2, Option<GravityAnomaly>) {
        let (value, kind) = if !velocity.is_finite() {
            (self.last_good_velocity, Some(AnomalyKind::NonFiniteVelocity))
        } else if velocity.length() > max_speed {
            (
                velocity.clamp_length_max(max_speed),
                Some(AnomalyKind::VelocityOverLimit),
            )
        } else {
            (velocity, None)
        };

        let Some(kind) = kind else {
            self.velocity_anomaly = None;
            self.last_good_velocity = value;
            return (value, None);
        };

        let report = (self.velocity_anomaly != Some(kind)).then_some(GravityAnomaly {
            kind,
            observed: velocity,
            substituted: value,
        });
        self.velocity_anomaly = Some(kind);
        self.last_good_velocity = value;
        (value, report)
    }
}

/// Vertical velocity after a flip: inverted and scaled by `retention`.
pub fn flip_velocity(velocity: Vec2, retention: f32) -> Vec2 {
    Vec2::new(velocity.x, -velocity.y * retention.clamp(0.0, 1.0))
}

/// Apply one tick of gravity, limited by the per-tick velocity change and
/// the terminal speed along the gravity vector.
pub fn apply_gravity(
    velocity: Vec2,
    gravity: Vec2,
    dt: f32,
    config: &GravityConfiguration,
    max_fall_speed: f32,
) -> Vec2 {
    let delta = (gravity * dt).clamp_length_max(config.max_velocity_change.max(0.0));
    let mut next = velocity + delta;

    if let Some(pull) = gravity.try_normalize() {
        let along = next.dot(pull);
        if along > max_fall_speed {
            next -= pull * (along - max_fall_speed);
        }
    }
    next
}
