//! Slope domain: multiplier curves, snapping and the speed restore latch.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::detection::GroundInfo;

/// Shape applied to `slope_influence` before blending between 1.0 and the
/// uphill or downhill multiplier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum SlopeCurve {
    #[default]
    Linear,
    SmoothStep,
    /// Piecewise-linear `(influence, weight)` points sorted by influence
    Keyframes(Vec<(f32, f32)>),
}

impl SlopeCurve {
    pub fn evaluate(&self, influence: f32) -> f32 {
        let t = if influence.is_finite() {
            influence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let weight = match self {
            SlopeCurve::Linear => t,
            SlopeCurve::SmoothStep => t * t * (3.0 - 2.0 * t),
            SlopeCurve::Keyframes(points) => sample_keyframes(points, t),
        };
        weight.clamp(0.0, 1.0)
    }
}

fn sample_keyframes(points: &[(f32, f32)], t: f32) -> f32 {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return t;
    };
    if t <= first.0 {
        return first.1;
    }
    if t >= last.0 {
        return last.1;
    }

    points
        .windows(2)
        .find(|pair| t >= pair[0].0 && t <= pair[1].0)
        .map(|pair| {
            let (a, b) = (pair[0], pair[1]);
            let span = b.0 - a.0;
            if span <= f32::EPSILON {
                b.1
            } else {
                a.1 + (b.1 - a.1) * (t - a.0) / span
            }
        })
        .unwrap_or(t)
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlopeTuning {
    pub curve: SlopeCurve,
    /// Multiplier at the walkable limit when running uphill (below 1.0)
    pub uphill_multiplier: f32,
    /// Multiplier at the walkable limit when running downhill (above 1.0)
    pub downhill_multiplier: f32,
    /// Snap acceleration per unit of velocity moving away from the surface
    pub snap_gain: f32,
    pub max_snap_accel: f32,
    /// Snapping only applies on surfaces at or below this angle
    pub snap_max_angle_deg: f32,
}

impl Default for SlopeTuning {
    fn default() -> Self {
        Self {
            curve: SlopeCurve::Linear,
            uphill_multiplier: 0.75,
            downhill_multiplier: 1.3,
            snap_gain: 20.0,
            max_snap_accel: 3000.0,
            snap_max_angle_deg: 30.0,
        }
    }
}

/// Whether running along `run_direction` heads downhill. Only the sign is
/// used and zero runs right, matching the committed run velocity.
pub fn is_downhill(slope_direction: Vec2, run_direction: f32) -> bool {
    let run_sign = if run_direction < 0.0 { -1.0 } else { 1.0 };
    slope_direction.x * run_sign > 0.0
}

/// Horizontal speed multiplier for the current ground.
///
/// Flat ground, airborne bodies and non-walkable slopes all return 1.0.
pub fn speed_multiplier(info: &GroundInfo, run_direction: f32, tuning: &SlopeTuning) -> f32 {
    if !info.is_grounded || !info.is_on_slope || !info.can_walk_on_slope {
        return 1.0;
    }

    let weight = tuning.curve.evaluate(info.slope_influence);
    let limit = if is_downhill(info.slope_direction, run_direction) {
        tuning.downhill_multiplier.max(1.0)
    } else {
        tuning.uphill_multiplier.clamp(0.0, 1.0)
    };
    1.0 + (limit - 1.0) * weight
}

/// Acceleration pulling the body back onto a shallow surface when its
/// velocity is carrying it away from the ground.
pub fn snap_force(info: &GroundInfo, velocity: Vec2, tuning: &SlopeTuning) -> Option<Vec2> {
    if !info.is_grounded || !info.can_walk_on_slope {
        return None;
    }
    if info.ground_angle > tuning.snap_max_angle_deg {
        return None;
    }

    let away = velocity.dot(info.ground_normal);
    if away <= 0.0 || !away.is_finite() {
        return None;
    }

    let magnitude = (away * tuning.snap_gain).min(tuning.max_snap_accel.max(0.0));
    Some(-info.ground_normal * magnitude)
}

/// Holds the pre-slope run speed while the body is on a slope.
///
/// The captured speed is written back the tick `is_on_slope` turns false,
/// so many short ramps never compound into drift.
#[derive(Component, Debug, Default, Clone)]
pub struct SlopeModulator {
    original_speed: Option<f32>,
    multiplier: f32,
}

impl SlopeModulator {
    pub fn multiplier(&self) -> f32 {
        if self.original_speed.is_some() {
            self.multiplier
        } else {
            1.0
        }
    }

    pub fn is_modulating(&self) -> bool {
        self.original_speed.is_some()
    }

    /// Update `speed` for the latest snapshot. Returns true when it changed.
    pub fn apply(
        &mut self,
        info: &GroundInfo,
        speed: &mut f32,
        run_direction: f32,
        tuning: &SlopeTuning,
    ) -> bool {
        if !info.is_on_slope {
            return self.restore(speed);
        }

        let original = *self.original_speed.get_or_insert(*speed);
        self.multiplier = speed_multiplier(info, run_direction, tuning);
        let next = original * self.multiplier;
        let changed = *speed != next;
        *speed = next;
        changed
    }

    /// Put back the captured speed, if any.
    pub fn restore(&mut self, speed: &mut f32) -> bool {
        let Some(original) = self.original_speed.take() else {
            return false;
        };
        self.multiplier = 1.0;
        let changed = *speed != original;
        *speed = original;
        changed
    }

    pub fn reset(&mut self) {
        self.original_speed = None;
        self.multiplier = 1.0;
    }
}
