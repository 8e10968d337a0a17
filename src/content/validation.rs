//! Validation of tuning values that parse but cannot be used as-is.

use super::data::RunnerTuning;

/// A tuning value outside its usable range.
#[derive(Debug)]
pub struct ValidationError {
    pub section: &'static str,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}: {}", self.section, self.field, self.message)
    }
}

/// Helper macro for checking a value satisfies a condition
macro_rules! check {
    ($errors:expr, $cond:expr, $section:expr, $field:expr, $($msg:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                section: $section,
                field: $field,
                message: format!($($msg)+),
            });
        }
    };
}

/// Returns a list of validation errors, empty if the tuning is usable.
pub fn validate_tuning(tuning: &RunnerTuning) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let probes = &tuning.probes;
    check!(errors, probes.probe_count >= 1, "probes", "probe_count", "must be at least 1");
    check!(
        errors,
        probes.max_walkable_angle_deg > 0.0 && probes.max_walkable_angle_deg <= 90.0,
        "probes",
        "max_walkable_angle_deg",
        "{} is outside (0, 90]",
        probes.max_walkable_angle_deg
    );
    check!(
        errors,
        probes.slope_min_angle_deg < probes.max_walkable_angle_deg,
        "probes",
        "slope_min_angle_deg",
        "must be below max_walkable_angle_deg"
    );
    check!(
        errors,
        probes.probe_skin < probes.half_height,
        "probes",
        "probe_skin",
        "must be smaller than half_height"
    );

    let gravity = &tuning.gravity;
    let config = &gravity.configuration;
    check!(
        errors,
        (0.0..=1.0).contains(&config.inertia_decay),
        "gravity",
        "inertia_decay",
        "{} is outside [0, 1]",
        config.inertia_decay
    );
    check!(
        errors,
        config.transition_speed > 0.0,
        "gravity",
        "transition_speed",
        "must be positive"
    );
    check!(
        errors,
        config.max_velocity_change > 0.0,
        "gravity",
        "max_velocity_change",
        "must be positive"
    );
    check!(
        errors,
        gravity.global_strength.abs() <= gravity.anomaly_ceiling,
        "gravity",
        "global_strength",
        "exceeds anomaly_ceiling {}",
        gravity.anomaly_ceiling
    );

    let slope = &tuning.slope;
    check!(
        errors,
        slope.uphill_multiplier <= 1.0,
        "slope",
        "uphill_multiplier",
        "{} would speed up uphill",
        slope.uphill_multiplier
    );
    check!(
        errors,
        slope.downhill_multiplier >= 1.0,
        "slope",
        "downhill_multiplier",
        "{} would slow down downhill",
        slope.downhill_multiplier
    );

    let respawn = &tuning.respawn;
    check!(
        errors,
        respawn.grace_window <= respawn.base_delay,
        "respawn",
        "grace_window",
        "is longer than base_delay"
    );
    check!(
        errors,
        respawn.escalated_delay >= respawn.base_delay,
        "respawn",
        "escalated_delay",
        "is shorter than base_delay"
    );
    check!(
        errors,
        respawn.streak_threshold >= 1,
        "respawn",
        "streak_threshold",
        "must be at least 1"
    );

    let stage = &tuning.stage;
    check!(
        errors,
        stage.contains(stage.world_spawn()),
        "stage",
        "world_spawn",
        "lies outside the stage bounds"
    );

    errors
}
