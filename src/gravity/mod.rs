//! Gravity domain: effective gravity resolution, smoothing, momentum across
//! flips and per-tick anomaly validation.

mod events;
mod integrator;
mod sources;
mod systems;
#[cfg(test)]
mod tests;
mod types;

pub use events::{GlobalGravityChanged, GravityAnomalyEvent, GravityFlipEvent};
pub use integrator::{
    AnomalyKind, GravityAnomaly, GravityIntegrator, GravityTick, apply_gravity, flip_velocity,
};
pub use sources::{
    FALLBACK_GRAVITY, GlobalGravity, GravitySource, GravityZone, ZoneStack, effective_gravity,
    resolve_base_gravity,
};
pub use types::{
    GravityConfiguration, GravityDirection, GravitySettings, GravityTuning, PristineGravityConfig,
    TransitionCurve,
};

use bevy::prelude::*;

pub(crate) use systems::{apply_gravity_to_bodies, integrate_gravity};

use crate::core::RunnerSet;
use crate::gravity::systems::{
    publish_global_gravity_changes, sync_physics_gravity, update_zone_stacks,
};

pub struct GravityPlugin;

impl Plugin for GravityPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GravityTuning>()
            .init_resource::<GlobalGravity>()
            .add_message::<GravityFlipEvent>()
            .add_message::<GravityAnomalyEvent>()
            .add_message::<GlobalGravityChanged>()
            .add_systems(FixedUpdate, update_zone_stacks.in_set(RunnerSet::Detect))
            .add_systems(
                FixedUpdate,
                (publish_global_gravity_changes, sync_physics_gravity)
                    .chain()
                    .before(integrate_gravity)
                    .in_set(RunnerSet::Integrate),
            )
            .add_systems(FixedUpdate, integrate_gravity.in_set(RunnerSet::Integrate))
            .add_systems(
                FixedUpdate,
                apply_gravity_to_bodies.in_set(RunnerSet::Commit),
            );
    }
}
