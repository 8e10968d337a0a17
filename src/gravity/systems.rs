//! Gravity domain: zone tracking, integration and velocity commit systems.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::gravity::events::{GlobalGravityChanged, GravityAnomalyEvent};
use crate::gravity::integrator::{GravityAnomaly, GravityIntegrator, apply_gravity};
use crate::gravity::sources::{
    GlobalGravity, GravityZone, ZoneStack, effective_gravity, resolve_base_gravity,
};
use crate::gravity::types::{GravityDirection, GravitySettings, GravityTuning};
use crate::player::Player;

pub(crate) fn update_zone_stacks(
    zones: Query<(Entity, &Transform, &GravityZone)>,
    mut players: Query<(&Transform, &mut ZoneStack), With<Player>>,
) {
    for (transform, mut stack) in &mut players {
        let position = transform.translation.truncate();
        let containing: Vec<Entity> = zones
            .iter()
            .filter(|(_, zone_transform, zone)| {
                zone.contains_point(zone_transform.translation.truncate(), position)
            })
            .map(|(entity, _, _)| entity)
            .collect();

        let before = stack.entered().len();
        stack.sync(&containing);
        if stack.entered().len() != before {
            debug!("Gravity zones around player: {:?}", stack.entered());
        }
    }
}

pub(crate) fn publish_global_gravity_changes(
    global: Res<GlobalGravity>,
    mut changes: MessageWriter<GlobalGravityChanged>,
) {
    if !global.is_changed() || global.is_added() {
        return;
    }

    debug!(
        "Global gravity changed: direction={:?}, strength={}",
        global.current_direction(),
        global.current_strength()
    );
    changes.write(GlobalGravityChanged {
        direction: global.current_direction(),
        strength: global.current_strength(),
    });
}

/// Keep the physics engine's gravity in step with the global signal for
/// bodies that opt out of custom gravity.
pub(crate) fn sync_physics_gravity(
    global: Res<GlobalGravity>,
    mut physics_gravity: ResMut<Gravity>,
    mut players: Query<
        (
            &GravityDirection,
            &GravitySettings,
            &GravityIntegrator,
            &mut GravityScale,
        ),
        With<Player>,
    >,
) {
    if global.is_changed() && global.vector().is_finite() {
        physics_gravity.0 = global.vector();
    }

    for (direction, settings, integrator, mut scale) in &mut players {
        let config = settings.config();
        let wanted = if config.use_custom_gravity || integrator.is_suspended() {
            0.0
        } else {
            config.gravity_scale * direction.sign()
        };
        if scale.0 != wanted {
            scale.0 = wanted;
        }
    }
}

pub(crate) fn integrate_gravity(
    time: Res<Time>,
    tuning: Res<GravityTuning>,
    global: Option<Res<GlobalGravity>>,
    zones: Query<&GravityZone>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &GravityDirection,
            &GravitySettings,
            &ZoneStack,
            &mut GravityIntegrator,
        ),
        With<Player>,
    >,
    mut anomalies: MessageWriter<GravityAnomalyEvent>,
) {
    let dt = time.delta_secs();
    let global_vector = global.as_ref().map(|g| g.vector());

    for (entity, transform, direction, settings, stack, mut integrator) in &mut players {
        if integrator.is_suspended() {
            continue;
        }

        let position = transform.translation.truncate();
        let zone = stack
            .winner(|zone| zones.get(zone).is_ok_and(|z| z.active))
            .and_then(|zone| {
                zones
                    .get(zone)
                    .ok()
                    .map(|z| (zone, z.gravity_at(position)))
            });

        let (base, source) = resolve_base_gravity(zone, global_vector);
        let candidate = effective_gravity(base, *direction, settings.config());
        let tick = integrator.tick(candidate, source, dt, settings.config(), &tuning);

        if let Some(anomaly) = tick.anomaly {
            report_anomaly(entity, anomaly, &mut anomalies);
        }
    }
}

/// Commit gravity to the body velocity and validate the result.
pub(crate) fn apply_gravity_to_bodies(
    time: Res<Time>,
    tuning: Res<GravityTuning>,
    mut players: Query<
        (
            Entity,
            &GravitySettings,
            &mut GravityIntegrator,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
    mut anomalies: MessageWriter<GravityAnomalyEvent>,
) {
    let dt = time.delta_secs();

    for (entity, settings, mut integrator, mut velocity) in &mut players {
        if integrator.is_suspended() {
            continue;
        }

        let config = settings.config();
        let mut next = velocity.0;
        if config.use_custom_gravity {
            next = apply_gravity(
                next,
                integrator.current_gravity(),
                dt,
                config,
                tuning.max_fall_speed,
            );
        }

        let (sanitized, anomaly) = integrator.sanitize_velocity(next, tuning.max_speed);
        velocity.0 = sanitized;

        if let Some(anomaly) = anomaly {
            report_anomaly(entity, anomaly, &mut anomalies);
        }
    }
}

fn report_anomaly(
    entity: Entity,
    anomaly: GravityAnomaly,
    anomalies: &mut MessageWriter<GravityAnomalyEvent>,
) {
    warn!(
        "Gravity anomaly {:?} on {:?}: observed {:?}, substituted {:?}",
        anomaly.kind, entity, anomaly.observed, anomaly.substituted
    );
    anomalies.write(GravityAnomalyEvent {
        entity,
        kind: anomaly.kind,
        observed: anomaly.observed,
        substituted: anomaly.substituted,
    });
}
