//! Detection domain: the scheduled ground detection system.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::detection::events::GroundEventWriters;
use crate::detection::ground::{GroundProbeConfig, detect};
use crate::detection::transitions::GroundSensor;
use crate::gravity::GravityDirection;
use crate::player::{Player, PlayerState, PlayerStateMachine};
use crate::terrain::{PhysicsTerrain, SurfaceMaterial};

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    materials: Query<&'static SurfaceMaterial>,
    config: Res<GroundProbeConfig>,
    mut players: Query<
        (
            Entity,
            &Transform,
            &GravityDirection,
            &PlayerStateMachine,
            &mut GroundSensor,
        ),
        With<Player>,
    >,
    mut events: GroundEventWriters,
) {
    let terrain = PhysicsTerrain::new(&spatial_query, &materials);

    for (entity, transform, gravity, machine, mut sensor) in &mut players {
        // Frozen bodies are re-detected by the respawn sequence instead
        if machine.current_state() == PlayerState::Dead {
            continue;
        }

        let info = detect(&terrain, transform.translation.truncate(), *gravity, &config);
        let transitions = sensor.record(info);

        if !transitions.is_empty() {
            debug!(
                "Ground transitions: {:?} (angle={:.1}, hits={})",
                transitions, info.ground_angle, info.probe_hits
            );
            events.emit(entity, &transitions);
        }
    }
}

#[cfg(feature = "dev-tools")]
pub(crate) fn draw_probe_gizmos(
    mut gizmos: Gizmos,
    config: Res<GroundProbeConfig>,
    players: Query<(&Transform, &GravityDirection, &GroundSensor), With<Player>>,
) {
    for (transform, gravity, sensor) in &players {
        let foot = config.foot_origin(transform.translation.truncate(), *gravity);
        let down = gravity.down_vector();
        let color = if sensor.is_grounded() {
            Color::srgb(0.2, 0.9, 0.3)
        } else {
            Color::srgb(0.9, 0.3, 0.2)
        };

        for offset in config.probe_offsets() {
            let origin = foot + Vec2::X * offset;
            gizmos.line_2d(origin, origin + down * config.probe_reach(), color);
        }

        let info = sensor.current();
        if let Some(point) = info.ground_point {
            gizmos.line_2d(point, point + info.ground_normal * 16.0, Color::WHITE);
        }
    }
}
