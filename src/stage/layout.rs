//! Stage domain: the test stage description and its spawner.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::gravity::GravityZone;
use crate::respawn::Checkpoint;
use crate::stage::resources::{FinishLine, StageEntity};
use crate::terrain::{GameLayer, Ground, Hazard, SurfaceMaterial};

/// Thickness of floors, ceilings and ramps
pub const SLAB_THICKNESS: f32 = 32.0;
const RAMP_THICKNESS: f32 = 16.0;
const SENSOR_HEIGHT: f32 = 400.0;

#[derive(Debug, Clone, PartialEq)]
pub enum StagePiece {
    /// Axis-aligned solid block
    Solid { min: Vec2, max: Vec2 },
    /// Straight ramp whose walkable edge starts at `start` and rises at
    /// `angle_deg` towards +X
    Ramp {
        start: Vec2,
        angle_deg: f32,
        length: f32,
    },
    Spikes { min: Vec2, max: Vec2 },
    Zone {
        center: Vec2,
        size: Vec2,
        gravity: Vec2,
    },
    Checkpoint { index: u32, x: f32 },
    Finish { x: f32 },
}

impl StagePiece {
    pub fn floor(x0: f32, x1: f32, top: f32) -> Self {
        StagePiece::Solid {
            min: Vec2::new(x0, top - SLAB_THICKNESS),
            max: Vec2::new(x1, top),
        }
    }

    pub fn ceiling(x0: f32, x1: f32, bottom: f32) -> Self {
        StagePiece::Solid {
            min: Vec2::new(x0, bottom),
            max: Vec2::new(x1, bottom + SLAB_THICKNESS),
        }
    }

    /// Far end of a ramp's walkable edge.
    pub fn ramp_end(start: Vec2, angle_deg: f32, length: f32) -> Vec2 {
        start + Vec2::from_angle(angle_deg.to_radians()) * length
    }
}

/// Floors, a walkable 30° ramp onto a plateau, a gap that needs a flip,
/// spikes on both surfaces, a steep 60° ramp, an inverting gravity zone,
/// three checkpoints and the finish line.
pub fn test_stage_layout() -> Vec<StagePiece> {
    let ramp_start = Vec2::new(800.0, -200.0);
    let ramp_end = StagePiece::ramp_end(ramp_start, 30.0, 240.0);

    vec![
        StagePiece::floor(-600.0, ramp_end.x, -200.0),
        StagePiece::Ramp {
            start: ramp_start,
            angle_deg: 30.0,
            length: 240.0,
        },
        StagePiece::Solid {
            min: Vec2::new(ramp_end.x, -200.0),
            max: Vec2::new(1400.0, ramp_end.y),
        },
        StagePiece::ceiling(-600.0, 4800.0, 200.0),
        StagePiece::floor(1600.0, 3200.0, -200.0),
        StagePiece::Spikes {
            min: Vec2::new(1800.0, -200.0),
            max: Vec2::new(1880.0, -184.0),
        },
        StagePiece::Ramp {
            start: Vec2::new(2400.0, -200.0),
            angle_deg: 60.0,
            length: 80.0,
        },
        StagePiece::Spikes {
            min: Vec2::new(2600.0, 184.0),
            max: Vec2::new(2680.0, 200.0),
        },
        StagePiece::Zone {
            center: Vec2::new(3000.0, 0.0),
            size: Vec2::new(400.0, 400.0),
            gravity: Vec2::new(0.0, 1800.0),
        },
        StagePiece::floor(3200.0, 4800.0, -200.0),
        StagePiece::Checkpoint {
            index: 1,
            x: 1200.0,
        },
        StagePiece::Checkpoint {
            index: 2,
            x: 2000.0,
        },
        StagePiece::Checkpoint {
            index: 3,
            x: 3400.0,
        },
        StagePiece::Finish { x: 4700.0 },
    ]
}

fn solid_layers() -> CollisionLayers {
    CollisionLayers::new(GameLayer::Ground, [GameLayer::Player])
}

fn sensor_layers(layer: GameLayer) -> CollisionLayers {
    CollisionLayers::new(layer, [GameLayer::Player])
}

pub(crate) fn spawn_piece(commands: &mut Commands, piece: &StagePiece) {
    let ground_color = Color::srgb(0.3, 0.32, 0.4);

    match piece {
        StagePiece::Solid { min, max } => {
            let size = *max - *min;
            commands.spawn((
                Ground,
                StageEntity,
                SurfaceMaterial::default(),
                Sprite {
                    color: ground_color,
                    custom_size: Some(size),
                    ..default()
                },
                Transform::from_translation(((*min + *max) * 0.5).extend(0.0)),
                RigidBody::Static,
                Collider::rectangle(size.x, size.y),
                solid_layers(),
            ));
        }
        StagePiece::Ramp {
            start,
            angle_deg,
            length,
        } => {
            let along = Vec2::from_angle(angle_deg.to_radians());
            let edge_mid = *start + along * (*length * 0.5);
            let center = edge_mid - along.perp() * (RAMP_THICKNESS * 0.5);
            commands.spawn((
                Ground,
                StageEntity,
                SurfaceMaterial {
                    friction: 0.0,
                    bounciness: 0.0,
                },
                Sprite {
                    color: ground_color,
                    custom_size: Some(Vec2::new(*length, RAMP_THICKNESS)),
                    ..default()
                },
                Transform::from_translation(center.extend(0.0))
                    .with_rotation(Quat::from_rotation_z(angle_deg.to_radians())),
                RigidBody::Static,
                Collider::rectangle(*length, RAMP_THICKNESS),
                solid_layers(),
            ));
        }
        StagePiece::Spikes { min, max } => {
            let size = *max - *min;
            commands.spawn((
                Hazard,
                StageEntity,
                Sprite {
                    color: Color::srgb(0.9, 0.2, 0.25),
                    custom_size: Some(size),
                    ..default()
                },
                Transform::from_translation(((*min + *max) * 0.5).extend(0.5)),
                RigidBody::Static,
                Collider::rectangle(size.x, size.y),
                Sensor,
                sensor_layers(GameLayer::Hazard),
            ));
        }
        StagePiece::Zone {
            center,
            size,
            gravity,
        } => {
            commands.spawn((
                GravityZone::new(*size, *gravity),
                StageEntity,
                Sprite {
                    color: Color::srgba(0.4, 0.6, 1.0, 0.15),
                    custom_size: Some(*size),
                    ..default()
                },
                Transform::from_translation(center.extend(-0.5)),
            ));
        }
        StagePiece::Checkpoint { index, x } => {
            commands.spawn((
                Checkpoint { index: *index },
                StageEntity,
                Sprite {
                    color: Color::srgba(0.3, 0.9, 0.4, 0.25),
                    custom_size: Some(Vec2::new(8.0, SENSOR_HEIGHT)),
                    ..default()
                },
                Transform::from_xyz(*x, 0.0, -0.5),
                RigidBody::Static,
                Collider::rectangle(8.0, SENSOR_HEIGHT),
                Sensor,
                sensor_layers(GameLayer::Sensor),
            ));
        }
        StagePiece::Finish { x } => {
            commands.spawn((
                FinishLine::default(),
                StageEntity,
                Sprite {
                    color: Color::srgba(1.0, 0.95, 0.4, 0.4),
                    custom_size: Some(Vec2::new(16.0, SENSOR_HEIGHT)),
                    ..default()
                },
                Transform::from_xyz(*x, 0.0, -0.5),
                RigidBody::Static,
                Collider::rectangle(16.0, SENSOR_HEIGHT),
                Sensor,
                sensor_layers(GameLayer::Sensor),
            ));
        }
    }
}
