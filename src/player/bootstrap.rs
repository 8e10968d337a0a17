//! Player domain: spawning the runner with its physics and recovery state.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::detection::GroundSensor;
use crate::gravity::{
    GlobalGravity, GravityDirection, GravityIntegrator, GravitySettings, GravityTuning,
    PristineGravityConfig, ZoneStack, effective_gravity,
};
use crate::player::components::{Lives, Player, RunSpeed};
use crate::player::resources::{FlipInput, PlayerTuning};
use crate::player::state::PlayerStateMachine;
use crate::slope::SlopeModulator;
use crate::stage::{StageEntity, StageTuning};
use crate::terrain::GameLayer;

/// Spawn the player at the world spawn. Runs on entering `GameState::Run`,
/// after the stage geometry.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<PlayerTuning>,
    gravity_tuning: Res<GravityTuning>,
    global: Res<GlobalGravity>,
    stage: Res<StageTuning>,
    mut flip_input: ResMut<FlipInput>,
    existing_player: Query<Entity, With<Player>>,
) {
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    flip_input.clear();

    // The only point where the pristine snapshot is taken
    let config = gravity_tuning.configuration.clone();
    let pristine = PristineGravityConfig::capture(&config);
    let direction = GravityDirection::Down;
    let initial_gravity = effective_gravity(global.vector(), direction, &config);

    let spawn = stage.world_spawn();
    let size = Vec2::from(tuning.size);

    info!(
        "Spawning player at {:?}: run_speed={}, lives={}, custom_gravity={}",
        spawn, tuning.run_speed, tuning.max_lives, config.use_custom_gravity
    );

    commands.spawn((
        // Identity & locomotion
        (
            Player,
            StageEntity,
            RunSpeed::new(tuning.run_speed),
            Lives::new(tuning.max_lives),
            PlayerStateMachine::default(),
            GroundSensor::default(),
            SlopeModulator::default(),
        ),
        // Gravity
        (
            direction,
            GravitySettings::new(config),
            pristine,
            GravityIntegrator::new(initial_gravity),
            ZoneStack::default(),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(spawn.extend(1.0)),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(size.x, size.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Hazard, GameLayer::Sensor],
            ),
        ),
    ));
}
