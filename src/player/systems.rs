//! Player domain: input, flips, run speed, damage and state evaluation.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::detection::GroundSensor;
use crate::gravity::{GravityDirection, GravityFlipEvent, GravitySettings, flip_velocity};
use crate::player::components::{Lives, LivesSource, Player, RunSpeed};
use crate::player::events::{DamageEvent, DeathCause, DeathEvent, StateChangedEvent};
use crate::player::resources::{FlipInput, PlayerTuning};
use crate::player::state::{DamageOutcome, PlayerState, PlayerStateMachine, StateChange};
use crate::player::status::PlayerStatus;
use crate::stage::StageTuning;
use crate::terrain::Hazard;

pub(crate) fn read_flip_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<FlipInput>) {
    if keyboard.just_pressed(KeyCode::Space)
        || keyboard.just_pressed(KeyCode::KeyW)
        || keyboard.just_pressed(KeyCode::ArrowUp)
    {
        input.press();
    }
}

pub(crate) fn tick_player_timers(
    time: Res<Time>,
    mut players: Query<&mut PlayerStateMachine, With<Player>>,
) {
    for mut machine in &mut players {
        machine.tick(time.delta());
    }
}

fn state_changed(entity: Entity, change: StateChange) -> StateChangedEvent {
    debug!("Player state: {:?} -> {:?}", change.from, change.to);
    StateChangedEvent {
        entity,
        from: change.from,
        to: change.to,
    }
}

/// Accept or reject a pending flip. Accepted flips reverse the direction and
/// carry the inverted vertical speed scaled by the retention ratio.
pub(crate) fn handle_flip_requests(
    mut input: ResMut<FlipInput>,
    tuning: Res<PlayerTuning>,
    mut players: Query<
        (
            Entity,
            &mut PlayerStateMachine,
            &mut GravityDirection,
            &GravitySettings,
            &mut LinearVelocity,
        ),
        With<Player>,
    >,
    mut flips: MessageWriter<GravityFlipEvent>,
    mut state_changes: MessageWriter<StateChangedEvent>,
) {
    if !input.take() {
        return;
    }

    for (entity, mut machine, mut direction, settings, mut velocity) in &mut players {
        match machine.request_flip(&tuning) {
            Ok(change) => {
                direction.flip();
                let retention = settings.config().momentum_retention();
                velocity.0 = flip_velocity(velocity.0, retention);

                debug!(
                    "Gravity flipped to {:?} (retention {:.2}, vy {:.1})",
                    *direction, retention, velocity.y
                );
                flips.write(GravityFlipEvent {
                    entity,
                    direction: *direction,
                });
                state_changes.write(state_changed(entity, change));
            }
            Err(reason) => debug!("Flip rejected: {}", reason),
        }
    }
}

/// Commit the (possibly slope-modulated) run speed to the body.
pub(crate) fn apply_run_speed(
    tuning: Res<PlayerTuning>,
    mut players: Query<(&RunSpeed, &PlayerStateMachine, &mut LinearVelocity), With<Player>>,
) {
    for (run_speed, machine, mut velocity) in &mut players {
        if machine.is_dead() {
            continue;
        }
        velocity.x = run_speed.current * tuning.run_sign();
    }
}

pub(crate) fn detect_hazard_contacts(
    mut collisions: MessageReader<CollisionStart>,
    hazards: Query<(), With<Hazard>>,
    players: Query<(), With<Player>>,
    mut damage: MessageWriter<DamageEvent>,
) {
    for event in collisions.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (hazard_entity, player_entity) in pairs {
            if hazards.contains(hazard_entity) && players.contains(player_entity) {
                damage.write(DamageEvent {
                    entity: player_entity,
                    source: Some(hazard_entity),
                });
            }
        }
    }
}

pub(crate) fn apply_damage(
    mut damage: MessageReader<DamageEvent>,
    tuning: Res<PlayerTuning>,
    mut players: Query<(&Transform, &mut PlayerStateMachine, &mut Lives), With<Player>>,
    mut state_changes: MessageWriter<StateChangedEvent>,
    mut deaths: MessageWriter<DeathEvent>,
) {
    for event in damage.read() {
        let Ok((transform, mut machine, mut lives)) = players.get_mut(event.entity) else {
            continue;
        };

        match machine.receive_damage(&mut *lives, &tuning) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt(change) => {
                debug!("Player hurt, {} lives left", lives.lives_remaining());
                state_changes.write(state_changed(event.entity, change));
            }
            DamageOutcome::Killed(change) => {
                state_changes.write(state_changed(event.entity, change));
                deaths.write(DeathEvent {
                    entity: event.entity,
                    position: transform.translation.truncate(),
                    cause: DeathCause::Hazard,
                });
            }
        }
    }
}

/// Leaving the stage bounds is always fatal.
pub(crate) fn check_kill_plane(
    stage: Res<StageTuning>,
    mut players: Query<(Entity, &Transform, &mut PlayerStateMachine), With<Player>>,
    mut state_changes: MessageWriter<StateChangedEvent>,
    mut deaths: MessageWriter<DeathEvent>,
) {
    for (entity, transform, mut machine) in &mut players {
        let position = transform.translation.truncate();
        if stage.contains(position) {
            continue;
        }
        if let Some(change) = machine.kill() {
            state_changes.write(state_changed(entity, change));
            deaths.write(DeathEvent {
                entity,
                position,
                cause: DeathCause::KillPlane,
            });
        }
    }
}

pub(crate) fn evaluate_player_state(
    tuning: Res<PlayerTuning>,
    mut players: Query<
        (
            Entity,
            &GroundSensor,
            &GravityDirection,
            &LinearVelocity,
            &mut PlayerStateMachine,
        ),
        With<Player>,
    >,
    mut state_changes: MessageWriter<StateChangedEvent>,
) {
    for (entity, sensor, direction, velocity, mut machine) in &mut players {
        let info = sensor.current();
        let separation_speed = if info.is_grounded {
            velocity.0.dot(info.ground_normal)
        } else {
            velocity.0.dot(direction.up_vector())
        };

        if let Some(change) = machine.evaluate(info.is_grounded, separation_speed, &tuning) {
            state_changes.write(state_changed(entity, change));
        }
    }
}

fn state_color(state: PlayerState) -> Color {
    match state {
        PlayerState::Running => Color::srgb(0.9, 0.9, 0.9),
        PlayerState::Falling => Color::srgb(0.7, 0.8, 1.0),
        PlayerState::GravityFlipping => Color::srgb(0.6, 1.0, 0.9),
        PlayerState::Invincible => Color::srgba(1.0, 0.9, 0.5, 0.6),
        PlayerState::Dead => Color::srgb(0.5, 0.1, 0.1),
    }
}

pub(crate) fn update_player_visuals(
    status: PlayerStatus,
    mut sprites: Query<(&mut Sprite, &GravityDirection), With<Player>>,
) {
    let Some(state) = status.current_state() else {
        return;
    };

    for (mut sprite, direction) in &mut sprites {
        sprite.color = state_color(state);
        sprite.flip_y = *direction == GravityDirection::Up;
    }
}

/// The camera tracks the runner horizontally and holds still while a death
/// is being handled.
pub(crate) fn camera_follow(
    status: PlayerStatus,
    players: Query<&Transform, With<Player>>,
    mut cameras: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    if status.current_state() == Some(PlayerState::Dead) && !status.is_respawn_handled() {
        return;
    }
    let Ok(player) = players.single() else {
        return;
    };

    for mut camera in &mut cameras {
        camera.translation.x = player.translation.x;
    }
}

#[cfg(feature = "dev-tools")]
pub(crate) fn draw_gravity_gizmo(
    status: PlayerStatus,
    players: Query<&Transform, With<Player>>,
    mut gizmos: Gizmos,
) {
    let (Ok(player), Some(gravity)) = (players.single(), status.current_gravity()) else {
        return;
    };

    let origin = player.translation.truncate();
    let color = if status.is_on_slope() {
        Color::srgb(1.0, 0.8, 0.2)
    } else if status.is_grounded() {
        Color::srgb(0.2, 0.9, 0.3)
    } else {
        Color::srgb(0.6, 0.6, 0.9)
    };
    gizmos.arrow_2d(origin, origin + gravity.normalize_or_zero() * 40.0, color);
}
