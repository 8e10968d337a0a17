//! Slope domain: run speed modulation and snapping systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::detection::GroundSensor;
use crate::player::{Player, PlayerState, PlayerStateMachine, PlayerTuning, RunSpeed};
use crate::slope::modulator::{SlopeModulator, SlopeTuning, snap_force};

pub(crate) fn modulate_slope_speed(
    tuning: Res<SlopeTuning>,
    player_tuning: Res<PlayerTuning>,
    mut players: Query<
        (
            &GroundSensor,
            &PlayerStateMachine,
            &mut SlopeModulator,
            &mut RunSpeed,
        ),
        With<Player>,
    >,
) {
    for (sensor, machine, mut modulator, mut run_speed) in &mut players {
        let mut speed = run_speed.current;
        let changed = if machine.current_state() == PlayerState::Dead {
            modulator.restore(&mut speed)
        } else {
            modulator.apply(
                sensor.current(),
                &mut speed,
                player_tuning.run_sign(),
                &tuning,
            )
        };

        if changed {
            debug!(
                "Run speed {:.1} -> {:.1} (multiplier {:.2})",
                run_speed.current,
                speed,
                modulator.multiplier()
            );
            run_speed.current = speed;
        }
    }
}

pub(crate) fn apply_slope_snap(
    time: Res<Time>,
    tuning: Res<SlopeTuning>,
    mut players: Query<
        (&GroundSensor, &PlayerStateMachine, &mut LinearVelocity),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (sensor, machine, mut velocity) in &mut players {
        if matches!(
            machine.current_state(),
            PlayerState::GravityFlipping | PlayerState::Dead
        ) {
            continue;
        }

        if let Some(force) = snap_force(sensor.current(), velocity.0, &tuning) {
            velocity.0 += force * dt;
        }
    }
}
