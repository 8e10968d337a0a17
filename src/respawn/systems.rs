//! Respawn domain: death intake, primary handlers and the respawn sequence.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::{StageClock, StageStartedEvent};
use crate::detection::{GroundEventWriters, GroundProbeConfig, GroundSensor};
use crate::gravity::{
    FALLBACK_GRAVITY, GlobalGravity, GravityDirection, GravityIntegrator, GravitySettings,
    PristineGravityConfig, ZoneStack,
};
use crate::player::{
    DeathEvent, Lives, Player, PlayerStateMachine, RunSpeed, StateChangedEvent,
};
use crate::respawn::assist::{AssistDecision, run_assist};
use crate::respawn::checkpoint::{Checkpoint, CheckpointStorage, CheckpointStore};
use crate::respawn::coordinator::{CoordinatorAction, RespawnCoordinator};
use crate::respawn::events::{
    CheckpointReachedEvent, ConsecutiveDeathsEvent, RespawnCompletedEvent, RespawnStartedEvent,
};
use crate::respawn::resources::{RespawnAssist, RespawnTuning};
use crate::respawn::sequence::{
    RespawnBody, RespawnEnvironment, execute_respawn, plan_respawn,
};
use crate::slope::SlopeModulator;
use crate::stage::StageTuning;
use crate::terrain::{PhysicsTerrain, SurfaceMaterial};

/// Fresh ownership, streak and checkpoints for every stage (re)start, with
/// the spawn point as the first record.
pub(crate) fn prepare_stage_recovery(
    mut starts: MessageReader<StageStartedEvent>,
    mut coordinator: ResMut<RespawnCoordinator>,
    mut store: ResMut<CheckpointStore>,
    mut assist: ResMut<RespawnAssist>,
    tuning: Res<RespawnTuning>,
) {
    for start in starts.read() {
        coordinator.reset();
        store.reset();
        assist.enabled = tuning.assist_enabled;

        store
            .set(start.spawn_position, start.gravity)
            .with_aux("elapsed_secs", 0.0_f64)
            .with_aux("deaths", 0_u32);

        info!(
            "Stage run {} recovery ready, spawn checkpoint at {:?}",
            start.stage_run, start.spawn_position
        );
    }
}

pub(crate) fn record_checkpoints(
    mut collisions: MessageReader<CollisionStart>,
    clock: Res<StageClock>,
    mut store: ResMut<CheckpointStore>,
    checkpoints: Query<&Checkpoint>,
    players: Query<(&Transform, &GravityDirection, &PlayerStateMachine), With<Player>>,
    mut reached: MessageWriter<CheckpointReachedEvent>,
) {
    for event in collisions.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (checkpoint_entity, player_entity) in pairs {
            let Ok(checkpoint) = checkpoints.get(checkpoint_entity) else {
                continue;
            };
            let Ok((transform, direction, machine)) = players.get(player_entity) else {
                continue;
            };
            if machine.is_dead() {
                continue;
            }
            if store
                .current()
                .is_some_and(|current| current.stage_progress_index >= checkpoint.index)
            {
                continue;
            }

            let position = transform.translation.truncate();
            let record = store.set(position, *direction);
            record.stage_progress_index = checkpoint.index;
            record.timestamp = clock.elapsed_secs;
            record
                .with_aux("elapsed_secs", clock.elapsed_secs)
                .with_aux("deaths", clock.deaths);

            info!(
                "Checkpoint {} reached at {:?} ({:?} gravity)",
                checkpoint.index, position, direction
            );
            reached.write(CheckpointReachedEvent {
                index: checkpoint.index,
                position,
            });
        }
    }
}

/// Freeze the body and open a respawn sequence for every death.
pub(crate) fn handle_deaths(
    mut deaths: MessageReader<DeathEvent>,
    tuning: Res<RespawnTuning>,
    mut clock: ResMut<StageClock>,
    mut coordinator: ResMut<RespawnCoordinator>,
    mut bodies: Query<(&mut LinearVelocity, &mut GravityIntegrator), With<Player>>,
    mut streaks: MessageWriter<ConsecutiveDeathsEvent>,
) {
    for death in deaths.read() {
        if let Ok((mut velocity, mut integrator)) = bodies.get_mut(death.entity) {
            velocity.0 = Vec2::ZERO;
            integrator.suspend();
        }

        let notice = match coordinator.begin_death(clock.elapsed_secs, &tuning) {
            Ok(notice) => notice,
            Err(err) => {
                warn!("Ignoring death of {:?}: {}", death.entity, err);
                continue;
            }
        };
        clock.record_death();

        info!(
            "{} ({:?}) at {:?}: consecutive={}, delay={:.2}s",
            notice.death, death.cause, death.position, notice.consecutive, notice.delay_secs
        );

        if let Some(streak) = notice.streak_event() {
            warn!(
                "{} deaths within {:.0}s, respawn delay escalated",
                coordinator.consecutive_deaths(),
                tuning.streak_window
            );
            streaks.write(streak);
        }
    }
}

/// Primary handler: after a death streak, claim the respawn and send the
/// player back one checkpoint.
pub(crate) fn assist_primary_handler(
    mut streaks: MessageReader<ConsecutiveDeathsEvent>,
    assist: Res<RespawnAssist>,
    store: Res<CheckpointStore>,
    mut coordinator: ResMut<RespawnCoordinator>,
) {
    for streak in streaks.read() {
        match run_assist(streak, &assist, &store, &mut coordinator) {
            Ok(AssistDecision::Claimed(_)) | Ok(AssistDecision::Disabled) => {}
            Ok(AssistDecision::AlreadyClaimed(owner)) => {
                debug!("Assist skipped {}: already owned by {}", streak.death, owner);
            }
            Ok(AssistDecision::Stale) => {
                debug!("Assist skipped {}: no longer current", streak.death);
            }
            Err(err) => warn!("Assist could not submit destination: {}", err),
        }
    }
}

type RespawnQuery<'a> = (
    Entity,
    &'a mut Transform,
    &'a mut LinearVelocity,
    &'a mut GravityDirection,
    (&'a mut GravitySettings, &'a PristineGravityConfig),
    &'a mut GravityIntegrator,
    &'a mut ZoneStack,
    &'a mut GroundSensor,
    &'a mut Lives,
    &'a mut PlayerStateMachine,
    (&'a mut SlopeModulator, &'a mut RunSpeed),
);

/// Drive the coordinator and run the respawn once it is ready.
pub(crate) fn advance_respawn(
    time: Res<Time>,
    tuning: Res<RespawnTuning>,
    stage: Res<StageTuning>,
    probes: Res<GroundProbeConfig>,
    global: Option<Res<GlobalGravity>>,
    mut coordinator: ResMut<RespawnCoordinator>,
    mut store: ResMut<CheckpointStore>,
    spatial_query: SpatialQuery,
    materials: Query<&'static SurfaceMaterial>,
    mut players: Query<RespawnQuery<'static>, With<Player>>,
    mut ground_events: GroundEventWriters,
    mut state_changes: MessageWriter<StateChangedEvent>,
    mut started: MessageWriter<RespawnStartedEvent>,
    mut completed: MessageWriter<RespawnCompletedEvent>,
) {
    match coordinator.tick(time.delta_secs()) {
        Some(CoordinatorAction::FallbackClaimed(death)) => {
            debug!("No primary handler claimed {}, fallback owns it", death);
        }
        Some(CoordinatorAction::HandoverDefaulted(death, owner)) => {
            warn!(
                "{} never submitted a destination for {}, using the current checkpoint",
                owner, death
            );
        }
        None => {}
    }

    let Some(ready) = coordinator.poll_ready() else {
        return;
    };

    let terrain = PhysicsTerrain::new(&spatial_query, &materials);
    let env = RespawnEnvironment {
        terrain: &terrain,
        tuning: &tuning,
        probes: &probes,
        default_spawn: stage.world_spawn(),
        base_gravity: global
            .as_ref()
            .map(|g| g.vector())
            .filter(|g| g.is_finite())
            .unwrap_or(FALLBACK_GRAVITY),
    };
    let plan = plan_respawn(&env, &ready, &mut store);

    let Ok((
        entity,
        transform,
        velocity,
        direction,
        (settings, pristine),
        integrator,
        zones,
        sensor,
        lives,
        machine,
        (modulator, run_speed),
    )) = players.single_mut()
    else {
        warn!("No player to respawn for {}, closing sequence", ready.death());
        coordinator.complete(ready, plan.position());
        return;
    };

    started.write(RespawnStartedEvent {
        entity,
        position: plan.position(),
    });

    let body = RespawnBody {
        transform: transform.into_inner(),
        velocity: velocity.into_inner(),
        direction: direction.into_inner(),
        settings: settings.into_inner(),
        pristine,
        integrator: integrator.into_inner(),
        zones: zones.into_inner(),
        sensor: sensor.into_inner(),
        lives: lives.into_inner(),
        machine: machine.into_inner(),
        modulator: modulator.into_inner(),
        run_speed: run_speed.into_inner(),
    };
    let report = execute_respawn(&env, &plan, ready, &mut coordinator, body);

    ground_events.emit(entity, &report.transitions);
    if let Some(change) = report.state_change {
        state_changes.write(StateChangedEvent {
            entity,
            from: change.from,
            to: change.to,
        });
    }

    let owner = report.completion.owner();
    info!(
        "Respawned at {:?} ({:?} gravity, grounded={}) by {}",
        plan.position(),
        plan.gravity_direction,
        report.ground.is_grounded,
        owner
    );
    completed.write(RespawnCompletedEvent {
        entity,
        position: report.completion.position(),
        owner,
    });
}
