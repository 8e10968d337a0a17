//! Respawn domain: the ordered respawn sequence over plain component borrows.
//!
//! [`plan_respawn`] decides where the player goes and with which gravity;
//! [`execute_respawn`] applies that plan to the body in a fixed order and
//! closes the coordinator's sequence. Neither touches the ECS, so the
//! system in `systems.rs` only gathers borrows and writes messages.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::detection::{GroundInfo, GroundProbeConfig, GroundSensor, GroundTransition, detect};
use crate::gravity::{
    GravityDirection, GravityIntegrator, GravitySettings, PristineGravityConfig, ZoneStack,
    effective_gravity,
};
use crate::player::{Lives, PlayerStateMachine, RunSpeed, StateChange};
use crate::respawn::checkpoint::{CheckpointRecord, CheckpointStorage, CheckpointStore};
use crate::respawn::coordinator::{
    ReadyRespawn, RespawnCompletion, RespawnCoordinator, RespawnDestination,
};
use crate::respawn::resources::RespawnTuning;
use crate::respawn::safety::{SpawnResolution, find_safe_position};
use crate::slope::SlopeModulator;
use crate::terrain::TerrainQuery;

/// Everything on the player that a respawn rewrites.
pub struct RespawnBody<'a> {
    pub transform: &'a mut Transform,
    pub velocity: &'a mut LinearVelocity,
    pub direction: &'a mut GravityDirection,
    pub settings: &'a mut GravitySettings,
    pub pristine: &'a PristineGravityConfig,
    pub integrator: &'a mut GravityIntegrator,
    pub zones: &'a mut ZoneStack,
    pub sensor: &'a mut GroundSensor,
    pub lives: &'a mut Lives,
    pub machine: &'a mut PlayerStateMachine,
    pub modulator: &'a mut SlopeModulator,
    pub run_speed: &'a mut RunSpeed,
}

/// World facts the sequence reads.
pub struct RespawnEnvironment<'a, T: TerrainQuery + ?Sized> {
    pub terrain: &'a T,
    pub tuning: &'a RespawnTuning,
    pub probes: &'a GroundProbeConfig,
    /// Terminal fallback when no checkpoint is usable
    pub default_spawn: Vec2,
    /// Ambient gravity before direction and scale are applied
    pub base_gravity: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RespawnPlan {
    /// The checkpoint the plan was derived from, after any revert
    pub record: Option<CheckpointRecord>,
    pub resolution: SpawnResolution,
    pub gravity_direction: GravityDirection,
}

impl RespawnPlan {
    pub fn position(&self) -> Vec2 {
        self.resolution.position()
    }
}

#[derive(Debug)]
pub struct RespawnReport {
    pub completion: RespawnCompletion,
    /// Ground facts from the detection forced at the new position
    pub ground: GroundInfo,
    pub transitions: Vec<GroundTransition>,
    pub state_change: Option<StateChange>,
}

/// Resolve the destination (reverting the store for `PreviousCheckpoint`),
/// validate it and pick the gravity the player resumes with. A default
/// spawn always resumes with `Down`.
pub fn plan_respawn<T: TerrainQuery + ?Sized>(
    env: &RespawnEnvironment<'_, T>,
    ready: &ReadyRespawn,
    store: &mut CheckpointStore,
) -> RespawnPlan {
    if ready.destination() == RespawnDestination::PreviousCheckpoint {
        match store.revert() {
            Some(dropped) => debug!(
                "Reverted checkpoint {} for {}",
                dropped.stage_progress_index,
                ready.death()
            ),
            None => debug!("No earlier checkpoint for {}, using current", ready.death()),
        }
    }
    let record = store.current().cloned();

    let checkpoint_gravity = record
        .as_ref()
        .map_or(GravityDirection::Down, |r| r.gravity_direction);
    let resolution = find_safe_position(
        env.terrain,
        record.as_ref().map(|r| r.position),
        checkpoint_gravity,
        env.default_spawn,
        env.tuning,
    );

    let gravity_direction = match resolution {
        SpawnResolution::DefaultSpawn { position, reason } => {
            warn!(
                "Respawning at default spawn {:?} ({:?}) for {}",
                position,
                reason,
                ready.death()
            );
            GravityDirection::Down
        }
        SpawnResolution::Offset {
            position,
            checkpoint,
        } => {
            info!("Checkpoint {:?} unsafe, respawning at {:?}", checkpoint, position);
            checkpoint_gravity
        }
        SpawnResolution::Exact(_) => checkpoint_gravity,
    };

    RespawnPlan {
        record,
        resolution,
        gravity_direction,
    }
}

/// Apply `plan` to the body and close the sequence. Order: reposition, stop,
/// restore pristine gravity settings, reset zones, resume the integrator,
/// re-detect the ground, refill lives, drop the slope latch, then leave
/// `Dead` with the completion token.
pub fn execute_respawn<T: TerrainQuery + ?Sized>(
    env: &RespawnEnvironment<'_, T>,
    plan: &RespawnPlan,
    ready: ReadyRespawn,
    coordinator: &mut RespawnCoordinator,
    body: RespawnBody<'_>,
) -> RespawnReport {
    let position = plan.position();
    let direction = plan.gravity_direction;

    body.transform.translation = position.extend(body.transform.translation.z);
    body.velocity.0 = Vec2::ZERO;
    body.settings.restore_from(body.pristine);
    *body.direction = direction;
    body.zones.reset();
    body.integrator.resume_at(effective_gravity(
        env.base_gravity,
        direction,
        body.settings.config(),
    ));

    // Out-of-schedule detection so the state is consistent before the next tick
    let ground = detect(env.terrain, position, direction, env.probes);
    let transitions = body.sensor.record(ground);

    body.lives.refill();
    body.modulator.reset();
    body.run_speed.current = body.run_speed.base;

    let completion = coordinator.complete(ready, position);
    let state_change = body.machine.revive(&completion);

    RespawnReport {
        completion,
        ground,
        transitions,
        state_change,
    }
}
