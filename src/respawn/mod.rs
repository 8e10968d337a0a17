//! Respawn domain: checkpoints, death ownership and the recovery sequence.

mod assist;
mod checkpoint;
mod coordinator;
mod events;
mod resources;
mod safety;
mod sequence;
mod systems;

pub use assist::{ASSIST, AssistDecision, run_assist};
pub use checkpoint::{Checkpoint, CheckpointRecord, CheckpointStorage, CheckpointStore};
pub use coordinator::{
    ClaimOutcome, Claimant, CoordinatorAction, DeathId, DeathNotice, DeathStreak, ReadyRespawn,
    RespawnClaim, RespawnCompletion, RespawnCoordinator, RespawnDestination, RespawnError,
};
pub use events::{
    CheckpointReachedEvent, ConsecutiveDeathsEvent, RespawnCompletedEvent, RespawnStartedEvent,
};
pub use resources::{RespawnAssist, RespawnTuning};
pub use safety::{FallbackReason, SpawnResolution, find_safe_position, is_safe_position};
pub use sequence::{
    RespawnBody, RespawnEnvironment, RespawnPlan, RespawnReport, execute_respawn, plan_respawn,
};

use bevy::prelude::*;

use crate::core::RunnerSet;
use crate::respawn::systems::{
    advance_respawn, assist_primary_handler, handle_deaths, prepare_stage_recovery,
    record_checkpoints,
};

pub struct RespawnPlugin;

impl Plugin for RespawnPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RespawnTuning>()
            .init_resource::<RespawnAssist>()
            .init_resource::<CheckpointStore>()
            .init_resource::<RespawnCoordinator>()
            .add_message::<RespawnStartedEvent>()
            .add_message::<RespawnCompletedEvent>()
            .add_message::<ConsecutiveDeathsEvent>()
            .add_message::<CheckpointReachedEvent>()
            .add_systems(
                FixedUpdate,
                prepare_stage_recovery.in_set(RunnerSet::Detect),
            )
            .add_systems(
                FixedUpdate,
                (
                    record_checkpoints,
                    handle_deaths,
                    assist_primary_handler,
                    advance_respawn,
                )
                    .chain()
                    .in_set(RunnerSet::Recover),
            );
    }
}
