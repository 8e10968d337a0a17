//! Stage domain: the test stage, run start/finish and teardown.

mod layout;
mod resources;
mod systems;
#[cfg(test)]
mod tests;

pub use layout::{SLAB_THICKNESS, StagePiece, test_stage_layout};
pub use resources::{FinishLine, StageEntity, StageTuning};

use bevy::prelude::*;

use crate::core::{GameState, RunnerSet};
use crate::player::spawn_player;
use crate::stage::systems::{announce_stage_start, detect_finish_line, spawn_stage, teardown_stage};

pub struct StagePlugin;

impl Plugin for StagePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StageTuning>()
            .add_systems(
                OnEnter(GameState::Run),
                (spawn_stage, spawn_player, announce_stage_start).chain(),
            )
            .add_systems(OnExit(GameState::Run), teardown_stage)
            .add_systems(
                FixedUpdate,
                detect_finish_line.in_set(RunnerSet::Evaluate),
            );
    }
}
