//! Core domain: run flow states, fixed-tick ordering and shared timers.

mod events;
mod resources;
mod state;
mod systems;
#[cfg(test)]
mod tests;
mod timer;

pub use events::{StageCompletedEvent, StageStartedEvent};
pub use resources::{StageClock, gameplay_active};
pub use state::{GameState, PauseState, RunnerSet};
pub use timer::Countdown;

use bevy::prelude::*;

use crate::core::systems::{
    advance_from_boot, handle_stage_completed, pause_virtual_time, resume_virtual_time,
    setup_camera, tick_stage_clock, toggle_pause,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_state::<PauseState>()
            .init_resource::<StageClock>()
            .add_message::<StageStartedEvent>()
            .add_message::<StageCompletedEvent>()
            .configure_sets(
                FixedUpdate,
                (
                    RunnerSet::Detect,
                    RunnerSet::Integrate,
                    RunnerSet::Modulate,
                    RunnerSet::Commit,
                    RunnerSet::Evaluate,
                    RunnerSet::Recover,
                )
                    .chain()
                    .run_if(gameplay_active),
            )
            .add_systems(Startup, setup_camera)
            .add_systems(FixedUpdate, tick_stage_clock.in_set(RunnerSet::Detect))
            .add_systems(
                Update,
                (
                    advance_from_boot.run_if(in_state(GameState::Boot)),
                    toggle_pause.run_if(in_state(GameState::Run)),
                    handle_stage_completed.run_if(in_state(GameState::Run)),
                ),
            )
            .add_systems(OnEnter(PauseState::Paused), pause_virtual_time)
            .add_systems(OnExit(PauseState::Paused), resume_virtual_time);
    }
}
