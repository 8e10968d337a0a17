//! Core domain: shared resources for the stage run.

use bevy::prelude::*;

use crate::core::state::{GameState, PauseState};

/// Run condition: true only while a stage is running and not paused.
pub fn gameplay_active(game: Res<State<GameState>>, pause: Res<State<PauseState>>) -> bool {
    *game.get() == GameState::Run && *pause.get() == PauseState::Running
}

/// Simulation-time bookkeeping for the current stage attempt.
#[derive(Resource, Debug, Default)]
pub struct StageClock {
    /// Number of stage starts since boot (1 for the first run)
    pub stage_run: u32,
    /// Seconds of simulated (unpaused) time since the stage started
    pub elapsed_secs: f32,
    /// Deaths in this stage attempt
    pub deaths: u32,
}

impl StageClock {
    /// Start a new attempt, keeping the run counter.
    pub fn begin_stage(&mut self) -> u32 {
        self.stage_run += 1;
        self.elapsed_secs = 0.0;
        self.deaths = 0;
        self.stage_run
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed_secs += dt;
    }

    pub fn record_death(&mut self) {
        self.deaths += 1;
    }
}
