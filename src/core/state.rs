//! Core domain: game state definitions and the fixed-tick pipeline.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    #[default]
    Boot,
    Run,
}

/// Orthogonal to [`GameState`] so pausing never re-triggers stage setup.
#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum PauseState {
    #[default]
    Running,
    Paused,
}

/// Ordering of the runner's work inside one fixed physics tick.
///
/// Detection runs before gravity integration and slope modulation, which run
/// before the velocity is committed to the body. State transitions are
/// evaluated once the committed velocity is known, and recovery (respawn)
/// runs last.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunnerSet {
    Detect,
    Integrate,
    Modulate,
    Commit,
    Evaluate,
    Recover,
}
