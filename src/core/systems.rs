//! Core domain: run flow systems and setup.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::events::StageCompletedEvent;
use crate::core::resources::StageClock;
use crate::core::state::{GameState, PauseState};

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Content is loaded synchronously at startup, so boot only lasts one frame.
pub(crate) fn advance_from_boot(mut game_state: ResMut<NextState<GameState>>) {
    game_state.set(GameState::Run);
}

pub(crate) fn tick_stage_clock(time: Res<Time>, mut clock: ResMut<StageClock>) {
    clock.advance(time.delta_secs());
}

/// The single pause signal.
pub(crate) fn toggle_pause(
    keyboard: Res<ButtonInput<KeyCode>>,
    pause: Res<State<PauseState>>,
    mut next_pause: ResMut<NextState<PauseState>>,
) {
    if !(keyboard.just_pressed(KeyCode::Escape) || keyboard.just_pressed(KeyCode::KeyP)) {
        return;
    }

    let next = match pause.get() {
        PauseState::Running => PauseState::Paused,
        PauseState::Paused => PauseState::Running,
    };
    debug!("Pause toggled: {:?} -> {:?}", pause.get(), next);
    next_pause.set(next);
}

pub(crate) fn pause_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

pub(crate) fn resume_virtual_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

/// Finishing the stage restarts it by passing back through boot.
pub(crate) fn handle_stage_completed(
    mut events: MessageReader<StageCompletedEvent>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    for event in events.read() {
        info!(
            "Stage completed in {:.1}s with {} deaths, restarting",
            event.elapsed_secs, event.deaths
        );
        game_state.set(GameState::Boot);
    }
}
