//! Stage domain: spawning, start announcement, finish line and teardown.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::{StageClock, StageCompletedEvent, StageStartedEvent};
use crate::gravity::{GravityDirection, ZoneStack};
use crate::player::Player;
use crate::respawn::{CheckpointStore, RespawnCoordinator};
use crate::stage::layout::{spawn_piece, test_stage_layout};
use crate::stage::resources::{FinishLine, StageEntity, StageTuning};

pub(crate) fn spawn_stage(mut commands: Commands) {
    let layout = test_stage_layout();
    for piece in &layout {
        spawn_piece(&mut commands, piece);
    }
    info!("Stage spawned with {} pieces", layout.len());
}

pub(crate) fn announce_stage_start(
    stage: Res<StageTuning>,
    mut clock: ResMut<StageClock>,
    mut started: MessageWriter<StageStartedEvent>,
) {
    let stage_run = clock.begin_stage();
    info!("Stage run {} started", stage_run);
    started.write(StageStartedEvent {
        stage_run,
        spawn_position: stage.world_spawn(),
        gravity: GravityDirection::Down,
    });
}

pub(crate) fn detect_finish_line(
    mut collisions: MessageReader<CollisionStart>,
    clock: Res<StageClock>,
    mut finish_lines: Query<&mut FinishLine>,
    players: Query<(), With<Player>>,
    mut completed: MessageWriter<StageCompletedEvent>,
) {
    for event in collisions.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (finish_entity, player_entity) in pairs {
            if !players.contains(player_entity) {
                continue;
            }
            let Ok(mut finish) = finish_lines.get_mut(finish_entity) else {
                continue;
            };
            if finish.crossed {
                continue;
            }

            finish.crossed = true;
            completed.write(StageCompletedEvent {
                elapsed_secs: clock.elapsed_secs,
                deaths: clock.deaths,
            });
        }
    }
}

/// Explicit teardown in a fixed order: respawn ownership, checkpoints,
/// player zone stacks, then the stage entities themselves.
pub(crate) fn teardown_stage(
    mut commands: Commands,
    mut coordinator: ResMut<RespawnCoordinator>,
    mut store: ResMut<CheckpointStore>,
    mut zone_stacks: Query<&mut ZoneStack, With<Player>>,
    stage_entities: Query<Entity, With<StageEntity>>,
) {
    coordinator.reset();
    store.reset();
    for mut stack in &mut zone_stacks {
        stack.reset();
    }

    let mut despawned = 0;
    for entity in &stage_entities {
        commands.entity(entity).despawn();
        despawned += 1;
    }
    info!("Stage torn down, {} entities despawned", despawned);
}
