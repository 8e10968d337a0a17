//! Player domain: the runner entity, its state machine and status queries.

mod bootstrap;
mod components;
mod events;
mod resources;
mod state;
mod status;
mod systems;

pub use components::{Lives, LivesSource, Player, RunSpeed};
pub use events::{DamageEvent, DeathCause, DeathEvent, StateChangedEvent};
pub use resources::{FlipInput, PlayerTuning};
pub use state::{DamageOutcome, FlipRejected, PlayerState, PlayerStateMachine, StateChange};
pub use status::PlayerStatus;

pub(crate) use bootstrap::spawn_player;

use bevy::prelude::*;

use crate::core::{RunnerSet, gameplay_active};
use crate::player::systems::{
    apply_damage, apply_run_speed, camera_follow, check_kill_plane, detect_hazard_contacts,
    evaluate_player_state, handle_flip_requests, read_flip_input, tick_player_timers,
    update_player_visuals,
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerTuning>()
            .init_resource::<FlipInput>()
            .add_message::<StateChangedEvent>()
            .add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_systems(Update, read_flip_input.run_if(gameplay_active))
            .add_systems(FixedUpdate, tick_player_timers.in_set(RunnerSet::Detect))
            .add_systems(
                FixedUpdate,
                handle_flip_requests
                    .in_set(RunnerSet::Integrate)
                    .before(crate::gravity::integrate_gravity),
            )
            .add_systems(
                FixedUpdate,
                apply_run_speed
                    .in_set(RunnerSet::Commit)
                    .before(crate::gravity::apply_gravity_to_bodies),
            )
            .add_systems(
                FixedUpdate,
                (
                    detect_hazard_contacts,
                    apply_damage,
                    check_kill_plane,
                    evaluate_player_state,
                )
                    .chain()
                    .in_set(RunnerSet::Evaluate),
            )
            .add_systems(Update, (update_player_visuals, camera_follow));

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, systems::draw_gravity_gizmo);
    }
}
