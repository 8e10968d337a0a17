//! Player domain: read-only status queries for presentation systems.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::detection::GroundSensor;
use crate::gravity::GravityIntegrator;
use crate::player::components::Player;
use crate::player::state::{PlayerState, PlayerStateMachine};
use crate::respawn::RespawnCoordinator;

#[derive(SystemParam)]
pub struct PlayerStatus<'w, 's> {
    players: Query<
        'w,
        's,
        (
            &'static GroundSensor,
            &'static GravityIntegrator,
            &'static PlayerStateMachine,
        ),
        With<Player>,
    >,
    coordinator: Res<'w, RespawnCoordinator>,
}

impl PlayerStatus<'_, '_> {
    pub fn is_grounded(&self) -> bool {
        self.players
            .single()
            .is_ok_and(|(sensor, _, _)| sensor.is_grounded())
    }

    pub fn is_on_slope(&self) -> bool {
        self.players
            .single()
            .is_ok_and(|(sensor, _, _)| sensor.is_on_slope())
    }

    pub fn current_gravity(&self) -> Option<Vec2> {
        self.players
            .single()
            .ok()
            .map(|(_, integrator, _)| integrator.current_gravity())
    }

    pub fn current_state(&self) -> Option<PlayerState> {
        self.players
            .single()
            .ok()
            .map(|(_, _, machine)| machine.current_state())
    }

    pub fn is_respawn_handled(&self) -> bool {
        self.coordinator.is_respawn_handled()
    }
}
