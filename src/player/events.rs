//! Player domain: state, damage and death events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::player::state::PlayerState;

#[derive(Debug)]
pub struct StateChangedEvent {
    pub entity: Entity,
    pub from: PlayerState,
    pub to: PlayerState,
}

impl Message for StateChangedEvent {}

#[derive(Debug)]
pub struct DamageEvent {
    pub entity: Entity,
    pub source: Option<Entity>,
}

impl Message for DamageEvent {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    Hazard,
    KillPlane,
}

#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
    pub position: Vec2,
    pub cause: DeathCause,
}

impl Message for DeathEvent {}
