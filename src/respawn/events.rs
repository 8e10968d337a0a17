//! Respawn domain: lifecycle events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::respawn::coordinator::{Claimant, DeathId};

#[derive(Debug)]
pub struct RespawnStartedEvent {
    pub entity: Entity,
    pub position: Vec2,
}

impl Message for RespawnStartedEvent {}

/// Fired exactly once per handled death.
#[derive(Debug)]
pub struct RespawnCompletedEvent {
    pub entity: Entity,
    pub position: Vec2,
    pub owner: Claimant,
}

impl Message for RespawnCompletedEvent {}

/// The consecutive-death threshold was reached by `death`.
#[derive(Debug)]
pub struct ConsecutiveDeathsEvent {
    pub count: u32,
    pub death: DeathId,
}

impl Message for ConsecutiveDeathsEvent {}

#[derive(Debug)]
pub struct CheckpointReachedEvent {
    pub index: u32,
    pub position: Vec2,
}

impl Message for CheckpointReachedEvent {}
