//! Core domain: events for stage flow.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::gravity::GravityDirection;

/// Fired once per stage (re)start, after the stage and player are spawned.
#[derive(Debug)]
pub struct StageStartedEvent {
    pub stage_run: u32,
    pub spawn_position: Vec2,
    pub gravity: GravityDirection,
}

impl Message for StageStartedEvent {}

/// Fired when the player crosses the finish line.
#[derive(Debug)]
pub struct StageCompletedEvent {
    pub elapsed_secs: f32,
    pub deaths: u32,
}

impl Message for StageCompletedEvent {}
