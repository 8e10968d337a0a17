//! Gravity domain: flip, anomaly and global-change events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::gravity::integrator::AnomalyKind;
use crate::gravity::types::GravityDirection;

#[derive(Debug)]
pub struct GravityFlipEvent {
    pub entity: Entity,
    pub direction: GravityDirection,
}

impl Message for GravityFlipEvent {}

/// A gravity or velocity value failed validation and was substituted.
#[derive(Debug)]
pub struct GravityAnomalyEvent {
    pub entity: Entity,
    pub kind: AnomalyKind,
    pub observed: Vec2,
    pub substituted: Vec2,
}

impl Message for GravityAnomalyEvent {}

/// The world-wide gravity signal changed.
#[derive(Debug)]
pub struct GlobalGravityChanged {
    pub direction: Vec2,
    pub strength: f32,
}

impl Message for GlobalGravityChanged {}
