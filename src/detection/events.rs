//! Detection domain: transition events, emitted only when something changes.

use bevy::ecs::message::{Message, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::detection::transitions::GroundTransition;

#[derive(Debug)]
pub struct LandedEvent {
    pub entity: Entity,
}

impl Message for LandedEvent {}

#[derive(Debug)]
pub struct LeftGroundEvent {
    pub entity: Entity,
}

impl Message for LeftGroundEvent {}

#[derive(Debug)]
pub struct SlopeChangedEvent {
    pub entity: Entity,
    pub on_slope: bool,
}

impl Message for SlopeChangedEvent {}

#[derive(Debug)]
pub struct EdgeDetectedEvent {
    pub entity: Entity,
    pub near_edge: bool,
}

impl Message for EdgeDetectedEvent {}

/// Writers for every ground transition, shared by scheduled detection and
/// the forced pass after a respawn.
#[derive(SystemParam)]
pub struct GroundEventWriters<'w> {
    landed: MessageWriter<'w, LandedEvent>,
    left_ground: MessageWriter<'w, LeftGroundEvent>,
    slope_changed: MessageWriter<'w, SlopeChangedEvent>,
    edge_detected: MessageWriter<'w, EdgeDetectedEvent>,
}

impl GroundEventWriters<'_> {
    pub fn emit(&mut self, entity: Entity, transitions: &[GroundTransition]) {
        for transition in transitions {
            match *transition {
                GroundTransition::Landed => {
                    self.landed.write(LandedEvent { entity });
                }
                GroundTransition::LeftGround => {
                    self.left_ground.write(LeftGroundEvent { entity });
                }
                GroundTransition::SlopeChanged(on_slope) => {
                    self.slope_changed
                        .write(SlopeChangedEvent { entity, on_slope });
                }
                GroundTransition::EdgeChanged(near_edge) => {
                    self.edge_detected
                        .write(EdgeDetectedEvent { entity, near_edge });
                }
            }
        }
    }
}
