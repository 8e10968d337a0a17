//! Detection domain: change detection between consecutive snapshots.

use bevy::prelude::*;

use crate::detection::ground::GroundInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundTransition {
    Landed,
    LeftGround,
    SlopeChanged(bool),
    EdgeChanged(bool),
}

/// Discrete changes between two snapshots, in a stable order.
pub fn diff_ground(previous: &GroundInfo, current: &GroundInfo) -> Vec<GroundTransition> {
    let mut transitions = Vec::new();

    match (previous.is_grounded, current.is_grounded) {
        (false, true) => transitions.push(GroundTransition::Landed),
        (true, false) => transitions.push(GroundTransition::LeftGround),
        _ => {}
    }
    if previous.is_on_slope != current.is_on_slope {
        transitions.push(GroundTransition::SlopeChanged(current.is_on_slope));
    }
    if previous.near_edge() != current.near_edge() {
        transitions.push(GroundTransition::EdgeChanged(current.near_edge()));
    }

    transitions
}

/// Latest detection snapshot plus the one before it.
#[derive(Component, Debug, Default, Clone)]
pub struct GroundSensor {
    current: GroundInfo,
    previous: GroundInfo,
}

impl GroundSensor {
    pub fn current(&self) -> &GroundInfo {
        &self.current
    }

    pub fn previous(&self) -> &GroundInfo {
        &self.previous
    }

    pub fn is_grounded(&self) -> bool {
        self.current.is_grounded
    }

    pub fn is_on_slope(&self) -> bool {
        self.current.is_on_slope
    }

    /// Store a new snapshot and return what changed since the last one.
    pub fn record(&mut self, info: GroundInfo) -> Vec<GroundTransition> {
        self.previous = self.current;
        self.current = info;
        diff_ground(&self.previous, &self.current)
    }

    /// Forget both snapshots (stage teardown or teleport).
    pub fn reset(&mut self, up: Vec2) {
        self.current = GroundInfo::airborne(up);
        self.previous = self.current;
    }
}
