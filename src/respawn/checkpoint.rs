//! Respawn domain: checkpoint records and their history stack.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::gravity::GravityDirection;

/// A recorded safe position and gravity state to resume from.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointRecord {
    pub position: Vec2,
    pub gravity_direction: GravityDirection,
    /// Stage time at which the record was made
    pub timestamp: f32,
    pub stage_progress_index: u32,
    /// Free-form data carried with the record (elapsed time, deaths, ...)
    pub auxiliary: HashMap<String, serde_json::Value>,
}

impl CheckpointRecord {
    pub fn new(position: Vec2, gravity_direction: GravityDirection) -> Self {
        Self {
            position,
            gravity_direction,
            timestamp: 0.0,
            stage_progress_index: 0,
            auxiliary: HashMap::new(),
        }
    }

    pub fn with_aux(&mut self, key: &str, value: impl Into<serde_json::Value>) -> &mut Self {
        self.auxiliary.insert(key.to_string(), value.into());
        self
    }

    pub fn aux_f64(&self, key: &str) -> Option<f64> {
        self.auxiliary.get(key).and_then(serde_json::Value::as_f64)
    }
}

/// Checkpoint storage as seen by recovery code.
pub trait CheckpointStorage {
    fn current(&self) -> Option<&CheckpointRecord>;

    /// Push a new current record and return it for further annotation.
    fn set(&mut self, position: Vec2, gravity_direction: GravityDirection)
    -> &mut CheckpointRecord;

    /// Oldest first; the last entry is the current record.
    fn history(&self) -> &[CheckpointRecord];
}

/// The single authority over checkpoint records for the running stage.
#[derive(Resource, Debug, Default)]
pub struct CheckpointStore {
    records: Vec<CheckpointRecord>,
}

impl CheckpointStore {
    /// Drop the current record and fall back to the one before it. The
    /// oldest record is never removed this way.
    pub fn revert(&mut self) -> Option<CheckpointRecord> {
        if self.records.len() < 2 {
            return None;
        }
        self.records.pop()
    }

    pub fn previous(&self) -> Option<&CheckpointRecord> {
        self.records.iter().rev().nth(1)
    }

    pub fn reset(&mut self) {
        self.records.clear();
    }
}

impl CheckpointStorage for CheckpointStore {
    fn current(&self) -> Option<&CheckpointRecord> {
        self.records.last()
    }

    fn set(
        &mut self,
        position: Vec2,
        gravity_direction: GravityDirection,
    ) -> &mut CheckpointRecord {
        let mut record = CheckpointRecord::new(position, gravity_direction);
        record.stage_progress_index = self
            .current()
            .map_or(0, |current| current.stage_progress_index + 1);
        self.records.push(record);
        let last = self.records.len() - 1;
        &mut self.records[last]
    }

    fn history(&self) -> &[CheckpointRecord] {
        &self.records
    }
}

/// A checkpoint trigger placed in the stage.
#[derive(Component, Debug, Clone, Copy)]
pub struct Checkpoint {
    /// Position along the stage; triggers at or behind the current record
    /// are ignored
    pub index: u32,
}
