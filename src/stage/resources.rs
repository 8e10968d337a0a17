//! Stage domain: spawn point, bounds and stage markers.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageTuning {
    /// World-defined default spawn, also the terminal respawn fallback
    pub world_spawn: [f32; 2],
    /// Kill plane: leaving this box is fatal
    pub bounds_min: [f32; 2],
    pub bounds_max: [f32; 2],
}

impl Default for StageTuning {
    fn default() -> Self {
        Self {
            world_spawn: [-300.0, -176.0],
            bounds_min: [-800.0, -600.0],
            bounds_max: [5200.0, 600.0],
        }
    }
}

impl StageTuning {
    pub fn world_spawn(&self) -> Vec2 {
        Vec2::from(self.world_spawn)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let min = Vec2::from(self.bounds_min);
        let max = Vec2::from(self.bounds_max);
        point.is_finite() && point.cmpge(min).all() && point.cmple(max).all()
    }
}

/// Everything despawned when the stage is torn down.
#[derive(Component, Debug)]
pub struct StageEntity;

#[derive(Component, Debug, Default)]
pub struct FinishLine {
    pub crossed: bool,
}
