//! Respawn domain: validating and searching for a safe spawn position.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::gravity::GravityDirection;
use crate::respawn::resources::RespawnTuning;
use crate::terrain::{LayerFilter, TerrainQuery};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    NoCheckpoint,
    NoSafeCandidate,
}

/// Where the player ends up and how the position was chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnResolution {
    Exact(Vec2),
    /// A ring candidate near an unsafe checkpoint
    Offset { position: Vec2, checkpoint: Vec2 },
    DefaultSpawn { position: Vec2, reason: FallbackReason },
}

impl SpawnResolution {
    pub fn position(&self) -> Vec2 {
        match *self {
            SpawnResolution::Exact(position)
            | SpawnResolution::Offset { position, .. }
            | SpawnResolution::DefaultSpawn { position, .. } => position,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SpawnResolution::DefaultSpawn { .. })
    }
}

/// Solid ground below (relative to `gravity`) within reach, not embedded,
/// and nothing hazardous nearby.
pub fn is_safe_position<T: TerrainQuery + ?Sized>(
    terrain: &T,
    position: Vec2,
    gravity: GravityDirection,
    tuning: &RespawnTuning,
) -> bool {
    if !position.is_finite() || !terrain.is_available() {
        return false;
    }

    let ground = terrain.raycast(
        position,
        gravity.down_vector(),
        tuning.safety_ground_distance,
        LayerFilter::Ground,
    );
    let supported = ground.is_some_and(|hit| hit.distance >= tuning.min_ground_clearance);

    supported && !terrain.overlaps_hazard(position, tuning.hazard_clearance)
}

/// Candidate offsets around `center`, nearest ring first.
pub fn ring_candidates(center: Vec2, tuning: &RespawnTuning) -> impl Iterator<Item = Vec2> + '_ {
    let samples = tuning.ring_samples.max(1);
    (1..=tuning.ring_count).flat_map(move |ring| {
        let radius = tuning.ring_spacing * ring as f32;
        (0..samples).map(move |i| {
            let angle = TAU * i as f32 / samples as f32;
            center + Vec2::from_angle(angle) * radius
        })
    })
}

/// Resolve the respawn position. Always returns a position: the default
/// spawn is the terminal fallback.
pub fn find_safe_position<T: TerrainQuery + ?Sized>(
    terrain: &T,
    checkpoint: Option<Vec2>,
    gravity: GravityDirection,
    default_spawn: Vec2,
    tuning: &RespawnTuning,
) -> SpawnResolution {
    let Some(checkpoint) = checkpoint else {
        return SpawnResolution::DefaultSpawn {
            position: default_spawn,
            reason: FallbackReason::NoCheckpoint,
        };
    };

    if is_safe_position(terrain, checkpoint, gravity, tuning) {
        return SpawnResolution::Exact(checkpoint);
    }

    ring_candidates(checkpoint, tuning)
        .find(|candidate| is_safe_position(terrain, *candidate, gravity, tuning))
        .map(|position| SpawnResolution::Offset {
            position,
            checkpoint,
        })
        .unwrap_or(SpawnResolution::DefaultSpawn {
            position: default_spawn,
            reason: FallbackReason::NoSafeCandidate,
        })
}
