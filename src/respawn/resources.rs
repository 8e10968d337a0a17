//! Respawn domain: tuning and the assist toggle.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnTuning {
    /// Time a primary handler has to claim a death before the fallback does
    pub grace_window: f32,
    /// Delay between death and repositioning
    pub base_delay: f32,
    /// Delay used once the consecutive-death threshold is reached
    pub escalated_delay: f32,
    /// Time a claimant has to submit a destination before the default is used
    pub handover_timeout: f32,
    /// Rolling window for consecutive-death tracking
    pub streak_window: f32,
    pub streak_threshold: u32,
    /// Solid ground must be within this distance below a spawn candidate
    pub safety_ground_distance: f32,
    /// Candidates closer than this to the ground are treated as embedded
    pub min_ground_clearance: f32,
    /// Radius kept clear of hazards around a spawn candidate
    pub hazard_clearance: f32,
    pub ring_count: u32,
    pub ring_spacing: f32,
    pub ring_samples: u32,
    /// Whether the assist handler may claim after a death streak
    pub assist_enabled: bool,
}

impl Default for RespawnTuning {
    fn default() -> Self {
        Self {
            grace_window: 0.1,
            base_delay: 0.6,
            escalated_delay: 1.5,
            handover_timeout: 0.5,
            streak_window: 10.0,
            streak_threshold: 5,
            safety_ground_distance: 120.0,
            min_ground_clearance: 16.0,
            hazard_clearance: 20.0,
            ring_count: 3,
            ring_spacing: 32.0,
            ring_samples: 8,
            assist_enabled: true,
        }
    }
}

/// Runtime switch for the assist recovery handler, seeded from tuning.
#[derive(Resource, Debug, Clone)]
pub struct RespawnAssist {
    pub enabled: bool,
}

impl Default for RespawnAssist {
    fn default() -> Self {
        Self {
            enabled: RespawnTuning::default().assist_enabled,
        }
    }
}
