//! Content domain: the runner tuning file layout.

use serde::{Deserialize, Serialize};

use crate::detection::GroundProbeConfig;
use crate::gravity::GravityTuning;
use crate::player::PlayerTuning;
use crate::respawn::RespawnTuning;
use crate::slope::SlopeTuning;
use crate::stage::StageTuning;

pub const RUNNER_TUNING_SCHEMA: u32 = 1;

/// Every tunable, one section per domain. Missing sections and fields fall
/// back to the domain defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RunnerTuning {
    pub schema_version: u32,
    pub probes: GroundProbeConfig,
    pub gravity: GravityTuning,
    pub slope: SlopeTuning,
    pub player: PlayerTuning,
    pub respawn: RespawnTuning,
    pub stage: StageTuning,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            schema_version: RUNNER_TUNING_SCHEMA,
            probes: GroundProbeConfig::default(),
            gravity: GravityTuning::default(),
            slope: SlopeTuning::default(),
            player: PlayerTuning::default(),
            respawn: RespawnTuning::default(),
            stage: StageTuning::default(),
        }
    }
}
