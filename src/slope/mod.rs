//! Slope domain: speed modulation and terrain snapping from ground facts.

mod modulator;
mod systems;

pub use modulator::{
    SlopeCurve, SlopeModulator, SlopeTuning, is_downhill, snap_force, speed_multiplier,
};

use bevy::prelude::*;

use crate::core::RunnerSet;
use crate::slope::systems::{apply_slope_snap, modulate_slope_speed};

pub struct SlopePlugin;

impl Plugin for SlopePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SlopeTuning>().add_systems(
            FixedUpdate,
            (modulate_slope_speed, apply_slope_snap).in_set(RunnerSet::Modulate),
        );
    }
}
