//! Content domain: data-driven tuning loaded from `assets/data`.

mod data;
mod loader;
mod validation;

pub use data::{RUNNER_TUNING_SCHEMA, RunnerTuning};
pub use loader::{ContentLoadError, load_runner_tuning, parse_runner_tuning};
pub use validation::{ValidationError, validate_tuning};

use std::path::Path;

use bevy::prelude::*;

use crate::gravity::GlobalGravity;
use crate::respawn::RespawnAssist;

pub const TUNING_PATH: &str = "assets/data/runner_tuning.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_tuning);
    }
}

/// Insert every tuning section as its own resource. A missing or broken file
/// leaves the built-in defaults in place.
fn load_tuning(mut commands: Commands) {
    let tuning = match load_runner_tuning(Path::new(TUNING_PATH)) {
        Ok(tuning) => {
            info!("Loaded runner tuning from {}", TUNING_PATH);
            tuning
        }
        Err(e) => {
            warn!("{}; using default tuning", e);
            RunnerTuning::default()
        }
    };

    for error in validate_tuning(&tuning) {
        warn!("Tuning validation: {}", error);
    }

    commands.insert_resource(GlobalGravity::from_tuning(&tuning.gravity));
    commands.insert_resource(RespawnAssist {
        enabled: tuning.respawn.assist_enabled,
    });
    commands.insert_resource(tuning.probes);
    commands.insert_resource(tuning.gravity);
    commands.insert_resource(tuning.slope);
    commands.insert_resource(tuning.player);
    commands.insert_resource(tuning.respawn);
    commands.insert_resource(tuning.stage);
}
