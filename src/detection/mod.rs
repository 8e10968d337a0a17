//! Detection domain: per-tick ground, slope and edge sensing.

mod events;
mod ground;
mod systems;
#[cfg(test)]
mod tests;
mod transitions;

pub use events::{
    EdgeDetectedEvent, GroundEventWriters, LandedEvent, LeftGroundEvent, SlopeChangedEvent,
};
pub use ground::{GroundInfo, GroundProbeConfig, detect, surface_angle_deg};
pub use transitions::{GroundSensor, GroundTransition, diff_ground};

use bevy::prelude::*;

use crate::core::RunnerSet;
use crate::detection::systems::detect_ground;

pub struct DetectionPlugin;

impl Plugin for DetectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GroundProbeConfig>()
            .add_message::<LandedEvent>()
            .add_message::<LeftGroundEvent>()
            .add_message::<SlopeChangedEvent>()
            .add_message::<EdgeDetectedEvent>()
            .add_systems(FixedUpdate, detect_ground.in_set(RunnerSet::Detect));

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, systems::draw_probe_gizmos);
    }
}
