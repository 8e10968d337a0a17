mod content;
mod core;
mod detection;
mod gravity;
mod player;
mod respawn;
mod slope;
mod stage;
mod terrain;

use avian2d::prelude::*;
use bevy::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Gravity Runner".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            gravity::GravityPlugin,
            detection::DetectionPlugin,
            slope::SlopePlugin,
            player::PlayerPlugin,
            respawn::RespawnPlugin,
            stage::StagePlugin,
        ))
        .run();
}
