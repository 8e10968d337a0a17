//! Stage domain: layout and bounds tests.

use bevy::prelude::*;

use super::{StagePiece, StageTuning, test_stage_layout};

#[test]
fn test_bounds_contain_spawn_and_reject_outside() {
    let stage = StageTuning::default();
    assert!(stage.contains(stage.world_spawn()));
    assert!(!stage.contains(Vec2::new(0.0, -700.0)));
    assert!(!stage.contains(Vec2::new(0.0, 700.0)));
    assert!(!stage.contains(Vec2::new(f32::NAN, 0.0)));
}

#[test]
fn test_spawn_rests_on_first_floor() {
    let stage = StageTuning::default();
    let spawn = stage.world_spawn();
    let layout = test_stage_layout();

    let supported = layout.iter().any(|piece| match piece {
        StagePiece::Solid { min, max } => {
            spawn.x >= min.x && spawn.x <= max.x && (spawn.y - 24.0 - max.y).abs() < 1e-3
        }
        _ => false,
    });
    assert!(supported);
}

#[test]
fn test_checkpoints_advance_along_the_stage() {
    let checkpoints: Vec<(u32, f32)> = test_stage_layout()
        .iter()
        .filter_map(|piece| match piece {
            StagePiece::Checkpoint { index, x } => Some((*index, *x)),
            _ => None,
        })
        .collect();

    assert_eq!(checkpoints.len(), 3);
    assert!(checkpoints.windows(2).all(|w| w[0].0 < w[1].0 && w[0].1 < w[1].1));
    // Index 0 is reserved for the spawn record
    assert!(checkpoints.iter().all(|(index, _)| *index > 0));
}

#[test]
fn test_layout_has_walkable_and_steep_ramps() {
    let angles: Vec<f32> = test_stage_layout()
        .iter()
        .filter_map(|piece| match piece {
            StagePiece::Ramp { angle_deg, .. } => Some(*angle_deg),
            _ => None,
        })
        .collect();
    assert!(angles.contains(&30.0));
    assert!(angles.contains(&60.0));
}

#[test]
fn test_everything_inside_bounds() {
    let stage = StageTuning::default();
    for piece in test_stage_layout() {
        let point = match piece {
            StagePiece::Solid { min, max } | StagePiece::Spikes { min, max } => (min + max) * 0.5,
            StagePiece::Ramp {
                start,
                angle_deg,
                length,
            } => StagePiece::ramp_end(start, angle_deg, length),
            StagePiece::Zone { center, .. } => center,
            StagePiece::Checkpoint { x, .. } | StagePiece::Finish { x } => Vec2::new(x, 0.0),
        };
        assert!(stage.contains(point), "{piece:?} outside bounds");
    }
}

#[test]
fn test_ramp_end_geometry() {
    let end = StagePiece::ramp_end(Vec2::ZERO, 30.0, 240.0);
    assert!((end.y - 120.0).abs() < 1e-3);
    assert!((end.x - 207.846).abs() < 1e-2);
}
