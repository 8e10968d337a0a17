//! Detection domain: probe fan, slope classification and transition tests.

use bevy::prelude::*;

use super::{GroundInfo, GroundProbeConfig, GroundSensor, GroundTransition, detect, surface_angle_deg};
use crate::gravity::GravityDirection;
use crate::terrain::testing::SegmentTerrain;

/// Body centre resting on a floor at y = 0 with the default half height.
const STANDING: Vec2 = Vec2::new(0.0, 24.0);

fn config() -> GroundProbeConfig {
    GroundProbeConfig::default()
}

#[test]
fn test_probe_offsets_span_footprint() {
    let offsets = config().probe_offsets();
    assert_eq!(offsets, vec![-10.0, 0.0, 10.0]);

    let single = GroundProbeConfig {
        probe_count: 1,
        ..config()
    };
    assert_eq!(single.probe_offsets(), vec![0.0]);
}

#[test]
fn test_flat_floor_is_grounded_and_not_slope() {
    let terrain = SegmentTerrain::new().with_floor(0.0, -200.0, 200.0);
    let info = detect(&terrain, STANDING, GravityDirection::Down, &config());

    assert!(info.is_grounded);
    assert!(!info.is_on_slope);
    assert!(info.can_walk_on_slope);
    assert!(info.ground_angle.abs() < 1e-3);
    assert_eq!(info.slope_direction, Vec2::ZERO);
    assert_eq!(info.probe_hits, 3);
    assert!(info.distance_to_ground.abs() < 1e-3);
    assert!(!info.near_edge());
}

#[test]
fn test_airborne_when_nothing_below() {
    let terrain = SegmentTerrain::new().with_floor(0.0, -200.0, 200.0);
    let info = detect(&terrain, Vec2::new(0.0, 200.0), GravityDirection::Down, &config());

    assert!(!info.is_grounded);
    assert!(!info.is_on_slope);
    assert_eq!(info.ground_normal, Vec2::Y);
    assert!(info.ground_point.is_none());
}

#[test]
fn test_unavailable_terrain_reports_airborne() {
    let terrain = SegmentTerrain::new()
        .with_floor(0.0, -200.0, 200.0)
        .unavailable();
    let info = detect(&terrain, STANDING, GravityDirection::Down, &config());
    assert!(!info.is_grounded);
}

#[test]
fn test_inverted_gravity_detects_ceiling() {
    let terrain = SegmentTerrain::new().with_floor(100.0, -200.0, 200.0);
    let info = detect(&terrain, Vec2::new(0.0, 76.0), GravityDirection::Up, &config());

    assert!(info.is_grounded);
    assert!(info.ground_angle.abs() < 1e-3);
    assert!((info.ground_normal - Vec2::NEG_Y).length() < 1e-4);
}

#[test]
fn test_walkable_ramp_classification() {
    let terrain = SegmentTerrain::new().with_ramp(Vec2::ZERO, 30.0, 200.0);
    let info = detect(&terrain, STANDING, GravityDirection::Down, &config());

    assert!(info.is_grounded);
    assert!(info.is_on_slope);
    assert!(info.can_walk_on_slope);
    assert!((info.ground_angle - 30.0).abs() < 0.1);
    assert!((info.slope_influence - 30.0 / 45.0).abs() < 1e-3);
    // The ramp rises towards +X so downhill points left and down
    assert!(info.slope_direction.x < 0.0);
    assert!(info.slope_direction.y < 0.0);
    assert!((info.slope_direction.length() - 1.0).abs() < 1e-4);
}

#[test]
fn test_steep_ramp_is_not_walkable() {
    let terrain = SegmentTerrain::new().with_ramp(Vec2::ZERO, 60.0, 200.0);
    let info = detect(&terrain, STANDING, GravityDirection::Down, &config());

    assert!(info.is_grounded);
    assert!(info.is_on_slope);
    assert!(!info.can_walk_on_slope);
    assert_eq!(info.slope_influence, 1.0);
}

#[test]
fn test_shallow_incline_below_min_angle_is_flat() {
    let terrain = SegmentTerrain::new().with_ramp(Vec2::ZERO, 2.0, 200.0);
    let info = detect(&terrain, STANDING, GravityDirection::Down, &config());

    assert!(info.is_grounded);
    assert!(!info.is_on_slope);
    assert_eq!(info.slope_direction, Vec2::ZERO);
}

#[test]
fn test_right_edge_detected_with_distance() {
    let terrain = SegmentTerrain::new().with_floor(0.0, -200.0, 10.0);
    let info = detect(&terrain, STANDING, GravityDirection::Down, &config());

    assert!(info.is_grounded);
    assert!(info.has_right_edge);
    assert!(!info.has_left_edge);
    assert_eq!(info.right_edge_distance, Some(13.5));
    assert_eq!(info.left_edge_distance, None);
}

#[test]
fn test_surface_angle_is_clamped() {
    assert!(surface_angle_deg(Vec2::Y, Vec2::Y).abs() < 1e-4);
    assert!((surface_angle_deg(Vec2::X, Vec2::Y) - 90.0).abs() < 1e-3);
    assert_eq!(surface_angle_deg(Vec2::NEG_Y, Vec2::Y), 90.0);
}

#[test]
fn test_sensor_reports_transitions_once() {
    let terrain = SegmentTerrain::new()
        .with_floor(0.0, -400.0, 0.0)
        .with_ramp(Vec2::new(200.0, 0.0), 30.0, 100.0);
    let cfg = config();
    let mut sensor = GroundSensor::default();

    let landed = sensor.record(detect(&terrain, Vec2::new(-200.0, 24.0), GravityDirection::Down, &cfg));
    assert_eq!(landed, vec![GroundTransition::Landed]);

    let steady = sensor.record(detect(&terrain, Vec2::new(-200.0, 24.0), GravityDirection::Down, &cfg));
    assert!(steady.is_empty());

    let on_ramp = sensor.record(detect(&terrain, Vec2::new(200.0, 24.0), GravityDirection::Down, &cfg));
    assert!(on_ramp.contains(&GroundTransition::SlopeChanged(true)));
    assert!(sensor.is_on_slope());

    let left = sensor.record(GroundInfo::airborne(Vec2::Y));
    assert!(left.contains(&GroundTransition::LeftGround));
    assert!(left.contains(&GroundTransition::SlopeChanged(false)));
    assert!(sensor.previous().is_grounded);
}

#[test]
fn test_edge_transition_emitted_on_change() {
    let terrain = SegmentTerrain::new().with_floor(0.0, -200.0, 10.0);
    let cfg = config();
    let mut sensor = GroundSensor::default();

    sensor.record(detect(&terrain, Vec2::new(-100.0, 24.0), GravityDirection::Down, &cfg));
    let near = sensor.record(detect(&terrain, STANDING, GravityDirection::Down, &cfg));
    assert_eq!(near, vec![GroundTransition::EdgeChanged(true)]);

    sensor.reset(Vec2::Y);
    assert!(!sensor.is_grounded());
}
