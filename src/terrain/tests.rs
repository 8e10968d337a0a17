//! Terrain domain: tests for the segment terrain used across the suite.

use bevy::prelude::*;

use super::testing::SegmentTerrain;
use super::{LayerFilter, SurfaceMaterial, TerrainQuery};

#[test]
fn test_ray_hits_floor_with_upward_normal() {
    let terrain = SegmentTerrain::new().with_floor(0.0, -100.0, 100.0);
    let hit = terrain
        .raycast(Vec2::new(0.0, 10.0), Vec2::NEG_Y, 50.0, LayerFilter::Ground)
        .expect("floor below");

    assert!((hit.distance - 10.0).abs() < 1e-4);
    assert!((hit.normal - Vec2::Y).length() < 1e-4);
    assert!((hit.point - Vec2::ZERO).length() < 1e-4);
}

#[test]
fn test_ray_respects_max_distance() {
    let terrain = SegmentTerrain::new().with_floor(0.0, -100.0, 100.0);
    assert!(
        terrain
            .raycast(Vec2::new(0.0, 10.0), Vec2::NEG_Y, 5.0, LayerFilter::Ground)
            .is_none()
    );
}

#[test]
fn test_ceiling_normal_faces_ray_origin() {
    let terrain = SegmentTerrain::new().with_floor(50.0, -100.0, 100.0);
    let hit = terrain
        .raycast(Vec2::ZERO, Vec2::Y, 100.0, LayerFilter::Ground)
        .expect("ceiling above");
    assert!((hit.normal - Vec2::NEG_Y).length() < 1e-4);
}

#[test]
fn test_nearest_segment_wins() {
    let terrain = SegmentTerrain::new()
        .with_floor(-20.0, -10.0, 10.0)
        .with_floor(-5.0, -10.0, 10.0);
    let hit = terrain
        .raycast(Vec2::ZERO, Vec2::NEG_Y, 100.0, LayerFilter::Ground)
        .expect("hit");
    assert!((hit.distance - 5.0).abs() < 1e-4);
}

#[test]
fn test_material_is_reported() {
    let ice = SurfaceMaterial {
        friction: 0.05,
        bounciness: 0.0,
    };
    let terrain = SegmentTerrain::new().with_material_segment(
        Vec2::new(-10.0, 0.0),
        Vec2::new(10.0, 0.0),
        ice,
    );
    let hit = terrain
        .raycast(Vec2::new(0.0, 1.0), Vec2::NEG_Y, 5.0, LayerFilter::Ground)
        .expect("hit");
    assert_eq!(hit.surface.material, ice);
}

#[test]
fn test_unavailable_terrain_never_hits() {
    let terrain = SegmentTerrain::new()
        .with_floor(0.0, -100.0, 100.0)
        .with_hazard(Vec2::ZERO, 10.0)
        .unavailable();
    assert!(!terrain.is_available());
    assert!(
        terrain
            .raycast(Vec2::new(0.0, 1.0), Vec2::NEG_Y, 5.0, LayerFilter::Ground)
            .is_none()
    );
    assert!(!terrain.overlaps_hazard(Vec2::ZERO, 1.0));
}

#[test]
fn test_hazard_overlap_uses_clearance_radius() {
    let terrain = SegmentTerrain::new().with_hazard(Vec2::new(30.0, 0.0), 10.0);
    assert!(!terrain.overlaps_hazard(Vec2::ZERO, 5.0));
    assert!(terrain.overlaps_hazard(Vec2::ZERO, 25.0));
}
