//! Detection domain: the probe fan and the `GroundInfo` snapshot it produces.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::gravity::GravityDirection;
use crate::terrain::{LayerFilter, SurfaceRef, TerrainHit, TerrainQuery};

/// Probe layout and thresholds for ground detection.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundProbeConfig {
    /// Number of parallel probes under the footprint
    pub probe_count: u32,
    /// Spread of the probes across the player's feet
    pub footprint_width: f32,
    /// Distance from the body centre to the feet along the gravity axis
    pub half_height: f32,
    /// Probes start this far inside the body so resting contact still hits
    pub probe_skin: f32,
    /// How far below the feet a surface still counts as ground
    pub ground_check_distance: f32,
    /// Angles at or below this are treated as flat
    pub slope_min_angle_deg: f32,
    pub max_walkable_angle_deg: f32,
    /// Lateral offset of the two edge probes from the body centre
    pub edge_probe_offset: f32,
    /// Reach of the edge probes below the feet
    pub edge_check_distance: f32,
    /// Samples used to estimate how far away a detected edge is
    pub edge_probe_steps: u32,
}

impl Default for GroundProbeConfig {
    fn default() -> Self {
        Self {
            probe_count: 3,
            footprint_width: 20.0,
            half_height: 24.0,
            probe_skin: 2.0,
            ground_check_distance: 6.0,
            slope_min_angle_deg: 3.0,
            max_walkable_angle_deg: 45.0,
            edge_probe_offset: 18.0,
            edge_check_distance: 28.0,
            edge_probe_steps: 4,
        }
    }
}

impl GroundProbeConfig {
    /// Lateral offsets of the footprint probes, evenly spaced.
    pub fn probe_offsets(&self) -> Vec<f32> {
        let count = self.probe_count.max(1);
        if count == 1 {
            return vec![0.0];
        }
        let half = self.footprint_width * 0.5;
        (0..count)
            .map(|i| -half + self.footprint_width * i as f32 / (count - 1) as f32)
            .collect()
    }

    pub fn probe_reach(&self) -> f32 {
        self.probe_skin + self.ground_check_distance
    }

    /// Where the probes start for a body centred at `position`.
    pub fn foot_origin(&self, position: Vec2, gravity: GravityDirection) -> Vec2 {
        position + gravity.down_vector() * (self.half_height - self.probe_skin)
    }
}

/// Snapshot of one detection pass.
///
/// Invariants: `is_on_slope` implies `is_grounded`, `ground_angle` is in
/// `0..=90` and `slope_influence` is in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundInfo {
    pub is_grounded: bool,
    /// Average of every probe's hit normal
    pub ground_normal: Vec2,
    /// Degrees between the averaged normal and the gravity-relative up
    pub ground_angle: f32,
    pub distance_to_ground: f32,
    pub ground_point: Option<Vec2>,
    pub surface: Option<SurfaceRef>,
    pub is_on_slope: bool,
    pub can_walk_on_slope: bool,
    /// Unit tangent pointing downhill, zero on flat ground or in the air
    pub slope_direction: Vec2,
    pub slope_influence: f32,
    pub has_left_edge: bool,
    pub has_right_edge: bool,
    pub left_edge_distance: Option<f32>,
    pub right_edge_distance: Option<f32>,
    pub probe_hits: u32,
}

impl GroundInfo {
    pub fn airborne(up: Vec2) -> Self {
        Self {
            is_grounded: false,
            ground_normal: up,
            ground_angle: 0.0,
            distance_to_ground: f32::INFINITY,
            ground_point: None,
            surface: None,
            is_on_slope: false,
            can_walk_on_slope: false,
            slope_direction: Vec2::ZERO,
            slope_influence: 0.0,
            has_left_edge: false,
            has_right_edge: false,
            left_edge_distance: None,
            right_edge_distance: None,
            probe_hits: 0,
        }
    }

    pub fn near_edge(&self) -> bool {
        self.has_left_edge || self.has_right_edge
    }
}

impl Default for GroundInfo {
    fn default() -> Self {
        Self::airborne(Vec2::Y)
    }
}

/// Angle in degrees between `normal` and `up`, clamped to `0..=90`.
pub fn surface_angle_deg(normal: Vec2, up: Vec2) -> f32 {
    let cos = normal.dot(up).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees();
    if angle.is_finite() {
        angle.clamp(0.0, 90.0)
    } else {
        0.0
    }
}

/// Fire the probe fan along the gravity axis and derive ground facts.
///
/// An unavailable terrain service yields an airborne snapshot so the body
/// falls instead of freezing.
pub fn detect<T: TerrainQuery + ?Sized>(
    terrain: &T,
    position: Vec2,
    gravity: GravityDirection,
    config: &GroundProbeConfig,
) -> GroundInfo {
    let up = gravity.up_vector();
    let down = gravity.down_vector();

    if !terrain.is_available() || !position.is_finite() {
        return GroundInfo::airborne(up);
    }

    let reach = config.probe_reach();
    let foot = config.foot_origin(position, gravity);

    let mut normal_sum = Vec2::ZERO;
    let mut hits = 0;
    let mut nearest: Option<TerrainHit> = None;

    for offset in config.probe_offsets() {
        let origin = foot + Vec2::X * offset;
        let Some(hit) = terrain.raycast(origin, down, reach, LayerFilter::Ground) else {
            continue;
        };
        if hit.distance > reach || !hit.normal.is_finite() {
            continue;
        }

        normal_sum += hit.normal;
        hits += 1;
        if nearest.is_none_or(|n| hit.distance < n.distance) {
            nearest = Some(hit);
        }
    }

    let Some(nearest) = nearest else {
        return GroundInfo::airborne(up);
    };

    let ground_normal = normal_sum.try_normalize().unwrap_or(up);
    let ground_angle = surface_angle_deg(ground_normal, up);
    let is_on_slope = ground_angle > config.slope_min_angle_deg;
    let max_walkable = config.max_walkable_angle_deg.max(f32::EPSILON);

    let slope_direction = if is_on_slope {
        let tangent = ground_normal.perp();
        if tangent.dot(down) < 0.0 {
            -tangent
        } else {
            tangent
        }
    } else {
        Vec2::ZERO
    };

    let left_edge_distance = probe_edge(terrain, foot, down, -1.0, config);
    let right_edge_distance = probe_edge(terrain, foot, down, 1.0, config);

    GroundInfo {
        is_grounded: true,
        ground_normal,
        ground_angle,
        distance_to_ground: (nearest.distance - config.probe_skin).max(0.0),
        ground_point: Some(nearest.point),
        surface: Some(nearest.surface),
        is_on_slope,
        can_walk_on_slope: ground_angle <= config.max_walkable_angle_deg,
        slope_direction,
        slope_influence: (ground_angle / max_walkable).clamp(0.0, 1.0),
        has_left_edge: left_edge_distance.is_some(),
        has_right_edge: right_edge_distance.is_some(),
        left_edge_distance,
        right_edge_distance,
        probe_hits: hits,
    }
}

/// Lateral probe on one side. Returns the distance to the ledge when the
/// outer probe finds nothing below.
fn probe_edge<T: TerrainQuery + ?Sized>(
    terrain: &T,
    foot: Vec2,
    down: Vec2,
    side: f32,
    config: &GroundProbeConfig,
) -> Option<f32> {
    let reach = config.probe_skin + config.edge_check_distance;
    let misses = |offset: f32| {
        terrain
            .raycast(foot + Vec2::X * side * offset, down, reach, LayerFilter::Ground)
            .is_none()
    };

    if !misses(config.edge_probe_offset) {
        return None;
    }

    let steps = config.edge_probe_steps.max(1);
    (1..=steps)
        .map(|i| config.edge_probe_offset * i as f32 / steps as f32)
        .find(|offset| misses(*offset))
}
