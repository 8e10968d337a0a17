//! Terrain domain: a line-segment world used by unit tests.

use bevy::prelude::*;

use crate::terrain::query::{LayerFilter, SurfaceMaterial, SurfaceRef, TerrainHit, TerrainQuery};

#[derive(Debug, Clone)]
struct Segment {
    a: Vec2,
    b: Vec2,
    material: SurfaceMaterial,
}

/// Static terrain made of solid line segments and circular hazards.
#[derive(Debug, Clone)]
pub struct SegmentTerrain {
    segments: Vec<Segment>,
    hazards: Vec<(Vec2, f32)>,
    available: bool,
}

impl Default for SegmentTerrain {
    fn default() -> Self {
        Self {
            segments: Vec::new(),
            hazards: Vec::new(),
            available: true,
        }
    }
}

impl SegmentTerrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_segment(mut self, a: Vec2, b: Vec2) -> Self {
        self.segments.push(Segment {
            a,
            b,
            material: SurfaceMaterial::default(),
        });
        self
    }

    pub fn with_material_segment(mut self, a: Vec2, b: Vec2, material: SurfaceMaterial) -> Self {
        self.segments.push(Segment { a, b, material });
        self
    }

    /// Horizontal floor (or ceiling) at height `y` spanning `x0..x1`.
    pub fn with_floor(self, y: f32, x0: f32, x1: f32) -> Self {
        self.with_segment(Vec2::new(x0, y), Vec2::new(x1, y))
    }

    /// A straight ramp through `center` rising at `angle_deg` towards +X.
    pub fn with_ramp(self, center: Vec2, angle_deg: f32, half_length: f32) -> Self {
        let along = Vec2::from_angle(angle_deg.to_radians()) * half_length;
        self.with_segment(center - along, center + along)
    }

    pub fn with_hazard(mut self, center: Vec2, radius: f32) -> Self {
        self.hazards.push((center, radius));
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }
}

impl TerrainQuery for SegmentTerrain {
    fn is_available(&self) -> bool {
        self.available
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: LayerFilter,
    ) -> Option<TerrainHit> {
        if !self.available || filter == LayerFilter::Hazards {
            return None;
        }
        let dir = direction.try_normalize()?;

        let mut best: Option<TerrainHit> = None;
        for segment in &self.segments {
            let edge = segment.b - segment.a;
            let denom = dir.perp_dot(edge);
            if denom.abs() < 1e-6 {
                continue;
            }
            let to_start = segment.a - origin;
            let t = to_start.perp_dot(edge) / denom;
            let u = to_start.perp_dot(dir) / denom;
            if !(0.0..=max_distance).contains(&t) || !(0.0..=1.0).contains(&u) {
                continue;
            }

            let mut normal = edge.perp().normalize();
            if normal.dot(dir) > 0.0 {
                normal = -normal;
            }

            if best.is_none_or(|b| t < b.distance) {
                best = Some(TerrainHit {
                    point: origin + dir * t,
                    normal,
                    distance: t,
                    surface: SurfaceRef {
                        entity: None,
                        material: segment.material,
                    },
                });
            }
        }
        best
    }

    fn overlaps_hazard(&self, point: Vec2, radius: f32) -> bool {
        self.available
            && self
                .hazards
                .iter()
                .any(|(center, r)| center.distance(point) <= r + radius)
    }
}
