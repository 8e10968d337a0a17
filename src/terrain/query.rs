//! Terrain domain: query types shared by detection and respawn validation.

use bevy::prelude::*;

/// Which kind of geometry a query should consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayerFilter {
    #[default]
    Ground,
    Hazards,
    All,
}

/// Physical surface properties of a collider, queried on the nearest ground hit.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMaterial {
    pub friction: f32,
    pub bounciness: f32,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            friction: 0.0,
            bounciness: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRef {
    /// Entity owning the surface, if the world is entity-backed
    pub entity: Option<Entity>,
    pub material: SurfaceMaterial,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainHit {
    pub point: Vec2,
    /// Unit normal of the surface at `point`, facing the ray origin
    pub normal: Vec2,
    pub distance: f32,
    pub surface: SurfaceRef,
}

/// Terrain Query Service contract.
///
/// Implementations must never panic on degenerate input; a zero direction or
/// an unavailable backend is simply "no hit".
pub trait TerrainQuery {
    /// False when the backing world cannot answer queries (e.g. mid-load).
    /// Callers treat an unavailable service as "nothing there".
    fn is_available(&self) -> bool {
        true
    }

    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: LayerFilter,
    ) -> Option<TerrainHit>;

    /// Whether a circle at `point` touches any hazard region.
    fn overlaps_hazard(&self, point: Vec2, radius: f32) -> bool;
}
