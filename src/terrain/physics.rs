//! Terrain domain: avian2d-backed terrain queries and physics layers.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::terrain::query::{LayerFilter, SurfaceMaterial, SurfaceRef, TerrainHit, TerrainQuery};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Solid surfaces the player can stand on (floors, ceilings, ramps)
    Ground,
    /// Damaging regions (spikes, saws)
    Hazard,
    /// Player character
    Player,
    /// Sensors (checkpoints, gravity zones, finish line) - never block movement
    Sensor,
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for hazard colliders
#[derive(Component, Debug)]
pub struct Hazard;

/// Terrain queries answered by the physics world's spatial query pipeline.
pub struct PhysicsTerrain<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    materials: &'a Query<'w, 's, &'static SurfaceMaterial>,
}

impl<'a, 'w, 's> PhysicsTerrain<'a, 'w, 's> {
    pub fn new(
        spatial_query: &'a SpatialQuery<'w, 's>,
        materials: &'a Query<'w, 's, &'static SurfaceMaterial>,
    ) -> Self {
        Self {
            spatial_query,
            materials,
        }
    }

    fn query_filter(filter: LayerFilter) -> SpatialQueryFilter {
        match filter {
            LayerFilter::Ground => SpatialQueryFilter::from_mask(GameLayer::Ground),
            LayerFilter::Hazards => SpatialQueryFilter::from_mask(GameLayer::Hazard),
            LayerFilter::All => {
                SpatialQueryFilter::from_mask([GameLayer::Ground, GameLayer::Hazard])
            }
        }
    }
}

impl TerrainQuery for PhysicsTerrain<'_, '_, '_> {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        filter: LayerFilter,
    ) -> Option<TerrainHit> {
        let Ok(dir) = Dir2::new(direction) else {
            return None;
        };
        if !origin.is_finite() || !max_distance.is_finite() {
            return None;
        }

        let hit = self.spatial_query.cast_ray(
            origin,
            dir,
            max_distance,
            true,
            &Self::query_filter(filter),
        )?;

        let material = self.materials.get(hit.entity).copied().unwrap_or_default();

        Some(TerrainHit {
            point: origin + *dir * hit.distance,
            normal: hit.normal,
            distance: hit.distance,
            surface: SurfaceRef {
                entity: Some(hit.entity),
                material,
            },
        })
    }

    fn overlaps_hazard(&self, point: Vec2, radius: f32) -> bool {
        if !point.is_finite() {
            return false;
        }

        let filter = Self::query_filter(LayerFilter::Hazards);
        // Sample the centre and four rim points of the clearance circle
        let samples = [
            Vec2::ZERO,
            Vec2::X * radius,
            Vec2::NEG_X * radius,
            Vec2::Y * radius,
            Vec2::NEG_Y * radius,
        ];

        samples.iter().any(|offset| {
            !self
                .spatial_query
                .point_intersections(point + *offset, &filter)
                .is_empty()
        })
    }
}
