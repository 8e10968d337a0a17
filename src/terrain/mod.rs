//! Terrain domain: the ray-query contract the runner senses the world through.
//!
//! Everything above this module only sees [`TerrainQuery`]; the physics-backed
//! implementation lives in `physics.rs` and a line-segment world for tests in
//! `testing.rs`.

mod physics;
mod query;
#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

pub use physics::{GameLayer, Ground, Hazard, PhysicsTerrain};
pub use query::{LayerFilter, SurfaceMaterial, SurfaceRef, TerrainHit, TerrainQuery};
