//! Gravity domain: global gravity source, local zones and target resolution.

use bevy::prelude::*;

use crate::gravity::types::{GravityConfiguration, GravityDirection, GravityTuning};

/// Used when neither a zone nor the world provides gravity.
pub const FALLBACK_GRAVITY: Vec2 = Vec2::new(0.0, -1800.0);

/// World-wide gravity signal. Writers use the setters so change detection
/// notifies subscribers through [`crate::gravity::GlobalGravityChanged`].
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GlobalGravity {
    direction: Vec2,
    strength: f32,
}

impl Default for GlobalGravity {
    fn default() -> Self {
        Self::from_tuning(&GravityTuning::default())
    }
}

impl GlobalGravity {
    pub fn new(direction: Vec2, strength: f32) -> Self {
        Self {
            direction: direction.try_normalize().unwrap_or(Vec2::NEG_Y),
            strength,
        }
    }

    pub fn from_tuning(tuning: &GravityTuning) -> Self {
        Self::new(Vec2::from(tuning.global_direction), tuning.global_strength)
    }

    pub fn current_direction(&self) -> Vec2 {
        self.direction
    }

    pub fn current_strength(&self) -> f32 {
        self.strength
    }

    pub fn vector(&self) -> Vec2 {
        self.direction * self.strength
    }

    /// Zero or non-finite directions are ignored.
    pub fn set_direction(&mut self, direction: Vec2) {
        if let Some(dir) = direction.try_normalize() {
            self.direction = dir;
        }
    }

    /// Unvalidated. Corrupt strengths are caught by the integrator.
    pub fn set_strength(&mut self, strength: f32) {
        self.strength = strength;
    }
}

/// Axis-aligned region overriding ambient gravity for bodies inside it.
#[derive(Component, Debug, Clone)]
pub struct GravityZone {
    pub half_extents: Vec2,
    pub gravity: Vec2,
    pub active: bool,
}

impl GravityZone {
    pub fn new(size: Vec2, gravity: Vec2) -> Self {
        Self {
            half_extents: size * 0.5,
            gravity,
            active: true,
        }
    }

    pub fn contains_point(&self, zone_center: Vec2, point: Vec2) -> bool {
        let local = (point - zone_center).abs();
        local.x <= self.half_extents.x && local.y <= self.half_extents.y
    }

    pub fn gravity_at(&self, _point: Vec2) -> Vec2 {
        self.gravity
    }
}

/// Zones a body is currently inside, in the order it entered them.
#[derive(Component, Debug, Default, Clone)]
pub struct ZoneStack {
    entered: Vec<Entity>,
}

impl ZoneStack {
    /// Reconcile with the zones containing the body this tick. Zones that no
    /// longer contain it are dropped; newly entered zones go on top.
    pub fn sync(&mut self, containing: &[Entity]) {
        self.entered.retain(|zone| containing.contains(zone));
        for zone in containing {
            if !self.entered.contains(zone) {
                self.entered.push(*zone);
            }
        }
    }

    /// Most recently entered zone that is currently active.
    pub fn winner(&self, is_active: impl Fn(Entity) -> bool) -> Option<Entity> {
        self.entered.iter().rev().copied().find(|zone| is_active(*zone))
    }

    pub fn entered(&self) -> &[Entity] {
        &self.entered
    }

    pub fn reset(&mut self) {
        self.entered.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravitySource {
    Zone(Entity),
    Global,
    Fallback,
}

/// Resolution order: active zone, then the global signal, then the
/// hard-coded downward fallback.
pub fn resolve_base_gravity(
    zone: Option<(Entity, Vec2)>,
    global: Option<Vec2>,
) -> (Vec2, GravitySource) {
    if let Some((entity, gravity)) = zone {
        return (gravity, GravitySource::Zone(entity));
    }
    if let Some(gravity) = global {
        return (gravity, GravitySource::Global);
    }
    (FALLBACK_GRAVITY, GravitySource::Fallback)
}

/// Base gravity scaled by the player's configuration and flip direction.
pub fn effective_gravity(
    base: Vec2,
    direction: GravityDirection,
    config: &GravityConfiguration,
) -> Vec2 {
    base * config.gravity_scale * direction.sign()
}
