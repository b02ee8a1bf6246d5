//! Ray casting against entity bounding spheres.
//!
//! Only the entry intersection in front of the ray origin counts, so a ray
//! starting inside a sphere does not hit it (front faces only).

use glam::Vec3;
use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalized here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a successful pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub id: EntityId,
    /// Distance from the ray origin to the entry point.
    pub distance: f32,
    pub point: Vec3,
}

/// Distance to the entry point of `ray` into the sphere, if it is ahead of the origin.
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    if t >= 0.0 {
        Some(t)
    } else {
        None
    }
}

/// Nearest pickable, active entity hit by `ray`.
///
/// Ties on distance keep the entity that comes first in iteration order.
pub fn pick_nearest<'a>(ray: &Ray, entities: impl Iterator<Item = &'a Entity>) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;
    for entity in entities {
        if !entity.active || !entity.pickable {
            continue;
        }
        let Some(mesh) = &entity.mesh else { continue };
        let Some(distance) = ray_sphere(ray, entity.pos, mesh.radius()) else { continue };
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(PickHit {
                id: entity.id,
                distance,
                point: ray.at(distance),
            });
        }
    }
    best
}
