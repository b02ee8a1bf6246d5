/// The planetary table and the registry of spawned bodies.
///
/// A registry is built once per manifest: it spawns the sun, one entity per
/// body, the orbit rings, the starfield and the light, then owns the orbital
/// state of every body.

use glam::Vec3;
use orrery_engine::{
    BodyDescriptor, EngineContext, Entity, EntityId, MeshColor, MeshComponent,
    PointLight, Rng, SystemManifest, orbit_ring, starfield,
};

use crate::orbit::circular_position;

/// Orbit ring color (white, 25% opacity).
const RING_RGBA: [f32; 4] = [1.0, 1.0, 1.0, 0.25];
const STAR_RGBA: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// The eight planets, inner to outer.
pub fn default_manifest() -> SystemManifest {
    SystemManifest::with_bodies(vec![
        BodyDescriptor::new("Mercury", 0.8, 12.0, 0.04, 0xaaaaaa),
        BodyDescriptor::new("Venus", 1.2, 17.0, 0.035, 0xffcc99),
        BodyDescriptor::new("Earth", 1.3, 22.0, 0.03, 0x3399ff),
        BodyDescriptor::new("Mars", 1.0, 27.0, 0.028, 0xff6633),
        BodyDescriptor::new("Jupiter", 2.5, 34.0, 0.02, 0xff9966),
        BodyDescriptor::new("Saturn", 2.2, 42.0, 0.018, 0xffcc66),
        BodyDescriptor::new("Uranus", 1.9, 50.0, 0.015, 0x66ccff),
        BodyDescriptor::new("Neptune", 1.8, 58.0, 0.012, 0x3366ff),
    ])
}

/// Stable position of a body in declaration order.
pub type BodyIndex = usize;

/// An orbiting body.
#[derive(Debug, Clone)]
pub struct Body {
    pub name: String,
    pub entity: EntityId,
    /// Current orbital angle in radians (unbounded).
    pub angle: f32,
    /// Orbit radius.
    pub radius: f32,
    /// Radians per tick.
    pub speed: f32,
}

impl Body {
    pub fn position(&self) -> Vec3 {
        circular_position(self.radius, self.angle)
    }
}

#[derive(Debug, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    /// Spawn everything the manifest describes into `ctx`.
    pub fn build(ctx: &mut EngineContext, manifest: &SystemManifest) -> Self {
        let sun_id = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(sun_id)
                .with_tag(manifest.sun.name.as_str())
                .with_mesh(
                    MeshComponent::sphere(manifest.sun.radius, MeshColor::from_hex(manifest.sun.color))
                        .unlit(),
                ),
        );

        let light = &manifest.light;
        ctx.lights.add(PointLight::new(
            Vec3::ZERO,
            MeshColor::from_hex(light.color).to_array(),
            light.intensity,
            light.range,
        ));

        let stars = &manifest.starfield;
        let mut rng = Rng::new(stars.seed);
        ctx.scenery.add_points(starfield(&mut rng, stars.count, stars.extent, STAR_RGBA, stars.size));

        let mut bodies = Vec::with_capacity(manifest.bodies.len());
        for desc in &manifest.bodies {
            let id = ctx.next_id();
            let body = Body {
                name: desc.name.clone(),
                entity: id,
                angle: desc.angle,
                radius: desc.distance,
                speed: desc.speed,
            };
            ctx.scene.spawn(
                Entity::new(id)
                    .with_tag(desc.name.as_str())
                    .with_pos(body.position())
                    .with_mesh(MeshComponent::sphere(desc.size, MeshColor::from_hex(desc.color)))
                    .pickable(),
            );
            ctx.scenery.add_loop(orbit_ring(desc.distance, manifest.orbit_segments, RING_RGBA));
            bodies.push(body);
        }

        log::info!("spawned {} bodies around {}", bodies.len(), manifest.sun.name);
        Self { bodies }
    }

    pub fn body(&self, index: BodyIndex) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: BodyIndex) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    pub fn name(&self, index: BodyIndex) -> Option<&str> {
        self.body(index).map(|b| b.name.as_str())
    }

    /// Body owning a scene entity.
    pub fn index_of(&self, entity: EntityId) -> Option<BodyIndex> {
        self.bodies.iter().position(|b| b.entity == entity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    pub fn count(&self) -> usize {
        self.bodies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_manifest_is_valid() {
        let manifest = default_manifest();
        assert!(manifest.validate().is_ok());
        assert_eq!(manifest.bodies.len(), 8);
        assert_eq!(manifest.bodies[2].name, "Earth");
        assert_eq!(manifest.bodies[2].color, 0x3399ff);
        assert_eq!(manifest.sun.color, 0xffcc00);
    }

    #[test]
    fn build_spawns_sun_and_pickable_planets() {
        let mut ctx = EngineContext::new();
        let registry = BodyRegistry::build(&mut ctx, &default_manifest());

        assert_eq!(registry.count(), 8);
        assert_eq!(ctx.scene.len(), 9);

        let sun = ctx.scene.find_by_tag("Sun").unwrap();
        assert!(!sun.pickable);
        assert_eq!(sun.radius(), 4.0);

        let earth = registry.body(2).unwrap();
        let entity = ctx.scene.get(earth.entity).unwrap();
        assert!(entity.pickable);
        assert_eq!(entity.pos, Vec3::new(22.0, 0.0, 0.0));
        assert_eq!(registry.index_of(earth.entity), Some(2));
        assert_eq!(registry.name(7), Some("Neptune"));
        assert_eq!(registry.name(8), None);
    }

    #[test]
    fn build_adds_scenery_and_light() {
        let mut ctx = EngineContext::new();
        BodyRegistry::build(&mut ctx, &default_manifest());

        assert_eq!(ctx.scenery.loops().len(), 8);
        assert_eq!(ctx.scenery.line_vertices().len(), 8 * 64);
        assert_eq!(ctx.scenery.points().len(), 1000);
        assert_eq!(ctx.lights.count(), 1);
        let light = ctx.lights.iter().next().unwrap();
        assert_eq!((light.intensity, light.range), (2.0, 300.0));
    }
}
