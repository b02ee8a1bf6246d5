/// Circular orbital motion: pure math plus the per-tick update loop.
///
/// Angles are in radians and grow without bound; speeds are radians per tick.

use glam::Vec3;
use orrery_engine::Scene;

use crate::bodies::BodyRegistry;

/// Position on a circle of `radius` around the origin in the XZ plane.
#[inline]
pub fn circular_position(radius: f32, angle: f32) -> Vec3 {
    Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

/// Advance every body by one tick, in declaration order, and write the new
/// positions into the scene. While paused nothing moves.
pub fn advance(registry: &mut BodyRegistry, scene: &mut Scene, paused: bool) {
    if paused {
        return;
    }

    for body in registry.iter_mut() {
        body.angle += body.speed;
        let pos = circular_position(body.radius, body.angle);
        scene.set_position(body.entity, pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{EngineContext, SystemManifest, BodyDescriptor};

    fn setup(speed: f32) -> (BodyRegistry, EngineContext) {
        let mut ctx = EngineContext::new();
        let manifest = SystemManifest::with_bodies(vec![
            BodyDescriptor::new("Earth", 1.3, 22.0, speed, 0x3399ff),
            BodyDescriptor::new("Mars", 1.0, 27.0, 0.028, 0xff6633),
        ]);
        let registry = BodyRegistry::build(&mut ctx, &manifest);
        (registry, ctx)
    }

    #[test]
    fn circle_starts_on_positive_x() {
        assert_eq!(circular_position(22.0, 0.0), Vec3::new(22.0, 0.0, 0.0));
    }

    #[test]
    fn n_ticks_advance_angle_linearly() {
        let (mut registry, mut ctx) = setup(0.03);
        for _ in 0..100 {
            advance(&mut registry, &mut ctx.scene, false);
        }

        let earth = registry.body(0).unwrap();
        assert!((earth.angle - 3.0).abs() < 1e-4, "angle = {}", earth.angle);

        let expected = Vec3::new(22.0 * 3.0_f32.cos(), 0.0, 22.0 * 3.0_f32.sin());
        let pos = ctx.scene.position_of(earth.entity).unwrap();
        assert!((pos - expected).length() < 1e-3);
        assert!((pos.length() - 22.0).abs() < 1e-3);
    }

    #[test]
    fn paused_ticks_change_nothing() {
        let (mut registry, mut ctx) = setup(0.03);
        advance(&mut registry, &mut ctx.scene, false);
        let earth = registry.body(0).unwrap().entity;
        let angle = registry.body(0).unwrap().angle;
        let pos = ctx.scene.position_of(earth).unwrap();

        for _ in 0..50 {
            advance(&mut registry, &mut ctx.scene, true);
        }

        assert_eq!(registry.body(0).unwrap().angle, angle);
        assert_eq!(ctx.scene.position_of(earth).unwrap(), pos);
    }

    #[test]
    fn zero_speed_body_stays_put() {
        let (mut registry, mut ctx) = setup(0.0);
        for _ in 0..10 {
            advance(&mut registry, &mut ctx.scene, false);
        }
        let earth = registry.body(0).unwrap();
        assert_eq!(ctx.scene.position_of(earth.entity).unwrap(), Vec3::new(22.0, 0.0, 0.0));
        // The other body kept moving.
        assert!(registry.body(1).unwrap().angle > 0.0);
    }
}
