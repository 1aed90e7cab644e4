//! Minimal body integration
//!
//! Stand-in for the real physics collaborator: drains each body's queued
//! forces into its velocity and moves the transform. Run after scripts so
//! forces added during a tick take effect in that tick.

use crate::ecs::{ComponentKind, Rigidbody, Transform, World};
use crate::math::Vec3;
use crate::time::Timestep;

pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.8, 0.0);

/// Semi-implicit Euler step over every entity with a rigidbody.
pub fn integrate(world: &mut World, ts: Timestep) {
    let dt = ts.seconds();
    for entity in world.entities_with(ComponentKind::Rigidbody) {
        let Some(body) = world.get_component_mut::<Rigidbody>(entity) else {
            continue;
        };

        let mut acceleration = if body.mass > 0.0 {
            body.net_force() / body.mass
        } else {
            Vec3::ZERO
        };
        if body.use_gravity {
            acceleration += GRAVITY;
        }
        body.clear_forces();

        body.velocity += acceleration * dt;
        body.velocity *= (1.0 - body.damping).clamp(0.0, 1.0).powf(dt);
        let velocity = body.velocity;

        if let Some(transform) = world.get_component_mut::<Transform>(entity) {
            transform.translation += velocity * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::EntityBuilder;

    #[test]
    fn force_moves_body_and_is_consumed() {
        let mut world = World::new();
        let mut body = Rigidbody::with_mass(2.0);
        body.damping = 0.0;
        let e = world.spawn(
            EntityBuilder::new()
                .named("Ball")
                .with(Transform::default())
                .with(body),
        );

        world
            .get_component_mut::<Rigidbody>(e)
            .unwrap()
            .register_force(Vec3::new(4.0, 0.0, 0.0));
        integrate(&mut world, Timestep::from_seconds(1.0));

        let body = world.get_component::<Rigidbody>(e).unwrap();
        assert_eq!(body.velocity, Vec3::new(2.0, 0.0, 0.0));
        assert!(body.pending_forces().is_empty());
        assert_eq!(
            world.get_component::<Transform>(e).unwrap().translation,
            Vec3::new(2.0, 0.0, 0.0)
        );
    }

    #[test]
    fn bodies_without_transform_still_integrate() {
        let mut world = World::new();
        let e = world.spawn(EntityBuilder::new().with(Rigidbody::default()));
        world
            .get_component_mut::<Rigidbody>(e)
            .unwrap()
            .register_force(Vec3::Z);
        integrate(&mut world, Timestep::from_seconds(0.5));

        assert!(world.get_component::<Rigidbody>(e).unwrap().velocity.z > 0.0);
    }
}
