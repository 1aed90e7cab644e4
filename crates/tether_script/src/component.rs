// component.rs - Typed component proxies
//
// A proxy is just (kind, handle). It carries no component data; every
// property read or write is exactly one boundary call, so values are always
// as fresh as the engine's.

use crate::ffi::{EntityHandle, InternalCalls};
use tether_core::ecs::ComponentKind;
use tether_core::math::Vec3;

/// Script-side view of one component kind on one entity.
///
/// Adding a component kind means adding a `ComponentKind` variant, its
/// calls on [`InternalCalls`], and a proxy type made with
/// `define_component_proxy!`. [`Entity::get_component`](crate::Entity::get_component)
/// works with it unchanged.
pub trait ComponentProxy: Sized {
    /// Kind token sent to the engine for presence checks.
    const KIND: ComponentKind;

    /// Bind a proxy to an entity. The binding never changes afterwards.
    fn bind(entity: EntityHandle) -> Self;

    fn entity(&self) -> EntityHandle;
}

/// Helper macro to declare a proxy type for a component kind.
///
/// # Example
/// ```ignore
/// define_component_proxy!(
///     /// Script view of an entity's light.
///     LightComponent, Light
/// );
/// ```
#[macro_export]
macro_rules! define_component_proxy {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        pub struct $name {
            entity: $crate::EntityHandle,
        }

        impl $crate::ComponentProxy for $name {
            const KIND: $crate::tether_core::ecs::ComponentKind =
                $crate::tether_core::ecs::ComponentKind::$kind;

            fn bind(entity: $crate::EntityHandle) -> Self {
                Self { entity }
            }

            fn entity(&self) -> $crate::EntityHandle {
                self.entity
            }
        }
    };
}

define_component_proxy!(
    /// Script view of an entity's transform.
    TransformComponent,
    Transform
);

impl TransformComponent {
    pub fn translation(&self, calls: &mut dyn InternalCalls) -> Vec3 {
        let mut translation = Vec3::ZERO;
        calls.transform_get_translation(self.entity, &mut translation);
        translation
    }

    pub fn set_translation(&self, calls: &mut dyn InternalCalls, translation: Vec3) {
        calls.transform_set_translation(self.entity, &translation);
    }

    /// Euler angles in radians.
    pub fn rotation(&self, calls: &mut dyn InternalCalls) -> Vec3 {
        let mut rotation = Vec3::ZERO;
        calls.transform_get_rotation(self.entity, &mut rotation);
        rotation
    }

    pub fn set_rotation(&self, calls: &mut dyn InternalCalls, rotation: Vec3) {
        calls.transform_set_rotation(self.entity, &rotation);
    }
}

define_component_proxy!(
    /// Script view of an entity's physics body.
    RigidbodyComponent,
    Rigidbody
);

impl RigidbodyComponent {
    pub fn add_force(&self, calls: &mut dyn InternalCalls, force: Vec3) {
        calls.rigidbody_add_force(self.entity, &force);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingCalls;

    #[test]
    fn proxies_carry_their_kind_and_handle() {
        let transform = TransformComponent::bind(EntityHandle(9));
        assert_eq!(TransformComponent::KIND, ComponentKind::Transform);
        assert_eq!(RigidbodyComponent::KIND, ComponentKind::Rigidbody);
        assert_eq!(transform.entity(), EntityHandle(9));
    }

    #[test]
    fn every_access_is_one_boundary_call() {
        let mut calls = RecordingCalls::default();
        let handle = EntityHandle(5);
        calls.add_transform(handle, Vec3::ZERO);
        let transform = TransformComponent::bind(handle);

        transform.set_translation(&mut calls, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.translation(&mut calls), Vec3::new(1.0, 2.0, 3.0));
        transform.set_rotation(&mut calls, Vec3::Y);
        assert_eq!(transform.rotation(&mut calls), Vec3::Y);

        assert_eq!(
            calls.log(),
            &[
                "transform_set_translation",
                "transform_get_translation",
                "transform_set_rotation",
                "transform_get_rotation",
            ]
        );
    }

    #[test]
    fn add_force_forwards_the_value() {
        let mut calls = RecordingCalls::default();
        let body = RigidbodyComponent::bind(EntityHandle(2));
        body.add_force(&mut calls, Vec3::new(0.5, -1.0, 0.25));

        assert_eq!(calls.forces(), &[(EntityHandle(2), Vec3::new(0.5, -1.0, 0.25))]);
    }
}
