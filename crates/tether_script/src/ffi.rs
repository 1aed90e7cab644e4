//! FFI layer between the engine and scripts
//!
//! Handle-based access to engine systems. Scripts never see engine storage;
//! every read or write is one call through [`InternalCalls`], addressed by an
//! [`EntityHandle`].
//!
//! Argument conventions:
//! - handles, kind tokens and key codes are passed by value
//! - vectors going *in* are passed as `&Vec3` and copied by the engine; the
//!   reference is never retained past the call
//! - vectors coming *out* are written into caller-provided `&mut Vec3`
//!
//! Calls against the null or a stale handle must not panic. They produce the
//! neutral result: `false`, [`EntityHandle::NULL`], `None`, or a zero vector.

use crate::script::ScriptObject;
use tether_core::ecs::{ComponentKind, EntityId};
use tether_core::math::Vec3;
use tether_services::input::KeyCode;

/// Opaque handle for script access
///
/// A non-owning 64-bit key into engine storage. Zero is reserved for
/// "no entity".
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(pub u64);

impl EntityHandle {
    pub const NULL: EntityHandle = EntityHandle(0);

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }

    pub fn to_bits(&self) -> u64 {
        self.0
    }
}

impl From<EntityId> for EntityHandle {
    fn from(entity: EntityId) -> Self {
        EntityHandle(entity.to_bits())
    }
}

impl std::fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// The complete set of calls a script can make into the engine.
///
/// Every call is synchronous and completes within the current tick.
/// The engine implementation is [`SceneCalls`](crate::SceneCalls).
pub trait InternalCalls {
    /// Forward a script message into the engine log.
    fn native_log(&mut self, message: &str);

    fn entity_has_component(&mut self, entity: EntityHandle, kind: ComponentKind) -> bool;

    /// [`EntityHandle::NULL`] when no entity has exactly this name.
    fn entity_find_entity_by_name(&mut self, name: &str) -> EntityHandle;

    /// The live script instance attached to `entity`, if any.
    fn get_script_instance(&mut self, entity: EntityHandle) -> Option<ScriptObject>;

    fn transform_get_translation(&mut self, entity: EntityHandle, out_translation: &mut Vec3);

    fn transform_set_translation(&mut self, entity: EntityHandle, translation: &Vec3);

    fn transform_get_rotation(&mut self, entity: EntityHandle, out_rotation: &mut Vec3);

    fn transform_set_rotation(&mut self, entity: EntityHandle, rotation: &Vec3);

    /// Queue `force` on the entity's body for this tick, unmodified.
    fn rigidbody_add_force(&mut self, entity: EntityHandle, force: &Vec3);

    /// Current key state. Each call is an independent snapshot.
    fn input_is_key_down(&mut self, key: KeyCode) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::ecs::World;

    #[test]
    fn null_handle() {
        assert!(EntityHandle::NULL.is_null());
        assert_eq!(EntityHandle::default(), EntityHandle::NULL);
        assert!(!EntityHandle(1).is_null());
    }

    #[test]
    fn live_entity_never_maps_to_null() {
        let mut world = World::new();
        let id = world.spawn_named("First");
        let handle = EntityHandle::from(id);

        assert!(!handle.is_null());
        assert_eq!(world.resolve(handle.to_bits()), Some(id));
    }

    #[test]
    fn handles_compare_by_value() {
        let a = EntityHandle(42);
        let b = a;
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "0x000000000000002a");
    }
}
