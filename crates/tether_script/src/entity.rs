//! Script-facing entity facade

use crate::component::{ComponentProxy, TransformComponent};
use crate::ffi::{EntityHandle, InternalCalls};
use crate::script::EntityScript;
use std::cell::RefCell;
use std::rc::Rc;
use tether_core::math::Vec3;

/// Handle to one simulated entity, as seen by scripts.
///
/// `Entity::default()` holds the null handle; every method on it returns the
/// neutral result without calling into the engine.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Entity {
    id: EntityHandle,
}

impl Entity {
    pub fn from_handle(id: EntityHandle) -> Self {
        Self { id }
    }

    pub fn id(&self) -> EntityHandle {
        self.id
    }

    pub fn is_null(&self) -> bool {
        self.id.is_null()
    }

    pub fn has_component<T: ComponentProxy>(&self, calls: &mut dyn InternalCalls) -> bool {
        if self.is_null() {
            return false;
        }
        calls.entity_has_component(self.id, T::KIND)
    }

    /// A fresh proxy bound to this entity, or None if the engine reports no
    /// component of that kind right now.
    pub fn get_component<T: ComponentProxy>(&self, calls: &mut dyn InternalCalls) -> Option<T> {
        if !self.has_component::<T>(calls) {
            return None;
        }
        Some(T::bind(self.id))
    }

    /// Look up another entity by exact name. The result is a plain facade,
    /// not the script attached to that entity; use [`Entity::as_script`] for that.
    pub fn find_entity_by_name(
        &self,
        calls: &mut dyn InternalCalls,
        name: &str,
    ) -> Option<Entity> {
        if self.is_null() {
            return None;
        }
        let id = calls.entity_find_entity_by_name(name);
        if id.is_null() {
            return None;
        }
        Some(Entity::from_handle(id))
    }

    /// The script instance attached to this entity, if its class is `T`.
    pub fn as_script<T: EntityScript>(
        &self,
        calls: &mut dyn InternalCalls,
    ) -> Option<Rc<RefCell<T>>> {
        if self.is_null() {
            return None;
        }
        calls.get_script_instance(self.id)?.downcast::<T>()
    }

    /// Shorthand for the transform's translation.
    pub fn position(&self, calls: &mut dyn InternalCalls) -> Vec3 {
        if self.is_null() {
            return Vec3::ZERO;
        }
        TransformComponent::bind(self.id).translation(calls)
    }

    pub fn set_position(&self, calls: &mut dyn InternalCalls, position: Vec3) {
        if self.is_null() {
            return;
        }
        TransformComponent::bind(self.id).set_translation(calls, position);
    }

    /// Write a message to the engine log, tagged with this entity.
    pub fn log(&self, calls: &mut dyn InternalCalls, message: &str) {
        if self.is_null() {
            return;
        }
        calls.native_log(&format!("[{}] {message}", self.id));
    }
}

impl From<EntityHandle> for Entity {
    fn from(id: EntityHandle) -> Self {
        Self::from_handle(id)
    }
}
