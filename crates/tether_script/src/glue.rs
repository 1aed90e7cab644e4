//! Engine side of the boundary: `InternalCalls` backed by the live world

use crate::ffi::{EntityHandle, InternalCalls};
use crate::runtime::ScriptTable;
use crate::script::ScriptObject;
use tether_core::ecs::{ComponentKind, EntityId, Rigidbody, Transform, World};
use tether_core::math::Vec3;
use tether_metrics::Counter;
use tether_services::input::{InputState, KeyCode};

/// Boundary calls resolved against one world and one input snapshot.
///
/// Borrowed for the duration of a single script callback. Handles are
/// re-validated on every call; dead or null handles get the neutral result.
pub struct SceneCalls<'a> {
    world: &'a mut World,
    input: &'a InputState,
    scripts: Option<&'a ScriptTable>,
    stats: Option<&'a mut Counter>,
    warn_on_stale_handles: bool,
}

impl<'a> SceneCalls<'a> {
    pub fn new(world: &'a mut World, input: &'a InputState) -> Self {
        Self {
            world,
            input,
            scripts: None,
            stats: None,
            warn_on_stale_handles: true,
        }
    }

    /// Live instances visible to `get_script_instance`.
    pub fn with_scripts(mut self, scripts: &'a ScriptTable) -> Self {
        self.scripts = Some(scripts);
        self
    }

    /// Count each call by name.
    pub fn with_stats(mut self, stats: &'a mut Counter) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn warn_on_stale_handles(mut self, warn: bool) -> Self {
        self.warn_on_stale_handles = warn;
        self
    }

    fn record(&mut self, call: &'static str) {
        if let Some(stats) = self.stats.as_deref_mut() {
            stats.increment(call);
        }
    }

    fn resolve(&self, call: &'static str, entity: EntityHandle) -> Option<EntityId> {
        let resolved = self.world.resolve(entity.to_bits());
        if resolved.is_none() {
            if entity.is_null() {
                tracing::debug!(call, "boundary call with null handle");
            } else if self.warn_on_stale_handles {
                tracing::warn!(call, %entity, "boundary call with stale handle");
            } else {
                tracing::debug!(call, %entity, "boundary call with stale handle");
            }
        }
        resolved
    }

    fn missing(call: &'static str, entity: EntityHandle, kind: ComponentKind) {
        tracing::debug!(call, %entity, %kind, "entity has no such component");
    }
}

impl InternalCalls for SceneCalls<'_> {
    fn native_log(&mut self, message: &str) {
        self.record("native_log");
        tracing::info!(target: "script", "{message}");
    }

    fn entity_has_component(&mut self, entity: EntityHandle, kind: ComponentKind) -> bool {
        self.record("entity_has_component");
        match self.resolve("entity_has_component", entity) {
            Some(id) => self.world.has_kind(id, kind),
            None => false,
        }
    }

    fn entity_find_entity_by_name(&mut self, name: &str) -> EntityHandle {
        self.record("entity_find_entity_by_name");
        self.world
            .find_entity_by_name(name)
            .map(EntityHandle::from)
            .unwrap_or(EntityHandle::NULL)
    }

    fn get_script_instance(&mut self, entity: EntityHandle) -> Option<ScriptObject> {
        self.record("get_script_instance");
        self.resolve("get_script_instance", entity)?;
        self.scripts?.get(entity).cloned()
    }

    fn transform_get_translation(&mut self, entity: EntityHandle, out_translation: &mut Vec3) {
        self.record("transform_get_translation");
        *out_translation = Vec3::ZERO;
        let Some(id) = self.resolve("transform_get_translation", entity) else {
            return;
        };
        match self.world.get_component::<Transform>(id) {
            Some(transform) => *out_translation = transform.translation,
            None => Self::missing("transform_get_translation", entity, ComponentKind::Transform),
        }
    }

    fn transform_set_translation(&mut self, entity: EntityHandle, translation: &Vec3) {
        self.record("transform_set_translation");
        let Some(id) = self.resolve("transform_set_translation", entity) else {
            return;
        };
        match self.world.get_component_mut::<Transform>(id) {
            Some(transform) => transform.translation = *translation,
            None => Self::missing("transform_set_translation", entity, ComponentKind::Transform),
        }
    }

    fn transform_get_rotation(&mut self, entity: EntityHandle, out_rotation: &mut Vec3) {
        self.record("transform_get_rotation");
        *out_rotation = Vec3::ZERO;
        let Some(id) = self.resolve("transform_get_rotation", entity) else {
            return;
        };
        match self.world.get_component::<Transform>(id) {
            Some(transform) => *out_rotation = transform.rotation,
            None => Self::missing("transform_get_rotation", entity, ComponentKind::Transform),
        }
    }

    fn transform_set_rotation(&mut self, entity: EntityHandle, rotation: &Vec3) {
        self.record("transform_set_rotation");
        let Some(id) = self.resolve("transform_set_rotation", entity) else {
            return;
        };
        match self.world.get_component_mut::<Transform>(id) {
            Some(transform) => transform.rotation = *rotation,
            None => Self::missing("transform_set_rotation", entity, ComponentKind::Transform),
        }
    }

    fn rigidbody_add_force(&mut self, entity: EntityHandle, force: &Vec3) {
        self.record("rigidbody_add_force");
        let Some(id) = self.resolve("rigidbody_add_force", entity) else {
            return;
        };
        match self.world.get_component_mut::<Rigidbody>(id) {
            Some(body) => body.register_force(*force),
            None => Self::missing("rigidbody_add_force", entity, ComponentKind::Rigidbody),
        }
    }

    fn input_is_key_down(&mut self, key: KeyCode) -> bool {
        self.record("input_is_key_down");
        self.input.is_key_down(key)
    }
}
