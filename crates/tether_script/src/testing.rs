//! In-memory `InternalCalls` used by unit tests. Records every call by name.

use crate::ffi::{EntityHandle, InternalCalls};
use crate::script::ScriptObject;
use std::collections::{HashMap, HashSet};
use tether_core::ecs::ComponentKind;
use tether_core::math::Vec3;
use tether_services::input::KeyCode;

#[derive(Default)]
pub(crate) struct RecordingCalls {
    transforms: HashMap<EntityHandle, (Vec3, Vec3)>,
    bodies: HashSet<EntityHandle>,
    names: Vec<(String, EntityHandle)>,
    scripts: HashMap<EntityHandle, ScriptObject>,
    keys: HashSet<KeyCode>,
    log: Vec<&'static str>,
    forces: Vec<(EntityHandle, Vec3)>,
    messages: Vec<String>,
}

impl RecordingCalls {
    pub(crate) fn add_transform(&mut self, entity: EntityHandle, translation: Vec3) {
        self.transforms.insert(entity, (translation, Vec3::ZERO));
    }

    pub(crate) fn add_body(&mut self, entity: EntityHandle) {
        self.bodies.insert(entity);
    }

    pub(crate) fn add_name(&mut self, name: &str, entity: EntityHandle) {
        self.names.push((name.to_string(), entity));
    }

    pub(crate) fn add_script(&mut self, entity: EntityHandle, object: ScriptObject) {
        self.scripts.insert(entity, object);
    }

    pub(crate) fn press(&mut self, key: KeyCode) {
        self.keys.insert(key);
    }

    pub(crate) fn log(&self) -> &[&'static str] {
        &self.log
    }

    pub(crate) fn forces(&self) -> &[(EntityHandle, Vec3)] {
        &self.forces
    }

    pub(crate) fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl InternalCalls for RecordingCalls {
    fn native_log(&mut self, message: &str) {
        self.log.push("native_log");
        self.messages.push(message.to_string());
    }

    fn entity_has_component(&mut self, entity: EntityHandle, kind: ComponentKind) -> bool {
        self.log.push("entity_has_component");
        match kind {
            ComponentKind::Transform => self.transforms.contains_key(&entity),
            ComponentKind::Rigidbody => self.bodies.contains(&entity),
            ComponentKind::Script => self.scripts.contains_key(&entity),
            ComponentKind::Tag => self.names.iter().any(|(_, e)| *e == entity),
        }
    }

    fn entity_find_entity_by_name(&mut self, name: &str) -> EntityHandle {
        self.log.push("entity_find_entity_by_name");
        self.names
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, e)| *e)
            .unwrap_or(EntityHandle::NULL)
    }

    fn get_script_instance(&mut self, entity: EntityHandle) -> Option<ScriptObject> {
        self.log.push("get_script_instance");
        self.scripts.get(&entity).cloned()
    }

    fn transform_get_translation(&mut self, entity: EntityHandle, out_translation: &mut Vec3) {
        self.log.push("transform_get_translation");
        *out_translation = self.transforms.get(&entity).map(|t| t.0).unwrap_or(Vec3::ZERO);
    }

    fn transform_set_translation(&mut self, entity: EntityHandle, translation: &Vec3) {
        self.log.push("transform_set_translation");
        if let Some(t) = self.transforms.get_mut(&entity) {
            t.0 = *translation;
        }
    }

    fn transform_get_rotation(&mut self, entity: EntityHandle, out_rotation: &mut Vec3) {
        self.log.push("transform_get_rotation");
        *out_rotation = self.transforms.get(&entity).map(|t| t.1).unwrap_or(Vec3::ZERO);
    }

    fn transform_set_rotation(&mut self, entity: EntityHandle, rotation: &Vec3) {
        self.log.push("transform_set_rotation");
        if let Some(t) = self.transforms.get_mut(&entity) {
            t.1 = *rotation;
        }
    }

    fn rigidbody_add_force(&mut self, entity: EntityHandle, force: &Vec3) {
        self.log.push("rigidbody_add_force");
        self.forces.push((entity, *force));
    }

    fn input_is_key_down(&mut self, key: KeyCode) -> bool {
        self.log.push("input_is_key_down");
        self.keys.contains(&key)
    }
}
