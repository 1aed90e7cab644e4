//! Script runtime management
//!
//! Owns the registered script classes and one live instance per
//! script-bearing entity, and drives their callbacks from the engine tick.

use crate::entity::Entity;
use crate::error::ScriptError;
use crate::ffi::{EntityHandle, InternalCalls};
use crate::glue::SceneCalls;
use crate::script::{EntityScript, ScriptObject};
use std::collections::{BTreeMap, HashMap};
use tether_core::ecs::{ComponentKind, EntityId, ScriptComponent, World};
use tether_core::time::Timestep;
use tether_metrics::{Counter, SystemProfiler};
use tether_services::input::InputState;
use tether_services::settings::ScriptingSettings;

/// Where an instance is in its lifecycle.
///
/// `Uninitialized` while its `on_create` runs, `Created` until its first
/// update, `Updating` from then on, and `Destroyed` while `on_destroy` runs.
/// The instance is dropped from the table right after that.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ScriptState {
    Uninitialized,
    Created,
    Updating,
    Destroyed,
}

struct Instance {
    object: ScriptObject,
    state: ScriptState,
}

/// Live script instances keyed by entity handle.
#[derive(Default)]
pub struct ScriptTable {
    instances: BTreeMap<EntityHandle, Instance>,
}

impl ScriptTable {
    pub fn get(&self, entity: EntityHandle) -> Option<&ScriptObject> {
        self.instances.get(&entity).map(|instance| &instance.object)
    }

    pub fn state(&self, entity: EntityHandle) -> Option<ScriptState> {
        self.instances.get(&entity).map(|instance| instance.state)
    }

    pub fn contains(&self, entity: EntityHandle) -> bool {
        self.instances.contains_key(&entity)
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Handles in ascending order.
    pub fn handles(&self) -> impl Iterator<Item = EntityHandle> + '_ {
        self.instances.keys().copied()
    }

    fn insert(&mut self, entity: EntityHandle, object: ScriptObject) {
        self.instances.insert(
            entity,
            Instance {
                object,
                state: ScriptState::Uninitialized,
            },
        );
    }

    fn set_state(&mut self, entity: EntityHandle, state: ScriptState) {
        if let Some(instance) = self.instances.get_mut(&entity) {
            instance.state = state;
        }
    }

    fn remove(&mut self, entity: EntityHandle) -> Option<ScriptObject> {
        self.instances.remove(&entity).map(|instance| instance.object)
    }
}

type Factory = Box<dyn Fn(Entity) -> ScriptObject>;

/// Script execution context
///
/// Instances are created for entities carrying a [`ScriptComponent`] whose
/// class is registered. Per tick the engine reaps instances whose entity
/// died or lost (or changed) its script, creates instances for newly
/// scripted entities, then updates every live instance once in ascending
/// handle order.
pub struct ScriptEngine {
    classes: HashMap<String, Factory>,
    table: ScriptTable,
    // Entities whose class was not registered, with that class, so the
    // error is logged once rather than every tick.
    rejected: HashMap<EntityHandle, String>,
    running: bool,
    warn_on_stale_handles: bool,
    stats: Counter,
    profiler: SystemProfiler,
}

impl ScriptEngine {
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
            table: ScriptTable::default(),
            rejected: HashMap::new(),
            running: false,
            warn_on_stale_handles: true,
            stats: Counter::new(),
            profiler: SystemProfiler::new(),
        }
    }

    pub fn with_settings(settings: &ScriptingSettings) -> Self {
        Self {
            warn_on_stale_handles: settings.warn_on_stale_handles,
            ..Self::new()
        }
    }

    /// Register a script class. `factory` receives the facade of the entity
    /// the new instance is attached to.
    pub fn register<T, F>(&mut self, class_name: &str, factory: F) -> Result<(), ScriptError>
    where
        T: EntityScript,
        F: Fn(Entity) -> T + 'static,
    {
        if class_name.is_empty() {
            return Err(ScriptError::EmptyClassName);
        }
        if self.classes.contains_key(class_name) {
            return Err(ScriptError::DuplicateClass {
                class: class_name.to_string(),
            });
        }

        let name = class_name.to_string();
        self.classes.insert(
            class_name.to_string(),
            Box::new(move |entity| ScriptObject::new(&name, factory(entity))),
        );
        // Entities skipped for lack of this class get another chance.
        self.rejected.retain(|_, class| class != class_name);
        tracing::debug!(class = class_name, "registered script class");
        Ok(())
    }

    pub fn entity_class_exists(&self, class_name: &str) -> bool {
        self.classes.contains_key(class_name)
    }

    /// Attach a registered class to an entity. The instance is created on the
    /// next `on_runtime_start` or `on_update`.
    pub fn attach(
        &self,
        world: &mut World,
        entity: EntityId,
        class_name: &str,
    ) -> Result<(), ScriptError> {
        if !self.entity_class_exists(class_name) {
            return Err(ScriptError::UnknownClass {
                class: class_name.to_string(),
            });
        }
        world.insert_component(entity, ScriptComponent::new(class_name))?;
        Ok(())
    }

    /// Remove an entity's script. Its instance gets `on_destroy` on the next tick.
    pub fn detach(&self, world: &mut World, entity: EntityId) -> Result<(), ScriptError> {
        world.remove_component::<ScriptComponent>(entity)?;
        Ok(())
    }

    /// Instantiate every script-bearing entity and run each `on_create`.
    pub fn on_runtime_start(
        &mut self,
        world: &mut World,
        input: &InputState,
    ) -> Result<(), ScriptError> {
        if self.running {
            return Err(ScriptError::AlreadyRunning);
        }
        self.running = true;
        self.rejected.clear();
        tracing::info!(classes = self.classes.len(), "script runtime starting");

        self.instantiate_pending(world, input);
        Ok(())
    }

    /// One tick of script execution.
    pub fn on_update(&mut self, world: &mut World, input: &InputState, ts: Timestep) {
        if !self.running {
            tracing::debug!("script runtime not started; tick ignored");
            return;
        }

        self.reap(world, input);
        self.instantiate_pending(world, input);

        let handles: Vec<EntityHandle> = self.table.handles().collect();
        for handle in handles {
            let Some(object) = self.table.get(handle).cloned() else {
                continue;
            };
            self.dispatch(world, input, &object, |script, calls| {
                script.on_update(calls, ts)
            });
            self.table.set_state(handle, ScriptState::Updating);
        }
    }

    /// Destroy every live instance and stop ticking.
    pub fn on_runtime_stop(&mut self, world: &mut World, input: &InputState) {
        if !self.running {
            return;
        }
        let handles: Vec<EntityHandle> = self.table.handles().collect();
        for handle in handles {
            self.destroy(world, input, handle);
        }
        self.rejected.clear();
        self.running = false;
        tracing::info!("script runtime stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn instance(&self, entity: EntityHandle) -> Option<ScriptObject> {
        self.table.get(entity).cloned()
    }

    pub fn state(&self, entity: EntityHandle) -> Option<ScriptState> {
        self.table.state(entity)
    }

    pub fn instance_count(&self) -> usize {
        self.table.len()
    }

    pub fn table(&self) -> &ScriptTable {
        &self.table
    }

    /// Boundary calls made by scripts, by call name.
    pub fn call_stats(&self) -> &Counter {
        &self.stats
    }

    /// Callback time per script class.
    pub fn profiler(&self) -> &SystemProfiler {
        &self.profiler
    }

    fn reap(&mut self, world: &mut World, input: &InputState) {
        let doomed: Vec<EntityHandle> = self
            .table
            .instances
            .iter()
            .filter(|(handle, instance)| {
                let attached = world
                    .resolve(handle.to_bits())
                    .and_then(|id| world.get_component::<ScriptComponent>(id));
                match attached {
                    Some(script) => script.class_name != instance.object.class_name(),
                    None => true,
                }
            })
            .map(|(handle, _)| *handle)
            .collect();

        for handle in doomed {
            self.destroy(world, input, handle);
        }
        self.rejected
            .retain(|handle, _| world.resolve(handle.to_bits()).is_some());
    }

    fn instantiate_pending(&mut self, world: &mut World, input: &InputState) {
        for id in world.entities_with(ComponentKind::Script) {
            let handle = EntityHandle::from(id);
            if self.table.contains(handle) {
                continue;
            }
            let Some(class_name) = world
                .get_component::<ScriptComponent>(id)
                .map(|script| script.class_name.clone())
            else {
                continue;
            };
            if self.rejected.get(&handle) == Some(&class_name) {
                continue;
            }
            let Some(factory) = self.classes.get(&class_name) else {
                tracing::error!(
                    entity = %handle,
                    class = %class_name,
                    "script class not registered; entity skipped"
                );
                self.rejected.insert(handle, class_name);
                continue;
            };

            let object = factory(Entity::from_handle(handle));
            self.rejected.remove(&handle);
            self.table.insert(handle, object.clone());
            self.dispatch(world, input, &object, |script, calls| script.on_create(calls));
            self.table.set_state(handle, ScriptState::Created);
            tracing::info!(entity = %handle, class = %class_name, "script created");
        }
    }

    fn destroy(&mut self, world: &mut World, input: &InputState, handle: EntityHandle) {
        let Some(object) = self.table.get(handle).cloned() else {
            return;
        };
        self.table.set_state(handle, ScriptState::Destroyed);
        self.dispatch(world, input, &object, |script, calls| script.on_destroy(calls));
        self.table.remove(handle);
        tracing::info!(entity = %handle, class = object.class_name(), "script destroyed");
    }

    fn dispatch<F>(
        &mut self,
        world: &mut World,
        input: &InputState,
        object: &ScriptObject,
        callback: F,
    ) where
        F: FnOnce(&mut dyn EntityScript, &mut dyn InternalCalls),
    {
        let Ok(mut script) = object.behaviour().try_borrow_mut() else {
            tracing::warn!(
                class = object.class_name(),
                "script instance is busy; callback skipped"
            );
            return;
        };
        let mut calls = SceneCalls::new(world, input)
            .with_scripts(&self.table)
            .with_stats(&mut self.stats)
            .warn_on_stale_handles(self.warn_on_stale_handles);
        self.profiler
            .time_system(object.class_name(), || callback(&mut *script, &mut calls));
    }
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::new()
    }
}
