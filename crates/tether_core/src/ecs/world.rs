// world.rs - Authoritative entity/component storage

use crate::ecs::entity::FIRST_GENERATION;
use crate::ecs::storage::Columns;
use crate::ecs::{Component, ComponentKind, EntityBuilder, EntityId, Tag, Transform};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("entity {bits:#018x} does not exist")]
    NoSuchEntity { bits: u64 },
}

/// Liveness bookkeeping for one slot.
#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: u32,
    alive: bool,
}

/// The main ECS world containing all entities and components.
///
/// Despawned slots are pooled and reused with a bumped generation, so ids
/// that outlive their entity stop resolving instead of aliasing a newcomer.
pub struct World {
    slots: Vec<Slot>,
    free: Vec<u32>,
    columns: Columns,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            columns: Columns::default(),
        }
    }

    /// Spawn an entity from a builder.
    pub fn spawn(&mut self, builder: EntityBuilder) -> EntityId {
        let id = self.alloc_slot();
        builder.write(&mut self.columns, id.index() as usize);
        tracing::trace!(entity = id.to_bits(), "spawned entity");
        id
    }

    /// Spawn the engine's default entity: a `Tag` and an identity `Transform`.
    pub fn spawn_named(&mut self, name: &str) -> EntityId {
        let name = if name.is_empty() { "Entity" } else { name };
        self.spawn(
            EntityBuilder::new()
                .with(Tag::new(name))
                .with(Transform::default()),
        )
    }

    fn alloc_slot(&mut self) -> EntityId {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.alive = true;
            EntityId::new(index, slot.generation)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: FIRST_GENERATION,
                alive: true,
            });
            EntityId::new(index, FIRST_GENERATION)
        }
    }

    /// Despawn an entity.
    ///
    /// The slot is returned to the pool and its generation is incremented.
    /// Returns false if the id was already stale.
    pub fn despawn(&mut self, entity: EntityId) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let index = entity.index();
        let slot = &mut self.slots[index as usize];
        slot.alive = false;
        // Skip 0 on wrap so a reused slot 0 never encodes to the null handle.
        slot.generation = match slot.generation.wrapping_add(1) {
            0 => FIRST_GENERATION,
            next => next,
        };
        self.columns.clear_slot(index as usize);
        self.free.push(index);
        tracing::trace!(entity = entity.to_bits(), "despawned entity");
        true
    }

    /// Check that an id refers to a live entity with a matching generation.
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.slots
            .get(entity.index() as usize)
            .is_some_and(|slot| slot.alive && slot.generation == entity.generation())
    }

    /// Turn a 64-bit handle back into a live id.
    ///
    /// Returns None for the zero sentinel and for stale or unknown handles.
    pub fn resolve(&self, bits: u64) -> Option<EntityId> {
        if bits == 0 {
            return None;
        }
        let entity = EntityId::from_bits(bits);
        self.is_alive(entity).then_some(entity)
    }

    /// Attach or replace a component. Returns the previous value.
    pub fn insert_component<T: Component>(
        &mut self,
        entity: EntityId,
        value: T,
    ) -> Result<Option<T>, WorldError> {
        self.check_alive(entity)?;
        Ok(T::column_mut(&mut self.columns).insert(entity.index() as usize, value))
    }

    /// Detach a component, returning it.
    pub fn remove_component<T: Component>(
        &mut self,
        entity: EntityId,
    ) -> Result<Option<T>, WorldError> {
        self.check_alive(entity)?;
        Ok(T::column_mut(&mut self.columns).remove(entity.index() as usize))
    }

    /// Get an immutable reference to a component.
    ///
    /// Returns None if the entity is invalid or doesn't have the component.
    pub fn get_component<T: Component>(&self, entity: EntityId) -> Option<&T> {
        if !self.is_alive(entity) {
            return None;
        }
        T::column(&self.columns).get(entity.index() as usize)
    }

    /// Get a mutable reference to a component.
    ///
    /// Returns None if the entity is invalid or doesn't have the component.
    pub fn get_component_mut<T: Component>(&mut self, entity: EntityId) -> Option<&mut T> {
        if !self.is_alive(entity) {
            return None;
        }
        T::column_mut(&mut self.columns).get_mut(entity.index() as usize)
    }

    pub fn has_component<T: Component>(&self, entity: EntityId) -> bool {
        self.get_component::<T>(entity).is_some()
    }

    /// Presence check keyed by kind token rather than type.
    pub fn has_kind(&self, entity: EntityId, kind: ComponentKind) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        let slot = entity.index() as usize;
        match kind {
            ComponentKind::Tag => self.columns.tags.contains(slot),
            ComponentKind::Transform => self.columns.transforms.contains(slot),
            ComponentKind::Rigidbody => self.columns.rigidbodies.contains(slot),
            ComponentKind::Script => self.columns.scripts.contains(slot),
        }
    }

    /// Find a live entity by exact tag name.
    ///
    /// When several entities share a name, the one in the lowest slot wins.
    pub fn find_entity_by_name(&self, name: &str) -> Option<EntityId> {
        let tags = &self.columns.tags;
        tags.slots()
            .find(|&slot| tags.get(slot).is_some_and(|tag| tag.name == name))
            .map(|slot| self.id_at(slot))
    }

    /// Live entities carrying `kind`, in ascending slot order.
    pub fn entities_with(&self, kind: ComponentKind) -> Vec<EntityId> {
        let slots: Vec<usize> = match kind {
            ComponentKind::Tag => self.columns.tags.slots().collect(),
            ComponentKind::Transform => self.columns.transforms.slots().collect(),
            ComponentKind::Rigidbody => self.columns.rigidbodies.slots().collect(),
            ComponentKind::Script => self.columns.scripts.slots().collect(),
        };
        slots.into_iter().map(|slot| self.id_at(slot)).collect()
    }

    /// Get the number of live entities.
    pub fn live_entity_count(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Iterate over all live entity ids in slot order.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.alive)
            .map(|(index, slot)| EntityId::new(index as u32, slot.generation))
    }

    fn id_at(&self, slot: usize) -> EntityId {
        EntityId::new(slot as u32, self.slots[slot].generation)
    }

    fn check_alive(&self, entity: EntityId) -> Result<(), WorldError> {
        if self.is_alive(entity) {
            Ok(())
        } else {
            Err(WorldError::NoSuchEntity {
                bits: entity.to_bits(),
            })
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::{Rigidbody, ScriptComponent};
    use crate::math::Vec3;

    #[test]
    fn spawn_named_adds_default_components() {
        let mut world = World::new();
        let e = world.spawn_named("Player");

        assert!(world.has_kind(e, ComponentKind::Tag));
        assert!(world.has_kind(e, ComponentKind::Transform));
        assert!(!world.has_kind(e, ComponentKind::Rigidbody));
        assert_eq!(world.get_component::<Transform>(e), Some(&Transform::default()));
    }

    #[test]
    fn empty_name_falls_back_to_entity() {
        let mut world = World::new();
        let e = world.spawn_named("");
        assert_eq!(world.find_entity_by_name("Entity"), Some(e));
    }

    #[test]
    fn despawn_invalidates_stale_ids() {
        let mut world = World::new();
        let e1 = world.spawn_named("A");
        assert!(world.despawn(e1));
        assert!(!world.despawn(e1));

        // Slot is reused with a new generation.
        let e2 = world.spawn_named("B");
        assert_eq!(e1.index(), e2.index());
        assert_ne!(e1.generation(), e2.generation());

        assert!(!world.is_alive(e1));
        assert!(world.get_component::<Tag>(e1).is_none());
        assert_eq!(world.resolve(e1.to_bits()), None);
        assert_eq!(world.resolve(e2.to_bits()), Some(e2));
    }

    #[test]
    fn resolve_rejects_null_and_unknown() {
        let world = World::new();
        assert_eq!(world.resolve(0), None);
        assert_eq!(world.resolve(u64::MAX), None);
    }

    #[test]
    fn insert_and_remove_components() {
        let mut world = World::new();
        let e = world.spawn_named("Crate");

        assert_eq!(world.insert_component(e, Rigidbody::with_mass(2.0)), Ok(None));
        assert!(world.has_component::<Rigidbody>(e));

        world
            .get_component_mut::<Rigidbody>(e)
            .unwrap()
            .register_force(Vec3::Y);
        assert_eq!(world.get_component::<Rigidbody>(e).unwrap().net_force(), Vec3::Y);

        let removed = world.remove_component::<Rigidbody>(e).unwrap();
        assert_eq!(removed.map(|body| body.mass), Some(2.0));
        assert!(!world.has_kind(e, ComponentKind::Rigidbody));
    }

    #[test]
    fn mutating_a_dead_entity_fails() {
        let mut world = World::new();
        let e = world.spawn_named("Ghost");
        world.despawn(e);

        assert_eq!(
            world.insert_component(e, Transform::default()),
            Err(WorldError::NoSuchEntity { bits: e.to_bits() })
        );
    }

    #[test]
    fn duplicate_names_resolve_to_lowest_slot() {
        let mut world = World::new();
        let first = world.spawn_named("Enemy");
        let _second = world.spawn_named("Enemy");
        assert_eq!(world.find_entity_by_name("Enemy"), Some(first));
        assert_eq!(world.find_entity_by_name("enemy"), None);

        world.despawn(first);
        let third = world.spawn_named("Enemy");
        // Reused slot 0 is lower than the surviving slot 1.
        assert_eq!(world.find_entity_by_name("Enemy"), Some(third));
    }

    #[test]
    fn entities_with_kind_are_ordered() {
        let mut world = World::new();
        let a = crate::spawn!(world, Tag::new("a"), ScriptComponent::new("Player"));
        let _b = world.spawn_named("b");
        let c = world.spawn(EntityBuilder::new().named("c").with(ScriptComponent::new("Camera")));

        assert_eq!(world.entities_with(ComponentKind::Script), vec![a, c]);
        assert_eq!(world.live_entity_count(), 3);
        assert_eq!(world.entities().count(), 3);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn live_entities_resolve_and_dead_ones_never_do(count in 1usize..64, kill_every in 1usize..5) {
            let mut world = World::new();
            let ids: Vec<_> = (0..count).map(|i| world.spawn_named(&format!("e{i}"))).collect();

            let mut dead = Vec::new();
            for (i, id) in ids.iter().enumerate() {
                if i % kill_every == 0 {
                    prop_assert!(world.despawn(*id));
                    dead.push(*id);
                }
            }
            // Refill the freed slots so stale ids point at reused indices.
            let newcomers: Vec<_> = dead.iter().map(|_| world.spawn_named("new")).collect();

            for id in &dead {
                prop_assert_eq!(world.resolve(id.to_bits()), None);
                prop_assert!(!world.has_kind(*id, ComponentKind::Transform));
            }
            for id in ids.iter().filter(|id| !dead.contains(id)).chain(&newcomers) {
                prop_assert_ne!(id.to_bits(), 0);
                prop_assert_eq!(world.resolve(id.to_bits()), Some(*id));
            }
            prop_assert_eq!(world.live_entity_count(), count);
        }
    }
}
