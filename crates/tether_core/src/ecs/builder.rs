use crate::ecs::storage::Columns;
use crate::ecs::{Component, ComponentKind, Tag};

type Insert = Box<dyn FnOnce(&mut Columns, usize)>;

/// Builder for describing an entity prior to spawning.
///
/// Adding the same kind twice keeps the last value.
#[derive(Default)]
pub struct EntityBuilder {
    kinds: Vec<ComponentKind>,
    inserts: Vec<Insert>,
}

impl EntityBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            kinds: Vec::new(),
            inserts: Vec::new(),
        }
    }

    /// Shorthand for `with(Tag::new(name))`.
    pub fn named(self, name: impl Into<String>) -> Self {
        self.with(Tag::new(name))
    }

    /// Add a component by value.
    pub fn with<T: Component>(mut self, value: T) -> Self {
        if !self.kinds.contains(&T::KIND) {
            self.kinds.push(T::KIND);
        }
        self.inserts.push(Box::new(move |columns, slot| {
            T::column_mut(columns).insert(slot, value);
        }));
        self
    }

    /// Kinds this builder will attach.
    pub fn kinds(&self) -> &[ComponentKind] {
        &self.kinds
    }

    pub(crate) fn write(self, columns: &mut Columns, slot: usize) {
        for insert in self.inserts {
            insert(columns, slot);
        }
    }
}
