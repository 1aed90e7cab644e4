// storage.rs - Slot-indexed component columns
//
// Every component kind has one column. A column row is addressed by the
// entity's slot index; `None` means the entity in that slot lacks the kind.
// Liveness and generations are tracked by the world, not here.

use crate::ecs::{Rigidbody, ScriptComponent, Tag, Transform};

/// Storage for one component kind across all slots.
pub struct Column<T> {
    rows: Vec<Option<T>>,
}

impl<T> Column<T> {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        self.rows.get(slot).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.rows.get_mut(slot).and_then(Option::as_mut)
    }

    pub fn contains(&self, slot: usize) -> bool {
        self.get(slot).is_some()
    }

    /// Store a value, growing the column if needed. Returns the previous value.
    pub fn insert(&mut self, slot: usize, value: T) -> Option<T> {
        if slot >= self.rows.len() {
            self.rows.resize_with(slot + 1, || None);
        }
        self.rows[slot].replace(value)
    }

    pub fn remove(&mut self, slot: usize) -> Option<T> {
        self.rows.get_mut(slot).and_then(Option::take)
    }

    /// Occupied slots in ascending order.
    pub fn slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(slot, row)| row.as_ref().map(|_| slot))
    }

    pub fn len(&self) -> usize {
        self.rows.iter().filter(|row| row.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for Column<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One column per `ComponentKind`.
#[derive(Default)]
pub struct Columns {
    pub(crate) tags: Column<Tag>,
    pub(crate) transforms: Column<Transform>,
    pub(crate) rigidbodies: Column<Rigidbody>,
    pub(crate) scripts: Column<ScriptComponent>,
}

impl Columns {
    /// Drop every component stored for a slot.
    pub(crate) fn clear_slot(&mut self, slot: usize) {
        self.tags.remove(slot);
        self.transforms.remove(slot);
        self.rigidbodies.remove(slot);
        self.scripts.remove(slot);
    }
}
