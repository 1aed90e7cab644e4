//! Entity id with generational index
//!
//! Entity ids are lightweight handles (8 bytes) that reference data in the World.
//! The generation counter prevents use-after-free bugs.

/// Entity id (generation-indexed for safety)
///
/// Format: [32-bit generation | 32-bit index]
/// - Index: Position in the world's slot array
/// - Generation: Incremented on despawn (stale ids stop resolving)
///
/// Generations start at 1, so a live entity never encodes to `0`. The zero
/// bit pattern is reserved for "no entity" on the script side.
///
/// Example:
/// ```ignore
/// let entity = world.spawn_named("Player");
/// world.despawn(entity);
/// assert!(!world.is_alive(entity)); // generation mismatch
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    generation: u32,
    index: u32,
}

/// Generation assigned to a slot the first time it is used.
pub const FIRST_GENERATION: u32 = 1;

impl EntityId {
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { generation, index }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Serialize to 64-bit integer (script handles, save files)
    pub fn to_bits(&self) -> u64 {
        ((self.generation as u64) << 32) | (self.index as u64)
    }

    /// Deserialize from 64-bit integer.
    ///
    /// The result is only meaningful once validated against a world with
    /// [`World::resolve`](crate::ecs::World::resolve).
    pub fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_keep_index_and_generation() {
        let id = EntityId::new(7, 3);
        let bits = id.to_bits();
        assert_eq!(bits, (3u64 << 32) | 7);
        assert_eq!(EntityId::from_bits(bits), id);
    }

    #[test]
    fn first_generation_never_encodes_to_zero() {
        assert_ne!(EntityId::new(0, FIRST_GENERATION).to_bits(), 0);
    }
}
