//! Entity Component System core types.
//!
//! The world is the single owner of entity and component data. Scripts never
//! hold references into it; they hold 64-bit handles that the world
//! re-validates on every access.

mod builder;
mod component;
mod entity;
pub mod storage;
mod world;

pub use builder::EntityBuilder;
pub use component::{Component, ComponentKind, Rigidbody, ScriptComponent, Tag, Transform};
pub use entity::{EntityId, FIRST_GENERATION};
pub use world::{World, WorldError};

/// Spawn an entity into the world using builder-style component construction.
#[macro_export]
macro_rules! spawn {
    ($world:expr $(, $component:expr)+ $(,)?) => {{
        let builder = {
            let mut builder = $crate::ecs::EntityBuilder::new();
            $(
                builder = builder.with($component);
            )+
            builder
        };
        $world.spawn(builder)
    }};
}
