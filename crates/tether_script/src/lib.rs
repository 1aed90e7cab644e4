//! Tether Scripting Bridge
//!
//! Lets entity scripts read and mutate engine-owned state without owning it.
//!
//! ## Architecture
//!
//! - **Handles:** scripts hold [`EntityHandle`]s, never references into the world
//! - **Boundary:** every read or write is one call on [`InternalCalls`];
//!   [`SceneCalls`] answers them from the live [`World`](tether_core::ecs::World)
//! - **Proxies:** [`TransformComponent`] and [`RigidbodyComponent`] forward
//!   property access for one component kind on one entity
//! - **Facade:** [`Entity`] discovers components, other entities and the
//!   typed script attached to an entity
//! - **Lifecycle:** [`ScriptEngine`] creates one instance per scripted entity
//!   and drives `on_create` / `on_update` / `on_destroy` from the engine tick
//!
//! ```ignore
//! struct Mover { entity: Entity, speed: f32 }
//!
//! impl EntityScript for Mover {
//!     fn entity(&self) -> &Entity { &self.entity }
//!
//!     fn on_update(&mut self, calls: &mut dyn InternalCalls, ts: Timestep) {
//!         let position = self.entity.position(calls);
//!         self.entity.set_position(calls, position + Vec3::X * self.speed * ts.seconds());
//!     }
//! }
//!
//! engine.register("Mover", |entity| Mover { entity, speed: 2.0 })?;
//! ```

pub mod component;
pub mod entity;
pub mod error;
pub mod ffi;
pub mod glue;
pub mod input;
pub mod runtime;
pub mod script;

#[cfg(test)]
mod testing;

pub use component::{ComponentProxy, RigidbodyComponent, TransformComponent};
pub use entity::Entity;
pub use error::ScriptError;
pub use ffi::{EntityHandle, InternalCalls};
pub use glue::SceneCalls;
pub use input::Input;
pub use runtime::{ScriptEngine, ScriptState, ScriptTable};
pub use script::{EntityScript, ScriptObject};

pub use tether_core;
pub use tether_services;

/// Everything a script author needs in one import.
pub mod prelude {
    pub use crate::{
        ComponentProxy, Entity, EntityHandle, EntityScript, Input, InternalCalls,
        RigidbodyComponent, TransformComponent,
    };
    pub use tether_core::ecs::ComponentKind;
    pub use tether_core::math::Vec3;
    pub use tether_core::time::Timestep;
    pub use tether_services::input::KeyCode;
}
