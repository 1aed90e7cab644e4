// component.rs - Engine-owned component kinds
//
// Components are identified by a fixed `ComponentKind` token, not Rust TypeIds.
// The same token crosses the script boundary when a script asks whether an
// entity carries a component of some kind.

use crate::ecs::storage::{Column, Columns};
use crate::math::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type-identity token for every component category the engine stores.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u32)]
pub enum ComponentKind {
    Tag = 1,
    Transform = 2,
    Rigidbody = 3,
    Script = 4,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Tag,
        ComponentKind::Transform,
        ComponentKind::Rigidbody,
        ComponentKind::Script,
    ];

    /// Human-readable name for debugging.
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Tag => "Tag",
            ComponentKind::Transform => "Transform",
            ComponentKind::Rigidbody => "Rigidbody",
            ComponentKind::Script => "Script",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trait for engine-defined components.
///
/// Each implementor maps to exactly one `ComponentKind` and one column of
/// the world's storage. Implement through `define_component!`.
pub trait Component: 'static + Sized {
    /// Kind token reported across the script boundary.
    const KIND: ComponentKind;

    #[doc(hidden)]
    fn column(columns: &Columns) -> &Column<Self>;

    #[doc(hidden)]
    fn column_mut(columns: &mut Columns) -> &mut Column<Self>;
}

/// Helper macro to implement the Component trait.
///
/// # Example
/// ```ignore
/// define_component!(Transform, Transform, transforms);
/// ```
macro_rules! define_component {
    ($ty:ty, $kind:ident, $column:ident) => {
        impl $crate::ecs::Component for $ty {
            const KIND: $crate::ecs::ComponentKind = $crate::ecs::ComponentKind::$kind;

            fn column(columns: &$crate::ecs::storage::Columns) -> &$crate::ecs::storage::Column<Self> {
                &columns.$column
            }

            fn column_mut(
                columns: &mut $crate::ecs::storage::Columns,
            ) -> &mut $crate::ecs::storage::Column<Self> {
                &mut columns.$column
            }
        }
    };
}

/// Display name used for lookups by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

define_component!(Tag, Tag, tags);

/// Spatial placement. Rotation is Euler angles in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

define_component!(Transform, Transform, transforms);

/// Physics body. Forces registered during a tick are queued untouched until
/// the integrator drains them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rigidbody {
    pub mass: f32,
    pub velocity: Vec3,
    pub damping: f32,
    pub use_gravity: bool,
    #[serde(skip)]
    forces: Vec<Vec3>,
}

impl Rigidbody {
    pub fn with_mass(mass: f32) -> Self {
        Self {
            mass,
            ..Self::default()
        }
    }

    /// Default body that falls under `physics::GRAVITY`.
    pub fn falling() -> Self {
        Self {
            use_gravity: true,
            ..Self::default()
        }
    }

    /// Queue a force for the current tick.
    pub fn register_force(&mut self, force: Vec3) {
        self.forces.push(force);
    }

    /// Forces registered since the last integration step, in call order.
    pub fn pending_forces(&self) -> &[Vec3] {
        &self.forces
    }

    /// Sum of the pending forces.
    pub fn net_force(&self) -> Vec3 {
        self.forces.iter().copied().sum()
    }

    pub fn clear_forces(&mut self) {
        self.forces.clear();
    }
}

impl Default for Rigidbody {
    fn default() -> Self {
        Self {
            mass: 1.0,
            velocity: Vec3::ZERO,
            damping: 0.001,
            use_gravity: false,
            forces: Vec::new(),
        }
    }
}

define_component!(Rigidbody, Rigidbody, rigidbodies);

/// Marks an entity as driven by the script class registered under `class_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptComponent {
    pub class_name: String,
}

impl ScriptComponent {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
        }
    }
}

define_component!(ScriptComponent, Script, scripts);
