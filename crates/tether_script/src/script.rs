//! Script behaviour trait and the engine-held instance reference

use crate::entity::Entity;
use crate::ffi::InternalCalls;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tether_core::time::Timestep;

/// Behaviour attached to one entity.
///
/// The engine constructs the implementor through the factory registered with
/// [`ScriptEngine::register`](crate::ScriptEngine::register), which receives
/// the entity facade the script must keep and return from [`entity`](Self::entity).
/// Then `on_create` runs once, `on_update` once per tick, and `on_destroy`
/// once when the entity dies or the script is detached.
pub trait EntityScript: Any {
    fn entity(&self) -> &Entity;

    fn on_create(&mut self, _calls: &mut dyn InternalCalls) {}

    fn on_update(&mut self, _calls: &mut dyn InternalCalls, _ts: Timestep) {}

    fn on_destroy(&mut self, _calls: &mut dyn InternalCalls) {}
}

/// Opaque, cloneable reference to a live script instance.
///
/// Both fields point at the same allocation: one view for dispatch through
/// the trait, one for checked downcasts to the concrete class.
#[derive(Clone)]
pub struct ScriptObject {
    class_name: Rc<str>,
    behaviour: Rc<RefCell<dyn EntityScript>>,
    concrete: Rc<dyn Any>,
}

impl ScriptObject {
    pub fn new<T: EntityScript>(class_name: &str, script: T) -> Self {
        let instance = Rc::new(RefCell::new(script));
        Self {
            class_name: Rc::from(class_name),
            behaviour: instance.clone(),
            concrete: instance,
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Whether the instance's concrete type is `T`.
    pub fn is<T: EntityScript>(&self) -> bool {
        (*self.concrete).is::<RefCell<T>>()
    }

    /// The instance as its concrete type, or None on a type mismatch.
    ///
    /// The instance is mutably borrowed while its own callback runs, so a
    /// script reaching itself this way must use `try_borrow`/`try_borrow_mut`.
    pub fn downcast<T: EntityScript>(&self) -> Option<Rc<RefCell<T>>> {
        self.concrete.clone().downcast::<RefCell<T>>().ok()
    }

    pub fn ptr_eq(&self, other: &ScriptObject) -> bool {
        Rc::ptr_eq(&self.concrete, &other.concrete)
    }

    pub(crate) fn behaviour(&self) -> &Rc<RefCell<dyn EntityScript>> {
        &self.behaviour
    }
}

impl fmt::Debug for ScriptObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptObject")
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ffi::EntityHandle;

    struct Door {
        entity: Entity,
        open: bool,
    }

    impl EntityScript for Door {
        fn entity(&self) -> &Entity {
            &self.entity
        }
    }

    struct Lamp {
        entity: Entity,
    }

    impl EntityScript for Lamp {
        fn entity(&self) -> &Entity {
            &self.entity
        }
    }

    #[test]
    fn downcast_checks_concrete_type() {
        let object = ScriptObject::new(
            "Door",
            Door {
                entity: Entity::from_handle(EntityHandle(7)),
                open: false,
            },
        );

        assert!(object.is::<Door>());
        assert!(!object.is::<Lamp>());
        assert!(object.downcast::<Lamp>().is_none());

        let door = object.downcast::<Door>().unwrap();
        door.borrow_mut().open = true;
        assert!(object.downcast::<Door>().unwrap().borrow().open);
        assert_eq!(door.borrow().entity().id(), EntityHandle(7));
    }

    #[test]
    fn dispatch_view_and_concrete_view_share_the_instance() {
        let object = ScriptObject::new(
            "Lamp",
            Lamp {
                entity: Entity::from_handle(EntityHandle(3)),
            },
        );
        let clone = object.clone();

        assert!(object.ptr_eq(&clone));
        assert_eq!(object.behaviour().borrow().entity().id(), EntityHandle(3));

        let _held = object.behaviour().borrow_mut();
        assert!(clone.downcast::<Lamp>().unwrap().try_borrow().is_err());
    }
}
