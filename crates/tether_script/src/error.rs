//! Script engine errors

use tether_core::ecs::WorldError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("script class `{class}` is already registered")]
    DuplicateClass { class: String },

    #[error("script class name must not be empty")]
    EmptyClassName,

    #[error("script class `{class}` is not registered")]
    UnknownClass { class: String },

    #[error("script runtime is already running")]
    AlreadyRunning,

    #[error(transparent)]
    World(#[from] WorldError),
}
