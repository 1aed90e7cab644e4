//! Tether Services Layer
//!
//! Platform abstraction for input and settings.

pub mod input;
pub mod settings;

pub use input::{InputState, KeyCode};
pub use settings::{Settings, SettingsError};
