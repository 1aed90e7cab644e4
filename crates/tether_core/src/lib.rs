//! Tether Engine Core
//!
//! Owns the authoritative simulation state that scripts reach through the
//! bridge in `tether_script`:
//! - Entity ids, components and the world that stores them
//! - Variable-step simulation time
//! - Math types shared across the script boundary
//! - Force accumulation and a minimal integrator

pub mod ecs;
pub mod math;
pub mod physics;
pub mod time;

pub use glam;

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
