//! Math types shared with scripts
//!
//! Re-exports glam. `Vec3` is the value type passed by reference across the
//! script boundary for translations, rotations and forces.

pub use glam::*;
