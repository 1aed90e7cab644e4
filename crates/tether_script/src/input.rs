//! Script-side input queries

use crate::ffi::InternalCalls;
use tether_services::input::KeyCode;

/// Keyboard polling for scripts.
pub struct Input;

impl Input {
    /// Whether `key` is held right now. Asking twice in the same tick gives
    /// the same answer unless the engine's input state changed in between.
    pub fn is_key_down(calls: &mut dyn InternalCalls, key: KeyCode) -> bool {
        calls.input_is_key_down(key)
    }

    /// -1, 0 or 1 from a pair of opposing keys. `negative` wins when both are held.
    pub fn axis(calls: &mut dyn InternalCalls, negative: KeyCode, positive: KeyCode) -> f32 {
        if Self::is_key_down(calls, negative) {
            -1.0
        } else if Self::is_key_down(calls, positive) {
            1.0
        } else {
            0.0
        }
    }
}
