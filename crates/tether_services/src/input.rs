//! Input abstraction
//!
//! The platform layer feeds key transitions into `InputState`; scripts only
//! ever poll it. Polling is a plain snapshot read: no debouncing, no edge
//! detection, no toggling between calls.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Symbolic key identifiers (GLFW numbering).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u16)]
pub enum KeyCode {
    Space = 32,

    D0 = 48,
    D1 = 49,
    D2 = 50,
    D3 = 51,
    D4 = 52,
    D5 = 53,
    D6 = 54,
    D7 = 55,
    D8 = 56,
    D9 = 57,

    A = 65,
    B = 66,
    C = 67,
    D = 68,
    E = 69,
    F = 70,
    G = 71,
    H = 72,
    I = 73,
    J = 74,
    K = 75,
    L = 76,
    M = 77,
    N = 78,
    O = 79,
    P = 80,
    Q = 81,
    R = 82,
    S = 83,
    T = 84,
    U = 85,
    V = 86,
    W = 87,
    X = 88,
    Y = 89,
    Z = 90,

    Escape = 256,
    Enter = 257,
    Tab = 258,
    Backspace = 259,
    Right = 262,
    Left = 263,
    Down = 264,
    Up = 265,

    LeftShift = 340,
    LeftControl = 341,
    LeftAlt = 342,
    RightShift = 344,
    RightControl = 345,
    RightAlt = 346,
}

/// Current key state.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    down: HashSet<KeyCode>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: KeyCode) {
        self.down.insert(key);
    }

    pub fn release(&mut self, key: KeyCode) {
        self.down.remove(&key);
    }

    /// Release every key (e.g. on focus loss).
    pub fn clear(&mut self) {
        self.down.clear();
    }

    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.down.contains(&key)
    }

    /// Keys currently held, in code order.
    pub fn keys_down(&self) -> Vec<KeyCode> {
        let mut keys: Vec<_> = self.down.iter().copied().collect();
        keys.sort();
        keys
    }
}
