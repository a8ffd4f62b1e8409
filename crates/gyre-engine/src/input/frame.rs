use std::collections::HashSet;

use super::types::{Key, MouseDelta};

/// Per-frame input deltas.
///
/// `InputState` provides the current state (held keys/buttons).
/// `InputFrame` collects what happened since the last frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys pressed this frame.
    pub keys_pressed: HashSet<Key>,

    /// Mouse motion and wheel accumulated this frame.
    pub mouse_delta: MouseDelta,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
        self.mouse_delta = MouseDelta::ZERO;
    }

    /// Returns the accumulated motion and resets it.
    pub fn take_mouse_delta(&mut self) -> MouseDelta {
        std::mem::take(&mut self.mouse_delta)
    }
}
