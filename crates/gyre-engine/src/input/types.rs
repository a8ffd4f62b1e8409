/// Keyboard key identifier.
///
/// Only keys the camera and runtime react to are named. Everything else maps
/// to `Key::Unknown(u32)` with the platform key code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    W,
    A,
    S,
    D,
    Q,
    E,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

/// Relative mouse movement: `dx`/`dy` in raw device units, `dz` in wheel lines.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct MouseDelta {
    pub dx: f32,
    pub dy: f32,
    pub dz: f32,
}

impl MouseDelta {
    pub const ZERO: Self = Self {
        dx: 0.0,
        dy: 0.0,
        dz: 0.0,
    };

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0 && self.dz == 0.0
    }
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    PointerButton {
        button: MouseButton,
        state: MouseButtonState,
    },

    /// Raw relative motion, independent of cursor position and window bounds.
    MouseMotion { dx: f32, dy: f32 },

    /// Wheel movement in lines; pixel deltas are converted by the runtime.
    MouseWheel { lines: f32 },

    /// Window focus change.
    Focused(bool),
}
