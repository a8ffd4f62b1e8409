use glam::Mat4;

use crate::input::{InputState, MouseDelta};

/// Camera collaborator consumed by the frame controller.
pub trait CameraSource {
    /// Samples held keys/buttons for this frame; `dt` is seconds since the last frame.
    fn poll(&mut self, input: &InputState, dt: f32);

    /// Feeds the mouse movement accumulated since the previous frame.
    fn apply_mouse_delta(&mut self, delta: MouseDelta);

    /// Current world-to-view transform (left-handed, +Z forward).
    fn view(&self) -> Mat4;
}
