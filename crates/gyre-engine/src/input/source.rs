use super::state::InputState;
use super::types::{InputEvent, MouseDelta};

/// Input collaborator consumed by the frame controller and the device.
///
/// The runtime feeds platform events in through [`handle_event`](Self::handle_event);
/// the renderer only polls.
pub trait InputSource {
    /// Records a translated platform event.
    fn handle_event(&mut self, event: &InputEvent) {
        let _ = event;
    }

    /// Returns the current held-key / held-button state.
    fn poll(&mut self) -> &InputState;

    /// Returns `(dx, dy, dz)` accumulated since the previous call and resets it.
    fn take_mouse_delta(&mut self) -> MouseDelta;

    /// Called after the swap chain has been resized.
    fn resize(&mut self, width: u32, height: u32);

    /// Called once the frame has been presented.
    fn end_frame(&mut self) {}
}
