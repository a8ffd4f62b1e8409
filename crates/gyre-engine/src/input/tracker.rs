use super::frame::InputFrame;
use super::source::InputSource;
use super::state::InputState;
use super::types::{InputEvent, Key, MouseDelta};

/// Reference [`InputSource`]: accumulates runtime events between frames.
#[derive(Debug, Default)]
pub struct InputTracker {
    state: InputState,
    frame: InputFrame,
    size: (u32, u32),
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last size reported through [`InputSource::resize`].
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Whether `key` went down since the last [`InputSource::end_frame`].
    pub fn pressed(&self, key: Key) -> bool {
        self.frame.keys_pressed.contains(&key)
    }
}

impl InputSource for InputTracker {
    fn handle_event(&mut self, event: &InputEvent) {
        self.state.apply_event(&mut self.frame, event);
    }

    fn poll(&mut self) -> &InputState {
        &self.state
    }

    fn take_mouse_delta(&mut self) -> MouseDelta {
        self.frame.take_mouse_delta()
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn end_frame(&mut self) {
        self.frame.clear();
    }
}
