//! Input collaborator.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Runtime code translates platform events into `InputEvent`s (see `platform`).

mod frame;
pub(crate) mod platform;
mod source;
mod state;
mod tracker;
mod types;

pub use frame::InputFrame;
pub use source::InputSource;
pub use state::InputState;
pub use tracker::InputTracker;
pub use types::{InputEvent, Key, KeyState, MouseButton, MouseButtonState, MouseDelta};
