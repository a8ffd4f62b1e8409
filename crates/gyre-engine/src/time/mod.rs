//! Time subsystem.
//!
//! Provides testable frame timing without coupling to the runtime:
//! - one `FrameClock` per frame controller, started at construction
//! - call `tick()` once per frame to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
