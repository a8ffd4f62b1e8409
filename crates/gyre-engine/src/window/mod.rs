//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, and wires platform
//! events to the input collaborator and the renderer.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
