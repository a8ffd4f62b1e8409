//! Ties the device, scene resources, and frame controller together.

mod renderer;

pub use renderer::Renderer;
