//! Gyre engine crate.
//!
//! Renders a single vertex-colored cube spinning about its Y axis, viewed
//! through a pluggable camera, into one window with vsync.
//!
//! - [`device`]: adapter selection, device, swap chain, resize, present
//! - [`scene`]: cube mesh, shaders, pipeline state, constant buffers
//! - [`frame`]: per-frame world and view-projection updates
//! - [`render`]: ties the three together for one window
//! - [`window`]: the winit event loop

pub mod camera;
pub mod device;
pub mod error;
pub mod frame;
pub mod input;
pub mod logging;
pub mod render;
pub mod scene;
pub mod time;
pub mod window;

pub use error::RenderError;
