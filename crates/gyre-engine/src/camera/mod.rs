//! Camera collaborator.
//!
//! The renderer only sees [`CameraSource`]; [`OrbitCamera`] is the reference
//! implementation used by the demo.

mod orbit;
mod source;

pub use orbit::OrbitCamera;
pub use source::CameraSource;
