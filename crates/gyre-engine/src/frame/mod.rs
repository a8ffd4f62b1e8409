//! Per-frame transform updates.
//!
//! [`FrameController::compute`] is pure and drives the tests; [`FrameController::advance`]
//! adds the clock tick and the constant buffer writes.

mod controller;
mod transform;

pub use controller::FrameController;
pub use transform::{Dimensions, FrameTransforms, ProjectionConfig};
