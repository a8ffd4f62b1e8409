//! GPU device + swap chain management.
//!
//! This module is responsible for:
//! - selecting a hardware adapter at the required feature level
//! - creating the wgpu Instance/Device/Queue
//! - creating & configuring the Surface (swap chain) and resizing it in place
//! - acquiring frames, issuing the cube draw, and presenting with vsync

mod adapter;
mod error;
mod frame;
mod gpu;
mod init;
mod scope;
mod surface;

pub use error::{FrameStatus, SurfaceErrorAction};
pub use frame::GpuFrame;
pub use gpu::{Gpu, CLEAR_COLOR};
pub use init::{AdapterPolicy, FeatureLevel, GpuInit};
pub use surface::ResizeOutcome;

pub(crate) use scope::validated;
