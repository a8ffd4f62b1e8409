//! Error taxonomy for initialization and per-frame work.
//!
//! Every fallible step of the renderer returns [`RenderError`]; callers decide
//! whether to skip the frame or shut down.

use std::path::PathBuf;

/// Failure raised by device setup, resource creation, or frame submission.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Every enumerated adapter was filtered out (software fallback, cannot present).
    #[error("no suitable hardware adapter found ({rejected} rejected)")]
    NoSuitableAdapter { rejected: usize },

    /// The selected adapter does not meet the required feature level.
    #[error("adapter `{adapter}` does not support feature level {level}: {reason}")]
    FeatureLevel {
        adapter: String,
        level: &'static str,
        reason: String,
    },

    #[error("failed to create device/queue")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to create surface")]
    Surface(#[from] wgpu::CreateSurfaceError),

    /// The surface reports no usable format for the adapter.
    #[error("surface is not supported by adapter `{adapter}`")]
    SurfaceConfig { adapter: String },

    /// Reconfiguring the swap chain to a new size failed.
    #[error("failed to resize swap chain to {width}x{height}: {message}")]
    Resize {
        width: u32,
        height: u32,
        message: String,
    },

    #[error("failed to read shader `{}`", path.display())]
    ShaderIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to compile shader `{}`: {message}", path.display())]
    ShaderCompile { path: PathBuf, message: String },

    /// A buffer, layout, or pipeline could not be created.
    #[error("failed to create {label}: {message}")]
    Resource { label: &'static str, message: String },

    /// The staging view for a constant buffer write could not be obtained.
    #[error("failed to map constant buffer `{label}` for writing")]
    MapFailed { label: &'static str },

    /// Acquiring or presenting the next swap chain image failed fatally.
    #[error("failed to present frame")]
    Present(#[source] wgpu::SurfaceError),
}
