/// High-level response after a surface error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// Surface was reconfigured; rendering resumes next frame.
    Reconfigured,
    /// Transient error; skip the current frame.
    SkipFrame,
    /// Unrecoverable (out of memory); the caller must shut down.
    Fatal,
}

/// What happened to a frame handed to [`Gpu::present_frame`](super::Gpu::present_frame).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameStatus {
    Presented,
    /// Nothing was drawn (zero-area window, unbound view, or transient surface error).
    Skipped,
}
