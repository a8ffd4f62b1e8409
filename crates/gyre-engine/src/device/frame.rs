/// A single acquired swap chain image plus the encoder recording into it.
///
/// Short-lived: holding the surface texture blocks acquisition of the next
/// image, so the frame is consumed by [`Gpu::submit`](super::Gpu::submit).
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
