/// Fixed rasterizer policy for the cube pipeline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RasterizerConfig {
    pub polygon_mode: wgpu::PolygonMode,
    pub cull_mode: Option<wgpu::Face>,
    pub front_face: wgpu::FrontFace,
    /// Clip primitives against the near/far planes.
    pub depth_clip: bool,
}

impl Default for RasterizerConfig {
    /// Solid fill, back faces culled, clockwise front faces, depth clipping on.
    fn default() -> Self {
        Self {
            polygon_mode: wgpu::PolygonMode::Fill,
            cull_mode: Some(wgpu::Face::Back),
            front_face: wgpu::FrontFace::Cw,
            depth_clip: true,
        }
    }
}

impl RasterizerConfig {
    pub fn primitive_state(&self) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: self.front_face,
            cull_mode: self.cull_mode,
            polygon_mode: self.polygon_mode,
            unclipped_depth: !self.depth_clip,
            conservative: false,
        }
    }
}
