use glam::Mat4;
use winit::dpi::PhysicalSize;

/// Render target size in physical pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / height`; a zero height is treated as 1.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl From<PhysicalSize<u32>> for Dimensions {
    fn from(size: PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}

/// Projection and animation constants.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Elapsed milliseconds per radian of cube rotation.
    pub millis_per_radian: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y: std::f32::consts::FRAC_PI_2,
            near: 0.01,
            far: 100.0,
            millis_per_radian: 500.0,
        }
    }
}

impl ProjectionConfig {
    /// Rotation angle (radians) about Y after `elapsed_millis`.
    pub fn rotation_angle(&self, elapsed_millis: u64) -> f32 {
        (elapsed_millis as f64 / self.millis_per_radian as f64) as f32
    }

    /// Left-handed perspective projection with a 0..1 depth range.
    pub fn projection(&self, dims: Dimensions) -> Mat4 {
        Mat4::perspective_lh(self.fov_y, dims.aspect(), self.near, self.far)
    }
}

/// Matrices computed for one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTransforms {
    pub angle: f32,
    pub aspect: f32,
    pub world: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    /// `projection * view`: view applied first.
    pub view_proj: Mat4,
}
