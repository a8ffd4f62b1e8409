use glam::Mat4;

use crate::camera::CameraSource;
use crate::error::RenderError;
use crate::input::InputSource;
use crate::scene::{SceneMatrixBuffer, SceneResources, WorldMatrixBuffer};
use crate::time::{FrameClock, FrameTime};

use super::transform::{Dimensions, FrameTransforms, ProjectionConfig};

/// Per-frame transform update.
///
/// Samples input and camera, derives the world and view-projection matrices
/// from elapsed time, and stages them into the scene's constant buffers.
#[derive(Debug, Clone, Default)]
pub struct FrameController {
    clock: FrameClock,
    projection: ProjectionConfig,
}

impl FrameController {
    pub fn new(projection: ProjectionConfig) -> Self {
        Self {
            clock: FrameClock::new(),
            projection,
        }
    }

    pub fn projection(&self) -> &ProjectionConfig {
        &self.projection
    }

    /// Computes the transforms for one frame without touching the GPU.
    ///
    /// The camera is polled before the mouse delta is applied, and the delta
    /// is taken exactly once per frame.
    pub fn compute<C, I>(
        &self,
        camera: &mut C,
        input: &mut I,
        time: FrameTime,
        dims: Dimensions,
    ) -> FrameTransforms
    where
        C: CameraSource + ?Sized,
        I: InputSource + ?Sized,
    {
        camera.poll(input.poll(), time.dt);
        let delta = input.take_mouse_delta();
        camera.apply_mouse_delta(delta);

        let angle = self.projection.rotation_angle(time.elapsed_millis());
        let world = Mat4::from_rotation_y(angle);

        let view = camera.view();
        let projection = self.projection.projection(dims);

        FrameTransforms {
            angle,
            aspect: dims.aspect(),
            world,
            view,
            projection,
            view_proj: projection * view,
        }
    }

    /// Ticks the clock, computes this frame's transforms, and writes them
    /// into `scene`'s world buffer and next scene slot.
    pub fn advance<C, I>(
        &mut self,
        queue: &wgpu::Queue,
        scene: &mut SceneResources,
        dims: Dimensions,
        camera: &mut C,
        input: &mut I,
    ) -> Result<FrameTransforms, RenderError>
    where
        C: CameraSource + ?Sized,
        I: InputSource + ?Sized,
    {
        let time = self.clock.tick();
        let transforms = self.compute(camera, input, time, dims);

        scene.write_world(queue, &WorldMatrixBuffer::new(transforms.world));
        scene.write_scene(queue, &SceneMatrixBuffer::new(transforms.view_proj))?;

        if time.frame_index % 600 == 0 {
            log::trace!(
                "frame {} angle {:.3} aspect {:.3}",
                time.frame_index,
                transforms.angle,
                transforms.aspect
            );
        }

        Ok(transforms)
    }
}
