use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::camera::CameraSource;
use crate::device::{FrameStatus, Gpu, GpuInit, ResizeOutcome};
use crate::error::RenderError;
use crate::frame::{Dimensions, FrameController, ProjectionConfig};
use crate::input::InputSource;
use crate::scene::{SceneConfig, SceneResources};

/// Everything needed to draw the cube into one window.
///
/// Fields drop in declaration order: scene resources are released before the
/// device that created them.
pub struct Renderer<'w> {
    controller: FrameController,
    scene: SceneResources,
    gpu: Gpu<'w>,
}

impl<'w> Renderer<'w> {
    /// Creates the device and swap chain for `window`, then the scene resources.
    ///
    /// Blocks on adapter and device requests.
    pub fn new(
        window: &'w Window,
        gpu_init: GpuInit,
        scene_config: &SceneConfig,
        projection: ProjectionConfig,
    ) -> Result<Self, RenderError> {
        let gpu = pollster::block_on(Gpu::new(window, gpu_init))?;

        let info = gpu.adapter_info();
        log::info!("rendering on {} ({:?})", info.name, info.backend);

        let scene = SceneResources::new(gpu.device(), gpu.surface_format(), scene_config)?;

        Ok(Self {
            controller: FrameController::new(projection),
            scene,
            gpu,
        })
    }

    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }

    /// Resizes the swap chain; the next frame picks up the new aspect ratio.
    pub fn resize<I>(
        &mut self,
        new_size: PhysicalSize<u32>,
        input: &mut I,
    ) -> Result<ResizeOutcome, RenderError>
    where
        I: InputSource + ?Sized,
    {
        self.gpu.resize(new_size, input)
    }

    /// Updates the transforms for this frame, then draws and presents it.
    pub fn render_frame<C, I>(
        &mut self,
        camera: &mut C,
        input: &mut I,
    ) -> Result<FrameStatus, RenderError>
    where
        C: CameraSource + ?Sized,
        I: InputSource + ?Sized,
    {
        let (width, height) = self.gpu.surface_extent();

        self.controller.advance(
            self.gpu.queue(),
            &mut self.scene,
            Dimensions::new(width, height),
            camera,
            input,
        )?;

        self.gpu.present_frame(&self.scene)
    }
}
