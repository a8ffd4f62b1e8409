use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::error::RenderError;
use crate::input::InputSource;
use crate::scene::SceneResources;

use super::adapter::select_adapter;
use super::scope::validated;
use super::surface::{self, BackBuffer, ResizeOutcome};
use super::{FrameStatus, GpuFrame, GpuInit, SurfaceErrorAction};

/// Background color of every frame.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.5,
    g: 0.5,
    b: 0.0,
    a: 1.0,
};

/// Owns wgpu core objects and the swap chain configuration.
///
/// This type is the low-level rendering context:
/// - selects a hardware adapter and creates Device/Queue
/// - creates and configures the Surface (swap chain)
/// - tracks the back-buffer view across resizes
/// - acquires, draws, and presents frames
///
/// Fields drop in declaration order, so the surface goes before the device
/// and the instance goes last.
pub struct Gpu<'w> {
    /// Surface bound to the window.
    ///
    /// Surface lifetime is tied to the window; the owner must ensure the window
    /// outlives the `Gpu` instance.
    surface: wgpu::Surface<'w>,

    /// Command queue.
    queue: wgpu::Queue,

    /// Logical device.
    device: wgpu::Device,

    /// Selected adapter.
    adapter: wgpu::Adapter,

    /// wgpu instance used to create the adapter and surface.
    instance: wgpu::Instance,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// Current drawable size in physical pixels.
    size: PhysicalSize<u32>,

    back_buffer: BackBuffer,
}

impl<'w> Gpu<'w> {
    /// Creates a GPU context bound to a window.
    ///
    /// Order: instance, surface, adapter (hardware only, exact feature level),
    /// device/queue, swap chain sized to the window's client area.
    pub async fn new(window: &'w Window, init: GpuInit) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            required_features,
            feature_level,
            adapter: adapter_policy,
            desired_maximum_frame_latency,
        } = init;

        // Debug builds turn on validation and debug labels.
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            flags: wgpu::InstanceFlags::from_build_config(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = select_adapter(&instance, &surface, &adapter_policy, &feature_level).await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("gyre device"),
                required_features,
                required_limits: feature_level.limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await?;

        log::debug!("device created at feature level `{}`", feature_level.name);

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&surface_caps, prefer_srgb).ok_or_else(|| {
            RenderError::SurfaceConfig {
                adapter: adapter.get_info().name,
            }
        })?;

        let alpha_mode = surface::choose_alpha_mode(&surface_caps, alpha_mode);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        log::info!(
            "swap chain {}x{} {:?}, {:?}",
            config.width,
            config.height,
            config.format,
            config.present_mode
        );

        Ok(Self {
            surface,
            queue,
            device,
            adapter,
            instance,
            config,
            size,
            back_buffer: BackBuffer::new(),
        })
    }

    /// Returns the active surface format.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the current drawable size (physical pixels).
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Returns the swap chain's configured extent.
    ///
    /// Never zero: a zero-area resize is deferred and keeps the last extent.
    pub fn surface_extent(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Returns a reference to the logical device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// Returns a reference to the command queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Returns the adapter the device was created on.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.adapter.get_info()
    }

    /// Resizes the swap chain in place and forwards the new size to `input`.
    ///
    /// Same size is a no-op. A zero-area size is stored but the swap chain keeps
    /// its previous configuration until a drawable size arrives. If the
    /// reconfigure fails the back-buffer view stays unbound and no frame is
    /// drawn until a later resize succeeds.
    pub fn resize<I>(
        &mut self,
        new_size: PhysicalSize<u32>,
        input: &mut I,
    ) -> Result<ResizeOutcome, RenderError>
    where
        I: InputSource + ?Sized,
    {
        let device = &self.device;
        let target = &self.surface;

        let outcome = surface::apply_resize(
            &mut self.config,
            &mut self.size,
            &mut self.back_buffer,
            new_size,
            input,
            |config| configure(device, target, config),
        )
        .map_err(|message| RenderError::Resize {
            width: new_size.width,
            height: new_size.height,
            message,
        })?;

        match outcome {
            ResizeOutcome::Unchanged => {}
            ResizeOutcome::Deferred => {
                log::debug!("resize to {}x{} deferred", new_size.width, new_size.height);
            }
            ResizeOutcome::Resized => {
                log::debug!(
                    "swap chain resized to {}x{} (view generation {})",
                    new_size.width,
                    new_size.height,
                    self.back_buffer.generation()
                );
            }
        }

        Ok(outcome)
    }

    /// Acquires the next surface texture and creates an encoder.
    pub fn begin_frame(&self) -> Result<GpuFrame, wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("gyre frame encoder"),
            });

        Ok(GpuFrame {
            surface_texture,
            view,
            encoder,
        })
    }

    /// Submits the recorded commands for the given frame and presents it.
    pub fn submit(&self, frame: GpuFrame) {
        let GpuFrame {
            surface_texture,
            view,
            encoder,
        } = frame;

        self.queue.submit(std::iter::once(encoder.finish()));
        drop(view);
        surface_texture.present();
    }

    /// Clears the back buffer, draws `scene` once, and presents with vsync.
    ///
    /// Constant buffer writes staged on the queue before this call are visible
    /// to the draw. Transient surface errors skip the frame; out-of-memory is
    /// returned as [`RenderError::Present`].
    pub fn present_frame(&mut self, scene: &SceneResources) -> Result<FrameStatus, RenderError> {
        if !self.back_buffer.is_bound() || self.size.width == 0 || self.size.height == 0 {
            return Ok(FrameStatus::Skipped);
        }

        let mut frame = match self.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                if self.handle_surface_error(&err)? == SurfaceErrorAction::Fatal {
                    return Err(RenderError::Present(err));
                }
                log::debug!("skipping frame: {err}");
                return Ok(FrameStatus::Skipped);
            }
        };

        let (width, height) = (self.config.width, self.config.height);

        {
            let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("gyre cube pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_viewport(0.0, 0.0, width as f32, height as f32, 0.0, 1.0);
            rpass.set_scissor_rect(0, 0, width, height);
            scene.draw(&mut rpass);
        }

        self.submit(frame);
        Ok(FrameStatus::Presented)
    }

    /// Converts a `SurfaceError` into a higher-level action, reconfiguring the
    /// surface when it was lost or outdated.
    ///
    /// A failed reconfigure is returned as [`RenderError::Resize`].
    pub fn handle_surface_error(
        &mut self,
        err: &wgpu::SurfaceError,
    ) -> Result<SurfaceErrorAction, RenderError> {
        let (device, target, config) = (&self.device, &self.surface, &self.config);

        surface::recover_surface(err, self.size, &mut self.back_buffer, || {
            configure(device, target, config)
        })
        .map_err(|message| RenderError::Resize {
            width: config.width,
            height: config.height,
            message,
        })
    }
}

/// Configures `surface` inside a validation scope.
fn configure(
    device: &wgpu::Device,
    surface: &wgpu::Surface<'_>,
    config: &wgpu::SurfaceConfiguration,
) -> Result<(), String> {
    match validated(device, || surface.configure(device, config)) {
        ((), None) => Ok(()),
        ((), Some(error)) => Err(error.to_string()),
    }
}

impl Drop for Gpu<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        if let Some(report) = self.instance.generate_report() {
            log::debug!("wgpu resources at teardown: {report:?}");
        }
    }
}
