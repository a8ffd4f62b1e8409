use anyhow::{Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::camera::CameraSource;
use crate::device::{FrameStatus, GpuInit};
use crate::error::RenderError;
use crate::frame::ProjectionConfig;
use crate::input::platform::{translate_device_event, translate_window_event};
use crate::input::{InputEvent, InputSource, Key, KeyState};
use crate::render::Renderer;
use crate::scene::SceneConfig;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Client area size in physical pixels.
    pub initial_size: PhysicalSize<u32>,
    pub projection: ProjectionConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "gyre".to_string(),
            initial_size: PhysicalSize::new(800, 600),
            projection: ProjectionConfig::default(),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and renders until it is closed or Escape is pressed.
    ///
    /// Returns the first fatal rendering error, if any.
    pub fn run<C, I>(
        config: RuntimeConfig,
        gpu_init: GpuInit,
        scene: SceneConfig,
        camera: C,
        input: I,
    ) -> Result<()>
    where
        C: CameraSource + 'static,
        I: InputSource + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, scene, camera, input);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.finish()
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    renderer: Renderer<'this>,
}

struct AppState<C, I> {
    config: RuntimeConfig,
    gpu_init: GpuInit,
    scene: SceneConfig,

    camera: C,
    input: I,

    window: Option<WindowEntry>,
    exit_requested: bool,
    failure: Option<anyhow::Error>,
}

impl<C, I> AppState<C, I>
where
    C: CameraSource,
    I: InputSource,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, scene: SceneConfig, camera: C, input: I) -> Self {
        Self {
            config,
            gpu_init,
            scene,
            camera,
            input,
            window: None,
            exit_requested: false,
            failure: None,
        }
    }

    fn request_exit(&mut self, event_loop: &ActiveEventLoop) {
        self.exit_requested = true;
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.record_failure(err);
        self.request_exit(event_loop);
    }

    /// Keeps the first fatal error; later ones are only logged.
    fn record_failure(&mut self, err: anyhow::Error) {
        if self.failure.is_none() {
            self.failure = Some(err);
        }
    }

    /// Result of the run once the event loop has returned.
    fn finish(&mut self) -> Result<()> {
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();
        let scene = &self.scene;
        let projection = self.config.projection;

        let entry = WindowEntryTryBuilder {
            window,
            renderer_builder: |w| Renderer::new(w, gpu_init, scene, projection),
        }
        .try_build()
        .context("failed to initialize renderer")?;

        let (width, height) = entry.borrow_renderer().gpu().surface_extent();
        self.input.resize(width, height);

        self.window = Some(entry);
        Ok(())
    }

    fn resize_to(&mut self, new_size: PhysicalSize<u32>) -> Result<(), RenderError> {
        let Self { window, input, .. } = self;
        let Some(entry) = window.as_mut() else {
            return Ok(());
        };

        entry.with_renderer_mut(|r| r.resize(new_size, input))?;
        entry.with_window(|w| w.request_redraw());
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), RenderError> {
        let Self {
            window,
            camera,
            input,
            ..
        } = self;
        let Some(entry) = window.as_mut() else {
            return Ok(());
        };

        let status = entry.with_mut(|fields| {
            fields.window.pre_present_notify();
            fields.renderer.render_frame(camera, input)
        });

        // Per-frame deltas are consumed whether or not the frame reached the screen.
        input.end_frame();

        if status? == FrameStatus::Skipped {
            log::trace!("frame skipped");
        }
        Ok(())
    }
}

impl<C, I> ApplicationHandler for AppState<C, I>
where
    C: CameraSource,
    I: InputSource,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e.context("startup failed"));
            return;
        }

        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; presentation is paced by vsync.
        if let Some(entry) = &self.window {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = &self.window else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        if let Some(ev) = translate_window_event(&event) {
            if let InputEvent::Key {
                key: Key::Escape,
                state: KeyState::Pressed,
                ..
            } = ev
            {
                log::info!("escape pressed, exiting");
                self.request_exit(event_loop);
                return;
            }
            self.input.handle_event(&ev);
        }

        let result = match event {
            WindowEvent::CloseRequested => {
                self.request_exit(event_loop);
                Ok(())
            }

            WindowEvent::Resized(new_size) => self.resize_to(new_size),

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                self.resize_to(new_size)
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => Ok(()),
        };

        if let Err(err) = result {
            self.fail(event_loop, anyhow::Error::new(err).context("renderer stopped"));
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        // Raw motion arrives regardless of focus.
        if !self.input.poll().focused {
            return;
        }
        if let Some(ev) = translate_device_event(&event) {
            self.input.handle_event(&ev);
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Renderer (and its device) goes before the window it borrows.
        self.window = None;
    }
}
