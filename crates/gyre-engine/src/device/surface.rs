use winit::dpi::PhysicalSize;

use crate::input::InputSource;

use super::SurfaceErrorAction;

pub(crate) fn choose_surface_format(
    caps: &wgpu::SurfaceCapabilities,
    prefer_srgb: bool,
) -> Option<wgpu::TextureFormat> {
    if caps.formats.is_empty() {
        return None;
    }

    let preferred = if prefer_srgb {
        [
            wgpu::TextureFormat::Rgba8UnormSrgb,
            wgpu::TextureFormat::Bgra8UnormSrgb,
        ]
    } else {
        [
            wgpu::TextureFormat::Rgba8Unorm,
            wgpu::TextureFormat::Bgra8Unorm,
        ]
    };
    for f in preferred {
        if caps.formats.contains(&f) {
            return Some(f);
        }
    }

    Some(caps.formats[0])
}

pub(crate) fn choose_alpha_mode(
    caps: &wgpu::SurfaceCapabilities,
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| caps.alpha_modes.contains(m))
        .or_else(|| caps.alpha_modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Result of a resize request.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ResizeOutcome {
    /// Dimensions did not change; nothing was touched.
    Unchanged,
    /// Swap chain was reconfigured and the back-buffer view rebuilt.
    Resized,
    /// New size has zero area; reconfiguration waits for a drawable size.
    Deferred,
}

/// Tracks the back-buffer render-target view.
///
/// wgpu hands out a fresh texture view per acquired frame, so the view itself
/// is not stored. What is tracked is whether the current swap chain
/// configuration may be drawn into, and how many times it has been rebuilt.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BackBuffer {
    generation: u64,
    bound: bool,
}

impl BackBuffer {
    pub(crate) fn new() -> Self {
        Self {
            generation: 0,
            bound: true,
        }
    }

    /// Number of times the view has been rebuilt since initialization.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether frames may currently be rendered into the swap chain.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Unbinds the view before the swap chain is reconfigured.
    pub(crate) fn release(&mut self) {
        self.bound = false;
    }

    /// Rebinds the view after a successful reconfigure.
    pub(crate) fn rebuild(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.bound = true;
    }
}

/// Applies a new size to the stored configuration without touching the GPU.
///
/// Returns what the caller must do next: nothing, reconfigure, or wait. A
/// same-size request against an unbound view is not a no-op, so a failed
/// reconfigure can be retried.
pub(crate) fn plan_resize(
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    new_size: PhysicalSize<u32>,
    bound: bool,
) -> ResizeOutcome {
    let zero_area = new_size.width == 0 || new_size.height == 0;
    if *size == new_size && (bound || zero_area) {
        return ResizeOutcome::Unchanged;
    }

    *size = new_size;

    // wgpu rejects a 0x0 surface configuration.
    if zero_area {
        return ResizeOutcome::Deferred;
    }

    config.width = new_size.width;
    config.height = new_size.height;
    ResizeOutcome::Resized
}

/// Runs a whole resize: plan, reconfigure through `reconfigure`, track the
/// back-buffer view, and forward the new size to `input`.
///
/// `input` hears about Resized and Deferred outcomes only. When
/// `reconfigure` fails the view stays unbound and `input` is not told.
pub(crate) fn apply_resize<I, E>(
    config: &mut wgpu::SurfaceConfiguration,
    size: &mut PhysicalSize<u32>,
    back_buffer: &mut BackBuffer,
    new_size: PhysicalSize<u32>,
    input: &mut I,
    reconfigure: impl FnOnce(&wgpu::SurfaceConfiguration) -> Result<(), E>,
) -> Result<ResizeOutcome, E>
where
    I: InputSource + ?Sized,
{
    let outcome = plan_resize(config, size, new_size, back_buffer.is_bound());

    match outcome {
        ResizeOutcome::Unchanged => return Ok(outcome),
        ResizeOutcome::Deferred => {}
        ResizeOutcome::Resized => {
            back_buffer.release();
            reconfigure(config)?;
            back_buffer.rebuild();
        }
    }

    input.resize(new_size.width, new_size.height);
    Ok(outcome)
}

/// Classifies a frame acquisition error.
pub(crate) fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceErrorAction {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
        wgpu::SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
        wgpu::SurfaceError::Timeout => SurfaceErrorAction::SkipFrame,
        _ => SurfaceErrorAction::SkipFrame,
    }
}

/// Classifies `err` and, for a lost or outdated surface with a drawable
/// size, reconfigures it through `reconfigure`.
///
/// A failed reconfigure leaves the view unbound and is returned.
pub(crate) fn recover_surface<E>(
    err: &wgpu::SurfaceError,
    size: PhysicalSize<u32>,
    back_buffer: &mut BackBuffer,
    reconfigure: impl FnOnce() -> Result<(), E>,
) -> Result<SurfaceErrorAction, E> {
    let action = classify_surface_error(err);
    if action == SurfaceErrorAction::Reconfigured && size.width > 0 && size.height > 0 {
        back_buffer.release();
        reconfigure()?;
        back_buffer.rebuild();
    }
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::Dimensions;
    use crate::input::{InputState, MouseDelta};

    fn config(width: u32, height: u32) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: wgpu::TextureFormat::Rgba8Unorm,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: wgpu::CompositeAlphaMode::Opaque,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn caps(formats: Vec<wgpu::TextureFormat>) -> wgpu::SurfaceCapabilities {
        wgpu::SurfaceCapabilities {
            formats,
            alpha_modes: vec![wgpu::CompositeAlphaMode::Opaque],
            ..Default::default()
        }
    }

    /// Records every size forwarded through `InputSource::resize`.
    #[derive(Default)]
    struct SizeLog {
        state: InputState,
        sizes: Vec<(u32, u32)>,
    }

    impl InputSource for SizeLog {
        fn poll(&mut self) -> &InputState {
            &self.state
        }

        fn take_mouse_delta(&mut self) -> MouseDelta {
            MouseDelta::ZERO
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.sizes.push((width, height));
        }
    }

    struct Surface {
        cfg: wgpu::SurfaceConfiguration,
        size: PhysicalSize<u32>,
        back: BackBuffer,
        input: SizeLog,
        reconfigures: u32,
    }

    impl Surface {
        fn new(width: u32, height: u32) -> Self {
            Self {
                cfg: config(width, height),
                size: PhysicalSize::new(width, height),
                back: BackBuffer::new(),
                input: SizeLog::default(),
                reconfigures: 0,
            }
        }

        fn resize(&mut self, width: u32, height: u32) -> Result<ResizeOutcome, &'static str> {
            self.resize_with(width, height, Ok(()))
        }

        fn resize_with(
            &mut self,
            width: u32,
            height: u32,
            result: Result<(), &'static str>,
        ) -> Result<ResizeOutcome, &'static str> {
            let reconfigures = &mut self.reconfigures;
            apply_resize(
                &mut self.cfg,
                &mut self.size,
                &mut self.back,
                PhysicalSize::new(width, height),
                &mut self.input,
                |_| {
                    *reconfigures += 1;
                    result
                },
            )
        }

        fn aspect(&self) -> f32 {
            Dimensions::new(self.cfg.width, self.cfg.height).aspect()
        }
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_to_same_size_is_a_no_op() {
        let mut s = Surface::new(800, 600);

        for _ in 0..2 {
            assert_eq!(s.resize(800, 600), Ok(ResizeOutcome::Unchanged));
        }

        assert_eq!(s.size, PhysicalSize::new(800, 600));
        assert_eq!((s.cfg.width, s.cfg.height), (800, 600));
        assert_eq!(s.back.generation(), 0);
        assert!(s.back.is_bound());
        assert_eq!(s.reconfigures, 0);
        assert!(s.input.sizes.is_empty());
    }

    #[test]
    fn resize_rebuilds_view_and_forwards_size() {
        let mut s = Surface::new(800, 600);

        assert_eq!(s.resize(1024, 768), Ok(ResizeOutcome::Resized));
        assert_eq!((s.cfg.width, s.cfg.height), (1024, 768));
        assert_eq!(s.cfg.format, wgpu::TextureFormat::Rgba8Unorm);
        assert_eq!(s.cfg.desired_maximum_frame_latency, 2);
        assert_eq!(s.back.generation(), 1);
        assert!(s.back.is_bound());
        assert_eq!(s.input.sizes, vec![(1024, 768)]);

        assert_eq!(s.resize(1024, 768), Ok(ResizeOutcome::Unchanged));
        assert_eq!(s.back.generation(), 1);
        assert_eq!(s.input.sizes.len(), 1);
    }

    #[test]
    fn aspect_follows_the_configured_extent() {
        let mut s = Surface::new(1024, 1024);
        assert_eq!(s.aspect(), 1.0);

        s.resize(800, 600).unwrap();
        assert_eq!(s.aspect(), 800.0 / 600.0);

        s.resize(1920, 1080).unwrap();
        assert_eq!(s.aspect(), 1920.0 / 1080.0);
    }

    #[test]
    fn zero_area_defers_reconfigure() {
        let mut s = Surface::new(800, 600);

        assert_eq!(s.resize(0, 600), Ok(ResizeOutcome::Deferred));
        assert_eq!(s.size, PhysicalSize::new(0, 600));
        assert_eq!((s.cfg.width, s.cfg.height), (800, 600));
        assert_eq!(s.reconfigures, 0);
        assert_eq!(s.input.sizes, vec![(0, 600)]);
        assert_eq!(s.aspect(), 800.0 / 600.0);

        assert_eq!(s.resize(800, 600), Ok(ResizeOutcome::Resized));
        assert_eq!(s.reconfigures, 1);
        assert_eq!(s.input.sizes, vec![(0, 600), (800, 600)]);
    }

    #[test]
    fn failed_reconfigure_unbinds_view_and_can_be_retried() {
        let mut s = Surface::new(800, 600);

        assert_eq!(s.resize_with(1024, 768, Err("invalid extent")), Err("invalid extent"));
        assert!(!s.back.is_bound());
        assert!(s.input.sizes.is_empty());

        assert_eq!(s.resize(1024, 768), Ok(ResizeOutcome::Resized));
        assert!(s.back.is_bound());
        assert_eq!(s.back.generation(), 1);
        assert_eq!(s.reconfigures, 2);
        assert_eq!(s.input.sizes, vec![(1024, 768)]);
    }

    #[test]
    fn released_view_is_unbound_until_rebuilt() {
        let mut back = BackBuffer::new();
        back.release();
        assert!(!back.is_bound());
        assert_eq!(back.generation(), 0);
        back.rebuild();
        assert!(back.is_bound());
    }

    // ── format selection ──────────────────────────────────────────────────

    #[test]
    fn prefers_linear_formats_by_default() {
        let c = caps(vec![
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Bgra8Unorm,
        ]);
        assert_eq!(
            choose_surface_format(&c, false),
            Some(wgpu::TextureFormat::Bgra8Unorm)
        );
        assert_eq!(
            choose_surface_format(&c, true),
            Some(wgpu::TextureFormat::Bgra8UnormSrgb)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let c = caps(vec![wgpu::TextureFormat::Rgb10a2Unorm]);
        assert_eq!(
            choose_surface_format(&c, false),
            Some(wgpu::TextureFormat::Rgb10a2Unorm)
        );
        assert_eq!(choose_surface_format(&caps(vec![]), false), None);
    }

    #[test]
    fn unsupported_alpha_mode_falls_back() {
        let c = caps(vec![wgpu::TextureFormat::Rgba8Unorm]);
        assert_eq!(
            choose_alpha_mode(&c, Some(wgpu::CompositeAlphaMode::PreMultiplied)),
            wgpu::CompositeAlphaMode::Opaque
        );
    }

    // ── surface errors ────────────────────────────────────────────────────

    #[test]
    fn outdated_surface_is_reconfigured() {
        let mut back = BackBuffer::new();
        let action = recover_surface(
            &wgpu::SurfaceError::Outdated,
            PhysicalSize::new(800, 600),
            &mut back,
            || Ok::<(), &str>(()),
        );
        assert_eq!(action, Ok(SurfaceErrorAction::Reconfigured));
        assert!(back.is_bound());
        assert_eq!(back.generation(), 1);
    }

    #[test]
    fn failed_surface_recovery_is_reported() {
        let mut back = BackBuffer::new();
        let action = recover_surface(
            &wgpu::SurfaceError::Lost,
            PhysicalSize::new(800, 600),
            &mut back,
            || Err("invalid surface"),
        );
        assert_eq!(action, Err("invalid surface"));
        assert!(!back.is_bound());
    }

    #[test]
    fn transient_or_minimized_surfaces_are_not_reconfigured() {
        let mut back = BackBuffer::new();
        let mut calls = 0;

        let timeout = recover_surface(&wgpu::SurfaceError::Timeout, PhysicalSize::new(800, 600), &mut back, || {
            calls += 1;
            Ok::<(), &str>(())
        });
        assert_eq!(timeout, Ok(SurfaceErrorAction::SkipFrame));

        let minimized = recover_surface(&wgpu::SurfaceError::Outdated, PhysicalSize::new(0, 0), &mut back, || {
            calls += 1;
            Ok::<(), &str>(())
        });
        assert_eq!(minimized, Ok(SurfaceErrorAction::Reconfigured));

        assert_eq!(calls, 0);
        assert!(back.is_bound());
    }

    #[test]
    fn surface_errors_map_to_actions() {
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
        assert_eq!(
            classify_surface_error(&wgpu::SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
    }
}
