/// Initialization parameters for the GPU layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// Vertex colors are authored as plain unorm bytes, so the default is a
    /// linear (non-sRGB) back buffer.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO waits for vertical sync and is supported everywhere.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    pub required_features: wgpu::Features,

    /// Capability tier the device must provide.
    pub feature_level: FeatureLevel,

    /// Which adapters are eligible.
    pub adapter: AdapterPolicy,

    /// Number of frames that may be queued ahead of presentation.
    ///
    /// `2` gives a double-buffered swap chain.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: false,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            feature_level: FeatureLevel::core(),
            adapter: AdapterPolicy::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}

/// Adapter eligibility rules.
///
/// Software rasterizers are skipped by exact name match, and optionally by
/// device type.
#[derive(Debug, Clone)]
pub struct AdapterPolicy {
    pub excluded_names: Vec<String>,
    pub skip_cpu_devices: bool,
}

impl Default for AdapterPolicy {
    fn default() -> Self {
        Self {
            excluded_names: vec![
                "Microsoft Basic Render Driver".to_string(),
                "llvmpipe".to_string(),
            ],
            skip_cpu_devices: true,
        }
    }
}

impl AdapterPolicy {
    /// Returns `true` if an adapter with this name and type must not be used.
    pub fn rejects(&self, name: &str, device_type: wgpu::DeviceType) -> bool {
        if self.skip_cpu_devices && device_type == wgpu::DeviceType::Cpu {
            return true;
        }
        self.excluded_names.iter().any(|n| n == name)
    }
}

/// A named capability tier.
///
/// An adapter qualifies only if it provides every limit in `limits` and, when
/// requested, full WebGPU downlevel compliance. No lower tier is negotiated.
#[derive(Debug, Clone)]
pub struct FeatureLevel {
    pub name: &'static str,
    pub limits: wgpu::Limits,
    pub require_webgpu_compliance: bool,
}

impl FeatureLevel {
    /// Baseline WebGPU limits with full compliance.
    pub fn core() -> Self {
        Self {
            name: "webgpu-core",
            limits: wgpu::Limits::default(),
            require_webgpu_compliance: true,
        }
    }

    /// Checks the adapter's capabilities against this tier.
    ///
    /// Returns a short reason on mismatch.
    pub fn check(
        &self,
        adapter_limits: &wgpu::Limits,
        downlevel: &wgpu::DownlevelCapabilities,
    ) -> Result<(), String> {
        if !self.limits.check_limits(adapter_limits) {
            return Err("adapter limits are below the required tier".to_string());
        }
        if self.require_webgpu_compliance && !downlevel.is_webgpu_compliant() {
            return Err(format!(
                "missing downlevel capabilities {:?}",
                wgpu::DownlevelFlags::compliant() - downlevel.flags
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_render_driver_is_rejected_by_name() {
        let policy = AdapterPolicy::default();
        assert!(policy.rejects(
            "Microsoft Basic Render Driver",
            wgpu::DeviceType::DiscreteGpu
        ));
        assert!(!policy.rejects("NVIDIA GeForce RTX 3070", wgpu::DeviceType::DiscreteGpu));
    }

    #[test]
    fn name_match_is_exact() {
        let policy = AdapterPolicy {
            excluded_names: vec!["llvmpipe".to_string()],
            skip_cpu_devices: false,
        };
        assert!(policy.rejects("llvmpipe", wgpu::DeviceType::Other));
        assert!(!policy.rejects("llvmpipe (LLVM 17.0.6, 256 bits)", wgpu::DeviceType::Other));
    }

    #[test]
    fn cpu_devices_follow_policy() {
        let mut policy = AdapterPolicy {
            excluded_names: Vec::new(),
            skip_cpu_devices: true,
        };
        assert!(policy.rejects("SwiftShader", wgpu::DeviceType::Cpu));
        policy.skip_cpu_devices = false;
        assert!(!policy.rejects("SwiftShader", wgpu::DeviceType::Cpu));
    }

    #[test]
    fn core_level_accepts_compliant_adapter() {
        let level = FeatureLevel::core();
        let caps = wgpu::DownlevelCapabilities::default();
        assert!(level.check(&wgpu::Limits::default(), &caps).is_ok());
    }

    #[test]
    fn core_level_rejects_lower_tiers() {
        let level = FeatureLevel::core();
        let caps = wgpu::DownlevelCapabilities::default();
        assert!(level
            .check(&wgpu::Limits::downlevel_webgl2_defaults(), &caps)
            .is_err());

        let partial = wgpu::DownlevelCapabilities {
            flags: wgpu::DownlevelFlags::empty(),
            ..Default::default()
        };
        assert!(level.check(&wgpu::Limits::default(), &partial).is_err());
    }
}
