use crate::error::RenderError;

use super::{AdapterPolicy, FeatureLevel};

/// Picks the first hardware adapter that can present to `surface`.
///
/// Adapters rejected by `policy` (software fallbacks) are skipped. The chosen
/// adapter must then satisfy `level` exactly; there is no fallback to a lower tier.
pub(crate) async fn select_adapter(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'_>,
    policy: &AdapterPolicy,
    level: &FeatureLevel,
) -> Result<wgpu::Adapter, RenderError> {
    let adapters = instance.enumerate_adapters(wgpu::Backends::all()).await;

    let mut rejected = 0;
    let mut selected = None;
    for adapter in adapters {
        let info = adapter.get_info();

        if policy.rejects(&info.name, info.device_type) {
            log::debug!("skipping software adapter `{}` ({:?})", info.name, info.backend);
            rejected += 1;
            continue;
        }

        if !adapter.is_surface_supported(surface) {
            log::debug!("skipping adapter `{}`: cannot present to surface", info.name);
            rejected += 1;
            continue;
        }

        selected = Some(adapter);
        break;
    }

    let adapter = selected.ok_or(RenderError::NoSuitableAdapter { rejected })?;
    let info = adapter.get_info();

    level
        .check(&adapter.limits(), &adapter.get_downlevel_capabilities())
        .map_err(|reason| RenderError::FeatureLevel {
            adapter: info.name.clone(),
            level: level.name,
            reason,
        })?;

    log::info!(
        "using adapter `{}` ({:?}, {} backend)",
        info.name,
        info.device_type,
        info.backend.to_str()
    );

    Ok(adapter)
}
