use anyhow::Result;

use gyre_engine::camera::OrbitCamera;
use gyre_engine::device::GpuInit;
use gyre_engine::input::InputTracker;
use gyre_engine::logging::{init_logging, LoggingConfig};
use gyre_engine::scene::{SceneConfig, ShaderPaths};
use gyre_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    // `GYRE_SHADER_DIR` overrides the checked-in shader directory.
    let scene = SceneConfig {
        shaders: ShaderPaths::from_env_or(concat!(env!("CARGO_MANIFEST_DIR"), "/../../shaders")),
        ..Default::default()
    };

    log::info!("drag with the left mouse button to orbit, wheel or Q/E to zoom, Escape to quit");

    Runtime::run(
        RuntimeConfig::default(),
        GpuInit::default(),
        scene,
        OrbitCamera::default(),
        InputTracker::new(),
    )
}
