use std::path::{Path, PathBuf};

use crate::device::validated;
use crate::error::RenderError;

/// Environment variable that overrides [`ShaderPaths::dir`].
pub const SHADER_DIR_ENV: &str = "GYRE_SHADER_DIR";

pub const VERTEX_ENTRY: &str = "vs";
pub const PIXEL_ENTRY: &str = "ps";

/// Location of the two WGSL sources compiled at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderPaths {
    pub dir: PathBuf,
    pub vertex: String,
    pub pixel: String,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self::in_dir("shaders")
    }
}

impl ShaderPaths {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            vertex: "vertex-shader.wgsl".to_string(),
            pixel: "pixel-shader.wgsl".to_string(),
        }
    }

    /// Uses `$GYRE_SHADER_DIR` when set, `fallback` otherwise.
    pub fn from_env_or(fallback: impl Into<PathBuf>) -> Self {
        match std::env::var_os(SHADER_DIR_ENV) {
            Some(dir) if !dir.is_empty() => Self::in_dir(dir),
            _ => Self::in_dir(fallback),
        }
    }

    pub fn vertex_path(&self) -> PathBuf {
        self.dir.join(&self.vertex)
    }

    pub fn pixel_path(&self) -> PathBuf {
        self.dir.join(&self.pixel)
    }
}

/// Compiled vertex + pixel shader pair.
pub struct CompiledShaders {
    pub vertex: wgpu::ShaderModule,
    pub pixel: wgpu::ShaderModule,
}

impl CompiledShaders {
    pub fn compile(device: &wgpu::Device, paths: &ShaderPaths) -> Result<Self, RenderError> {
        let vertex = compile_file(device, &paths.vertex_path(), "gyre vertex shader")?;
        let pixel = compile_file(device, &paths.pixel_path(), "gyre pixel shader")?;
        Ok(Self { vertex, pixel })
    }
}

pub(crate) fn read_source(path: &Path) -> Result<String, RenderError> {
    std::fs::read_to_string(path).map_err(|source| RenderError::ShaderIo {
        path: path.to_path_buf(),
        source,
    })
}

fn compile_file(
    device: &wgpu::Device,
    path: &Path,
    label: &'static str,
) -> Result<wgpu::ShaderModule, RenderError> {
    let source = read_source(path)?;
    log::debug!("compiling {} ({} bytes)", path.display(), source.len());

    let (module, error) = validated(device, || {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        })
    });

    match error {
        Some(e) => Err(RenderError::ShaderCompile {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        None => Ok(module),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_point_at_shader_dir() {
        let paths = ShaderPaths::default();
        assert_eq!(paths.vertex_path(), Path::new("shaders").join("vertex-shader.wgsl"));
        assert_eq!(paths.pixel_path(), Path::new("shaders").join("pixel-shader.wgsl"));
    }

    #[test]
    fn missing_source_reports_path() {
        let err = read_source(Path::new("does/not/exist.wgsl")).unwrap_err();
        match err {
            RenderError::ShaderIo { path, .. } => assert_eq!(path, Path::new("does/not/exist.wgsl")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bundled_sources_declare_entry_points() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../shaders");
        let paths = ShaderPaths::in_dir(dir);

        let vs = read_source(&paths.vertex_path()).unwrap();
        assert!(vs.contains(&format!("fn {VERTEX_ENTRY}(")));

        let ps = read_source(&paths.pixel_path()).unwrap();
        assert!(ps.contains(&format!("fn {PIXEL_ENTRY}(")));
    }
}
