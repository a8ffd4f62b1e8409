//! Static and per-frame GPU resources for the cube.
//!
//! Everything here is created once at startup: immutable mesh buffers, the
//! compiled shader pair, constant buffers, and the pipeline that folds in the
//! vertex layout and rasterizer state.

pub mod mesh;
mod raster;
mod resources;
mod shaders;
mod uniforms;

pub use mesh::{Vertex, CUBE_INDICES, CUBE_VERTICES};
pub use raster::RasterizerConfig;
pub use resources::{SceneConfig, SceneResources};
pub use shaders::{CompiledShaders, ShaderPaths, PIXEL_ENTRY, SHADER_DIR_ENV, VERTEX_ENTRY};
pub use uniforms::{SceneMatrixBuffer, SlotCursor, WorldMatrixBuffer, SCENE_SLOTS};
