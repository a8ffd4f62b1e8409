use wgpu::util::DeviceExt;

use crate::device::validated;
use crate::error::RenderError;

use super::mesh::{Vertex, CUBE_INDICES, CUBE_VERTICES};
use super::raster::RasterizerConfig;
use super::shaders::{CompiledShaders, ShaderPaths, PIXEL_ENTRY, VERTEX_ENTRY};
use super::uniforms::{SceneMatrixBuffer, SlotCursor, WorldMatrixBuffer, SCENE_SLOTS};

/// Scene construction parameters.
#[derive(Debug, Clone, Default)]
pub struct SceneConfig {
    pub shaders: ShaderPaths,
    pub rasterizer: RasterizerConfig,
}

/// GPU-side resources for the cube, created once at startup.
///
/// Vertex and index buffers are immutable. The world buffer is rewritten every
/// frame through the queue; scene buffers rotate through [`SCENE_SLOTS`] slots.
pub struct SceneResources {
    pipeline: wgpu::RenderPipeline,

    bind_groups: Vec<wgpu::BindGroup>,
    scene_buffers: Vec<wgpu::Buffer>,
    world_buffer: wgpu::Buffer,

    index_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,

    cursor: SlotCursor,
    current_slot: usize,
}

impl SceneResources {
    /// Builds mesh buffers, compiles shaders, and creates the constant buffers
    /// and pipeline for `surface_format`.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        config: &SceneConfig,
    ) -> Result<Self, RenderError> {
        let vertex_buffer = checked(device, "cube vertex buffer", || {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("gyre cube vbo"),
                contents: bytemuck::cast_slice(&CUBE_VERTICES),
                usage: wgpu::BufferUsages::VERTEX,
            })
        })?;

        let index_buffer = checked(device, "cube index buffer", || {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("gyre cube ibo"),
                contents: bytemuck::cast_slice(&CUBE_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            })
        })?;

        log::info!(
            "loading shaders from {} ({}, {})",
            config.shaders.dir.display(),
            config.shaders.vertex,
            config.shaders.pixel
        );
        let shaders = CompiledShaders::compile(device, &config.shaders)?;

        let world_buffer = checked(device, "world matrix buffer", || {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("gyre world ubo"),
                contents: bytemuck::bytes_of(&WorldMatrixBuffer::default()),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            })
        })?;

        let scene_buffers = checked(device, "scene matrix buffers", || {
            (0..SCENE_SLOTS)
                .map(|_| {
                    device.create_buffer(&wgpu::BufferDescriptor {
                        label: Some("gyre scene ubo"),
                        size: std::mem::size_of::<SceneMatrixBuffer>() as u64,
                        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                        mapped_at_creation: false,
                    })
                })
                .collect::<Vec<_>>()
        })?;

        let bind_group_layout = checked(device, "constant buffer layout", || {
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("gyre cube bgl"),
                entries: &[
                    uniform_entry(0, std::mem::size_of::<WorldMatrixBuffer>()),
                    uniform_entry(1, std::mem::size_of::<SceneMatrixBuffer>()),
                ],
            })
        })?;

        let bind_groups = checked(device, "constant buffer bindings", || {
            scene_buffers
                .iter()
                .map(|scene_buffer| {
                    device.create_bind_group(&wgpu::BindGroupDescriptor {
                        label: Some("gyre cube bind group"),
                        layout: &bind_group_layout,
                        entries: &[
                            wgpu::BindGroupEntry {
                                binding: 0,
                                resource: world_buffer.as_entire_binding(),
                            },
                            wgpu::BindGroupEntry {
                                binding: 1,
                                resource: scene_buffer.as_entire_binding(),
                            },
                        ],
                    })
                })
                .collect::<Vec<_>>()
        })?;

        // Vertex inputs are validated against the vertex shader here, so a layout
        // mismatch surfaces as a pipeline creation error.
        let pipeline = checked(device, "cube pipeline", || {
            let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("gyre cube pipeline layout"),
                bind_group_layouts: &[&bind_group_layout],
                immediate_size: 0,
            });

            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some("gyre cube pipeline"),
                layout: Some(&pipeline_layout),

                vertex: wgpu::VertexState {
                    module: &shaders.vertex,
                    entry_point: Some(VERTEX_ENTRY),
                    compilation_options: Default::default(),
                    buffers: &[Vertex::layout()],
                },

                fragment: Some(wgpu::FragmentState {
                    module: &shaders.pixel,
                    entry_point: Some(PIXEL_ENTRY),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: None,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),

                primitive: config.rasterizer.primitive_state(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        })?;

        log::debug!("scene resources created ({} scene slots)", SCENE_SLOTS);

        Ok(Self {
            pipeline,
            bind_groups,
            scene_buffers,
            world_buffer,
            index_buffer,
            vertex_buffer,
            cursor: SlotCursor::default(),
            current_slot: 0,
        })
    }

    pub fn index_count(&self) -> u32 {
        CUBE_INDICES.len() as u32
    }

    /// Scene slot bound by the next [`draw`](Self::draw).
    pub fn current_slot(&self) -> usize {
        self.current_slot
    }

    /// Overwrites the world matrix buffer.
    pub fn write_world(&self, queue: &wgpu::Queue, data: &WorldMatrixBuffer) {
        queue.write_buffer(&self.world_buffer, 0, bytemuck::bytes_of(data));
    }

    /// Writes the whole of the next scene slot and makes it current.
    pub fn write_scene(
        &mut self,
        queue: &wgpu::Queue,
        data: &SceneMatrixBuffer,
    ) -> Result<(), RenderError> {
        let slot = self.cursor.next_slot();
        let bytes = bytemuck::bytes_of(data);

        let size = wgpu::BufferSize::new(bytes.len() as u64)
            .ok_or(RenderError::MapFailed { label: "gyre scene ubo" })?;

        let mut view = queue
            .write_buffer_with(&self.scene_buffers[slot], 0, size)
            .ok_or(RenderError::MapFailed { label: "gyre scene ubo" })?;
        view.copy_from_slice(bytes);
        drop(view);

        self.current_slot = slot;
        Ok(())
    }

    /// Binds the fixed pipeline state and issues the single indexed draw.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_bind_group(0, &self.bind_groups[self.current_slot], &[]);
        rpass.draw_indexed(0..self.index_count(), 0, 0..1);
    }
}

fn uniform_entry(binding: u32, size: usize) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(size as u64),
        },
        count: None,
    }
}

fn checked<T>(
    device: &wgpu::Device,
    label: &'static str,
    create: impl FnOnce() -> T,
) -> Result<T, RenderError> {
    match validated(device, create) {
        (value, None) => Ok(value),
        (_, Some(e)) => Err(RenderError::Resource {
            label,
            message: e.to_string(),
        }),
    }
}
