use std::sync::Arc;

use anyhow::Result;
use wgpu::util::DeviceExt;
use wgpu::{
    BindGroup, BindGroupLayout, Buffer, Device, RenderPipeline, Surface, SurfaceConfiguration,
};
use winit::window::Window;

use super::gpu::GpuContext;
use crate::scene::{Scene, PARTICLE_OPACITY, WIREFRAME_OPACITY};

/// Render seam between the lifecycle manager and the graphics backend.
///
/// The wgpu implementation lives below; tests drive the lifecycle with mock
/// presenters instead of a real device.
pub trait Present {
    /// Draw one frame of the scene through its camera.
    fn render(&mut self, scene: &Scene) -> Result<()>;

    /// Track a new viewport extent.
    fn resize(&mut self, width: u32, height: u32);
}

// === GPU data structures ===

/// Camera + light rig, written once per frame
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniform {
    view_proj: [[f32; 4]; 4],
    ambient: [f32; 4],
    light0_pos: [f32; 4],
    light0_color: [f32; 4],
    light1_pos: [f32; 4],
    light1_color: [f32; 4],
}

impl SceneUniform {
    fn from_scene(scene: &Scene) -> Self {
        let [l0, l1] = &scene.point_lights;
        let pos = |l: &crate::scene::PointLight| [l.position.x, l.position.y, l.position.z, 0.0];
        let color = |l: &crate::scene::PointLight| {
            [l.color[0], l.color[1], l.color[2], l.intensity]
        };
        Self {
            view_proj: scene.camera.view_proj().to_cols_array_2d(),
            ambient: [
                scene.ambient.color[0],
                scene.ambient.color[1],
                scene.ambient.color[2],
                scene.ambient.intensity,
            ],
            light0_pos: pos(l0),
            light0_color: color(l0),
            light1_pos: pos(l1),
            light1_color: color(l1),
        }
    }
}

/// Per-drawable transform and color
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct ModelUniform {
    model: [[f32; 4]; 4],
    color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct PointVertex {
    position: [f32; 3],
    scale: f32,
}

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct LineVertex {
    position: [f32; 3],
}

/// One drawable's uniform buffer and bind group.
struct ModelSlot {
    buffer: Buffer,
    bind_group: BindGroup,
}

impl ModelSlot {
    fn new(device: &Device, layout: &BindGroupLayout, label: &str) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: std::mem::size_of::<ModelUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }
}

struct SolidSlot {
    vertex_buffer: Buffer,
    vertex_count: u32,
    model: ModelSlot,
}

/// wgpu presenter: one transparent-clear surface, an additive point pipeline
/// for the particle field and an alpha-blended line pipeline for the
/// wireframe solids.
///
/// Every GPU resource is created here at mount and dropped with the value;
/// geometry is uploaded once (it is immutable per scene life) and only the
/// uniforms are rewritten per frame.
pub struct WgpuPresenter {
    gpu: GpuContext,
    surface: Surface<'static>,
    config: SurfaceConfiguration,
    point_pipeline: RenderPipeline,
    line_pipeline: RenderPipeline,
    scene_buffer: Buffer,
    scene_bind_group: BindGroup,
    particle_buffer: Buffer,
    particle_count: u32,
    particle_model: ModelSlot,
    solids: Vec<SolidSlot>,
}

impl WgpuPresenter {
    pub fn new(window: Arc<Window>, scene: &Scene) -> Result<Self> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        let (gpu, surface, adapter) = pollster::block_on(GpuContext::for_window(window))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(caps.formats[0]);

        // Transparent clear only shows through with a real alpha mode; on
        // opaque-only platforms the backdrop simply clears to black.
        let alpha_mode = [
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::PostMultiplied,
        ]
        .into_iter()
        .find(|m| caps.alpha_modes.contains(m))
        .unwrap_or(caps.alpha_modes[0]);

        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(gpu.device(), &config);

        let device = gpu.device();

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Backdrop Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../scene.wgsl").into()),
        });

        let scene_layout = Self::uniform_layout(device, "Scene Bind Group Layout");
        let model_layout = Self::uniform_layout(device, "Model Bind Group Layout");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Backdrop Pipeline Layout"),
            bind_group_layouts: &[&scene_layout, &model_layout],
            push_constant_ranges: &[],
        });

        // Additive blending for the particles, matching the original
        // point material
        let additive = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let point_pipeline = Self::build_pipeline(
            device,
            &pipeline_layout,
            &shader,
            format,
            "Particle Pipeline",
            "vs_point",
            "fs_point",
            wgpu::PrimitiveTopology::PointList,
            additive,
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PointVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32],
            },
        );

        let line_pipeline = Self::build_pipeline(
            device,
            &pipeline_layout,
            &shader,
            format,
            "Wireframe Pipeline",
            "vs_line",
            "fs_line",
            wgpu::PrimitiveTopology::LineList,
            wgpu::BlendState::ALPHA_BLENDING,
            wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<LineVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &wgpu::vertex_attr_array![0 => Float32x3],
            },
        );

        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Uniform"),
            size: std::mem::size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let point_vertices: Vec<PointVertex> = scene
            .particles
            .particles()
            .iter()
            .map(|p| PointVertex {
                position: p.position.to_array(),
                scale: p.scale,
            })
            .collect();
        let particle_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Vertices"),
            contents: bytemuck::cast_slice(&point_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let particle_model = ModelSlot::new(device, &model_layout, "Particle Model Uniform");

        let solids = scene
            .solids
            .iter()
            .map(|solid| {
                let vertices: Vec<LineVertex> = solid
                    .wireframe()
                    .into_iter()
                    .map(|v| LineVertex {
                        position: v.to_array(),
                    })
                    .collect();
                SolidSlot {
                    vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Wireframe Vertices"),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    }),
                    vertex_count: vertices.len() as u32,
                    model: ModelSlot::new(device, &model_layout, "Wireframe Model Uniform"),
                }
            })
            .collect();

        Ok(Self {
            gpu,
            surface,
            config,
            point_pipeline,
            line_pipeline,
            scene_buffer,
            scene_bind_group,
            particle_buffer,
            particle_count: point_vertices.len() as u32,
            particle_model,
            solids,
        })
    }

    fn uniform_layout(device: &Device, label: &str) -> BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn build_pipeline(
        device: &Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        format: wgpu::TextureFormat,
        label: &str,
        vs_entry: &str,
        fs_entry: &str,
        topology: wgpu::PrimitiveTopology,
        blend: wgpu::BlendState,
        vertex_layout: wgpu::VertexBufferLayout,
    ) -> RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some(vs_entry),
                buffers: &[vertex_layout],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some(fs_entry),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    fn write_uniforms(&self, scene: &Scene) {
        let queue = self.gpu.queue();

        queue.write_buffer(
            &self.scene_buffer,
            0,
            bytemuck::cast_slice(&[SceneUniform::from_scene(scene)]),
        );

        let particle_color = scene.palette.particles;
        queue.write_buffer(
            &self.particle_model.buffer,
            0,
            bytemuck::cast_slice(&[ModelUniform {
                model: scene.particle_transform().to_cols_array_2d(),
                color: [
                    particle_color[0],
                    particle_color[1],
                    particle_color[2],
                    PARTICLE_OPACITY,
                ],
            }]),
        );

        let wire = scene.palette.wireframe;
        for (i, slot) in self.solids.iter().enumerate() {
            queue.write_buffer(
                &slot.model.buffer,
                0,
                bytemuck::cast_slice(&[ModelUniform {
                    model: scene.solid_transform(i).to_cols_array_2d(),
                    color: [wire[0], wire[1], wire[2], WIREFRAME_OPACITY],
                }]),
            );
        }
    }
}

impl Present for WgpuPresenter {
    fn render(&mut self, scene: &Scene) -> Result<()> {
        self.write_uniforms(scene);

        let surface_texture = match self.surface.get_current_texture() {
            Ok(t) => t,
            // Reconfigure and pick the frame up on the next callback
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.surface.configure(self.gpu.device(), &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Backdrop Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Transparent so the page behind shows through
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            pass.set_bind_group(0, &self.scene_bind_group, &[]);

            pass.set_pipeline(&self.point_pipeline);
            pass.set_bind_group(1, &self.particle_model.bind_group, &[]);
            pass.set_vertex_buffer(0, self.particle_buffer.slice(..));
            pass.draw(0..self.particle_count, 0..1);

            pass.set_pipeline(&self.line_pipeline);
            for slot in &self.solids {
                pass.set_bind_group(1, &slot.model.bind_group, &[]);
                pass.set_vertex_buffer(0, slot.vertex_buffer.slice(..));
                pass.draw(0..slot.vertex_count, 0..1);
            }
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(self.gpu.device(), &self.config);
    }
}
