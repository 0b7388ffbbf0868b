// Rendering system using wgpu

mod camera;
mod color;
mod context;
mod frame;
mod lighting;
mod mesh;
mod model;
mod shapes;
mod text;
mod texture;
mod vertex;

pub use camera::{Camera, CameraController};
pub use color::Color;
pub use context::GpuContext;
pub use frame::{Frame, ModelDraw};
pub use lighting::{LightError, LightRig, SceneUniform};
pub use mesh::{Mesh, MeshData};
pub use model::{Model, ModelPart};
pub use text::{FontAtlas, GLYPH_BASE_SIZE};
pub use texture::Texture;
pub use vertex::{ColorVertex, InstanceRaw, MeshVertex, ScreenVertex};

use crate::engine::assets::AssetManager;
use anyhow::{Context, Result};
use glam::{Mat4, Quat, Vec2, Vec3};
use log::{info, warn};
use std::sync::Arc;
use texture::{RenderTargets, DEPTH_FORMAT};
use winit::window::Window;

/// Vertex buffer that grows to fit whatever is written to it
struct DynamicBuffer {
    buffer: wgpu::Buffer,
    capacity: u64,
    label: &'static str,
}

impl DynamicBuffer {
    const MIN_CAPACITY: u64 = 4 * 1024;

    fn new(device: &wgpu::Device, label: &'static str) -> Self {
        Self {
            buffer: Self::allocate(device, label, Self::MIN_CAPACITY),
            capacity: Self::MIN_CAPACITY,
            label,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, size: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    fn write(&mut self, gpu: &GpuContext, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let needed = bytes.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            self.buffer = Self::allocate(&gpu.device, self.label, self.capacity);
        }
        gpu.queue.write_buffer(&self.buffer, 0, bytes);
    }
}

/// Shared settings for building a render pipeline
struct PipelineDesc<'a> {
    label: &'a str,
    layout: &'a wgpu::PipelineLayout,
    shader: &'a wgpu::ShaderModule,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    blend: wgpu::BlendState,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
}

/// Main renderer responsible for initializing wgpu and drawing frames
pub struct Renderer {
    surface: wgpu::Surface<'static>,
    gpu: GpuContext,
    config: wgpu::SurfaceConfiguration,
    sample_count: u32,
    targets: RenderTargets,

    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,

    lit_pipeline: wgpu::RenderPipeline,
    triangle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    screen_pipeline: wgpu::RenderPipeline,

    instances: DynamicBuffer,
    color_vertices: DynamicBuffer,
    screen_vertices: DynamicBuffer,

    font: FontAtlas,
    font_texture: Texture,
    white: Texture,
}

impl Renderer {
    /// Create a renderer for the given window
    ///
    /// `msaa_samples` is a request: unsupported counts fall back to 1.
    pub async fn new(window: Arc<Window>, msaa_samples: u32, font: FontAtlas) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("Failed to create window surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        info!("Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("Failed to open GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;

        let sample_count = if msaa_samples > 1
            && adapter
                .get_texture_format_features(surface_format)
                .flags
                .sample_count_supported(msaa_samples)
            && adapter
                .get_texture_format_features(DEPTH_FORMAT)
                .flags
                .sample_count_supported(msaa_samples)
        {
            msaa_samples
        } else {
            if msaa_samples > 1 {
                warn!("{}x MSAA not supported, rendering without it", msaa_samples);
            }
            1
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let gpu = GpuContext::new(device, queue);
        let targets = RenderTargets::new(&gpu.device, &config, sample_count);

        let scene_buffer = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Scene Uniform Buffer"),
            size: std::mem::size_of::<SceneUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let scene_layout = gpu
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Scene Bind Group Layout"),
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
            });

        let scene_bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let lit_shader = gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Lit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/lit.wgsl").into()),
        });
        let color_shader = gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Color Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/color.wgsl").into()),
        });
        let screen_shader = gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Screen Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/screen.wgsl").into()),
        });

        let lit_layout = gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Lit Pipeline Layout"),
                bind_group_layouts: &[&scene_layout, &gpu.texture_layout],
                push_constant_ranges: &[],
            });
        let color_layout = gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Color Pipeline Layout"),
                bind_group_layouts: &[&scene_layout],
                push_constant_ranges: &[],
            });
        let screen_layout = gpu
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Screen Pipeline Layout"),
                bind_group_layouts: &[&gpu.texture_layout],
                push_constant_ranges: &[],
            });

        let lit_pipeline = create_pipeline(&gpu.device, surface_format, sample_count, PipelineDesc {
            label: "Lit Pipeline",
            layout: &lit_layout,
            shader: &lit_shader,
            buffers: &[MeshVertex::desc(), InstanceRaw::desc()],
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: wgpu::BlendState::REPLACE,
            depth_write: true,
            depth_compare: wgpu::CompareFunction::Less,
        });
        let triangle_pipeline = create_pipeline(&gpu.device, surface_format, sample_count, PipelineDesc {
            label: "Color Triangle Pipeline",
            layout: &color_layout,
            shader: &color_shader,
            buffers: &[ColorVertex::desc()],
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: wgpu::BlendState::ALPHA_BLENDING,
            depth_write: true,
            depth_compare: wgpu::CompareFunction::Less,
        });
        let line_pipeline = create_pipeline(&gpu.device, surface_format, sample_count, PipelineDesc {
            label: "Color Line Pipeline",
            layout: &color_layout,
            shader: &color_shader,
            buffers: &[ColorVertex::desc()],
            topology: wgpu::PrimitiveTopology::LineList,
            blend: wgpu::BlendState::ALPHA_BLENDING,
            depth_write: false,
            depth_compare: wgpu::CompareFunction::LessEqual,
        });
        let screen_pipeline = create_pipeline(&gpu.device, surface_format, sample_count, PipelineDesc {
            label: "Screen Pipeline",
            layout: &screen_layout,
            shader: &screen_shader,
            buffers: &[ScreenVertex::desc()],
            topology: wgpu::PrimitiveTopology::TriangleList,
            blend: wgpu::BlendState::ALPHA_BLENDING,
            depth_write: false,
            depth_compare: wgpu::CompareFunction::Always,
        });

        let (atlas_width, atlas_height) = font.size();
        let font_texture = Texture::from_rgba(
            &gpu,
            font.pixels(),
            atlas_width,
            atlas_height,
            wgpu::FilterMode::Linear,
            "Glyph Atlas",
        );
        let white = Texture::from_color(&gpu, [255, 255, 255, 255], "White Texture");

        let instances = DynamicBuffer::new(&gpu.device, "Instance Buffer");
        let color_vertices = DynamicBuffer::new(&gpu.device, "Color Vertex Buffer");
        let screen_vertices = DynamicBuffer::new(&gpu.device, "Screen Vertex Buffer");

        info!(
            "Renderer initialized with {}x{} resolution, {}x MSAA",
            config.width, config.height, sample_count
        );

        Ok(Self {
            surface,
            gpu,
            config,
            sample_count,
            targets,
            scene_buffer,
            scene_bind_group,
            lit_pipeline,
            triangle_pipeline,
            line_pipeline,
            screen_pipeline,
            instances,
            color_vertices,
            screen_vertices,
            font,
            font_texture,
            white,
        })
    }

    /// Resize the renderer
    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.reconfigure();
            info!("Renderer resized to {}x{}", new_size.width, new_size.height);
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.gpu.device, &self.config);
        self.targets = RenderTargets::new(&self.gpu.device, &self.config, self.sample_count);
    }

    /// Device handles for asset uploads
    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    /// Draw one frame
    ///
    /// Models and textures are looked up in `assets`; draws whose handle is
    /// not there are skipped.
    pub fn render(&mut self, frame: &Frame, assets: Option<&AssetManager>) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!("Surface timed out, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(e).context("Failed to acquire surface texture"),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let viewport = Vec2::new(self.config.width as f32, self.config.height as f32);

        // Screen quads: background first, then text
        let mut screen: Vec<ScreenVertex> = Vec::new();
        let background = frame
            .background
            .and_then(|handle| assets.and_then(|a| a.texture(handle)));
        if let Some(texture) = background {
            screen.extend_from_slice(&vertex::screen_quad(
                Vec2::ZERO,
                Vec2::new(texture.width as f32, texture.height as f32),
                Vec2::ZERO,
                Vec2::ONE,
                Color::WHITE.to_linear(),
                viewport,
            ));
        }
        let text_start = screen.len() as u32;
        for text in &frame.texts {
            let color = text.color.to_linear();
            for quad in self.font.layout(&text.text, text.position, text.size) {
                screen.extend_from_slice(&vertex::screen_quad(
                    quad.min, quad.max, quad.uv_min, quad.uv_max, color, viewport,
                ));
            }
        }
        let text_end = screen.len() as u32;

        // Lit models: one instance per part
        let mut instances: Vec<InstanceRaw> = Vec::new();
        let mut parts: Vec<&ModelPart> = Vec::new();
        if let (Some(_), Some(assets)) = (&frame.scene, assets) {
            for draw in &frame.models {
                let Some(model) = assets.model(draw.model) else {
                    continue;
                };
                let transform = Mat4::from_scale_rotation_translation(
                    Vec3::splat(draw.scale),
                    Quat::from_rotation_y(draw.rotation_y),
                    draw.position,
                );
                let tint = draw.tint.to_linear();
                for part in model.parts() {
                    instances.push(InstanceRaw::new(transform, tint * part.color));
                    parts.push(part);
                }
            }
        }

        // Unlit geometry: triangles then lines in one buffer
        let mut colored: Vec<ColorVertex> = Vec::new();
        if frame.scene.is_some() {
            colored.extend_from_slice(&frame.triangles);
            colored.extend_from_slice(&frame.lines);
        }
        let triangle_end = if colored.is_empty() { 0 } else { frame.triangles.len() as u32 };
        let line_end = colored.len() as u32;

        if let Some(scene) = frame.scene.as_ref().filter(|_| frame.has_3d()) {
            let uniform = SceneUniform::new(&scene.camera, viewport.x / viewport.y, &scene.lights);
            self.gpu
                .queue
                .write_buffer(&self.scene_buffer, 0, bytemuck::cast_slice(&[uniform]));
        }
        self.screen_vertices.write(&self.gpu, bytemuck::cast_slice(&screen));
        self.instances.write(&self.gpu, bytemuck::cast_slice(&instances));
        self.color_vertices.write(&self.gpu, bytemuck::cast_slice(&colored));

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let (color_view, resolve_target) = match &self.targets.msaa_view {
                Some(msaa) => (msaa, Some(&view)),
                None => (&view, None),
            };

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: color_view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(frame.clear.to_wgpu()),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(texture) = background {
                render_pass.set_pipeline(&self.screen_pipeline);
                render_pass.set_bind_group(0, &texture.bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.screen_vertices.buffer.slice(..));
                render_pass.draw(0..text_start, 0..1);
            }

            if !parts.is_empty() {
                render_pass.set_pipeline(&self.lit_pipeline);
                render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
                render_pass.set_vertex_buffer(1, self.instances.buffer.slice(..));

                for (index, part) in parts.iter().enumerate() {
                    let texture = part
                        .texture
                        .and_then(|handle| assets.and_then(|a| a.texture(handle)))
                        .unwrap_or(&self.white);
                    let instance = index as u32;

                    render_pass.set_bind_group(1, &texture.bind_group, &[]);
                    render_pass.set_vertex_buffer(0, part.mesh.vertex_buffer.slice(..));
                    render_pass.set_index_buffer(
                        part.mesh.index_buffer.slice(..),
                        wgpu::IndexFormat::Uint32,
                    );
                    render_pass.draw_indexed(0..part.mesh.index_count, 0, instance..instance + 1);
                }
            }

            if line_end > 0 {
                render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.color_vertices.buffer.slice(..));
                if triangle_end > 0 {
                    render_pass.set_pipeline(&self.triangle_pipeline);
                    render_pass.draw(0..triangle_end, 0..1);
                }
                if line_end > triangle_end {
                    render_pass.set_pipeline(&self.line_pipeline);
                    render_pass.draw(triangle_end..line_end, 0..1);
                }
            }

            if text_end > text_start {
                render_pass.set_pipeline(&self.screen_pipeline);
                render_pass.set_bind_group(0, &self.font_texture.bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.screen_vertices.buffer.slice(..));
                render_pass.draw(text_start..text_end, 0..1);
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    sample_count: u32,
    desc: PipelineDesc,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(desc.layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: "vs_main",
            buffers: desc.buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: "fs_main",
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(desc.blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            // OBJ files in the wild mix windings, so nothing is culled
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: desc.depth_write,
            depth_compare: desc.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
    })
}
