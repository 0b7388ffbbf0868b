// Texture creation: sampled textures and render targets

use super::GpuContext;
use anyhow::Result;
use image::GenericImageView;

/// Depth buffer format used by every 3D pipeline
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// A sampled texture with its bind group
pub struct Texture {
    pub bind_group: wgpu::BindGroup,
    pub width: u32,
    pub height: u32,
}

impl Texture {
    /// Create a texture from encoded image bytes (PNG/JPEG)
    pub fn from_bytes(gpu: &GpuContext, bytes: &[u8], label: &str) -> Result<Self> {
        let img = image::load_from_memory(bytes)?;
        Ok(Self::from_image(gpu, &img, label))
    }

    /// Create a texture from a decoded image
    pub fn from_image(gpu: &GpuContext, img: &image::DynamicImage, label: &str) -> Self {
        let rgba = img.to_rgba8();
        let (width, height) = img.dimensions();
        Self::from_rgba(gpu, &rgba, width, height, wgpu::FilterMode::Linear, label)
    }

    /// Create a solid color texture (fallback for missing maps)
    pub fn from_color(gpu: &GpuContext, color: [u8; 4], label: &str) -> Self {
        Self::from_rgba(gpu, &color, 1, 1, wgpu::FilterMode::Nearest, label)
    }

    pub(crate) fn from_rgba(
        gpu: &GpuContext,
        rgba: &[u8],
        width: u32,
        height: u32,
        filter: wgpu::FilterMode,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        gpu.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        // Ground textures tile across the plane, so sampling repeats
        let sampler = gpu.device.create_sampler(&wgpu::SamplerDescriptor {
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: filter,
            min_filter: filter,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = bind_texture(gpu, &view, &sampler, label);

        Self {
            bind_group,
            width,
            height,
        }
    }
}

/// Bind a view + sampler against the shared texture layout
pub fn bind_texture(
    gpu: &GpuContext,
    view: &wgpu::TextureView,
    sampler: &wgpu::Sampler,
    label: &str,
) -> wgpu::BindGroup {
    gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout: &gpu.texture_layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

/// Color and depth attachments matching the surface size and sample count
pub struct RenderTargets {
    /// Multisampled color target, resolved into the swapchain image (None when sample_count == 1)
    pub msaa_view: Option<wgpu::TextureView>,
    pub depth_view: wgpu::TextureView,
}

impl RenderTargets {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> Self {
        let size = wgpu::Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };

        let msaa_view = (sample_count > 1).then(|| {
            device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("MSAA Color Target"),
                    size,
                    mip_level_count: 1,
                    sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format: config.format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });

        let depth_view = device
            .create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Target"),
                size,
                mip_level_count: 1,
                sample_count,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            })
            .create_view(&wgpu::TextureViewDescriptor::default());

        Self {
            msaa_view,
            depth_view,
        }
    }
}
