use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::flip_vertical_in_place;
use tracing::info;
use wgpu::util::{DeviceExt, TextureDataOrder};

/// Background image uploaded once before the loop starts.
///
/// The texture handle is retained so the view stays valid for the lifetime
/// of the bind group.
pub(crate) struct BackgroundTexture {
    _texture: wgpu::Texture,
    pub(crate) view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) aspect_ratio: f32,
}

/// Decodes and uploads the background image. A missing or unreadable image
/// is fatal to the demo; there is no placeholder fallback.
pub(crate) fn load_background(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    path: &Path,
) -> Result<BackgroundTexture> {
    let image = image::open(path)
        .with_context(|| format!("failed to open background image at {}", path.display()))?;

    let mut rgba = image.to_rgba8();
    let width = rgba.width();
    let height = rgba.height();
    if width == 0 || height == 0 {
        anyhow::bail!(
            "background image at {} has zero extent ({}x{})",
            path.display(),
            width,
            height
        );
    }

    // Shader UVs use a bottom-left origin.
    flip_vertical_in_place(&mut rgba);

    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(&format!("background texture ({})", path.display())),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        TextureDataOrder::LayerMajor,
        rgba.as_raw(),
    );

    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    // Nearest filtering keeps the source pixels crisp under the grid effect.
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    info!(path = %path.display(), width, height, "loaded background image");

    Ok(BackgroundTexture {
        _texture: texture,
        view,
        sampler,
        aspect_ratio: width as f32 / height as f32,
    })
}
