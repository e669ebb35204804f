//! Image loading into sampled GPU textures

use std::path::{Path, PathBuf};

use crate::error::GraphicsError;

/// A 2D texture with its view and sampler
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// Decode an image file and upload it as an sRGB texture
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
    ) -> Result<Self, GraphicsError> {
        let image = image::open(path).map_err(|source| GraphicsError::Image {
            path: path.display().to_string(),
            source,
        })?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();

        log::info!("Loaded texture {} ({width}x{height})", path.display());

        Ok(Self::from_rgba8(
            device,
            queue,
            &rgba,
            width,
            height,
            &path.display().to_string(),
        ))
    }

    /// Load `path`, or fall back to a single-texel texture of `fallback` when it cannot be read
    pub fn load_or_solid(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
        fallback: [u8; 4],
    ) -> Self {
        match Self::from_path(device, queue, path) {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!("{e}; using a plain material instead");
                Self::solid(device, queue, fallback, &path.display().to_string())
            }
        }
    }

    /// A 1x1 texture of one colour
    pub fn solid(device: &wgpu::Device, queue: &wgpu::Queue, rgba: [u8; 4], label: &str) -> Self {
        Self::from_rgba8(device, queue, &rgba, 1, 1, label)
    }

    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            // Wrap horizontally so the seam of a planet map joins up
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Layout for a `texture_2d<f32>` at binding 0 and its sampler at binding 1
    pub fn bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Texture Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}

/// Resolve a web-style asset reference (`/img/earth.jpg`) against a local asset root
pub fn resolve_asset_path(root: &Path, reference: &str) -> PathBuf {
    root.join(reference.trim_start_matches(['/', '\\']))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_strips_leading_slash() {
        let path = resolve_asset_path(Path::new("assets"), "/img/earth.jpg");
        assert_eq!(path, Path::new("assets").join("img").join("earth.jpg"));
    }

    #[test]
    fn test_resolve_relative_reference() {
        let path = resolve_asset_path(Path::new("/srv/orrery"), "img/sun.jpg");
        assert_eq!(path, Path::new("/srv/orrery/img/sun.jpg"));
    }
}
