//! GPU textures: the depth attachment and per-item media textures.

use crate::assets::MediaSurface;

/// Depth buffer format shared by every pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Anisotropy clamp requested for media sampling (the wgpu maximum).
pub const MAX_ANISOTROPY: u16 = 16;

/// A depth texture and its default view.
pub struct DepthTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
}

impl DepthTexture {
    /// Create a depth texture with the given dimensions.
    #[must_use]
    pub fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// An sRGB texture holding the visible frame of a [`MediaSurface`].
///
/// Clips share one texture across frames; a new frame is uploaded only when
/// the visible frame index changes.
pub struct MediaTexture {
    /// The underlying GPU texture.
    pub texture: wgpu::Texture,
    /// A default full-texture view.
    pub view: wgpu::TextureView,
    width: u32,
    height: u32,
    frame: Option<usize>,
}

impl MediaTexture {
    /// Create the texture and upload the surface's first frame.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        surface: &MediaSurface,
    ) -> Self {
        let width = surface.width.max(1);
        let height = surface.height.max(1);
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut media = Self {
            texture,
            view,
            width,
            height,
            frame: None,
        };
        let _ = media.show_frame(queue, surface, 0);
        media
    }

    /// Make `frame` visible, uploading it if it is not already. Returns
    /// `true` when pixels were written.
    pub fn show_frame(
        &mut self,
        queue: &wgpu::Queue,
        surface: &MediaSurface,
        frame: usize,
    ) -> bool {
        if self.frame == Some(frame) {
            return false;
        }
        let Some(pixels) = surface.frames.get(frame) else {
            return false;
        };
        let expected = self.width as usize * self.height as usize * 4;
        if pixels.rgba.len() != expected {
            log::warn!(
                "frame {frame} has {} bytes, expected {expected}",
                pixels.rgba.len()
            );
            return false;
        }

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &pixels.rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        self.frame = Some(frame);
        true
    }
}

/// Linear sampler with the maximum anisotropy clamp.
///
/// Anisotropic filtering requires linear filtering on every axis.
#[must_use]
pub fn media_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Media Sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        anisotropy_clamp: MAX_ANISOTROPY,
        ..Default::default()
    })
}
