//! Decoded texture sources: still images and looping animated clips.

use std::io::Cursor;
use std::time::Duration;

use glam::Vec2;
use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;

/// Frame delay used when a clip frame declares none.
const DEFAULT_FRAME_DELAY: Duration = Duration::from_millis(100);

/// One RGBA8 frame.
#[derive(Debug, Clone)]
pub struct MediaFrame {
    /// Tightly packed RGBA8 pixels, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
    /// How long the frame stays on screen (clips only).
    pub delay: Duration,
}

/// Pixels plus sizing for one grid item texture.
#[derive(Debug, Clone)]
pub struct MediaSurface {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// One frame for images, several for clips.
    pub frames: Vec<MediaFrame>,
    /// On-screen quad size in world units (half the natural size).
    pub display_size: Vec2,
    loop_duration: Duration,
}

impl MediaSurface {
    fn from_frames(width: u32, height: u32, frames: Vec<MediaFrame>) -> Self {
        let loop_duration = frames.iter().map(|f| f.delay).sum();
        Self {
            width,
            height,
            frames,
            display_size: Vec2::new(width as f32, height as f32) / 2.0,
            loop_duration,
        }
    }

    /// A single-colour still, handy as a placeholder.
    #[must_use]
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba.repeat((width * height) as usize);
        Self::from_frames(
            width,
            height,
            vec![MediaFrame {
                rgba: pixels,
                delay: Duration::ZERO,
            }],
        )
    }

    /// Decode a still image (JPEG or PNG).
    ///
    /// # Errors
    ///
    /// Returns the decoder's message when the bytes are not a supported
    /// image.
    pub fn decode_image(bytes: &[u8]) -> Result<Self, String> {
        let rgba = image::load_from_memory(bytes)
            .map_err(|e| e.to_string())?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self::from_frames(
            width,
            height,
            vec![MediaFrame {
                rgba: rgba.into_raw(),
                delay: Duration::ZERO,
            }],
        ))
    }

    /// Decode an animated GIF into composited full-size frames.
    ///
    /// # Errors
    ///
    /// Returns the decoder's message when the bytes are not a GIF or
    /// contain no frames.
    pub fn decode_clip(bytes: Vec<u8>) -> Result<Self, String> {
        let decoder =
            GifDecoder::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
        let decoded = decoder
            .into_frames()
            .collect_frames()
            .map_err(|e| e.to_string())?;

        let mut size = None;
        let mut frames = Vec::with_capacity(decoded.len());
        for frame in decoded {
            let (numer, denom) = frame.delay().numer_denom_ms();
            let delay = if numer == 0 || denom == 0 {
                DEFAULT_FRAME_DELAY
            } else {
                Duration::from_secs_f64(f64::from(numer) / f64::from(denom) / 1000.0)
            };
            let buffer = frame.into_buffer();
            let _ = size.get_or_insert(buffer.dimensions());
            frames.push(MediaFrame {
                rgba: buffer.into_raw(),
                delay,
            });
        }

        let (width, height) = size.ok_or_else(|| "clip has no frames".to_owned())?;
        Ok(Self::from_frames(width, height, frames))
    }

    /// Whether the surface has more than one frame.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1
    }

    /// Index of the frame to show `elapsed` after playback started,
    /// looping over the clip.
    #[must_use]
    pub fn frame_at(&self, elapsed: Duration) -> usize {
        if !self.is_animated() || self.loop_duration.is_zero() {
            return 0;
        }
        let period = self.loop_duration.as_nanos();
        let mut remaining = elapsed.as_nanos() % period;
        for (i, frame) in self.frames.iter().enumerate() {
            let delay = frame.delay.as_nanos();
            if remaining < delay {
                return i;
            }
            remaining -= delay;
        }
        self.frames.len() - 1
    }
}
