//! Source image buffer and bounds-checked sampling
//!
//! The buffer is validated once on construction and borrowed read-only by
//! the whole pipeline. Only the texture enhancer copies it, privately.

use crate::error::MeshGenerationError;

/// Interleaved RGB or RGBA pixel buffer, row-major.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

/// One bounds-clamped sample of the source image.
#[derive(Debug, Clone, Copy)]
pub struct SampledPixel {
    pub rgb: [u8; 3],
    /// Mean of the RGB channels, normalized to [0, 1].
    pub brightness: f32,
}

impl PixelBuffer {
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<u8>,
    ) -> Result<Self, MeshGenerationError> {
        if channels != 3 && channels != 4 {
            return Err(MeshGenerationError::UnsupportedChannels(channels));
        }
        if width == 0 || height == 0 || data.is_empty() {
            return Err(MeshGenerationError::EmptyPixelBuffer);
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(MeshGenerationError::MalformedPixelBuffer {
                width,
                height,
                channels,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, MeshGenerationError> {
        Self::new(width, height, 3, data)
    }

    pub fn rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, MeshGenerationError> {
        Self::new(width, height, 4, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGB color at integer pixel coordinates, clamped into bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        let idx = (y as usize * self.width as usize + x as usize) * self.channels as usize;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Sample at a normalized coordinate, `(u, v) ∈ [0, 1]²`.
    ///
    /// Coordinates outside the unit square clamp to the nearest edge pixel
    /// rather than failing; grid sampling may touch exactly 1.0.
    pub fn sample(&self, u: f32, v: f32) -> SampledPixel {
        let x = (u.clamp(0.0, 1.0) * (self.width - 1) as f32).round() as u32;
        let y = (v.clamp(0.0, 1.0) * (self.height - 1) as f32).round() as u32;
        let rgb = self.pixel(x, y);
        let brightness = (rgb[0] as f32 + rgb[1] as f32 + rgb[2] as f32) / (3.0 * 255.0);
        SampledPixel { rgb, brightness }
    }
}
