//! Best-effort texture enhancement
//!
//! Operates on a private RGBA working copy of the source image; the
//! pipeline's pixel buffer is never mutated. Any failure here degrades to
//! the unmodified source texture instead of aborting mesh generation.

use crate::error::TextureEnhancementError;
use crate::pixels::PixelBuffer;
use crate::quality::QualitySettings;
use tracing::warn;

/// Radial brightness boosts over fixed facial regions, linear falloff.
const FEATURE_BOOSTS: &[FeatureBoost] = &[
    FeatureBoost {
        name: "left_eye",
        center: [0.35, 0.3],
        radius: 0.08,
        gain: 1.3,
    },
    FeatureBoost {
        name: "right_eye",
        center: [0.65, 0.3],
        radius: 0.08,
        gain: 1.3,
    },
    FeatureBoost {
        name: "mouth",
        center: [0.5, 0.6],
        radius: 0.1,
        gain: 1.2,
    },
    FeatureBoost {
        name: "nose",
        center: [0.5, 0.45],
        radius: 0.06,
        gain: 1.1,
    },
    FeatureBoost {
        name: "left_cheek",
        center: [0.3, 0.45],
        radius: 0.1,
        gain: 1.05,
    },
    FeatureBoost {
        name: "right_cheek",
        center: [0.7, 0.45],
        radius: 0.1,
        gain: 1.05,
    },
];

struct FeatureBoost {
    #[allow(dead_code)]
    name: &'static str,
    center: [f32; 2],
    radius: f32,
    gain: f32,
}

/// A finished raster, RGBA, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureImage {
    fn from_source(source: &PixelBuffer) -> Self {
        let (w, h) = (source.width(), source.height());
        let mut rgba = Vec::with_capacity((w * h * 4) as usize);
        for y in 0..h {
            for x in 0..w {
                let [r, g, b] = source.pixel(x, y);
                rgba.extend_from_slice(&[r, g, b, 255]);
            }
        }
        Self {
            width: w,
            height: h,
            rgba,
        }
    }

    /// Nearest-neighbor resample of the source to the plan's texture size.
    fn from_source_scaled(source: &PixelBuffer, size: u32) -> Self {
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let sx = (x as u64 * source.width() as u64 / size as u64) as u32;
                let sy = (y as u64 * source.height() as u64 / size as u64) as u32;
                let [r, g, b] = source.pixel(sx, sy);
                rgba.extend_from_slice(&[r, g, b, 255]);
            }
        }
        Self {
            width: size,
            height: size,
            rgba,
        }
    }

    fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * self.width + x) * 4) as usize;
        [
            self.rgba[idx],
            self.rgba[idx + 1],
            self.rgba[idx + 2],
            self.rgba[idx + 3],
        ]
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        let idx = ((y * self.width + x) * 4) as usize;
        self.rgba[idx..idx + 4].copy_from_slice(&color);
    }
}

/// Diffuse texture plus the optional derived normal map.
#[derive(Debug, Clone)]
pub struct EnhancedTextures {
    pub diffuse: TextureImage,
    pub normal: Option<TextureImage>,
}

/// Enhance the source texture, deriving a normal map when the plan allows.
pub fn enhance(
    source: &PixelBuffer,
    quality: &QualitySettings,
) -> Result<EnhancedTextures, TextureEnhancementError> {
    if source.width() < 3 || source.height() < 3 {
        return Err(TextureEnhancementError::TooSmall {
            width: source.width(),
            height: source.height(),
            stage: "enhancement kernels",
        });
    }

    let mut diffuse = TextureImage::from_source_scaled(source, quality.texture_size);
    brighten_saturate(&mut diffuse, 1.15, 1.2);
    sharpen(&mut diffuse, 0.5);
    for boost in FEATURE_BOOSTS {
        radial_boost(&mut diffuse, boost);
    }

    let normal = quality.normal_maps.then(|| derive_normal_map(&diffuse));

    Ok(EnhancedTextures { diffuse, normal })
}

/// Enhancement with the mandatory fallback: failures degrade to the
/// unmodified source texture and are only logged.
pub fn enhance_or_fallback(source: &PixelBuffer, quality: &QualitySettings) -> EnhancedTextures {
    match enhance(source, quality) {
        Ok(textures) => textures,
        Err(error) => {
            warn!(%error, "texture enhancement failed, using source texture");
            EnhancedTextures {
                diffuse: TextureImage::from_source(source),
                normal: None,
            }
        }
    }
}

fn brighten_saturate(image: &mut TextureImage, brightness: f32, saturation: f32) {
    for chunk in image.rgba.chunks_exact_mut(4) {
        let [r, g, b] = [chunk[0] as f32, chunk[1] as f32, chunk[2] as f32];
        let gray = (r + g + b) / 3.0;
        for (slot, channel) in chunk[..3].iter_mut().zip([r, g, b]) {
            let saturated = gray + (channel - gray) * saturation;
            *slot = (saturated * brightness).clamp(0.0, 255.0) as u8;
        }
    }
}

/// Mild 3x3 sharpen, blended with the original to avoid ringing.
fn sharpen(image: &mut TextureImage, amount: f32) {
    let original = image.clone();
    for y in 1..image.height - 1 {
        for x in 1..image.width - 1 {
            let mut out = [0u8; 4];
            out[3] = original.pixel(x, y)[3];
            for channel in 0..3 {
                let center = original.pixel(x, y)[channel] as f32;
                let neighbors = original.pixel(x - 1, y)[channel] as f32
                    + original.pixel(x + 1, y)[channel] as f32
                    + original.pixel(x, y - 1)[channel] as f32
                    + original.pixel(x, y + 1)[channel] as f32;
                let sharpened = center * 5.0 - neighbors;
                let blended = center + (sharpened - center) * amount;
                out[channel] = blended.clamp(0.0, 255.0) as u8;
            }
            image.set_pixel(x, y, out);
        }
    }
}

fn radial_boost(image: &mut TextureImage, boost: &FeatureBoost) {
    let (w, h) = (image.width as f32, image.height as f32);
    for y in 0..image.height {
        for x in 0..image.width {
            let u = x as f32 / (w - 1.0);
            let v = y as f32 / (h - 1.0);
            let dist =
                ((u - boost.center[0]).powi(2) + (v - boost.center[1]).powi(2)).sqrt();
            if dist >= boost.radius {
                continue;
            }
            let strength = 1.0 + (boost.gain - 1.0) * (1.0 - dist / boost.radius);
            let mut pixel = image.pixel(x, y);
            for channel in &mut pixel[..3] {
                *channel = (*channel as f32 * strength).clamp(0.0, 255.0) as u8;
            }
            image.set_pixel(x, y, pixel);
        }
    }
}

/// Tangent-space normal map from a grayscale height proxy.
///
/// A 3x3 edge-emphasis kernel supplies the gradients; the encoded vector
/// keeps the blue channel pointing out of the surface.
fn derive_normal_map(diffuse: &TextureImage) -> TextureImage {
    let (w, h) = (diffuse.width, diffuse.height);
    let mut normal = TextureImage {
        width: w,
        height: h,
        rgba: vec![0; (w * h * 4) as usize],
    };

    let height_at = |x: i64, y: i64| {
        let x = x.clamp(0, w as i64 - 1) as u32;
        let y = y.clamp(0, h as i64 - 1) as u32;
        let [r, g, b, _] = diffuse.pixel(x, y);
        (r as f32 + g as f32 + b as f32) / (3.0 * 255.0)
    };

    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let gx = (height_at(x + 1, y - 1) - height_at(x - 1, y - 1))
                + 2.0 * (height_at(x + 1, y) - height_at(x - 1, y))
                + (height_at(x + 1, y + 1) - height_at(x - 1, y + 1));
            let gy = (height_at(x - 1, y + 1) - height_at(x - 1, y - 1))
                + 2.0 * (height_at(x, y + 1) - height_at(x, y - 1))
                + (height_at(x + 1, y + 1) - height_at(x + 1, y - 1));

            let len = (gx * gx + gy * gy + 1.0).sqrt();
            let nx = -gx / len;
            let ny = -gy / len;
            let nz = 1.0 / len;

            normal.set_pixel(
                x as u32,
                y as u32,
                [
                    ((nx * 0.5 + 0.5) * 255.0) as u8,
                    ((ny * 0.5 + 0.5) * 255.0) as u8,
                    ((nz * 0.5 + 0.5) * 255.0) as u8,
                    255,
                ],
            );
        }
    }

    normal
}
