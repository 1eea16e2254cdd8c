//! PNG export for the enhanced texture output

use anyhow::{Context, Result};
use avaforge_core::{EnhancedTextures, TextureImage};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Write the enhanced textures as PNGs under `dir`.
///
/// Always writes `diffuse.png`; writes `normal.png` only when the plan
/// produced a normal map.
pub fn write_textures(dir: &Path, textures: &EnhancedTextures) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    write_png(&textures.diffuse, &dir.join("diffuse.png"))?;
    if let Some(normal) = &textures.normal {
        write_png(normal, &dir.join("normal.png"))?;
    }
    Ok(())
}

fn write_png(image: &TextureImage, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .with_context(|| format!("writing PNG header for {}", path.display()))?;
    writer
        .write_image_data(&image.rgba)
        .with_context(|| format!("writing PNG data for {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> TextureImage {
        TextureImage {
            width,
            height,
            rgba: rgba.repeat((width * height) as usize),
        }
    }

    #[test]
    fn writes_diffuse_and_normal() {
        let dir = tempfile::tempdir().unwrap();
        let textures = EnhancedTextures {
            diffuse: solid(8, 8, [200, 100, 50, 255]),
            normal: Some(solid(8, 8, [128, 128, 255, 255])),
        };

        write_textures(dir.path(), &textures).unwrap();

        assert!(dir.path().join("diffuse.png").exists());
        assert!(dir.path().join("normal.png").exists());
    }

    #[test]
    fn skips_normal_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let textures = EnhancedTextures {
            diffuse: solid(4, 4, [10, 20, 30, 255]),
            normal: None,
        };

        write_textures(dir.path(), &textures).unwrap();

        assert!(dir.path().join("diffuse.png").exists());
        assert!(!dir.path().join("normal.png").exists());
    }
}
