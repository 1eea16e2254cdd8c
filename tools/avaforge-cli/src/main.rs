//! Avaforge CLI - generate an avatar GLB from a character image
//!
//! # Usage
//!
//! ```bash
//! # Generate with an analysis document from the feature analyzer
//! avaforge generate avatar.png --analysis analysis.json --plan zeus -o avatar.glb
//!
//! # Quick run with an empty analysis (generic archetype)
//! avaforge generate avatar.png
//!
//! # Also write the enhanced textures next to the GLB
//! avaforge generate avatar.png --textures-dir out/
//! ```

mod textures;

use anyhow::{Context, Result, bail};
use avaforge_core::{
    CancelToken, CharacterAnalysis, GenerationOptions, GenerationRequest, PixelBuffer, UserPlan,
    generate,
};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

/// Avaforge - procedural 3D avatars from 2D character art
#[derive(Parser)]
#[command(name = "avaforge")]
#[command(about = "Generate avatar GLBs from character images")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a GLB from a character image
    Generate {
        /// Input character image (PNG or JPEG)
        input: PathBuf,

        /// Output .glb file (default: input with .glb extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Character analysis JSON from the feature analyzer
        #[arg(short, long)]
        analysis: Option<PathBuf>,

        /// Plan tier: free, reply_guy, spartan, zeus, goat
        #[arg(short, long, default_value = "free")]
        plan: String,

        /// Exact grid resolution, overriding the density policy
        #[arg(short, long)]
        resolution: Option<u32>,

        /// Directory for the enhanced diffuse/normal texture PNGs
        #[arg(long)]
        textures_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            analysis,
            plan,
            resolution,
            textures_dir,
        } => {
            let Some(plan) = UserPlan::parse(&plan) else {
                bail!("unknown plan tier '{plan}' (expected free, reply_guy, spartan, zeus or goat)");
            };

            let analysis = match analysis {
                Some(path) => {
                    let text = fs::read_to_string(&path)
                        .with_context(|| format!("reading analysis {}", path.display()))?;
                    serde_json::from_str::<CharacterAnalysis>(&text)
                        .with_context(|| format!("parsing analysis {}", path.display()))?
                }
                None => CharacterAnalysis::default(),
            };

            let decoded = image::open(&input)
                .with_context(|| format!("decoding image {}", input.display()))?
                .to_rgba8();
            let pixels = PixelBuffer::rgba(
                decoded.width(),
                decoded.height(),
                decoded.into_raw(),
            )?;

            tracing::info!(
                archetype = ?analysis.archetype,
                ?plan,
                "generating avatar from {}",
                input.display()
            );

            let result = generate(
                &GenerationRequest {
                    pixels: &pixels,
                    analysis: &analysis,
                    plan,
                },
                &GenerationOptions {
                    resolution,
                    skip_textures: textures_dir.is_none(),
                    cancel: CancelToken::new(),
                },
            )?;

            let output = output.unwrap_or_else(|| input.with_extension("glb"));
            fs::write(&output, &result.glb)
                .with_context(|| format!("writing {}", output.display()))?;
            tracing::info!(
                vertices = result.vertex_count,
                triangles = result.triangle_count,
                bytes = result.glb.len(),
                "wrote {}",
                output.display()
            );

            if let (Some(dir), Some(enhanced)) = (textures_dir, result.textures) {
                textures::write_textures(&dir, &enhanced)?;
            }
        }
    }

    Ok(())
}
