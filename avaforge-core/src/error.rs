//! Error taxonomy for avatar generation
//!
//! Mesh and GLB failures propagate to the caller; texture enhancement
//! failures never do (the pipeline degrades to the unmodified source
//! texture instead).

use avaforge_glb::GlbEncodingError;
use thiserror::Error;

/// Fatal failures while synthesizing the mesh.
#[derive(Error, Debug)]
pub enum MeshGenerationError {
    #[error("pixel buffer is empty")]
    EmptyPixelBuffer,
    #[error("pixel buffer malformed: {width}x{height}x{channels} needs {expected} bytes, got {actual}")]
    MalformedPixelBuffer {
        width: u32,
        height: u32,
        channels: u8,
        expected: usize,
        actual: usize,
    },
    #[error("unsupported channel count {0} (expected 3 or 4)")]
    UnsupportedChannels(u8),
    #[error("geometry produced a non-finite value at vertex {vertex}")]
    NonFiniteGeometry { vertex: usize },
    #[error("mesh invariant violated: {0}")]
    InvariantViolation(String),
    #[error("generation cancelled")]
    Cancelled,
}

/// Non-fatal texture enhancement failures.
///
/// Callers must treat these as a signal to fall back to the source
/// texture, never as a reason to abort mesh generation.
#[derive(Error, Debug)]
pub enum TextureEnhancementError {
    #[error("image {width}x{height} too small for {stage}")]
    TooSmall {
        width: u32,
        height: u32,
        stage: &'static str,
    },
}

/// Combined error surface of one full generation request.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    Mesh(#[from] MeshGenerationError),
    #[error(transparent)]
    Glb(#[from] GlbEncodingError),
}
