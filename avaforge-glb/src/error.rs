//! GLB encoding errors

use thiserror::Error;

/// Failures while packing or assembling the GLB container.
///
/// None of these are retried internally; the generation pipeline surfaces
/// them after one lower-fidelity fallback attempt.
#[derive(Error, Debug)]
pub enum GlbEncodingError {
    #[error("mesh has no vertices")]
    EmptyMesh,
    #[error("{attribute} has {actual} elements, expected {expected}")]
    AttributeMismatch {
        attribute: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u16, vertex_count: usize },
    #[error("non-finite position component in vertex {vertex}")]
    NonFiniteBounds { vertex: usize },
    #[error("scene document serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("container length mismatch: declared {declared}, produced {actual}")]
    LengthMismatch { declared: usize, actual: usize },
}
