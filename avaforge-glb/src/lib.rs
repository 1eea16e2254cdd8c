//! GLB serialization for avaforge avatar meshes
//!
//! Packs flat vertex attribute buffers into a single binary blob with
//! 4-byte-aligned block offsets, builds the minimal glTF scene document
//! (one scene, one node, one mesh, one primitive), and assembles the final
//! GLB container byte-for-byte: 12-byte header, space-padded JSON chunk,
//! zero-padded BIN chunk.
//!
//! # Example
//!
//! ```no_run
//! use avaforge_glb::{MeshBuffers, encode_glb};
//!
//! let mesh = MeshBuffers {
//!     positions: &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]],
//!     uvs: &[[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]],
//!     normals: &[[0.0, 0.0, 1.0]; 3],
//!     indices: &[0, 1, 2],
//! };
//! let glb = encode_glb("Avatar", &mesh)?;
//! # Ok::<(), avaforge_glb::GlbEncodingError>(())
//! ```

pub mod blob;
pub mod document;
pub mod error;
pub mod glb;

pub use blob::{AccessorIndex, BinaryBlob};
pub use document::{AvatarAccessors, build_document};
pub use error::GlbEncodingError;
pub use glb::{GLB_MAGIC, assemble_glb, padded_len};

// Re-export the JSON document types for callers that inspect the scene graph.
pub use gltf_json as json;

/// Borrowed views over a finished mesh, ready for packing.
///
/// Attribute lengths must agree: `uvs.len()` and `normals.len()` equal
/// `positions.len()`, and every index must address a position.
#[derive(Debug, Clone, Copy)]
pub struct MeshBuffers<'a> {
    pub positions: &'a [[f32; 3]],
    pub uvs: &'a [[f32; 2]],
    pub normals: &'a [[f32; 3]],
    pub indices: &'a [u16],
}

impl MeshBuffers<'_> {
    /// Check the cross-attribute invariants before any bytes are written.
    pub fn validate(&self) -> Result<(), GlbEncodingError> {
        if self.positions.is_empty() {
            return Err(GlbEncodingError::EmptyMesh);
        }
        if self.uvs.len() != self.positions.len() {
            return Err(GlbEncodingError::AttributeMismatch {
                attribute: "TEXCOORD_0",
                expected: self.positions.len(),
                actual: self.uvs.len(),
            });
        }
        if self.normals.len() != self.positions.len() {
            return Err(GlbEncodingError::AttributeMismatch {
                attribute: "NORMAL",
                expected: self.positions.len(),
                actual: self.normals.len(),
            });
        }
        if let Some(&bad) = self
            .indices
            .iter()
            .find(|&&i| usize::from(i) >= self.positions.len())
        {
            return Err(GlbEncodingError::IndexOutOfRange {
                index: bad,
                vertex_count: self.positions.len(),
            });
        }
        Ok(())
    }
}

/// Encode a mesh as a complete GLB byte buffer.
///
/// Deterministic: the same mesh always serializes to the same bytes, so the
/// output is safe to content-hash. Texture payloads are not embedded yet;
/// enhanced diffuse/normal images travel beside the container as a secondary
/// output.
// TODO: embed diffuse/normal textures as GLB images (image bufferViews plus
// material/texture wiring in the document).
pub fn encode_glb(name: &str, mesh: &MeshBuffers) -> Result<Vec<u8>, GlbEncodingError> {
    mesh.validate()?;

    let mut blob = BinaryBlob::new();
    let accessors = AvatarAccessors {
        positions: blob.push_positions(mesh.positions)?,
        uvs: blob.push_uvs(mesh.uvs),
        normals: blob.push_normals(mesh.normals),
        indices: blob.push_indices(mesh.indices),
    };

    let root = build_document(name, &blob, &accessors);
    assemble_glb(&root, blob.bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Vec<[f32; 3]>, Vec<[f32; 2]>, Vec<[f32; 3]>, Vec<u16>) {
        (
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.5, 1.0, 0.0]],
            vec![[0.0, 0.0], [1.0, 0.0], [0.5, 1.0]],
            vec![[0.0, 0.0, 1.0]; 3],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn encode_glb_starts_with_magic() {
        let (p, t, n, i) = triangle();
        let glb = encode_glb(
            "Tri",
            &MeshBuffers {
                positions: &p,
                uvs: &t,
                normals: &n,
                indices: &i,
            },
        )
        .unwrap();
        assert_eq!(&glb[0..4], b"glTF");
    }

    #[test]
    fn encode_glb_rejects_out_of_range_index() {
        let (p, t, n, _) = triangle();
        let err = encode_glb(
            "Tri",
            &MeshBuffers {
                positions: &p,
                uvs: &t,
                normals: &n,
                indices: &[0, 1, 7],
            },
        )
        .unwrap_err();
        assert!(matches!(err, GlbEncodingError::IndexOutOfRange { .. }));
    }

    #[test]
    fn encode_glb_rejects_attribute_mismatch() {
        let (p, _, n, i) = triangle();
        let err = encode_glb(
            "Tri",
            &MeshBuffers {
                positions: &p,
                uvs: &[[0.0, 0.0]],
                normals: &n,
                indices: &i,
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GlbEncodingError::AttributeMismatch {
                attribute: "TEXCOORD_0",
                ..
            }
        ));
    }

    #[test]
    fn encode_glb_is_idempotent() {
        let (p, t, n, i) = triangle();
        let mesh = MeshBuffers {
            positions: &p,
            uvs: &t,
            normals: &n,
            indices: &i,
        };
        let a = encode_glb("Tri", &mesh).unwrap();
        let b = encode_glb("Tri", &mesh).unwrap();
        assert_eq!(a, b);
    }
}
