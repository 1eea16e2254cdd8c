//! In-memory mesh with flat attribute buffers
//!
//! Buffers are preallocated from the known grid resolution; the u16 index
//! invariant is enforced when the topology is chosen, not patched up
//! afterwards.

use crate::error::MeshGenerationError;
use glam::Vec3;

/// Flat-buffer triangle mesh.
///
/// Invariants: `vertices.len() == 3n`, `uvs.len() == 2n`,
/// `normals.len() == 3n`, every index `< n`, `n ≤ 65535`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<f32>,
    pub indices: Vec<u16>,
    pub uvs: Vec<f32>,
    pub normals: Vec<f32>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Positions viewed as `[x, y, z]` triples for GLB packing.
    pub fn positions(&self) -> &[[f32; 3]] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn uv_pairs(&self) -> &[[f32; 2]] {
        bytemuck::cast_slice(&self.uvs)
    }

    pub fn normal_triples(&self) -> &[[f32; 3]] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Check every mesh invariant, including finiteness of positions.
    pub fn validate(&self) -> Result<(), MeshGenerationError> {
        let n = self.vertex_count();
        if self.vertices.len() % 3 != 0 {
            return Err(MeshGenerationError::InvariantViolation(format!(
                "vertex buffer length {} is not a multiple of 3",
                self.vertices.len()
            )));
        }
        if n > 65_535 {
            return Err(MeshGenerationError::InvariantViolation(format!(
                "{n} vertices exceed the u16 index space"
            )));
        }
        if self.uvs.len() != 2 * n {
            return Err(MeshGenerationError::InvariantViolation(format!(
                "uv buffer length {} for {n} vertices",
                self.uvs.len()
            )));
        }
        if self.normals.len() != 3 * n {
            return Err(MeshGenerationError::InvariantViolation(format!(
                "normal buffer length {} for {n} vertices",
                self.normals.len()
            )));
        }
        if let Some(&bad) = self.indices.iter().find(|&&i| usize::from(i) >= n) {
            return Err(MeshGenerationError::InvariantViolation(format!(
                "index {bad} out of range for {n} vertices"
            )));
        }
        if let Some(position) = self.vertices.iter().position(|value| !value.is_finite()) {
            return Err(MeshGenerationError::NonFiniteGeometry {
                vertex: position / 3,
            });
        }
        Ok(())
    }

    /// Area-weighted smooth normals from the triangle list.
    ///
    /// Cross products weight each face's contribution by its area, so
    /// sliver triangles barely disturb the shared vertex normal.
    pub fn compute_smooth_normals(&mut self) {
        let n = self.vertex_count();
        let mut accumulated = vec![Vec3::ZERO; n];

        for triangle in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [
                triangle[0] as usize,
                triangle[1] as usize,
                triangle[2] as usize,
            ];
            let p0 = Vec3::from_slice(&self.vertices[i0 * 3..i0 * 3 + 3]);
            let p1 = Vec3::from_slice(&self.vertices[i1 * 3..i1 * 3 + 3]);
            let p2 = Vec3::from_slice(&self.vertices[i2 * 3..i2 * 3 + 3]);

            let face_normal = (p1 - p0).cross(p2 - p0);
            accumulated[i0] += face_normal;
            accumulated[i1] += face_normal;
            accumulated[i2] += face_normal;
        }

        self.normals.clear();
        self.normals.reserve(n * 3);
        for normal in accumulated {
            let normal = normal.normalize_or(Vec3::Z);
            self.normals.extend_from_slice(&normal.to_array());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        let mut mesh = Mesh {
            vertices: vec![
                0.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, //
                0.0, 1.0, 0.0, //
                1.0, 1.0, 0.0,
            ],
            indices: vec![0, 2, 1, 1, 2, 3],
            uvs: vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0],
            normals: Vec::new(),
        };
        mesh.compute_smooth_normals();
        mesh
    }

    #[test]
    fn quad_passes_validation() {
        quad().validate().unwrap();
    }

    #[test]
    fn length_invariants_are_enforced() {
        let mut mesh = quad();
        mesh.uvs.pop();
        assert!(matches!(
            mesh.validate().unwrap_err(),
            MeshGenerationError::InvariantViolation(_)
        ));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut mesh = quad();
        mesh.indices[0] = 9;
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn non_finite_position_is_rejected() {
        let mut mesh = quad();
        mesh.vertices[4] = f32::NAN;
        assert!(matches!(
            mesh.validate().unwrap_err(),
            MeshGenerationError::NonFiniteGeometry { vertex: 1 }
        ));
    }

    #[test]
    fn flat_quad_normals_point_along_negative_z() {
        let mesh = quad();
        assert_eq!(mesh.normals.len(), 12);
        for normal in mesh.normal_triples() {
            assert!((normal[2].abs() - 1.0).abs() < 1e-6);
            assert!(normal[0].abs() < 1e-6);
        }
    }

    #[test]
    fn normals_are_unit_length() {
        let mut mesh = quad();
        mesh.vertices[2] = 0.5; // perturb one z
        mesh.compute_smooth_normals();
        for normal in mesh.normal_triples() {
            let len = (normal[0].powi(2) + normal[1].powi(2) + normal[2].powi(2)).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
        }
    }
}
