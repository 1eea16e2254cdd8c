//! Grid resolution policy and triangle topology
//!
//! Target vertex counts come from a fixed `(archetype, complexity)` table
//! scaled by the plan's density tier. Grid resolution is the square root
//! of the target, clamped so the vertex count always fits the u16 index
//! space; the invariant is enforced here, at construction time.

use crate::analysis::{Archetype, Complexity};
use crate::quality::DensityTier;

/// Hard cap: `MAX_RESOLUTION² = 65025 ≤ 65535` keeps every index a u16.
pub const MAX_RESOLUTION: u32 = 255;
pub const MIN_RESOLUTION: u32 = 8;

/// Baseline target vertex count per archetype at moderate complexity.
fn base_vertex_target(archetype: Archetype) -> u32 {
    match archetype {
        Archetype::Human => 25_000,
        Archetype::Robot => 24_000,
        Archetype::AnthropomorphicApe => 26_000,
        Archetype::Anime => 22_000,
        Archetype::Animal => 20_000,
        Archetype::Nft => 18_000,
        Archetype::Cartoon => 16_000,
        Archetype::Penguin => 15_000,
        Archetype::Generic => 15_000,
    }
}

/// Target vertex count for one generation.
pub fn target_vertex_count(
    archetype: Archetype,
    complexity: Complexity,
    density: DensityTier,
) -> u32 {
    let scaled =
        base_vertex_target(archetype) as f32 * complexity.vertex_scale() * density.vertex_scale();
    scaled as u32
}

/// Square grid topology for the synthesized surface.
#[derive(Debug, Clone, Copy)]
pub struct GridTopology {
    resolution: u32,
}

impl GridTopology {
    /// Resolution from a target vertex count, clamped into the valid range.
    pub fn from_target(target_vertices: u32) -> Self {
        let resolution = (target_vertices as f32).sqrt().floor() as u32;
        Self {
            resolution: resolution.clamp(MIN_RESOLUTION, MAX_RESOLUTION),
        }
    }

    /// Exact resolution, still clamped to the u16 index space.
    pub fn from_resolution(resolution: u32) -> Self {
        Self {
            resolution: resolution.clamp(2, MAX_RESOLUTION),
        }
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn vertex_count(&self) -> usize {
        (self.resolution * self.resolution) as usize
    }

    pub fn triangle_count(&self) -> usize {
        let cells = (self.resolution - 1) as usize;
        cells * cells * 2
    }

    /// Normalized grid coordinate of column `x` / row `y`.
    pub fn coord(&self, index: u32) -> f32 {
        index as f32 / (self.resolution - 1) as f32
    }

    /// Emit two counter-clockwise triangles per interior grid cell.
    ///
    /// Cells whose corner indices would exceed the vertex count are
    /// skipped; with a square grid that never fires, but the guard keeps
    /// the index invariant local.
    pub fn build_indices(&self) -> Vec<u16> {
        let res = self.resolution;
        let vertex_count = self.vertex_count();
        let mut indices = Vec::with_capacity(self.triangle_count() * 3);

        for y in 0..res - 1 {
            for x in 0..res - 1 {
                let top_left = y * res + x;
                let top_right = top_left + 1;
                let bottom_left = (y + 1) * res + x;
                let bottom_right = bottom_left + 1;

                if bottom_right as usize >= vertex_count {
                    continue;
                }

                indices.extend_from_slice(&[
                    top_left as u16,
                    bottom_left as u16,
                    top_right as u16,
                ]);
                indices.extend_from_slice(&[
                    top_right as u16,
                    bottom_left as u16,
                    bottom_right as u16,
                ]);
            }
        }

        indices
    }

    /// Interleaved UVs for every grid vertex, row-major like positions.
    pub fn build_uvs(&self) -> Vec<f32> {
        let res = self.resolution;
        let mut uvs = Vec::with_capacity(self.vertex_count() * 2);
        for y in 0..res {
            for x in 0..res {
                uvs.push(self.coord(x));
                uvs.push(self.coord(y));
            }
        }
        uvs
    }
}
