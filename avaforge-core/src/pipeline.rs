//! Generation pipeline
//!
//! One request flows strictly downward: sample -> depth -> overlays ->
//! fabricated anatomy -> archetype mapping -> topology -> GLB. The whole
//! pass is a pure function of its inputs plus the fixed lookup tables, so
//! repeated runs produce byte-identical containers.
//!
//! Cost grows quadratically with the grid resolution, so the request
//! carries a cooperative cancellation token checked once per grid row.

use crate::analysis::CharacterAnalysis;
use crate::anatomy::synthesize_missing;
use crate::archetype::{ArchetypeConfig, config_for, map_to_position};
use crate::error::{GenerationError, MeshGenerationError};
use crate::mesh::Mesh;
use crate::overlay::apply_overlays;
use crate::pixels::PixelBuffer;
use crate::quality::UserPlan;
use crate::texture::{EnhancedTextures, enhance_or_fallback};
use crate::topology::{GridTopology, target_vertex_count};
use crate::vertex::synthesize_vertex;
use avaforge_glb::{MeshBuffers, encode_glb};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

/// Cooperative cancellation handle, cloneable across threads.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> Result<(), MeshGenerationError> {
        if self.is_cancelled() {
            Err(MeshGenerationError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// One self-contained generation request.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub pixels: &'a PixelBuffer,
    pub analysis: &'a CharacterAnalysis,
    pub plan: UserPlan,
}

/// Caller-side knobs that are not part of the character itself.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Exact grid resolution, overriding the target-vertex-count policy.
    pub resolution: Option<u32>,
    /// Skip texture enhancement entirely (the GLB carries no textures yet
    /// either way; this only suppresses the secondary output).
    pub skip_textures: bool,
    pub cancel: CancelToken,
}

/// Finished generation: the GLB container plus the secondary texture
/// output for the external upload pipeline.
#[derive(Debug, Clone)]
pub struct GlbOutput {
    pub glb: Vec<u8>,
    pub textures: Option<EnhancedTextures>,
    pub vertex_count: usize,
    pub triangle_count: usize,
}

/// Run the full pipeline for one request.
///
/// Mesh and GLB failures propagate; before giving up on a GLB encoding
/// failure the pipeline retries once at lower fidelity without textures.
pub fn generate(
    request: &GenerationRequest,
    options: &GenerationOptions,
) -> Result<GlbOutput, GenerationError> {
    let quality = request.plan.quality();
    let config = config_for(request.analysis.archetype);
    let topology = match options.resolution {
        Some(resolution) => GridTopology::from_resolution(resolution),
        None => GridTopology::from_target(target_vertex_count(
            request.analysis.archetype,
            request.analysis.complexity,
            quality.density,
        )),
    };

    debug!(
        archetype = config.name,
        resolution = topology.resolution(),
        vertices = topology.vertex_count(),
        "synthesizing avatar mesh"
    );

    let mesh = synthesize_mesh(request, config, topology, &options.cancel)?;

    let textures = if options.skip_textures {
        None
    } else {
        Some(enhance_or_fallback(request.pixels, &quality))
    };

    let glb = match encode_mesh(&mesh) {
        Ok(glb) => glb,
        Err(error) => {
            // One lower-fidelity, textureless attempt before giving up.
            warn!(%error, "GLB encoding failed, retrying at reduced fidelity");
            let reduced = GridTopology::from_resolution(topology.resolution() / 2);
            let mesh = synthesize_mesh(request, config, reduced, &options.cancel)?;
            let glb = encode_mesh(&mesh)?;
            info!(resolution = reduced.resolution(), "fallback GLB encoded");
            return Ok(GlbOutput {
                vertex_count: mesh.vertex_count(),
                triangle_count: mesh.triangle_count(),
                glb,
                textures: None,
            });
        }
    };

    info!(
        bytes = glb.len(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "avatar GLB generated"
    );

    Ok(GlbOutput {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
        glb,
        textures,
    })
}

/// Synthesize the in-memory mesh for a fixed topology.
pub fn synthesize_mesh(
    request: &GenerationRequest,
    config: &ArchetypeConfig,
    topology: GridTopology,
    cancel: &CancelToken,
) -> Result<Mesh, MeshGenerationError> {
    let res = topology.resolution();
    let vertex_count = topology.vertex_count();
    let mut vertices = Vec::with_capacity(vertex_count * 3);

    for y in 0..res {
        cancel.check()?;
        let v = topology.coord(y);
        for x in 0..res {
            let u = topology.coord(x);

            let mut vertex = synthesize_vertex(request.pixels, request.analysis.archetype, u, v);
            apply_overlays(request.analysis, &mut vertex);
            synthesize_missing(&request.analysis.missing_parts, &mut vertex);

            let position = map_to_position(config, u, v, vertex.depth, vertex.part);
            vertices.extend_from_slice(&position.to_array());
        }
    }

    let mut mesh = Mesh {
        vertices,
        indices: topology.build_indices(),
        uvs: topology.build_uvs(),
        normals: Vec::new(),
    };
    mesh.compute_smooth_normals();
    mesh.validate()?;
    Ok(mesh)
}

fn encode_mesh(mesh: &Mesh) -> Result<Vec<u8>, avaforge_glb::GlbEncodingError> {
    encode_glb(
        "Avatar",
        &MeshBuffers {
            positions: mesh.positions(),
            uvs: mesh.uv_pairs(),
            normals: mesh.normal_triples(),
            indices: &mesh.indices,
        },
    )
}
