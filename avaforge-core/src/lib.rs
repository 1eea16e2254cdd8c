//! Procedural 3D avatar synthesis from a single 2D character image
//!
//! Given a character image and a structured feature analysis of it, this
//! crate reconstructs a plausible textured 3D mesh and serializes it as a
//! GLB container:
//!
//! 1. Sample the image over a square grid sized by the plan/complexity
//!    policy ([`topology`]).
//! 2. Fabricate multi-view depth per sample and shape it by archetype
//!    ([`depth`], [`vertex`]).
//! 3. Raise depth in detected accessory regions ([`overlay`]) and
//!    fabricate anatomy the source art omits ([`anatomy`]).
//! 4. Map every sample into 3D through the archetype's anatomy table
//!    ([`archetype`]) and triangulate ([`mesh`]).
//! 5. Encode the result as GLB via `avaforge-glb`, with enhanced textures
//!    as a secondary output ([`texture`]).
//!
//! The pipeline is synchronous, CPU-bound, and deterministic: no I/O, no
//! clock, no RNG. Independent requests can run concurrently; the only
//! shared state is the read-only archetype tables.
//!
//! # Example
//!
//! ```no_run
//! use avaforge_core::{
//!     CharacterAnalysis, GenerationOptions, GenerationRequest, PixelBuffer,
//!     UserPlan, generate,
//! };
//!
//! let pixels = PixelBuffer::rgb(64, 64, vec![128; 64 * 64 * 3])?;
//! let analysis = CharacterAnalysis::default();
//! let output = generate(
//!     &GenerationRequest {
//!         pixels: &pixels,
//!         analysis: &analysis,
//!         plan: UserPlan::Free,
//!     },
//!     &GenerationOptions::default(),
//! )?;
//! assert_eq!(&output.glb[0..4], b"glTF");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod analysis;
pub mod anatomy;
pub mod archetype;
pub mod depth;
pub mod error;
pub mod mesh;
pub mod overlay;
pub mod pipeline;
pub mod pixels;
pub mod quality;
pub mod texture;
pub mod topology;
pub mod vertex;

pub use analysis::{Archetype, CharacterAnalysis, Complexity, MissingParts};
pub use error::{GenerationError, MeshGenerationError, TextureEnhancementError};
pub use mesh::Mesh;
pub use pipeline::{
    CancelToken, GenerationOptions, GenerationRequest, GlbOutput, generate, synthesize_mesh,
};
pub use pixels::PixelBuffer;
pub use quality::{DensityTier, QualitySettings, UserPlan};
pub use texture::{EnhancedTextures, TextureImage};
pub use vertex::BodyPart;
