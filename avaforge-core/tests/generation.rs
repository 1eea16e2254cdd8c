//! End-to-end generation properties

use avaforge_core::{
    Archetype, CancelToken, CharacterAnalysis, GenerationOptions, GenerationRequest, PixelBuffer,
    UserPlan, generate, synthesize_mesh,
};
use avaforge_core::archetype::config_for;
use avaforge_core::topology::GridTopology;

fn uniform_gray(size: u32) -> PixelBuffer {
    PixelBuffer::rgb(size, size, vec![128; (size * size * 3) as usize]).unwrap()
}

fn black(size: u32) -> PixelBuffer {
    PixelBuffer::rgb(size, size, vec![0; (size * size * 3) as usize]).unwrap()
}

fn run(
    pixels: &PixelBuffer,
    analysis: &CharacterAnalysis,
    resolution: u32,
) -> avaforge_core::GlbOutput {
    generate(
        &GenerationRequest {
            pixels,
            analysis,
            plan: UserPlan::Free,
        },
        &GenerationOptions {
            resolution: Some(resolution),
            skip_textures: true,
            cancel: CancelToken::new(),
        },
    )
    .unwrap()
}

#[test]
fn uniform_gray_generic_at_96_grid() {
    // Scenario A: 64x64 gray source, generic archetype, 96x96 grid.
    let pixels = uniform_gray(64);
    let analysis = CharacterAnalysis::default();
    let output = run(&pixels, &analysis, 96);

    assert_eq!(output.vertex_count, 9_216);
    assert_eq!(output.triangle_count, 2 * 95 * 95);
    assert_eq!(&output.glb[0..4], b"glTF");
}

#[test]
fn mesh_buffer_invariants_hold() {
    let pixels = uniform_gray(32);
    let analysis = CharacterAnalysis::for_archetype(Archetype::Anime);
    let config = config_for(analysis.archetype);
    let mesh = synthesize_mesh(
        &GenerationRequest {
            pixels: &pixels,
            analysis: &analysis,
            plan: UserPlan::Free,
        },
        config,
        GridTopology::from_resolution(48),
        &CancelToken::new(),
    )
    .unwrap();

    let n = mesh.vertex_count();
    assert_eq!(mesh.vertices.len() % 3, 0);
    assert_eq!(mesh.uvs.len(), 2 * n);
    assert_eq!(mesh.normals.len(), 3 * n);
    assert!(n <= 65_535);
    assert!(mesh.indices.iter().all(|&i| (i as usize) < n));
}

#[test]
fn missing_arms_close_the_silhouette() {
    // Scenario B: arms flagged missing on a black source image still get
    // geometry in the arm bands.
    let pixels = black(32);
    let mut analysis = CharacterAnalysis::default();
    analysis.missing_parts.arms = true;

    let config = config_for(analysis.archetype);
    let topology = GridTopology::from_resolution(64);
    let request = GenerationRequest {
        pixels: &pixels,
        analysis: &analysis,
        plan: UserPlan::Free,
    };
    let with_arms = synthesize_mesh(&request, config, topology, &CancelToken::new()).unwrap();

    let plain = CharacterAnalysis::default();
    let without = synthesize_mesh(
        &GenerationRequest {
            pixels: &pixels,
            analysis: &plain,
            plan: UserPlan::Free,
        },
        config,
        topology,
        &CancelToken::new(),
    )
    .unwrap();

    let res = topology.resolution();
    let mut raised = 0usize;
    for y in 0..res {
        let v = topology.coord(y);
        for x in 0..res {
            let u = topology.coord(x);
            if (0.4..0.8).contains(&v) && (u < 0.3 || u > 0.7) {
                let idx = ((y * res + x) * 3 + 2) as usize;
                assert!(with_arms.vertices[idx] > 0.0, "flat arm band at u={u} v={v}");
                if with_arms.vertices[idx] > without.vertices[idx] {
                    raised += 1;
                }
            }
        }
    }
    assert!(raised > 0, "missing-arm synthesis never raised depth");
}

#[test]
fn hat_floor_covers_the_head_band() {
    // Scenario C: hat detected, every vertex above v=0.3 sits at >= 0.5.
    let pixels = black(32);
    let mut analysis = CharacterAnalysis::default();
    analysis.headwear.has_hat = true;

    let config = config_for(analysis.archetype);
    let topology = GridTopology::from_resolution(64);
    let mesh = synthesize_mesh(
        &GenerationRequest {
            pixels: &pixels,
            analysis: &analysis,
            plan: UserPlan::Free,
        },
        config,
        topology,
        &CancelToken::new(),
    )
    .unwrap();

    let res = topology.resolution();
    for y in 0..res {
        let v = topology.coord(y);
        if v >= 0.3 {
            continue;
        }
        for x in 0..res {
            let z = mesh.vertices[((y * res + x) * 3 + 2) as usize];
            assert!(z >= 0.5, "hat floor violated at v={v}: z={z}");
        }
    }
}

#[test]
fn identical_inputs_produce_identical_glb() {
    let pixels = uniform_gray(48);
    let mut analysis = CharacterAnalysis::for_archetype(Archetype::Penguin);
    analysis.clothing.has_clothing = true;
    analysis.accessories.insert("necklace".to_string());

    let a = run(&pixels, &analysis, 64);
    let b = run(&pixels, &analysis, 64);
    assert_eq!(a.glb, b.glb);
}

#[test]
fn glb_header_round_trips() {
    let pixels = uniform_gray(32);
    let analysis = CharacterAnalysis::for_archetype(Archetype::Robot);
    let glb = run(&pixels, &analysis, 32).glb;

    let magic = u32::from_le_bytes(glb[0..4].try_into().unwrap());
    let version = u32::from_le_bytes(glb[4..8].try_into().unwrap());
    let total = u32::from_le_bytes(glb[8..12].try_into().unwrap());
    assert_eq!(magic, 0x4654_6C67);
    assert_eq!(version, 2);
    assert_eq!(total as usize, glb.len());

    let json_len = u32::from_le_bytes(glb[12..16].try_into().unwrap()) as usize;
    assert_eq!(json_len % 4, 0);
    let bin_offset = 20 + json_len;
    let bin_len = u32::from_le_bytes(glb[bin_offset..bin_offset + 4].try_into().unwrap()) as usize;
    assert_eq!(bin_len % 4, 0);
    assert_eq!(bin_offset + 8 + bin_len, glb.len());
}

#[test]
fn bounding_box_is_ordered_in_the_document() {
    let pixels = uniform_gray(32);
    let analysis = CharacterAnalysis::default();
    let glb = run(&pixels, &analysis, 32).glb;

    let json_len = u32::from_le_bytes(glb[12..16].try_into().unwrap()) as usize;
    let document: serde_json::Value = serde_json::from_slice(&glb[20..20 + json_len]).unwrap();
    let accessor = &document["accessors"][0];
    let (min, max) = (
        accessor["min"].as_array().unwrap(),
        accessor["max"].as_array().unwrap(),
    );
    for axis in 0..3 {
        assert!(min[axis].as_f64().unwrap() <= max[axis].as_f64().unwrap());
    }
}

#[test]
fn every_archetype_generates() {
    let pixels = uniform_gray(24);
    for archetype in [
        Archetype::Generic,
        Archetype::Human,
        Archetype::Anime,
        Archetype::Nft,
        Archetype::Cartoon,
        Archetype::Animal,
        Archetype::Robot,
        Archetype::Penguin,
        Archetype::AnthropomorphicApe,
    ] {
        let analysis = CharacterAnalysis::for_archetype(archetype);
        let output = run(&pixels, &analysis, 24);
        assert_eq!(&output.glb[0..4], b"glTF", "{archetype:?}");
    }
}
