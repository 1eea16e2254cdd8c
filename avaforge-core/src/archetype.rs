//! Archetype anatomy configurations and final 3D mapping
//!
//! Each archetype is a closed table of named body regions. The mapper
//! evaluates every region against a grid coordinate and keeps the maximum
//! depth result across overlapping regions, then converts the accepted
//! depth into a 3D position. The table is selected once per generation
//! and threaded through the pipeline; nothing re-dispatches per vertex.

use crate::analysis::Archetype;
use crate::vertex::BodyPart;
use glam::Vec3;

/// Shape test for one body region, in normalized grid space.
#[derive(Debug, Clone, Copy)]
pub enum RegionShape {
    Sphere { center: [f32; 2], radius: f32 },
    Cylinder { center_u: f32, v_range: (f32, f32), radius: f32 },
    Oval { center: [f32; 2], radii: [f32; 2] },
}

impl RegionShape {
    /// Containment weight: 1 at the region core, 0 at the boundary,
    /// `None` outside. The square-root profile rounds the cross-section.
    pub fn weight(&self, u: f32, v: f32) -> Option<f32> {
        match *self {
            RegionShape::Sphere { center, radius } => {
                let d2 = (u - center[0]).powi(2) + (v - center[1]).powi(2);
                let nd2 = d2 / (radius * radius);
                (nd2 < 1.0).then(|| (1.0 - nd2).sqrt())
            }
            RegionShape::Cylinder {
                center_u,
                v_range,
                radius,
            } => {
                if !(v_range.0..v_range.1).contains(&v) {
                    return None;
                }
                let nd = (u - center_u).abs() / radius;
                (nd < 1.0).then(|| (1.0 - nd * nd).sqrt())
            }
            RegionShape::Oval { center, radii } => {
                let e = ((u - center[0]) / radii[0]).powi(2) + ((v - center[1]) / radii[1]).powi(2);
                (e < 1.0).then(|| (1.0 - e).sqrt())
            }
        }
    }
}

/// One named region of an anatomy layout.
#[derive(Debug, Clone, Copy)]
pub struct BodyRegion {
    pub name: &'static str,
    pub shape: RegionShape,
    /// Depth multiplier at the region core, eased out to 1.0 at the edge.
    pub depth_scale: f32,
}

/// A complete anatomy layout for one archetype.
#[derive(Debug, Clone, Copy)]
pub struct ArchetypeConfig {
    pub name: &'static str,
    pub regions: &'static [BodyRegion],
}

const GENERIC_HUMANOID: ArchetypeConfig = ArchetypeConfig {
    name: "generic_humanoid",
    regions: &[
        BodyRegion {
            name: "head",
            shape: RegionShape::Sphere {
                center: [0.5, 0.18],
                radius: 0.18,
            },
            depth_scale: 1.2,
        },
        BodyRegion {
            name: "neck",
            shape: RegionShape::Cylinder {
                center_u: 0.5,
                v_range: (0.3, 0.36),
                radius: 0.06,
            },
            depth_scale: 0.9,
        },
        BodyRegion {
            name: "torso",
            shape: RegionShape::Oval {
                center: [0.5, 0.55],
                radii: [0.22, 0.18],
            },
            depth_scale: 1.1,
        },
        BodyRegion {
            name: "left_arm",
            shape: RegionShape::Cylinder {
                center_u: 0.2,
                v_range: (0.38, 0.75),
                radius: 0.07,
            },
            depth_scale: 0.95,
        },
        BodyRegion {
            name: "right_arm",
            shape: RegionShape::Cylinder {
                center_u: 0.8,
                v_range: (0.38, 0.75),
                radius: 0.07,
            },
            depth_scale: 0.95,
        },
        BodyRegion {
            name: "left_leg",
            shape: RegionShape::Cylinder {
                center_u: 0.42,
                v_range: (0.78, 0.98),
                radius: 0.08,
            },
            depth_scale: 1.0,
        },
        BodyRegion {
            name: "right_leg",
            shape: RegionShape::Cylinder {
                center_u: 0.58,
                v_range: (0.78, 0.98),
                radius: 0.08,
            },
            depth_scale: 1.0,
        },
    ],
};

// Penguin: larger rounder head, dominant belly, vestigial flipper-arms,
// short legs.
const PENGUIN: ArchetypeConfig = ArchetypeConfig {
    name: "penguin",
    regions: &[
        BodyRegion {
            name: "head",
            shape: RegionShape::Sphere {
                center: [0.5, 0.22],
                radius: 0.24,
            },
            depth_scale: 1.3,
        },
        BodyRegion {
            name: "torso",
            shape: RegionShape::Oval {
                center: [0.5, 0.6],
                radii: [0.26, 0.24],
            },
            depth_scale: 1.25,
        },
        BodyRegion {
            name: "left_arm",
            shape: RegionShape::Cylinder {
                center_u: 0.18,
                v_range: (0.45, 0.62),
                radius: 0.05,
            },
            depth_scale: 0.8,
        },
        BodyRegion {
            name: "right_arm",
            shape: RegionShape::Cylinder {
                center_u: 0.82,
                v_range: (0.45, 0.62),
                radius: 0.05,
            },
            depth_scale: 0.8,
        },
        BodyRegion {
            name: "left_leg",
            shape: RegionShape::Cylinder {
                center_u: 0.44,
                v_range: (0.88, 0.98),
                radius: 0.06,
            },
            depth_scale: 0.85,
        },
        BodyRegion {
            name: "right_leg",
            shape: RegionShape::Cylinder {
                center_u: 0.56,
                v_range: (0.88, 0.98),
                radius: 0.06,
            },
            depth_scale: 0.85,
        },
    ],
};

// Ape: 1.6x head, broad chest, long thick arms.
const ANTHROPOMORPHIC_APE: ArchetypeConfig = ArchetypeConfig {
    name: "anthropomorphic_ape",
    regions: &[
        BodyRegion {
            name: "head",
            shape: RegionShape::Sphere {
                center: [0.5, 0.18],
                radius: 0.2,
            },
            depth_scale: 1.6,
        },
        BodyRegion {
            name: "neck",
            shape: RegionShape::Cylinder {
                center_u: 0.5,
                v_range: (0.3, 0.36),
                radius: 0.08,
            },
            depth_scale: 1.0,
        },
        BodyRegion {
            name: "chest",
            shape: RegionShape::Oval {
                center: [0.5, 0.52],
                radii: [0.28, 0.2],
            },
            depth_scale: 1.25,
        },
        BodyRegion {
            name: "left_arm",
            shape: RegionShape::Cylinder {
                center_u: 0.17,
                v_range: (0.34, 0.85),
                radius: 0.1,
            },
            depth_scale: 1.2,
        },
        BodyRegion {
            name: "right_arm",
            shape: RegionShape::Cylinder {
                center_u: 0.83,
                v_range: (0.34, 0.85),
                radius: 0.1,
            },
            depth_scale: 1.2,
        },
        BodyRegion {
            name: "left_leg",
            shape: RegionShape::Cylinder {
                center_u: 0.42,
                v_range: (0.8, 0.98),
                radius: 0.09,
            },
            depth_scale: 1.05,
        },
        BodyRegion {
            name: "right_leg",
            shape: RegionShape::Cylinder {
                center_u: 0.58,
                v_range: (0.8, 0.98),
                radius: 0.09,
            },
            depth_scale: 1.05,
        },
    ],
};

/// Anatomy layout for an archetype. Penguin and ape carry overrides;
/// everything else reconstructs against the generic humanoid.
pub fn config_for(archetype: Archetype) -> &'static ArchetypeConfig {
    match archetype {
        Archetype::Penguin => &PENGUIN,
        Archetype::AnthropomorphicApe => &ANTHROPOMORPHIC_APE,
        _ => &GENERIC_HUMANOID,
    }
}

/// Map one grid vertex to its final 3D position.
///
/// Region candidates ease the core depth_scale out to 1.0 at the region
/// boundary, so scales below 1.0 (vestigial limbs) genuinely flatten.
/// Overlay and fabricated tags keep their protrusion floors: regions may
/// only raise them.
pub fn map_to_position(
    config: &ArchetypeConfig,
    u: f32,
    v: f32,
    depth: f32,
    part: BodyPart,
) -> Vec3 {
    let mut mapped: Option<f32> = None;
    for region in config.regions {
        if let Some(weight) = region.shape.weight(u, v) {
            let candidate = depth * (1.0 + (region.depth_scale - 1.0) * weight);
            mapped = Some(mapped.map_or(candidate, |d| d.max(candidate)));
        }
    }

    let final_depth = match mapped {
        Some(d) if part.is_synthesized() => d.max(depth),
        Some(d) => d,
        None => depth,
    };

    Vec3::new((u - 0.5) * 2.0, (0.5 - v) * 2.0, final_depth)
}
