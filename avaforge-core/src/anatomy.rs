//! Fabrication of anatomy missing from the source art
//!
//! Cropped or stylized character art often omits limbs entirely. Each
//! flagged part gets primitive geometry from a signed-distance-style
//! falloff around a centerline, so the silhouette closes even where the
//! source pixels are empty.

use crate::analysis::MissingParts;
use crate::vertex::{BodyPart, GridVertex};

const ARM_BAND: (f32, f32) = (0.4, 0.8);
const ARM_CENTERLINES: [f32; 2] = [0.15, 0.85];
const ARM_HALF_WIDTH: f32 = 0.15;
const ARM_FLOOR: f32 = 0.5;

const LEG_CENTERLINES: [f32; 2] = [0.4, 0.6];
const LEG_HALF_WIDTH: f32 = 0.08;
const LEG_FLOOR: f32 = 0.5;

const HAND_CENTERS: [[f32; 2]; 2] = [[0.15, 0.78], [0.85, 0.78]];
const HAND_RADIUS: f32 = 0.07;
const HAND_FLOOR: f32 = 0.45;

const TORSO_CENTER: [f32; 2] = [0.5, 0.6];
const TORSO_RADII: [f32; 2] = [0.25, 0.2];
const TORSO_FLOOR: f32 = 0.55;

/// Linear centerline falloff: full floor on the centerline, zero at the
/// half-width edge.
fn centerline_depth(u: f32, centerline: f32, half_width: f32, floor: f32) -> Option<f32> {
    let offset = (u - centerline).abs();
    (offset < half_width).then(|| floor * (1.0 - offset / half_width))
}

/// Fabricate geometry for every flagged missing part on one grid vertex.
pub fn synthesize_missing(missing: &MissingParts, vertex: &mut GridVertex) {
    let (u, v) = (vertex.u, vertex.v);

    if missing.arms && (ARM_BAND.0..ARM_BAND.1).contains(&v) && (u < 0.3 || u > 0.7) {
        for (side, centerline) in ARM_CENTERLINES.iter().enumerate() {
            if let Some(depth) = centerline_depth(u, *centerline, ARM_HALF_WIDTH, ARM_FLOOR) {
                let part = if side == 0 {
                    BodyPart::GeneratedLeftArm
                } else {
                    BodyPart::GeneratedRightArm
                };
                vertex.raise(depth, part);
            }
        }
    }

    if missing.legs && v > 0.8 {
        for (side, centerline) in LEG_CENTERLINES.iter().enumerate() {
            if let Some(depth) = centerline_depth(u, *centerline, LEG_HALF_WIDTH, LEG_FLOOR) {
                let part = if side == 0 {
                    BodyPart::GeneratedLeftLeg
                } else {
                    BodyPart::GeneratedRightLeg
                };
                vertex.raise(depth, part);
            }
        }
    }

    if missing.hands {
        for center in HAND_CENTERS {
            let dist = ((u - center[0]).powi(2) + (v - center[1]).powi(2)).sqrt();
            if dist < HAND_RADIUS {
                vertex.raise(
                    HAND_FLOOR * (1.0 - dist / HAND_RADIUS),
                    BodyPart::GeneratedHand,
                );
            }
        }
    }

    if missing.torso && (0.4..0.8).contains(&v) {
        let e = ((u - TORSO_CENTER[0]) / TORSO_RADII[0]).powi(2)
            + ((v - TORSO_CENTER[1]) / TORSO_RADII[1]).powi(2);
        if e < 1.0 {
            vertex.raise(TORSO_FLOOR * (1.0 - e), BodyPart::GeneratedTorso);
        }
    }
}
