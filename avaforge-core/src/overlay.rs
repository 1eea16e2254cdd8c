//! Trait overlays: accessory regions raise depth to a protrusion floor
//!
//! Every detected accessory has a fixed screen-space region and a depth
//! floor. Raising is max-wins; overlapping traits never stack.

use crate::analysis::CharacterAnalysis;
use crate::vertex::{BodyPart, GridVertex};

const SUNGLASSES_FLOOR: f32 = 0.6;
const HAT_FLOOR: f32 = 0.5;
const CLOTHING_FLOOR: f32 = 0.4;
const NECKLACE_FLOOR: f32 = 0.3;
const HELMET_FLOOR: f32 = 0.55;
const WEAPON_FLOOR: f32 = 0.45;
const MOUTH_FLOOR: f32 = 0.3;

fn in_sunglasses_region(u: f32, v: f32) -> bool {
    (0.2..0.4).contains(&v) && ((0.2..0.4).contains(&u) || (0.6..0.8).contains(&u))
}

fn in_hat_region(v: f32) -> bool {
    v < 0.3
}

fn in_clothing_region(v: f32) -> bool {
    (0.4..0.8).contains(&v)
}

fn in_necklace_region(u: f32, v: f32) -> bool {
    (0.35..0.45).contains(&v) && (u - 0.5).abs() < 0.15
}

fn in_weapon_region(u: f32, v: f32) -> bool {
    u > 0.8 && (0.4..0.7).contains(&v)
}

fn in_mouth_region(u: f32, v: f32) -> bool {
    (0.42..0.52).contains(&v) && (u - 0.5).abs() < 0.12
}

/// Apply every detected trait overlay to one grid vertex.
pub fn apply_overlays(analysis: &CharacterAnalysis, vertex: &mut GridVertex) {
    let (u, v) = (vertex.u, vertex.v);

    if analysis.eyewear.has_sunglasses && in_sunglasses_region(u, v) {
        vertex.raise(SUNGLASSES_FLOOR, BodyPart::Sunglasses);
    }
    if analysis.headwear.has_hat && in_hat_region(v) {
        vertex.raise(HAT_FLOOR, BodyPart::Hat);
    }
    if analysis.clothing.has_clothing && in_clothing_region(v) {
        vertex.raise(CLOTHING_FLOOR, BodyPart::Clothing);
    }
    if analysis.has_accessory("necklace") && in_necklace_region(u, v) {
        vertex.raise(NECKLACE_FLOOR, BodyPart::Necklace);
    }
    if analysis.has_accessory("helmet") && in_hat_region(v) {
        vertex.raise(HELMET_FLOOR, BodyPart::Helmet);
    }
    if analysis.has_accessory("weapon") && in_weapon_region(u, v) {
        vertex.raise(WEAPON_FLOOR, BodyPart::Weapon);
    }
    if analysis.mouth.style.is_some() && in_mouth_region(u, v) {
        vertex.raise(MOUTH_FLOOR, BodyPart::Mouth);
    }
}
