//! Per-grid-cell vertex synthesis
//!
//! Samples the source image at each grid cell, accumulates the archetype
//! feature boost, estimates depth, and classifies a coarse body part from
//! the vertical coordinate.

use crate::analysis::Archetype;
use crate::depth::estimate_depth;
use crate::pixels::{PixelBuffer, SampledPixel};

/// Anatomical tag carried by every grid vertex.
///
/// Coarse parts come from the vertical classifier; `Generated*` tags mark
/// fabricated anatomy; the remainder are trait-overlay relabels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPart {
    HeadTop,
    Face,
    Torso,
    Legs,
    GeneratedLeftArm,
    GeneratedRightArm,
    GeneratedLeftLeg,
    GeneratedRightLeg,
    GeneratedHand,
    GeneratedTorso,
    Sunglasses,
    Hat,
    Clothing,
    Necklace,
    Helmet,
    Weapon,
    Mouth,
    Ear,
}

impl BodyPart {
    /// Coarse classification purely from the vertical coordinate.
    pub fn classify(v: f32) -> Self {
        if v < 0.3 {
            BodyPart::HeadTop
        } else if v < 0.6 {
            BodyPart::Face
        } else if v < 0.8 {
            BodyPart::Torso
        } else {
            BodyPart::Legs
        }
    }

    /// Whether this tag was fabricated or overlaid rather than classified.
    pub fn is_synthesized(self) -> bool {
        !matches!(
            self,
            BodyPart::HeadTop | BodyPart::Face | BodyPart::Torso | BodyPart::Legs
        )
    }
}

/// Intermediate vertex record, one per grid sample.
#[derive(Debug, Clone, Copy)]
pub struct GridVertex {
    pub u: f32,
    pub v: f32,
    pub depth: f32,
    pub part: BodyPart,
    /// Sampled color, normalized to [0, 1] per channel.
    pub color: [f32; 3],
}

impl GridVertex {
    /// Raise depth to a protrusion floor and relabel. Max-wins: overlays
    /// and fabricated anatomy never stack additively.
    pub fn raise(&mut self, floor: f32, part: BodyPart) {
        if floor > self.depth {
            self.depth = floor;
            self.part = part;
        } else if floor > 0.0 && self.part == BodyPart::classify(self.v) {
            // Depth already above the floor; still take the label.
            self.part = part;
        }
    }
}

/// Archetype-specific depth boost for facial/readable features.
pub fn feature_boost(archetype: Archetype, u: f32, v: f32, pixel: &SampledPixel) -> f32 {
    let du = (u - 0.5).abs();
    match archetype {
        Archetype::Anime => {
            let mut boost = 0.0;
            if (0.25..0.4).contains(&v) && ((0.3..0.45).contains(&u) || (0.55..0.7).contains(&u)) {
                boost += 0.15;
            }
            if (0.55..0.65).contains(&v) && du < 0.1 {
                boost += 0.1;
            }
            boost
        }
        Archetype::Nft => {
            // Channel contrast stands in for painted detail.
            let [r, g, b] = pixel.rgb;
            let max = r.max(g).max(b) as f32 / 255.0;
            let min = r.min(g).min(b) as f32 / 255.0;
            (max - min) * 0.3
        }
        Archetype::Cartoon => {
            let dist = (du * du + (v - 0.5) * (v - 0.5)).sqrt();
            (1.0 - dist / 0.5).max(0.0) * 0.15
        }
        Archetype::Animal => {
            let mut boost = 0.0;
            if (0.4..0.55).contains(&v) && du < 0.15 {
                boost += 0.15;
            }
            if v < 0.2 && ((0.15..0.3).contains(&u) || (0.7..0.85).contains(&u)) {
                boost += 0.12;
            }
            boost
        }
        Archetype::Robot => {
            let mut boost = 0.0;
            if pixel.brightness > 0.6 {
                boost += 0.1;
            }
            if v < 0.35 {
                boost += 0.08;
            }
            boost
        }
        Archetype::Human => {
            let mut boost = 0.0;
            if (0.45..0.55).contains(&v) && du < 0.06 {
                boost += 0.12;
            }
            if (0.4..0.5).contains(&v) && (0.12..0.25).contains(&du) {
                boost += 0.08;
            }
            boost
        }
        Archetype::Penguin => {
            if (0.3..0.45).contains(&v) && du < 0.08 {
                0.1 // beak
            } else {
                0.0
            }
        }
        Archetype::AnthropomorphicApe => {
            if (0.2..0.3).contains(&v) && du < 0.3 {
                0.1 // brow ridge
            } else {
                0.0
            }
        }
        Archetype::Generic => 0.0,
    }
}

/// Synthesize the raw vertex record for one grid cell.
pub fn synthesize_vertex(pixels: &PixelBuffer, archetype: Archetype, u: f32, v: f32) -> GridVertex {
    let pixel = pixels.sample(u, v);
    let boost = feature_boost(archetype, u, v, &pixel);
    let depth = estimate_depth(archetype, u, v, pixel.brightness, boost);

    let mut part = BodyPart::classify(v);
    // Animal ears read as their own part for downstream mapping.
    if archetype == Archetype::Animal
        && v < 0.2
        && ((0.15..0.3).contains(&u) || (0.7..0.85).contains(&u))
    {
        part = BodyPart::Ear;
    }

    GridVertex {
        u,
        v,
        depth,
        part,
        color: [
            pixel.rgb[0] as f32 / 255.0,
            pixel.rgb[1] as f32 / 255.0,
            pixel.rgb[2] as f32 / 255.0,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_buffer() -> PixelBuffer {
        PixelBuffer::rgb(4, 4, vec![128; 4 * 4 * 3]).unwrap()
    }

    #[test]
    fn vertical_classifier_cuts_at_expected_bands() {
        assert_eq!(BodyPart::classify(0.0), BodyPart::HeadTop);
        assert_eq!(BodyPart::classify(0.29), BodyPart::HeadTop);
        assert_eq!(BodyPart::classify(0.3), BodyPart::Face);
        assert_eq!(BodyPart::classify(0.6), BodyPart::Torso);
        assert_eq!(BodyPart::classify(0.8), BodyPart::Legs);
        assert_eq!(BodyPart::classify(1.0), BodyPart::Legs);
    }

    #[test]
    fn raise_is_max_wins_not_additive() {
        let mut vertex = synthesize_vertex(&gray_buffer(), Archetype::Generic, 0.5, 0.1);
        vertex.raise(0.5, BodyPart::Hat);
        assert_eq!(vertex.depth, 0.5);
        assert_eq!(vertex.part, BodyPart::Hat);
        vertex.raise(0.3, BodyPart::Helmet);
        // Lower floor must not pull the depth back down.
        assert_eq!(vertex.depth, 0.5);
    }

    #[test]
    fn nft_boost_scales_with_channel_contrast() {
        let saturated = SampledPixel {
            rgb: [255, 0, 0],
            brightness: 1.0 / 3.0,
        };
        let gray = SampledPixel {
            rgb: [128, 128, 128],
            brightness: 0.5,
        };
        assert!(feature_boost(Archetype::Nft, 0.5, 0.5, &saturated) > 0.25);
        assert_eq!(feature_boost(Archetype::Nft, 0.5, 0.5, &gray), 0.0);
    }

    #[test]
    fn animal_ears_get_their_own_tag() {
        let vertex = synthesize_vertex(&gray_buffer(), Archetype::Animal, 0.2, 0.1);
        assert_eq!(vertex.part, BodyPart::Ear);
    }

    #[test]
    fn color_is_normalized_sample() {
        let vertex = synthesize_vertex(&gray_buffer(), Archetype::Generic, 0.5, 0.5);
        for channel in vertex.color {
            assert!((channel - 128.0 / 255.0).abs() < 1e-6);
        }
    }
}
