//! Multi-view depth synthesis
//!
//! A single 2D image carries no real depth, so four synthetic view
//! estimates are fabricated from brightness and blended with fixed
//! weights, then shaped by archetype-specific bands. Deterministic by
//! contract: no clock, no RNG.

use crate::analysis::Archetype;

/// Blend weights for the four synthetic views.
const WEIGHT_FRONT: f32 = 0.5;
const WEIGHT_BACK: f32 = 0.2;
const WEIGHT_LEFT: f32 = 0.15;
const WEIGHT_RIGHT: f32 = 0.15;

/// Depth floor: no surface point collapses onto the image plane.
pub const DEPTH_FLOOR: f32 = 0.1;

/// Synthetic per-view depth estimates for one surface point.
#[derive(Debug, Clone, Copy)]
pub struct ViewDepths {
    pub front: f32,
    pub back: f32,
    pub left: f32,
    pub right: f32,
}

/// Fabricate the four view estimates from brightness and the
/// archetype-specific feature boost already accumulated for this point.
pub fn synthesize_views(u: f32, brightness: f32, feature_boost: f32) -> ViewDepths {
    let front = (brightness + feature_boost).clamp(0.0, 1.0);
    let back = front * 0.3 + (1.0 - brightness) * 0.2;
    // Sides fall off toward the silhouette edge.
    let side = front * (0.7 - 0.4 * (u - 0.5).abs());
    ViewDepths {
        front,
        back,
        left: side,
        right: side,
    }
}

/// Weighted blend of the four views.
pub fn blend_views(views: ViewDepths) -> f32 {
    views.front * WEIGHT_FRONT
        + views.back * WEIGHT_BACK
        + views.left * WEIGHT_LEFT
        + views.right * WEIGHT_RIGHT
}

/// Apply the archetype band bias and clamp into `[DEPTH_FLOOR, 1]`.
///
/// Each archetype amplifies the bands its silhouette reads from: anime
/// faces live in the upper grid, animals lead with the snout, robots with
/// an angular head block.
pub fn archetype_bias(archetype: Archetype, u: f32, v: f32, depth: f32) -> f32 {
    let du = (u - 0.5).abs();
    let mut depth = depth;
    match archetype {
        Archetype::Anime => {
            if v < 0.4 {
                depth *= 1.3;
            }
            if (0.25..0.4).contains(&v) && du < 0.25 {
                depth *= 1.2;
            }
        }
        Archetype::Animal => {
            if (0.35..0.55).contains(&v) && du < 0.2 {
                depth *= 1.35;
            }
            if v < 0.2 && (0.15..0.3).contains(&u) || v < 0.2 && (0.7..0.85).contains(&u) {
                depth *= 1.25;
            }
        }
        Archetype::Robot => {
            if v < 0.35 {
                depth *= 1.25;
            }
        }
        Archetype::Human => {
            if v < 0.3 {
                depth *= 1.15;
            }
            if (0.4..0.7).contains(&v) {
                depth *= 1.1;
            }
        }
        Archetype::Penguin => {
            // Round belly dominates the penguin silhouette.
            let belly = ((u - 0.5) / 0.3).powi(2) + ((v - 0.6) / 0.25).powi(2);
            if belly < 1.0 {
                depth *= 1.2;
            }
        }
        Archetype::AnthropomorphicApe => {
            if (0.2..0.3).contains(&v) {
                depth *= 1.2;
            }
            if (0.4..0.6).contains(&v) {
                depth *= 1.15;
            }
        }
        Archetype::Generic | Archetype::Nft | Archetype::Cartoon => {}
    }
    depth.clamp(DEPTH_FLOOR, 1.0)
}

/// Full depth estimate for one grid point.
pub fn estimate_depth(archetype: Archetype, u: f32, v: f32, brightness: f32, boost: f32) -> f32 {
    let blended = blend_views(synthesize_views(u, brightness, boost));
    archetype_bias(archetype, u, v, blended)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn views_follow_brightness() {
        let views = synthesize_views(0.5, 0.8, 0.0);
        assert_eq!(views.front, 0.8);
        assert!((views.back - (0.8 * 0.3 + 0.2 * 0.2)).abs() < 1e-6);
        assert_eq!(views.left, views.right);
        assert!((views.left - 0.8 * 0.7).abs() < 1e-6);
    }

    #[test]
    fn side_views_fall_off_at_silhouette() {
        let center = synthesize_views(0.5, 1.0, 0.0);
        let edge = synthesize_views(1.0, 1.0, 0.0);
        assert!(edge.left < center.left);
        assert!((edge.left - (0.7 - 0.2)).abs() < 1e-6);
    }

    #[test]
    fn blend_weights_sum_to_one() {
        let flat = ViewDepths {
            front: 0.5,
            back: 0.5,
            left: 0.5,
            right: 0.5,
        };
        assert!((blend_views(flat) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn depth_never_drops_below_floor() {
        for archetype in [Archetype::Generic, Archetype::Anime, Archetype::Penguin] {
            assert!(estimate_depth(archetype, 0.0, 1.0, 0.0, 0.0) >= DEPTH_FLOOR);
        }
    }

    #[test]
    fn anime_amplifies_the_upper_grid() {
        let upper = estimate_depth(Archetype::Anime, 0.5, 0.2, 0.5, 0.0);
        let lower = estimate_depth(Archetype::Anime, 0.5, 0.7, 0.5, 0.0);
        assert!(upper > lower);
    }

    #[test]
    fn identical_inputs_identical_outputs() {
        let a = estimate_depth(Archetype::Robot, 0.37, 0.21, 0.63, 0.08);
        let b = estimate_depth(Archetype::Robot, 0.37, 0.21, 0.63, 0.08);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
