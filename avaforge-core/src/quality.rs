//! Plan tier to quality settings lookup

use serde::{Deserialize, Serialize};

/// Subscription tier the request was made under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserPlan {
    #[default]
    Free,
    ReplyGuy,
    Spartan,
    Zeus,
    Goat,
}

impl UserPlan {
    /// Parse the plan tier string from the external caller.
    pub fn parse(tier: &str) -> Option<Self> {
        match tier {
            "free" => Some(UserPlan::Free),
            "reply_guy" => Some(UserPlan::ReplyGuy),
            "spartan" => Some(UserPlan::Spartan),
            "zeus" => Some(UserPlan::Zeus),
            "goat" => Some(UserPlan::Goat),
            _ => None,
        }
    }

    /// Quality settings for this tier. Pure lookup, no state.
    pub fn quality(self) -> QualitySettings {
        match self {
            UserPlan::Free => QualitySettings {
                texture_size: 256,
                density: DensityTier::Low,
                normal_maps: false,
            },
            UserPlan::ReplyGuy => QualitySettings {
                texture_size: 512,
                density: DensityTier::Standard,
                normal_maps: false,
            },
            UserPlan::Spartan => QualitySettings {
                texture_size: 1024,
                density: DensityTier::Standard,
                normal_maps: true,
            },
            UserPlan::Zeus => QualitySettings {
                texture_size: 2048,
                density: DensityTier::High,
                normal_maps: true,
            },
            UserPlan::Goat => QualitySettings {
                texture_size: 4096,
                density: DensityTier::Ultra,
                normal_maps: true,
            },
        }
    }
}

/// Mesh density scaling applied on top of the archetype/complexity target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityTier {
    Low,
    Standard,
    High,
    Ultra,
}

impl DensityTier {
    pub fn vertex_scale(self) -> f32 {
        match self {
            DensityTier::Low => 0.5,
            DensityTier::Standard => 1.0,
            DensityTier::High => 1.5,
            DensityTier::Ultra => 2.0,
        }
    }
}

/// Quality knobs derived from a plan tier.
#[derive(Debug, Clone, Copy)]
pub struct QualitySettings {
    /// Side length of the enhanced diffuse texture.
    pub texture_size: u32,
    pub density: DensityTier,
    /// Whether a normal map is derived alongside the diffuse texture.
    pub normal_maps: bool,
}
