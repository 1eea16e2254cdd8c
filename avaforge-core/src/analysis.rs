//! Character analysis input contract
//!
//! The analysis arrives as structured data from an external feature
//! analyzer; every field defaults so a partial document still
//! deserializes. Field aliases accept the analyzer's camelCase keys.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Named anatomical layout the character is reconstructed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    #[default]
    Generic,
    Human,
    Anime,
    Nft,
    Cartoon,
    Animal,
    Robot,
    Penguin,
    AnthropomorphicApe,
}

/// Declared complexity of the source artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    #[default]
    Moderate,
    Complex,
    UltraComplex,
}

impl Complexity {
    /// Target-vertex-count multiplier for this tier.
    pub fn vertex_scale(self) -> f32 {
        match self {
            Complexity::Simple => 0.6,
            Complexity::Moderate => 1.0,
            Complexity::Complex => 1.4,
            Complexity::UltraComplex => 1.8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Headwear {
    #[serde(alias = "hasHat")]
    pub has_hat: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Eyewear {
    #[serde(alias = "hasSunglasses")]
    pub has_sunglasses: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Mouth {
    pub style: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Clothing {
    #[serde(alias = "hasClothing")]
    pub has_clothing: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Fur {
    #[serde(alias = "primaryColor")]
    pub primary_color: Option<String>,
    pub pattern: Option<String>,
}

/// Body parts absent from the source art that the generator must fabricate.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MissingParts {
    pub arms: bool,
    pub legs: bool,
    pub hands: bool,
    pub torso: bool,
}

/// Structured feature analysis of one character image.
///
/// Immutable for the duration of one generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterAnalysis {
    #[serde(alias = "characterType")]
    pub archetype: Archetype,
    pub complexity: Complexity,
    pub headwear: Headwear,
    pub eyewear: Eyewear,
    pub mouth: Mouth,
    pub clothing: Clothing,
    pub fur: Fur,
    #[serde(alias = "missingParts")]
    pub missing_parts: MissingParts,
    pub accessories: HashSet<String>,
}

impl CharacterAnalysis {
    /// Convenience constructor for an archetype with no detected features.
    pub fn for_archetype(archetype: Archetype) -> Self {
        Self {
            archetype,
            ..Default::default()
        }
    }

    pub fn has_accessory(&self, name: &str) -> bool {
        self.accessories.contains(name)
    }
}
