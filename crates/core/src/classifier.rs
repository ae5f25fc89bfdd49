//! Keyword classifier for mixer prompts.
//!
//! Each interest flag is set when the lowercased prompt contains any of its keywords. Flags are
//! independent; a prompt may set several or none.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const RELAXATION_KEYWORDS: [&str; 4] = ["rileks", "tenang", "stres", "tidur"];
const ENERGY_KEYWORDS: [&str; 3] = ["energi", "lelah", "stamina"];
const DIGESTION_KEYWORDS: [&str; 3] = ["pencernaan", "perut", "lambung"];
const IMMUNE_KEYWORDS: [&str; 3] = ["imun", "sakit", "flu"];

/// Interests detected in a free-text prompt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InterestFlags {
    pub relaxation: bool,
    pub energy: bool,
    pub digestion: bool,
    pub immune: bool,
}

impl InterestFlags {
    pub fn any(&self) -> bool {
        self.relaxation || self.energy || self.digestion || self.immune
    }
}

/// Classify a prompt into interest flags.
pub fn classify(text: &str) -> InterestFlags {
    let lowered = text.to_lowercase();
    let hit = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    InterestFlags {
        relaxation: hit(&RELAXATION_KEYWORDS),
        energy: hit(&ENERGY_KEYWORDS),
        digestion: hit(&DIGESTION_KEYWORDS),
        immune: hit(&IMMUNE_KEYWORDS),
    }
}
