//! Style and feature settings edited in the customize step

use serde::{Deserialize, Serialize};

/// Palette and font presets offered by the customize step
pub const PALETTE_PRESETS: &[[&str; 2]] = &[
    ["#6366f1", "#8b5cf6"],
    ["#ec4899", "#f59e0b"],
    ["#10b981", "#06b6d4"],
    ["#111827", "#fbbf24"],
];

pub const FONT_PRESETS: &[[&str; 2]] = &[
    ["Inter", "Playfair Display"],
    ["Montserrat", "Lora"],
    ["Poppins", "Merriweather"],
];

/// Cultural element tags that can be attached to an invitation
pub const CULTURAL_ELEMENTS: &[&str] = &[
    "Traditional Patterns",
    "Local Music",
    "Native Language Greeting",
    "Festival Colors",
];

/// Invitation customizations.
///
/// Colors and fonts are fixed-size pairs; an edit replaces the whole pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customizations {
    pub colors: [String; 2],
    pub fonts: [String; 2],
    pub animations: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_preview: Option<String>,
    #[serde(default)]
    pub ar_experience: bool,
    #[serde(default)]
    pub nft_pass_preview: bool,
    #[serde(default)]
    pub gamification_elements: bool,
    #[serde(default)]
    pub cultural_elements: Vec<String>,
    #[serde(default)]
    pub sustainability_badges: bool,
}

impl Default for Customizations {
    fn default() -> Self {
        Self {
            colors: pair(PALETTE_PRESETS[0]),
            fonts: pair(FONT_PRESETS[0]),
            animations: true,
            music_preview: None,
            ar_experience: false,
            nft_pass_preview: false,
            gamification_elements: false,
            cultural_elements: Vec::new(),
            sustainability_badges: false,
        }
    }
}

/// Build an owned pair from a preset
pub fn pair(preset: [&str; 2]) -> [String; 2] {
    [preset[0].to_string(), preset[1].to_string()]
}

/// Partial update merged into `Customizations`; `None` leaves a field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomizationPatch {
    pub colors: Option<[String; 2]>,
    pub fonts: Option<[String; 2]>,
    pub animations: Option<bool>,
    /// `Some(None)` clears the music preview
    pub music_preview: Option<Option<String>>,
    pub ar_experience: Option<bool>,
    pub nft_pass_preview: Option<bool>,
    pub gamification_elements: Option<bool>,
    pub cultural_elements: Option<Vec<String>>,
    pub sustainability_badges: Option<bool>,
}

impl CustomizationPatch {
    pub fn colors(colors: [&str; 2]) -> Self {
        Self {
            colors: Some(pair(colors)),
            ..Default::default()
        }
    }

    pub fn fonts(fonts: [&str; 2]) -> Self {
        Self {
            fonts: Some(pair(fonts)),
            ..Default::default()
        }
    }

    pub fn animations(enabled: bool) -> Self {
        Self {
            animations: Some(enabled),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Customizations {
    /// Shallow-merge a patch into these customizations
    pub fn merge(&mut self, patch: CustomizationPatch) {
        if let Some(colors) = patch.colors {
            self.colors = colors;
        }
        if let Some(fonts) = patch.fonts {
            self.fonts = fonts;
        }
        if let Some(animations) = patch.animations {
            self.animations = animations;
        }
        if let Some(music_preview) = patch.music_preview {
            self.music_preview = music_preview;
        }
        if let Some(ar) = patch.ar_experience {
            self.ar_experience = ar;
        }
        if let Some(nft) = patch.nft_pass_preview {
            self.nft_pass_preview = nft;
        }
        if let Some(gamification) = patch.gamification_elements {
            self.gamification_elements = gamification;
        }
        if let Some(elements) = patch.cultural_elements {
            self.cultural_elements = elements;
        }
        if let Some(badges) = patch.sustainability_badges {
            self.sustainability_badges = badges;
        }
    }

    /// Names of the enabled feature toggles, for summaries
    pub fn enabled_features(&self) -> Vec<&'static str> {
        let mut features = Vec::new();
        if self.animations {
            features.push("animations");
        }
        if self.ar_experience {
            features.push("AR experience");
        }
        if self.nft_pass_preview {
            features.push("NFT pass preview");
        }
        if self.gamification_elements {
            features.push("gamification");
        }
        if self.sustainability_badges {
            features.push("sustainability badges");
        }
        features
    }
}
