//! Invitation templates and the built-in template catalog

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Visual family a template belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateCategory {
    Classic,
    Modern,
    Cultural,
    ArEnhanced,
    NftExclusive,
    Interactive,
}

impl TemplateCategory {
    pub fn label(&self) -> &'static str {
        match self {
            TemplateCategory::Classic => "Classic",
            TemplateCategory::Modern => "Modern",
            TemplateCategory::Cultural => "Cultural",
            TemplateCategory::ArEnhanced => "AR Enhanced",
            TemplateCategory::NftExclusive => "NFT Exclusive",
            TemplateCategory::Interactive => "Interactive",
        }
    }
}

/// Depth of game mechanics a template ships with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GamificationLevel {
    Basic,
    Medium,
    Advanced,
}

impl GamificationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            GamificationLevel::Basic => "basic",
            GamificationLevel::Medium => "medium",
            GamificationLevel::Advanced => "advanced",
        }
    }
}

/// A read-only catalog entry chosen in the template step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvitationTemplate {
    pub id: String,
    pub name: String,
    pub category: TemplateCategory,
    pub thumbnail: String,
    #[serde(default)]
    pub preview_images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_region: Option<String>,
    #[serde(default)]
    pub ar_elements: Vec<String>,
    #[serde(default)]
    pub nft_integration: bool,
    #[serde(default)]
    pub interactive_features: Vec<String>,
    #[serde(default)]
    pub music_integration: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamification_level: Option<GamificationLevel>,
}

impl InvitationTemplate {
    pub fn supports_ar(&self) -> bool {
        !self.ar_elements.is_empty()
    }

    pub fn supports_nft(&self) -> bool {
        self.nft_integration
    }

    pub fn supports_music(&self) -> bool {
        self.music_integration
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

static CATALOG: Lazy<Vec<InvitationTemplate>> = Lazy::new(|| {
    vec![
        InvitationTemplate {
            id: "template-neon-nights".to_string(),
            name: "Neon Nights AR Experience".to_string(),
            category: TemplateCategory::ArEnhanced,
            thumbnail: "templates/4.jpg".to_string(),
            preview_images: strings(&["templates/4.jpg", "templates/4.jpg"]),
            features: strings(&[
                "3D Neon Animations",
                "AR Party Preview",
                "Interactive Elements",
                "Sound Integration",
            ]),
            is_premium: true,
            cultural_region: None,
            ar_elements: strings(&[
                "Floating Neon Signs",
                "3D Party Scene",
                "Interactive DJ Booth",
                "Virtual Confetti",
            ]),
            nft_integration: false,
            interactive_features: strings(&[
                "Tap to RSVP",
                "AR Venue Tour",
                "Music Preview",
                "Guest Messages",
            ]),
            music_integration: true,
            gamification_level: Some(GamificationLevel::Advanced),
        },
        InvitationTemplate {
            id: "template-cultural-celebration".to_string(),
            name: "Global Cultural Celebration".to_string(),
            category: TemplateCategory::Cultural,
            thumbnail: "templates/3.jpg".to_string(),
            preview_images: strings(&["templates/3.jpg", "templates/3.jpg"]),
            features: strings(&[
                "Multi-language Support",
                "Cultural Elements",
                "Traditional Patterns",
                "Local Customs",
            ]),
            is_premium: false,
            cultural_region: Some("Global".to_string()),
            ar_elements: Vec::new(),
            nft_integration: false,
            interactive_features: strings(&[
                "Cultural Quiz",
                "Traditional Music",
                "Language Selection",
            ]),
            music_integration: false,
            gamification_level: Some(GamificationLevel::Medium),
        },
        InvitationTemplate {
            id: "template-nft-exclusive".to_string(),
            name: "NFT VIP Experience".to_string(),
            category: TemplateCategory::NftExclusive,
            thumbnail: "templates/3.jpg".to_string(),
            preview_images: strings(&["templates/3.jpg", "templates/5.jpg"]),
            features: strings(&[
                "Blockchain Authentication",
                "NFT Pass Generation",
                "Exclusive Access",
                "Digital Collectibles",
            ]),
            is_premium: true,
            cultural_region: None,
            ar_elements: Vec::new(),
            nft_integration: true,
            interactive_features: strings(&[
                "NFT Minting",
                "Wallet Connect",
                "Token Gating",
                "Exclusive Perks",
            ]),
            music_integration: false,
            gamification_level: Some(GamificationLevel::Advanced),
        },
    ]
});

/// The static template catalog offered in the template step
pub fn template_catalog() -> &'static [InvitationTemplate] {
    &CATALOG
}

/// Look up a catalog template by id
pub fn find_template(id: &str) -> Option<&'static InvitationTemplate> {
    CATALOG.iter().find(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_unique_ids() {
        let catalog = template_catalog();
        assert_eq!(catalog.len(), 3);
        let mut ids: Vec<&str> = catalog.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_feature_flags() {
        let neon = find_template("template-neon-nights").unwrap();
        assert!(neon.supports_ar());
        assert!(neon.supports_music());
        assert!(!neon.supports_nft());

        let nft = find_template("template-nft-exclusive").unwrap();
        assert!(nft.supports_nft());
        assert!(!nft.supports_ar());
    }

    #[test]
    fn test_find_unknown_template() {
        assert!(find_template("template-missing").is_none());
    }

    #[test]
    fn test_category_serializes_kebab_case() {
        let json = serde_json::to_string(&TemplateCategory::ArEnhanced).unwrap();
        assert_eq!(json, "\"ar-enhanced\"");
    }
}
