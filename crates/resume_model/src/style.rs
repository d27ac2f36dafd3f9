//! Render style choices
//!
//! The preview applies these before export is requested. The PDF path sees
//! them already resolved into the DOM; the DOCX path maps them onto a small
//! set of document formatting properties.

use serde::{Deserialize, Serialize};

/// Resolved style applied to the on-screen preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderStyle {
    /// Visual template identifier ("modern", "classic", ...)
    pub template: String,
    /// Accent color as a CSS color string
    pub accent_color: String,
    /// Font family name
    pub font_family: String,
    pub font_size: FontSizeTier,
    pub spacing: SpacingTier,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            template: "modern".to_string(),
            accent_color: "#2563eb".to_string(),
            font_family: "Calibri".to_string(),
            font_size: FontSizeTier::default(),
            spacing: SpacingTier::default(),
        }
    }
}

/// Font size tier selected in the style panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontSizeTier {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSizeTier {
    /// Body text size in points
    pub fn body_points(self) -> f32 {
        match self {
            FontSizeTier::Small => 10.0,
            FontSizeTier::Medium => 11.0,
            FontSizeTier::Large => 12.0,
        }
    }
}

/// Vertical spacing tier selected in the style panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpacingTier {
    Compact,
    #[default]
    Normal,
    Relaxed,
}

impl SpacingTier {
    /// Space after a paragraph in points
    pub fn paragraph_after_points(self) -> f32 {
        match self {
            SpacingTier::Compact => 4.0,
            SpacingTier::Normal => 8.0,
            SpacingTier::Relaxed => 12.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_defaults_from_empty_json() {
        let style: RenderStyle = serde_json::from_str("{}").unwrap();
        assert_eq!(style, RenderStyle::default());
    }

    #[test]
    fn test_tiers_deserialize_lowercase() {
        let style: RenderStyle =
            serde_json::from_str(r#"{ "fontSize": "large", "spacing": "compact" }"#).unwrap();
        assert_eq!(style.font_size, FontSizeTier::Large);
        assert_eq!(style.font_size.body_points(), 12.0);
        assert_eq!(style.spacing.paragraph_after_points(), 4.0);
    }
}
