// Font theme settings

use serde::{Deserialize, Serialize};

/// Family used by consumers when font settings are disabled
pub const INHERITED_FONT: &str = "inherit";

/// Named font roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontSlot {
    Primary,
    Secondary,
    Body,
    Heading,
}

/// Global font theme, persisted under `font_settings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSettings {
    pub primary_font: String,
    pub secondary_font: String,
    pub body_font: String,
    pub heading_font: String,
    pub enabled: bool,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            primary_font: "Inter".to_string(),
            secondary_font: "Playfair Display".to_string(),
            body_font: "Inter".to_string(),
            heading_font: "Playfair Display".to_string(),
            enabled: true,
        }
    }
}

impl FontSettings {
    /// Configured family name for a slot, regardless of `enabled`
    pub fn family(&self, slot: FontSlot) -> &str {
        match slot {
            FontSlot::Primary => &self.primary_font,
            FontSlot::Secondary => &self.secondary_font,
            FontSlot::Body => &self.body_font,
            FontSlot::Heading => &self.heading_font,
        }
    }

    /// Family a consumer should actually use: the named font, or `inherit` when disabled
    pub fn effective_family(&self, slot: FontSlot) -> &str {
        let family = self.family(slot).trim();
        if !self.enabled || family.is_empty() {
            INHERITED_FONT
        } else {
            family
        }
    }

    /// Distinct, non-empty family names in slot order
    pub fn distinct_families(&self) -> Vec<&str> {
        let mut families: Vec<&str> = Vec::with_capacity(4);
        for slot in [
            FontSlot::Primary,
            FontSlot::Secondary,
            FontSlot::Body,
            FontSlot::Heading,
        ] {
            let family = self.family(slot).trim();
            if !family.is_empty() && !families.contains(&family) {
                families.push(family);
            }
        }
        families
    }
}
