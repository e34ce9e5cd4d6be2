//! Theme settings data model
//!
//! Three kinds of settings are persisted as JSON blobs in the settings table, one row per kind:
//!
//! - `button_settings` - [`ButtonSettings`]
//! - `font_settings` - [`FontSettings`]
//! - `color_palette` - [`ColorPaletteSettings`]
//!
//! Every record has a complete default. Payloads read from storage are decoded leniently (see
//! [`lenient`]) so a missing or malformed field falls back to its default instead of discarding the
//! whole record.

mod button;
mod font;
pub mod lenient;
mod palette;


pub use button::{ButtonSettings, GradientDirection, StyleMode};
pub use font::{FontSettings, FontSlot, INHERITED_FONT};
pub use palette::{ColorPaletteSettings, ConcreteColors, PaletteId};

use serde::{Deserialize, Serialize};

/// Which JSON payload a settings row holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsKind {
    ButtonSettings,
    FontSettings,
    #[serde(rename = "color_palette")]
    ColorPalette,
}

impl SettingsKind {
    /// All kinds, in fetch order
    pub const ALL: [SettingsKind; 3] = [
        SettingsKind::ButtonSettings,
        SettingsKind::FontSettings,
        SettingsKind::ColorPalette,
    ];

    /// The row key stored in the settings table
    pub fn key(self) -> &'static str {
        match self {
            SettingsKind::ButtonSettings => "button_settings",
            SettingsKind::FontSettings => "font_settings",
            SettingsKind::ColorPalette => "color_palette",
        }
    }

    /// Look up a kind by its row key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl std::fmt::Display for SettingsKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The combined theme settings published by the settings store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    pub button: ButtonSettings,
    pub font: FontSettings,
    pub color: ColorPaletteSettings,
}

impl SettingsSnapshot {
    /// Replace the record of one kind with a decoded payload
    pub fn set_from_value(&mut self, kind: SettingsKind, value: &serde_json::Value) {
        match kind {
            SettingsKind::ButtonSettings => self.button = lenient::decode(value),
            SettingsKind::FontSettings => self.font = lenient::decode(value),
            SettingsKind::ColorPalette => self.color = lenient::decode(value),
        }
    }

    /// Encode the record of one kind as its storage payload
    pub fn value_of(&self, kind: SettingsKind) -> serde_json::Value {
        let encoded = match kind {
            SettingsKind::ButtonSettings => serde_json::to_value(&self.button),
            SettingsKind::FontSettings => serde_json::to_value(&self.font),
            SettingsKind::ColorPalette => serde_json::to_value(&self.color),
        };
        // Plain structs of strings, bools and unit enums always encode.
        encoded.unwrap_or(serde_json::Value::Null)
    }
}
