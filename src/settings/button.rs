// Button theme settings

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// How a button's background and border are computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleMode {
    #[default]
    Solid,
    Outline,
    Ghost,
    Gradient,
}

impl StyleMode {
    /// Token used in stored payloads and CSS custom properties
    pub fn as_str(self) -> &'static str {
        match self {
            StyleMode::Solid => "solid",
            StyleMode::Outline => "outline",
            StyleMode::Ghost => "ghost",
            StyleMode::Gradient => "gradient",
        }
    }

    /// Parse a style token, `None` for anything unrecognized
    pub fn parse(token: &str) -> Option<Self> {
        match token.trim() {
            "solid" => Some(StyleMode::Solid),
            "outline" => Some(StyleMode::Outline),
            "ghost" => Some(StyleMode::Ghost),
            "gradient" => Some(StyleMode::Gradient),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for StyleMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| D::Error::custom(format!("unknown button style `{raw}`")))
    }
}

/// Direction of a two-stop linear gradient
///
/// Accepts both stored tokens and CSS keywords; anything else becomes `to-right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientDirection {
    #[default]
    ToRight,
    ToLeft,
    ToBottom,
    ToTop,
    ToTopRight,
    ToTopLeft,
    ToBottomRight,
    ToBottomLeft,
}

impl GradientDirection {
    pub const ALL: [GradientDirection; 8] = [
        GradientDirection::ToRight,
        GradientDirection::ToLeft,
        GradientDirection::ToBottom,
        GradientDirection::ToTop,
        GradientDirection::ToTopRight,
        GradientDirection::ToTopLeft,
        GradientDirection::ToBottomRight,
        GradientDirection::ToBottomLeft,
    ];

    /// Stored token, e.g. `to-bottom-right`
    pub fn token(self) -> &'static str {
        match self {
            GradientDirection::ToRight => "to-right",
            GradientDirection::ToLeft => "to-left",
            GradientDirection::ToBottom => "to-bottom",
            GradientDirection::ToTop => "to-top",
            GradientDirection::ToTopRight => "to-top-right",
            GradientDirection::ToTopLeft => "to-top-left",
            GradientDirection::ToBottomRight => "to-bottom-right",
            GradientDirection::ToBottomLeft => "to-bottom-left",
        }
    }

    /// CSS side-or-corner keyword, e.g. `to bottom right`
    pub fn css(self) -> &'static str {
        match self {
            GradientDirection::ToRight => "to right",
            GradientDirection::ToLeft => "to left",
            GradientDirection::ToBottom => "to bottom",
            GradientDirection::ToTop => "to top",
            GradientDirection::ToTopRight => "to top right",
            GradientDirection::ToTopLeft => "to top left",
            GradientDirection::ToBottomRight => "to bottom right",
            GradientDirection::ToBottomLeft => "to bottom left",
        }
    }

    /// Parse a stored token; unknown tokens fall back to `to-right`
    pub fn parse_lossy(token: &str) -> Self {
        let token = token.trim();
        Self::ALL
            .into_iter()
            .find(|direction| direction.token() == token || direction.css() == token)
            .unwrap_or_default()
    }

    /// `linear-gradient(...)` between two stops
    pub fn linear_gradient(self, from: &str, to: &str) -> String {
        format!("linear-gradient({}, {}, {})", self.css(), from, to)
    }
}

impl<'de> Deserialize<'de> for GradientDirection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_lossy(&raw))
    }
}

/// Global button theme, persisted under `button_settings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonSettings {
    pub primary_bg: String,
    pub primary_text: String,
    pub primary_hover_bg: String,
    pub primary_hover_text: String,
    pub primary_border: String,
    pub primary_style: StyleMode,
    pub primary_gradient_from: String,
    pub primary_gradient_to: String,
    pub primary_gradient_direction: GradientDirection,

    pub secondary_bg: String,
    pub secondary_text: String,
    pub secondary_hover_bg: String,
    pub secondary_hover_text: String,
    pub secondary_border: String,
    pub secondary_style: StyleMode,
    pub secondary_gradient_from: String,
    pub secondary_gradient_to: String,
    pub secondary_gradient_direction: GradientDirection,

    pub border_radius: String,
    pub border_width: String,
    pub padding_x: String,
    pub padding_y: String,
    pub font_weight: String,
    pub font_size: String,
    pub transition: String,
    pub width: String,
    pub height: String,

    /// Whether `width`/`height` apply; otherwise buttons size to content
    pub fixed_width: bool,
    /// Whether these settings apply at all
    pub enabled: bool,
}

impl Default for ButtonSettings {
    fn default() -> Self {
        Self {
            primary_bg: "var(--color-text)".to_string(),
            primary_text: "var(--color-background)".to_string(),
            primary_hover_bg: "var(--color-primary)".to_string(),
            primary_hover_text: "var(--color-background)".to_string(),
            primary_border: "var(--color-text)".to_string(),
            primary_style: StyleMode::Solid,
            primary_gradient_from: "var(--color-primary)".to_string(),
            primary_gradient_to: "var(--color-accent)".to_string(),
            primary_gradient_direction: GradientDirection::ToRight,

            secondary_bg: "transparent".to_string(),
            secondary_text: "var(--color-text)".to_string(),
            secondary_hover_bg: "var(--color-text)".to_string(),
            secondary_hover_text: "var(--color-background)".to_string(),
            secondary_border: "var(--color-text)".to_string(),
            secondary_style: StyleMode::Outline,
            secondary_gradient_from: "var(--color-secondary)".to_string(),
            secondary_gradient_to: "var(--color-primary)".to_string(),
            secondary_gradient_direction: GradientDirection::ToRight,

            border_radius: "0.375rem".to_string(),
            border_width: "1px".to_string(),
            padding_x: "1.5rem".to_string(),
            padding_y: "0.75rem".to_string(),
            font_weight: "500".to_string(),
            font_size: "1rem".to_string(),
            transition: "all 0.2s ease".to_string(),
            width: "200px".to_string(),
            height: "48px".to_string(),

            fixed_width: false,
            enabled: true,
        }
    }
}

impl ButtonSettings {
    /// Gradient expression for the primary variant
    pub fn primary_gradient(&self) -> String {
        self.primary_gradient_direction
            .linear_gradient(&self.primary_gradient_from, &self.primary_gradient_to)
    }

    /// Gradient expression for the secondary variant
    pub fn secondary_gradient(&self) -> String {
        self.secondary_gradient_direction
            .linear_gradient(&self.secondary_gradient_from, &self.secondary_gradient_to)
    }
}
