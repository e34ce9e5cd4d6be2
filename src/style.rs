// Style resolution for themed UI primitives
//
// A button's final style is resolved attribute by attribute from four layers, highest first:
//
// 1. explicit per-call-site props
// 2. the page-level override object
// 3. the global button settings for the variant (skipped while loading or when disabled)
// 4. the hard-coded variant default
//
// Admin surfaces bypass all four and use a fixed palette keyed by variant and style mode.

mod admin;

#[cfg(test)]
mod tests;

pub use admin::{admin_colors, AdminColors};

use serde::{Deserialize, Serialize};

use crate::settings::{ButtonSettings, GradientDirection, StyleMode};

/// Rendering context a primitive is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    /// Public pages follow the themed settings
    #[default]
    Public,
    /// Admin console uses the fixed admin palette
    Admin,
}

impl ThemeMode {
    /// Mode for a route; only meant for the composition root
    pub fn from_route(path: &str) -> Self {
        let path = path.trim();
        if path == "/admin" || path.starts_with("/admin/") {
            ThemeMode::Admin
        } else {
            ThemeMode::Public
        }
    }
}

/// Role a button-like primitive takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Primary,
    Secondary,
    Success,
    Danger,
}

impl ButtonVariant {
    /// Whether the primary themed settings apply; only `Secondary` uses the secondary set
    pub fn is_primary(self) -> bool {
        !matches!(self, ButtonVariant::Secondary)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ButtonVariant::Primary => "primary",
            ButtonVariant::Secondary => "secondary",
            ButtonVariant::Success => "success",
            ButtonVariant::Danger => "danger",
        }
    }
}

/// Partial button style, used both for call-site props and page-level overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonStyleOverride {
    pub background: Option<String>,
    pub text_color: Option<String>,
    pub hover_background: Option<String>,
    pub hover_text_color: Option<String>,
    pub border_color: Option<String>,
    pub border_radius: Option<String>,
    pub border_width: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub padding_x: Option<String>,
    pub padding_y: Option<String>,
    pub font_size: Option<String>,
    pub font_weight: Option<String>,
    pub style: Option<StyleMode>,
    pub gradient_from: Option<String>,
    pub gradient_to: Option<String>,
    pub gradient_direction: Option<GradientDirection>,
}

impl ButtonStyleOverride {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Everything needed to resolve one button instance
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonStyleRequest<'a> {
    pub variant: ButtonVariant,
    pub mode: ThemeMode,
    pub hovered: bool,
    pub disabled: bool,
    /// Explicit call-site props
    pub props: Option<&'a ButtonStyleOverride>,
    /// Page-level override
    pub page: Option<&'a ButtonStyleOverride>,
    /// Global settings; `None` while the settings store is still loading
    pub settings: Option<&'a ButtonSettings>,
}

/// A concrete, fully resolved button style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedButtonStyle {
    pub style: StyleMode,
    /// Background color or gradient expression
    pub background: String,
    pub color: String,
    pub border: String,
    pub border_radius: String,
    pub padding: String,
    pub width: String,
    pub height: String,
    pub font_size: String,
    pub font_weight: String,
    pub transition: String,
    pub cursor: &'static str,
    pub opacity: &'static str,
}

impl ResolvedButtonStyle {
    /// CSS declarations in render order
    pub fn declarations(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("background", self.background.as_str()),
            ("color", self.color.as_str()),
            ("border", self.border.as_str()),
            ("border-radius", self.border_radius.as_str()),
            ("padding", self.padding.as_str()),
            ("width", self.width.as_str()),
            ("height", self.height.as_str()),
            ("font-size", self.font_size.as_str()),
            ("font-weight", self.font_weight.as_str()),
            ("transition", self.transition.as_str()),
            ("cursor", self.cursor),
            ("opacity", self.opacity),
        ]
    }

    /// Inline `style` attribute value
    pub fn to_inline_css(&self) -> String {
        self.declarations()
            .into_iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// First non-blank value among the layers, else the default
fn pick(layers: &[Option<&str>], default: &str) -> String {
    layers
        .iter()
        .flatten()
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Variant-specific view of the global settings
struct VariantValues<'a> {
    bg: &'a str,
    text: &'a str,
    hover_bg: &'a str,
    hover_text: &'a str,
    border: &'a str,
    style: StyleMode,
    gradient_from: &'a str,
    gradient_to: &'a str,
    gradient_direction: GradientDirection,
}

impl<'a> VariantValues<'a> {
    fn of(settings: &'a ButtonSettings, primary: bool) -> Self {
        if primary {
            Self {
                bg: &settings.primary_bg,
                text: &settings.primary_text,
                hover_bg: &settings.primary_hover_bg,
                hover_text: &settings.primary_hover_text,
                border: &settings.primary_border,
                style: settings.primary_style,
                gradient_from: &settings.primary_gradient_from,
                gradient_to: &settings.primary_gradient_to,
                gradient_direction: settings.primary_gradient_direction,
            }
        } else {
            Self {
                bg: &settings.secondary_bg,
                text: &settings.secondary_text,
                hover_bg: &settings.secondary_hover_bg,
                hover_text: &settings.secondary_hover_text,
                border: &settings.secondary_border,
                style: settings.secondary_style,
                gradient_from: &settings.secondary_gradient_from,
                gradient_to: &settings.secondary_gradient_to,
                gradient_direction: settings.secondary_gradient_direction,
            }
        }
    }
}

/// Resolve the style for one button instance
///
/// Never fails: blank or missing values fall through to the next layer, ending at the hard
/// default.
pub fn resolve_button_style(request: &ButtonStyleRequest<'_>) -> ResolvedButtonStyle {
    if request.mode == ThemeMode::Admin {
        return admin::resolve(request);
    }

    let hard_settings = ButtonSettings::default();
    let primary = request.variant.is_primary();
    let hard = VariantValues::of(&hard_settings, primary);

    let global_settings = request.settings.filter(|settings| settings.enabled);
    let global = global_settings.map(|settings| VariantValues::of(settings, primary));

    let props = request.props;
    let page = request.page;

    macro_rules! layered {
        ($field:ident, $global:expr, $default:expr) => {
            pick(
                &[
                    props.and_then(|p| p.$field.as_deref()),
                    page.and_then(|p| p.$field.as_deref()),
                    $global,
                ],
                $default,
            )
        };
    }

    let background = layered!(background, global.as_ref().map(|g| g.bg), hard.bg);
    let text = layered!(text_color, global.as_ref().map(|g| g.text), hard.text);
    let hover_background = layered!(
        hover_background,
        global.as_ref().map(|g| g.hover_bg),
        hard.hover_bg
    );
    let hover_text = layered!(
        hover_text_color,
        global.as_ref().map(|g| g.hover_text),
        hard.hover_text
    );
    let border_color = layered!(border_color, global.as_ref().map(|g| g.border), hard.border);
    let gradient_from = layered!(
        gradient_from,
        global.as_ref().map(|g| g.gradient_from),
        hard.gradient_from
    );
    let gradient_to = layered!(
        gradient_to,
        global.as_ref().map(|g| g.gradient_to),
        hard.gradient_to
    );

    let border_radius = layered!(
        border_radius,
        global_settings.map(|s| s.border_radius.as_str()),
        &hard_settings.border_radius
    );
    let border_width = layered!(
        border_width,
        global_settings.map(|s| s.border_width.as_str()),
        &hard_settings.border_width
    );
    let padding_x = layered!(
        padding_x,
        global_settings.map(|s| s.padding_x.as_str()),
        &hard_settings.padding_x
    );
    let padding_y = layered!(
        padding_y,
        global_settings.map(|s| s.padding_y.as_str()),
        &hard_settings.padding_y
    );
    let font_size = layered!(
        font_size,
        global_settings.map(|s| s.font_size.as_str()),
        &hard_settings.font_size
    );
    let font_weight = layered!(
        font_weight,
        global_settings.map(|s| s.font_weight.as_str()),
        &hard_settings.font_weight
    );

    // Geometry from the global layer only applies with fixed sizing enabled.
    let fixed = global_settings.filter(|s| s.fixed_width);
    let width = layered!(width, fixed.map(|s| s.width.as_str()), "auto");
    let height = layered!(height, fixed.map(|s| s.height.as_str()), "auto");

    let style = props
        .and_then(|p| p.style)
        .or_else(|| page.and_then(|p| p.style))
        .or_else(|| global.as_ref().map(|g| g.style))
        .unwrap_or(hard.style);
    let gradient_direction = props
        .and_then(|p| p.gradient_direction)
        .or_else(|| page.and_then(|p| p.gradient_direction))
        .or_else(|| global.as_ref().map(|g| g.gradient_direction))
        .unwrap_or(hard.gradient_direction);

    let transition = global_settings
        .map(|s| s.transition.trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(hard_settings.transition.as_str())
        .to_string();

    let hovered = request.hovered && !request.disabled;
    let (background, color) = match (style, hovered) {
        (_, true) => (hover_background, hover_text),
        (StyleMode::Solid, false) => (background, text),
        (StyleMode::Gradient, false) => (
            gradient_direction.linear_gradient(&gradient_from, &gradient_to),
            text,
        ),
        (StyleMode::Outline | StyleMode::Ghost, false) => ("transparent".to_string(), text),
    };
    let border = match style {
        StyleMode::Solid | StyleMode::Outline => format!("{border_width} solid {border_color}"),
        StyleMode::Ghost | StyleMode::Gradient => format!("{border_width} solid transparent"),
    };

    ResolvedButtonStyle {
        style,
        background,
        color,
        border,
        border_radius,
        padding: format!("{padding_y} {padding_x}"),
        width,
        height,
        font_size,
        font_weight,
        transition,
        cursor: if request.disabled {
            "not-allowed"
        } else {
            "pointer"
        },
        opacity: if request.disabled { "0.5" } else { "1" },
    }
}
