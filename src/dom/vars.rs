//! CSS custom property table
//!
//! These names are read by stylesheets outside this crate and must not change.

use crate::kit::utils::color::rgb_triplet;
use crate::settings::{
    ButtonSettings, ColorPaletteSettings, FontSettings, FontSlot, SettingsSnapshot,
};

/// Properties written only when a home-page secondary palette is configured
pub const HOME_SECONDARY_PROPERTIES: [&str; 3] = [
    "--home-secondary-primary",
    "--home-secondary-background",
    "--home-secondary-text",
];

/// Data attribute describing section coloring
pub const SECTION_STYLE_ATTRIBUTE: &str = "data-section-style";

type Property = (&'static str, String);

fn font_properties(font: &FontSettings) -> Vec<Property> {
    vec![
        ("--font-primary", font_value(font, FontSlot::Primary)),
        ("--font-secondary", font_value(font, FontSlot::Secondary)),
        ("--font-body", font_value(font, FontSlot::Body)),
        ("--font-heading", font_value(font, FontSlot::Heading)),
    ]
}

fn font_value(font: &FontSettings, slot: FontSlot) -> String {
    let family = font.effective_family(slot);
    if family == crate::settings::INHERITED_FONT {
        family.to_string()
    } else {
        format!("'{family}', sans-serif")
    }
}

fn button_properties(button: &ButtonSettings) -> Vec<Property> {
    vec![
        ("--button-primary-bg", button.primary_bg.clone()),
        ("--button-primary-text", button.primary_text.clone()),
        ("--button-primary-hover-bg", button.primary_hover_bg.clone()),
        ("--button-primary-hover-text", button.primary_hover_text.clone()),
        ("--button-primary-border", button.primary_border.clone()),
        ("--button-primary-style", button.primary_style.as_str().to_string()),
        ("--button-primary-gradient-from", button.primary_gradient_from.clone()),
        ("--button-primary-gradient-to", button.primary_gradient_to.clone()),
        (
            "--button-primary-gradient-direction",
            button.primary_gradient_direction.css().to_string(),
        ),
        ("--button-primary-gradient", button.primary_gradient()),
        ("--button-secondary-bg", button.secondary_bg.clone()),
        ("--button-secondary-text", button.secondary_text.clone()),
        ("--button-secondary-hover-bg", button.secondary_hover_bg.clone()),
        ("--button-secondary-hover-text", button.secondary_hover_text.clone()),
        ("--button-secondary-border", button.secondary_border.clone()),
        ("--button-secondary-style", button.secondary_style.as_str().to_string()),
        ("--button-secondary-gradient-from", button.secondary_gradient_from.clone()),
        ("--button-secondary-gradient-to", button.secondary_gradient_to.clone()),
        (
            "--button-secondary-gradient-direction",
            button.secondary_gradient_direction.css().to_string(),
        ),
        ("--button-secondary-gradient", button.secondary_gradient()),
        ("--button-border-radius", button.border_radius.clone()),
        ("--button-border-width", button.border_width.clone()),
        ("--button-padding-x", button.padding_x.clone()),
        ("--button-padding-y", button.padding_y.clone()),
        ("--button-font-weight", button.font_weight.clone()),
        ("--button-font-size", button.font_size.clone()),
        ("--button-transition", button.transition.clone()),
        (
            "--button-width",
            if button.fixed_width {
                button.width.clone()
            } else {
                "auto".to_string()
            },
        ),
        (
            "--button-height",
            if button.fixed_width {
                button.height.clone()
            } else {
                "auto".to_string()
            },
        ),
    ]
}

fn palette_properties(color: &ColorPaletteSettings) -> Vec<Property> {
    let colors = color.colors();
    let uniform = color.section_style() == "uniform";
    let (alt_1, alt_2) = if uniform {
        (colors.background, colors.background)
    } else {
        (colors.section_alt_1, colors.section_alt_2)
    };

    vec![
        ("--color-primary", colors.primary.to_string()),
        ("--color-secondary", colors.secondary.to_string()),
        ("--color-accent", colors.accent.to_string()),
        ("--color-background", colors.background.to_string()),
        ("--color-text", colors.text.to_string()),
        ("--color-light", colors.light.to_string()),
        ("--color-dark", colors.dark.to_string()),
        ("--color-light-text", colors.light_text.to_string()),
        ("--color-dark-text", colors.dark_text.to_string()),
        ("--color-success", colors.success.to_string()),
        ("--color-warning", colors.warning.to_string()),
        ("--color-error", colors.error.to_string()),
        ("--color-info", colors.info.to_string()),
        ("--color-section-alt-1", alt_1.to_string()),
        ("--color-section-alt-2", alt_2.to_string()),
        ("--color-primary-rgb", rgb_triplet(colors.primary)),
        ("--color-secondary-rgb", rgb_triplet(colors.secondary)),
        ("--color-accent-rgb", rgb_triplet(colors.accent)),
        ("--color-background-rgb", rgb_triplet(colors.background)),
        ("--color-text-rgb", rgb_triplet(colors.text)),
    ]
}

/// Home-page secondary palette properties, if one is configured
pub fn home_secondary_properties(color: &ColorPaletteSettings) -> Option<Vec<Property>> {
    let colors = color.home_secondary_palette?.colors();
    let [primary, background, text] = HOME_SECONDARY_PROPERTIES;
    Some(vec![
        (primary, colors.primary.to_string()),
        (background, colors.background.to_string()),
        (text, colors.text.to_string()),
    ])
}

/// Every always-present custom property for a snapshot, in write order
pub fn custom_properties(snapshot: &SettingsSnapshot) -> Vec<Property> {
    let mut properties = font_properties(&snapshot.font);
    properties.extend(button_properties(&snapshot.button));
    properties.extend(palette_properties(&snapshot.color));
    properties
}

/// The same properties as a `:root` block, for pages rendered without a live document
pub fn render_root_css(snapshot: &SettingsSnapshot) -> String {
    let mut properties = custom_properties(snapshot);
    properties.extend(home_secondary_properties(&snapshot.color).unwrap_or_default());

    let mut css = String::from(":root {\n");
    for (name, value) in properties {
        css.push_str("  ");
        css.push_str(name);
        css.push_str(": ");
        css.push_str(&value);
        css.push_str(";\n");
    }
    css.push_str("}\n");
    css
}
