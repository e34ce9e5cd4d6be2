// Fixed admin palette
//
// Admin surfaces never inherit themed settings; colors depend only on variant and style mode.

use super::{ButtonStyleRequest, ButtonVariant, ResolvedButtonStyle};
use crate::settings::{GradientDirection, StyleMode};

/// Colors for one admin variant/style pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminColors {
    pub background: &'static str,
    pub text: &'static str,
    pub hover_background: &'static str,
    pub hover_text: &'static str,
    pub border: &'static str,
}

struct AdminBase {
    main: &'static str,
    hover: &'static str,
    on_main: &'static str,
    gradient_to: &'static str,
    tint: &'static str,
}

fn base(variant: ButtonVariant) -> AdminBase {
    match variant {
        ButtonVariant::Primary => AdminBase {
            main: "#111827",
            hover: "#1F2937",
            on_main: "#FFFFFF",
            gradient_to: "#374151",
            tint: "#F3F4F6",
        },
        ButtonVariant::Secondary => AdminBase {
            main: "#6B7280",
            hover: "#4B5563",
            on_main: "#FFFFFF",
            gradient_to: "#9CA3AF",
            tint: "#F9FAFB",
        },
        ButtonVariant::Success => AdminBase {
            main: "#10B981",
            hover: "#059669",
            on_main: "#FFFFFF",
            gradient_to: "#34D399",
            tint: "#ECFDF5",
        },
        ButtonVariant::Danger => AdminBase {
            main: "#EF4444",
            hover: "#DC2626",
            on_main: "#FFFFFF",
            gradient_to: "#F87171",
            tint: "#FEF2F2",
        },
    }
}

/// Admin palette entry for a variant and style mode
pub fn admin_colors(variant: ButtonVariant, style: StyleMode) -> AdminColors {
    let base = base(variant);
    match style {
        StyleMode::Solid | StyleMode::Gradient => AdminColors {
            background: base.main,
            text: base.on_main,
            hover_background: base.hover,
            hover_text: base.on_main,
            border: base.main,
        },
        StyleMode::Outline => AdminColors {
            background: "transparent",
            text: base.main,
            hover_background: base.main,
            hover_text: base.on_main,
            border: base.main,
        },
        StyleMode::Ghost => AdminColors {
            background: "transparent",
            text: base.main,
            hover_background: base.tint,
            hover_text: base.main,
            border: "transparent",
        },
    }
}

pub(super) fn resolve(request: &ButtonStyleRequest<'_>) -> ResolvedButtonStyle {
    // Only the style mode is taken from props; page and global layers are ignored.
    let style = request
        .props
        .and_then(|props| props.style)
        .unwrap_or(StyleMode::Solid);
    let colors = admin_colors(request.variant, style);
    let hovered = request.hovered && !request.disabled;

    let background = match (style, hovered) {
        (_, true) => colors.hover_background.to_string(),
        (StyleMode::Gradient, false) => GradientDirection::ToRight
            .linear_gradient(colors.background, base(request.variant).gradient_to),
        _ => colors.background.to_string(),
    };
    let color = if hovered {
        colors.hover_text
    } else {
        colors.text
    };

    ResolvedButtonStyle {
        style,
        background,
        color: color.to_string(),
        border: format!("1px solid {}", colors.border),
        border_radius: "0.375rem".to_string(),
        padding: "0.5rem 1rem".to_string(),
        width: "auto".to_string(),
        height: "auto".to_string(),
        font_size: "0.875rem".to_string(),
        font_weight: "500".to_string(),
        transition: "all 0.15s ease".to_string(),
        cursor: if request.disabled {
            "not-allowed"
        } else {
            "pointer"
        },
        opacity: if request.disabled { "0.5" } else { "1" },
    }
}
