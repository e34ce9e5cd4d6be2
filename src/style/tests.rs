use super::*;

fn settings() -> ButtonSettings {
    ButtonSettings {
        primary_bg: "#global".to_string(),
        primary_text: "#global-text".to_string(),
        border_radius: "9px".to_string(),
        ..ButtonSettings::default()
    }
}

fn with_background(value: &str) -> ButtonStyleOverride {
    ButtonStyleOverride {
        background: Some(value.to_string()),
        ..ButtonStyleOverride::default()
    }
}

#[test]
fn test_loading_primary_uses_defaults() {
    let resolved = resolve_button_style(&ButtonStyleRequest::default());
    assert_eq!(resolved.background, "var(--color-text)");
    assert_eq!(resolved.color, "var(--color-background)");
    assert_eq!(resolved.style, StyleMode::Solid);
    assert_eq!(resolved.width, "auto");
}

#[test]
fn test_loading_secondary_is_outlined() {
    let resolved = resolve_button_style(&ButtonStyleRequest {
        variant: ButtonVariant::Secondary,
        ..ButtonStyleRequest::default()
    });
    assert_eq!(resolved.background, "transparent");
    assert_eq!(resolved.color, "var(--color-text)");
    assert_eq!(resolved.border, "1px solid var(--color-text)");
}

#[test]
fn test_each_layer_wins_over_lower_ones() {
    let settings = settings();
    let page = with_background("#page");
    let props = with_background("#prop");

    let only_global = resolve_button_style(&ButtonStyleRequest {
        settings: Some(&settings),
        ..ButtonStyleRequest::default()
    });
    assert_eq!(only_global.background, "#global");

    let with_page = resolve_button_style(&ButtonStyleRequest {
        settings: Some(&settings),
        page: Some(&page),
        ..ButtonStyleRequest::default()
    });
    assert_eq!(with_page.background, "#page");

    let with_props = resolve_button_style(&ButtonStyleRequest {
        settings: Some(&settings),
        page: Some(&page),
        props: Some(&props),
        ..ButtonStyleRequest::default()
    });
    assert_eq!(with_props.background, "#prop");

    // Layers are per attribute.
    assert_eq!(with_props.color, "#global-text");
    assert_eq!(with_props.border_radius, "9px");
}

#[test]
fn test_blank_values_fall_through() {
    let settings = ButtonSettings {
        primary_bg: "   ".to_string(),
        ..ButtonSettings::default()
    };
    let props = with_background("");
    let resolved = resolve_button_style(&ButtonStyleRequest {
        settings: Some(&settings),
        props: Some(&props),
        ..ButtonStyleRequest::default()
    });
    assert_eq!(resolved.background, "var(--color-text)");
}

#[test]
fn test_disabled_settings_are_skipped() {
    let settings = ButtonSettings {
        enabled: false,
        ..settings()
    };
    let resolved = resolve_button_style(&ButtonStyleRequest {
        settings: Some(&settings),
        ..ButtonStyleRequest::default()
    });
    assert_eq!(resolved.background, "var(--color-text)");
    assert_eq!(resolved.border_radius, "0.375rem");
}

#[test]
fn test_fixed_width_gates_global_geometry() {
    let mut settings = ButtonSettings::default();
    let free = resolve_button_style(&ButtonStyleRequest {
        settings: Some(&settings),
        ..ButtonStyleRequest::default()
    });
    assert_eq!((free.width.as_str(), free.height.as_str()), ("auto", "auto"));

    settings.fixed_width = true;
    let fixed = resolve_button_style(&ButtonStyleRequest {
        settings: Some(&settings),
        ..ButtonStyleRequest::default()
    });
    assert_eq!((fixed.width.as_str(), fixed.height.as_str()), ("200px", "48px"));

    let props = ButtonStyleOverride {
        width: Some("100%".to_string()),
        ..ButtonStyleOverride::default()
    };
    let wide = resolve_button_style(&ButtonStyleRequest {
        settings: Some(&settings),
        props: Some(&props),
        ..ButtonStyleRequest::default()
    });
    assert_eq!(wide.width, "100%");
}

#[test]
fn test_gradient_mode() {
    let settings = ButtonSettings {
        primary_style: StyleMode::Gradient,
        primary_gradient_from: "#111".to_string(),
        primary_gradient_to: "#999".to_string(),
        primary_gradient_direction: GradientDirection::ToBottomRight,
        ..ButtonSettings::default()
    };
    let resolved = resolve_button_style(&ButtonStyleRequest {
        settings: Some(&settings),
        ..ButtonStyleRequest::default()
    });
    assert_eq!(
        resolved.background,
        "linear-gradient(to bottom right, #111, #999)"
    );
    assert_eq!(resolved.border, "1px solid transparent");

    let page = ButtonStyleOverride {
        gradient_direction: Some(GradientDirection::ToTop),
        ..ButtonStyleOverride::default()
    };
    let resolved = resolve_button_style(&ButtonStyleRequest {
        settings: Some(&settings),
        page: Some(&page),
        ..ButtonStyleRequest::default()
    });
    assert_eq!(resolved.background, "linear-gradient(to top, #111, #999)");
}

#[test]
fn test_outline_and_ghost_keep_text_precedence() {
    let page = ButtonStyleOverride {
        text_color: Some("#page-text".to_string()),
        ..ButtonStyleOverride::default()
    };
    for style in [StyleMode::Outline, StyleMode::Ghost] {
        let props = ButtonStyleOverride {
            style: Some(style),
            background: Some("#ignored".to_string()),
            ..ButtonStyleOverride::default()
        };
        let resolved = resolve_button_style(&ButtonStyleRequest {
            props: Some(&props),
            page: Some(&page),
            ..ButtonStyleRequest::default()
        });
        assert_eq!(resolved.background, "transparent");
        assert_eq!(resolved.color, "#page-text");
    }
}

#[test]
fn test_hover_swaps_to_hover_pair() {
    let settings = settings();
    let resolved = resolve_button_style(&ButtonStyleRequest {
        settings: Some(&settings),
        hovered: true,
        ..ButtonStyleRequest::default()
    });
    assert_eq!(resolved.background, "var(--color-primary)");
    assert_eq!(resolved.color, "var(--color-background)");

    let disabled = resolve_button_style(&ButtonStyleRequest {
        settings: Some(&settings),
        hovered: true,
        disabled: true,
        ..ButtonStyleRequest::default()
    });
    assert_eq!(disabled.background, "#global");
    assert_eq!(disabled.cursor, "not-allowed");
    assert_eq!(disabled.opacity, "0.5");
}

#[test]
fn test_admin_danger_ignores_overrides() {
    let settings = settings();
    let page = with_background("#page");
    let props = with_background("#prop");
    let resolved = resolve_button_style(&ButtonStyleRequest {
        variant: ButtonVariant::Danger,
        mode: ThemeMode::Admin,
        settings: Some(&settings),
        page: Some(&page),
        props: Some(&props),
        ..ButtonStyleRequest::default()
    });
    assert_eq!(resolved.background, "#EF4444");
    assert_eq!(resolved.color, "#FFFFFF");
}

#[test]
fn test_admin_palette_by_style() {
    let outline = admin_colors(ButtonVariant::Success, StyleMode::Outline);
    assert_eq!(outline.background, "transparent");
    assert_eq!(outline.text, "#10B981");

    let props = ButtonStyleOverride {
        style: Some(StyleMode::Ghost),
        ..ButtonStyleOverride::default()
    };
    let hovered = resolve_button_style(&ButtonStyleRequest {
        variant: ButtonVariant::Primary,
        mode: ThemeMode::Admin,
        props: Some(&props),
        hovered: true,
        ..ButtonStyleRequest::default()
    });
    assert_eq!(hovered.background, "#F3F4F6");
}

#[test]
fn test_route_mode() {
    assert_eq!(ThemeMode::from_route("/admin"), ThemeMode::Admin);
    assert_eq!(ThemeMode::from_route("/admin/hero"), ThemeMode::Admin);
    assert_eq!(ThemeMode::from_route("/administrators"), ThemeMode::Public);
    assert_eq!(ThemeMode::from_route("/shop"), ThemeMode::Public);
}

#[test]
fn test_inline_css() {
    let css = resolve_button_style(&ButtonStyleRequest::default()).to_inline_css();
    assert!(css.starts_with("background: var(--color-text); color: var(--color-background);"));
    assert!(css.contains("padding: 0.75rem 1.5rem;"));
    assert!(css.ends_with("opacity: 1;"));
}

#[test]
fn test_page_override_from_json() {
    let page: ButtonStyleOverride =
        serde_json::from_str(r##"{ "background": "#abc", "style": "ghost" }"##).unwrap();
    assert_eq!(page.background.as_deref(), Some("#abc"));
    assert_eq!(page.style, Some(StyleMode::Ghost));
    assert!(!page.is_empty());
    assert!(ButtonStyleOverride::default().is_empty());
}
