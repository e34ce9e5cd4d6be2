// Component style hook
//
// Reshapes the store's three settings records into bundles that content components read
// directly. Everything is derived from the current store state on every call; nothing is cached.

use crate::component::Context;
use crate::settings::{
    ButtonSettings, ColorPaletteSettings, ConcreteColors, FontSettings, FontSlot,
    GradientDirection, PaletteId, StyleMode,
};
use crate::state::{FetchOutcome, SettingsStore, StoreState, SubscriptionId};

/// Colors and mode for one button variant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantBundle {
    pub background: String,
    pub text: String,
    pub hover_background: String,
    pub hover_text: String,
    pub border: String,
    pub style: StyleMode,
}

/// Geometry shared by both variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedBundle {
    pub border_radius: String,
    pub border_width: String,
    pub padding_x: String,
    pub padding_y: String,
    pub font_weight: String,
    pub font_size: String,
    pub transition: String,
    /// `auto` unless fixed sizing is enabled
    pub width: String,
    pub height: String,
    pub fixed_width: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientStops {
    pub from: String,
    pub to: String,
    pub direction: GradientDirection,
    /// Ready-to-use `linear-gradient(...)` expression
    pub css: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientBundle {
    pub primary: GradientStops,
    pub secondary: GradientStops,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonBundles {
    pub primary: VariantBundle,
    pub secondary: VariantBundle,
    pub shared: SharedBundle,
    pub gradient: GradientBundle,
}

impl ButtonBundles {
    /// Bundles for stored settings; disabled settings yield the defaults
    pub fn from_settings(settings: &ButtonSettings) -> Self {
        let defaults;
        let b = if settings.enabled {
            settings
        } else {
            defaults = ButtonSettings::default();
            &defaults
        };

        let stops = |from: &str, to: &str, direction: GradientDirection| GradientStops {
            from: from.to_string(),
            to: to.to_string(),
            direction,
            css: direction.linear_gradient(from, to),
        };
        let sized = |value: &str| {
            if b.fixed_width {
                value.to_string()
            } else {
                "auto".to_string()
            }
        };

        Self {
            primary: VariantBundle {
                background: b.primary_bg.clone(),
                text: b.primary_text.clone(),
                hover_background: b.primary_hover_bg.clone(),
                hover_text: b.primary_hover_text.clone(),
                border: b.primary_border.clone(),
                style: b.primary_style,
            },
            secondary: VariantBundle {
                background: b.secondary_bg.clone(),
                text: b.secondary_text.clone(),
                hover_background: b.secondary_hover_bg.clone(),
                hover_text: b.secondary_hover_text.clone(),
                border: b.secondary_border.clone(),
                style: b.secondary_style,
            },
            shared: SharedBundle {
                border_radius: b.border_radius.clone(),
                border_width: b.border_width.clone(),
                padding_x: b.padding_x.clone(),
                padding_y: b.padding_y.clone(),
                font_weight: b.font_weight.clone(),
                font_size: b.font_size.clone(),
                transition: b.transition.clone(),
                width: sized(&b.width),
                height: sized(&b.height),
                fixed_width: b.fixed_width,
            },
            gradient: GradientBundle {
                primary: stops(
                    &b.primary_gradient_from,
                    &b.primary_gradient_to,
                    b.primary_gradient_direction,
                ),
                secondary: stops(
                    &b.secondary_gradient_from,
                    &b.secondary_gradient_to,
                    b.secondary_gradient_direction,
                ),
            },
        }
    }
}

/// Font families per slot; `inherit` when custom fonts are off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontAccessors {
    pub primary: String,
    pub secondary: String,
    pub body: String,
    pub heading: String,
    pub enabled: bool,
}

impl FontAccessors {
    pub fn from_settings(font: &FontSettings) -> Self {
        let family = |slot| font.effective_family(slot).to_string();
        Self {
            primary: family(FontSlot::Primary),
            secondary: family(FontSlot::Secondary),
            body: family(FontSlot::Body),
            heading: family(FontSlot::Heading),
            enabled: font.enabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteFlags {
    pub palette: PaletteId,
    pub colors: &'static ConcreteColors,
    pub use_alternating_sections: bool,
    pub use_uniform_color: bool,
    /// `alternating` or `uniform`
    pub section_style: &'static str,
    pub home_secondary_palette: Option<PaletteId>,
}

impl PaletteFlags {
    pub fn from_settings(color: &ColorPaletteSettings) -> Self {
        Self {
            palette: color.palette,
            colors: color.colors(),
            use_alternating_sections: color.use_alternating_sections,
            use_uniform_color: color.use_uniform_color,
            section_style: color.section_style(),
            home_secondary_palette: color.home_secondary_palette,
        }
    }

    /// Background for the `index`-th page section
    pub fn section_background(&self, index: usize) -> &'static str {
        if self.section_style == "uniform" || index % 2 == 0 {
            self.colors.section_alt_1
        } else {
            self.colors.section_alt_2
        }
    }
}

/// Everything a content component needs from the theme settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentStyles {
    pub buttons: ButtonBundles,
    pub fonts: FontAccessors,
    pub colors: PaletteFlags,
    pub is_loading: bool,
    pub is_error: bool,
}

impl ComponentStyles {
    pub fn from_state(state: &StoreState) -> Self {
        let settings = &state.settings;
        Self {
            buttons: ButtonBundles::from_settings(&settings.button),
            fonts: FontAccessors::from_settings(&settings.font),
            colors: PaletteFlags::from_settings(&settings.color),
            is_loading: state.is_loading,
            is_error: state.is_error,
        }
    }
}

/// Live view of the store for content components
#[derive(Clone)]
pub struct ComponentStyleHook {
    store: SettingsStore,
}

impl ComponentStyleHook {
    pub fn new(store: SettingsStore) -> Self {
        Self { store }
    }

    /// Styles derived from the store's current state
    pub fn styles(&self) -> ComponentStyles {
        ComponentStyles::from_state(&self.store.state())
    }

    /// Run `listener` with freshly derived styles after every store change
    pub fn subscribe(
        &self,
        listener: impl Fn(&ComponentStyles) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.store
            .subscribe(move |state| listener(&ComponentStyles::from_state(state)))
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.store.unsubscribe(id);
    }

    /// Same as [`SettingsStore::refetch`]
    pub async fn refetch(&self) -> FetchOutcome {
        self.store.refetch().await
    }
}

/// Styles for a render context; defaults in the loading state when no store is attached
pub fn use_component_styles(context: &Context) -> ComponentStyles {
    match context.store() {
        Some(store) => ComponentStyleHook::new(store.clone()).styles(),
        None => ComponentStyles::from_state(&StoreState::default()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::config::ThemeConfig;
    use crate::events::SettingsBus;
    use crate::remote::{InMemoryDataService, RemoteDataService};

    #[test]
    fn test_defaults_without_store() {
        let styles = use_component_styles(&Context::new());
        assert!(styles.is_loading);
        assert_eq!(styles.buttons.primary.background, "var(--color-text)");
        assert_eq!(styles.buttons.secondary.style, StyleMode::Outline);
        assert_eq!(styles.buttons.shared.width, "auto");
        assert_eq!(
            styles.buttons.gradient.secondary.css,
            "linear-gradient(to right, var(--color-secondary), var(--color-primary))"
        );
        assert_eq!(styles.fonts.heading, "Playfair Display");
        assert_eq!(styles.colors.palette, PaletteId::Monochrome);
        assert_eq!(styles.colors.section_background(1), "#F5F5F5");
    }

    #[test]
    fn test_disabled_buttons_use_defaults() {
        let settings = ButtonSettings {
            enabled: false,
            primary_bg: "#ABCDEF".to_string(),
            fixed_width: true,
            ..ButtonSettings::default()
        };
        let bundles = ButtonBundles::from_settings(&settings);
        assert_eq!(bundles.primary.background, "var(--color-text)");
        assert!(!bundles.shared.fixed_width);
    }

    #[test]
    fn test_uniform_sections() {
        let flags = PaletteFlags::from_settings(&ColorPaletteSettings {
            use_uniform_color: true,
            ..ColorPaletteSettings::default()
        });
        assert_eq!(flags.section_background(0), flags.section_background(1));
    }

    #[tokio::test]
    async fn test_hook_follows_store() {
        let service = Arc::new(InMemoryDataService::new());
        let mut row = serde_json::Map::new();
        row.insert("key".into(), json!("font_settings"));
        row.insert("value".into(), json!({ "enabled": false }));
        service.upsert("site_settings", row, "key").await.unwrap();

        let store = SettingsStore::with_bus(service, ThemeConfig::default(), SettingsBus::new());
        let hook = ComponentStyleHook::new(store.clone());
        assert!(hook.styles().is_loading);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        hook.subscribe(move |styles| seen_clone.lock().unwrap().push(styles.fonts.body.clone()));

        assert_eq!(hook.refetch().await, FetchOutcome::Updated);
        let styles = hook.styles();
        assert!(!styles.is_loading);
        assert_eq!(styles.fonts.body, "inherit");
        assert_eq!(*seen.lock().unwrap(), vec!["inherit".to_string()]);

        let context = Context::new().with_store(store);
        assert_eq!(use_component_styles(&context), styles);
    }
}
