// End-to-end theme synchronization: backend -> store -> provider/document -> themed button

use std::sync::Arc;

use serde_json::{json, Map, Value};

use storefront_theme::component::{Component, Context, PageStyles};
use storefront_theme::content::SettingsAdmin;
use storefront_theme::dom::{render_root_css, ApplyReport, MemoryDocument};
use storefront_theme::events::SettingsBus;
use storefront_theme::kit::components::button::{Button, ButtonProps};
use storefront_theme::kit::theme::ThemeProvider;
use storefront_theme::prelude::*;
use storefront_theme::settings::StyleMode;

fn settings_row(key: &str, value: Value) -> Map<String, Value> {
    let mut row = Map::new();
    row.insert("key".into(), json!(key));
    row.insert("value".into(), value);
    row
}

fn isolated_store(service: Arc<InMemoryDataService>) -> SettingsStore {
    SettingsStore::with_bus(service, ThemeConfig::default(), SettingsBus::new())
}

#[test]
fn button_renders_defaults_before_first_fetch() {
    let store = isolated_store(Arc::new(InMemoryDataService::new()));
    assert!(store.state().is_loading);

    let context = Context::new().with_store(store);
    let button = Button::create(ButtonProps::new("Join"), context);
    let style = button.resolved_style();

    assert_eq!(style.background, "var(--color-text)");
    assert_eq!(style.color, "var(--color-background)");
}

#[tokio::test]
async fn fetched_settings_flow_to_document_and_button() {
    let service = Arc::new(InMemoryDataService::new());
    service
        .upsert(
            "site_settings",
            settings_row(
                "button_settings",
                json!({
                    "primary_bg": "#0F766E",
                    "primary_style": "solid",
                    "border_radius": "999px",
                }),
            ),
            "key",
        )
        .await
        .unwrap();
    service
        .upsert(
            "site_settings",
            settings_row(
                "color_palette",
                json!({ "palette": "brand", "home_secondary_palette": "blue" }),
            ),
            "key",
        )
        .await
        .unwrap();

    let store = isolated_store(service.clone());
    let mut provider = ThemeProvider::new(store.clone(), MemoryDocument::new());
    provider.install().unwrap();
    assert_eq!(
        provider.applier().target().property("--color-primary"),
        Some("#111111")
    );

    assert_eq!(store.fetch_settings().await, FetchOutcome::Updated);
    // Subscriber request plus the bus broadcast.
    assert_eq!(provider.apply_pending(), 2);

    let doc = provider.applier().target();
    assert_eq!(doc.property("--button-primary-bg"), Some("#0F766E"));
    assert_eq!(doc.property("--button-border-radius"), Some("999px"));
    assert_eq!(doc.property("--color-primary"), Some("#C2410C"));
    assert_eq!(doc.property("--home-secondary-primary"), Some("#1D4ED8"));
    assert!(doc.has_body_class("palette-brand"));
    assert!(doc.link("theme-fonts").is_some());

    let button = Button::create(ButtonProps::new("Shop now"), provider.context());
    let html = button.to_html().unwrap();
    assert!(html.contains("background: #0F766E;"));
    assert!(html.contains("border-radius: 999px;"));

    let css = render_root_css(&store.snapshot());
    assert!(css.contains("--button-primary-bg: #0F766E;"));
}

#[tokio::test]
async fn unchanged_refetch_reapplies_once_through_broadcast() {
    let store = isolated_store(Arc::new(InMemoryDataService::new()));
    let mut provider = ThemeProvider::new(store.clone(), MemoryDocument::new());
    provider.install().unwrap();
    assert_eq!(store.fetch_settings().await, FetchOutcome::Updated);
    provider.apply_pending();
    let writes = provider.applier().target().writes;
    let reflows = provider.applier().target().reflows;

    // Applying an equal snapshot directly is a no-op.
    assert_eq!(
        provider.applier_mut().apply(&store.snapshot()).unwrap(),
        ApplyReport::Unchanged
    );
    assert_eq!(provider.applier().target().writes, writes);
    assert_eq!(provider.applier().target().reflows, reflows);

    // A refetch queues the store update and the bus broadcast. The store update hits the
    // equality guard; the broadcast forces exactly one full re-apply.
    assert_eq!(store.fetch_settings().await, FetchOutcome::Updated);
    assert_eq!(provider.apply_pending(), 2);

    let doc = provider.applier().target();
    assert_eq!(doc.reflows, reflows + 1);
    let forced = doc.writes - writes;
    assert!(forced > 0);

    // A second refetch costs the same, so the store update added nothing.
    assert_eq!(store.fetch_settings().await, FetchOutcome::Updated);
    assert_eq!(provider.apply_pending(), 2);
    let doc = provider.applier().target();
    assert_eq!(doc.reflows, reflows + 2);
    assert_eq!(doc.writes - writes, forced * 2);
    assert_eq!(doc.property("--color-primary"), Some("#111111"));
}

#[tokio::test]
async fn page_and_call_site_overrides_layer_over_settings() {
    let service = Arc::new(InMemoryDataService::new());
    service
        .upsert(
            "site_settings",
            settings_row("button_settings", json!({ "secondary_text": "#global" })),
            "key",
        )
        .await
        .unwrap();
    let store = isolated_store(service);
    store.fetch_settings().await;

    let page = PageStyles::default().with_button(
        ButtonVariant::Secondary,
        ButtonStyleOverride {
            text_color: Some("#page".to_string()),
            ..ButtonStyleOverride::default()
        },
    );
    let context = Context::new()
        .with_store(store.clone())
        .with_page_styles(page);

    let from_page = Button::create(
        ButtonProps::new("Details").variant(ButtonVariant::Secondary),
        context.clone(),
    );
    assert_eq!(from_page.resolved_style().color, "#page");

    let from_props = Button::create(
        ButtonProps::new("Details")
            .variant(ButtonVariant::Secondary)
            .style(ButtonStyleOverride {
                text_color: Some("#prop".to_string()),
                style: Some(StyleMode::Ghost),
                ..ButtonStyleOverride::default()
            }),
        context,
    );
    let style = from_props.resolved_style();
    assert_eq!(style.color, "#prop");
    assert_eq!(style.background, "transparent");

    let global_only = Button::create(
        ButtonProps::new("Details").variant(ButtonVariant::Secondary),
        Context::new().with_store(store),
    );
    assert_eq!(global_only.resolved_style().color, "#global");
}

#[tokio::test]
async fn admin_console_ignores_theme() {
    let service = Arc::new(InMemoryDataService::new());
    let store = isolated_store(service);
    let admin = SettingsAdmin::new(store.clone());
    admin
        .save_button(&ButtonSettings {
            primary_bg: "#ABCDEF".to_string(),
            ..ButtonSettings::default()
        })
        .await
        .unwrap();
    store.fetch_settings().await;

    let provider =
        ThemeProvider::new(store, MemoryDocument::new()).with_route("/admin/theme");
    let danger = Button::create(
        ButtonProps::new("Delete slide").variant(ButtonVariant::Danger),
        provider.context(),
    );
    let style = danger.resolved_style();
    assert_eq!(style.background, "#EF4444");
    assert_eq!(style.color, "#FFFFFF");

    let primary = Button::create(ButtonProps::new("Save"), provider.context());
    assert_eq!(primary.resolved_style().background, "#111827");
}

#[tokio::test]
async fn failed_fetch_keeps_serving_last_snapshot() {
    let service = Arc::new(InMemoryDataService::new());
    service
        .upsert(
            "site_settings",
            settings_row("font_settings", json!({ "enabled": false })),
            "key",
        )
        .await
        .unwrap();
    let store = isolated_store(service.clone());
    store.fetch_settings().await;

    service.fail_reads_with(Some(RemoteError::Status {
        status: 503,
        message: "maintenance".to_string(),
    }));
    assert!(matches!(
        store.fetch_settings().await,
        FetchOutcome::Failed(RemoteError::Status { status: 503, .. })
    ));

    let styles = use_component_styles(&Context::new().with_store(store.clone()));
    assert!(styles.is_error);
    assert!(!styles.is_loading);
    assert_eq!(styles.fonts.heading, "inherit");

    service.fail_reads_with(None);
    let hook = ComponentStyleHook::new(store);
    assert_eq!(hook.refetch().await, FetchOutcome::Updated);
    assert!(!hook.styles().is_error);
}

#[test]
fn init_validates_config() {
    let remote: Arc<dyn RemoteDataService> = Arc::new(InMemoryDataService::new());
    let bad = ThemeConfig {
        poll_interval_ms: 0,
        ..ThemeConfig::default()
    };
    assert!(matches!(
        storefront_theme::init(bad, remote.clone()),
        Err(storefront_theme::Error::Config(_))
    ));
    let store = storefront_theme::init(ThemeConfig::default(), remote).unwrap();
    assert!(store.state().is_loading);
}
