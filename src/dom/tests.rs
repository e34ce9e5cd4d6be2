use super::*;
use crate::settings::PaletteId;

fn applier() -> StyleApplier<MemoryDocument> {
    StyleApplier::new(MemoryDocument::new(), &ThemeConfig::default())
}

#[test]
fn test_first_apply_writes_everything() {
    let mut applier = applier();
    let report = applier.apply(&SettingsSnapshot::default()).unwrap();

    assert_eq!(
        report,
        ApplyReport::Applied {
            properties: 53,
            font_link: true,
        }
    );
    let doc = applier.target();
    assert_eq!(doc.property("--color-primary"), Some("#111111"));
    assert_eq!(doc.property("--button-primary-bg"), Some("var(--color-text)"));
    assert!(doc.has_body_class("palette-monochrome"));
    assert_eq!(doc.body_attribute("data-section-style"), Some("alternating"));
    assert!(doc
        .link("theme-fonts")
        .unwrap()
        .starts_with("https://fonts.googleapis.com/css2?family=Inter"));
    assert_eq!(doc.reflows, 1);
    assert!(applier.last_applied_at().is_some());
}

#[test]
fn test_unchanged_snapshot_writes_nothing() {
    let mut applier = applier();
    let snapshot = SettingsSnapshot::default();
    applier.apply(&snapshot).unwrap();
    let writes = applier.target().writes;

    assert_eq!(applier.apply(&snapshot).unwrap(), ApplyReport::Unchanged);
    assert_eq!(applier.target().writes, writes);
    assert_eq!(applier.target().reflows, 1);
}

#[test]
fn test_forced_apply_repairs_clobbered_document() {
    let mut applier = applier();
    let snapshot = SettingsSnapshot::default();
    applier.apply(&snapshot).unwrap();
    applier.target_mut().clobber("--color-primary");

    applier
        .on_settings_changed(&SettingsChanged::now(snapshot))
        .unwrap();
    assert_eq!(applier.target().property("--color-primary"), Some("#111111"));
    assert_eq!(applier.target().reflows, 2);
}

#[test]
fn test_palette_switch_replaces_class() {
    let mut applier = applier();
    let mut snapshot = SettingsSnapshot::default();
    applier.apply(&snapshot).unwrap();

    snapshot.color.palette = PaletteId::Red;
    snapshot.color.use_alternating_sections = false;
    applier.apply(&snapshot).unwrap();

    let doc = applier.target();
    assert!(doc.has_body_class("palette-red"));
    assert!(!doc.has_body_class("palette-monochrome"));
    assert_eq!(doc.body_classes.len(), 1);
    assert_eq!(doc.body_attribute("data-section-style"), Some("uniform"));
    assert_eq!(doc.property("--color-primary"), Some("#B91C1C"));
}

#[test]
fn test_home_secondary_properties_are_removed() {
    let mut applier = applier();
    let mut snapshot = SettingsSnapshot::default();
    snapshot.color.home_secondary_palette = Some(PaletteId::Blue);
    applier.apply(&snapshot).unwrap();
    assert_eq!(
        applier.target().property("--home-secondary-primary"),
        Some("#1D4ED8")
    );

    snapshot.color.home_secondary_palette = None;
    applier.apply(&snapshot).unwrap();
    assert_eq!(applier.target().property("--home-secondary-primary"), None);
}

#[test]
fn test_disabled_fonts_skip_link() {
    let mut applier = applier();
    let mut snapshot = SettingsSnapshot::default();
    snapshot.font.enabled = false;

    let report = applier.apply(&snapshot).unwrap();
    assert!(matches!(report, ApplyReport::Applied { font_link: false, .. }));
    assert_eq!(applier.target().link("theme-fonts"), None);
    assert_eq!(applier.target().property("--font-heading"), Some("inherit"));
}

#[test]
fn test_self_check_only_when_stale() {
    let mut applier = applier();
    let snapshot = SettingsSnapshot::default();

    // Nothing applied yet counts as stale.
    assert!(applier.self_check(0, &snapshot).unwrap().is_some());
    let at = applier.last_applied_at().unwrap();

    assert_eq!(applier.self_check(at + 1_000, &snapshot).unwrap(), None);
    assert_eq!(applier.target().reflows, 1);

    let stale = applier.self_check(at + 30_001, &snapshot).unwrap();
    assert!(matches!(stale, Some(ApplyReport::Applied { .. })));
    assert_eq!(applier.target().reflows, 2);
}

#[test]
fn test_bad_font_base_is_reported() {
    let config = ThemeConfig {
        font_stylesheet_base: "::".to_string(),
        ..ThemeConfig::default()
    };
    let mut applier = StyleApplier::new(MemoryDocument::new(), &config);
    assert!(matches!(
        applier.apply(&SettingsSnapshot::default()),
        Err(DomError::FontUrl(_))
    ));
    assert!(applier.last_applied().is_none());
}
