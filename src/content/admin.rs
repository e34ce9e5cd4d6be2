// Saving theme settings from the admin console

use serde::Serialize;
use serde_json::Value;

use super::ContentError;
use crate::events::{RefreshTrigger, SettingsChanged};
use crate::remote::Row;
use crate::settings::{
    ButtonSettings, ColorPaletteSettings, FontSettings, SettingsKind, SettingsSnapshot,
};
use crate::state::SettingsStore;

/// Writes settings records and tells every listener right away
///
/// After a save the merged snapshot is broadcast on the store's bus so documents re-apply before
/// the realtime feed or the next poll catches up, and a store refresh is requested.
///
/// While the store has not settled (still loading, or its last fetch failed) its snapshot is not
/// what the backend holds, so the other two kinds are read back from the backend before merging.
/// If that read fails the record stays written, nothing is broadcast, and the error is returned.
#[derive(Clone)]
pub struct SettingsAdmin {
    store: SettingsStore,
}

impl SettingsAdmin {
    pub fn new(store: SettingsStore) -> Self {
        Self { store }
    }

    pub async fn save_button(
        &self,
        settings: &ButtonSettings,
    ) -> Result<SettingsSnapshot, ContentError> {
        self.save(SettingsKind::ButtonSettings, settings).await
    }

    pub async fn save_font(
        &self,
        settings: &FontSettings,
    ) -> Result<SettingsSnapshot, ContentError> {
        self.save(SettingsKind::FontSettings, settings).await
    }

    pub async fn save_palette(
        &self,
        settings: &ColorPaletteSettings,
    ) -> Result<SettingsSnapshot, ContentError> {
        self.save(SettingsKind::ColorPalette, settings).await
    }

    async fn save<T: Serialize>(
        &self,
        kind: SettingsKind,
        settings: &T,
    ) -> Result<SettingsSnapshot, ContentError> {
        let config = self.store.config();
        let value = serde_json::to_value(settings)?;

        let mut row = Row::new();
        row.insert(config.key_column.clone(), Value::String(kind.key().to_string()));
        row.insert(config.value_column.clone(), value.clone());
        self.store
            .remote()
            .upsert(&config.settings_table, row, &config.key_column)
            .await?;

        let state = self.store.state();
        let merged = if state.is_loading || state.is_error {
            match self.store.read_stored().await {
                Ok(stored) => stored,
                Err(err) => {
                    log::warn!("Saved {} settings but could not read them back: {}", kind, err);
                    self.store.request_refresh(RefreshTrigger::Manual);
                    return Err(err.into());
                }
            }
        } else {
            let mut merged = state.settings;
            merged.set_from_value(kind, &value);
            merged
        };
        log::info!("Saved {} settings", kind);

        if let Err(err) = self.store.bus().emit(&SettingsChanged::now(merged.clone())) {
            log::warn!("Failed to broadcast saved {} settings: {}", kind, err);
        }
        self.store.request_refresh(RefreshTrigger::Manual);

        Ok(merged)
    }
}
