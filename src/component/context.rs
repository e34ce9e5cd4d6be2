//! Render context and callbacks passed down from the composition root

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::settings::{ButtonSettings, SettingsSnapshot};
use crate::state::{SettingsStore, StoreState};
use crate::style::{ButtonStyleOverride, ButtonVariant, ThemeMode};

/// Page-level style overrides, typically loaded alongside a page's layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageStyles {
    pub buttons: HashMap<ButtonVariant, ButtonStyleOverride>,
}

impl PageStyles {
    pub fn button(&self, variant: ButtonVariant) -> Option<&ButtonStyleOverride> {
        self.buttons
            .get(&variant)
            .filter(|overrides| !overrides.is_empty())
    }

    pub fn with_button(mut self, variant: ButtonVariant, overrides: ButtonStyleOverride) -> Self {
        self.buttons.insert(variant, overrides);
        self
    }
}

/// Context passed to components: theme mode, settings source, and page overrides
#[derive(Clone, Default)]
pub struct Context {
    mode: ThemeMode,
    store: Option<SettingsStore>,
    page: Arc<PageStyles>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("mode", &self.mode)
            .field("store", &self.store.is_some())
            .field("page", &self.page)
            .finish()
    }
}

impl Context {
    /// A public-mode context with no settings source; everything renders with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: ThemeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_store(mut self, store: SettingsStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_page_styles(mut self, page: PageStyles) -> Self {
        self.page = Arc::new(page);
        self
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn store(&self) -> Option<&SettingsStore> {
        self.store.as_ref()
    }

    pub fn page_styles(&self) -> &PageStyles {
        &self.page
    }

    /// Current store state, if a store is attached
    pub fn settings_state(&self) -> Option<StoreState> {
        self.store.as_ref().map(SettingsStore::state)
    }

    /// Published snapshot, or defaults without a store
    pub fn snapshot(&self) -> SettingsSnapshot {
        self.store
            .as_ref()
            .map(SettingsStore::snapshot)
            .unwrap_or_default()
    }

    /// Global button settings for resolution; `None` until the store has loaded
    pub fn button_settings(&self) -> Option<ButtonSettings> {
        self.settings_state()
            .filter(|state| !state.is_loading)
            .map(|state| state.settings.button)
    }
}

/// A callback function that can be passed as a prop
pub struct Callback<Args, Ret = ()> {
    func: Arc<dyn Fn(Args) -> Ret + Send + Sync>,
}

impl<Args, Ret> Clone for Callback<Args, Ret> {
    fn clone(&self) -> Self {
        Self {
            func: self.func.clone(),
        }
    }
}

impl<Args, Ret> Debug for Callback<Args, Ret> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Callback")
    }
}

impl<Args, Ret> Callback<Args, Ret> {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(Args) -> Ret + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Call the callback with the given arguments
    pub fn call(&self, args: Args) -> Ret {
        (self.func)(args)
    }
}

/// Convenience function for creating a callback
pub fn callback<F, Args, Ret>(func: F) -> Callback<Args, Ret>
where
    F: Fn(Args) -> Ret + Send + Sync + 'static,
{
    Callback::new(func)
}
