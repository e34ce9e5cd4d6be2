// Theme settings synchronization for the storefront site
pub mod clock;
pub mod component;
pub mod config;
pub mod content;
pub mod dom;
pub mod events;
pub mod platform;
pub mod remote;
pub mod settings;
pub mod state;
pub mod style;

pub mod kit; // Themed components, theme provider, and style hook

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export of common types for convenience
pub mod prelude {
    pub use crate::component::{Component, ComponentError, Context, Node, PageStyles};
    pub use crate::config::ThemeConfig;
    pub use crate::content::{ContentRepository, SettingsAdmin};
    pub use crate::dom::{MemoryDocument, StyleApplier, StyleTarget};
    pub use crate::events::{RefreshTrigger, SettingsBus, SettingsChanged};
    pub use crate::kit::prelude::*;
    pub use crate::platform::PlatformAdapter;
    pub use crate::remote::{InMemoryDataService, RemoteDataService, RemoteError};
    pub use crate::settings::{
        ButtonSettings, ColorPaletteSettings, FontSettings, PaletteId, SettingsSnapshot,
    };
    pub use crate::state::{FetchOutcome, SettingsStore, StoreState};
    pub use crate::style::{
        resolve_button_style, ButtonStyleOverride, ButtonVariant, ThemeMode,
    };
}

/// Build a settings store for the given configuration and backend
///
/// Validates the configuration first; the store itself starts in the loading state with defaults.
pub fn init(
    config: config::ThemeConfig,
    remote: std::sync::Arc<dyn remote::RemoteDataService>,
) -> Result<state::SettingsStore, Error> {
    config.validate()?;
    log::debug!(
        "Initializing storefront theme {} (table '{}')",
        VERSION,
        config.settings_table
    );
    Ok(state::SettingsStore::new(remote, config))
}

/// Errors that can occur in the storefront theme crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Initialization error: {0}")]
    Init(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Remote error: {0}")]
    Remote(#[from] remote::RemoteError),

    #[error("Document error: {0}")]
    Dom(#[from] dom::DomError),

    #[error("Component error: {0}")]
    Component(#[from] component::ComponentError),

    #[error("Content error: {0}")]
    Content(#[from] content::ContentError),

    #[error("Platform error: {0}")]
    Platform(String),
}
