//! Settings change notifications
//!
//! - [`SettingsBus`] - process-wide broadcast of [`SettingsChanged`]
//! - [`RefreshTrigger`] - why a settings refresh was requested

pub mod bus;

pub use bus::{ListenerId, SettingsBus, SettingsChanged};

/// Source of a settings refresh request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshTrigger {
    /// First fetch after the store is installed
    Mount,
    /// Insert or update on the settings table
    Realtime,
    /// Fallback interval timer
    Poll,
    /// Document became visible
    Visibility,
    /// Identity state changed
    Auth,
    /// Explicit retry from the UI
    Manual,
}
