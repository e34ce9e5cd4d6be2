//! Document style application
//!
//! [`StyleApplier`] projects a [`SettingsSnapshot`] onto a document: CSS custom properties on the
//! root element, a palette class and section-style attribute on the body, and a web font
//! stylesheet link. The document itself sits behind [`StyleTarget`] so the same applier drives a
//! browser document or an in-memory one.

mod fonts;
mod memory;
pub mod vars;
#[cfg(feature = "web")]
mod web;

pub use fonts::font_stylesheet_url;
pub use memory::MemoryDocument;
pub use vars::{custom_properties, render_root_css};
#[cfg(feature = "web")]
pub use web::WebDocument;

use crate::clock::now_millis;
use crate::config::ThemeConfig;
use crate::events::SettingsChanged;
use crate::settings::{PaletteId, SettingsSnapshot};

/// Errors raised while writing to a document
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("Document unavailable: {0}")]
    Unavailable(&'static str),

    #[error("Script error: {0}")]
    Script(String),

    #[error("Invalid font stylesheet URL: {0}")]
    FontUrl(String),
}

/// A document the applier can write to
pub trait StyleTarget {
    /// Set a custom property on the root element
    fn set_property(&mut self, name: &str, value: &str) -> Result<(), DomError>;

    /// Remove a custom property from the root element
    fn remove_property(&mut self, name: &str) -> Result<(), DomError>;

    fn add_body_class(&mut self, class: &str) -> Result<(), DomError>;

    fn remove_body_class(&mut self, class: &str) -> Result<(), DomError>;

    fn set_body_attribute(&mut self, name: &str, value: &str) -> Result<(), DomError>;

    /// Create the stylesheet link with `id`, or point the existing one at `href`
    fn upsert_stylesheet_link(&mut self, id: &str, href: &str) -> Result<(), DomError>;

    /// Force the browser to recompute styles
    fn force_reflow(&mut self) -> Result<(), DomError>;
}

/// What a call to the applier did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyReport {
    /// Snapshot matched the last applied one; nothing was written
    Unchanged,
    Applied {
        properties: usize,
        font_link: bool,
    },
}

/// Writes settings snapshots to a [`StyleTarget`]
pub struct StyleApplier<T: StyleTarget> {
    target: T,
    font_stylesheet_base: String,
    font_link_id: String,
    stale_after_ms: u64,
    last_applied: Option<SettingsSnapshot>,
    last_applied_at: Option<u64>,
}

impl<T: StyleTarget> StyleApplier<T> {
    pub fn new(target: T, config: &ThemeConfig) -> Self {
        Self {
            target,
            font_stylesheet_base: config.font_stylesheet_base.clone(),
            font_link_id: config.font_link_id.clone(),
            stale_after_ms: config.stale_after_ms,
            last_applied: None,
            last_applied_at: None,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn last_applied(&self) -> Option<&SettingsSnapshot> {
        self.last_applied.as_ref()
    }

    /// Millisecond timestamp of the last successful write
    pub fn last_applied_at(&self) -> Option<u64> {
        self.last_applied_at
    }

    /// Apply a snapshot unless it equals the last one applied
    pub fn apply(&mut self, snapshot: &SettingsSnapshot) -> Result<ApplyReport, DomError> {
        if self.last_applied.as_ref() == Some(snapshot) {
            log::trace!("Settings unchanged, skipping style application");
            return Ok(ApplyReport::Unchanged);
        }
        self.apply_forced(snapshot)
    }

    /// Apply a snapshot regardless of what was applied before
    pub fn apply_forced(&mut self, snapshot: &SettingsSnapshot) -> Result<ApplyReport, DomError> {
        let mut properties = 0;
        for (name, value) in custom_properties(snapshot) {
            self.target.set_property(name, &value)?;
            properties += 1;
        }

        match vars::home_secondary_properties(&snapshot.color) {
            Some(home) => {
                for (name, value) in home {
                    self.target.set_property(name, &value)?;
                    properties += 1;
                }
            }
            None => {
                for name in vars::HOME_SECONDARY_PROPERTIES {
                    self.target.remove_property(name)?;
                }
            }
        }

        for palette in PaletteId::ALL {
            self.target.remove_body_class(&palette.body_class())?;
        }
        self.target
            .add_body_class(&snapshot.color.palette.body_class())?;
        self.target.set_body_attribute(
            vars::SECTION_STYLE_ATTRIBUTE,
            snapshot.color.section_style(),
        )?;

        let font_link = match font_stylesheet_url(&self.font_stylesheet_base, &snapshot.font)? {
            Some(href) => {
                self.target
                    .upsert_stylesheet_link(&self.font_link_id, &href)?;
                true
            }
            None => false,
        };

        self.target.force_reflow()?;

        self.last_applied = Some(snapshot.clone());
        self.last_applied_at = Some(now_millis());
        log::debug!(
            "Applied {} style properties (palette {})",
            properties,
            snapshot.color.palette.as_str()
        );

        Ok(ApplyReport::Applied {
            properties,
            font_link,
        })
    }

    /// Broadcast handler; always re-applies
    pub fn on_settings_changed(
        &mut self,
        event: &SettingsChanged,
    ) -> Result<ApplyReport, DomError> {
        self.apply_forced(&event.settings)
    }

    /// Re-apply when nothing has been written for longer than the staleness window
    ///
    /// Returns `None` when the document is still fresh.
    pub fn self_check(
        &mut self,
        now_ms: u64,
        snapshot: &SettingsSnapshot,
    ) -> Result<Option<ApplyReport>, DomError> {
        let stale = match self.last_applied_at {
            Some(at) => now_ms.saturating_sub(at) > self.stale_after_ms,
            None => true,
        };
        if !stale {
            return Ok(None);
        }

        log::debug!("Applied styles are stale, re-applying");
        self.apply_forced(snapshot).map(Some)
    }
}

#[cfg(test)]
mod tests;
