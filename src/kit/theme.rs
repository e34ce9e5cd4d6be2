// Theme provider: the composition root tying the settings store to a document
//
// The store and the settings bus only push requests into a channel; the provider owns the
// applier and drains that channel, so the document handle never has to be shared across threads.

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;

use crate::component::{Context, PageStyles};
use crate::dom::{ApplyReport, DomError, StyleApplier, StyleTarget};
use crate::events::{ListenerId, SettingsChanged};
use crate::kit::hooks::ComponentStyleHook;
use crate::settings::SettingsSnapshot;
use crate::state::{SettingsStore, SubscriptionId};
use crate::style::ThemeMode;

#[derive(Debug)]
enum ApplyRequest {
    /// Store published a new state; applied only if it differs
    Snapshot(SettingsSnapshot),
    /// Broadcast on the settings bus; always applied
    Broadcast(SettingsChanged),
    /// Periodic staleness check at the given time
    SelfCheck(u64),
}

/// Cloneable handle for timers that drive the applier self-check
#[derive(Debug, Clone)]
pub struct SelfCheckHandle {
    tx: UnboundedSender<ApplyRequest>,
}

impl SelfCheckHandle {
    /// Ask the provider to re-apply if the document has gone stale by `now_ms`
    pub fn request(&self, now_ms: u64) -> bool {
        self.tx
            .unbounded_send(ApplyRequest::SelfCheck(now_ms))
            .is_ok()
    }
}

/// Owns the style applier and keeps it in sync with a settings store
pub struct ThemeProvider<T: StyleTarget> {
    store: SettingsStore,
    applier: StyleApplier<T>,
    mode: ThemeMode,
    page: PageStyles,
    tx: UnboundedSender<ApplyRequest>,
    rx: UnboundedReceiver<ApplyRequest>,
    subscription: Option<SubscriptionId>,
    listener: Option<ListenerId>,
}

impl<T: StyleTarget> ThemeProvider<T> {
    pub fn new(store: SettingsStore, target: T) -> Self {
        let applier = StyleApplier::new(target, store.config());
        let (tx, rx) = unbounded();
        Self {
            store,
            applier,
            mode: ThemeMode::Public,
            page: PageStyles::default(),
            tx,
            rx,
            subscription: None,
            listener: None,
        }
    }

    pub fn with_mode(mut self, mode: ThemeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Mode derived from the current route
    pub fn with_route(self, path: &str) -> Self {
        self.with_mode(ThemeMode::from_route(path))
    }

    pub fn with_page_styles(mut self, page: PageStyles) -> Self {
        self.page = page;
        self
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn applier(&self) -> &StyleApplier<T> {
        &self.applier
    }

    pub fn applier_mut(&mut self) -> &mut StyleApplier<T> {
        &mut self.applier
    }

    /// Render context for components beneath this provider
    pub fn context(&self) -> Context {
        Context::new()
            .with_mode(self.mode)
            .with_store(self.store.clone())
            .with_page_styles(self.page.clone())
    }

    pub fn hook(&self) -> ComponentStyleHook {
        ComponentStyleHook::new(self.store.clone())
    }

    pub fn self_check_handle(&self) -> SelfCheckHandle {
        SelfCheckHandle {
            tx: self.tx.clone(),
        }
    }

    pub fn is_installed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Apply the current snapshot and start following the store and the settings bus
    ///
    /// The first application happens immediately with whatever the store holds, defaults
    /// included, so the document is never unstyled.
    pub fn install(&mut self) -> Result<ApplyReport, DomError> {
        if !self.is_installed() {
            let tx = self.tx.clone();
            self.subscription = Some(self.store.subscribe(move |state| {
                let _ = tx.unbounded_send(ApplyRequest::Snapshot(state.settings.clone()));
            }));

            let tx = self.tx.clone();
            match self.store.bus().on(move |event| {
                let _ = tx.unbounded_send(ApplyRequest::Broadcast(event.clone()));
            }) {
                Ok(id) => self.listener = Some(id),
                Err(err) => log::error!("Failed to listen for settings broadcasts: {}", err),
            }
            log::info!("Theme provider installed in {:?} mode", self.mode);
        }

        let snapshot = self.store.snapshot();
        self.applier.apply(&snapshot)
    }

    /// Stop following the store and the bus
    pub fn uninstall(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.store.unsubscribe(id);
        }
        if let Some(id) = self.listener.take() {
            if let Err(err) = self.store.bus().off(id) {
                log::warn!("Failed to remove settings listener: {}", err);
            }
        }
    }

    fn handle(&mut self, request: ApplyRequest) {
        let result = match request {
            ApplyRequest::Snapshot(snapshot) => self.applier.apply(&snapshot).map(Some),
            ApplyRequest::Broadcast(event) => self.applier.on_settings_changed(&event).map(Some),
            ApplyRequest::SelfCheck(now_ms) => {
                let snapshot = self.store.snapshot();
                self.applier.self_check(now_ms, &snapshot)
            }
        };
        if let Err(err) = result {
            log::error!("Failed to apply theme styles: {}", err);
        }
    }

    /// Handle every queued request without waiting; returns how many were handled
    pub fn apply_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(request) = self.rx.try_recv() {
            self.handle(request);
            handled += 1;
        }
        handled
    }

    /// Handle requests as they arrive, forever
    pub async fn run(&mut self) {
        while let Some(request) = self.rx.next().await {
            self.handle(request);
        }
    }
}

impl<T: StyleTarget> Drop for ThemeProvider<T> {
    fn drop(&mut self) {
        self.uninstall();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::ThemeConfig;
    use crate::dom::MemoryDocument;
    use crate::events::SettingsBus;
    use crate::remote::InMemoryDataService;
    use crate::settings::PaletteId;

    fn provider() -> ThemeProvider<MemoryDocument> {
        let store = SettingsStore::with_bus(
            Arc::new(InMemoryDataService::new()),
            ThemeConfig::default(),
            SettingsBus::new(),
        );
        ThemeProvider::new(store, MemoryDocument::new())
    }

    #[test]
    fn test_install_applies_defaults() {
        let mut provider = provider();
        let report = provider.install().unwrap();
        assert!(matches!(report, ApplyReport::Applied { .. }));
        assert!(provider.is_installed());
        assert_eq!(
            provider.applier().target().property("--button-primary-bg"),
            Some("var(--color-text)")
        );
        assert_eq!(provider.store().bus().listener_count(), 1);

        provider.uninstall();
        assert!(!provider.is_installed());
        assert_eq!(provider.store().bus().listener_count(), 0);
    }

    #[test]
    fn test_broadcast_forces_reapply() {
        let mut provider = provider();
        provider.install().unwrap();
        provider.applier_mut().target_mut().clobber("--color-primary");

        let mut snapshot = SettingsSnapshot::default();
        snapshot.color.palette = PaletteId::Green;
        provider
            .store()
            .bus()
            .emit(&SettingsChanged::now(snapshot))
            .unwrap();
        assert_eq!(provider.apply_pending(), 1);

        let doc = provider.applier().target();
        assert_eq!(doc.property("--color-primary"), Some("#15803D"));
        assert!(doc.has_body_class("palette-green"));
    }

    #[test]
    fn test_self_check_handle() {
        let mut provider = provider();
        provider.install().unwrap();
        let reflows = provider.applier().target().reflows;
        let at = provider.applier().last_applied_at().unwrap();

        let handle = provider.self_check_handle();
        assert!(handle.request(at + 10));
        provider.apply_pending();
        assert_eq!(provider.applier().target().reflows, reflows);

        handle.request(at + 60_000);
        provider.apply_pending();
        assert_eq!(provider.applier().target().reflows, reflows + 1);
    }

    #[test]
    fn test_apply_pending_drains_queue() {
        let mut provider = provider();
        assert_eq!(provider.apply_pending(), 0);
        provider.install().unwrap();

        let handle = provider.self_check_handle();
        let bus = provider.store().bus().clone();
        bus.emit(&SettingsChanged::now(SettingsSnapshot::default()))
            .unwrap();
        handle.request(0);
        bus.emit(&SettingsChanged::now(SettingsSnapshot::default()))
            .unwrap();

        assert_eq!(provider.apply_pending(), 3);
        assert_eq!(provider.apply_pending(), 0);
    }

    #[test]
    fn test_route_mode_reaches_context() {
        let provider = provider().with_route("/admin/settings");
        assert_eq!(provider.context().mode(), ThemeMode::Admin);
    }
}
