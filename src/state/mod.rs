//! Settings store
//!
//! [`SettingsStore`] owns the process-wide theme settings snapshot. It refreshes the snapshot
//! from the [`RemoteDataService`] and notifies subscribers and the [`SettingsBus`] when a new
//! snapshot is published.
//!
//! All refresh sources (mount, realtime feed, fallback poll, visibility, auth) feed one channel of
//! [`RefreshTrigger`]s consumed by [`SettingsStore::run_refresh_loop`]. Every fetch, whether from
//! the loop or from [`SettingsStore::refetch`], goes through the same in-flight guard: a fetch
//! requested while another is outstanding is dropped, not queued.

mod triggers;


use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use futures::channel::mpsc::{unbounded, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use serde_json::Value;

use crate::config::ThemeConfig;
use crate::events::{RefreshTrigger, SettingsBus, SettingsChanged};
use crate::remote::{Filter, RemoteDataService, RemoteError};
use crate::settings::{SettingsKind, SettingsSnapshot};

/// Observable state of the settings store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState {
    /// Current settings; complete defaults until the first successful fetch
    pub settings: SettingsSnapshot,
    /// No fetch has settled yet
    pub is_loading: bool,
    /// The most recent fetch failed
    pub is_error: bool,
    pub last_error: Option<RemoteError>,
    /// Milliseconds since the Unix epoch of the last published snapshot
    pub last_updated: Option<u64>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            settings: SettingsSnapshot::default(),
            is_loading: true,
            is_error: false,
            last_error: None,
            last_updated: None,
        }
    }
}

/// Result of one call to [`SettingsStore::fetch_settings`]
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// A new snapshot was published
    Updated,
    /// Another fetch was already in flight
    Skipped,
    /// The fetch failed; the previous snapshot is still served
    Failed(RemoteError),
}

/// Handle returned by [`SettingsStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Arc<dyn Fn(&StoreState) + Send + Sync>;

struct StoreInner {
    remote: Arc<dyn RemoteDataService>,
    config: ThemeConfig,
    bus: SettingsBus,
    state: RwLock<StoreState>,
    in_flight: AtomicBool,
    round_trips: AtomicUsize,
    subscribers: Mutex<Vec<(SubscriptionId, Subscriber)>>,
    next_subscription: AtomicU64,
    refresh_tx: UnboundedSender<RefreshTrigger>,
    refresh_rx: Mutex<Option<UnboundedReceiver<RefreshTrigger>>>,
}

/// Process-wide theme settings snapshot
#[derive(Clone)]
pub struct SettingsStore {
    inner: Arc<StoreInner>,
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("state", &self.state())
            .field("in_flight", &self.is_fetching())
            .finish()
    }
}

/// Clears the in-flight flag when a fetch ends, including on cancellation
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl SettingsStore {
    /// Create a store publishing on the global [`SettingsBus`]
    pub fn new(remote: Arc<dyn RemoteDataService>, config: ThemeConfig) -> Self {
        Self::with_bus(remote, config, SettingsBus::global().clone())
    }

    /// Create a store publishing on `bus`
    pub fn with_bus(
        remote: Arc<dyn RemoteDataService>,
        config: ThemeConfig,
        bus: SettingsBus,
    ) -> Self {
        let (refresh_tx, refresh_rx) = unbounded();
        Self {
            inner: Arc::new(StoreInner {
                remote,
                config,
                bus,
                state: RwLock::new(StoreState::default()),
                in_flight: AtomicBool::new(false),
                round_trips: AtomicUsize::new(0),
                subscribers: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(1),
                refresh_tx,
                refresh_rx: Mutex::new(Some(refresh_rx)),
            }),
        }
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.inner.config
    }

    pub fn bus(&self) -> &SettingsBus {
        &self.inner.bus
    }

    pub(crate) fn remote(&self) -> &Arc<dyn RemoteDataService> {
        &self.inner.remote
    }

    /// Copy of the current state
    pub fn state(&self) -> StoreState {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Copy of the current settings snapshot
    pub fn snapshot(&self) -> SettingsSnapshot {
        self.inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .settings
            .clone()
    }

    pub fn is_fetching(&self) -> bool {
        self.inner.in_flight.load(Ordering::SeqCst)
    }

    /// Number of fetches that reached the remote service
    pub fn round_trips(&self) -> usize {
        self.inner.round_trips.load(Ordering::SeqCst)
    }

    /// Register a callback run after every state change
    pub fn subscribe(
        &self,
        subscriber: impl Fn(&StoreState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::SeqCst));
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(subscriber)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(existing, _)| *existing != id);
    }

    /// Fetch all three settings kinds and publish the combined snapshot
    ///
    /// Returns [`FetchOutcome::Skipped`] without touching the network if a fetch is already in
    /// flight. A missing row for a kind yields that kind's defaults. Any other read failure keeps
    /// the previous snapshot and sets the error flag.
    pub async fn fetch_settings(&self) -> FetchOutcome {
        if self
            .inner
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            log::debug!("settings fetch already in flight, skipping");
            return FetchOutcome::Skipped;
        }
        let _guard = InFlightGuard(&self.inner.in_flight);
        self.inner.round_trips.fetch_add(1, Ordering::SeqCst);

        match self.read_with_timeout().await {
            Ok(snapshot) => {
                self.publish(snapshot);
                FetchOutcome::Updated
            }
            Err(error) => {
                log::warn!("failed to fetch theme settings: {error}");
                self.record_failure(error.clone());
                FetchOutcome::Failed(error)
            }
        }
    }

    /// Force a fetch through the same guarded path, e.g. from a retry button
    pub async fn refetch(&self) -> FetchOutcome {
        self.fetch_settings().await
    }

    /// Ask the refresh loop for a fetch
    pub fn request_refresh(&self, trigger: RefreshTrigger) {
        if self.inner.refresh_tx.unbounded_send(trigger).is_err() {
            log::debug!("refresh loop stopped, ignoring {trigger:?} trigger");
        }
    }

    /// Report a document visibility change; a refresh is requested when it becomes visible
    pub fn notify_visibility(&self, visible: bool) {
        if visible {
            self.request_refresh(RefreshTrigger::Visibility);
        }
    }

    /// Consume refresh triggers until every sender is gone
    ///
    /// Triggers that arrive while a fetch runs are dropped once it settles. Only one loop may run
    /// per store; a second call returns immediately.
    pub async fn run_refresh_loop(&self) {
        let receiver = self
            .inner
            .refresh_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(mut receiver) = receiver else {
            log::warn!("settings refresh loop is already running");
            return;
        };

        while let Some(trigger) = receiver.next().await {
            log::debug!("settings refresh requested by {trigger:?}");
            if let FetchOutcome::Skipped = self.fetch_settings().await {
                log::debug!("dropped {trigger:?} refresh, fetch in flight");
            }

            while let Ok(dropped) = receiver.try_recv() {
                log::debug!("dropped {dropped:?} refresh that arrived during fetch");
            }
        }
    }

    /// Read all three kinds from the backend without publishing or touching the fetch guard
    pub(crate) async fn read_stored(&self) -> Result<SettingsSnapshot, RemoteError> {
        self.read_with_timeout().await
    }

    #[cfg(all(feature = "native", not(target_arch = "wasm32")))]
    async fn read_with_timeout(&self) -> Result<SettingsSnapshot, RemoteError> {
        match self.inner.config.fetch_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.read_all())
                .await
                .map_err(|_| RemoteError::Timeout(limit.as_millis() as u64))?,
            None => self.read_all().await,
        }
    }

    #[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
    async fn read_with_timeout(&self) -> Result<SettingsSnapshot, RemoteError> {
        self.read_all().await
    }

    async fn read_all(&self) -> Result<SettingsSnapshot, RemoteError> {
        let (button, font, color) = futures::join!(
            self.read_kind(SettingsKind::ButtonSettings),
            self.read_kind(SettingsKind::FontSettings),
            self.read_kind(SettingsKind::ColorPalette),
        );

        let mut snapshot = SettingsSnapshot::default();
        for (kind, payload) in [
            (SettingsKind::ButtonSettings, button?),
            (SettingsKind::FontSettings, font?),
            (SettingsKind::ColorPalette, color?),
        ] {
            match payload {
                Some(value) => snapshot.set_from_value(kind, &value),
                None => log::debug!("no stored {kind}, using defaults"),
            }
        }
        Ok(snapshot)
    }

    async fn read_kind(&self, kind: SettingsKind) -> Result<Option<Value>, RemoteError> {
        let config = &self.inner.config;
        let filter = Filter::eq(config.key_column.as_str(), kind.key());
        let row = self
            .inner
            .remote
            .get_one(&config.settings_table, &filter)
            .await?;

        Ok(row
            .and_then(|mut row| row.remove(&config.value_column))
            .map(|value| match value {
                // Text columns hold the payload as a JSON string.
                Value::String(raw) => serde_json::from_str(&raw).unwrap_or(Value::String(raw)),
                other => other,
            }))
    }

    fn publish(&self, snapshot: SettingsSnapshot) {
        let event = SettingsChanged::now(snapshot);
        let state = {
            let mut state = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            state.settings = event.settings.clone();
            state.is_loading = false;
            state.is_error = false;
            state.last_error = None;
            state.last_updated = Some(event.timestamp);
            state.clone()
        };

        log::info!(
            "published theme settings (palette {})",
            state.settings.color.palette.as_str()
        );
        self.notify(&state);

        if let Err(e) = self.inner.bus.emit(&event) {
            log::warn!("failed to broadcast settings change: {e}");
        }
    }

    fn record_failure(&self, error: RemoteError) {
        let state = {
            let mut state = self
                .inner
                .state
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            state.is_loading = false;
            state.is_error = true;
            state.last_error = Some(error);
            state.clone()
        };
        self.notify(&state);
    }

    fn notify(&self, state: &StoreState) {
        let subscribers: Vec<Subscriber> = self
            .inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, subscriber)| Arc::clone(subscriber))
            .collect();

        for subscriber in subscribers {
            subscriber(state);
        }
    }
}
