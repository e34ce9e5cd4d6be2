// Refresh trigger sources feeding the settings store's refresh loop

use futures::StreamExt;

use super::SettingsStore;
use crate::events::RefreshTrigger;
use crate::remote::ChangeKind;

impl SettingsStore {
    /// Request a refresh for every insert or update on the settings table
    ///
    /// Resolves when the backend closes the change feed.
    pub async fn watch_realtime(&self) {
        let table = self.config().settings_table.clone();
        let mut feed = self.remote().subscribe_changes(&table);
        log::info!("watching realtime changes on '{table}'");

        while let Some(change) = feed.next().await {
            if change.table != table {
                continue;
            }
            match change.kind {
                ChangeKind::Insert | ChangeKind::Update => {
                    self.request_refresh(RefreshTrigger::Realtime)
                }
                ChangeKind::Delete => {}
            }
        }
        log::debug!("realtime feed for '{table}' closed");
    }

    /// Request a refresh on every identity transition
    pub async fn watch_auth(&self) {
        let mut feed = self.remote().subscribe_auth();
        while let Some(event) = feed.next().await {
            log::debug!("auth state changed: {event:?}");
            self.request_refresh(RefreshTrigger::Auth);
        }
    }

    /// Request a refresh every `poll_interval`, starting one interval from now
    #[cfg(all(feature = "native", not(target_arch = "wasm32")))]
    pub async fn poll(&self) {
        let period = self.config().poll_interval();
        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.request_refresh(RefreshTrigger::Poll);
        }
    }
}
