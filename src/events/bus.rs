//! Process-wide settings broadcast

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

use crate::settings::SettingsSnapshot;

/// Broadcast sent whenever a new settings snapshot is known
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsChanged {
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    pub settings: SettingsSnapshot,
}

impl SettingsChanged {
    pub fn now(settings: SettingsSnapshot) -> Self {
        Self {
            timestamp: crate::clock::now_millis(),
            settings,
        }
    }
}

/// Handle returned by [`SettingsBus::on`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Type for listener callbacks
type Listener = Arc<dyn Fn(&SettingsChanged) + Send + Sync>;

/// Broadcast channel for [`SettingsChanged`]
///
/// Lets consumers that hold no reference to the settings store (the DOM applier, admin previews)
/// react to new settings.
#[derive(Clone)]
pub struct SettingsBus {
    listeners: Arc<Mutex<Vec<(ListenerId, Listener)>>>,
    next_id: Arc<AtomicU64>,
}

impl std::fmt::Debug for SettingsBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl SettingsBus {
    /// Create an isolated bus
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// The bus shared by the whole process
    pub fn global() -> &'static SettingsBus {
        static GLOBAL: OnceLock<SettingsBus> = OnceLock::new();
        GLOBAL.get_or_init(SettingsBus::new)
    }

    /// Register a listener
    pub fn on(
        &self,
        listener: impl Fn(&SettingsChanged) + Send + Sync + 'static,
    ) -> Result<ListenerId, String> {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let mut listeners = self
            .listeners
            .lock()
            .map_err(|e| format!("Failed to lock settings listeners: {}", e))?;
        listeners.push((id, Arc::new(listener)));
        Ok(id)
    }

    /// Remove a listener; unknown ids are ignored
    pub fn off(&self, id: ListenerId) -> Result<(), String> {
        let mut listeners = self
            .listeners
            .lock()
            .map_err(|e| format!("Failed to lock settings listeners: {}", e))?;
        listeners.retain(|(existing, _)| *existing != id);
        Ok(())
    }

    /// Deliver an event to every listener, returning how many were called
    ///
    /// Listeners run outside the lock so they may emit or subscribe themselves.
    pub fn emit(&self, event: &SettingsChanged) -> Result<usize, String> {
        let listeners: Vec<Listener> = self
            .listeners
            .lock()
            .map_err(|e| format!("Failed to lock settings listeners: {}", e))?
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in &listeners {
            listener(event);
        }
        Ok(listeners.len())
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().map(|l| l.len()).unwrap_or(0)
    }
}

impl Default for SettingsBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_emit_reaches_listeners() {
        let bus = SettingsBus::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let seen_clone = seen.clone();

        bus.on(move |event| {
            assert_eq!(event.timestamp, 42);
            seen_clone.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        let event = SettingsChanged {
            timestamp: 42,
            settings: SettingsSnapshot::default(),
        };
        assert_eq!(bus.emit(&event).unwrap(), 1);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_off_removes_listener() {
        let bus = SettingsBus::new();
        let id = bus.on(|_| {}).unwrap();
        bus.on(|_| {}).unwrap();
        bus.off(id).unwrap();
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn test_listener_may_subscribe_during_emit() {
        let bus = SettingsBus::new();
        let inner = bus.clone();
        bus.on(move |_| {
            inner.on(|_| {}).unwrap();
        })
        .unwrap();

        bus.emit(&SettingsChanged::now(SettingsSnapshot::default()))
            .unwrap();
        assert_eq!(bus.listener_count(), 2);
    }
}
