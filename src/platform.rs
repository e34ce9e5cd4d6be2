// Platform adapters: install the refresh triggers and the applier self-check on a host

/// Trait for platform adapters
pub trait PlatformAdapter {
    /// Apply the current settings to the document and prepare the host
    fn init(&mut self) -> Result<(), crate::Error>;

    /// Start the refresh triggers and the style sync loop
    fn run(&mut self) -> Result<(), crate::Error>;

    /// Stop everything started by `run`
    fn shutdown(&mut self) -> Result<(), crate::Error>;
}

/// Native adapter running on a tokio runtime
#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
pub mod native {
    use tokio::runtime::Handle;
    use tokio::task::JoinHandle;

    use super::PlatformAdapter;
    use crate::clock::now_millis;
    use crate::component::Context;
    use crate::dom::StyleTarget;
    use crate::events::RefreshTrigger;
    use crate::kit::theme::ThemeProvider;

    /// Drives a [`ThemeProvider`] with tokio tasks
    ///
    /// Must be initialized from within a tokio runtime.
    pub struct NativeAdapter<T: StyleTarget + Send + 'static> {
        provider: Option<ThemeProvider<T>>,
        context: Option<Context>,
        runtime: Option<Handle>,
        tasks: Vec<JoinHandle<()>>,
    }

    impl<T: StyleTarget + Send + 'static> NativeAdapter<T> {
        pub fn new(provider: ThemeProvider<T>) -> Self {
            Self {
                provider: Some(provider),
                context: None,
                runtime: None,
                tasks: Vec::new(),
            }
        }

        /// Render context of the provider, available after `init`
        pub fn context(&self) -> Option<&Context> {
            self.context.as_ref()
        }

        pub fn is_running(&self) -> bool {
            !self.tasks.is_empty()
        }
    }

    impl<T: StyleTarget + Send + 'static> PlatformAdapter for NativeAdapter<T> {
        fn init(&mut self) -> Result<(), crate::Error> {
            let runtime = Handle::try_current()
                .map_err(|e| crate::Error::Platform(format!("No tokio runtime: {}", e)))?;
            let provider = self
                .provider
                .as_mut()
                .ok_or_else(|| crate::Error::Init("Adapter already started".to_string()))?;

            provider.install()?;
            self.context = Some(provider.context());
            self.runtime = Some(runtime);
            Ok(())
        }

        fn run(&mut self) -> Result<(), crate::Error> {
            let runtime = self
                .runtime
                .clone()
                .ok_or_else(|| crate::Error::Platform("Adapter not initialized".to_string()))?;
            let mut provider = self
                .provider
                .take()
                .ok_or_else(|| crate::Error::Platform("Adapter already running".to_string()))?;

            let store = provider.store().clone();
            let self_check = provider.self_check_handle();
            let check_every = store.config().self_check_interval();

            let looping = store.clone();
            self.tasks
                .push(runtime.spawn(async move { looping.run_refresh_loop().await }));
            let realtime = store.clone();
            self.tasks
                .push(runtime.spawn(async move { realtime.watch_realtime().await }));
            let auth = store.clone();
            self.tasks
                .push(runtime.spawn(async move { auth.watch_auth().await }));
            let polling = store.clone();
            self.tasks
                .push(runtime.spawn(async move { polling.poll().await }));
            self.tasks.push(runtime.spawn(async move {
                let mut interval = tokio::time::interval_at(
                    tokio::time::Instant::now() + check_every,
                    check_every,
                );
                loop {
                    interval.tick().await;
                    if !self_check.request(now_millis()) {
                        break;
                    }
                }
            }));
            self.tasks
                .push(runtime.spawn(async move { provider.run().await }));

            store.request_refresh(RefreshTrigger::Mount);
            log::info!("Settings refresh triggers installed");
            Ok(())
        }

        fn shutdown(&mut self) -> Result<(), crate::Error> {
            for task in self.tasks.drain(..) {
                task.abort();
            }
            Ok(())
        }
    }

    impl<T: StyleTarget + Send + 'static> Drop for NativeAdapter<T> {
        fn drop(&mut self) {
            let _ = self.shutdown();
        }
    }
}

/// WebAssembly platform adapter
#[cfg(feature = "web")]
pub mod web {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::spawn_local;
    use web_sys::VisibilityState;

    use super::PlatformAdapter;
    use crate::clock::now_millis;
    use crate::component::Context;
    use crate::dom::{DomError, WebDocument};
    use crate::events::RefreshTrigger;
    use crate::kit::theme::ThemeProvider;
    use crate::state::SettingsStore;
    use crate::style::ThemeMode;

    /// Browser adapter: timers, visibility events, and tasks on the page's event loop
    pub struct WebAdapter {
        store: SettingsStore,
        mode: ThemeMode,
        provider: Option<ThemeProvider<WebDocument>>,
        context: Option<Context>,
        intervals: Vec<i32>,
        timers: Vec<Closure<dyn FnMut()>>,
        visibility: Option<Closure<dyn FnMut()>>,
    }

    impl WebAdapter {
        pub fn new(store: SettingsStore) -> Self {
            Self {
                store,
                mode: ThemeMode::Public,
                provider: None,
                context: None,
                intervals: Vec::new(),
                timers: Vec::new(),
                visibility: None,
            }
        }

        /// Pick the theme mode from the current route
        pub fn with_route(mut self, path: &str) -> Self {
            self.mode = ThemeMode::from_route(path);
            self
        }

        pub fn context(&self) -> Option<&Context> {
            self.context.as_ref()
        }

        fn every(
            &mut self,
            period_ms: u64,
            tick: impl FnMut() + 'static,
        ) -> Result<(), crate::Error> {
            let window = web_sys::window().ok_or(DomError::Unavailable("window"))?;
            let closure = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
            let id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    closure.as_ref().unchecked_ref(),
                    i32::try_from(period_ms).unwrap_or(i32::MAX),
                )
                .map_err(|e| crate::Error::Platform(format!("setInterval failed: {:?}", e)))?;
            self.intervals.push(id);
            self.timers.push(closure);
            Ok(())
        }
    }

    impl PlatformAdapter for WebAdapter {
        fn init(&mut self) -> Result<(), crate::Error> {
            let document = WebDocument::from_window().map_err(|e| {
                log::error!("Cannot reach the page document: {}", e);
                e
            })?;
            let mut provider =
                ThemeProvider::new(self.store.clone(), document).with_mode(self.mode);
            provider.install()?;
            self.context = Some(provider.context());
            self.provider = Some(provider);
            Ok(())
        }

        fn run(&mut self) -> Result<(), crate::Error> {
            let mut provider = self
                .provider
                .take()
                .ok_or_else(|| crate::Error::Platform("Adapter not initialized".to_string()))?;
            let self_check = provider.self_check_handle();
            spawn_local(async move { provider.run().await });

            let store = self.store.clone();
            spawn_local(async move { store.run_refresh_loop().await });
            let store = self.store.clone();
            spawn_local(async move { store.watch_realtime().await });
            let store = self.store.clone();
            spawn_local(async move { store.watch_auth().await });

            let store = self.store.clone();
            let poll_ms = store.config().poll_interval_ms;
            self.every(poll_ms, move || store.request_refresh(RefreshTrigger::Poll))?;
            let check_ms = self.store.config().self_check_interval_ms;
            self.every(check_ms, move || {
                self_check.request(now_millis());
            })?;

            let window = web_sys::window().ok_or(DomError::Unavailable("window"))?;
            let document = window.document().ok_or(DomError::Unavailable("document"))?;
            let store = self.store.clone();
            let watched = document.clone();
            let on_visibility = Closure::wrap(Box::new(move || {
                store.notify_visibility(watched.visibility_state() == VisibilityState::Visible);
            }) as Box<dyn FnMut()>);
            document
                .add_event_listener_with_callback(
                    "visibilitychange",
                    on_visibility.as_ref().unchecked_ref(),
                )
                .map_err(|e| crate::Error::Platform(format!("addEventListener failed: {:?}", e)))?;
            self.visibility = Some(on_visibility);

            self.store.request_refresh(RefreshTrigger::Mount);
            log::info!("Settings refresh triggers installed");
            Ok(())
        }

        fn shutdown(&mut self) -> Result<(), crate::Error> {
            if let Some(window) = web_sys::window() {
                for id in self.intervals.drain(..) {
                    window.clear_interval_with_handle(id);
                }
                let listener = self.visibility.take();
                if let (Some(document), Some(listener)) = (window.document(), listener) {
                    let _ = document.remove_event_listener_with_callback(
                        "visibilitychange",
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }
            self.timers.clear();
            Ok(())
        }
    }
}
