//! Wallet state management
//!
//! The [`WalletSession`] owns the state; this context mirrors each published
//! [`SessionState`] into a signal the views read from.

use std::rc::Rc;

use leptos::prelude::*;
use lib_wallet::{SessionDeps, SessionState, WalletConfig, WalletSession};
use shared::dto::wallet::WalletSnapshot;

use crate::services::{InjectedProviderDetector, LeptosSpawner, LocalStorageStore, LocationReloader};
use crate::utils::constants::WALLET_CONFIG_JSON;

/// Global wallet context
#[derive(Clone, Copy)]
pub struct WalletContext {
    pub state: RwSignal<SessionState>,
    /// False until provider detection has finished.
    pub ready: RwSignal<bool>,
    session: StoredValue<Option<WalletSession>, LocalStorage>,
}

impl WalletContext {
    pub fn new(config: &WalletConfig) -> Self {
        let initial = SessionState {
            connection: Default::default(),
            snapshot: WalletSnapshot::empty(&config.tokens, config.display_precision),
            last_error: None,
            provider_available: false,
            persisted_connected: false,
        };

        Self {
            state: RwSignal::new(initial),
            ready: RwSignal::new(false),
            session: StoredValue::new_local(None),
        }
    }

    /// Detect the provider, build the session and restore a previous connection.
    pub fn mount(&self, config: WalletConfig) {
        let ctx = *self;
        leptos::task::spawn_local(async move {
            let detector = InjectedProviderDetector::new(config.detect_timeout_ms);
            let deps = SessionDeps {
                store: Rc::new(LocalStorageStore::new(config.storage_key.clone())),
                reloader: Rc::new(LocationReloader),
                spawner: Rc::new(LeptosSpawner),
            };

            let session = WalletSession::attach(config, &detector, deps).await;
            if ctx.session.try_set_value(Some(session.clone())).is_some() {
                log::debug!("wallet widget unmounted during provider detection");
                return;
            }

            let state = ctx.state;
            session.subscribe_state(move |published| {
                let _ = state.try_set(published.clone());
            });
            let _ = ctx.state.try_set(session.state());
            let _ = ctx.ready.try_set(true);

            session.initialize().await;
        });
    }

    fn session(&self) -> Option<WalletSession> {
        self.session.try_get_value().flatten()
    }

    pub fn connect(&self) {
        if let Some(session) = self.session() {
            leptos::task::spawn_local(async move { session.connect().await });
        }
    }

    pub fn disconnect(&self) {
        if let Some(session) = self.session() {
            session.disconnect();
        }
    }

    pub fn clear_error(&self) {
        if let Some(session) = self.session() {
            session.clear_error();
        }
    }

    pub fn teardown(&self) {
        if let Some(session) = self.session() {
            session.teardown();
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state.with(|state| state.is_connected())
    }
}

/// Load the embedded configuration, falling back to defaults if it is invalid.
pub fn load_config() -> WalletConfig {
    match WalletConfig::from_json(WALLET_CONFIG_JSON) {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}; using the default configuration", err);
            WalletConfig::default()
        }
    }
}

pub fn provide_wallet_context() -> WalletContext {
    let config = load_config();
    let context = WalletContext::new(&config);
    provide_context(context);
    context.mount(config);
    on_cleanup(move || context.teardown());
    context
}

pub fn use_wallet_context() -> WalletContext {
    expect_context::<WalletContext>()
}
