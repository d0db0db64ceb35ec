//! Browser implementations of the session's platform seams.

use futures::future::LocalBoxFuture;
use lib_wallet::{ConnectionStore, PageReloader, Result, TaskSpawner, WalletError};
use wasm_bindgen::JsValue;

/// Persists the connection flag in `localStorage` as a JSON boolean.
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| WalletError::Storage("no window available".to_string()))?
            .local_storage()
            .map_err(storage_error)?
            .ok_or_else(|| WalletError::Storage("localStorage is disabled".to_string()))
    }
}

impl ConnectionStore for LocalStorageStore {
    fn load(&self) -> bool {
        let raw = Self::storage().and_then(|storage| storage.get_item(&self.key).map_err(storage_error));
        match raw {
            Ok(Some(value)) => parse_flag(&value),
            Ok(None) => false,
            Err(err) => {
                log::warn!("could not read connection flag: {}", err);
                false
            }
        }
    }

    fn save(&self, connected: bool) -> Result<()> {
        let value = serde_json::to_string(&connected)?;
        Self::storage()?
            .set_item(&self.key, &value)
            .map_err(storage_error)
    }
}

/// Anything but a stored JSON `true` reads as disconnected.
pub fn parse_flag(raw: &str) -> bool {
    serde_json::from_str::<bool>(raw).unwrap_or(false)
}

fn storage_error(err: JsValue) -> WalletError {
    WalletError::Storage(format!("{:?}", err))
}

/// Reloads the page through `window.location`.
pub struct LocationReloader;

impl PageReloader for LocationReloader {
    fn force_reload(&self) {
        let Some(window) = web_sys::window() else {
            log::error!("cannot reload: no window available");
            return;
        };
        if let Err(err) = window.location().reload() {
            log::error!("page reload failed: {:?}", err);
        }
    }
}

/// Runs session tasks on the Leptos executor.
pub struct LeptosSpawner;

impl TaskSpawner for LeptosSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }
}
