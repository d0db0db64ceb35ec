//! # Platform Seams
//!
//! Small collaborators the session needs from its host page: the persisted connection
//! flag, a forced reload, and a place to run event-driven work.

use std::cell::Cell;

use futures::future::LocalBoxFuture;

use crate::error::Result;

/// Persisted "was connected" flag, surviving page reloads.
pub trait ConnectionStore {
    /// Read the flag. A missing or unreadable value is `false`.
    fn load(&self) -> bool;

    /// Write the flag.
    fn save(&self, connected: bool) -> Result<()>;
}

/// In-memory [`ConnectionStore`], used when no persistent storage is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    connected: Cell<bool>,
}

impl MemoryStore {
    pub fn new(connected: bool) -> Self {
        Self {
            connected: Cell::new(connected),
        }
    }
}

impl ConnectionStore for MemoryStore {
    fn load(&self) -> bool {
        self.connected.get()
    }

    fn save(&self, connected: bool) -> Result<()> {
        self.connected.set(connected);
        Ok(())
    }
}

/// Forces the page to start over from a clean, unauthorized state.
///
/// Wallet providers have no logout call; reloading is the only way to drop the
/// provider's authorization context from the page.
pub trait PageReloader {
    fn force_reload(&self);
}

/// Runs event-driven session work on the UI thread.
pub trait TaskSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>);
}
