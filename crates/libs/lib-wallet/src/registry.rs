//! # Subscription Registry
//!
//! Owns the session's provider listeners. Each event kind is subscribed at most once;
//! [`SubscriptionRegistry::release`] (or dropping the registry) removes exactly the
//! listeners that were added.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::client::{ChainClient, EventHandler, ListenerId, ProviderEventKind};
use crate::error::Result;

pub struct SubscriptionRegistry {
    client: Rc<dyn ChainClient>,
    active: RefCell<Vec<(ProviderEventKind, ListenerId)>>,
}

impl SubscriptionRegistry {
    pub fn new(client: Rc<dyn ChainClient>) -> Self {
        Self {
            client,
            active: RefCell::new(Vec::new()),
        }
    }

    pub fn is_subscribed(&self, kind: ProviderEventKind) -> bool {
        self.active.borrow().iter().any(|(active, _)| *active == kind)
    }

    pub fn len(&self) -> usize {
        self.active.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.borrow().is_empty()
    }

    /// Subscribe `handler` to `kind` unless a listener for `kind` is already active.
    ///
    /// Returns `true` if a new listener was registered.
    pub fn ensure(&self, kind: ProviderEventKind, handler: EventHandler) -> Result<bool> {
        if self.is_subscribed(kind) {
            debug!(event = %kind, "listener already registered");
            return Ok(false);
        }

        let listener = self.client.subscribe(kind, handler)?;
        self.active.borrow_mut().push((kind, listener));
        debug!(event = %kind, listener = listener.0, "listener registered");
        Ok(true)
    }

    /// Remove every listener this registry added.
    pub fn release(&self) {
        let active = std::mem::take(&mut *self.active.borrow_mut());
        for (kind, listener) in active {
            self.client.unsubscribe(kind, listener);
            debug!(event = %kind, listener = listener.0, "listener removed");
        }
    }
}

impl Drop for SubscriptionRegistry {
    fn drop(&mut self) {
        if !self.is_empty() {
            warn!(listeners = self.len(), "registry dropped with active listeners, removing them");
            self.release();
        }
    }
}
