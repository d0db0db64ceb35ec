//! # Provider Seams
//!
//! Traits for the injected wallet provider. The browser crate implements them over
//! `window.ethereum`; tests use in-memory doubles.
//!
//! All methods run on the single UI thread, so the traits are `?Send`.

use std::fmt;
use std::rc::Rc;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use shared::dto::wallet::ChainId;

use crate::error::Result;

/// Provider-pushed events the session listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderEventKind {
    AccountsChanged,
    ChainChanged,
}

impl ProviderEventKind {
    /// EIP-1193 event name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderEventKind::AccountsChanged => "accountsChanged",
            ProviderEventKind::ChainChanged => "chainChanged",
        }
    }
}

impl fmt::Display for ProviderEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decoded provider event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<Address>),
    ChainChanged(ChainId),
}

impl ProviderEvent {
    pub fn kind(&self) -> ProviderEventKind {
        match self {
            ProviderEvent::AccountsChanged(_) => ProviderEventKind::AccountsChanged,
            ProviderEvent::ChainChanged(_) => ProviderEventKind::ChainChanged,
        }
    }
}

/// Handle returned by [`ChainClient::subscribe`], used to remove that one listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Callback invoked with every event of the subscribed kind.
pub type EventHandler = Rc<dyn Fn(ProviderEvent)>;

/// Read/write surface of an injected wallet provider.
///
/// Every async method is a provider round trip and may fail. Chain ids are converted to
/// [`ChainId`] here, at the boundary, whatever format the provider reports.
#[async_trait(?Send)]
pub trait ChainClient {
    /// Ask the user to grant account access (`wallet_requestPermissions`).
    ///
    /// Returns [`WalletError::PermissionRejected`](crate::WalletError::PermissionRejected)
    /// when the user declines.
    async fn request_permission(&self) -> Result<()>;

    /// Accounts the site is authorized for (`eth_accounts`). Never prompts.
    async fn get_accounts(&self) -> Result<Vec<Address>>;

    /// Native balance in base units (`eth_getBalance`).
    async fn get_native_balance(&self, owner: Address) -> Result<U256>;

    /// ERC-20 `balanceOf(owner)` on `contract`, in the token's base units.
    async fn get_token_balance(&self, contract: Address, owner: Address) -> Result<U256>;

    /// Currently selected chain (`eth_chainId`).
    async fn get_chain_id(&self) -> Result<ChainId>;

    /// Register `handler` for events of `kind`.
    fn subscribe(&self, kind: ProviderEventKind, handler: EventHandler) -> Result<ListenerId>;

    /// Remove one listener previously returned by [`subscribe`](Self::subscribe).
    fn unsubscribe(&self, kind: ProviderEventKind, listener: ListenerId);

    /// Remove every listener this client registered.
    fn unsubscribe_all(&self);
}

/// Silent probe for an injected provider.
#[async_trait(?Send)]
pub trait ProviderDetector {
    /// Whether a provider is present. May wait for a late injection but never prompts the
    /// user, and absence is a normal `false`, not an error.
    async fn detect(&self) -> bool;

    /// Bind a [`ChainClient`] to the detected provider.
    fn bind(&self) -> Result<Rc<dyn ChainClient>>;
}
