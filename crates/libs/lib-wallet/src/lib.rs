//! # Wallet Session Library
//!
//! Core of the wallet widget: the session state machine that connects to an injected
//! wallet provider, hydrates account data and keeps it current as the provider pushes
//! account and chain changes.
//!
//! Everything that touches the browser is behind a trait so the state machine runs (and is
//! tested) natively:
//!
//! - [`client::ChainClient`] - provider RPC surface and event subscription
//! - [`client::ProviderDetector`] - silent probe for an injected provider
//! - [`platform::ConnectionStore`] - the persisted "was connected" flag
//! - [`platform::PageReloader`] - forced clean reload on disconnect
//! - [`platform::TaskSpawner`] - where event-driven hydrations run
//!
//! ## Modules
//!
//! - **[`session`]**: [`WalletSession`] and the published [`SessionState`]
//! - **[`registry`]**: one-time provider event subscriptions with symmetric teardown
//! - **[`abi`]**: ERC-20 `balanceOf` through `sol!` bindings, account parsing
//! - **[`config`]**: [`WalletConfig`]
//! - **[`error`]**: [`WalletError`] and [`Result`]

pub mod abi;
pub mod client;
pub mod config;
pub mod error;
pub mod platform;
pub mod registry;
pub mod session;

#[cfg(test)]
pub(crate) mod mock;

// Re-export commonly used types
pub use client::{ChainClient, EventHandler, ListenerId, ProviderDetector, ProviderEvent, ProviderEventKind};
pub use config::WalletConfig;
pub use error::{Result, WalletError};
pub use platform::{ConnectionStore, MemoryStore, PageReloader, TaskSpawner};
pub use session::{Connection, Hydration, SessionDeps, SessionState, WalletSession};
