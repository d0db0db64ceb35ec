//! # Shared Wallet Types Library
//!
//! This library defines the data passed between the wallet session core (`lib-wallet`)
//! and the browser view (`wallet-web`). Every type here is a plain value: it is built by the
//! core, replaced wholesale on every update and only ever read by the view.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects
//!   - **[`dto::wallet`]**: Wallet snapshot, token configuration and chain id types
//! - **[`utils`]**: Display helpers
//!   - **[`utils::format_address`]**: Shorten addresses for display
//!   - **[`utils::format_units`]**: Render base-unit amounts as fixed-precision decimals
//!
//! ## Wire Format
//!
//! All DTOs serialize to JSON using `serde`:
//! - Field names use **snake_case**
//! - [`ChainId`] serializes as a plain JSON number
//! - Addresses serialize as `0x`-prefixed hex strings
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::wallet::{TokenConfig, WalletSnapshot};
//! use shared::utils::truncate_address;
//!
//! let tokens = vec![TokenConfig::new(
//!     "0xdAC17F958D2ee523a2206206994597C13D831ec7".parse().unwrap(),
//!     "USDT",
//!     6,
//! )];
//! let snapshot = WalletSnapshot::empty(&tokens, 4);
//! assert_eq!(snapshot.token_balances.len(), 1);
//! assert_eq!(truncate_address("0xdAC17F958D2ee523a2206206994597C13D831ec7"), "0xdAC1...1ec7");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
