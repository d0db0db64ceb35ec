//! # Data Transfer Objects (DTOs)
//!
//! Data structures published by the wallet session and rendered by the view.
//!
//! ## Module Organization
//!
//! - [`wallet`] - Wallet snapshot, token balances, token configuration and chain id
//!
//! ## Serialization Format
//!
//! - **Field naming**: snake_case (default serde behavior)
//! - **Chain id**: a JSON number (`56`), never the provider's hex string (`"0x38"`)
//! - **All types**: Implement both `Serialize` and `Deserialize`
//!
//! ## Example JSON
//!
//! ```text
//! {
//!   "address": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
//!   "native_balance": "1.2500",
//!   "token_balances": [{ "symbol": "USDT", "amount": "10.0000" }],
//!   "chain_id": 56
//! }
//! ```

pub mod wallet;

pub use wallet::*;
