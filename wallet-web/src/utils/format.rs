//! # Formatting Utilities for Wallet Web
//!
//! Display helpers for values the session publishes.
//! For address formatting, use [`shared::utils::format_address`] or [`shared::utils::truncate_address`].
//!
//! ## Functions
//!
//! - [`format_chain_id`] - Decimal chain id, or a placeholder when unknown
//! - [`format_balance`] - Balance string, or a placeholder when unavailable
//! - [`chain_name`] - Human name for well-known chains

use shared::dto::wallet::ChainId;

/// Placeholder for values the wallet could not report.
pub const UNAVAILABLE: &str = "-";

/// Format a chain id for display (always decimal).
///
/// # Examples
///
/// ```rust
/// use shared::dto::wallet::ChainId;
/// use wallet_web::utils::format::format_chain_id;
///
/// assert_eq!(format_chain_id(Some(ChainId(56))), "56");
/// assert_eq!(format_chain_id(None), "-");
/// ```
pub fn format_chain_id(chain_id: Option<ChainId>) -> String {
    chain_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| UNAVAILABLE.to_string())
}

/// Format a balance string, substituting the placeholder for an empty one.
pub fn format_balance(balance: &str) -> String {
    if balance.is_empty() {
        UNAVAILABLE.to_string()
    } else {
        balance.to_string()
    }
}

/// Name of a well-known chain.
pub fn chain_name(chain_id: ChainId) -> Option<&'static str> {
    match chain_id.0 {
        1 => Some("Ethereum"),
        10 => Some("Optimism"),
        56 => Some("BNB Smart Chain"),
        137 => Some("Polygon"),
        8453 => Some("Base"),
        42161 => Some("Arbitrum One"),
        11155111 => Some("Sepolia"),
        _ => None,
    }
}
