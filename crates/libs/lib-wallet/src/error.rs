//! # Wallet Errors
//!
//! This module defines [`WalletError`], the single error type returned by every
//! [`ChainClient`](crate::client::ChainClient) call and every fallible session operation.
//!
//! ## Error Categories
//!
//! 1. **Connection errors** - end a connect attempt, the session stays Disconnected
//!    - [`ProviderAbsent`](WalletError::ProviderAbsent)
//!    - [`PermissionRejected`](WalletError::PermissionRejected)
//!    - [`NoAccounts`](WalletError::NoAccounts)
//!
//! 2. **Data errors** - degrade a single field of the snapshot, the connection is kept
//!    - [`Rpc`](WalletError::Rpc)
//!    - [`Decoding`](WalletError::Decoding)
//!    - [`PartialHydration`](WalletError::PartialHydration)
//!
//! 3. **Environment errors**
//!    - [`Storage`](WalletError::Storage)
//!    - [`Config`](WalletError::Config)
//!
//! None of these reach the view as a fault. The session converts them into state plus a
//! banner message obtained from [`WalletError::user_message`].

use shared::dto::wallet::ParseChainIdError;
use thiserror::Error;

/// Banner shown when no injected provider exists.
pub const NO_PROVIDER_MSG: &str =
    "To be able to connect your wallet, you have to install Metamask extension first.";

/// EIP-1193 code for a request the user declined.
pub const USER_REJECTED_REQUEST: i64 = 4001;

/// Convenience type alias for `Result<T, WalletError>`.
pub type Result<T> = std::result::Result<T, WalletError>;

/// Error type for wallet provider calls and session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
    /// No injected wallet provider was found at startup.
    #[error("No injected wallet provider found")]
    ProviderAbsent,

    /// The user declined the permission prompt (EIP-1193 code 4001).
    #[error("Permission rejected: {0}")]
    PermissionRejected(String),

    /// Permission was granted but the provider returned no accounts.
    #[error("No accounts returned")]
    NoAccounts,

    /// Provider request failed (network, unsupported method, pending request).
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Provider answered with data that could not be decoded.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// One or more fields of a snapshot could not be loaded.
    #[error("Some wallet data could not be loaded: {}", .0.join(", "))]
    PartialHydration(Vec<String>),

    /// The persisted connection flag could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid widget configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WalletError {
    /// Get the message shown in the error banner.
    pub fn user_message(&self) -> String {
        match self {
            WalletError::ProviderAbsent => NO_PROVIDER_MSG.to_string(),
            WalletError::PermissionRejected(_) => "User rejected connection.".to_string(),
            WalletError::NoAccounts => "No accounts returned".to_string(),
            WalletError::Rpc(_) | WalletError::Decoding(_) => {
                format!("Wallet request failed. {}", self)
            }
            WalletError::PartialHydration(_) | WalletError::Storage(_) | WalletError::Config(_) => {
                self.to_string()
            }
        }
    }

    /// Classify a JSON-RPC error reported by the provider.
    pub fn from_rpc(code: Option<i64>, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            Some(USER_REJECTED_REQUEST) => WalletError::PermissionRejected(message),
            Some(code) => WalletError::Rpc(format!("{} (code {})", message, code)),
            None => WalletError::Rpc(message),
        }
    }

    /// Whether this error ends a connect attempt.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            WalletError::ProviderAbsent | WalletError::PermissionRejected(_) | WalletError::NoAccounts
        )
    }
}

/// Convert `serde_json::Error` to `WalletError`.
impl From<serde_json::Error> for WalletError {
    fn from(err: serde_json::Error) -> Self {
        WalletError::Decoding(format!("JSON error: {}", err))
    }
}

impl From<ParseChainIdError> for WalletError {
    fn from(err: ParseChainIdError) -> Self {
        WalletError::Decoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            WalletError::PermissionRejected("4001".into()).user_message(),
            "User rejected connection."
        );
        assert_eq!(WalletError::NoAccounts.user_message(), "No accounts returned");
        assert_eq!(WalletError::ProviderAbsent.user_message(), NO_PROVIDER_MSG);
        assert_eq!(
            WalletError::Rpc("timeout".into()).user_message(),
            "Wallet request failed. RPC error: timeout"
        );
    }

    #[test]
    fn test_from_rpc_classifies_user_rejection() {
        assert_eq!(
            WalletError::from_rpc(Some(4001), "User rejected the request."),
            WalletError::PermissionRejected("User rejected the request.".into())
        );
        assert_eq!(
            WalletError::from_rpc(Some(-32603), "Internal error"),
            WalletError::Rpc("Internal error (code -32603)".into())
        );
        assert_eq!(WalletError::from_rpc(None, "boom"), WalletError::Rpc("boom".into()));
    }

    #[test]
    fn test_partial_hydration_lists_fields() {
        let err = WalletError::PartialHydration(vec!["native balance".into(), "USDT balance".into()]);
        assert_eq!(
            err.user_message(),
            "Some wallet data could not be loaded: native balance, USDT balance"
        );
        assert!(!err.is_connection_error());
        assert!(WalletError::NoAccounts.is_connection_error());
    }
}
