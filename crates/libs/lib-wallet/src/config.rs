//! # Widget Configuration
//!
//! [`WalletConfig`] is supplied once at construction and never changes at runtime.
//! The browser crate embeds a JSON document and loads it with [`WalletConfig::from_json`];
//! every field is optional and falls back to [`WalletConfig::default`].
//!
//! ```rust
//! use lib_wallet::config::WalletConfig;
//!
//! let config = WalletConfig::from_json(r#"{ "display_precision": 2 }"#).unwrap();
//! assert_eq!(config.display_precision, 2);
//! assert_eq!(config.storage_key, "METAMASK_KEY");
//! ```

use std::collections::HashSet;

use alloy_primitives::{address, Address};
use serde::{Deserialize, Serialize};
use shared::dto::wallet::TokenConfig;

use crate::error::{Result, WalletError};

/// Key of the persisted "was connected" flag.
pub const DEFAULT_STORAGE_KEY: &str = "METAMASK_KEY";

/// Tether USD on Ethereum mainnet.
pub const USDT_CONTRACT: Address = address!("0xdAC17F958D2ee523a2206206994597C13D831ec7");

/// Largest power of ten that fits in a `U256`.
const MAX_DECIMALS: u8 = 77;

/// Widget configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Tokens to show, in display order.
    pub tokens: Vec<TokenConfig>,

    /// Storage key of the persisted connection flag.
    pub storage_key: String,

    /// Decimals of the chain's native currency (18 for ETH/BNB).
    pub native_decimals: u8,

    /// Fractional digits shown for every balance.
    pub display_precision: usize,

    /// How long provider detection waits for a late injection, in milliseconds.
    pub detect_timeout_ms: u32,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            tokens: vec![TokenConfig::new(USDT_CONTRACT, "USDT", 6)],
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            native_decimals: 18,
            display_precision: 4,
            detect_timeout_ms: 3000,
        }
    }
}

impl WalletConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| WalletError::Config(format!("invalid wallet config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.storage_key.trim().is_empty() {
            return Err(WalletError::Config("storage_key must not be empty".to_string()));
        }

        if self.display_precision > 18 {
            return Err(WalletError::Config(
                "display_precision must be between 0 and 18".to_string(),
            ));
        }

        if self.native_decimals > MAX_DECIMALS {
            return Err(WalletError::Config(format!(
                "native_decimals must be at most {}",
                MAX_DECIMALS
            )));
        }

        let mut seen = HashSet::new();
        for token in &self.tokens {
            if token.symbol.trim().is_empty() {
                return Err(WalletError::Config(format!(
                    "token {} has an empty symbol",
                    token.contract_address
                )));
            }
            if token.decimals > MAX_DECIMALS {
                return Err(WalletError::Config(format!(
                    "token {} decimals must be at most {}",
                    token.symbol, MAX_DECIMALS
                )));
            }
            if !seen.insert(token.contract_address) {
                return Err(WalletError::Config(format!(
                    "token contract {} is configured twice",
                    token.contract_address
                )));
            }
        }

        Ok(())
    }
}
