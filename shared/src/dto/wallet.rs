use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::utils::format_units;

/// Identifier of the network currently selected in the wallet.
///
/// Providers report chain ids as hex strings (`"0x38"`), some client libraries as
/// numbers. This is the single canonical form: a `u64`, displayed in decimal.
///
/// ```rust
/// use shared::dto::wallet::ChainId;
///
/// let bsc: ChainId = "0x38".parse().unwrap();
/// assert_eq!(bsc, ChainId(56));
/// assert_eq!(bsc.to_string(), "56");
/// assert_eq!("1".parse::<ChainId>().unwrap(), ChainId(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = ParseChainIdError;

    /// Accepts `0x`-prefixed hex (provider format) or plain decimal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse::<u64>(),
        };
        parsed
            .map(ChainId)
            .map_err(|_| ParseChainIdError(s.to_string()))
    }
}

/// A chain id string that is neither hex nor decimal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChainIdError(pub String);

impl fmt::Display for ParseChainIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid chain id: {:?}", self.0)
    }
}

impl std::error::Error for ParseChainIdError {}

fn default_token_decimals() -> u8 {
    18
}

/// One ERC-20 token the widget shows a balance line for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    pub contract_address: Address,
    pub symbol: String,
    #[serde(default = "default_token_decimals")]
    pub decimals: u8,
}

impl TokenConfig {
    pub fn new(contract_address: Address, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            contract_address,
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// Balance line for one configured token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    pub symbol: String,
    pub amount: String,
}

impl TokenBalance {
    /// Entry used when the token's balance is unknown (disconnected or the call failed).
    pub fn zero(symbol: impl Into<String>, precision: usize) -> Self {
        Self {
            symbol: symbol.into(),
            amount: format_units(U256::ZERO, 0, precision),
        }
    }
}

/// Immutable view of the wallet at one point in time.
///
/// `token_balances` is always one-to-one with the configured tokens, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub address: String,
    pub native_balance: String,
    pub token_balances: Vec<TokenBalance>,
    pub chain_id: Option<ChainId>,
}

impl WalletSnapshot {
    /// The disconnected default: no address, no native balance, zero for every token.
    pub fn empty(tokens: &[TokenConfig], precision: usize) -> Self {
        Self {
            address: String::new(),
            native_balance: String::new(),
            token_balances: tokens
                .iter()
                .map(|token| TokenBalance::zero(token.symbol.clone(), precision))
                .collect(),
            chain_id: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.address.is_empty()
    }
}
