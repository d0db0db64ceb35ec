//! # ERC-20 Calls
//!
//! The widget's one contract read, `balanceOf(address)` through `eth_call`, plus parsing of
//! the account lists providers report.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol, SolCall};

use crate::error::{Result, WalletError};

sol! {
    interface IERC20 {
        #[derive(Debug)]
        function balanceOf(address owner) external view returns (uint256);
    }
}

/// ABI-encoded `balanceOf(owner)` call data.
///
/// ```rust
/// use lib_wallet::abi::balance_of_calldata;
///
/// let owner = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse().unwrap();
/// let data = balance_of_calldata(owner);
/// assert!(data.to_string().starts_with("0x70a08231000000000000000000000000"));
/// assert_eq!(data.len(), 36);
/// ```
pub fn balance_of_calldata(owner: Address) -> Bytes {
    IERC20::balanceOfCall { owner }.abi_encode().into()
}

/// Decode `balanceOf` return data.
///
/// A call to an address without code returns empty data; that is reported as an error
/// rather than read as a zero balance.
pub fn decode_balance_of(data: &[u8]) -> Result<U256> {
    IERC20::balanceOfCall::abi_decode_returns(data).map_err(|e| {
        WalletError::Decoding(format!(
            "invalid balanceOf return data ({} bytes, is the contract deployed on this chain?): {}",
            data.len(),
            e
        ))
    })
}

/// Parse a hex account address as reported by the provider (any letter case).
pub fn parse_address(value: &str) -> Result<Address> {
    value
        .trim()
        .parse::<Address>()
        .map_err(|e| WalletError::Decoding(format!("invalid address {:?}: {}", value, e)))
}

/// Parse an `eth_accounts` / `accountsChanged` payload, keeping provider order.
pub fn parse_accounts<S: AsRef<str>>(values: &[S]) -> Result<Vec<Address>> {
    values.iter().map(|value| parse_address(value.as_ref())).collect()
}
