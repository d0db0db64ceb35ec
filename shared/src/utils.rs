//! # Shared Utility Functions
//!
//! Display helpers used by the wallet core and the browser view.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Format address with ellipsis (first N and last M characters)
//! - [`truncate_address`] - `format_address` with the widget's default lengths
//!
//! ## Amount Formatting
//!
//! - [`format_units`] - Render an integer amount of base units (wei, token units) as a
//!   fixed-precision decimal string
//!
//! ## Usage
//!
//! ```rust
//! use alloy_primitives::U256;
//! use shared::utils::{format_address, format_units};
//!
//! let address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
//! assert_eq!(format_address(address, 6, 4), "0x5aAe...eAed");
//! assert_eq!(format_units(U256::from(1_500_000u64), 6, 4), "1.5000");
//! ```

use alloy_primitives::U256;

/// Format a wallet address by showing the first `prefix_len` and last `suffix_len` characters.
///
/// If the address is shorter than `prefix_len + suffix_len`, it is returned as-is.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "0xdAC17F958D2ee523a2206206994597C13D831ec7";
/// assert_eq!(format_address(addr, 6, 4), "0xdAC1...1ec7");
/// assert_eq!(format_address(addr, 4, 4), "0xdA...1ec7");
/// assert_eq!(format_address("short", 4, 4), "short");
/// ```
pub fn format_address(address: &str, prefix_len: usize, suffix_len: usize) -> String {
    let address_len = address.len();

    // Hex addresses are ASCII, but guard against anything else before slicing.
    if address_len <= prefix_len + suffix_len
        || !address.is_char_boundary(prefix_len)
        || !address.is_char_boundary(address_len - suffix_len)
    {
        return address.to_string();
    }

    let prefix = &address[..prefix_len];
    let suffix = &address[address_len - suffix_len..];

    format!("{}...{}", prefix, suffix)
}

/// Format an EVM address keeping the `0x` prefix plus four characters on each side.
///
/// ```rust
/// use shared::utils::truncate_address;
///
/// let addr = "0xdAC17F958D2ee523a2206206994597C13D831ec7";
/// assert_eq!(truncate_address(addr), "0xdAC1...1ec7");
/// ```
pub fn truncate_address(address: &str) -> String {
    format_address(address, 6, 4)
}

/// Render `amount` base units with `decimals` implied decimal places as a string with
/// exactly `precision` fractional digits. Extra digits are truncated, not rounded.
///
/// # Examples
///
/// ```rust
/// use alloy_primitives::U256;
/// use shared::utils::format_units;
///
/// let one_and_a_bit_ether = U256::from(1_234_567_890_000_000_000u128);
/// assert_eq!(format_units(one_and_a_bit_ether, 18, 4), "1.2345");
/// assert_eq!(format_units(U256::from(42u64), 0, 2), "42.00");
/// assert_eq!(format_units(U256::from(5u64), 6, 0), "0");
/// ```
pub fn format_units(amount: U256, decimals: u8, precision: usize) -> String {
    let base = U256::from(10u8).pow(U256::from(decimals));
    let whole = amount / base;
    if precision == 0 {
        return whole.to_string();
    }

    let fraction = amount % base;
    let fraction_digits = format!("{:0>width$}", fraction.to_string(), width = decimals as usize);
    let mut shown: String = fraction_digits.chars().take(precision).collect();
    while shown.len() < precision {
        shown.push('0');
    }

    format!("{}.{}", whole, shown)
}
