//! Application constants

/// Widget configuration, embedded at build time.
pub const WALLET_CONFIG_JSON: &str = include_str!("../../config/wallet.json");

/// Where the install prompt sends users without a wallet.
pub const METAMASK_DOWNLOAD_URL: &str = "https://metamask.io/download/";

// UI constants
pub const DETECT_POLL_INTERVAL_MS: u32 = 100;
