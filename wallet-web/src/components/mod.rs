//! UI Components

pub mod error_banner;
pub mod install_prompt;
pub mod navbar;
pub mod wallet_info;

pub use error_banner::ErrorBanner;
pub use install_prompt::InstallPrompt;
pub use navbar::Navbar;
pub use wallet_info::WalletInfo;
