//! Shown when no injected wallet provider exists

use leptos::prelude::*;
use lib_wallet::error::NO_PROVIDER_MSG;

use crate::utils::constants::METAMASK_DOWNLOAD_URL;

#[component]
pub fn InstallPrompt() -> impl IntoView {
    view! {
        <div class="card install-prompt" style="text-align: center;">
            <p style="color: #cccccc; margin-bottom: 24px;">{NO_PROVIDER_MSG}</p>
            <a class="btn" href=METAMASK_DOWNLOAD_URL target="_blank" rel="noopener noreferrer">
                "Install MetaMask"
            </a>
        </div>
    }
}
