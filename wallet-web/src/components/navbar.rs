//! Navigation Bar Component

use leptos::prelude::*;
use leptos_router::components::A;

use crate::state::wallet::use_wallet_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let wallet_ctx = use_wallet_context();

    let status = move || {
        if wallet_ctx.is_connected() {
            ("status-dot connected", "Connected")
        } else {
            ("status-dot", "Not connected")
        }
    };

    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">"Wallet"</span>
                </A>
                <span class="nav-status">
                    <span class=move || status().0></span>
                    {move || status().1}
                </span>
            </div>
        </nav>
    }
}
