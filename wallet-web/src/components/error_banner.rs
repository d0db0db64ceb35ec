//! Dismissible error banner

use leptos::prelude::*;

use crate::state::wallet::use_wallet_context;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let message = move || wallet_ctx.state.with(|state| state.last_error.clone());

    view! {
        <Show when=move || message().is_some()>
            <div class="error-banner" role="alert">
                <span>{move || message().unwrap_or_default()}</span>
                <button class="btn-dismiss" title="Dismiss" on:click=move |_| wallet_ctx.clear_error()>
                    "×"
                </button>
            </div>
        </Show>
    }
}
