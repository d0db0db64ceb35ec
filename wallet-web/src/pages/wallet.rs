//! Wallet Page - connect, inspect and disconnect an injected wallet

use leptos::prelude::*;
use lib_wallet::Connection;

use crate::components::{ErrorBanner, InstallPrompt, WalletInfo};
use crate::state::wallet::use_wallet_context;

#[component]
pub fn WalletPage() -> impl IntoView {
    let wallet_ctx = use_wallet_context();

    let provider_available = move || wallet_ctx.state.with(|state| state.provider_available);
    let connection = move || wallet_ctx.state.with(|state| state.connection);

    let on_connect = move |_| wallet_ctx.connect();
    let on_disconnect = move |_| wallet_ctx.disconnect();

    view! {
        <div class="app-container" style="display: flex; justify-content: center; align-items: center; min-height: calc(100vh - 60px);">
            <div class="card" style="width: 100%; max-width: 500px;">
                <h1 class="card-title" style="text-align: center;">"MetaMask Wallet"</h1>

                <ErrorBanner/>

                {move || {
                    if !wallet_ctx.ready.get() {
                        return view! {
                            <p class="loading">"Looking for a wallet..."</p>
                        }.into_any();
                    }

                    if !provider_available() {
                        return view! { <InstallPrompt/> }.into_any();
                    }

                    match connection() {
                        Connection::Disconnected => view! {
                            <button class="btn" style="width: 100%;" on:click=on_connect>
                                "Connect Metamask"
                            </button>
                        }.into_any(),
                        Connection::Connecting => view! {
                            <div>
                                <button class="btn" style="width: 100%;" disabled=true>
                                    "Connect Metamask"
                                </button>
                                <p class="loading">"loading..."</p>
                            </div>
                        }.into_any(),
                        Connection::Connected => view! {
                            <div>
                                <button class="btn" style="width: 100%; background: var(--bg-error);" on:click=on_disconnect>
                                    "Disconnect Metamask"
                                </button>
                                <WalletInfo/>
                            </div>
                        }.into_any(),
                    }
                }}
            </div>
        </div>
    }
}
