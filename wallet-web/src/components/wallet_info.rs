//! Connected wallet details: address, balance, chain and token lines

use leptos::prelude::*;
use shared::utils::truncate_address;

use crate::state::wallet::use_wallet_context;
use crate::utils::format::{chain_name, format_balance, format_chain_id};

#[component]
pub fn WalletInfo() -> impl IntoView {
    let wallet_ctx = use_wallet_context();
    let snapshot = move || wallet_ctx.state.with(|state| state.snapshot.clone());

    let chain_label = move || {
        let chain_id = snapshot().chain_id;
        match chain_id.and_then(chain_name) {
            Some(name) => format!("{} ({})", format_chain_id(chain_id), name),
            None => format_chain_id(chain_id),
        }
    };

    view! {
        <div class="wallet-info">
            <h2>"Wallet Info"</h2>
            <dl>
                <dt>"Address"</dt>
                <dd style="font-family: monospace;" title=move || snapshot().address>
                    {move || truncate_address(&snapshot().address)}
                </dd>
                <dt>"Balance"</dt>
                <dd>{move || format_balance(&snapshot().native_balance)}</dd>
                <dt>"Chain ID"</dt>
                <dd>{chain_label}</dd>
            </dl>
            <ul class="token-list">
                <For
                    each=move || snapshot().token_balances.into_iter().enumerate()
                    key=|(index, token)| (*index, token.symbol.clone(), token.amount.clone())
                    children=move |(_, token)| {
                        view! {
                            <li class="token-line">
                                <span class="token-symbol">{token.symbol}</span>
                                <span class="token-amount">{token.amount}</span>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
