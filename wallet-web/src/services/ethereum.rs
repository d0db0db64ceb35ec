//! EIP-1193 Provider Integration via wasm-bindgen
//!
//! Binds the injected `window.ethereum` object (MetaMask and compatible wallets) to the
//! [`ChainClient`] and [`ProviderDetector`] traits the session is written against.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use alloy_primitives::{Address, Bytes, U256};
use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use lib_wallet::abi::{balance_of_calldata, decode_balance_of, parse_accounts};
use lib_wallet::{
    ChainClient, EventHandler, ListenerId, ProviderDetector, ProviderEvent, ProviderEventKind,
    Result, WalletError,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::dto::wallet::ChainId;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::utils::constants::DETECT_POLL_INTERVAL_MS;

// ============================================================================
// JAVASCRIPT INTEROP
// ============================================================================

#[wasm_bindgen(inline_js = "
export function injectedEthereum() {
    if (typeof window === 'undefined' || !window.ethereum) {
        return null;
    }
    return window.ethereum;
}
")]
extern "C" {
    /// `window.ethereum`, if a wallet injected one.
    fn injectedEthereum() -> Option<Ethereum>;
}

#[wasm_bindgen]
extern "C" {
    /// The injected EIP-1193 provider object.
    #[derive(Clone, Debug)]
    pub type Ethereum;

    #[wasm_bindgen(method, catch)]
    async fn request(this: &Ethereum, args: JsValue) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn on(this: &Ethereum, event: &str, handler: &js_sys::Function) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = removeListener)]
    fn remove_listener(
        this: &Ethereum,
        event: &str,
        handler: &js_sys::Function,
    ) -> std::result::Result<(), JsValue>;
}

#[derive(Serialize)]
struct RequestArguments<'a> {
    method: &'a str,
    params: serde_json::Value,
}

/// Shape of the error object providers reject requests with.
#[derive(Deserialize)]
struct ProviderRpcError {
    code: Option<i64>,
    message: Option<String>,
}

fn rpc_error(err: JsValue) -> WalletError {
    match serde_wasm_bindgen::from_value::<ProviderRpcError>(err.clone()) {
        Ok(ProviderRpcError { code, message }) => {
            WalletError::from_rpc(code, message.unwrap_or_else(|| "unknown provider error".to_string()))
        }
        Err(_) => WalletError::Rpc(err.as_string().unwrap_or_else(|| format!("{:?}", err))),
    }
}

fn decode_error(err: serde_wasm_bindgen::Error) -> WalletError {
    WalletError::Decoding(err.to_string())
}

type Listener = Closure<dyn FnMut(JsValue)>;

// ============================================================================
// CHAIN CLIENT
// ============================================================================

/// [`ChainClient`] over an injected EIP-1193 provider.
///
/// Keeps every JS closure it registers so listeners can be removed again; dropping the
/// client removes whatever is still registered.
pub struct Eip1193Client {
    provider: Ethereum,
    listeners: RefCell<HashMap<ListenerId, (ProviderEventKind, Listener)>>,
    next_listener: Cell<u64>,
}

impl Eip1193Client {
    pub fn new(provider: Ethereum) -> Self {
        Self {
            provider,
            listeners: RefCell::new(HashMap::new()),
            next_listener: Cell::new(0),
        }
    }

    async fn call<T: serde::de::DeserializeOwned>(&self, method: &str, params: serde_json::Value) -> Result<T> {
        let args = RequestArguments { method, params }
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(decode_error)?;

        let value = self.provider.request(args).await.map_err(rpc_error)?;
        serde_wasm_bindgen::from_value(value).map_err(decode_error)
    }
}

#[async_trait(?Send)]
impl ChainClient for Eip1193Client {
    async fn request_permission(&self) -> Result<()> {
        log::debug!("requesting eth_accounts permission");
        self.call::<serde_json::Value>("wallet_requestPermissions", json!([{ "eth_accounts": {} }]))
            .await?;
        Ok(())
    }

    async fn get_accounts(&self) -> Result<Vec<Address>> {
        let accounts: Vec<String> = self.call("eth_accounts", json!([])).await?;
        parse_accounts(&accounts)
    }

    async fn get_native_balance(&self, owner: Address) -> Result<U256> {
        self.call("eth_getBalance", json!([owner.to_string(), "latest"]))
            .await
    }

    async fn get_token_balance(&self, contract: Address, owner: Address) -> Result<U256> {
        let data: Bytes = self
            .call(
                "eth_call",
                json!([{ "to": contract.to_string(), "data": balance_of_calldata(owner) }, "latest"]),
            )
            .await?;
        decode_balance_of(&data)
    }

    async fn get_chain_id(&self) -> Result<ChainId> {
        let chain_id: String = self.call("eth_chainId", json!([])).await?;
        Ok(chain_id.parse()?)
    }

    fn subscribe(&self, kind: ProviderEventKind, handler: EventHandler) -> Result<ListenerId> {
        let listener = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
            match decode_event(kind, payload) {
                Ok(event) => handler(event),
                Err(err) => log::warn!("ignoring malformed {} event: {}", kind, err),
            }
        });

        self.provider
            .on(kind.as_str(), listener.as_ref().unchecked_ref())
            .map_err(rpc_error)?;

        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id, (kind, listener));
        Ok(id)
    }

    fn unsubscribe(&self, kind: ProviderEventKind, listener: ListenerId) {
        let removed = self.listeners.borrow_mut().remove(&listener);
        if let Some((_, closure)) = removed {
            if let Err(err) = self
                .provider
                .remove_listener(kind.as_str(), closure.as_ref().unchecked_ref())
            {
                log::warn!("could not remove {} listener: {:?}", kind, err);
            }
        }
    }

    fn unsubscribe_all(&self) {
        let ids: Vec<(ListenerId, ProviderEventKind)> = self
            .listeners
            .borrow()
            .iter()
            .map(|(id, (kind, _))| (*id, *kind))
            .collect();
        for (id, kind) in ids {
            self.unsubscribe(kind, id);
        }
    }
}

impl Drop for Eip1193Client {
    fn drop(&mut self) {
        self.unsubscribe_all();
    }
}

fn decode_event(kind: ProviderEventKind, payload: JsValue) -> Result<ProviderEvent> {
    match kind {
        ProviderEventKind::AccountsChanged => {
            let accounts: Vec<String> = serde_wasm_bindgen::from_value(payload).map_err(decode_error)?;
            Ok(ProviderEvent::AccountsChanged(parse_accounts(&accounts)?))
        }
        ProviderEventKind::ChainChanged => {
            // Some providers still emit a bare number
            let chain_id = match payload.as_f64() {
                Some(number) => chain_id_from_number(number)?,
                None => {
                    let raw: String = serde_wasm_bindgen::from_value(payload).map_err(decode_error)?;
                    raw.parse()?
                }
            };
            Ok(ProviderEvent::ChainChanged(chain_id))
        }
    }
}

/// Largest integer a JS number represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn chain_id_from_number(number: f64) -> Result<ChainId> {
    if number.is_finite() && number >= 0.0 && number.fract() == 0.0 && number <= MAX_SAFE_INTEGER {
        Ok(ChainId(number as u64))
    } else {
        Err(WalletError::Decoding(format!("invalid chain id: {}", number)))
    }
}

// ============================================================================
// DETECTION
// ============================================================================

/// Probes `window.ethereum`, polling until `timeout_ms` for wallets that inject late.
pub struct InjectedProviderDetector {
    timeout_ms: u32,
    provider: RefCell<Option<Ethereum>>,
}

impl InjectedProviderDetector {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            provider: RefCell::new(None),
        }
    }
}

#[async_trait(?Send)]
impl ProviderDetector for InjectedProviderDetector {
    async fn detect(&self) -> bool {
        let mut waited = 0;
        loop {
            if let Some(provider) = injectedEthereum() {
                log::info!("injected wallet provider found after {}ms", waited);
                *self.provider.borrow_mut() = Some(provider);
                return true;
            }
            if waited >= self.timeout_ms {
                log::info!("no injected wallet provider after {}ms", waited);
                return false;
            }
            TimeoutFuture::new(DETECT_POLL_INTERVAL_MS).await;
            waited += DETECT_POLL_INTERVAL_MS;
        }
    }

    fn bind(&self) -> Result<Rc<dyn ChainClient>> {
        let provider = self
            .provider
            .borrow()
            .clone()
            .or_else(injectedEthereum)
            .ok_or(WalletError::ProviderAbsent)?;
        Ok(Rc::new(Eip1193Client::new(provider)))
    }
}
