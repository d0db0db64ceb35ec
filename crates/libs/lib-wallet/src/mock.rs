//! Test doubles for the provider and platform seams.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use futures::channel::oneshot;
use futures::future::{join_all, LocalBoxFuture};
use shared::dto::wallet::ChainId;

use crate::client::{ChainClient, EventHandler, ListenerId, ProviderDetector, ProviderEvent, ProviderEventKind};
use crate::error::{Result, WalletError};
use crate::platform::{PageReloader, TaskSpawner};

/// Scriptable [`ChainClient`]. Unset balances default to zero.
pub struct MockChainClient {
    permission: RefCell<Result<()>>,
    permission_gate: RefCell<Option<oneshot::Receiver<()>>>,
    permission_requests: Cell<usize>,
    accounts: RefCell<Result<Vec<Address>>>,
    accounts_gate: RefCell<Option<oneshot::Receiver<()>>>,
    account_requests: Cell<usize>,
    native: RefCell<HashMap<Address, Result<U256>>>,
    native_gates: RefCell<HashMap<Address, oneshot::Receiver<()>>>,
    tokens: RefCell<HashMap<Address, Result<U256>>>,
    chain_id: RefCell<Result<ChainId>>,
    listeners: RefCell<BTreeMap<ListenerId, (ProviderEventKind, EventHandler)>>,
    next_listener: Cell<u64>,
    fail_subscribe: Cell<bool>,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self {
            permission: RefCell::new(Ok(())),
            permission_gate: RefCell::new(None),
            permission_requests: Cell::new(0),
            accounts: RefCell::new(Ok(Vec::new())),
            accounts_gate: RefCell::new(None),
            account_requests: Cell::new(0),
            native: RefCell::new(HashMap::new()),
            native_gates: RefCell::new(HashMap::new()),
            tokens: RefCell::new(HashMap::new()),
            chain_id: RefCell::new(Ok(ChainId(1))),
            listeners: RefCell::new(BTreeMap::new()),
            next_listener: Cell::new(0),
            fail_subscribe: Cell::new(false),
        }
    }

    pub fn set_accounts(&self, accounts: Vec<Address>) {
        *self.accounts.borrow_mut() = Ok(accounts);
    }

    pub fn fail_accounts(&self, err: WalletError) {
        *self.accounts.borrow_mut() = Err(err);
    }

    pub fn reject_permission(&self) {
        *self.permission.borrow_mut() =
            Err(WalletError::PermissionRejected("User rejected the request.".to_string()));
    }

    pub fn accept_permission(&self) {
        *self.permission.borrow_mut() = Ok(());
    }

    pub fn set_native(&self, owner: Address, balance: Result<U256>) {
        self.native.borrow_mut().insert(owner, balance);
    }

    pub fn set_token(&self, contract: Address, balance: Result<U256>) {
        self.tokens.borrow_mut().insert(contract, balance);
    }

    pub fn set_chain_id(&self, chain_id: Result<ChainId>) {
        *self.chain_id.borrow_mut() = chain_id;
    }

    /// Hold `request_permission` until the returned sender fires.
    pub fn gate_permission(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.permission_gate.borrow_mut() = Some(rx);
        tx
    }

    /// Hold the next `get_accounts` until the returned sender fires.
    pub fn gate_accounts(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.accounts_gate.borrow_mut() = Some(rx);
        tx
    }

    /// Hold the next native balance call for `owner` until the returned sender fires.
    pub fn gate_native(&self, owner: Address) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.native_gates.borrow_mut().insert(owner, rx);
        tx
    }

    pub fn fail_subscriptions(&self) {
        self.fail_subscribe.set(true);
    }

    pub fn permission_requests(&self) -> usize {
        self.permission_requests.get()
    }

    pub fn account_requests(&self) -> usize {
        self.account_requests.get()
    }

    pub fn listener_count(&self, kind: ProviderEventKind) -> usize {
        self.listeners
            .borrow()
            .values()
            .filter(|(registered, _)| *registered == kind)
            .count()
    }

    pub fn total_listeners(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver `event` to every listener of its kind, like the provider would.
    pub fn emit(&self, event: ProviderEvent) {
        let kind = event.kind();
        let handlers: Vec<EventHandler> = self
            .listeners
            .borrow()
            .values()
            .filter(|(registered, _)| *registered == kind)
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(event.clone());
        }
    }
}

#[async_trait(?Send)]
impl ChainClient for MockChainClient {
    async fn request_permission(&self) -> Result<()> {
        self.permission_requests.set(self.permission_requests.get() + 1);
        let gate = self.permission_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.permission.borrow().clone()
    }

    async fn get_accounts(&self) -> Result<Vec<Address>> {
        self.account_requests.set(self.account_requests.get() + 1);
        let gate = self.accounts_gate.borrow_mut().take();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.accounts.borrow().clone()
    }

    async fn get_native_balance(&self, owner: Address) -> Result<U256> {
        let gate = self.native_gates.borrow_mut().remove(&owner);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.native.borrow().get(&owner).cloned().unwrap_or(Ok(U256::ZERO))
    }

    async fn get_token_balance(&self, contract: Address, _owner: Address) -> Result<U256> {
        self.tokens.borrow().get(&contract).cloned().unwrap_or(Ok(U256::ZERO))
    }

    async fn get_chain_id(&self) -> Result<ChainId> {
        self.chain_id.borrow().clone()
    }

    fn subscribe(&self, kind: ProviderEventKind, handler: EventHandler) -> Result<ListenerId> {
        if self.fail_subscribe.get() {
            return Err(WalletError::Rpc("provider does not support events".to_string()));
        }
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().insert(id, (kind, handler));
        Ok(id)
    }

    fn unsubscribe(&self, _kind: ProviderEventKind, listener: ListenerId) {
        self.listeners.borrow_mut().remove(&listener);
    }

    fn unsubscribe_all(&self) {
        self.listeners.borrow_mut().clear();
    }
}

/// Detector returning a fixed answer and a prepared client.
pub struct MockDetector {
    pub client: Option<Rc<MockChainClient>>,
}

#[async_trait(?Send)]
impl ProviderDetector for MockDetector {
    async fn detect(&self) -> bool {
        self.client.is_some()
    }

    fn bind(&self) -> Result<Rc<dyn ChainClient>> {
        match &self.client {
            Some(client) => Ok(client.clone()),
            None => Err(WalletError::ProviderAbsent),
        }
    }
}

#[derive(Default)]
pub struct CountingReloader {
    reloads: Cell<usize>,
}

impl CountingReloader {
    pub fn count(&self) -> usize {
        self.reloads.get()
    }
}

impl PageReloader for CountingReloader {
    fn force_reload(&self) {
        self.reloads.set(self.reloads.get() + 1);
    }
}

/// Queues spawned tasks until the test drives them with [`QueuedSpawner::run_pending`].
#[derive(Default)]
pub struct QueuedSpawner {
    tasks: RefCell<Vec<LocalBoxFuture<'static, ()>>>,
}

impl QueuedSpawner {
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run every queued task concurrently, in spawn order, until all finish.
    pub async fn run_pending(&self) {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        join_all(tasks).await;
    }
}

impl TaskSpawner for QueuedSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        self.tasks.borrow_mut().push(task);
    }
}
