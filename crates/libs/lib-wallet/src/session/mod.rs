//! # Wallet Session
//!
//! [`WalletSession`] owns the connection state of the widget and is the only writer of it.
//!
//! ## Lifecycle
//!
//! ```text
//! attach/mount ──► initialize ──► (persisted flag?) silent hydrate
//!                      │
//!                      └─► subscribe accountsChanged + chainChanged (once)
//!
//! Disconnected ──connect()──► Connecting ──permission + accounts + hydrate──► Connected
//!      ▲                          │ rejected / no accounts                     │
//!      └──────────────────────────┘                                            │
//!      ▲                                                                        │
//!      └──── accountsChanged([]) / disconnect() (+ forced reload) ◄─────────────┘
//! ```
//!
//! ## Ordering
//!
//! Hydrations may overlap (an account switch right after a chain switch). Each hydrate
//! takes a ticket when it starts and commits only if no later ticket has committed, so the
//! snapshot always reflects the most recently started request. Disconnecting invalidates
//! every ticket in flight.
//!
//! ## Errors
//!
//! Provider failures never escape: they become state plus a banner message in
//! [`SessionState::last_error`].

mod state;


pub use state::{Connection, SessionState};

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use alloy_primitives::Address;
use futures::future::join_all;
use shared::dto::wallet::{ChainId, TokenBalance, WalletSnapshot};
use shared::utils::format_units;
use tracing::{debug, info, warn};

use crate::client::{ChainClient, EventHandler, ProviderDetector, ProviderEvent, ProviderEventKind};
use crate::config::WalletConfig;
use crate::error::{Result, WalletError};
use crate::platform::{ConnectionStore, PageReloader, TaskSpawner};
use crate::registry::SubscriptionRegistry;

/// Host collaborators injected into the session.
pub struct SessionDeps {
    pub store: Rc<dyn ConnectionStore>,
    pub reloader: Rc<dyn PageReloader>,
    pub spawner: Rc<dyn TaskSpawner>,
}

/// Outcome of [`WalletSession::hydrate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// The snapshot was committed and the session is Connected.
    Committed,
    /// A more recent request already committed; this result was dropped.
    Superseded,
    /// The provider reported no authorized accounts.
    NoAccounts,
}

type Observer = Rc<dyn Fn(&SessionState)>;

struct Inner {
    config: WalletConfig,
    client: Option<Rc<dyn ChainClient>>,
    registry: Option<SubscriptionRegistry>,
    deps: SessionDeps,
    state: RefCell<SessionState>,
    observers: RefCell<Vec<Observer>>,
    issued: Cell<u64>,
    committed: Cell<u64>,
    initialized: Cell<bool>,
}

/// Handle to the wallet session. Clones share the same session.
#[derive(Clone)]
pub struct WalletSession {
    inner: Rc<Inner>,
}

impl WalletSession {
    /// Build a session around an already bound client (`None` when no provider exists).
    pub fn new(config: WalletConfig, client: Option<Rc<dyn ChainClient>>, deps: SessionDeps) -> Self {
        let state = SessionState {
            connection: Connection::Disconnected,
            snapshot: WalletSnapshot::empty(&config.tokens, config.display_precision),
            last_error: None,
            provider_available: client.is_some(),
            persisted_connected: deps.store.load(),
        };
        let registry = client.clone().map(SubscriptionRegistry::new);

        Self {
            inner: Rc::new(Inner {
                config,
                client,
                registry,
                deps,
                state: RefCell::new(state),
                observers: RefCell::new(Vec::new()),
                issued: Cell::new(0),
                committed: Cell::new(0),
                initialized: Cell::new(false),
            }),
        }
    }

    /// Detect the injected provider and build the session, without initializing it.
    ///
    /// Lets the caller register observers before [`initialize`](Self::initialize) runs.
    pub async fn attach(config: WalletConfig, detector: &dyn ProviderDetector, deps: SessionDeps) -> Self {
        let client = if detector.detect().await {
            match detector.bind() {
                Ok(client) => Some(client),
                Err(err) => {
                    warn!(error = %err, "wallet provider detected but could not be bound");
                    None
                }
            }
        } else {
            info!("no injected wallet provider found");
            None
        };

        Self::new(config, client, deps)
    }

    /// [`attach`](Self::attach) followed by [`initialize`](Self::initialize).
    pub async fn mount(config: WalletConfig, detector: &dyn ProviderDetector, deps: SessionDeps) -> Self {
        let session = Self::attach(config, detector, deps).await;
        session.initialize().await;
        session
    }

    pub fn config(&self) -> &WalletConfig {
        &self.inner.config
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// Call `observer` with the new state after every change.
    pub fn subscribe_state(&self, observer: impl Fn(&SessionState) + 'static) {
        self.inner.observers.borrow_mut().push(Rc::new(observer));
    }

    /// Subscribe to provider events and, if the last page load ended connected, restore
    /// the connection without prompting. Runs once; later calls are no-ops.
    pub async fn initialize(&self) {
        if self.inner.initialized.replace(true) {
            debug!("session already initialized");
            return;
        }
        if self.inner.client.is_none() {
            return;
        }

        self.subscribe_events();

        if !self.state().persisted_connected {
            return;
        }

        info!("restoring previous wallet connection");
        let restore_ticket = self.inner.issued.get() + 1;
        let failure = match self.hydrate(None).await {
            Ok(Hydration::Committed) | Ok(Hydration::Superseded) => None,
            Ok(Hydration::NoAccounts) => Some(WalletError::NoAccounts),
            Err(err) if self.inner.committed.get() > restore_ticket => {
                debug!(error = %err, "restore failed after a newer update, keeping it");
                None
            }
            Err(err) => Some(err),
        };

        if let Some(err) = failure {
            warn!(error = %err, "could not restore wallet connection");
            let empty = self.empty_snapshot();
            self.update(|state| {
                state.connection = Connection::Disconnected;
                state.snapshot = empty;
                state.persisted_connected = false;
                state.last_error = Some(err.user_message());
            });
            self.store_flag(false);
        }
    }

    /// Ask the user for account access and hydrate the first account.
    ///
    /// No-op without a provider, and while already Connecting or Connected.
    pub async fn connect(&self) {
        let Some(client) = self.inner.client.clone() else {
            debug!("connect ignored: no wallet provider");
            return;
        };

        let connection = self.inner.state.borrow().connection;
        if connection != Connection::Disconnected {
            debug!(?connection, "connect ignored");
            return;
        }

        info!("connecting wallet");
        self.update(|state| {
            state.last_error = None;
            state.connection = Connection::Connecting;
        });

        let accounts = match request_accounts(client.as_ref()).await {
            Ok(accounts) => accounts,
            Err(err) => {
                self.abort_connect(err);
                return;
            }
        };

        match self.hydrate(Some(accounts)).await {
            Ok(Hydration::Committed) => info!("wallet connected"),
            Ok(outcome) if self.state().is_connecting() => {
                // A newer update committed without connecting the session
                debug!(?outcome, "connect result superseded");
                self.abort_connect(WalletError::NoAccounts);
            }
            Ok(outcome) => debug!(?outcome, "connect result superseded"),
            Err(err) => self.abort_connect(err),
        }
    }

    /// Fetch a full snapshot for `accounts[0]` (accounts are fetched when `None`) and
    /// commit it unless a more recently started hydrate already has.
    ///
    /// Native balance, chain id and every token balance are fetched concurrently. A failed
    /// field falls back to its default and is reported as a soft warning.
    pub async fn hydrate(&self, accounts: Option<Vec<Address>>) -> Result<Hydration> {
        let client = self.inner.client.clone().ok_or(WalletError::ProviderAbsent)?;
        let ticket = self.issue_ticket();

        let accounts = match accounts {
            Some(accounts) => accounts,
            None => client.get_accounts().await?,
        };

        let Some(&owner) = accounts.first() else {
            return Ok(if self.try_commit(ticket) {
                Hydration::NoAccounts
            } else {
                Hydration::Superseded
            });
        };

        debug!(ticket, %owner, "hydrating wallet snapshot");
        let (snapshot, failures) = self.fetch_snapshot(client.as_ref(), owner).await;

        if !self.try_commit(ticket) {
            debug!(ticket, "discarding stale snapshot");
            return Ok(Hydration::Superseded);
        }

        let warning = (!failures.is_empty())
            .then(|| WalletError::PartialHydration(failures).user_message());
        self.update(|state| {
            state.connection = Connection::Connected;
            state.snapshot = snapshot;
            state.last_error = warning;
            state.persisted_connected = true;
        });
        self.store_flag(true);

        Ok(Hydration::Committed)
    }

    /// Provider reported a new account list.
    pub async fn on_accounts_changed(&self, accounts: Vec<Address>) {
        if accounts.is_empty() {
            info!("wallet disconnected by the provider");
            self.reset();
            return;
        }

        if let Err(err) = self.hydrate(Some(accounts)).await {
            self.report(err);
        }
    }

    /// Provider switched chains: every field may have changed, refetch everything.
    ///
    /// Also applies while Connecting, where the newer ticket supersedes the snapshot the
    /// connect attempt is still fetching.
    pub async fn on_chain_changed(&self, chain_id: ChainId) {
        let state = self.state();
        if state.connection == Connection::Disconnected && !state.persisted_connected {
            debug!(%chain_id, "chain changed while disconnected");
            return;
        }

        info!(%chain_id, "chain changed, refreshing wallet");
        match self.hydrate(None).await {
            Ok(Hydration::NoAccounts) if self.state().is_connecting() => {
                debug!("no authorized accounts yet, connect attempt still pending");
            }
            Ok(Hydration::NoAccounts) => {
                info!("no authorized accounts after chain change");
                self.reset();
            }
            Ok(_) => {}
            Err(err) => self.report(err),
        }
    }

    /// Dispatch a provider event.
    pub async fn handle_event(&self, event: ProviderEvent) {
        debug!(?event, "provider event");
        match event {
            ProviderEvent::AccountsChanged(accounts) => self.on_accounts_changed(accounts).await,
            ProviderEvent::ChainChanged(chain_id) => self.on_chain_changed(chain_id).await,
        }
    }

    /// Forget the connection and force a clean page reload.
    ///
    /// Always reloads, even when already Disconnected.
    pub fn disconnect(&self) {
        info!("disconnecting wallet");
        self.reset();
        self.inner.deps.reloader.force_reload();
    }

    pub fn clear_error(&self) {
        self.update(|state| state.last_error = None);
    }

    /// Remove provider listeners and observers. Call when the widget unmounts.
    pub fn teardown(&self) {
        if let Some(registry) = &self.inner.registry {
            registry.release();
        }
        self.inner.observers.borrow_mut().clear();
    }

    fn subscribe_events(&self) {
        let Some(registry) = &self.inner.registry else {
            return;
        };

        for kind in [ProviderEventKind::AccountsChanged, ProviderEventKind::ChainChanged] {
            if let Err(err) = registry.ensure(kind, self.event_handler()) {
                warn!(event = %kind, error = %err, "could not subscribe to provider events");
            }
        }
    }

    /// Handlers hold a weak reference so listeners never keep a dropped session alive.
    fn event_handler(&self) -> EventHandler {
        let weak: Weak<Inner> = Rc::downgrade(&self.inner);
        Rc::new(move |event: ProviderEvent| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let session = WalletSession { inner };
            let spawner = session.inner.deps.spawner.clone();
            spawner.spawn_local(Box::pin(async move {
                session.handle_event(event).await;
            }));
        })
    }

    async fn fetch_snapshot(&self, client: &dyn ChainClient, owner: Address) -> (WalletSnapshot, Vec<String>) {
        let config = &self.inner.config;
        let precision = config.display_precision;

        let token_calls = config
            .tokens
            .iter()
            .map(|token| client.get_token_balance(token.contract_address, owner));
        let (native, chain_id, token_results) = futures::join!(
            client.get_native_balance(owner),
            client.get_chain_id(),
            join_all(token_calls),
        );

        let mut failures = Vec::new();

        let native_balance = match native {
            Ok(amount) => format_units(amount, config.native_decimals, precision),
            Err(err) => {
                warn!(error = %err, "native balance unavailable");
                failures.push("native balance".to_string());
                String::new()
            }
        };

        let chain_id = match chain_id {
            Ok(chain_id) => Some(chain_id),
            Err(err) => {
                warn!(error = %err, "chain id unavailable");
                failures.push("chain id".to_string());
                None
            }
        };

        let mut token_balances = Vec::with_capacity(config.tokens.len());
        for (token, result) in config.tokens.iter().zip(token_results) {
            match result {
                Ok(amount) => token_balances.push(TokenBalance {
                    symbol: token.symbol.clone(),
                    amount: format_units(amount, token.decimals, precision),
                }),
                Err(err) => {
                    warn!(token = %token.symbol, error = %err, "token balance unavailable");
                    failures.push(format!("{} balance", token.symbol));
                    token_balances.push(TokenBalance::zero(token.symbol.clone(), precision));
                }
            }
        }

        let snapshot = WalletSnapshot {
            address: owner.to_checksum(None),
            native_balance,
            token_balances,
            chain_id,
        };
        (snapshot, failures)
    }

    fn abort_connect(&self, err: WalletError) {
        if err.is_connection_error() {
            info!(error = %err, "wallet connection not established");
        } else {
            warn!(error = %err, "wallet connection failed");
        }
        let empty = self.empty_snapshot();
        self.update(|state| {
            state.last_error = Some(err.user_message());
            if state.connection == Connection::Connecting {
                state.connection = Connection::Disconnected;
                state.snapshot = empty;
            }
        });
    }

    /// Back to Disconnected with the flag cleared; in-flight hydrations are discarded.
    fn reset(&self) {
        self.invalidate_in_flight();
        let empty = self.empty_snapshot();
        self.update(|state| {
            state.connection = Connection::Disconnected;
            state.snapshot = empty;
            state.persisted_connected = false;
        });
        self.store_flag(false);
    }

    fn report(&self, err: WalletError) {
        warn!(error = %err, "wallet refresh failed");
        self.update(|state| state.last_error = Some(err.user_message()));
    }

    fn empty_snapshot(&self) -> WalletSnapshot {
        WalletSnapshot::empty(&self.inner.config.tokens, self.inner.config.display_precision)
    }

    fn store_flag(&self, connected: bool) {
        if let Err(err) = self.inner.deps.store.save(connected) {
            warn!(error = %err, connected, "could not persist connection flag");
        }
    }

    fn update(&self, apply: impl FnOnce(&mut SessionState)) {
        let published = {
            let mut state = self.inner.state.borrow_mut();
            apply(&mut state);
            state.clone()
        };

        let observers = self.inner.observers.borrow().clone();
        for observer in observers {
            observer(&published);
        }
    }

    fn issue_ticket(&self) -> u64 {
        let ticket = self.inner.issued.get() + 1;
        self.inner.issued.set(ticket);
        ticket
    }

    fn try_commit(&self, ticket: u64) -> bool {
        if ticket > self.inner.committed.get() {
            self.inner.committed.set(ticket);
            true
        } else {
            false
        }
    }

    fn invalidate_in_flight(&self) {
        let ticket = self.issue_ticket();
        self.inner.committed.set(ticket);
    }
}

async fn request_accounts(client: &dyn ChainClient) -> Result<Vec<Address>> {
    client.request_permission().await?;
    let accounts = client.get_accounts().await?;
    if accounts.is_empty() {
        return Err(WalletError::NoAccounts);
    }
    Ok(accounts)
}
