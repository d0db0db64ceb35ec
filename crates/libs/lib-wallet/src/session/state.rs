use shared::dto::wallet::WalletSnapshot;

/// Connection phase of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connection {
    #[default]
    Disconnected,
    /// Transient: a `connect()` call is waiting on the provider.
    Connecting,
    Connected,
}

/// Everything the view needs, published after every change.
///
/// Invariant: `connection == Connected` implies a non-empty `snapshot.address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub connection: Connection,
    /// Meaningful only while connected; the empty default otherwise.
    pub snapshot: WalletSnapshot,
    /// Banner text. Cleared when a new connect attempt starts.
    pub last_error: Option<String>,
    /// Set once at startup.
    pub provider_available: bool,
    /// Mirror of the persisted "was connected" flag.
    pub persisted_connected: bool,
}

impl SessionState {
    pub fn is_connected(&self) -> bool {
        self.connection == Connection::Connected
    }

    pub fn is_connecting(&self) -> bool {
        self.connection == Connection::Connecting
    }

    pub fn has_error(&self) -> bool {
        self.last_error.is_some()
    }
}
