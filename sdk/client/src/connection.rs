use {
  crate::{transport::Wallet, ConnectionError, WalletError, WalletTransport},
  parking_lot::RwLock,
  predacct_primitives::Address,
  std::{sync::Arc, time::Duration},
  tokio::task::JoinHandle,
  tracing::{debug, info, warn},
};

/// Delay between application start and the first connection check,
/// giving injected wallet transports time to initialize.
pub const DEFAULT_CHECK_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
  Disconnected,

  /// Connected with the given active account.
  Connected(Address),
}

/// Tracks whether a wallet is connected and which account is active.
///
/// This is the only writer of the connection state. The state changes
/// only through [`ConnectionManager::check_connection`] and
/// [`ConnectionManager::request_connect`], transport failures leave it
/// as it was.
pub struct ConnectionManager {
  transport: Option<Arc<dyn WalletTransport>>,
  state: RwLock<ConnectionState>,
}

impl ConnectionManager {
  pub fn new(transport: Arc<dyn WalletTransport>) -> Self {
    Self {
      transport: Some(transport),
      state: RwLock::new(ConnectionState::Disconnected),
    }
  }

  /// Manager for an environment with no wallet installed.
  pub fn detached() -> Self {
    Self {
      transport: None,
      state: RwLock::new(ConnectionState::Disconnected),
    }
  }

  pub fn state(&self) -> ConnectionState {
    self.state.read().clone()
  }

  pub fn active_account(&self) -> Result<Address, ConnectionError> {
    match *self.state.read() {
      ConnectionState::Connected(account) => Ok(account),
      ConnectionState::Disconnected => Err(ConnectionError::NotConnected),
    }
  }

  /// Queries the wallet transport and records the outcome.
  ///
  /// Checking twice with no change on the wallet side yields the same
  /// state.
  pub async fn check_connection(
    &self,
  ) -> Result<ConnectionState, ConnectionError> {
    let Some(transport) = &self.transport else {
      return Ok(self.set(ConnectionState::Disconnected));
    };

    let observed = if transport.is_connected().await? {
      match transport.accounts().await?.first() {
        Some(account) => ConnectionState::Connected(*account),
        None => ConnectionState::Disconnected,
      }
    } else {
      ConnectionState::Disconnected
    };

    debug!("wallet connection check: {observed:?}");
    Ok(self.set(observed))
  }

  /// Asks the wallet to connect and makes its first account active.
  pub async fn request_connect(&self) -> Result<Address, ConnectionError> {
    let Some(transport) = &self.transport else {
      return Err(ConnectionError::ConnectRefused(
        "no wallet transport available".into(),
      ));
    };

    transport.connect().await.map_err(|e| match e {
      WalletError::Refused(reason) => ConnectionError::ConnectRefused(reason),
      e => ConnectionError::Transport(e),
    })?;

    let account = transport
      .accounts()
      .await?
      .first()
      .copied()
      .ok_or_else(|| {
        ConnectionError::ConnectRefused("wallet exposes no accounts".into())
      })?;

    info!("wallet connected with account {account}");
    self.set(ConnectionState::Connected(account));
    Ok(account)
  }

  /// Runs a connection check once `delay` has elapsed.
  pub async fn check_after(
    &self,
    delay: Duration,
  ) -> Result<ConnectionState, ConnectionError> {
    tokio::time::sleep(delay).await;
    self.check_connection().await
  }

  /// Checks the connection after `delay` and then on every `period`
  /// until the returned task is aborted.
  pub fn spawn_poller(
    self: Arc<Self>,
    delay: Duration,
    period: Duration,
  ) -> JoinHandle<()> {
    tokio::spawn(async move {
      tokio::time::sleep(delay).await;
      let mut interval = tokio::time::interval(period);
      interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
      loop {
        interval.tick().await;
        if let Err(e) = self.check_connection().await {
          warn!("wallet connection check failed: {e}");
        }
      }
    })
  }

  /// Signing handle of the active account.
  ///
  /// A wallet that refuses to hand out the active account has been
  /// disconnected since the last check.
  pub(crate) async fn wallet(&self) -> Result<Arc<dyn Wallet>, ConnectionError> {
    let account = self.active_account()?;
    let transport = self
      .transport
      .as_ref()
      .ok_or(ConnectionError::NotConnected)?;

    transport.get_wallet(&account).await.map_err(|e| match e {
      WalletError::Refused(reason) => {
        warn!("wallet refused active account {account}: {reason}");
        ConnectionError::NotConnected
      }
      e => ConnectionError::Transport(e),
    })
  }

  fn set(&self, state: ConnectionState) -> ConnectionState {
    let mut current = self.state.write();
    if *current != state {
      info!("wallet connection state: {:?} -> {state:?}", *current);
      *current = state.clone();
    }
    state
  }
}

impl std::fmt::Debug for ConnectionManager {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("ConnectionManager")
      .field("transport", &self.transport.is_some())
      .field("state", &*self.state.read())
      .finish()
  }
}
