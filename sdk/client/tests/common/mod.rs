#![allow(dead_code)]

use {
  async_trait::async_trait,
  ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer},
  parking_lot::Mutex,
  predacct_client_sdk::{
    ChainInfo,
    ConnectionManager,
    Provider,
    ProviderError,
    Session,
    Wallet,
    WalletError,
    WalletTransport,
  },
  predacct_primitives::{
    Address,
    AssetId,
    Authorization,
    Receipt,
    Rejection,
    Status,
    Transaction,
    Transfer,
    TxId,
  },
  std::{
    collections::HashMap,
    sync::{
      atomic::{AtomicBool, Ordering},
      Arc,
    },
  },
};

/// How the mock ledger treats the next submitted transactions.
#[derive(Debug, Clone)]
pub enum Verdict {
  Accept,
  /// Accepts and finalizes, then fails the balance read that follows
  /// finality.
  AcceptThenBalanceDown,
  RejectOnSubmit(Rejection),
  FailAtFinality(Rejection),
  TransportDown,
}

/// Ledger provider that records every call and credits destinations of
/// accepted transfers.
pub struct MockProvider {
  calls: Mutex<Vec<&'static str>>,
  balances: Mutex<HashMap<(Address, AssetId), u64>>,
  balance_reads: Mutex<Vec<AssetId>>,
  submitted: Mutex<Vec<Transaction>>,
  verdict: Mutex<Verdict>,
}

impl MockProvider {
  pub fn new() -> Arc<Self> {
    Arc::new(Self {
      calls: Mutex::new(vec![]),
      balances: Mutex::new(HashMap::new()),
      balance_reads: Mutex::new(vec![]),
      submitted: Mutex::new(vec![]),
      verdict: Mutex::new(Verdict::Accept),
    })
  }

  pub fn set_verdict(&self, verdict: Verdict) {
    *self.verdict.lock() = verdict;
  }

  pub fn credit(&self, address: Address, asset: AssetId, amount: u64) {
    *self.balances.lock().entry((address, asset)).or_default() += amount;
  }

  /// Assets of all balance reads, in call order.
  pub fn balance_reads(&self) -> Vec<AssetId> {
    self.balance_reads.lock().clone()
  }

  pub fn calls(&self) -> Vec<&'static str> {
    self.calls.lock().clone()
  }

  pub fn submitted(&self) -> Vec<Transaction> {
    self.submitted.lock().clone()
  }

  fn record(&self, call: &'static str) -> Result<Verdict, ProviderError> {
    self.calls.lock().push(call);
    match self.verdict.lock().clone() {
      Verdict::TransportDown => {
        Err(ProviderError::Transport("connection reset".into()))
      }
      verdict => Ok(verdict),
    }
  }
}

#[async_trait]
impl Provider for MockProvider {
  async fn chain_info(&self) -> Result<ChainInfo, ProviderError> {
    self.record("chain_info")?;
    Ok(ChainInfo {
      network_id: "mocknet".into(),
      base_asset: AssetId::NATIVE,
      min_gas_price: 1,
      height: 0,
    })
  }

  async fn balance(
    &self,
    address: &Address,
    asset: &AssetId,
  ) -> Result<u64, ProviderError> {
    let finalized = self.calls().last() == Some(&"await_result");
    if let Verdict::AcceptThenBalanceDown = self.record("balance")? {
      if finalized {
        return Err(ProviderError::Transport("connection reset".into()));
      }
    }

    self.balance_reads.lock().push(*asset);
    Ok(
      self
        .balances
        .lock()
        .get(&(*address, *asset))
        .copied()
        .unwrap_or(0),
    )
  }

  async fn nonce(&self, _: &Address) -> Result<u64, ProviderError> {
    self.record("nonce")?;
    Ok(0)
  }

  async fn submit(&self, tx: Transaction) -> Result<TxId, ProviderError> {
    let verdict = self.record("submit")?;
    if let Verdict::RejectOnSubmit(reason) = verdict {
      return Err(ProviderError::Rejected(reason));
    }

    let hash = *tx.hash();
    if let Verdict::Accept | Verdict::AcceptThenBalanceDown = verdict {
      let transfer = &tx.transfer;
      self.credit(transfer.destination, transfer.asset, transfer.amount);
    }
    self.submitted.lock().push(tx);
    Ok(hash)
  }

  async fn await_result(&self, tx: &TxId) -> Result<Receipt, ProviderError> {
    let status = match self.record("await_result")? {
      Verdict::FailAtFinality(reason) => Status::Failure(reason),
      _ => Status::Success,
    };

    Ok(Receipt {
      tx: *tx,
      height: 1,
      status,
    })
  }
}

pub fn keypair(seed: u8) -> Keypair {
  let secret = SecretKey::from_bytes(&[seed; 32]).unwrap();
  let public: PublicKey = (&secret).into();
  Keypair { secret, public }
}

/// Wallet transport holding a single account.
pub struct MockTransport {
  keypair: Arc<Keypair>,
  connected: AtomicBool,
  approve: AtomicBool,
  broken: AtomicBool,
}

impl MockTransport {
  pub fn new(connected: bool, approve: bool) -> Arc<Self> {
    Arc::new(Self {
      keypair: Arc::new(keypair(7)),
      connected: AtomicBool::new(connected),
      approve: AtomicBool::new(approve),
      broken: AtomicBool::new(false),
    })
  }

  pub fn account(&self) -> Address {
    self.keypair.public.into()
  }

  pub fn set_connected(&self, connected: bool) {
    self.connected.store(connected, Ordering::SeqCst);
  }

  pub fn set_broken(&self, broken: bool) {
    self.broken.store(broken, Ordering::SeqCst);
  }

  fn check(&self) -> Result<(), WalletError> {
    if self.broken.load(Ordering::SeqCst) {
      return Err(WalletError::Transport("extension crashed".into()));
    }
    Ok(())
  }
}

#[async_trait]
impl WalletTransport for MockTransport {
  async fn is_connected(&self) -> Result<bool, WalletError> {
    self.check()?;
    Ok(self.connected.load(Ordering::SeqCst))
  }

  async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
    self.check()?;
    Ok(vec![self.account()])
  }

  async fn connect(&self) -> Result<(), WalletError> {
    self.check()?;
    if !self.approve.load(Ordering::SeqCst) {
      return Err(WalletError::Refused("user declined".into()));
    }
    self.set_connected(true);
    Ok(())
  }

  async fn get_wallet(
    &self,
    account: &Address,
  ) -> Result<Arc<dyn Wallet>, WalletError> {
    self.check()?;
    if !self.connected.load(Ordering::SeqCst) {
      return Err(WalletError::Refused("wallet is not connected".into()));
    }
    if *account != self.account() {
      return Err(WalletError::UnknownAccount(*account));
    }
    Ok(Arc::new(MockWallet(self.keypair.clone())))
  }
}

struct MockWallet(Arc<Keypair>);

#[async_trait]
impl Wallet for MockWallet {
  fn address(&self) -> Address {
    self.0.public.into()
  }

  async fn sign(&self, transfer: &Transfer) -> Result<Authorization, WalletError> {
    Ok(Authorization::Signature(self.0.sign(&transfer.signing_hash())))
  }
}

/// Session over the mock provider, optionally with a connected wallet.
pub async fn session(
  provider: Arc<MockProvider>,
  transport: Arc<MockTransport>,
) -> anyhow::Result<Session> {
  let connection = Arc::new(ConnectionManager::new(transport));
  connection.check_connection().await?;
  Ok(Session::new(provider, connection))
}
