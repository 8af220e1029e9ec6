use {
  crate::{mempool::Mempool, watcher::ReceiptWatcher},
  async_trait::async_trait,
  parking_lot::Mutex,
  predacct_client_sdk::{ChainInfo, Provider, ProviderError},
  predacct_ledger::{
    authorize,
    Account,
    GasSchedule,
    InMemoryStateStore,
    Programs,
    State,
    StateDiff,
  },
  predacct_primitives::{
    Address,
    AssetId,
    Block,
    Receipt,
    Rejection,
    Status,
    ToBase58String,
    Transaction,
    TxId,
  },
  std::{
    sync::{Arc, Weak},
    time::Duration,
  },
  tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
  },
  tracing::{debug, info, warn},
};

#[derive(Debug, Clone)]
pub struct DevnetConfig {
  pub network_id: String,

  /// Block production interval.
  pub block_time: Duration,

  pub schedule: GasSchedule,

  /// Native coin balances present from the start.
  pub genesis: Vec<(Address, u64)>,
}

impl Default for DevnetConfig {
  fn default() -> Self {
    Self {
      network_id: "localnet".into(),
      block_time: Duration::from_millis(200),
      schedule: GasSchedule::default(),
      genesis: vec![],
    }
  }
}

struct Chain {
  state: InMemoryStateStore,
  last: Block,
  mempool: Mempool,
}

struct Inner {
  config: DevnetConfig,
  programs: Programs,
  chain: Mutex<Chain>,
  watcher: ReceiptWatcher,
}

/// A single node ledger running inside the current process.
///
/// There is no consensus, blocks are produced from the mempool either on
/// a timer started with [`Devnet::spawn`] or on demand with
/// [`Devnet::produce_block`]. Handles are cheap to clone and share the
/// same chain.
#[derive(Clone)]
pub struct Devnet {
  inner: Arc<Inner>,
}

impl Devnet {
  pub fn new(config: DevnetConfig, programs: Programs) -> Self {
    let mut state = InMemoryStateStore::default();
    let mut genesis = StateDiff::default();
    for (address, amount) in &config.genesis {
      genesis.set(*address, Account::with_balance(AssetId::NATIVE, *amount));
    }
    state.apply(genesis);

    info!(
      "devnet {} started with {} genesis accounts and programs {programs:?}",
      config.network_id,
      config.genesis.len()
    );

    Self {
      inner: Arc::new(Inner {
        config,
        programs,
        chain: Mutex::new(Chain {
          state,
          last: Block::zero(),
          mempool: Mempool::default(),
        }),
        watcher: ReceiptWatcher::default(),
      }),
    }
  }

  /// Starts producing a block every `block_time`.
  ///
  /// The task stops by itself once all handles to this devnet are
  /// dropped.
  pub fn spawn(&self) -> JoinHandle<()> {
    let inner: Weak<Inner> = Arc::downgrade(&self.inner);
    let period = self.inner.config.block_time.max(Duration::from_millis(1));

    tokio::spawn(async move {
      let mut interval = interval(period);
      interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
      loop {
        interval.tick().await;
        match inner.upgrade() {
          Some(inner) => {
            Devnet { inner }.produce_block();
          }
          None => break,
        }
      }
    })
  }

  /// Executes everything in the mempool and appends the resulting block.
  pub fn produce_block(&self) -> Block {
    let mut guard = self.inner.chain.lock();
    let chain = &mut *guard;

    let (block, statediff, results) = chain.mempool.produce(
      &chain.state,
      &self.inner.programs,
      &self.inner.config.schedule,
      &chain.last,
    );

    let mutations = statediff.iter().count();
    chain.state.apply(statediff);

    let mut failed = 0u64;
    for (tx, result) in block.transactions.iter().zip(results) {
      let status = match result {
        Ok(()) => Status::Success,
        Err(e) => {
          failed += 1;
          warn!("transaction {} failed: {e}", tx.hash().to_b58());
          Status::Failure(e.into())
        }
      };

      self.inner.watcher.publish(Receipt {
        tx: *tx.hash(),
        height: block.height,
        status,
      });
    }

    let total = block.transactions.len() as u64;
    metrics::increment_counter!("devnet_blocks_produced");
    metrics::counter!("devnet_transactions_succeeded", total - failed);
    metrics::counter!("devnet_transactions_failed", failed);

    if total == 0 {
      debug!("produced empty block {}", block.height);
    } else {
      info!(
        "produced block {} with {total} transactions and {mutations} \
         account mutations",
        block.height
      );
    }

    chain.last = block.clone();
    block
  }

  pub fn height(&self) -> u64 {
    self.inner.chain.lock().last.height
  }

  pub fn receipt(&self, tx: &TxId) -> Option<Receipt> {
    self.inner.watcher.get(tx)
  }

  fn account(&self, address: &Address) -> Account {
    self
      .inner
      .chain
      .lock()
      .state
      .get(address)
      .unwrap_or_default()
  }
}

#[async_trait]
impl Provider for Devnet {
  async fn chain_info(&self) -> Result<ChainInfo, ProviderError> {
    Ok(ChainInfo {
      network_id: self.inner.config.network_id.clone(),
      base_asset: AssetId::NATIVE,
      min_gas_price: self.inner.config.schedule.min_gas_price,
      height: self.height(),
    })
  }

  async fn balance(
    &self,
    address: &Address,
    asset: &AssetId,
  ) -> Result<u64, ProviderError> {
    Ok(self.account(address).balance(asset))
  }

  async fn nonce(&self, address: &Address) -> Result<u64, ProviderError> {
    Ok(self.account(address).nonce)
  }

  /// Authorization is checked on submission, balances and nonces when
  /// the transaction is included in a block.
  async fn submit(&self, tx: Transaction) -> Result<TxId, ProviderError> {
    let hash = *tx.hash();
    if let Err(e) =
      authorize(&tx, &self.inner.programs, &self.inner.config.schedule)
    {
      warn!("refused transaction {}: {e}", hash.to_b58());
      return Err(ProviderError::Rejected(e.into()));
    }

    let mut chain = self.inner.chain.lock();
    if chain.mempool.contains(&hash) || self.inner.watcher.get(&hash).is_some()
    {
      return Err(ProviderError::Rejected(Rejection::TransferRejected(
        "transaction already submitted".into(),
      )));
    }

    debug!("accepted transaction {tx:?}");
    chain.mempool.consume(tx);
    Ok(hash)
  }

  async fn await_result(&self, tx: &TxId) -> Result<Receipt, ProviderError> {
    let pending = {
      // blocks are produced under this lock, so a transaction is either
      // in the mempool or has a receipt.
      let chain = self.inner.chain.lock();
      if let Some(receipt) = self.inner.watcher.get(tx) {
        return Ok(receipt);
      }

      if !chain.mempool.contains(tx) {
        return Err(ProviderError::UnknownTransaction);
      }

      match self.inner.watcher.watch(*tx) {
        Ok(receipt) => return Ok(receipt),
        Err(receiver) => receiver,
      }
    };

    pending.await.map_err(|_| ProviderError::Dropped)
  }
}
