use {
  clap::Parser,
  humantime::Duration,
  predacct_primitives::TxParameters,
};

/// Predicate Account Devnode
///
/// Starts a single node development ledger with a local wallet and walks
/// through the life of a predicate account: derive it from a fresh key,
/// fund it from the wallet, then spend from it.
#[derive(Debug, Parser)]
pub struct SystemSettings {
  /// Network identifier
  #[clap(short, long,
    default_value = "localnet",
    value_name = "IDENTIFIER")]
  network_id: String,

  /// Block production interval
  #[clap(long, short = 't',
    value_name = "DURATION",
    default_value = "200ms")]
  block_time: Duration,

  /// Delay before the first wallet connection check
  #[clap(long,
    value_name = "DURATION",
    default_value = "200ms")]
  connect_delay: Duration,

  /// Native coins held by the local wallet at genesis
  #[clap(long, default_value = "1000000000")]
  wallet_balance: u64,

  /// Amount moved from the wallet into the predicate
  #[clap(long, short, default_value = "100000")]
  fund_amount: u64,

  /// Gas limit of the funding transfer
  #[clap(long, default_value = "164")]
  fund_gas_limit: u64,

  /// Gas price offered by every transfer
  #[clap(long, default_value = "1")]
  gas_price: u64,

  /// Gas limit of the spend transfer
  #[clap(long, default_value = "1000000")]
  spend_gas_limit: u64,

  /// Recipient of the spend, a new local account if omitted
  #[clap(long, short, value_name = "ADDRESS")]
  destination: Option<String>,

  /// Amount sent from the predicate to the destination
  #[clap(long, short, default_value = "50000")]
  amount: String,

  /// Also attempt a spend with a witness not bound to the predicate key
  #[clap(long)]
  unbound_witness: bool,

  /// Install the Prometheus metrics exporter
  #[clap(long)]
  metrics: bool,
}

impl SystemSettings {
  pub fn network_id(&self) -> &str {
    &self.network_id
  }

  pub fn block_time(&self) -> std::time::Duration {
    self.block_time.into()
  }

  pub fn connect_delay(&self) -> std::time::Duration {
    self.connect_delay.into()
  }

  pub fn wallet_balance(&self) -> u64 {
    self.wallet_balance
  }

  pub fn fund_amount(&self) -> u64 {
    self.fund_amount
  }

  pub fn funding_params(&self) -> TxParameters {
    TxParameters::new(self.gas_price, self.fund_gas_limit)
  }

  pub fn spend_params(&self) -> TxParameters {
    TxParameters::new(self.gas_price, self.spend_gas_limit)
  }

  pub fn destination(&self) -> Option<&str> {
    self.destination.as_deref()
  }

  pub fn amount(&self) -> &str {
    &self.amount
  }

  pub fn unbound_witness(&self) -> bool {
    self.unbound_witness
  }

  pub fn metrics(&self) -> bool {
    self.metrics
  }
}
