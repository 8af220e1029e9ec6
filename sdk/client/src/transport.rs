use {
  crate::{ProviderError, WalletError},
  async_trait::async_trait,
  predacct_primitives::{
    Address,
    AssetId,
    Authorization,
    Receipt,
    Transaction,
    Transfer,
    TxId,
  },
  std::sync::Arc,
};

/// Static facts about the ledger a provider talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainInfo {
  pub network_id: String,

  /// Asset fees are paid in and the default asset of transfers.
  pub base_asset: AssetId,

  /// Lowest gas price the ledger accepts.
  pub min_gas_price: u64,

  /// Height of the most recent block.
  pub height: u64,
}

/// Connection to a ledger node.
///
/// Each method is a single request/response exchange. Failures of the
/// exchange itself are reported as [`ProviderError::Transport`], a
/// transaction refused on submission as [`ProviderError::Rejected`].
#[async_trait]
pub trait Provider: Send + Sync {
  async fn chain_info(&self) -> Result<ChainInfo, ProviderError>;

  /// Balance of an address in a given asset. Addresses that were never
  /// funded have a zero balance.
  async fn balance(
    &self,
    address: &Address,
    asset: &AssetId,
  ) -> Result<u64, ProviderError>;

  /// Nonce the next transaction from this address must carry.
  async fn nonce(&self, address: &Address) -> Result<u64, ProviderError>;

  async fn submit(&self, tx: Transaction) -> Result<TxId, ProviderError>;

  /// Resolves once the transaction reached finality, with either a
  /// success or a failure status.
  async fn await_result(&self, tx: &TxId) -> Result<Receipt, ProviderError>;
}

/// A wallet that holds the private keys of wallet accounts.
#[async_trait]
pub trait WalletTransport: Send + Sync {
  async fn is_connected(&self) -> Result<bool, WalletError>;

  /// Accounts exposed to this application, the active one first.
  async fn accounts(&self) -> Result<Vec<Address>, WalletError>;

  /// Asks the wallet for permission to access its accounts. Fails with
  /// [`WalletError::Refused`] when the request is declined.
  async fn connect(&self) -> Result<(), WalletError>;

  async fn get_wallet(
    &self,
    account: &Address,
  ) -> Result<Arc<dyn Wallet>, WalletError>;
}

/// Handle to a single wallet account able to authorize transfers out of
/// that account.
#[async_trait]
pub trait Wallet: Send + Sync {
  fn address(&self) -> Address;

  async fn sign(&self, transfer: &Transfer) -> Result<Authorization, WalletError>;
}
