use {
  predacct_primitives::{AddressError, ArtifactError, Rejection},
  thiserror::Error,
};

/// Final refusal reported by the ledger for a submitted transfer.
pub type LedgerError = Rejection;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
  #[error("no wallet account is connected")]
  NotConnected,

  #[error("wallet connection refused: {0}")]
  ConnectRefused(String),

  #[error(transparent)]
  Transport(#[from] WalletError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
  #[error("invalid address: {0}")]
  InvalidAddress(#[from] AddressError),

  #[error("invalid amount: {0}")]
  InvalidAmount(String),

  #[error(transparent)]
  Artifact(#[from] ArtifactError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntropyError {
  #[error("secure entropy source unavailable: {0}")]
  EntropyUnavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
  #[error("witness signing failed: {0}")]
  Signing(String),

  #[error(transparent)]
  Entropy(#[from] EntropyError),
}

/// Failures of the ledger provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
  /// The ledger refused the transaction at submission.
  #[error(transparent)]
  Rejected(Rejection),

  #[error("transaction is not known to the ledger")]
  UnknownTransaction,

  #[error("ledger stopped before the transaction result was available")]
  Dropped,

  #[error("provider transport error: {0}")]
  Transport(String),
}

/// Failures of the wallet transport or a wallet handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalletError {
  #[error("request refused by wallet: {0}")]
  Refused(String),

  #[error("wallet does not manage account {0}")]
  UnknownAccount(predacct_primitives::Address),

  #[error("wallet transport error: {0}")]
  Transport(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  #[error(transparent)]
  Connection(#[from] ConnectionError),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  Entropy(#[from] EntropyError),

  #[error(transparent)]
  Signer(#[from] SignerError),

  #[error(transparent)]
  Provider(#[from] ProviderError),

  #[error(transparent)]
  Wallet(#[from] WalletError),
}

impl From<AddressError> for Error {
  fn from(e: AddressError) -> Self {
    Error::Validation(e.into())
  }
}

impl From<ArtifactError> for Error {
  fn from(e: ArtifactError) -> Self {
    Error::Validation(e.into())
  }
}
