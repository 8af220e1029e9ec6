use {
  crate::TxId,
  serde::{Deserialize, Serialize},
  thiserror::Error,
};

/// Reasons a ledger refuses a transaction.
///
/// A refused transaction leaves all account state untouched, including
/// the fee-paying source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum Rejection {
  #[error("predicate rejected the witness")]
  PredicateRejected,

  #[error("insufficient balance: required {required}, available {available}")]
  InsufficientBalance { required: u64, available: u64 },

  #[error("transfer rejected: {0}")]
  TransferRejected(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
  Success,
  Failure(Rejection),
}

/// Terminal result of a transaction that reached finality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
  pub tx: TxId,
  pub height: u64,
  pub status: Status,
}

impl Receipt {
  pub fn is_success(&self) -> bool {
    matches!(self.status, Status::Success)
  }
}
