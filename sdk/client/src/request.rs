use {
  crate::{LedgerError, ValidationError},
  predacct_primitives::{Address, AssetId, TxId},
};

/// A validated request to move funds out of a predicate account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
  destination: Address,
  amount: u64,
  asset: AssetId,
}

impl TransferRequest {
  /// Transfer of `amount` native coins to `destination`.
  pub fn new(destination: Address, amount: u64) -> Result<Self, ValidationError> {
    if amount == 0 {
      return Err(ValidationError::InvalidAmount(
        "amount must be positive".into(),
      ));
    }

    Ok(Self {
      destination,
      amount,
      asset: AssetId::NATIVE,
    })
  }

  /// Parses user supplied text. The destination may be base58 or `0x`
  /// prefixed hex, the amount a positive integer in base units.
  pub fn parse(destination: &str, amount: &str) -> Result<Self, ValidationError> {
    let destination: Address = destination.parse()?;
    let amount = amount.trim();
    let amount: u64 = amount.parse().map_err(|_| {
      ValidationError::InvalidAmount(format!(
        "'{amount}' is not a positive whole number"
      ))
    })?;
    Self::new(destination, amount)
  }

  pub fn with_asset(self, asset: AssetId) -> Self {
    Self { asset, ..self }
  }

  pub fn destination(&self) -> Address {
    self.destination
  }

  pub fn amount(&self) -> u64 {
    self.amount
  }

  pub fn asset(&self) -> AssetId {
    self.asset
  }
}

/// Classified result of a transfer that reached the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
  /// The transfer is final. `balance` is the balance of the credited
  /// address read after finality, `None` when that read failed.
  Success { tx: TxId, balance: Option<u64> },

  /// The ledger refused the transfer and nothing was applied.
  Failure { tx: TxId, reason: LedgerError },
}

impl TransferOutcome {
  pub fn is_success(&self) -> bool {
    matches!(self, TransferOutcome::Success { .. })
  }

  pub fn tx(&self) -> &TxId {
    match self {
      TransferOutcome::Success { tx, .. } => tx,
      TransferOutcome::Failure { tx, .. } => tx,
    }
  }

  pub fn into_result(self) -> Result<Option<u64>, LedgerError> {
    match self {
      TransferOutcome::Success { balance, .. } => Ok(balance),
      TransferOutcome::Failure { reason, .. } => Err(reason),
    }
  }
}
