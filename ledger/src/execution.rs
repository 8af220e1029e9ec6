use {
  crate::{Account, Overlay, PredicateContext, Programs, State, StateDiff},
  ed25519_dalek::{PublicKey, Verifier},
  predacct_primitives::{
    Address,
    AssetId,
    Authorization,
    Rejection,
    Transaction,
  },
  rayon::prelude::*,
  std::collections::BTreeMap,
  thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
  #[error("Transfer amount must be positive")]
  ZeroAmount,

  #[error("Gas price {0} is below the minimum of {1}")]
  GasPriceTooLow(u64, u64),

  #[error("Transfer needs {0} gas but its limit is {1}")]
  GasLimitExceeded(u64, u64),

  #[error("Invalid wallet signature")]
  InvalidSignature,

  #[error("Predicate instance does not derive the source address {0}")]
  SourceMismatch(Address),

  #[error("No program registered for predicate code")]
  UnknownPredicate,

  #[error("Rejected by predicate")]
  PredicateRejected,

  #[error("Invalid nonce {found}, expected {expected}")]
  NonceMismatch { expected: u64, found: u64 },

  #[error("Insufficient {asset:?} balance: required {required}, available {available}")]
  InsufficientBalance {
    asset: AssetId,
    required: u64,
    available: u64,
  },

  #[error("Arithmetic overflow")]
  Overflow,
}

impl From<Error> for Rejection {
  fn from(e: Error) -> Self {
    match e {
      Error::PredicateRejected | Error::SourceMismatch(_) => {
        Rejection::PredicateRejected
      }
      Error::InsufficientBalance {
        required,
        available,
        ..
      } => Rejection::InsufficientBalance {
        required,
        available,
      },
      e => Rejection::TransferRejected(e.to_string()),
    }
  }
}

/// Gas accounting rules of a ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSchedule {
  /// Transactions offering a lower gas price are rejected.
  pub min_gas_price: u64,

  /// Gas used by every transfer.
  pub transfer_gas: u64,

  /// Additional gas used to evaluate a predicate.
  pub predicate_gas: u64,
}

impl Default for GasSchedule {
  fn default() -> Self {
    Self {
      min_gas_price: 1,
      transfer_gas: 100,
      predicate_gas: 50,
    }
  }
}

/// Checks everything about a transaction that does not depend on
/// ledger state and returns the amount of gas it uses.
///
/// This covers fee parameters and the authorization: the wallet
/// signature or the predicate evaluated against the witness.
pub fn authorize(
  tx: &Transaction,
  programs: &Programs,
  schedule: &GasSchedule,
) -> Result<u64, Error> {
  let transfer = &tx.transfer;
  if transfer.amount == 0 {
    return Err(Error::ZeroAmount);
  }

  if transfer.params.gas_price < schedule.min_gas_price {
    return Err(Error::GasPriceTooLow(
      transfer.params.gas_price,
      schedule.min_gas_price,
    ));
  }

  let gas_used = match &tx.authorization {
    Authorization::Signature(_) => schedule.transfer_gas,
    Authorization::Predicate { .. } => schedule
      .transfer_gas
      .checked_add(schedule.predicate_gas)
      .ok_or(Error::Overflow)?,
  };

  if gas_used > transfer.params.gas_limit {
    return Err(Error::GasLimitExceeded(gas_used, transfer.params.gas_limit));
  }

  let signing_hash = transfer.signing_hash();
  match &tx.authorization {
    Authorization::Signature(signature) => {
      let pubkey = PublicKey::from_bytes(transfer.source.as_ref())
        .map_err(|_| Error::InvalidSignature)?;
      pubkey
        .verify(&signing_hash, signature)
        .map_err(|_| Error::InvalidSignature)?;
    }
    Authorization::Predicate {
      artifact,
      configurable,
      witness,
    } => {
      if artifact.address(configurable) != transfer.source {
        return Err(Error::SourceMismatch(transfer.source));
      }

      let program = programs
        .get(&artifact.code_hash())
        .ok_or(Error::UnknownPredicate)?;

      let context = PredicateContext {
        configurable,
        witness,
        signing_hash,
      };

      if !program.evaluate(&context) {
        return Err(Error::PredicateRejected);
      }
    }
  }

  Ok(gas_used)
}

/// Executes an authorized transaction against the accounts visible
/// through `lookup`.
///
/// Debits `amount` of the transferred asset and the fee in the native
/// asset from the source, credits `amount` to the destination and bumps
/// the source nonce. Nothing is written unless every check passes.
fn settle(
  tx: &Transaction,
  gas_used: u64,
  lookup: impl Fn(&Address) -> Option<Account>,
) -> Result<StateDiff, Error> {
  let transfer = &tx.transfer;
  let fee = gas_used
    .checked_mul(transfer.params.gas_price)
    .ok_or(Error::Overflow)?;

  let mut source = lookup(&transfer.source).unwrap_or_default();
  if source.nonce != transfer.nonce {
    return Err(Error::NonceMismatch {
      expected: source.nonce,
      found: transfer.nonce,
    });
  }

  let mut required = BTreeMap::<AssetId, u64>::new();
  required.insert(AssetId::NATIVE, fee);
  let entry = required.entry(transfer.asset).or_insert(0);
  *entry = entry.checked_add(transfer.amount).ok_or(Error::Overflow)?;

  for (asset, needed) in required {
    let available = source.balance(&asset);
    if available < needed {
      return Err(Error::InsufficientBalance {
        asset,
        required: needed,
        available,
      });
    }
    source.balances.insert(asset, available - needed);
  }
  source.nonce += 1;

  let mut diff = StateDiff::default();
  diff.set(transfer.source, source);

  // reads through the diff, so a transfer to self sees the debit
  let mut destination: Account = diff
    .get(&transfer.destination)
    .or_else(|| lookup(&transfer.destination))
    .unwrap_or_default();

  let credited = destination
    .balance(&transfer.asset)
    .checked_add(transfer.amount)
    .ok_or(Error::Overflow)?;
  destination.balances.insert(transfer.asset, credited);
  diff.set(transfer.destination, destination);

  Ok(diff)
}

/// Executes a single transaction.
///
/// Returns the StateDiff that applies the transfer if the transaction
/// is authorized and the source can cover it, otherwise the reason it
/// was refused.
pub fn execute(
  tx: &Transaction,
  state: &dyn State,
  programs: &Programs,
  schedule: &GasSchedule,
) -> Result<StateDiff, Error> {
  let gas_used = authorize(tx, programs, schedule)?;
  settle(tx, gas_used, |address| state.get(address))
}

/// Executes an ordered batch of transactions.
///
/// Authorizations are checked in parallel, balances are then settled
/// in order so each transaction observes the effects of its
/// predecessors. Returns the merged diff of all accepted transactions
/// and one result per input transaction.
pub fn execute_many(
  txs: &[Transaction],
  state: &dyn State,
  programs: &Programs,
  schedule: &GasSchedule,
) -> (StateDiff, Vec<Result<(), Error>>) {
  let authorized: Vec<_> = txs
    .par_iter()
    .map(|tx| authorize(tx, programs, schedule))
    .collect();

  let mut accumulated = StateDiff::default();
  let mut results = Vec::with_capacity(txs.len());

  for (tx, gas_used) in txs.iter().zip(authorized) {
    let settled = gas_used.and_then(|gas_used| {
      let view = Overlay::new(state, &accumulated);
      settle(tx, gas_used, |address| view.get(address))
    });

    results.push(match settled {
      Ok(diff) => {
        accumulated.apply(diff);
        Ok(())
      }
      Err(e) => Err(e),
    });
  }

  (accumulated, results)
}
