use {
  crate::{Error, Provider, ProviderError, TransferOutcome},
  predacct_primitives::{
    Address,
    AssetId,
    Status,
    ToBase58String,
    Transaction,
  },
  tracing::{info, warn},
};

/// Submits a transaction, waits for finality and classifies the result.
///
/// On success the balance of `watched` in `asset` is read back and
/// reported with the outcome. Once a receipt is in, the result is always
/// a classified outcome.
pub(crate) async fn send_and_confirm(
  provider: &dyn Provider,
  tx: Transaction,
  watched: &Address,
  asset: &AssetId,
) -> Result<TransferOutcome, Error> {
  let hash = *tx.hash();
  match provider.submit(tx).await {
    Ok(_) => info!("transaction {} sent", hash.to_b58()),
    Err(ProviderError::Rejected(reason)) => {
      warn!("transaction {} refused on submission: {reason}", hash.to_b58());
      return Ok(TransferOutcome::Failure { tx: hash, reason });
    }
    Err(e) => return Err(e.into()),
  }

  let receipt = provider.await_result(&hash).await?;
  match receipt.status {
    Status::Success => {
      // the transfer is final at this point, a failed read must not
      // turn it into an error.
      let balance = match provider.balance(watched, asset).await {
        Ok(balance) => Some(balance),
        Err(e) => {
          warn!("reading {watched} balance after finality failed: {e}");
          None
        }
      };
      info!(
        "transaction {} final at height {}, {watched} balance: {balance:?}",
        hash.to_b58(),
        receipt.height
      );
      Ok(TransferOutcome::Success { tx: hash, balance })
    }
    Status::Failure(reason) => {
      warn!(
        "transaction {} failed at height {}: {reason}",
        hash.to_b58(),
        receipt.height
      );
      Ok(TransferOutcome::Failure { tx: hash, reason })
    }
  }
}
