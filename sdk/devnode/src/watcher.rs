use {
  dashmap::DashMap,
  predacct_primitives::{Receipt, ToBase58String, TxId},
  tokio::sync::oneshot::{self, Receiver, Sender},
  tracing::error,
};

/// Keeps receipts of finalized transactions and lets callers wait for a
/// transaction to be finalized.
#[derive(Default)]
pub struct ReceiptWatcher {
  receipts: DashMap<TxId, Receipt>,
  watchlist: DashMap<TxId, Vec<Sender<Receipt>>>,
}

impl ReceiptWatcher {
  pub fn get(&self, tx: &TxId) -> Option<Receipt> {
    self.receipts.get(tx).map(|r| r.value().clone())
  }

  /// Returns the receipt if the transaction is already final, otherwise
  /// a channel that receives it once published.
  pub fn watch(&self, tx: TxId) -> Result<Receipt, Receiver<Receipt>> {
    let (sender, receiver) = oneshot::channel();
    self.watchlist.entry(tx).or_default().push(sender);

    // receipts are stored before watchers are signalled, so a receipt
    // published concurrently is observed either here or on the channel.
    match self.get(&tx) {
      Some(receipt) => {
        self.watchlist.remove(&tx);
        Ok(receipt)
      }
      None => Err(receiver),
    }
  }

  pub fn publish(&self, receipt: Receipt) {
    let tx = receipt.tx;
    self.receipts.insert(tx, receipt.clone());
    if let Some((_, signals)) = self.watchlist.remove(&tx) {
      for signal in signals {
        if signal.send(receipt.clone()).is_err() {
          error!("Failed signalling awaited transaction {}", tx.to_b58());
        }
      }
    }
  }
}
