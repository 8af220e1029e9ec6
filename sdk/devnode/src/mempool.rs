use {
  predacct_ledger::{execute_many, Error, GasSchedule, Programs, State, StateDiff},
  predacct_primitives::{Block, Transaction, TxId},
};

/// Transactions accepted for inclusion in the next block, in arrival
/// order.
#[derive(Default)]
pub struct Mempool {
  txs: Vec<Transaction>,
}

impl Mempool {
  pub fn consume(&mut self, tx: Transaction) {
    self.txs.push(tx);
  }

  pub fn contains(&self, hash: &TxId) -> bool {
    self.txs.iter().any(|tx| tx.hash() == hash)
  }

  pub fn len(&self) -> usize {
    self.txs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.txs.is_empty()
  }

  /// Drains the mempool into a block on top of `parent`.
  ///
  /// Returns the block, the statediff of its successful transactions and
  /// one execution result per transaction in block order.
  pub fn produce(
    &mut self,
    state: &dyn State,
    programs: &Programs,
    schedule: &GasSchedule,
    parent: &Block,
  ) -> (Block, StateDiff, Vec<Result<(), Error>>) {
    let txs = std::mem::take(&mut self.txs);
    let (statediff, results) = execute_many(&txs, state, programs, schedule);
    (Block::new(parent, txs), statediff, results)
  }
}
