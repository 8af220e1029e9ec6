use {
  predacct_primitives::{Address, AssetId},
  serde::{Deserialize, Serialize},
  std::collections::{BTreeMap, HashMap},
};

/// Balances and replay counter of a single account.
///
/// Accounts that were never written to are indistinguishable from
/// accounts with no balances and a zero nonce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
  pub balances: BTreeMap<AssetId, u64>,
  pub nonce: u64,
}

impl Account {
  pub fn with_balance(asset: AssetId, amount: u64) -> Self {
    Self {
      balances: [(asset, amount)].into_iter().collect(),
      nonce: 0,
    }
  }

  pub fn balance(&self, asset: &AssetId) -> u64 {
    self.balances.get(asset).copied().unwrap_or(0)
  }
}

/// Represents a change in ledger accounts state.
///
/// State diffs are meant to be accumulated and logically the entire
/// state of the ledger is the result of cumulative application of
/// consecutive state diffs.
///
/// A transaction produces a statediff, blocks produce state diffs
/// which are all its transactions state diffs merged together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDiff {
  upserts: BTreeMap<Address, Account>,
}

impl StateDiff {
  /// Inserts or updates an account under a given address.
  ///
  /// If the state diff had an account stored under this address
  /// then the old value is returned, otherwise `None` is returned.
  pub fn set(&mut self, address: Address, account: Account) -> Option<Account> {
    self.upserts.insert(address, account)
  }

  /// Merges a state diff with a newer diff.
  ///
  /// Applying the resulting diff is equivalent to
  /// applyting the two merged diff consecutively on
  /// any state store.
  pub fn merge(self, newer: StateDiff) -> StateDiff {
    let mut upserts = self.upserts;
    upserts.extend(newer.upserts);
    StateDiff { upserts }
  }

  /// Iterate over all account changes in a state diff.
  pub fn iter(&self) -> impl Iterator<Item = (&Address, &Account)> {
    self.upserts.iter()
  }

  pub fn is_empty(&self) -> bool {
    self.upserts.is_empty()
  }
}

impl State for StateDiff {
  fn get(&self, address: &Address) -> Option<Account> {
    self.upserts.get(address).cloned()
  }

  fn apply(&mut self, diff: StateDiff) {
    *self = std::mem::take(self).merge(diff);
  }
}

pub trait State {
  fn get(&self, address: &Address) -> Option<Account>;
  fn apply(&mut self, diff: StateDiff);
}

#[derive(Debug, Default)]
pub struct InMemoryStateStore {
  data: HashMap<Address, Account>,
}

impl InMemoryStateStore {
  pub fn iter(&self) -> impl Iterator<Item = (&Address, &Account)> {
    self.data.iter()
  }
}

impl State for InMemoryStateStore {
  fn get(&self, address: &Address) -> Option<Account> {
    self.data.get(address).cloned()
  }

  fn apply(&mut self, diff: StateDiff) {
    for (k, v) in diff.upserts {
      self.data.insert(k, v);
    }
  }
}

/// Read-only view of a base state with pending changes layered on top.
///
/// Used while executing a block, so every transaction observes the
/// effects of the transactions ordered before it.
pub struct Overlay<'a> {
  base: &'a dyn State,
  pending: &'a StateDiff,
}

impl<'a> Overlay<'a> {
  pub fn new(base: &'a dyn State, pending: &'a StateDiff) -> Self {
    Self { base, pending }
  }

  pub fn get(&self, address: &Address) -> Option<Account> {
    self.pending.get(address).or_else(|| self.base.get(address))
  }
}
