use {
  crate::{b58::ToBase58String, Transaction, TxId},
  multihash::{Multihash, MultihashDigest},
  once_cell::sync::OnceCell,
  serde::{Deserialize, Serialize},
};

#[derive(Clone, Serialize, Deserialize)]
pub struct Block {
  pub height: u64,
  pub parent: Multihash,
  pub transactions: Vec<Transaction>,

  #[serde(skip)]
  hash_cache: OnceCell<TxId>,
}

impl Block {
  pub fn new(parent: &Block, transactions: Vec<Transaction>) -> Self {
    Self {
      height: parent.height + 1,
      parent: *parent.hash(),
      transactions,
      hash_cache: OnceCell::new(),
    }
  }

  pub fn zero() -> Self {
    Self {
      height: 0,
      parent: Multihash::default(),
      transactions: vec![],
      hash_cache: OnceCell::new(),
    }
  }

  pub fn hash(&self) -> &Multihash {
    self.hash_cache.get_or_init(|| {
      let mut preimage = self.height.to_le_bytes().to_vec();
      preimage.extend_from_slice(&self.parent.to_bytes());
      for tx in &self.transactions {
        preimage.extend_from_slice(&tx.hash().to_bytes());
      }
      multihash::Code::Sha3_256.digest(&preimage)
    })
  }
}

impl std::fmt::Debug for Block {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Block")
      .field("height", &self.height)
      .field("parent", &self.parent.to_b58())
      .field("hash", &self.hash().to_b58())
      .field("transactions", &self.transactions.len())
      .finish()
  }
}
