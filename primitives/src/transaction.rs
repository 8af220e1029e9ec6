use {
  crate::{
    sha3,
    Address,
    AssetId,
    ConfigurableParameter,
    PredicateArtifact,
    TxId,
    WitnessPayload,
  },
  ed25519_dalek::Signature,
  multihash::MultihashDigest,
  once_cell::sync::OnceCell,
  serde::{Deserialize, Serialize},
  std::fmt::Debug,
};

/// Fee parameters attached to every transfer.
///
/// The fee charged by the ledger is `gas_used * gas_price` and is always
/// paid by the source account in the native asset. A transfer whose
/// execution needs more gas than `gas_limit` is rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxParameters {
  pub gas_price: u64,
  pub gas_limit: u64,
}

impl TxParameters {
  pub const fn new(gas_price: u64, gas_limit: u64) -> Self {
    Self {
      gas_price,
      gas_limit,
    }
  }

  /// Upper bound of the fee this transfer may be charged.
  pub fn max_fee(&self) -> Option<u64> {
    self.gas_price.checked_mul(self.gas_limit)
  }
}

impl Default for TxParameters {
  fn default() -> Self {
    Self::new(1, 1_000_000)
  }
}

/// A value transfer between two accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transfer {
  pub source: Address,
  pub destination: Address,
  pub amount: u64,
  pub asset: AssetId,

  /// Must equal the current nonce of the source account. Each accepted
  /// transfer increments it, so an authorization is never valid twice.
  pub nonce: u64,
  pub params: TxParameters,
}

impl Transfer {
  /// Digest over all transfer fields.
  ///
  /// Wallet signatures and predicate witnesses bind to this value, so
  /// an authorization for one transfer can't be attached to another.
  pub fn signing_hash(&self) -> [u8; 32] {
    let amount = self.amount.to_le_bytes();
    let nonce = self.nonce.to_le_bytes();
    let gas_price = self.params.gas_price.to_le_bytes();
    let gas_limit = self.params.gas_limit.to_le_bytes();
    sha3(&[
      b"transfer".as_slice(),
      self.source.as_ref(),
      self.destination.as_ref(),
      amount.as_slice(),
      self.asset.as_ref(),
      nonce.as_slice(),
      gas_price.as_slice(),
      gas_limit.as_slice(),
    ])
  }
}

/// Proof that the source account permits a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Authorization {
  /// Ed25519 signature over the signing hash by the key of a wallet
  /// source account.
  Signature(Signature),

  /// Spends from a predicate account. The ledger re-derives the source
  /// address from the artifact and configurable and runs the predicate
  /// against the witness.
  Predicate {
    artifact: PredicateArtifact,
    configurable: ConfigurableParameter,
    witness: WitnessPayload,
  },
}

#[derive(Clone, Serialize, Deserialize)]
pub struct Transaction {
  pub transfer: Transfer,
  pub authorization: Authorization,

  #[serde(skip)]
  hash_cache: OnceCell<TxId>,
}

impl Transaction {
  pub fn new(transfer: Transfer, authorization: Authorization) -> Self {
    Self {
      transfer,
      authorization,
      hash_cache: OnceCell::new(),
    }
  }

  /// Hash of the transaction that uniquely identifies it.
  pub fn hash(&self) -> &TxId {
    self.hash_cache.get_or_init(|| {
      let mut preimage = self.transfer.signing_hash().to_vec();
      match &self.authorization {
        Authorization::Signature(signature) => {
          preimage.extend_from_slice(&signature.to_bytes());
        }
        Authorization::Predicate {
          artifact,
          configurable,
          witness,
        } => {
          preimage.extend_from_slice(&artifact.code_hash());
          preimage.extend_from_slice(configurable.as_bytes());
          preimage.extend_from_slice(&witness.message);
          preimage.extend_from_slice(&witness.signature_bytes());
        }
      }
      multihash::Code::Sha3_256.digest(&preimage)
    })
  }
}

impl Debug for Transaction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use crate::ToBase58String;
    f.debug_struct("Transaction")
      .field("transfer", &self.transfer)
      .field("authorization", &self.authorization)
      .field("hash", &self.hash().to_b58())
      .finish()
  }
}
