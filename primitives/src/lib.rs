mod address;
mod asset;
mod b58;
mod block;
mod predicate;
mod receipt;
mod transaction;
mod witness;

pub use {
  address::{Address, Error as AddressError},
  asset::AssetId,
  b58::ToBase58String,
  block::Block,
  predicate::{
    ArtifactError,
    ConfigurableParameter,
    ConfigurableSlot,
    Interface,
    PredicateArtifact,
    WitnessField,
    CONFIGURABLE_LEN,
    INSTRUCTION_WIDTH,
  },
  receipt::{Receipt, Rejection, Status},
  transaction::{Authorization, Transaction, Transfer, TxParameters},
  witness::{WitnessPayload, WITNESS_FIELD_LEN},
};

/// Transaction and block identifiers.
pub type TxId = multihash::Multihash;

/// Sha3-256 over the concatenation of all parts.
pub(crate) fn sha3(parts: &[&[u8]]) -> [u8; 32] {
  use multihash::{Hasher, Sha3_256};
  let mut hasher = Sha3_256::default();
  for part in parts {
    hasher.update(part);
  }
  let mut output = [0u8; 32];
  output.copy_from_slice(hasher.finalize());
  output
}
