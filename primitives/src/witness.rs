use {
  crate::ToBase58String,
  serde::{Deserialize, Serialize},
  std::fmt::Debug,
};

pub const WITNESS_FIELD_LEN: usize = 32;

/// Data a predicate evaluates at spend time to decide whether the
/// transfer is authorized.
///
/// For signature-checking predicates `message` is the signed digest and
/// `r`, `s` are the two scalars of the signature.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WitnessPayload {
  pub message: [u8; WITNESS_FIELD_LEN],
  pub r: [u8; WITNESS_FIELD_LEN],
  pub s: [u8; WITNESS_FIELD_LEN],
}

impl WitnessPayload {
  /// The `r || s` concatenation.
  pub fn signature_bytes(&self) -> [u8; 2 * WITNESS_FIELD_LEN] {
    let mut output = [0u8; 2 * WITNESS_FIELD_LEN];
    output[..WITNESS_FIELD_LEN].copy_from_slice(&self.r);
    output[WITNESS_FIELD_LEN..].copy_from_slice(&self.s);
    output
  }
}

impl Debug for WitnessPayload {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("WitnessPayload")
      .field("message", &self.message.to_b58())
      .field("r", &self.r.to_b58())
      .field("s", &self.s.to_b58())
      .finish()
  }
}
