use {
  crate::sha3,
  curve25519_dalek::edwards::CompressedEdwardsY,
  ed25519_dalek::PublicKey,
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
  },
  thiserror::Error,
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
  #[error("invalid base58 address: {0}")]
  Base58(#[from] bs58::decode::Error),

  #[error("invalid hex address: {0}")]
  Hex(#[from] hex::FromHexError),

  #[error("address must be 32 bytes long, got {0}")]
  InvalidLength(usize),
}

/// Represents an address of an account on the ledger.
///
/// The same address type identifies two kinds of accounts:
///
///   - wallet accounts, whose address is an Ed25519 public key and which
///     are spent from by attaching a signature of the corresponding
///     private key;
///   - predicate accounts, whose address is derived from predicate
///     bytecode and does not lie on the Ed25519 curve, so no private key
///     exists for it and the only way to spend from it is to satisfy the
///     predicate.
///
/// The canonical text form is base58. Parsing also accepts the `0x`
/// prefixed hex form used by block explorers.
#[derive(
  Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Address([u8; 32]);

impl Address {
  /// The root from which predicate addresses are derived.
  pub const ZERO: Address = Address([0u8; 32]);

  pub const fn new(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }

  pub const fn to_bytes(&self) -> [u8; 32] {
    self.0
  }

  /// Given a list of seeds this method will generate a new
  /// derived address that is not on the Ed25519 curve
  /// (no private key exists for the resulting address).
  ///
  /// The same set of seeds will always return the same
  /// derived address.
  pub fn derive(&self, seeds: &[&[u8]]) -> Self {
    let mut bump: u64 = 0;
    loop {
      let bump_bytes = bump.to_le_bytes();
      let mut parts = Vec::with_capacity(seeds.len() + 2);
      parts.push(&self.0[..]);
      parts.extend_from_slice(seeds);
      parts.push(&bump_bytes[..]);

      let key = Address(sha3(&parts));
      if !key.has_private_key() {
        return key;
      } else {
        bump += 1;
      }
    }
  }

  /// Checks if the given address lies on the Ed25519 elliptic curve.
  ///
  /// When true, then it means that there exists a private key that
  /// make up together a valid Ed25519 keypair. Otherwise, when false
  /// it means that there is no corresponding valid private key.
  pub fn has_private_key(&self) -> bool {
    CompressedEdwardsY::from_slice(&self.0)
      .decompress()
      .is_some()
  }
}

impl AsRef<[u8]> for Address {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Deref for Address {
  type Target = [u8];

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", bs58::encode(self.0).into_string())
  }
}

impl Debug for Address {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "address({})", bs58::encode(self.0).into_string())
  }
}

impl From<Address> for String {
  fn from(addr: Address) -> Self {
    bs58::encode(addr.0).into_string()
  }
}

impl FromStr for Address {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    let bytes = match s.strip_prefix("0x") {
      Some(hexstr) => hex::decode(hexstr)?,
      None => bs58::decode(s).into_vec()?,
    };

    let bytes: [u8; 32] = bytes
      .as_slice()
      .try_into()
      .map_err(|_| Error::InvalidLength(bytes.len()))?;
    Ok(Self(bytes))
  }
}

impl TryFrom<&str> for Address {
  type Error = Error;

  fn try_from(value: &str) -> Result<Self, Self::Error> {
    FromStr::from_str(value)
  }
}

impl From<PublicKey> for Address {
  fn from(p: PublicKey) -> Self {
    Self(*p.as_bytes())
  }
}

impl From<&PublicKey> for Address {
  fn from(p: &PublicKey) -> Self {
    Self(*p.as_bytes())
  }
}
