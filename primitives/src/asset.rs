use {
  crate::Address,
  serde::{Deserialize, Serialize},
  std::{
    fmt::{Debug, Display},
    str::FromStr,
  },
};

/// Identifies an asset held in account balances.
///
/// The ledger's native asset is the all-zero identifier. It is also the
/// asset in which transaction fees are paid.
#[derive(
  Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AssetId([u8; 32]);

impl AssetId {
  pub const NATIVE: AssetId = AssetId([0u8; 32]);

  pub const fn new(bytes: [u8; 32]) -> Self {
    Self(bytes)
  }

  pub fn is_native(&self) -> bool {
    *self == Self::NATIVE
  }
}

impl AsRef<[u8]> for AssetId {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl Display for AssetId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", bs58::encode(self.0).into_string())
  }
}

impl Debug for AssetId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    if self.is_native() {
      write!(f, "asset(native)")
    } else {
      write!(f, "asset({})", bs58::encode(self.0).into_string())
    }
  }
}

/// Asset identifiers share the text forms of addresses.
impl FromStr for AssetId {
  type Err = crate::AddressError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Ok(Self(s.parse::<Address>()?.to_bytes()))
  }
}
