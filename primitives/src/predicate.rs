use {
  crate::{sha3, Address, ToBase58String, WITNESS_FIELD_LEN},
  serde::{de, Deserialize, Deserializer, Serialize, Serializer},
  std::fmt::Debug,
  thiserror::Error,
};

/// Length in bytes of the value baked into a predicate instance.
pub const CONFIGURABLE_LEN: usize = 64;

/// Predicate bytecode is a sequence of fixed-width instructions.
pub const INSTRUCTION_WIDTH: usize = 4;

/// Number of fields in a predicate witness (message, r, s).
const WITNESS_FIELDS: usize = 3;

const PREDICATE_SEED: &[u8] = b"predicate";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArtifactError {
  #[error("malformed predicate bytecode: {0}")]
  MalformedBytecode(String),

  #[error("malformed predicate interface: {0}")]
  MalformedInterface(String),

  #[error("configurable parameter must be 64 bytes long, got {0}")]
  ConfigurableLength(usize),
}

/// The value baked into a predicate instance at construction time.
///
/// For signature-checking predicates this is the public key the predicate
/// verifies witnesses against: an uncompressed SEC1 P-256 point with the
/// leading tag byte stripped.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct ConfigurableParameter([u8; CONFIGURABLE_LEN]);

impl ConfigurableParameter {
  pub const fn new(bytes: [u8; CONFIGURABLE_LEN]) -> Self {
    Self(bytes)
  }

  pub const fn as_bytes(&self) -> &[u8; CONFIGURABLE_LEN] {
    &self.0
  }
}

impl AsRef<[u8]> for ConfigurableParameter {
  fn as_ref(&self) -> &[u8] {
    &self.0
  }
}

impl TryFrom<&[u8]> for ConfigurableParameter {
  type Error = ArtifactError;

  fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
    value
      .try_into()
      .map(Self)
      .map_err(|_| ArtifactError::ConfigurableLength(value.len()))
  }
}

impl Debug for ConfigurableParameter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "configurable({})", self.0.to_b58())
  }
}

impl Serialize for ConfigurableParameter {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(self.0.iter())
  }
}

impl<'de> Deserialize<'de> for ConfigurableParameter {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let bytes = Vec::<u8>::deserialize(deserializer)?;
    Self::try_from(bytes.as_slice()).map_err(de::Error::custom)
  }
}

/// Location of the configurable value inside predicate bytecode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurableSlot {
  pub name: String,
  pub offset: usize,
  pub size: usize,
}

/// One field of the witness a predicate expects at spend time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessField {
  pub name: String,
  pub size: usize,
}

/// Machine-readable description of a predicate, shipped alongside its
/// bytecode as JSON.
///
/// ```json
/// {
///   "name": "secp256r1-predicate",
///   "configurables": [{ "name": "PUBKEY", "offset": 8, "size": 64 }],
///   "witness": [
///     { "name": "msg", "size": 32 },
///     { "name": "r", "size": 32 },
///     { "name": "s", "size": 32 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
  pub name: String,

  #[serde(default)]
  pub configurables: Vec<ConfigurableSlot>,

  #[serde(default)]
  pub witness: Vec<WitnessField>,
}

impl Interface {
  pub fn parse(json: &str) -> Result<Self, ArtifactError> {
    serde_json::from_str(json)
      .map_err(|e| ArtifactError::MalformedInterface(e.to_string()))
  }
}

/// Predicate bytecode together with its interface description.
///
/// Constructing an artifact validates both parts against each other, so
/// every instance can be instantiated with any configurable parameter.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawArtifact")]
pub struct PredicateArtifact {
  bytecode: Vec<u8>,
  interface: Interface,
}

#[derive(Deserialize)]
struct RawArtifact {
  bytecode: Vec<u8>,
  interface: Interface,
}

impl TryFrom<RawArtifact> for PredicateArtifact {
  type Error = ArtifactError;

  fn try_from(raw: RawArtifact) -> Result<Self, Self::Error> {
    Self::new(raw.bytecode, raw.interface)
  }
}

impl PredicateArtifact {
  pub fn new(
    bytecode: Vec<u8>,
    interface: Interface,
  ) -> Result<Self, ArtifactError> {
    if bytecode.is_empty() {
      return Err(ArtifactError::MalformedBytecode("empty bytecode".into()));
    }

    if bytecode.len() % INSTRUCTION_WIDTH != 0 {
      return Err(ArtifactError::MalformedBytecode(format!(
        "length {} is not a multiple of the {INSTRUCTION_WIDTH}-byte \
         instruction width",
        bytecode.len()
      )));
    }

    let slot = match interface.configurables.as_slice() {
      [slot] => slot,
      slots => {
        return Err(ArtifactError::MalformedInterface(format!(
          "expected exactly one configurable slot, found {}",
          slots.len()
        )))
      }
    };

    if slot.size != CONFIGURABLE_LEN {
      return Err(ArtifactError::MalformedInterface(format!(
        "configurable {} is {} bytes, expected {CONFIGURABLE_LEN}",
        slot.name, slot.size
      )));
    }

    if slot.offset % INSTRUCTION_WIDTH != 0 {
      return Err(ArtifactError::MalformedInterface(format!(
        "configurable {} offset {} is not instruction aligned",
        slot.name, slot.offset
      )));
    }

    match slot.offset.checked_add(slot.size) {
      Some(end) if end <= bytecode.len() => {}
      _ => {
        return Err(ArtifactError::MalformedInterface(format!(
          "configurable {} at offset {} does not fit in {} bytes of bytecode",
          slot.name,
          slot.offset,
          bytecode.len()
        )))
      }
    }

    if interface.witness.len() != WITNESS_FIELDS
      || interface.witness.iter().any(|f| f.size != WITNESS_FIELD_LEN)
    {
      return Err(ArtifactError::MalformedInterface(format!(
        "witness must be {WITNESS_FIELDS} fields of {WITNESS_FIELD_LEN} bytes"
      )));
    }

    Ok(Self {
      bytecode,
      interface,
    })
  }

  /// Parses the interface description from JSON and validates it together
  /// with the bytecode.
  pub fn from_json(
    bytecode: Vec<u8>,
    interface: &str,
  ) -> Result<Self, ArtifactError> {
    Self::new(bytecode, Interface::parse(interface)?)
  }

  pub fn bytecode(&self) -> &[u8] {
    &self.bytecode
  }

  pub fn interface(&self) -> &Interface {
    &self.interface
  }

  pub fn slot(&self) -> &ConfigurableSlot {
    &self.interface.configurables[0]
  }

  /// Hash of the template bytecode, before any configurable is written.
  ///
  /// All instances of the same predicate share this hash, ledgers use it
  /// to identify the predicate program.
  pub fn code_hash(&self) -> [u8; 32] {
    sha3(&[self.bytecode.as_slice()])
  }

  /// Bytecode of a concrete predicate instance with the configurable
  /// value written into its slot.
  pub fn instantiate(&self, configurable: &ConfigurableParameter) -> Vec<u8> {
    let slot = self.slot();
    let mut code = self.bytecode.clone();
    code[slot.offset..slot.offset + slot.size]
      .copy_from_slice(configurable.as_bytes());
    code
  }

  /// Address of the predicate instance configured with the given value.
  ///
  /// This is a pure function of the bytecode, the interface and the
  /// configurable, so re-deriving it always yields the same address.
  pub fn address(&self, configurable: &ConfigurableParameter) -> Address {
    let code = self.instantiate(configurable);
    Address::ZERO.derive(&[PREDICATE_SEED, code.as_slice()])
  }
}

impl Debug for PredicateArtifact {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PredicateArtifact")
      .field("bytecode", &"[predicate-bytecode]")
      .field("code_hash", &self.code_hash().to_b58())
      .field("interface", &self.interface.name)
      .finish()
  }
}
