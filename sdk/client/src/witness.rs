use {
  crate::{ByteParameterGenerator, EntropyError, SignerError},
  p256::ecdsa::{signature::hazmat::PrehashSigner, Signature, SigningKey},
  predacct_primitives::{
    ConfigurableParameter,
    WitnessPayload,
    CONFIGURABLE_LEN,
    WITNESS_FIELD_LEN,
  },
  rand::{rngs::OsRng, CryptoRng, RngCore},
};

/// Builds the witness attached to a predicate spend.
///
/// `message` is the signing hash of the transfer being authorized.
pub trait WitnessSigner: Send + Sync {
  fn witness(&self, message: [u8; 32]) -> Result<WitnessPayload, SignerError>;
}

/// Holds the P-256 private key whose public half is baked into a
/// secp256r1 predicate instance as its configurable parameter.
pub struct P256Signer {
  key: SigningKey,
}

impl P256Signer {
  /// Number of candidate scalars drawn before giving up. A uniformly
  /// random 32 byte string is a valid P-256 scalar with overwhelming
  /// probability, so exhausting this means the entropy source is broken.
  const MAX_ATTEMPTS: usize = 8;

  /// Creates a new key from the generator's entropy source.
  pub fn generate<R: RngCore + CryptoRng>(
    generator: &mut ByteParameterGenerator<R>,
  ) -> Result<Self, EntropyError> {
    let mut scalar = [0u8; 32];
    for _ in 0..Self::MAX_ATTEMPTS {
      generator.fill(&mut scalar)?;
      if let Ok(key) = SigningKey::from_slice(&scalar) {
        return Ok(Self { key });
      }
    }
    Err(EntropyError::EntropyUnavailable(
      "source keeps producing invalid P-256 scalars".into(),
    ))
  }

  pub fn from_key(key: SigningKey) -> Self {
    Self { key }
  }

  /// Uncompressed public key without the SEC1 tag byte.
  pub fn parameter(&self) -> ConfigurableParameter {
    let point = self.key.verifying_key().to_encoded_point(false);
    let mut bytes = [0u8; CONFIGURABLE_LEN];
    bytes.copy_from_slice(&point.as_bytes()[1..]);
    ConfigurableParameter::new(bytes)
  }
}

impl std::fmt::Debug for P256Signer {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("P256Signer")
      .field("parameter", &self.parameter())
      .finish()
  }
}

impl WitnessSigner for P256Signer {
  fn witness(&self, message: [u8; 32]) -> Result<WitnessPayload, SignerError> {
    let signature: Signature = self
      .key
      .sign_prehash(&message)
      .map_err(|e| SignerError::Signing(e.to_string()))?;

    let bytes = signature.to_bytes();
    let mut r = [0u8; WITNESS_FIELD_LEN];
    let mut s = [0u8; WITNESS_FIELD_LEN];
    r.copy_from_slice(&bytes[..WITNESS_FIELD_LEN]);
    s.copy_from_slice(&bytes[WITNESS_FIELD_LEN..]);

    Ok(WitnessPayload { message, r, s })
  }
}

/// Fills every witness field with fresh random bytes.
///
/// The result is not bound to the transfer nor to any key, so no
/// signature-checking predicate will accept it. Useful for exercising
/// the rejection path.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnboundWitness;

impl WitnessSigner for UnboundWitness {
  fn witness(&self, _: [u8; 32]) -> Result<WitnessPayload, SignerError> {
    let mut fields = [[0u8; WITNESS_FIELD_LEN]; 3];
    for field in fields.iter_mut() {
      OsRng
        .try_fill_bytes(field)
        .map_err(|e| EntropyError::EntropyUnavailable(e.to_string()))?;
    }

    let [message, r, s] = fields;
    Ok(WitnessPayload { message, r, s })
  }
}
