use {
  crate::EntropyError,
  predacct_primitives::{ConfigurableParameter, CONFIGURABLE_LEN},
  rand::{rngs::OsRng, CryptoRng, RngCore},
};

/// Produces fresh configurable parameters from a cryptographically
/// secure random source.
///
/// The default source is the operating system RNG. A failing source is
/// reported as [`EntropyError::EntropyUnavailable`] and never papered
/// over with weaker randomness.
#[derive(Debug, Clone, Default)]
pub struct ByteParameterGenerator<R = OsRng> {
  rng: R,
}

impl ByteParameterGenerator<OsRng> {
  pub fn new() -> Self {
    Self { rng: OsRng }
  }
}

impl<R: RngCore + CryptoRng> ByteParameterGenerator<R> {
  pub fn with_rng(rng: R) -> Self {
    Self { rng }
  }

  /// Returns 64 uniformly random bytes.
  pub fn generate(&mut self) -> Result<ConfigurableParameter, EntropyError> {
    let mut bytes = [0u8; CONFIGURABLE_LEN];
    self.fill(&mut bytes)?;
    Ok(ConfigurableParameter::new(bytes))
  }

  pub(crate) fn fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
    self
      .rng
      .try_fill_bytes(dest)
      .map_err(|e| EntropyError::EntropyUnavailable(e.to_string()))
  }
}
