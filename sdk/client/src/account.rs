use {
  crate::ValidationError,
  predacct_primitives::{
    Address,
    Authorization,
    ConfigurableParameter,
    PredicateArtifact,
    WitnessPayload,
  },
};

/// A concrete predicate instance: the predicate program with one
/// configurable value baked in, and the ledger address derived from it.
///
/// The address is computed locally and deterministically. Deriving an
/// account is not an on-ledger event, the account comes into existence
/// implicitly once something is transferred to its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateAccount {
  artifact: PredicateArtifact,
  configurable: ConfigurableParameter,
  address: Address,
}

impl PredicateAccount {
  /// Builds a predicate instance from raw bytecode and its JSON
  /// interface description.
  pub fn derive(
    bytecode: Vec<u8>,
    interface: &str,
    configurable: ConfigurableParameter,
  ) -> Result<Self, ValidationError> {
    let artifact = PredicateArtifact::from_json(bytecode, interface)?;
    Ok(Self::from_artifact(artifact, configurable))
  }

  /// Instance of an already validated artifact.
  pub fn from_artifact(
    artifact: PredicateArtifact,
    configurable: ConfigurableParameter,
  ) -> Self {
    let address = artifact.address(&configurable);
    Self {
      artifact,
      configurable,
      address,
    }
  }

  pub fn address(&self) -> Address {
    self.address
  }

  pub fn artifact(&self) -> &PredicateArtifact {
    &self.artifact
  }

  pub fn configurable(&self) -> &ConfigurableParameter {
    &self.configurable
  }

  pub(crate) fn authorization(&self, witness: WitnessPayload) -> Authorization {
    Authorization::Predicate {
      artifact: self.artifact.clone(),
      configurable: self.configurable,
      witness,
    }
  }
}
