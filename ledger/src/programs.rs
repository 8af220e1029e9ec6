use {
  p256::ecdsa::{signature::hazmat::PrehashVerifier, Signature, VerifyingKey},
  predacct_primitives::{
    ConfigurableParameter,
    PredicateArtifact,
    ToBase58String,
    WitnessPayload,
  },
  std::{collections::HashMap, sync::Arc},
};

/// This context object is passed to predicates during evaluation stage.
pub struct PredicateContext<'a> {
  /// The value baked into the predicate instance being spent from.
  pub configurable: &'a ConfigurableParameter,

  /// Witness attached to the spending transaction.
  pub witness: &'a WitnessPayload,

  /// Signing hash of the transfer being authorized.
  pub signing_hash: [u8; 32],
}

/// Executable logic of a predicate.
///
/// Predicates are read-only functions of their context and may be
/// evaluated in parallel.
pub trait Program: Send + Sync {
  fn evaluate(&self, context: &PredicateContext<'_>) -> bool;
}

/// Maps predicate code hashes to the programs that evaluate them.
#[derive(Clone, Default)]
pub struct Programs {
  registry: HashMap<[u8; 32], Arc<dyn Program>>,
}

impl Programs {
  /// Registry with the reference secp256r1 predicate installed.
  pub fn standard() -> Self {
    let mut programs = Self::default();
    programs.register(&secp256r1_artifact(), Secp256r1Program);
    programs
  }

  pub fn register(
    &mut self,
    artifact: &PredicateArtifact,
    program: impl Program + 'static,
  ) {
    self.registry.insert(artifact.code_hash(), Arc::new(program));
  }

  pub fn get(&self, code_hash: &[u8; 32]) -> Option<&dyn Program> {
    self.registry.get(code_hash).map(|p| p.as_ref())
  }
}

impl std::fmt::Debug for Programs {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_list()
      .entries(self.registry.keys().map(|k| k.to_b58()))
      .finish()
  }
}

/// Accepts a witness when `(r, s)` is a valid P-256 ECDSA signature over
/// `message` by the key stored in the configurable, and `message` is the
/// signing hash of the transfer being authorized.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256r1Program;

impl Program for Secp256r1Program {
  fn evaluate(&self, context: &PredicateContext<'_>) -> bool {
    if context.witness.message != context.signing_hash {
      return false;
    }

    let mut sec1 = [0u8; 65];
    sec1[0] = 0x04; // uncompressed point tag
    sec1[1..].copy_from_slice(context.configurable.as_bytes());

    let Ok(key) = VerifyingKey::from_sec1_bytes(&sec1) else {
      return false;
    };

    let Ok(signature) =
      Signature::from_slice(&context.witness.signature_bytes())
    else {
      return false;
    };

    key
      .verify_prehash(&context.witness.message, &signature)
      .is_ok()
  }
}

/// Interface of the reference secp256r1 predicate.
pub const SECP256R1_INTERFACE: &str = r#"{
  "name": "secp256r1-predicate",
  "configurables": [{ "name": "PUBKEY", "offset": 8, "size": 64 }],
  "witness": [
    { "name": "msg", "size": 32 },
    { "name": "r", "size": 32 },
    { "name": "s", "size": 32 }
  ]
}"#;

/// Template bytecode of the reference secp256r1 predicate.
///
/// Layout: an 8 byte header, the 64 byte `PUBKEY` slot, then the
/// verification body.
pub fn secp256r1_bytecode() -> Vec<u8> {
  let mut bytecode = Vec::with_capacity(80);
  bytecode.extend_from_slice(b"PRED\x00\x00\x00\x01");
  bytecode.extend_from_slice(&[0u8; 64]);
  bytecode.extend_from_slice(b"ECR1RET\x00");
  bytecode
}

/// Bytecode and interface of the reference secp256r1 predicate.
pub fn secp256r1_artifact() -> PredicateArtifact {
  PredicateArtifact::from_json(secp256r1_bytecode(), SECP256R1_INTERFACE)
    .expect("reference predicate is well-formed at compile time")
}
