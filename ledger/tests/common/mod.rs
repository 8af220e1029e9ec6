use {
  ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer},
  p256::ecdsa::{signature::hazmat::PrehashSigner, Signature, SigningKey},
  predacct_ledger::{secp256r1_artifact, Account, State, StateDiff},
  predacct_primitives::{
    Address,
    AssetId,
    Authorization,
    ConfigurableParameter,
    Transaction,
    Transfer,
    TxParameters,
    WitnessPayload,
  },
  rand::RngCore,
};

pub fn wallet_keypair() -> Keypair {
  let mut seed = [0u8; 32];
  rand::thread_rng().fill_bytes(&mut seed);
  let secret = SecretKey::from_bytes(&seed).unwrap();
  let public: PublicKey = (&secret).into();
  Keypair { secret, public }
}

/// Creates a statediff that credits the given accounts with native coins.
pub fn genesis(allocations: &[(Address, u64)]) -> StateDiff {
  let mut diff = StateDiff::default();
  for (address, amount) in allocations {
    diff.set(*address, Account::with_balance(AssetId::NATIVE, *amount));
  }
  diff
}

pub fn balance(state: &impl State, address: &Address) -> u64 {
  state
    .get(address)
    .map(|acc| acc.balance(&AssetId::NATIVE))
    .unwrap_or(0)
}

pub fn asset_balance(
  state: &impl State,
  address: &Address,
  asset: &AssetId,
) -> u64 {
  state
    .get(address)
    .map(|acc| acc.balance(asset))
    .unwrap_or(0)
}

pub fn nonce(state: &impl State, address: &Address) -> u64 {
  state.get(address).map(|acc| acc.nonce).unwrap_or(0)
}

/// A wallet transfer signed by the source keypair.
pub fn signed_transfer(
  keypair: &Keypair,
  destination: Address,
  amount: u64,
  nonce: u64,
  params: TxParameters,
) -> Transaction {
  let transfer = Transfer {
    source: keypair.public.into(),
    destination,
    amount,
    asset: AssetId::NATIVE,
    nonce,
    params,
  };
  let signature = keypair.sign(&transfer.signing_hash());
  Transaction::new(transfer, Authorization::Signature(signature))
}

pub fn predicate_key() -> (SigningKey, ConfigurableParameter) {
  let key = SigningKey::random(&mut rand::rngs::OsRng);
  let point = key.verifying_key().to_encoded_point(false);
  let configurable =
    ConfigurableParameter::try_from(&point.as_bytes()[1..]).unwrap();
  (key, configurable)
}

pub fn predicate_address(configurable: &ConfigurableParameter) -> Address {
  secp256r1_artifact().address(configurable)
}

/// A spend of native coins from the reference predicate instance
/// configured with `configurable`, with its witness signed by `signer`.
pub fn predicate_spend(
  signer: &SigningKey,
  configurable: ConfigurableParameter,
  destination: Address,
  amount: u64,
  nonce: u64,
) -> Transaction {
  predicate_spend_asset(
    signer,
    configurable,
    destination,
    AssetId::NATIVE,
    amount,
    nonce,
  )
}

pub fn predicate_spend_asset(
  signer: &SigningKey,
  configurable: ConfigurableParameter,
  destination: Address,
  asset: AssetId,
  amount: u64,
  nonce: u64,
) -> Transaction {
  let transfer = Transfer {
    source: predicate_address(&configurable),
    destination,
    amount,
    asset,
    nonce,
    params: TxParameters::default(),
  };

  let message = transfer.signing_hash();
  let signature: Signature = signer.sign_prehash(&message).unwrap();
  let bytes = signature.to_bytes();

  Transaction::new(transfer, Authorization::Predicate {
    artifact: secp256r1_artifact(),
    configurable,
    witness: WitnessPayload {
      message,
      r: bytes[..32].try_into().unwrap(),
      s: bytes[32..].try_into().unwrap(),
    },
  })
}
