use {
  async_trait::async_trait,
  ed25519_dalek::{Keypair, PublicKey, SecretKey, Signer, SECRET_KEY_LENGTH},
  predacct_client_sdk::{Wallet, WalletError, WalletTransport},
  predacct_primitives::{Address, Authorization, Transfer},
  rand::{rngs::OsRng, RngCore},
  std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
  },
  tracing::info,
};

/// In-process wallet holding Ed25519 keys of wallet accounts.
///
/// Connection requests are approved unless approval is switched off,
/// which simulates a user declining the request.
pub struct LocalWallet {
  keypairs: Vec<Arc<Keypair>>,
  connected: AtomicBool,
  approve: AtomicBool,
}

impl LocalWallet {
  /// Wallet with `count` freshly generated accounts.
  pub fn generate(count: usize) -> Self {
    Self::from_keypairs((0..count).map(|_| random_keypair()).collect())
  }

  pub fn from_keypairs(keypairs: Vec<Keypair>) -> Self {
    Self {
      keypairs: keypairs.into_iter().map(Arc::new).collect(),
      connected: AtomicBool::new(false),
      approve: AtomicBool::new(true),
    }
  }

  pub fn addresses(&self) -> Vec<Address> {
    self.keypairs.iter().map(|kp| kp.public.into()).collect()
  }

  pub fn set_approval(&self, approve: bool) {
    self.approve.store(approve, Ordering::SeqCst);
  }

  pub fn disconnect(&self) {
    self.connected.store(false, Ordering::SeqCst);
  }
}

fn random_keypair() -> Keypair {
  let mut bytes = [0u8; SECRET_KEY_LENGTH];
  OsRng.fill_bytes(&mut bytes);
  let secret = SecretKey::from_bytes(&bytes)
    .expect("any 32 bytes form a valid ed25519 secret key");
  let public: PublicKey = (&secret).into();
  Keypair { secret, public }
}

#[async_trait]
impl WalletTransport for LocalWallet {
  async fn is_connected(&self) -> Result<bool, WalletError> {
    Ok(self.connected.load(Ordering::SeqCst))
  }

  async fn accounts(&self) -> Result<Vec<Address>, WalletError> {
    match self.connected.load(Ordering::SeqCst) {
      true => Ok(self.addresses()),
      false => Ok(vec![]),
    }
  }

  async fn connect(&self) -> Result<(), WalletError> {
    if !self.approve.load(Ordering::SeqCst) {
      return Err(WalletError::Refused(
        "user declined the connection request".into(),
      ));
    }

    if !self.connected.swap(true, Ordering::SeqCst) {
      info!("local wallet connected");
    }
    Ok(())
  }

  async fn get_wallet(
    &self,
    account: &Address,
  ) -> Result<Arc<dyn Wallet>, WalletError> {
    if !self.connected.load(Ordering::SeqCst) {
      return Err(WalletError::Refused("wallet is not connected".into()));
    }

    self
      .keypairs
      .iter()
      .find(|kp| Address::from(&kp.public) == *account)
      .map(|kp| {
        Arc::new(LocalAccount {
          keypair: kp.clone(),
        }) as Arc<dyn Wallet>
      })
      .ok_or(WalletError::UnknownAccount(*account))
  }
}

struct LocalAccount {
  keypair: Arc<Keypair>,
}

#[async_trait]
impl Wallet for LocalAccount {
  fn address(&self) -> Address {
    self.keypair.public.into()
  }

  async fn sign(&self, transfer: &Transfer) -> Result<Authorization, WalletError> {
    if transfer.source != self.address() {
      return Err(WalletError::Refused(format!(
        "transfer source {} is not this account",
        transfer.source
      )));
    }

    let signature = self.keypair.sign(&transfer.signing_hash());
    Ok(Authorization::Signature(signature))
  }
}
