#![allow(dead_code)]

use {
  predacct_client_sdk::{
    ByteParameterGenerator,
    ConnectionManager,
    P256Signer,
    PredicateAccount,
    Provider,
    Session,
  },
  predacct_devnode::{Devnet, DevnetConfig, LocalWallet},
  predacct_ledger::{secp256r1_bytecode, Programs, SECP256R1_INTERFACE},
  predacct_primitives::{Address, AssetId},
  std::{sync::Arc, time::Duration},
  tokio::task::JoinHandle,
};

pub const WALLET_BALANCE: u64 = 1_000_000_000;

/// A running devnet with a two account local wallet. The first account
/// holds [`WALLET_BALANCE`] native coins.
pub struct Harness {
  pub devnet: Devnet,
  pub wallet: Arc<LocalWallet>,
  pub session: Session,
  producer: JoinHandle<()>,
}

impl Harness {
  pub async fn start(connect: bool) -> anyhow::Result<Self> {
    let wallet = Arc::new(LocalWallet::generate(2));
    let devnet = Devnet::new(
      DevnetConfig {
        block_time: Duration::from_millis(10),
        genesis: vec![(wallet.addresses()[0], WALLET_BALANCE)],
        ..Default::default()
      },
      Programs::standard(),
    );
    let producer = devnet.spawn();

    let connection = Arc::new(ConnectionManager::new(wallet.clone()));
    if connect {
      connection.request_connect().await?;
    }

    Ok(Self {
      session: Session::new(Arc::new(devnet.clone()), connection),
      devnet,
      wallet,
      producer,
    })
  }

  pub fn funder(&self) -> Address {
    self.wallet.addresses()[0]
  }

  pub fn recipient(&self) -> Address {
    self.wallet.addresses()[1]
  }

  pub async fn balance(&self, address: &Address) -> anyhow::Result<u64> {
    Ok(self.devnet.balance(address, &AssetId::NATIVE).await?)
  }
}

impl Drop for Harness {
  fn drop(&mut self) {
    self.producer.abort();
  }
}

pub fn signer() -> anyhow::Result<P256Signer> {
  Ok(P256Signer::generate(&mut ByteParameterGenerator::new())?)
}

pub fn predicate(signer: &P256Signer) -> anyhow::Result<PredicateAccount> {
  Ok(PredicateAccount::derive(
    secp256r1_bytecode(),
    SECP256R1_INTERFACE,
    signer.parameter(),
  )?)
}
