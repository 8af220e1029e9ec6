use {
  crate::settings::SystemSettings,
  clap::Parser,
  metrics_exporter_prometheus::PrometheusBuilder,
  predacct_client_sdk::{
    fund,
    submit_form,
    ByteParameterGenerator,
    ConnectionManager,
    ConnectionState,
    P256Signer,
    PredicateAccount,
    Session,
    TransferOutcome,
    UnboundWitness,
  },
  predacct_devnode::{Devnet, DevnetConfig, LocalWallet},
  predacct_ledger::{secp256r1_bytecode, Programs, SECP256R1_INTERFACE},
  predacct_primitives::ToBase58String,
  std::sync::Arc,
  tracing::{info, subscriber::set_global_default, warn},
  tracing_subscriber::{EnvFilter, FmtSubscriber},
};

mod settings;

fn report(step: &str, outcome: &TransferOutcome) {
  match outcome {
    TransferOutcome::Success {
      tx,
      balance: Some(balance),
    } => info!(
      "{step} succeeded in transaction {}, recipient balance: {balance}",
      tx.to_b58()
    ),
    TransferOutcome::Success { tx, balance: None } => info!(
      "{step} succeeded in transaction {}, recipient balance unavailable",
      tx.to_b58()
    ),
    TransferOutcome::Failure { tx, reason } => {
      warn!("{step} failed in transaction {}: {reason}", tx.to_b58())
    }
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // configure logging
  set_global_default(
    FmtSubscriber::builder()
      .with_env_filter(
        EnvFilter::try_from_default_env()
          .unwrap_or_else(|_| EnvFilter::new("info")),
      )
      .finish(),
  )?;

  // gather CLI parameters
  let settings = SystemSettings::parse();
  info!("startup settings: {settings:#?}");

  if settings.metrics() {
    PrometheusBuilder::new().install()?;
  }

  // the first local account is funded at genesis,
  // the second is the default spend destination.
  let wallet = Arc::new(LocalWallet::generate(2));
  let accounts = wallet.addresses();

  let devnet = Devnet::new(
    DevnetConfig {
      network_id: settings.network_id().into(),
      block_time: settings.block_time(),
      genesis: vec![(accounts[0], settings.wallet_balance())],
      ..Default::default()
    },
    Programs::standard(),
  );
  let producer = devnet.spawn();

  let connection = Arc::new(ConnectionManager::new(wallet.clone()));
  let state = connection.check_after(settings.connect_delay()).await?;
  if state == ConnectionState::Disconnected {
    connection.request_connect().await?;
  }

  let session = Session::new(Arc::new(devnet.clone()), connection)
    .with_funding_params(settings.funding_params())
    .with_spend_params(settings.spend_params());

  // create predicate
  let signer = P256Signer::generate(&mut ByteParameterGenerator::new())?;
  let account = PredicateAccount::derive(
    secp256r1_bytecode(),
    SECP256R1_INTERFACE,
    signer.parameter(),
  )?;
  info!("predicate address: {}", account.address());

  // fund predicate
  let outcome = fund(&session, &account, settings.fund_amount()).await?;
  report("funding", &outcome);

  // send funds out of the predicate
  let destination = match settings.destination() {
    Some(destination) => destination.to_owned(),
    None => accounts[1].to_string(),
  };

  let outcome = submit_form(
    &session,
    &account,
    &signer,
    &destination,
    settings.amount(),
  )
  .await?;
  report("spend", &outcome);

  if settings.unbound_witness() {
    let outcome = submit_form(
      &session,
      &account,
      &UnboundWitness,
      &destination,
      settings.amount(),
    )
    .await?;
    report("spend with unbound witness", &outcome);
  }

  producer.abort();
  Ok(())
}
