use {
  common::{session, MockProvider, MockTransport, Verdict},
  predacct_client_sdk::{
    fund,
    spend,
    submit_form,
    ConnectionError,
    Error,
    P256Signer,
    PredicateAccount,
    ProviderError,
    TransferOutcome,
    TransferRequest,
    UnboundWitness,
    ValidationError,
    FUNDING_PARAMS,
  },
  predacct_ledger::{secp256r1_bytecode, SECP256R1_INTERFACE},
  predacct_primitives::{Address, AssetId, Authorization, Rejection},
};

mod common;

const DESTINATION: &str = "8qbHbw2BbbTHBW1sbeqakYXVKRQM8Ne7pLK7m6CVfeR";

fn predicate(signer: &P256Signer) -> anyhow::Result<PredicateAccount> {
  Ok(PredicateAccount::derive(
    secp256r1_bytecode(),
    SECP256R1_INTERFACE,
    signer.parameter(),
  )?)
}

fn signer() -> anyhow::Result<P256Signer> {
  Ok(P256Signer::generate(
    &mut predacct_client_sdk::ByteParameterGenerator::new(),
  )?)
}

#[tokio::test]
async fn fund_requires_connected_wallet() -> anyhow::Result<()> {
  let provider = MockProvider::new();
  let session = session(provider.clone(), MockTransport::new(false, true)).await?;
  let account = predicate(&signer()?)?;

  assert_eq!(
    fund(&session, &account, 100_000).await,
    Err(Error::Connection(ConnectionError::NotConnected))
  );
  assert!(provider.calls().is_empty());
  Ok(())
}

#[tokio::test]
async fn fund_rejects_zero_amount() -> anyhow::Result<()> {
  let provider = MockProvider::new();
  let session = session(provider.clone(), MockTransport::new(true, true)).await?;
  let account = predicate(&signer()?)?;

  assert!(matches!(
    fund(&session, &account, 0).await,
    Err(Error::Validation(ValidationError::InvalidAmount(_)))
  ));
  assert!(provider.calls().is_empty());
  Ok(())
}

#[tokio::test]
async fn fund_moves_coins_from_active_account() -> anyhow::Result<()> {
  let provider = MockProvider::new();
  let transport = MockTransport::new(true, true);
  let session = session(provider.clone(), transport.clone()).await?;
  let account = predicate(&signer()?)?;

  let outcome = fund(&session, &account, 100_000).await?;
  assert!(matches!(outcome, TransferOutcome::Success {
    balance: Some(100_000),
    ..
  }));

  let submitted = provider.submitted();
  assert_eq!(submitted.len(), 1);

  let transfer = &submitted[0].transfer;
  assert_eq!(transfer.source, transport.account());
  assert_eq!(transfer.destination, account.address());
  assert_eq!(transfer.asset, AssetId::NATIVE);
  assert_eq!(transfer.amount, 100_000);
  assert_eq!(transfer.params, FUNDING_PARAMS);
  assert!(matches!(
    submitted[0].authorization,
    Authorization::Signature(_)
  ));

  // balance read on both sides of the transfer
  let balance_reads = provider
    .calls()
    .into_iter()
    .filter(|c| *c == "balance")
    .count();
  assert_eq!(balance_reads, 2);
  Ok(())
}

#[tokio::test]
async fn form_input_is_validated_before_any_ledger_call() -> anyhow::Result<()> {
  let provider = MockProvider::new();
  let session = session(provider.clone(), MockTransport::new(true, true)).await?;
  let signer = signer()?;
  let account = predicate(&signer)?;

  for (destination, amount) in [
    ("", "10"),
    ("0xnothex", "10"),
    ("tooShort", "10"),
    (DESTINATION, "0"),
    (DESTINATION, "-1"),
    (DESTINATION, "ten"),
  ] {
    let result =
      submit_form(&session, &account, &signer, destination, amount).await;
    assert!(
      matches!(result, Err(Error::Validation(_))),
      "{destination:?}/{amount:?} got {result:?}"
    );
  }

  assert!(provider.calls().is_empty());
  Ok(())
}

#[tokio::test]
async fn spend_binds_witness_to_transfer() -> anyhow::Result<()> {
  let provider = MockProvider::new();
  let session = session(provider.clone(), MockTransport::new(false, false)).await?;
  let signer = signer()?;
  let account = predicate(&signer)?;
  let destination: Address = DESTINATION.parse()?;

  provider.credit(destination, AssetId::NATIVE, 10);
  let outcome = submit_form(&session, &account, &signer, DESTINATION, "50000")
    .await?;
  assert!(matches!(outcome, TransferOutcome::Success {
    balance: Some(50_010),
    ..
  }));

  let submitted = provider.submitted();
  let tx = &submitted[0];
  assert_eq!(tx.transfer.source, account.address());
  assert_eq!(tx.transfer.params, session.spend_params());

  match &tx.authorization {
    Authorization::Predicate {
      configurable,
      witness,
      ..
    } => {
      assert_eq!(configurable, account.configurable());
      assert_eq!(witness.message, tx.transfer.signing_hash());
    }
    Authorization::Signature(_) => panic!("expected predicate authorization"),
  }

  assert_eq!(provider.calls(), vec![
    "balance",
    "nonce",
    "submit",
    "await_result",
    "balance"
  ]);
  Ok(())
}

#[tokio::test]
async fn ledger_refusals_are_classified() -> anyhow::Result<()> {
  let provider = MockProvider::new();
  let session = session(provider.clone(), MockTransport::new(false, false)).await?;
  let signer = signer()?;
  let account = predicate(&signer)?;
  let request = TransferRequest::new(DESTINATION.parse()?, 50_000)?;

  provider.set_verdict(Verdict::RejectOnSubmit(Rejection::PredicateRejected));
  let outcome = spend(&session, &account, &UnboundWitness, &request).await?;
  assert_eq!(outcome.clone().into_result(), Err(Rejection::PredicateRejected));

  let insufficient = Rejection::InsufficientBalance {
    required: 50_150,
    available: 100,
  };
  provider.set_verdict(Verdict::FailAtFinality(insufficient.clone()));
  let outcome = spend(&session, &account, &signer, &request).await?;
  assert!(!outcome.is_success());
  assert_eq!(outcome.into_result(), Err(insufficient));
  Ok(())
}

#[tokio::test]
async fn transport_failures_are_errors_not_outcomes() -> anyhow::Result<()> {
  let provider = MockProvider::new();
  let session = session(provider.clone(), MockTransport::new(false, false)).await?;
  let signer = signer()?;
  let account = predicate(&signer)?;

  provider.set_verdict(Verdict::TransportDown);
  let result = submit_form(&session, &account, &signer, DESTINATION, "5").await;
  assert!(matches!(
    result,
    Err(Error::Provider(ProviderError::Transport(_)))
  ));
  Ok(())
}

#[tokio::test]
async fn final_transfer_survives_failed_balance_read() -> anyhow::Result<()> {
  let provider = MockProvider::new();
  let session = session(provider.clone(), MockTransport::new(true, true)).await?;
  let signer = signer()?;
  let account = predicate(&signer)?;

  provider.set_verdict(Verdict::AcceptThenBalanceDown);
  let outcome = fund(&session, &account, 100_000).await?;
  assert!(matches!(outcome, TransferOutcome::Success {
    balance: None,
    ..
  }));

  let request = TransferRequest::new(DESTINATION.parse()?, 50_000)?;
  let outcome = spend(&session, &account, &signer, &request).await?;
  assert!(outcome.is_success());
  assert_eq!(outcome.into_result(), Ok(None));
  assert_eq!(provider.submitted().len(), 2);
  Ok(())
}

#[tokio::test]
async fn spend_transfers_requested_asset() -> anyhow::Result<()> {
  let provider = MockProvider::new();
  let session = session(provider.clone(), MockTransport::new(false, false)).await?;
  let signer = signer()?;
  let account = predicate(&signer)?;
  let gold = AssetId::new([7u8; 32]);

  let request =
    TransferRequest::new(DESTINATION.parse()?, 2_500)?.with_asset(gold);
  assert_eq!(request.asset(), gold);

  let outcome = spend(&session, &account, &signer, &request).await?;
  assert_eq!(outcome.into_result(), Ok(Some(2_500)));

  let submitted = provider.submitted();
  assert_eq!(submitted[0].transfer.asset, gold);
  assert_eq!(submitted[0].transfer.amount, 2_500);

  // destination balance read before and after, both in the spent asset
  assert_eq!(provider.balance_reads(), vec![gold, gold]);
  Ok(())
}

#[tokio::test]
async fn fund_after_wallet_disconnect_is_not_connected() -> anyhow::Result<()> {
  let provider = MockProvider::new();
  let transport = MockTransport::new(true, true);
  let session = session(provider.clone(), transport.clone()).await?;
  let account = predicate(&signer()?)?;

  // disconnected on the wallet side since the last check
  transport.set_connected(false);
  assert_eq!(
    fund(&session, &account, 100_000).await,
    Err(Error::Connection(ConnectionError::NotConnected))
  );
  assert!(provider.submitted().is_empty());
  Ok(())
}
