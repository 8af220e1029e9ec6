use {
  crate::{
    io::send_and_confirm,
    Error,
    PredicateAccount,
    Session,
    TransferOutcome,
    ValidationError,
  },
  predacct_primitives::{Transaction, Transfer},
  tracing::info,
};

/// Transfers `amount` base-asset coins from the connected wallet account
/// to the predicate account.
///
/// Requires a connected wallet. The predicate balance is read before
/// and, on success, after the transfer. A transfer refused by the ledger
/// is reported as [`TransferOutcome::Failure`] and changes no balances.
pub async fn fund(
  session: &Session,
  account: &PredicateAccount,
  amount: u64,
) -> Result<TransferOutcome, Error> {
  if amount == 0 {
    return Err(
      ValidationError::InvalidAmount("amount must be positive".into()).into(),
    );
  }

  let wallet = session.connection().wallet().await?;
  let provider = session.provider();
  let target = account.address();
  let asset = provider.chain_info().await?.base_asset;

  let initial = provider.balance(&target, &asset).await?;
  info!("predicate {target} balance before funding: {initial}");

  let source = wallet.address();
  let transfer = Transfer {
    source,
    destination: target,
    amount,
    asset,
    nonce: provider.nonce(&source).await?,
    params: session.funding_params(),
  };

  let authorization = wallet.sign(&transfer).await?;
  let outcome = send_and_confirm(
    provider,
    Transaction::new(transfer, authorization),
    &target,
    &asset,
  )
  .await?;

  if let TransferOutcome::Success {
    balance: Some(balance),
    ..
  } = &outcome
  {
    info!("predicate {target} funded from {source}: {initial} -> {balance}");
  }

  Ok(outcome)
}
