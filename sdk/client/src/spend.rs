use {
  crate::{
    io::send_and_confirm,
    Error,
    PredicateAccount,
    Session,
    TransferOutcome,
    TransferRequest,
    WitnessSigner,
  },
  predacct_primitives::{Transaction, Transfer},
  tracing::debug,
};

/// Moves funds out of a predicate account.
///
/// The transfer is authorized solely by the witness `signer` produces
/// over the transfer's signing hash, no wallet is involved. Whether the
/// witness satisfies the predicate is decided by the ledger. A rejected
/// witness yields [`TransferOutcome::Failure`] with
/// [`crate::LedgerError::PredicateRejected`] and leaves every balance
/// unchanged.
pub async fn spend(
  session: &Session,
  account: &PredicateAccount,
  signer: &dyn WitnessSigner,
  request: &TransferRequest,
) -> Result<TransferOutcome, Error> {
  let provider = session.provider();
  let source = account.address();
  let destination = request.destination();
  let asset = request.asset();

  let initial = provider.balance(&destination, &asset).await?;
  debug!("destination {destination} balance before spend: {initial}");

  let transfer = Transfer {
    source,
    destination,
    amount: request.amount(),
    asset,
    nonce: provider.nonce(&source).await?,
    params: session.spend_params(),
  };

  let witness = signer.witness(transfer.signing_hash())?;
  let tx = Transaction::new(transfer, account.authorization(witness));
  send_and_confirm(provider, tx, &destination, &asset).await
}

/// Spend driven by raw user input.
///
/// Both fields are validated before anything is sent to the ledger.
pub async fn submit_form(
  session: &Session,
  account: &PredicateAccount,
  signer: &dyn WitnessSigner,
  destination: &str,
  amount: &str,
) -> Result<TransferOutcome, Error> {
  let request = TransferRequest::parse(destination, amount)?;
  spend(session, account, signer, &request).await
}
