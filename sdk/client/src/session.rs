use {
  crate::{ConnectionManager, Provider},
  predacct_primitives::TxParameters,
  std::sync::Arc,
};

/// Fee parameters of wallet-to-predicate funding transfers.
pub const FUNDING_PARAMS: TxParameters = TxParameters::new(1, 164);

/// Everything an operation needs to talk to the ledger and the wallet.
///
/// A session is created once per application run and shared by
/// reference between operations, including concurrent ones.
#[derive(Clone)]
pub struct Session {
  provider: Arc<dyn Provider>,
  connection: Arc<ConnectionManager>,
  funding_params: TxParameters,
  spend_params: TxParameters,
}

impl Session {
  pub fn new(
    provider: Arc<dyn Provider>,
    connection: Arc<ConnectionManager>,
  ) -> Self {
    Self {
      provider,
      connection,
      funding_params: FUNDING_PARAMS,
      spend_params: TxParameters::default(),
    }
  }

  pub fn with_funding_params(self, funding_params: TxParameters) -> Self {
    Self {
      funding_params,
      ..self
    }
  }

  pub fn with_spend_params(self, spend_params: TxParameters) -> Self {
    Self {
      spend_params,
      ..self
    }
  }

  pub fn provider(&self) -> &dyn Provider {
    self.provider.as_ref()
  }

  pub fn connection(&self) -> &ConnectionManager {
    &self.connection
  }

  pub fn funding_params(&self) -> TxParameters {
    self.funding_params
  }

  pub fn spend_params(&self) -> TxParameters {
    self.spend_params
  }
}

impl std::fmt::Debug for Session {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Session")
      .field("connection", &self.connection)
      .field("funding_params", &self.funding_params)
      .field("spend_params", &self.spend_params)
      .finish()
  }
}
