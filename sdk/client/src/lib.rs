mod account;
mod connection;
mod error;
mod funding;
mod generator;
mod io;
mod request;
mod session;
mod spend;
mod transport;
mod witness;

pub use {
  account::PredicateAccount,
  connection::{ConnectionManager, ConnectionState, DEFAULT_CHECK_DELAY},
  error::{
    ConnectionError,
    EntropyError,
    Error,
    LedgerError,
    ProviderError,
    SignerError,
    ValidationError,
    WalletError,
  },
  funding::fund,
  generator::ByteParameterGenerator,
  request::{TransferOutcome, TransferRequest},
  session::{Session, FUNDING_PARAMS},
  spend::{spend, submit_form},
  transport::{ChainInfo, Provider, Wallet, WalletTransport},
  witness::{P256Signer, UnboundWitness, WitnessSigner},
};
