mod execution;
mod programs;
mod state;

pub use {
  execution::{authorize, execute, execute_many, Error, GasSchedule},
  programs::{
    secp256r1_artifact,
    secp256r1_bytecode,
    PredicateContext,
    Program,
    Programs,
    Secp256r1Program,
    SECP256R1_INTERFACE,
  },
  state::{Account, InMemoryStateStore, Overlay, State, StateDiff},
};
