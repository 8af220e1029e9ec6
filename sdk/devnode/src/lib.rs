mod devnet;
mod mempool;
mod wallet;
mod watcher;

pub use {
  devnet::{Devnet, DevnetConfig},
  mempool::Mempool,
  wallet::LocalWallet,
  watcher::ReceiptWatcher,
};
