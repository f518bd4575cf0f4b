#![doc(test(attr(deny(warnings))))]

//! Cashbook keeps a single-user income/expense ledger in a local JSON file and
//! reports the running balance.

pub mod cli;
pub mod config;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use errors::LedgerError;
pub use ledger::{Ledger, LedgerStore, Totals, Transaction, TransactionKind};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Cashbook tracing initialized.");
    });
}
