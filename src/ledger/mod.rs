//! Ledger domain models, the persisted store, and balance helpers.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod store;
pub mod transaction;

pub use ledger::{Ledger, Totals};
pub use store::LedgerStore;
pub use transaction::{Transaction, TransactionKind};
