pub mod json_backend;

use std::path::Path;

use crate::{errors::LedgerError, ledger::Ledger};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends capable of storing a ledger.
pub trait LedgerStorage {
    /// Reads the persisted ledger. Backends recover from missing or unreadable
    /// data by returning an empty ledger.
    fn load(&self) -> Ledger;

    /// Overwrites the persisted ledger with `ledger`.
    fn save(&self, ledger: &Ledger) -> Result<()>;

    /// Location of the backing data, for diagnostics.
    fn location(&self) -> &Path;
}

pub use json_backend::JsonFileStorage;
