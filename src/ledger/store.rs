use std::path::{Path, PathBuf};

use crate::{
    errors::LedgerError,
    storage::{JsonFileStorage, LedgerStorage},
};

use super::{
    ledger::{check_amount, Ledger, Totals},
    transaction::{Transaction, TransactionKind},
};

/// Owns the in-memory ledger and keeps its backing storage in sync.
///
/// Every successful mutation rewrites the whole ledger before returning. When
/// the write fails the in-memory change is kept and the error is returned, so
/// memory and disk can disagree until the next successful save.
pub struct LedgerStore<S: LedgerStorage = JsonFileStorage> {
    ledger: Ledger,
    storage: S,
}

impl LedgerStore<JsonFileStorage> {
    /// Opens the JSON ledger stored at `path`, starting empty if it is absent
    /// or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_storage(JsonFileStorage::new(path))
    }
}

impl<S: LedgerStorage> LedgerStore<S> {
    pub fn with_storage(storage: S) -> Self {
        let ledger = storage.load();
        tracing::debug!(
            path = %storage.location().display(),
            count = ledger.len(),
            "ledger store opened"
        );
        Self { ledger, storage }
    }

    pub fn path(&self) -> &Path {
        self.storage.location()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.ledger.get(index)
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Appends a transaction and returns its index. NaN and infinite amounts
    /// are rejected before anything changes.
    pub fn add(
        &mut self,
        kind: TransactionKind,
        description: impl Into<String>,
        amount: f64,
    ) -> Result<usize, LedgerError> {
        check_amount(amount)?;
        let index = self
            .ledger
            .push(Transaction::new(kind, description, amount));
        tracing::info!(index, %kind, amount, "transaction added");
        self.persist()?;
        Ok(index)
    }

    /// Replaces the transaction at `index` wholesale.
    pub fn edit(
        &mut self,
        index: usize,
        kind: TransactionKind,
        description: impl Into<String>,
        amount: f64,
    ) -> Result<(), LedgerError> {
        check_amount(amount)?;
        self.ledger
            .replace(index, Transaction::new(kind, description, amount))?;
        tracing::info!(index, %kind, amount, "transaction edited");
        self.persist()
    }

    /// Removes the transaction at `index`; later entries shift down by one.
    pub fn delete(&mut self, index: usize) -> Result<Transaction, LedgerError> {
        let removed = self.ledger.remove(index)?;
        tracing::info!(index, "transaction deleted");
        self.persist()?;
        Ok(removed)
    }

    pub fn compute_balance(&self) -> f64 {
        self.ledger.balance()
    }

    pub fn totals(&self) -> Totals {
        self.ledger.totals()
    }

    /// Rewrites the backing storage with the current ledger.
    pub fn persist(&self) -> Result<(), LedgerError> {
        self.storage.save(&self.ledger).map_err(|err| {
            tracing::error!(
                path = %self.storage.location().display(),
                error = %err,
                "failed to persist ledger"
            );
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// In-memory backend that records every save.
    #[derive(Default)]
    struct RecordingStorage {
        initial: Ledger,
        saves: RefCell<Vec<Ledger>>,
        fail: bool,
    }

    impl LedgerStorage for RecordingStorage {
        fn load(&self) -> Ledger {
            self.initial.clone()
        }

        fn save(&self, ledger: &Ledger) -> Result<(), LedgerError> {
            if self.fail {
                return Err(LedgerError::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only",
                )));
            }
            self.saves.borrow_mut().push(ledger.clone());
            Ok(())
        }

        fn location(&self) -> &Path {
            Path::new("memory")
        }
    }

    #[test]
    fn every_mutation_saves_full_ledger() {
        let mut store = LedgerStore::with_storage(RecordingStorage::default());
        store.add(TransactionKind::Income, "salary", 1000.0).unwrap();
        store.add(TransactionKind::Expense, "rent", 400.0).unwrap();
        store.edit(1, TransactionKind::Expense, "rent", 500.0).unwrap();
        store.delete(0).unwrap();

        let saves = store.storage.saves.borrow();
        assert_eq!(saves.len(), 4);
        assert_eq!(saves[1].len(), 2);
        assert_eq!(saves.last(), Some(store.ledger()));
    }

    #[test]
    fn rejected_edit_does_not_save() {
        let mut store = LedgerStore::with_storage(RecordingStorage::default());
        let err = store
            .edit(0, TransactionKind::Income, "x", 1.0)
            .expect_err("empty ledger has no index 0");
        assert!(matches!(err, LedgerError::IndexOutOfRange { index: 0, len: 0 }));
        assert!(store.storage.saves.borrow().is_empty());
    }

    #[test]
    fn failed_save_keeps_in_memory_change() {
        let storage = RecordingStorage {
            fail: true,
            ..RecordingStorage::default()
        };
        let mut store = LedgerStore::with_storage(storage);
        let err = store
            .add(TransactionKind::Income, "bonus", 50.0)
            .expect_err("save must fail");
        assert!(matches!(err, LedgerError::Io(_)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.compute_balance(), 50.0);
    }

    #[test]
    fn non_finite_amounts_are_rejected_without_saving() {
        let mut store = LedgerStore::with_storage(RecordingStorage::default());
        store.add(TransactionKind::Income, "salary", 1000.0).unwrap();

        let err = store
            .add(TransactionKind::Expense, "x", f64::INFINITY)
            .expect_err("infinity cannot be stored");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        let err = store
            .edit(0, TransactionKind::Income, "salary", f64::NAN)
            .expect_err("NaN cannot be stored");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(0).unwrap().amount, 1000.0);
        assert_eq!(store.storage.saves.borrow().len(), 1);
    }

    #[test]
    fn starts_from_loaded_ledger() {
        let storage = RecordingStorage {
            initial: Ledger::from_transactions(vec![Transaction::new(
                TransactionKind::Expense,
                "coffee",
                3.5,
            )]),
            ..RecordingStorage::default()
        };
        let store = LedgerStore::with_storage(storage);
        assert_eq!(store.len(), 1);
        assert_eq!(store.compute_balance(), -3.5);
    }
}
