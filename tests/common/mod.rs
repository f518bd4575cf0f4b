#![allow(dead_code)]

use std::path::PathBuf;

use cashbook::LedgerStore;
use tempfile::TempDir;

/// Opens a store backed by a fresh temporary directory. Keep the `TempDir`
/// alive for as long as the store is used.
pub fn temp_store() -> (LedgerStore, TempDir) {
    let temp = TempDir::new().expect("create temp dir");
    let store = LedgerStore::open(ledger_path(&temp));
    (store, temp)
}

pub fn ledger_path(temp: &TempDir) -> PathBuf {
    temp.path().join("ledger.json")
}
