use serde::Serialize;
use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::ledger::Ledger;

use super::{LedgerStorage, Result};

pub const DEFAULT_LEDGER_FILE: &str = "ledger.json";
const INDENT: &[u8] = b"    ";

/// Single-file JSON persistence for a ledger.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LedgerStorage for JsonFileStorage {
    fn load(&self) -> Ledger {
        load_ledger_from_path(&self.path)
    }

    fn save(&self, ledger: &Ledger) -> Result<()> {
        save_ledger_to_path(ledger, &self.path)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Loads a ledger from `path`, falling back to an empty ledger when the file is
/// absent, unreadable or not valid ledger JSON.
pub fn load_ledger_from_path(path: &Path) -> Ledger {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "ledger file not found, starting empty");
            return Ledger::new();
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "unable to read ledger file, starting empty");
            return Ledger::new();
        }
    };
    match serde_json::from_str::<Ledger>(&data) {
        Ok(ledger) => {
            tracing::debug!(path = %path.display(), count = ledger.len(), "ledger loaded");
            ledger
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "ledger file is malformed, starting empty");
            Ledger::new()
        }
    }
}

/// Overwrites `path` with the pretty-printed ledger. The file is rewritten in
/// place; an interrupted write can leave it truncated. A ledger holding a NaN
/// or infinite amount is refused and the file is left as it was.
pub fn save_ledger_to_path(ledger: &Ledger, path: &Path) -> Result<()> {
    ledger.check_amounts()?;
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serialize_ledger(ledger)?;
    let mut file = File::create(path)?;
    file.write_all(&json)?;
    file.flush()?;
    tracing::debug!(path = %path.display(), count = ledger.len(), "ledger saved");
    Ok(())
}

fn serialize_ledger(ledger: &Ledger) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    ledger.serialize(&mut serializer)?;
    Ok(buf)
}
