use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// A single recorded ledger entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(alias = "tipo")]
    pub kind: TransactionKind,
    #[serde(alias = "descrizione")]
    pub description: String,
    #[serde(alias = "importo")]
    pub amount: f64,
}

impl Transaction {
    pub fn new(kind: TransactionKind, description: impl Into<String>, amount: f64) -> Self {
        Self {
            kind,
            description: description.into(),
            amount,
        }
    }

    /// Contribution of this entry to the running balance.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    #[serde(alias = "entrata")]
    Income,
    #[serde(alias = "uscita")]
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Capitalized label used when rendering lists.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "entrata" => Ok(TransactionKind::Income),
            "expense" | "uscita" => Ok(TransactionKind::Expense),
            _ => Err(LedgerError::InvalidKind(value.to_string())),
        }
    }
}
