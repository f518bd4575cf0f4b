use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid transaction kind `{0}`: expected `income` or `expense`")]
    InvalidKind(String),
    #[error("Invalid transaction index {index}: ledger holds {len} transaction(s)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Invalid amount {0}: amounts must be finite numbers")]
    InvalidAmount(f64),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures raised while reading or writing the user configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Failures surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Description must not be empty")]
    EmptyDescription,
}
