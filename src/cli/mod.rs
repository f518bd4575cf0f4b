//! Command-line front end: parses user input into typed values, calls the
//! ledger store, and re-renders the ledger after every change.

pub mod output;

use std::path::PathBuf;

use clap::{builder::BoolishValueParser, ArgAction, Parser, Subcommand};

use crate::{
    config::{Config, ConfigManager, LEDGER_FILE_ENV},
    errors::{CliError, LedgerError},
    ledger::{LedgerStore, TransactionKind},
};

use output::OutputPreferences;

#[derive(Debug, Parser)]
#[command(name = "cashbook", version, about = "Record income and expenses in a local JSON ledger")]
pub struct Cli {
    /// Ledger file to operate on.
    #[arg(long, short, global = true, env = LEDGER_FILE_ENV)]
    pub file: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory).
    #[arg(long, global = true, env = "CASHBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show every transaction and the balance.
    List,
    /// Append a transaction.
    Add {
        /// `income` or `expense`.
        kind: String,
        description: String,
        #[arg(allow_negative_numbers = true, value_parser = parse_amount)]
        amount: f64,
    },
    /// Replace the transaction at INDEX; omitted fields keep their value.
    Edit {
        index: usize,
        #[arg(long)]
        kind: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, allow_negative_numbers = true, value_parser = parse_amount)]
        amount: Option<f64>,
    },
    /// Remove the transaction at INDEX.
    Delete { index: usize },
    /// Print income, expense and balance totals.
    Balance,
    /// Show or change stored preferences.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the configuration file location and its values.
    Show,
    /// Remember PATH as the default ledger file.
    SetFile { path: PathBuf },
    /// Turn colored output on or off.
    Color {
        #[arg(action = ArgAction::Set, value_parser = BoolishValueParser::new())]
        enabled: bool,
    },
}

/// Amounts must be finite: JSON has no encoding for NaN or infinity.
fn parse_amount(raw: &str) -> Result<f64, String> {
    let amount: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("`{raw}` is not a number: {err}"))?;
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(format!("`{raw}` is not a finite amount"))
    }
}

/// Parses process arguments and runs the selected command.
pub fn run_cli() -> Result<(), CliError> {
    run(Cli::parse())
}

pub fn run(cli: Cli) -> Result<(), CliError> {
    let manager = cli
        .config
        .clone()
        .map(ConfigManager::new)
        .unwrap_or_else(ConfigManager::default_location);
    let config = manager.load()?;
    let prefs = OutputPreferences {
        color_enabled: config.color_enabled && !cli.no_color,
    };
    output::set_preferences(prefs);

    let open_store = || LedgerStore::open(config.resolve_ledger_file(cli.file.as_deref()));

    let store = match cli.command.unwrap_or(Command::List) {
        Command::Config { action } => return run_config(&manager, &config, action),
        Command::List => open_store(),
        Command::Add {
            kind,
            description,
            amount,
        } => {
            let kind: TransactionKind = kind.parse()?;
            let description = require_description(description)?;
            let mut store = open_store();
            store.add(kind, description, amount)?;
            output::success("Transaction added.");
            store
        }
        Command::Edit {
            index,
            kind,
            description,
            amount,
        } => {
            let mut store = open_store();
            let current = store
                .get(index)
                .cloned()
                .ok_or(LedgerError::IndexOutOfRange {
                    index,
                    len: store.len(),
                })?;
            let kind = match kind {
                Some(raw) => raw.parse()?,
                None => current.kind,
            };
            let description = match description {
                Some(raw) => require_description(raw)?,
                None => current.description,
            };
            store.edit(index, kind, description, amount.unwrap_or(current.amount))?;
            output::success("Transaction updated.");
            store
        }
        Command::Delete { index } => {
            let mut store = open_store();
            store.delete(index)?;
            output::success("Transaction deleted.");
            store
        }
        Command::Balance => {
            let totals = open_store().totals();
            output::info(output::format_totals(&totals));
            output::info(output::format_balance(totals.balance, &prefs));
            return Ok(());
        }
    };

    output::render_ledger(store.transactions(), &store.totals());
    Ok(())
}

fn run_config(
    manager: &ConfigManager,
    config: &Config,
    action: ConfigAction,
) -> Result<(), CliError> {
    let mut updated = config.clone();
    match action {
        ConfigAction::Show => {
            output::section("Configuration");
            output::info(format!("Config file: {}", manager.path().display()));
            output::info(format!(
                "Ledger file: {}",
                config.resolve_ledger_file(None).display()
            ));
            output::info(format!(
                "Color: {}",
                if config.color_enabled { "on" } else { "off" }
            ));
            return Ok(());
        }
        ConfigAction::SetFile { path } => updated.ledger_file = Some(path),
        ConfigAction::Color { enabled } => updated.color_enabled = enabled,
    }
    manager.save(&updated)?;
    tracing::info!(path = %manager.path().display(), "configuration saved");
    output::success("Configuration saved.");
    Ok(())
}

fn require_description(raw: String) -> Result<String, CliError> {
    if raw.trim().is_empty() {
        return Err(CliError::EmptyDescription);
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn try_cli(temp: &TempDir, args: &[&str]) -> Result<Cli, clap::Error> {
        let file = temp.path().join("ledger.json");
        let config = temp.path().join("config.json");
        let mut argv = vec![
            "cashbook".to_string(),
            "--no-color".to_string(),
            "--file".to_string(),
            file.display().to_string(),
            "--config".to_string(),
            config.display().to_string(),
        ];
        argv.extend(args.iter().map(|arg| arg.to_string()));
        Cli::try_parse_from(argv)
    }

    fn cli(temp: &TempDir, args: &[&str]) -> Cli {
        try_cli(temp, args).expect("valid arguments")
    }

    fn ledger_contents(temp: &TempDir) -> String {
        std::fs::read_to_string(temp.path().join("ledger.json")).expect("ledger file")
    }

    fn reopen(temp: &TempDir) -> LedgerStore {
        LedgerStore::open(temp.path().join("ledger.json"))
    }

    #[test]
    fn edit_keeps_fields_that_are_not_given() {
        let temp = TempDir::new().unwrap();
        run(cli(&temp, &["add", "expense", "rent", "400"])).unwrap();
        run(cli(&temp, &["edit", "0", "--amount", "500"])).unwrap();

        let store = reopen(&temp);
        let txn = store.get(0).unwrap();
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.description, "rent");
        assert_eq!(txn.amount, 500.0);
    }

    #[test]
    fn add_rejects_empty_description() {
        let temp = TempDir::new().unwrap();
        let err = run(cli(&temp, &["add", "income", "  ", "10"])).unwrap_err();
        assert!(matches!(err, CliError::EmptyDescription));
        assert!(reopen(&temp).is_empty());
    }

    #[test]
    fn add_rejects_unknown_kind() {
        let temp = TempDir::new().unwrap();
        let err = run(cli(&temp, &["add", "deposit", "x", "10"])).unwrap_err();
        assert!(matches!(
            err,
            CliError::Ledger(LedgerError::InvalidKind(ref raw)) if raw == "deposit"
        ));
        assert!(reopen(&temp).is_empty());
    }

    #[test]
    fn edit_unknown_index_reports_range() {
        let temp = TempDir::new().unwrap();
        let err = run(cli(&temp, &["edit", "2", "--amount", "1"])).unwrap_err();
        assert!(matches!(
            err,
            CliError::Ledger(LedgerError::IndexOutOfRange { index: 2, len: 0 })
        ));
    }

    #[test]
    fn negative_amounts_are_accepted() {
        let temp = TempDir::new().unwrap();
        run(cli(&temp, &["add", "income", "refund", "-5"])).unwrap();
        assert_eq!(reopen(&temp).compute_balance(), -5.0);
    }

    #[test]
    fn edit_rejects_unknown_kind_and_keeps_file() {
        let temp = TempDir::new().unwrap();
        run(cli(&temp, &["add", "income", "salary", "1000"])).unwrap();
        let before = ledger_contents(&temp);

        let err = run(cli(&temp, &["edit", "0", "--kind", "deposit"])).unwrap_err();
        assert!(matches!(
            err,
            CliError::Ledger(LedgerError::InvalidKind(ref raw)) if raw == "deposit"
        ));
        assert_eq!(ledger_contents(&temp), before);
    }

    #[test]
    fn non_finite_amounts_are_refused_at_parse_time() {
        let temp = TempDir::new().unwrap();
        run(cli(&temp, &["add", "income", "salary", "1000"])).unwrap();
        let before = ledger_contents(&temp);

        for args in [
            &["add", "expense", "oops", "NaN"][..],
            &["add", "expense", "oops", "inf"][..],
            &["add", "expense", "oops", "-infinity"][..],
            &["edit", "0", "--amount", "NaN"][..],
        ] {
            assert!(try_cli(&temp, args).is_err(), "{args:?} must be rejected");
        }

        run(cli(&temp, &["add", "income", "next", "1"])).unwrap();
        let store = reopen(&temp);
        assert_eq!(store.len(), 2);
        assert_eq!(store.compute_balance(), 1001.0);
        assert_ne!(ledger_contents(&temp), before);
    }

    #[test]
    fn parse_amount_accepts_plain_numbers() {
        assert_eq!(parse_amount("12.5"), Ok(12.5));
        assert_eq!(parse_amount("-3"), Ok(-3.0));
        assert!(parse_amount("twelve").is_err());
    }

    #[test]
    fn config_commands_persist_preferences() {
        let temp = TempDir::new().unwrap();
        let books = temp.path().join("books.json");
        run(cli(&temp, &["config", "set-file", &books.display().to_string()])).unwrap();
        run(cli(&temp, &["config", "color", "off"])).unwrap();
        run(cli(&temp, &["config", "show"])).unwrap();

        let saved = ConfigManager::new(temp.path().join("config.json"))
            .load()
            .unwrap();
        assert_eq!(saved.ledger_file, Some(books));
        assert!(!saved.color_enabled);
        assert!(!temp.path().join("ledger.json").exists());
    }
}
