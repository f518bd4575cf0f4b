use colored::Colorize;
use std::fmt;
use std::sync::{OnceLock, RwLock};

use crate::ledger::{Totals, Transaction};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Error,
    Section,
}

#[derive(Clone, Copy, Debug)]
pub struct OutputPreferences {
    pub color_enabled: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            color_enabled: true,
        }
    }
}

static PREFERENCES: OnceLock<RwLock<OutputPreferences>> = OnceLock::new();

pub fn set_preferences(prefs: OutputPreferences) {
    if !prefs.color_enabled {
        colored::control::set_override(false);
    }
    let lock = PREFERENCES.get_or_init(|| RwLock::new(OutputPreferences::default()));
    if let Ok(mut guard) = lock.write() {
        *guard = prefs;
    }
}

fn preferences() -> OutputPreferences {
    PREFERENCES
        .get_or_init(|| RwLock::new(OutputPreferences::default()))
        .read()
        .map(|guard| *guard)
        .unwrap_or_default()
}

fn apply_style(kind: MessageKind, message: impl fmt::Display, prefs: &OutputPreferences) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Success => format!("[ok] {text}"),
        MessageKind::Error => format!("Error: {text}"),
        MessageKind::Info => text,
    };

    if !prefs.color_enabled {
        return formatted;
    }

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message, &preferences());
    match kind {
        MessageKind::Error => eprintln!("{}", formatted),
        _ => println!("{}", formatted),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// One list row: `[index] Kind  description  amount`.
pub fn format_transaction(index: usize, txn: &Transaction) -> String {
    format!(
        "[{index}] {kind:<8} {description:<30} {amount:>12.2}",
        kind = txn.kind.label(),
        description = txn.description,
        amount = txn.amount,
    )
}

/// Balance line, red when the balance is negative.
pub fn format_balance(balance: f64, prefs: &OutputPreferences) -> String {
    let line = format!("Balance: {balance:.2}");
    if prefs.color_enabled && balance < 0.0 {
        line.red().bold().to_string()
    } else {
        line
    }
}

pub fn format_totals(totals: &Totals) -> String {
    format!(
        "Income: {:.2}  Expense: {:.2}",
        totals.income, totals.expense
    )
}

/// Renders the full list followed by the balance, as after every mutation.
pub fn render_ledger(transactions: &[Transaction], totals: &Totals) {
    section("Transactions");
    if transactions.is_empty() {
        info("No transactions recorded.");
    }
    for (index, txn) in transactions.iter().enumerate() {
        info(format_transaction(index, txn));
    }
    info(format_balance(totals.balance, &preferences()));
}
