use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

use super::transaction::{Transaction, TransactionKind};

/// Ordered, position-addressed collection of transactions.
///
/// Serializes as a bare JSON array so the on-disk file is just the list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
}

/// Aggregated income, expense and resulting balance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    /// Appends a transaction and returns its index.
    pub fn push(&mut self, transaction: Transaction) -> usize {
        self.transactions.push(transaction);
        self.transactions.len() - 1
    }

    /// Replaces the transaction at `index`, returning the previous value.
    pub fn replace(
        &mut self,
        index: usize,
        transaction: Transaction,
    ) -> Result<Transaction, LedgerError> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.transactions[index], transaction))
    }

    pub fn remove(&mut self, index: usize) -> Result<Transaction, LedgerError> {
        self.check_index(index)?;
        Ok(self.transactions.remove(index))
    }

    pub fn balance(&self) -> f64 {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    pub fn totals(&self) -> Totals {
        let mut totals = Totals::default();
        for txn in &self.transactions {
            match txn.kind {
                TransactionKind::Income => totals.income += txn.amount,
                TransactionKind::Expense => totals.expense += txn.amount,
            }
        }
        totals.balance = totals.income - totals.expense;
        totals
    }

    /// Rejects the first NaN or infinite amount; JSON cannot represent them.
    pub fn check_amounts(&self) -> Result<(), LedgerError> {
        self.transactions
            .iter()
            .try_for_each(|txn| check_amount(txn.amount))
    }

    fn check_index(&self, index: usize) -> Result<(), LedgerError> {
        if index >= self.transactions.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.transactions.len(),
            });
        }
        Ok(())
    }
}

pub(crate) fn check_amount(amount: f64) -> Result<(), LedgerError> {
    if amount.is_finite() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(amount))
    }
}
