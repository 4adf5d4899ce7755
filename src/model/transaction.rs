//! The cleaned transaction table.

use crate::model::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single cleaned sales transaction.
///
/// Construction goes through the loader, which guarantees the date and
/// revenue both parsed. Rows that fail either parse never become a
/// `Transaction`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    category: String,
    order_date: NaiveDate,
    revenue: Amount,
}

impl Transaction {
    pub fn new(category: impl Into<String>, order_date: NaiveDate, revenue: Amount) -> Self {
        Self {
            category: category.into(),
            order_date,
            revenue,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn order_date(&self) -> NaiveDate {
        self.order_date
    }

    pub fn revenue(&self) -> Amount {
        self.revenue
    }
}

/// The cleaned table for one load cycle.
///
/// Immutable once built; the session replaces it wholesale on the next load.
/// `dropped` counts the source rows excluded during cleaning.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransactionTable {
    rows: Vec<Transaction>,
    dropped: usize,
}

impl TransactionTable {
    pub fn new(rows: Vec<Transaction>, dropped: usize) -> Self {
        Self { rows, dropped }
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    /// Number of rows that survived cleaning.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of source rows excluded during cleaning.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
