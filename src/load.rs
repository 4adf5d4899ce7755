//! Loads a sales spreadsheet into a cleaned `TransactionTable`.
//!
//! Cleaning drops rows, never repairs them: a row survives only if its order
//! date and revenue both parse and its category label is non-empty.

use crate::config::UnitScale;
use crate::model::{Amount, Columns, MissingColumn, Transaction, TransactionTable};
use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::fmt;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Date formats accepted for the order-date column, tried in order. ISO
/// first, then the slashed forms spreadsheet exports commonly use, then
/// datetime forms truncated to their date part.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m/%d/%y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// The errors that abort a load attempt.
#[derive(Debug)]
pub enum LoadError {
    /// The file could not be read as tabular data.
    Format { path: PathBuf, source: csv::Error },
    /// A required column is missing from the header row.
    Schema { source: MissingColumn },
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Format { path, .. } => {
                write!(
                    f,
                    "'{}' could not be read as tabular data",
                    path.display()
                )
            }
            LoadError::Schema { source } => Display::fmt(source, f),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Format { source, .. } => Some(source),
            LoadError::Schema { source } => Some(source),
        }
    }
}

impl LoadError {
    fn format(path: &Path, source: csv::Error) -> Self {
        LoadError::Format {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<MissingColumn> for LoadError {
    fn from(source: MissingColumn) -> Self {
        LoadError::Schema { source }
    }
}

/// Reads the spreadsheet at `path` and returns the cleaned table.
///
/// `unit_scale` optionally restates every revenue cell in display-friendly
/// units (millions) at load time. The source file is never written to.
pub fn load(path: impl AsRef<Path>, unit_scale: UnitScale) -> Result<TransactionTable, LoadError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| LoadError::format(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| LoadError::format(path, e))?
        .clone();
    let columns = Columns::locate(&headers.iter().collect::<Vec<_>>())?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for (ix, record) in reader.records().enumerate() {
        let record = record.map_err(|e| LoadError::format(path, e))?;
        // Data starts on line 2, after the header row.
        let line = ix + 2;
        match clean_row(&record, &columns, unit_scale) {
            Ok(transaction) => rows.push(transaction),
            Err(defect) => {
                dropped += 1;
                debug!("dropping row at line {line}: {defect}");
            }
        }
    }

    debug!(
        "loaded {} rows from '{}' ({} dropped)",
        rows.len(),
        path.display(),
        dropped
    );
    Ok(TransactionTable::new(rows, dropped))
}

/// Why a single row was excluded during cleaning.
#[derive(Debug, Clone, Eq, PartialEq)]
enum RowDefect {
    MissingCategory,
    BadDate(String),
    BadRevenue(String),
}

impl Display for RowDefect {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RowDefect::MissingCategory => write!(f, "the category cell is empty"),
            RowDefect::BadDate(cell) => write!(f, "'{cell}' is not a calendar date"),
            RowDefect::BadRevenue(cell) => write!(f, "'{cell}' is not a revenue amount"),
        }
    }
}

fn clean_row(
    record: &StringRecord,
    columns: &Columns,
    unit_scale: UnitScale,
) -> Result<Transaction, RowDefect> {
    let cell = |ix: usize| record.get(ix).unwrap_or_default();

    let category = cell(columns.category());
    if category.is_empty() {
        return Err(RowDefect::MissingCategory);
    }

    let date_cell = cell(columns.order_date());
    let order_date =
        parse_order_date(date_cell).ok_or_else(|| RowDefect::BadDate(date_cell.to_string()))?;

    let revenue_cell = cell(columns.revenue());
    let revenue = Amount::from_str(revenue_cell)
        .map_err(|_| RowDefect::BadRevenue(revenue_cell.to_string()))?;
    let revenue = match unit_scale.divisor() {
        Some(divisor) => revenue.scale_down(divisor),
        None => revenue,
    };

    Ok(Transaction::new(category, order_date, revenue))
}

/// Parses an order-date cell against the accepted formats.
fn parse_order_date(cell: &str) -> Option<NaiveDate> {
    if cell.is_empty() {
        return None;
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cell, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(cell, format) {
            return Some(datetime.date());
        }
    }
    None
}
