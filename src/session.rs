//! The display shell's handle on the pipeline.
//!
//! A `Session` owns the options and the single mutable "current table" slot.
//! Each load replaces the slot wholesale; every downstream derivation reads
//! the current table and computes fresh.

use crate::aggregate::{aggregate, AggregateResult, EmptyTableError};
use crate::chart::{ChartKind, ChartSpec};
use crate::config::Options;
use crate::load::load;
use crate::model::TransactionTable;
use crate::report::format_report;
use crate::Result;
use anyhow::{anyhow, Context};
use std::path::Path;
use tracing::info;

#[derive(Debug, Default)]
pub struct Session {
    options: Options,
    table: Option<TransactionTable>,
}

impl Session {
    pub fn new(options: Options) -> Self {
        Self {
            options,
            table: None,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The currently loaded table, if any.
    pub fn table(&self) -> Option<&TransactionTable> {
        self.table.as_ref()
    }

    /// Loads `path`, replacing any previously loaded table. On failure the
    /// previous table is left in place and the error is surfaced.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&TransactionTable> {
        let path = path.as_ref();
        let table = load(path, self.options.unit_scale())
            .with_context(|| format!("Unable to load sales data from '{}'", path.display()))?;
        info!(
            "loaded {} transactions from '{}' ({} rows dropped during cleaning)",
            table.len(),
            path.display(),
            table.dropped()
        );
        self.table = Some(table);
        Ok(self.current()?)
    }

    /// Computes the summary statistics for the current table.
    pub fn aggregate(&self) -> Result<AggregateResult> {
        Ok(aggregate(self.current()?)?)
    }

    /// Renders the summary report for the current table.
    pub fn report(&self) -> Result<String> {
        let result = self.aggregate()?;
        Ok(format_report(&result, self.options.unit_scale()))
    }

    /// Derives the requested chart from the current table.
    ///
    /// An empty table produces no chart at all, the same as it produces no
    /// report.
    pub fn chart(&self, kind: ChartKind) -> Result<ChartSpec> {
        let table = self.current()?;
        if table.is_empty() {
            return Err(EmptyTableError.into());
        }
        Ok(ChartSpec::build(table, kind, &self.options))
    }

    fn current(&self) -> Result<&TransactionTable> {
        self.table
            .as_ref()
            .ok_or_else(|| anyhow!("no spreadsheet is loaded"))
    }
}
