//! These structs provide the CLI interface for the sales CLI.

use crate::chart::ChartKind;
use crate::config::{Options, SortOrder, Theme, TimeBucket, UnitScale};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// sales: summarize a spreadsheet of sales transactions.
///
/// The purpose of this program is to load a CSV export of sales
/// transactions, clean it, and either print a plain-text summary report or
/// derive chart-ready series for an external plotting frontend. Rows whose
/// order date or revenue cannot be parsed are dropped, never repaired.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Load a sales spreadsheet and print the summary report.
    Report(ReportArgs),

    /// Load a sales spreadsheet and print a chart specification as JSON.
    ///
    /// The JSON is consumed by the external rendering frontend; this program
    /// draws nothing itself.
    Chart(ChartArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,
}

impl Common {
    pub fn new(log_level: LevelFilter) -> Self {
        Self { log_level }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }
}

/// Args for the `sales report` command.
#[derive(Debug, Parser, Clone)]
pub struct ReportArgs {
    /// The spreadsheet file to load.
    #[arg(long, short = 'f')]
    file: PathBuf,

    /// Restate revenue in millions for display.
    #[arg(long)]
    millions: bool,
}

impl ReportArgs {
    pub fn new(file: impl Into<PathBuf>, millions: bool) -> Self {
        Self {
            file: file.into(),
            millions,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn options(&self) -> Options {
        Options::new(
            unit_scale(self.millions),
            SortOrder::default(),
            TimeBucket::default(),
            Theme::default(),
        )
    }
}

/// Args for the `sales chart` command.
#[derive(Debug, Parser, Clone)]
pub struct ChartArgs {
    /// Which chart to derive: bar, line or pie.
    #[arg(value_enum)]
    kind: ChartKind,

    /// The spreadsheet file to load.
    #[arg(long, short = 'f')]
    file: PathBuf,

    /// Restate revenue in millions for display.
    #[arg(long)]
    millions: bool,

    /// Sort direction for the bar chart.
    #[arg(long, value_enum, default_value_t)]
    order: SortOrder,

    /// Calendar period for the line chart's time buckets.
    #[arg(long, value_enum, default_value_t)]
    bucket: TimeBucket,

    /// Cosmetic color theme passed through to the renderer.
    #[arg(long, value_enum, default_value_t)]
    theme: Theme,
}

impl ChartArgs {
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    pub fn options(&self) -> Options {
        Options::new(unit_scale(self.millions), self.order, self.bucket, self.theme)
    }
}

fn unit_scale(millions: bool) -> UnitScale {
    if millions {
        UnitScale::Millions
    } else {
        UnitScale::None
    }
}
