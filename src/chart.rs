//! Derives chart-ready series from a cleaned `TransactionTable`.
//!
//! Nothing here renders pixels. The derivations are pure; the `Renderer`
//! trait is the seam to the external plotting collaborator, which owns
//! drawing, hover handling and everything else cosmetic.

use crate::aggregate::{totals_by_category, CategoryTotal};
use crate::config::{Options, SortOrder, Theme, TimeBucket, UnitScale};
use crate::model::{Amount, TransactionTable};
use crate::Result;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const BAR_TITLE: &str = "Total Sales by Product";
const LINE_TITLE: &str = "Sales Over Time";
const PIE_TITLE: &str = "Sales Distribution by Product";

/// The chart views the display shell can switch between.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
}

serde_plain::derive_display_from_serialize!(ChartKind);
serde_plain::derive_fromstr_from_deserialize!(ChartKind);

/// Revenue summed over one calendar bucket.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TimePoint {
    period_start: NaiveDate,
    total: Amount,
}

impl TimePoint {
    pub fn new(period_start: NaiveDate, total: Amount) -> Self {
        Self {
            period_start,
            total,
        }
    }

    pub fn period_start(&self) -> NaiveDate {
        self.period_start
    }

    pub fn total(&self) -> Amount {
        self.total
    }
}

/// One category's share of the grand total, in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryShare {
    category: String,
    share: f64,
}

impl CategoryShare {
    pub fn new(category: impl Into<String>, share: f64) -> Self {
        Self {
            category: category.into(),
            share,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn share(&self) -> f64 {
        self.share
    }
}

/// The data behind one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSeries {
    CategoryTotals(Vec<CategoryTotal>),
    TimeSeries(Vec<TimePoint>),
    Proportions(Vec<CategoryShare>),
}

/// Everything the external renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ChartSpec {
    title: String,
    theme: Theme,
    series: ChartSeries,
}

impl ChartSpec {
    /// Derives the series for `kind` from `table` using the session options.
    pub fn build(table: &TransactionTable, kind: ChartKind, options: &Options) -> Self {
        let (title, series) = match kind {
            ChartKind::Bar => (
                BAR_TITLE,
                ChartSeries::CategoryTotals(category_totals(table, options.sort_order())),
            ),
            ChartKind::Line => (
                LINE_TITLE,
                ChartSeries::TimeSeries(time_series(table, options.bucket())),
            ),
            ChartKind::Pie => (PIE_TITLE, ChartSeries::Proportions(proportions(table))),
        };
        Self {
            title: title.to_string(),
            theme: options.theme(),
            series,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn series(&self) -> &ChartSeries {
        &self.series
    }
}

/// Per-category totals sorted by total according to `order`.
///
/// The sort is stable, so tied categories keep their first-seen grouping
/// order.
pub fn category_totals(table: &TransactionTable, order: SortOrder) -> Vec<CategoryTotal> {
    let mut totals = totals_by_category(table);
    match order {
        SortOrder::Asc => totals.sort_by(|a, b| a.total().cmp(&b.total())),
        SortOrder::Desc => totals.sort_by(|a, b| b.total().cmp(&a.total())),
    }
    totals
}

/// Revenue summed per calendar bucket, in chronological order.
///
/// Buckets with no transactions are omitted rather than zero-filled.
pub fn time_series(table: &TransactionTable, bucket: TimeBucket) -> Vec<TimePoint> {
    let mut buckets: BTreeMap<NaiveDate, Amount> = BTreeMap::new();
    for row in table.rows() {
        let start = bucket.truncate(row.order_date());
        *buckets.entry(start).or_insert(Amount::ZERO) += row.revenue();
    }
    buckets
        .into_iter()
        .map(|(period_start, total)| TimePoint::new(period_start, total))
        .collect()
}

/// Each category's fraction of the grand total, in first-seen order.
///
/// The shares sum to 1.0 within floating-point tolerance. A zero grand
/// total has no meaningful shares and yields an empty series.
pub fn proportions(table: &TransactionTable) -> Vec<CategoryShare> {
    let totals = totals_by_category(table);
    let grand: Decimal = totals.iter().map(|c| c.total().value()).sum();
    if grand.is_zero() {
        return Vec::new();
    }
    totals
        .into_iter()
        .map(|c| {
            let share = (c.total().value() / grand).to_f64().unwrap_or_default();
            CategoryShare::new(c.category().to_string(), share)
        })
        .collect()
}

/// The annotation/tooltip text for one value, e.g. `1,234.50` or `2.50M`
/// when revenue was scaled to millions.
pub fn value_label(amount: Amount, unit: UnitScale) -> String {
    let suffix = match unit {
        UnitScale::None => "",
        UnitScale::Millions => "M",
    };
    format!(
        "{}{suffix}",
        format_num::format_num!(",.2", amount.to_f64())
    )
}

/// A cursor position reported by the rendering surface, in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HoverPos {
    pub x: f64,
    pub y: f64,
}

/// Implemented by the external plotting collaborator.
///
/// This crate derives series; the collaborator draws them. `hover` is the
/// optional interactivity hook: the surface calls it as the cursor moves and
/// shows any returned text as a tooltip.
pub trait Renderer {
    fn draw(&mut self, spec: &ChartSpec) -> Result<()>;

    fn hover(&mut self, _pos: HoverPos) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::table;
    use std::str::FromStr;

    fn sample() -> TransactionTable {
        table(&[
            ("Fruits", "2023-01-01", "100"),
            ("Fruits", "2023-06-01", "200"),
            ("Vegetables", "2023-01-01", "50"),
            ("Snacks", "2024-03-05", "150"),
        ])
    }

    #[test]
    fn test_category_totals_desc() {
        let totals = category_totals(&sample(), SortOrder::Desc);
        let names: Vec<&str> = totals.iter().map(|c| c.category()).collect();
        assert_eq!(names, vec!["Fruits", "Snacks", "Vegetables"]);
    }

    #[test]
    fn test_desc_reverses_asc_when_no_ties() {
        let asc = category_totals(&sample(), SortOrder::Asc);
        let mut desc = category_totals(&sample(), SortOrder::Desc);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_tied_categories_keep_first_seen_order() {
        let table = table(&[
            ("B", "2023-01-01", "10"),
            ("A", "2023-01-02", "10"),
            ("C", "2023-01-03", "10"),
        ]);
        let totals = category_totals(&table, SortOrder::Desc);
        let names: Vec<&str> = totals.iter().map(|c| c.category()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_yearly_buckets_merge_same_year_rows() {
        let series = time_series(&sample(), TimeBucket::Year);
        assert_eq!(series.len(), 2);
        assert_eq!(
            series[0].period_start(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(series[0].total(), Amount::from_str("350").unwrap());
        assert_eq!(
            series[1].period_start(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        assert_eq!(series[1].total(), Amount::from_str("150").unwrap());
    }

    #[test]
    fn test_daily_buckets_merge_same_day_rows_and_stay_chronological() {
        let table = table(&[
            ("A", "2023-06-01", "5"),
            ("B", "2023-01-01", "1"),
            ("C", "2023-01-01", "2"),
        ]);
        let series = time_series(&table, TimeBucket::Day);
        assert_eq!(series.len(), 2);
        assert_eq!(
            series[0].period_start(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(series[0].total(), Amount::from_str("3").unwrap());
        assert_eq!(series[1].total(), Amount::from_str("5").unwrap());
    }

    #[test]
    fn test_empty_periods_are_omitted() {
        // 2023 and 2025 have data; 2024 must not appear as a zero bucket.
        let table = table(&[("A", "2023-01-01", "1"), ("A", "2025-01-01", "2")]);
        let series = time_series(&table, TimeBucket::Year);
        assert_eq!(series.len(), 2);
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let shares = proportions(&sample());
        let sum: f64 = shares.iter().map(|s| s.share()).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(shares.iter().all(|s| (0.0..=1.0).contains(&s.share())));
        assert_eq!(shares[0].category(), "Fruits");
        assert!((shares[0].share() - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_proportions_of_zero_total_are_empty() {
        let table = table(&[("A", "2023-01-01", "0"), ("B", "2023-01-02", "0")]);
        assert!(proportions(&table).is_empty());
    }

    #[test]
    fn test_value_labels() {
        let amount = Amount::from_str("1234.5").unwrap();
        assert_eq!(value_label(amount, UnitScale::None), "1,234.50");
        assert_eq!(value_label(amount, UnitScale::Millions), "1,234.50M");
    }

    #[test]
    fn test_chart_titles_and_theme() {
        let options = Options::default();
        let bar = ChartSpec::build(&sample(), ChartKind::Bar, &options);
        assert_eq!(bar.title(), "Total Sales by Product");
        assert_eq!(bar.theme(), Theme::Dark);
        let line = ChartSpec::build(&sample(), ChartKind::Line, &options);
        assert_eq!(line.title(), "Sales Over Time");
        let pie = ChartSpec::build(&sample(), ChartKind::Pie, &options);
        assert_eq!(pie.title(), "Sales Distribution by Product");
        assert!(matches!(pie.series(), ChartSeries::Proportions(_)));
    }

    #[test]
    fn test_chart_spec_serializes_for_the_renderer() {
        let spec = ChartSpec::build(&sample(), ChartKind::Bar, &Options::default());
        let json = serde_json::to_string(&spec).unwrap();
        let back: ChartSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, back);
    }
}
