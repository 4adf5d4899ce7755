//! Formats an `AggregateResult` as the plain-text summary report.
//!
//! Pure string building; printing is the caller's business.

use crate::aggregate::{AggregateResult, CategoryTotal};
use crate::config::UnitScale;
use crate::model::ITEM_TYPE;

const HEADER: &str = "Summary Report";
const RULE: &str = "====================";
const REVENUE_HEADING: &str = "Total Revenue";

/// Renders the summary report.
///
/// ```text
/// Summary Report
/// ====================
/// Total Sales: $350.00
/// Average Sales: $116.67
///
/// Sales by Product:
/// | Item Type  | Total Revenue |
/// |:-----------|--------------:|
/// | Fruits     |       $300.00 |
/// | Vegetables |        $50.00 |
/// ```
///
/// The `" Million"` suffix follows the totals exactly when `unit` is
/// millions. Category rows keep the order of `result.by_category()`.
pub fn format_report(result: &AggregateResult, unit: UnitScale) -> String {
    let suffix = unit.suffix();
    let mut report = String::new();
    report.push_str(HEADER);
    report.push('\n');
    report.push_str(RULE);
    report.push('\n');
    report.push_str(&format!("Total Sales: {}{}\n", result.total(), suffix));
    report.push_str(&format!("Average Sales: {}{}\n", result.average(), suffix));
    report.push('\n');
    report.push_str("Sales by Product:\n");
    report.push_str(&markdown_table(result.by_category()));
    report
}

/// A two-column markdown table: left-aligned labels, right-aligned amounts.
fn markdown_table(rows: &[CategoryTotal]) -> String {
    let amounts: Vec<String> = rows.iter().map(|r| r.total().to_string()).collect();
    let label_width = rows
        .iter()
        .map(|r| r.category().chars().count())
        .chain([ITEM_TYPE.chars().count()])
        .max()
        .unwrap_or_default();
    let amount_width = amounts
        .iter()
        .map(|a| a.chars().count())
        .chain([REVENUE_HEADING.chars().count()])
        .max()
        .unwrap_or_default();

    let mut table = String::new();
    table.push_str(&format!(
        "| {ITEM_TYPE:<label_width$} | {REVENUE_HEADING:>amount_width$} |\n"
    ));
    table.push_str(&format!(
        "|:{:-<label_width$}-|-{:->amount_width$}:|\n",
        "", ""
    ));
    for (row, amount) in rows.iter().zip(&amounts) {
        table.push_str(&format!(
            "| {:<label_width$} | {amount:>amount_width$} |\n",
            row.category()
        ));
    }
    table
}
