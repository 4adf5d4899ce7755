//! Summary statistics over a cleaned `TransactionTable`.

use crate::model::{Amount, TransactionTable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fmt::{Display, Formatter};

/// The error returned when aggregation is requested for a table with no
/// rows. The average is undefined, so nothing is computed at all.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct EmptyTableError;

impl Display for EmptyTableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "no valid rows survived cleaning; there is nothing to summarize")
    }
}

impl std::error::Error for EmptyTableError {}

/// Revenue total for one category.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryTotal {
    category: String,
    total: Amount,
}

impl CategoryTotal {
    pub fn new(category: impl Into<String>, total: Amount) -> Self {
        Self {
            category: category.into(),
            total,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn total(&self) -> Amount {
        self.total
    }

    pub(crate) fn add(&mut self, revenue: Amount) {
        self.total += revenue;
    }
}

/// The summary statistics for one table, derived fresh on every call and
/// never cached.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AggregateResult {
    total: Amount,
    average: Amount,
    by_category: Vec<CategoryTotal>,
}

impl AggregateResult {
    /// Sum of revenue over all rows.
    pub fn total(&self) -> Amount {
        self.total
    }

    /// Total divided by the row count.
    pub fn average(&self) -> Amount {
        self.average
    }

    /// Per-category totals, ordered by first appearance in the table.
    pub fn by_category(&self) -> &[CategoryTotal] {
        &self.by_category
    }
}

/// Computes total, average and per-category revenue for `table`.
pub fn aggregate(table: &TransactionTable) -> Result<AggregateResult, EmptyTableError> {
    if table.is_empty() {
        return Err(EmptyTableError);
    }
    let total: Amount = table.rows().iter().map(|t| t.revenue()).sum();
    let average = Amount::new(total.value() / Decimal::from(table.len() as u64));
    Ok(AggregateResult {
        total,
        average,
        by_category: totals_by_category(table),
    })
}

/// Groups revenue by category label.
///
/// Categories appear in the order their first transaction appears in the
/// table. First-seen order is deterministic for a given file, unlike the
/// key-sorted order some grouping libraries default to.
pub fn totals_by_category(table: &TransactionTable) -> Vec<CategoryTotal> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for row in table.rows() {
        match positions.get(row.category()) {
            Some(&ix) => totals[ix].add(row.revenue()),
            None => {
                positions.insert(row.category(), totals.len());
                totals.push(CategoryTotal::new(row.category(), row.revenue()));
            }
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::table;
    use std::str::FromStr;

    #[test]
    fn test_totals_average_and_grouping() {
        let table = table(&[
            ("Fruits", "2023-01-01", "100"),
            ("Fruits", "2023-06-01", "200"),
            ("Vegetables", "2023-01-01", "50"),
        ]);
        let result = aggregate(&table).unwrap();
        assert_eq!(result.total(), Amount::from_str("350").unwrap());
        // 350 / 3 displays as $116.67
        assert_eq!(result.average().to_string(), "$116.67");
        assert_eq!(result.by_category().len(), 2);
        assert_eq!(result.by_category()[0].category(), "Fruits");
        assert_eq!(
            result.by_category()[0].total(),
            Amount::from_str("300").unwrap()
        );
        assert_eq!(result.by_category()[1].category(), "Vegetables");
        assert_eq!(
            result.by_category()[1].total(),
            Amount::from_str("50").unwrap()
        );
    }

    #[test]
    fn test_average_is_total_over_row_count() {
        let table = table(&[
            ("A", "2023-01-01", "10"),
            ("B", "2023-01-02", "20"),
            ("C", "2023-01-03", "31"),
            ("A", "2023-01-04", "39"),
        ]);
        let result = aggregate(&table).unwrap();
        assert_eq!(
            result.average().value(),
            result.total().value() / Decimal::from(4)
        );
    }

    #[test]
    fn test_category_totals_sum_to_total() {
        let table = table(&[
            ("A", "2023-01-01", "10.25"),
            ("B", "2023-01-02", "20.50"),
            ("A", "2023-01-03", "0.25"),
        ]);
        let result = aggregate(&table).unwrap();
        let sum: Amount = result.by_category().iter().map(|c| c.total()).sum();
        assert_eq!(sum, result.total());
    }

    #[test]
    fn test_categories_keep_first_seen_order() {
        let table = table(&[
            ("Zucchini", "2023-01-01", "1"),
            ("Apples", "2023-01-02", "2"),
            ("Zucchini", "2023-01-03", "3"),
            ("Melons", "2023-01-04", "4"),
        ]);
        let totals = totals_by_category(&table);
        let order: Vec<&str> = totals.iter().map(|c| c.category()).collect();
        assert_eq!(order, vec!["Zucchini", "Apples", "Melons"]);
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let empty = table(&[]);
        assert_eq!(aggregate(&empty).unwrap_err(), EmptyTableError);
    }
}
