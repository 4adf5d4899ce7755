//! Locates the required columns in a spreadsheet header row.

use std::fmt;
use std::fmt::{Display, Formatter};

/// Header of the category column.
pub const ITEM_TYPE: &str = "Item Type";
/// Header of the order-date column.
pub const ORDER_DATE: &str = "Order Date";
/// Header of the revenue column.
pub const TOTAL_REVENUE: &str = "Total Revenue";

/// The error returned when a required column header is absent.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct MissingColumn(pub(crate) String);

impl MissingColumn {
    /// The header of the column that could not be found.
    pub fn column(&self) -> &str {
        &self.0
    }
}

impl Display for MissingColumn {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "required column '{}' was not found", self.0)
    }
}

impl std::error::Error for MissingColumn {}

/// The positions of the three required columns within a header row.
///
/// The sheet may carry any number of additional columns; they are ignored.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Columns {
    category: usize,
    order_date: usize,
    revenue: usize,
}

impl Columns {
    /// Finds the required columns in `headers`. Matching trims whitespace
    /// and ignores case, since exports are sloppy about both. The first
    /// matching header wins when duplicates exist.
    pub fn locate<S>(headers: &[S]) -> Result<Self, MissingColumn>
    where
        S: AsRef<str>,
    {
        let find = |wanted: &str| -> Result<usize, MissingColumn> {
            headers
                .iter()
                .position(|h| h.as_ref().trim().eq_ignore_ascii_case(wanted))
                .ok_or_else(|| MissingColumn(wanted.to_string()))
        };
        Ok(Self {
            category: find(ITEM_TYPE)?,
            order_date: find(ORDER_DATE)?,
            revenue: find(TOTAL_REVENUE)?,
        })
    }

    pub fn category(&self) -> usize {
        self.category
    }

    pub fn order_date(&self) -> usize {
        self.order_date
    }

    pub fn revenue(&self) -> usize {
        self.revenue
    }
}
