//! Types that represent the core data model, such as `Transaction` and `Amount`.
mod amount;
mod columns;
mod transaction;

pub use amount::{Amount, AmountError};
pub use columns::{Columns, MissingColumn, ITEM_TYPE, ORDER_DATE, TOTAL_REVENUE};
pub use transaction::{Transaction, TransactionTable};
