//! Revenue amounts.
//!
//! Spreadsheet exports format revenue inconsistently: `1234.5`, `$1,234.50`,
//! `-$60,000.00`. `Amount` parses all of those into a `Decimal` and always
//! renders the canonical `$1,234.50` form.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A revenue value.
///
/// Equality and ordering are numeric. An `Amount` is immutable; arithmetic
/// produces new values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the value as an `f64` for chart handoff. Values far outside
    /// the `f64` range collapse to zero.
    pub fn to_f64(&self) -> f64 {
        self.value.to_f64().unwrap_or_default()
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Divides the amount by `divisor`, e.g. to restate revenue in millions.
    pub fn scale_down(&self, divisor: Decimal) -> Amount {
        Amount::new(self.value / divisor)
    }
}

/// The error returned when a cell cannot be parsed as a revenue amount.
///
/// During cleaning this never aborts a load; the row is dropped instead.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct AmountError {
    input: String,
}

impl Display for AmountError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "cannot parse '{}' as a revenue amount", self.input)
    }
}

impl std::error::Error for AmountError {}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || AmountError {
            input: s.to_string(),
        };

        let trimmed = s.trim();
        if trimmed.is_empty() {
            // A missing value is not zero; the caller decides what to do.
            return Err(err());
        }

        // Accept "-$50.00", "$50.00", "-50.00" and "50.00".
        let (sign, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", trimmed),
        };
        let digits = rest.strip_prefix('$').unwrap_or(rest);

        // Commas are thousands separators.
        let plain = format!("{sign}{}", digits.replace(',', ""));
        let value = Decimal::from_str(&plain).map_err(|_| err())?;
        Ok(Amount::new(value))
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let (sign, magnitude) = if self.value.is_sign_negative() {
            ("-", self.value.abs())
        } else {
            ("", self.value)
        };
        write!(
            f,
            "{sign}${}",
            format_num::format_num!(",.2", magnitude.to_f64().unwrap_or_default())
        )
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount::new(self.value + rhs.value)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        self.value += rhs.value;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Amount {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_plain() {
        assert_eq!(amount("50.00").value(), Decimal::from_str("50.00").unwrap());
    }

    #[test]
    fn test_parse_with_dollar_sign() {
        assert_eq!(amount("$50.00").value(), Decimal::from_str("50").unwrap());
    }

    #[test]
    fn test_parse_negative_with_dollar_sign() {
        assert_eq!(amount("-$50.00").value(), Decimal::from_str("-50").unwrap());
    }

    #[test]
    fn test_parse_with_commas() {
        assert_eq!(
            amount("$1,234,567.89").value(),
            Decimal::from_str("1234567.89").unwrap()
        );
    }

    #[test]
    fn test_parse_whitespace() {
        assert_eq!(
            amount("  $50.00  ").value(),
            Decimal::from_str("50").unwrap()
        );
    }

    #[test]
    fn test_parse_integer_cell() {
        assert_eq!(amount("1200").value(), Decimal::from_str("1200").unwrap());
    }

    #[test]
    fn test_empty_is_an_error() {
        assert!(Amount::from_str("").is_err());
        assert!(Amount::from_str("   ").is_err());
    }

    #[test]
    fn test_non_numeric_is_an_error() {
        assert!(Amount::from_str("N/A").is_err());
        assert!(Amount::from_str("$12.3.4").is_err());
        assert!(Amount::from_str("twelve").is_err());
    }

    #[test]
    fn test_display_positive() {
        assert_eq!(amount("1234.5").to_string(), "$1,234.50");
    }

    #[test]
    fn test_display_negative() {
        assert_eq!(amount("-60000").to_string(), "-$60,000.00");
    }

    #[test]
    fn test_display_zero() {
        assert_eq!(Amount::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_display_is_idempotent_through_parse() {
        let original = amount("$1,234,567.89");
        let reparsed = amount(&original.to_string());
        assert_eq!(original.to_string(), reparsed.to_string());
        assert_eq!(original, reparsed);
    }

    #[test]
    fn test_sum() {
        let total: Amount = [amount("100"), amount("200"), amount("50")]
            .into_iter()
            .sum();
        assert_eq!(total.value(), Decimal::from_str("350").unwrap());
    }

    #[test]
    fn test_scale_down_to_millions() {
        let scaled = amount("2,500,000").scale_down(Decimal::from(1_000_000));
        assert_eq!(scaled.value(), Decimal::from_str("2.5").unwrap());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&amount("50")).unwrap();
        assert_eq!(json, "\"$50.00\"");
    }

    #[test]
    fn test_deserialize() {
        let a: Amount = serde_json::from_str("\"-$1,000.00\"").unwrap();
        assert_eq!(a.value(), Decimal::from_str("-1000").unwrap());
    }

    #[test]
    fn test_numeric_equality_ignores_source_formatting() {
        assert_eq!(amount("$1,000.00"), amount("1000"));
    }
}
