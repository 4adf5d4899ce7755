//! Pipeline options.
//!
//! The original tool shipped as several near-identical variants that differed
//! only in unit scaling, chart sort direction, time bucketing and color
//! theme. Those knobs are one `Options` value here, so a single pipeline
//! serves every variant.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How revenue values are scaled for display.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UnitScale {
    /// Revenue is reported exactly as loaded.
    #[default]
    None,
    /// Revenue is divided by 1,000,000 at load time.
    Millions,
}

serde_plain::derive_display_from_serialize!(UnitScale);
serde_plain::derive_fromstr_from_deserialize!(UnitScale);

impl UnitScale {
    /// The divisor applied to every revenue cell at load time, if any.
    pub fn divisor(&self) -> Option<Decimal> {
        match self {
            UnitScale::None => Option::None,
            UnitScale::Millions => Some(Decimal::from(1_000_000u32)),
        }
    }

    /// The suffix appended to currency lines in the summary report.
    pub fn suffix(&self) -> &'static str {
        match self {
            UnitScale::None => "",
            UnitScale::Millions => " Million",
        }
    }
}

/// Sort direction for the category-totals bar chart.
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
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

serde_plain::derive_display_from_serialize!(SortOrder);
serde_plain::derive_fromstr_from_deserialize!(SortOrder);

/// Calendar period used to bucket the time series.
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
pub enum TimeBucket {
    Day,
    #[default]
    Year,
}

serde_plain::derive_display_from_serialize!(TimeBucket);
serde_plain::derive_fromstr_from_deserialize!(TimeBucket);

impl TimeBucket {
    /// The first day of the bucket containing `date`.
    pub fn truncate(&self, date: NaiveDate) -> NaiveDate {
        match self {
            TimeBucket::Day => date,
            TimeBucket::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        }
    }
}

/// Cosmetic color theme, passed through to the external renderer untouched.
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
pub enum Theme {
    Light,
    #[default]
    Dark,
}

serde_plain::derive_display_from_serialize!(Theme);
serde_plain::derive_fromstr_from_deserialize!(Theme);

/// The full set of pipeline knobs for one session.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Options {
    unit_scale: UnitScale,
    sort_order: SortOrder,
    bucket: TimeBucket,
    theme: Theme,
}

impl Options {
    pub fn new(
        unit_scale: UnitScale,
        sort_order: SortOrder,
        bucket: TimeBucket,
        theme: Theme,
    ) -> Self {
        Self {
            unit_scale,
            sort_order,
            bucket,
            theme,
        }
    }

    pub fn unit_scale(&self) -> UnitScale {
        self.unit_scale
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn bucket(&self) -> TimeBucket {
        self.bucket
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }
}
