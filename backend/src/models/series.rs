use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::month::Month;
use super::sector::Sector;

/// One month's value in a single-series view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    pub date: Month,
    pub value: f64,
}

/// One sector's value at one month, as stored.
///
/// At most one record exists per `(sector, date)` pair; the store enforces
/// this via upsert. `value` is thousands of openings for count series and a
/// percentage for rate series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRecord {
    pub date: Month,
    pub sector: Sector,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
}

impl SectorRecord {
    pub fn new(date: Month, sector: Sector, value: f64) -> Self {
        Self {
            date,
            sector,
            value,
            rate: None,
        }
    }
}

/// Selectable chart time range. `months() == 0` means "no filtering".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "3Y")]
    ThreeYears,
    #[serde(rename = "5Y")]
    FiveYears,
    #[serde(rename = "10Y")]
    TenYears,
    #[serde(rename = "ALL")]
    All,
}

/// The fixed, ordered set of selectable ranges.
pub const TIME_RANGES: [TimeRange; 5] = [
    TimeRange::OneYear,
    TimeRange::ThreeYears,
    TimeRange::FiveYears,
    TimeRange::TenYears,
    TimeRange::All,
];

impl TimeRange {
    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::OneYear => "1Y",
            TimeRange::ThreeYears => "3Y",
            TimeRange::FiveYears => "5Y",
            TimeRange::TenYears => "10Y",
            TimeRange::All => "ALL",
        }
    }

    /// Window length in calendar months; 0 for [`TimeRange::All`].
    pub fn months(&self) -> u32 {
        match self {
            TimeRange::OneYear => 12,
            TimeRange::ThreeYears => 36,
            TimeRange::FiveYears => 60,
            TimeRange::TenYears => 120,
            TimeRange::All => 0,
        }
    }
}

/// Error for range labels outside the fixed set.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown time range '{0}': expected one of 1Y, 3Y, 5Y, 10Y, ALL")]
pub struct ParseTimeRangeError(String);

impl FromStr for TimeRange {
    type Err = ParseTimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TIME_RANGES
            .iter()
            .copied()
            .find(|r| r.label() == s)
            .ok_or_else(|| ParseTimeRangeError(s.to_string()))
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
