use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Fixed month-name table used for display formatting (1-based month index).
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar-month key, the "YYYY-MM" unit all series are indexed by.
///
/// Ordering matches lexical ordering of the zero-padded string form, so the
/// two can be compared interchangeably at the storage boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Month {
    year: i32,
    month: u32,
}

/// Error for month keys that are not well-formed "YYYY-MM".
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid month key '{0}': expected \"YYYY-MM\"")]
pub struct ParseMonthError(String);

impl Month {
    /// Create a month key. `month` is 1-based.
    pub fn new(year: i32, month: u32) -> Result<Self, ParseMonthError> {
        if !(1..=12).contains(&month) {
            return Err(ParseMonthError(format!("{year}-{month}")));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 1-based month of year.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The month `n` calendar months before this one.
    pub fn months_back(&self, n: u32) -> Month {
        let total = self.year as i64 * 12 + (self.month as i64 - 1) - n as i64;
        Month {
            year: total.div_euclid(12) as i32,
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }

    /// Signed number of calendar months from `earlier` to `self`.
    pub fn months_since(&self, earlier: Month) -> i64 {
        (self.year as i64 * 12 + self.month as i64) - (earlier.year as i64 * 12 + earlier.month as i64)
    }

    /// "2024-01" -> "Jan 2024"
    pub fn short_label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    /// "2024-01" -> "Jan '24"
    pub fn abbreviated_label(&self) -> String {
        format!(
            "{} '{:02}",
            MONTH_NAMES[(self.month - 1) as usize],
            self.year.rem_euclid(100)
        )
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Month {
    type Err = ParseMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s.split_once('-').ok_or_else(|| ParseMonthError(s.to_string()))?;
        let year: i32 = year.parse().map_err(|_| ParseMonthError(s.to_string()))?;
        let month: u32 = month.parse().map_err(|_| ParseMonthError(s.to_string()))?;
        Month::new(year, month).map_err(|_| ParseMonthError(s.to_string()))
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
