//! Trailing-window range filtering for dated rows.

use crate::models::{Month, SectorRecord, TimePoint, TimeRange};

/// Rows that carry a calendar-month key.
pub trait Dated {
    fn date(&self) -> Month;
}

impl Dated for TimePoint {
    fn date(&self) -> Month {
        self.date
    }
}

impl Dated for SectorRecord {
    fn date(&self) -> Month {
        self.date
    }
}

/// Keep the rows inside the trailing `range` window.
///
/// The window is anchored to the latest date present in the data, not the
/// caller's clock, so a chart over stale data still shows a full window.
/// Cutoff is inclusive (`date >= anchor - months`). `ALL` keeps every row.
/// Input order is preserved.
pub fn filter_by_time_range<T: Dated + Clone>(rows: &[T], range: TimeRange) -> Vec<T> {
    let months = range.months();
    if months == 0 {
        return rows.to_vec();
    }

    let Some(anchor) = rows.iter().map(|r| r.date()).max() else {
        return Vec::new();
    };
    let cutoff = anchor.months_back(months);

    rows.iter().filter(|r| r.date() >= cutoff).cloned().collect()
}
