//! Chart transform for multi-sector series.
//!
//! Pivots flat `(date, sector, value)` records into one wide row per month,
//! fits an independent trendline per sector, and summarizes the selection's
//! overall movement. Used by the job-openings chart (percent trend unit) and
//! the unemployment-by-industry chart (percentage-point unit).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Month, Sector, SectorRecord, TimeRange};
use crate::services::regression::{linear_regression, PointXY};
use crate::services::simple_series::{TrendDirection, TrendInfo, TrendUnit};
use crate::services::window::{filter_by_time_range, Dated};

/// One pivoted chart row: a date plus one column per sector that has a value
/// that month, and one `<sector>_trend` column per fitted sector.
///
/// A sector with no value on a date simply has no entry; there is no
/// interpolation or zero-fill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub date: Month,
    #[serde(flatten)]
    pub columns: BTreeMap<String, f64>,
}

impl PivotRow {
    fn new(date: Month) -> Self {
        Self {
            date,
            columns: BTreeMap::new(),
        }
    }

    /// Value column for a sector, if present on this row.
    pub fn value(&self, sector: &Sector) -> Option<f64> {
        self.columns.get(sector.key()).copied()
    }

    /// Trend column for a sector, if the sector had enough points to fit.
    pub fn trend(&self, sector: &Sector) -> Option<f64> {
        self.columns.get(&trend_column(sector)).copied()
    }
}

impl Dated for PivotRow {
    fn date(&self) -> Month {
        self.date
    }
}

/// Options for [`multi_series_view`].
#[derive(Debug, Clone, Copy)]
pub struct MultiSeriesOptions {
    pub range: TimeRange,
    /// Keep the unemployment-rate pseudo-sector in the working set. The
    /// unemployment chart reuses it as its "total" series; everywhere else
    /// it is dropped from sector selections.
    pub include_unemployment_rate: bool,
    pub trend_unit: TrendUnit,
}

impl Default for MultiSeriesOptions {
    fn default() -> Self {
        Self {
            range: TimeRange::ThreeYears,
            include_unemployment_rate: false,
            trend_unit: TrendUnit::Percent,
        }
    }
}

/// Chart-ready payload for a multi-sector series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiChartView {
    pub chart_data: Vec<PivotRow>,
    pub y_axis_domain: [f64; 2],
    pub date_range_display: String,
    pub trend_info: Option<TrendInfo>,
}

/// Default Y domain when there is nothing to scale against, sized for
/// job-openings data (thousands).
const EMPTY_DOMAIN: [f64; 2] = [0.0, 12000.0];

pub fn trend_column(sector: &Sector) -> String {
    format!("{}_trend", sector.key())
}

/// Build the wide chart view for a sector selection over the chosen range.
pub fn multi_series_view(
    data: &[SectorRecord],
    selected_sectors: &[Sector],
    options: MultiSeriesOptions,
) -> MultiChartView {
    let working: Vec<&Sector> = selected_sectors
        .iter()
        .filter(|s| options.include_unemployment_rate || **s != Sector::UnemploymentRate)
        .collect();

    let pivoted = pivot(data, &working);
    let filtered = filter_by_time_range(&pivoted, options.range);
    let chart_data = inject_trends(filtered, &working);

    MultiChartView {
        y_axis_domain: y_axis_domain(&chart_data, &working),
        date_range_display: date_range_display(&chart_data),
        trend_info: trend_info(&chart_data, &working, options.trend_unit),
        chart_data,
    }
}

/// One row per distinct date, sorted ascending. Duplicate `(date, sector)`
/// input is last-write-wins in input order; the store's upsert keeps that
/// from happening upstream.
fn pivot(data: &[SectorRecord], working: &[&Sector]) -> Vec<PivotRow> {
    let mut by_date: BTreeMap<Month, PivotRow> = BTreeMap::new();
    for record in data {
        if !working.iter().any(|s| **s == record.sector) {
            continue;
        }
        by_date
            .entry(record.date)
            .or_insert_with(|| PivotRow::new(record.date))
            .columns
            .insert(record.sector.key().to_string(), record.value);
    }
    by_date.into_values().collect()
}

/// Fit one regression per sector over `(row index, value)` pairs from rows
/// where the sector is present, then evaluate each fitted line at every
/// row's index. Sectors with fewer than 2 points get no trend column.
fn inject_trends(mut rows: Vec<PivotRow>, working: &[&Sector]) -> Vec<PivotRow> {
    if rows.len() < 2 {
        return rows;
    }

    let mut fits = Vec::new();
    for sector in working {
        let points: Vec<PointXY> = rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| {
                row.value(sector)
                    .filter(|v| !v.is_nan())
                    .map(|v| PointXY { x: i as f64, y: v })
            })
            .collect();
        if points.len() >= 2 {
            fits.push((trend_column(sector), linear_regression(&points)));
        }
    }

    for (i, row) in rows.iter_mut().enumerate() {
        for (column, fit) in &fits {
            // evaluated on every row, including rows where the sector
            // itself has no value
            row.columns.insert(column.clone(), fit.at(i as f64));
        }
    }
    rows
}

/// Combined domain over every selected sector's values across all rows.
///
/// Padding is 15% of the span. The lower bound only lifts above zero when
/// the data sits well away from it (min greater than half the span);
/// otherwise the axis stays anchored at zero.
fn y_axis_domain(rows: &[PivotRow], working: &[&Sector]) -> [f64; 2] {
    if rows.is_empty() || working.is_empty() {
        return EMPTY_DOMAIN;
    }

    let mut min_value = f64::INFINITY;
    let mut max_value = 0.0f64;
    for row in rows {
        for sector in working {
            if let Some(value) = row.value(sector).filter(|v| !v.is_nan()) {
                min_value = min_value.min(value);
                max_value = max_value.max(value);
            }
        }
    }

    if min_value == f64::INFINITY {
        min_value = 0.0;
    }
    if max_value == 0.0 {
        return EMPTY_DOMAIN;
    }

    let span = max_value - min_value;
    let padding = span * 0.15;
    let domain_min = if min_value > span * 0.5 {
        (min_value - padding).max(0.0)
    } else {
        0.0
    };

    [domain_min.floor(), (max_value + padding).ceil()]
}

fn date_range_display(rows: &[PivotRow]) -> String {
    match (rows.first(), rows.last()) {
        (Some(first), Some(last)) => {
            format!("{} — {}", first.date.short_label(), last.date.short_label())
        }
        _ => String::new(),
    }
}

/// Average first-vs-last change across the sectors that have both endpoints.
///
/// Percentage-point mode averages raw deltas; percent mode averages each
/// sector's relative change, skipping sectors whose first value is zero.
/// `is_aggregate` reflects how many sectors actually contributed.
fn trend_info(rows: &[PivotRow], working: &[&Sector], unit: TrendUnit) -> Option<TrendInfo> {
    if rows.len() < 2 {
        return None;
    }
    let first_row = &rows[0];
    let last_row = &rows[rows.len() - 1];

    let mut changes = Vec::new();
    for sector in working {
        let (Some(first), Some(last)) = (first_row.value(sector), last_row.value(sector)) else {
            continue;
        };
        if first.is_nan() || last.is_nan() {
            continue;
        }
        match unit {
            TrendUnit::PercentagePoints => changes.push(last - first),
            TrendUnit::Percent => {
                if first != 0.0 {
                    changes.push((last - first) / first * 100.0);
                }
            }
        }
    }

    if changes.is_empty() {
        return None;
    }

    let avg = changes.iter().sum::<f64>() / changes.len() as f64;
    let direction = if avg >= 0.0 {
        TrendDirection::Up
    } else {
        TrendDirection::Down
    };

    let (percent_change, absolute_change) = match unit {
        TrendUnit::PercentagePoints => {
            (format!("{:.1} pp", avg.abs()), Some(format!("{:.1}", avg.abs())))
        }
        TrendUnit::Percent => (format!("{:.1}%", avg.abs()), None),
    };

    Some(TrendInfo {
        direction,
        percent_change,
        absolute_change,
        is_aggregate: Some(changes.len() > 1),
        unit: Some(unit),
    })
}

#[cfg(test)]
#[path = "multi_series_tests.rs"]
mod multi_series_tests;
