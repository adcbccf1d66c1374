//! Chart transform for single-value rate series.
//!
//! Produces the chart-ready payload for the unemployment-rate and
//! participation-rate panels: a filtered series with an optional fitted
//! trendline, a padded Y-axis domain, a display string for the covered
//! range, and a first-vs-last trend summary in percentage points.

use serde::{Deserialize, Serialize};

use crate::models::{TimePoint, TimeRange};
use crate::services::regression::{linear_regression, PointXY};
use crate::services::window::filter_by_time_range;

/// Trend direction for the summary badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

/// Unit the trend change is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrendUnit {
    /// Relative percent change, used for count series (job openings).
    #[serde(rename = "%")]
    Percent,
    /// Percentage-point delta, used for rate series.
    #[serde(rename = "pp")]
    PercentagePoints,
}

/// First-vs-last change summary over the filtered window.
///
/// Computed from the raw filtered values, not the fitted trendline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendInfo {
    pub direction: TrendDirection,
    /// Formatted magnitude, e.g. "0.4 pp" or "12.3%".
    pub percent_change: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absolute_change: Option<String>,
    /// True when the summary averaged more than one sector's change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_aggregate: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<TrendUnit>,
}

/// One chart row of a simple series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplePoint {
    pub date: crate::models::Month,
    pub value: f64,
    /// Fitted trendline value at this row's index; absent below 2 points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<f64>,
}

/// Chart-ready payload for a single-value series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleChartView {
    pub chart_data: Vec<SimplePoint>,
    /// `[min, max]` for the Y axis, padded around the filtered values.
    pub y_axis_domain: [f64; 2],
    /// "Jun 2024 — Jun 2025", or "" for an empty series.
    pub date_range_display: String,
    pub trend_info: Option<TrendInfo>,
}

const EMPTY_DOMAIN: [f64; 2] = [0.0, 10.0];

/// Build the chart view for a rate series over the selected range.
pub fn simple_series_view(data: &[TimePoint], range: TimeRange) -> SimpleChartView {
    let mut filtered = filter_by_time_range(data, range);
    filtered.sort_by_key(|p| p.date);

    let chart_data = inject_trend(&filtered);

    SimpleChartView {
        y_axis_domain: y_axis_domain(&chart_data),
        date_range_display: date_range_display(&chart_data),
        trend_info: trend_info(&chart_data),
        chart_data,
    }
}

fn inject_trend(filtered: &[TimePoint]) -> Vec<SimplePoint> {
    if filtered.len() < 2 {
        return filtered
            .iter()
            .map(|p| SimplePoint {
                date: p.date,
                value: p.value,
                trend: None,
            })
            .collect();
    }

    let points: Vec<PointXY> = filtered
        .iter()
        .enumerate()
        .map(|(i, p)| PointXY {
            x: i as f64,
            y: p.value,
        })
        .collect();
    let fit = linear_regression(&points);

    filtered
        .iter()
        .enumerate()
        .map(|(i, p)| SimplePoint {
            date: p.date,
            value: p.value,
            trend: Some(fit.at(i as f64)),
        })
        .collect()
}

/// Pad min/max by 20% of the span; floor the lower bound at zero and both
/// bounds at one decimal place. Rate axes never dip below zero.
fn y_axis_domain(chart_data: &[SimplePoint]) -> [f64; 2] {
    if chart_data.is_empty() {
        return EMPTY_DOMAIN;
    }

    let mut min_val = f64::INFINITY;
    let mut max_val = f64::NEG_INFINITY;
    for point in chart_data {
        min_val = min_val.min(point.value);
        max_val = max_val.max(point.value);
    }

    let padding = (max_val - min_val) * 0.2;
    [
        (((min_val - padding) * 10.0).floor() / 10.0).max(0.0),
        ((max_val + padding) * 10.0).ceil() / 10.0,
    ]
}

fn date_range_display(chart_data: &[SimplePoint]) -> String {
    match (chart_data.first(), chart_data.last()) {
        (Some(first), Some(last)) => {
            format!("{} — {}", first.date.short_label(), last.date.short_label())
        }
        _ => String::new(),
    }
}

fn trend_info(chart_data: &[SimplePoint]) -> Option<TrendInfo> {
    if chart_data.len() < 2 {
        return None;
    }

    // rate series change is in percentage points, from the unfitted values
    let change = chart_data[chart_data.len() - 1].value - chart_data[0].value;
    Some(TrendInfo {
        direction: if change > 0.0 {
            TrendDirection::Up
        } else {
            TrendDirection::Down
        },
        percent_change: format!("{:.1} pp", change.abs()),
        absolute_change: Some(format!("{:.1}", change.abs())),
        is_aggregate: None,
        unit: Some(TrendUnit::PercentagePoints),
    })
}

#[cfg(test)]
#[path = "simple_series_tests.rs"]
mod simple_series_tests;
