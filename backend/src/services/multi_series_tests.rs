use super::{multi_series_view, MultiSeriesOptions};
use crate::models::{Sector, SectorRecord, TimeRange};
use crate::services::simple_series::{TrendDirection, TrendUnit};

fn record(date: &str, sector: &str, value: f64) -> SectorRecord {
    SectorRecord::new(date.parse().unwrap(), Sector::from_key(sector), value)
}

fn sectors(keys: &[&str]) -> Vec<Sector> {
    keys.iter().map(|k| Sector::from_key(k)).collect()
}

fn openings_fixture() -> Vec<SectorRecord> {
    // interleaved input order on purpose
    vec![
        record("2025-02", "healthcare", 1800.0),
        record("2025-01", "total", 8000.0),
        record("2025-01", "healthcare", 1750.0),
        record("2025-03", "total", 8200.0),
        record("2025-02", "total", 8100.0),
        record("2025-03", "healthcare", 1850.0),
    ]
}

#[test]
fn test_pivot_produces_one_row_per_date_with_sector_columns() {
    let view = multi_series_view(
        &openings_fixture(),
        &sectors(&["total", "healthcare"]),
        MultiSeriesOptions::default(),
    );

    assert_eq!(view.chart_data.len(), 3);
    let dates: Vec<String> = view.chart_data.iter().map(|r| r.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-01", "2025-02", "2025-03"]);

    let row = &view.chart_data[1];
    assert_eq!(row.value(&Sector::Total), Some(8100.0));
    assert_eq!(row.value(&Sector::from_key("healthcare")), Some(1800.0));
    // both sectors have >= 2 points, so both trend columns exist
    assert!(row.trend(&Sector::Total).is_some());
    assert!(row.trend(&Sector::from_key("healthcare")).is_some());
}

#[test]
fn test_trend_columns_are_evaluated_on_every_row() {
    // healthcare is missing on 2025-02 but still gets a trend value there
    let data = vec![
        record("2025-01", "healthcare", 1000.0),
        record("2025-02", "total", 8000.0),
        record("2025-01", "total", 7900.0),
        record("2025-03", "healthcare", 1200.0),
        record("2025-03", "total", 8100.0),
    ];
    let view = multi_series_view(
        &data,
        &sectors(&["total", "healthcare"]),
        MultiSeriesOptions::default(),
    );

    let middle = &view.chart_data[1];
    assert_eq!(middle.value(&Sector::from_key("healthcare")), None);
    let trend = middle.trend(&Sector::from_key("healthcare")).unwrap();
    // fit over (index 0, 1000) and (index 2, 1200): line hits 1100 at index 1
    assert!((trend - 1100.0).abs() < 1e-9);
}

#[test]
fn test_sector_with_one_point_gets_no_trend_column() {
    let data = vec![
        record("2025-01", "total", 7900.0),
        record("2025-02", "total", 8000.0),
        record("2025-02", "retail", 600.0),
    ];
    let view = multi_series_view(
        &data,
        &sectors(&["total", "retail"]),
        MultiSeriesOptions::default(),
    );

    for row in &view.chart_data {
        assert!(row.trend(&Sector::from_key("retail")).is_none());
        assert!(row.trend(&Sector::Total).is_some());
    }
}

#[test]
fn test_unemployment_rate_is_dropped_unless_opted_in() {
    let data = vec![
        record("2025-01", "unemployment_rate", 4.0),
        record("2025-02", "unemployment_rate", 4.1),
    ];

    let dropped = multi_series_view(
        &data,
        &sectors(&["unemployment_rate"]),
        MultiSeriesOptions::default(),
    );
    assert!(dropped.chart_data.is_empty());

    let kept = multi_series_view(
        &data,
        &sectors(&["unemployment_rate"]),
        MultiSeriesOptions {
            include_unemployment_rate: true,
            trend_unit: TrendUnit::PercentagePoints,
            ..MultiSeriesOptions::default()
        },
    );
    assert_eq!(kept.chart_data.len(), 2);
}

#[test]
fn test_empty_selection_yields_zero_rows_and_default_domain() {
    let view = multi_series_view(&openings_fixture(), &[], MultiSeriesOptions::default());
    assert!(view.chart_data.is_empty());
    assert_eq!(view.y_axis_domain, [0.0, 12000.0]);
    assert_eq!(view.date_range_display, "");
    assert_eq!(view.trend_info, None);
}

#[test]
fn test_unknown_sector_selection_yields_zero_rows() {
    let view = multi_series_view(
        &openings_fixture(),
        &sectors(&["mining"]),
        MultiSeriesOptions::default(),
    );
    assert!(view.chart_data.is_empty());
}

#[test]
fn test_range_filter_anchors_to_latest_row() {
    let mut data = Vec::new();
    for year in [2023, 2024, 2025] {
        for month in 1..=12 {
            if year == 2025 && month > 6 {
                break;
            }
            data.push(record(&format!("{year}-{month:02}"), "total", 8000.0));
        }
    }
    let view = multi_series_view(
        &data,
        &sectors(&["total"]),
        MultiSeriesOptions {
            range: TimeRange::OneYear,
            ..MultiSeriesOptions::default()
        },
    );
    assert_eq!(view.chart_data.first().unwrap().date.to_string(), "2024-06");
    assert_eq!(view.chart_data.last().unwrap().date.to_string(), "2025-06");
}

#[test]
fn test_domain_anchors_at_zero_when_data_spans_low_values() {
    // healthcare near zero pulls min below half the span
    let data = vec![
        record("2025-01", "total", 8000.0),
        record("2025-01", "healthcare", 100.0),
        record("2025-02", "total", 8100.0),
        record("2025-02", "healthcare", 120.0),
    ];
    let view = multi_series_view(
        &data,
        &sectors(&["total", "healthcare"]),
        MultiSeriesOptions::default(),
    );
    assert_eq!(view.y_axis_domain[0], 0.0);
    assert!(view.y_axis_domain[1] >= 8100.0);
}

#[test]
fn test_domain_zooms_in_when_data_clusters_away_from_zero() {
    // span 200, min 7900 > span/2, so the lower bound lifts off zero
    let data = vec![
        record("2025-01", "total", 7900.0),
        record("2025-02", "total", 8100.0),
    ];
    let view = multi_series_view(&data, &sectors(&["total"]), MultiSeriesOptions::default());
    let [min, max] = view.y_axis_domain;
    assert_eq!(min, (7900.0f64 - 30.0).floor());
    assert_eq!(max, (8100.0f64 + 30.0).ceil());
    assert!(min <= 7900.0 && max >= 8100.0);
}

#[test]
fn test_percent_trend_summary_averages_sector_changes() {
    // total: +2.5%, healthcare: +5.714...% -> avg ~ 4.1%
    let view = multi_series_view(
        &openings_fixture(),
        &sectors(&["total", "healthcare"]),
        MultiSeriesOptions::default(),
    );
    let info = view.trend_info.unwrap();
    assert_eq!(info.direction, TrendDirection::Up);
    assert_eq!(info.unit, Some(TrendUnit::Percent));
    assert_eq!(info.is_aggregate, Some(true));
    let total_pct = (8200.0 - 8000.0) / 8000.0 * 100.0;
    let hc_pct = (1850.0 - 1750.0) / 1750.0 * 100.0;
    let expected = format!("{:.1}%", ((total_pct + hc_pct) / 2.0f64).abs());
    assert_eq!(info.percent_change, expected);
}

#[test]
fn test_single_sector_is_not_flagged_aggregate() {
    let view = multi_series_view(
        &openings_fixture(),
        &sectors(&["total"]),
        MultiSeriesOptions::default(),
    );
    assert_eq!(view.trend_info.unwrap().is_aggregate, Some(false));
}

#[test]
fn test_pp_trend_summary_averages_raw_deltas() {
    let data = vec![
        record("2025-01", "unemployment_manufacturing", 3.0),
        record("2025-02", "unemployment_manufacturing", 3.4),
        record("2025-01", "unemployment_retail", 5.0),
        record("2025-02", "unemployment_retail", 4.8),
    ];
    let view = multi_series_view(
        &data,
        &sectors(&["unemployment_manufacturing", "unemployment_retail"]),
        MultiSeriesOptions {
            trend_unit: TrendUnit::PercentagePoints,
            ..MultiSeriesOptions::default()
        },
    );
    let info = view.trend_info.unwrap();
    // avg of +0.4 and -0.2 = +0.1
    assert_eq!(info.direction, TrendDirection::Up);
    assert_eq!(info.percent_change, "0.1 pp");
    assert_eq!(info.absolute_change.as_deref(), Some("0.1"));
    assert_eq!(info.is_aggregate, Some(true));
}

#[test]
fn test_zero_first_value_is_excluded_from_percent_average() {
    let data = vec![
        record("2025-01", "total", 8000.0),
        record("2025-02", "total", 8400.0),
        record("2025-01", "retail", 0.0),
        record("2025-02", "retail", 100.0),
    ];
    let view = multi_series_view(
        &data,
        &sectors(&["total", "retail"]),
        MultiSeriesOptions::default(),
    );
    let info = view.trend_info.unwrap();
    // retail excluded: only total's +5% contributes
    assert_eq!(info.percent_change, "5.0%");
    assert_eq!(info.is_aggregate, Some(false));
}

#[test]
fn test_sector_missing_an_endpoint_is_skipped_in_summary() {
    let data = vec![
        record("2025-01", "total", 8000.0),
        record("2025-02", "total", 8200.0),
        record("2025-02", "healthcare", 1800.0), // absent on the first row
    ];
    let view = multi_series_view(
        &data,
        &sectors(&["total", "healthcare"]),
        MultiSeriesOptions::default(),
    );
    let info = view.trend_info.unwrap();
    assert_eq!(info.percent_change, "2.5%");
    assert_eq!(info.is_aggregate, Some(false));
}

#[test]
fn test_row_serialization_flattens_sector_columns() {
    let view = multi_series_view(
        &openings_fixture(),
        &sectors(&["total", "healthcare"]),
        MultiSeriesOptions::default(),
    );
    let json = serde_json::to_value(&view.chart_data[0]).unwrap();
    assert_eq!(json["date"], "2025-01");
    assert_eq!(json["total"], 8000.0);
    assert_eq!(json["healthcare"], 1750.0);
    assert!(json.get("total_trend").is_some());
    assert!(json.get("healthcare_trend").is_some());
}
