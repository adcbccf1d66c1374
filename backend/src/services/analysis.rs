//! Labor-market summary analytics over stored series.
//!
//! These are pure computations over record slices; the `db::services` layer
//! feeds them from whichever store backend is active.

use serde::{Deserialize, Serialize};

use crate::models::{Month, Sector, SectorRecord, TimePoint};

/// A value paired with the month it occurred.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueAtDate {
    pub value: f64,
    pub date: Month,
}

impl From<&SectorRecord> for ValueAtDate {
    fn from(record: &SectorRecord) -> Self {
        Self {
            value: record.value,
            date: record.date,
        }
    }
}

/// Peak-to-latest movement of one sector's openings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorChange {
    pub sector: Sector,
    pub peak_value: f64,
    pub peak_date: Month,
    pub latest_value: f64,
    pub latest_date: Month,
    pub change_percent: f64,
}

/// Market analysis report over the job-openings series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub peak: ValueAtDate,
    pub latest: ValueAtDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_pandemic: Option<ValueAtDate>,
    pub change_from_peak: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_from_pre_pandemic: Option<f64>,
    /// Per-sector peak-to-latest changes, worst decline first.
    pub sector_changes: Vec<SectorChange>,
    pub steepest_decline: SectorChange,
    pub most_resilient: SectorChange,
}

/// Unemployment-rate overview for the dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateOverview {
    pub current: f64,
    pub date: Month,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_ago_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_from_year_ago: Option<f64>,
    /// Last 12 months, for the header sparkline.
    pub sparkline: Vec<TimePoint>,
    pub history: Vec<TimePoint>,
    pub peak: ValueAtDate,
    pub lowest: ValueAtDate,
}

/// True for series that measure openings counts rather than rates. The two
/// pseudo-rates and the per-industry unemployment series are excluded.
fn is_openings_sector(sector: &Sector) -> bool {
    !sector.is_rate() && !sector.key().starts_with("unemployment_")
}

/// Build the market analysis report from all stored records.
///
/// Pre-pandemic baseline is 2019-12, falling back to the last month of 2019
/// present in the data. Returns `None` when there is no "total" openings
/// series to anchor the report.
pub fn market_analysis(records: &[SectorRecord]) -> Option<MarketAnalysis> {
    let openings: Vec<&SectorRecord> = records
        .iter()
        .filter(|r| is_openings_sector(&r.sector))
        .collect();

    let mut total: Vec<&SectorRecord> = openings
        .iter()
        .copied()
        .filter(|r| r.sector == Sector::Total)
        .collect();
    if total.is_empty() {
        return None;
    }
    total.sort_by_key(|r| r.date);

    // ties keep the earliest month
    let peak = total
        .iter()
        .copied()
        .max_by(|a, b| a.value.total_cmp(&b.value).then(b.date.cmp(&a.date)))?;
    let latest = *total.last()?;

    let baseline_month: Month = "2019-12".parse().ok()?;
    let pre_pandemic = total
        .iter()
        .copied()
        .find(|r| r.date == baseline_month)
        .or_else(|| total.iter().copied().filter(|r| r.date.year() == 2019).last());

    let mut sector_changes = Vec::new();
    let mut sectors: Vec<Sector> = Vec::new();
    for record in &openings {
        if record.sector != Sector::Total && !sectors.contains(&record.sector) {
            sectors.push(record.sector.clone());
        }
    }
    sectors.sort_by(|a, b| a.key().cmp(b.key()));

    for sector in sectors {
        let mut series: Vec<&SectorRecord> = openings
            .iter()
            .copied()
            .filter(|r| r.sector == sector)
            .collect();
        if series.is_empty() {
            continue;
        }
        series.sort_by_key(|r| r.date);

        let Some(sector_peak) = series
            .iter()
            .copied()
            .max_by(|a, b| a.value.total_cmp(&b.value).then(b.date.cmp(&a.date)))
        else {
            continue;
        };
        let Some(sector_latest) = series.last().copied() else {
            continue;
        };

        sector_changes.push(SectorChange {
            sector,
            peak_value: sector_peak.value,
            peak_date: sector_peak.date,
            latest_value: sector_latest.value,
            latest_date: sector_latest.date,
            change_percent: (sector_latest.value - sector_peak.value) / sector_peak.value * 100.0,
        });
    }

    // worst decline first
    sector_changes.sort_by(|a, b| a.change_percent.total_cmp(&b.change_percent));
    let steepest_decline = sector_changes.first()?.clone();
    let most_resilient = sector_changes.last()?.clone();

    Some(MarketAnalysis {
        peak: peak.into(),
        latest: latest.into(),
        pre_pandemic: pre_pandemic.map(Into::into),
        change_from_peak: (latest.value - peak.value) / peak.value * 100.0,
        change_from_pre_pandemic: pre_pandemic
            .map(|p| (latest.value - p.value) / p.value * 100.0),
        sector_changes,
        steepest_decline,
        most_resilient,
    })
}

/// Build the rate overview from a single rate series.
///
/// The year-ago comparison requires a point exactly 12 calendar months
/// before the latest; without one the comparison is simply absent.
pub fn rate_overview(points: &[TimePoint]) -> Option<RateOverview> {
    if points.is_empty() {
        return None;
    }

    let mut sorted = points.to_vec();
    sorted.sort_by_key(|p| p.date);
    let latest = *sorted.last()?;

    let year_ago = sorted
        .iter()
        .find(|p| latest.date.months_since(p.date) == 12)
        .copied();

    let peak = sorted
        .iter()
        .copied()
        .max_by(|a, b| a.value.total_cmp(&b.value).then(b.date.cmp(&a.date)))?;
    let lowest = sorted
        .iter()
        .copied()
        .min_by(|a, b| a.value.total_cmp(&b.value))?;

    let sparkline: Vec<TimePoint> = sorted
        .iter()
        .rev()
        .take(12)
        .rev()
        .copied()
        .collect();

    Some(RateOverview {
        current: latest.value,
        date: latest.date,
        year_ago_value: year_ago.map(|p| p.value),
        change_from_year_ago: year_ago.map(|p| latest.value - p.value),
        sparkline,
        history: sorted,
        peak: ValueAtDate {
            value: peak.value,
            date: peak.date,
        },
        lowest: ValueAtDate {
            value: lowest.value,
            date: lowest.date,
        },
    })
}

/// Latest record per sector, ordered by sector key.
pub fn latest_by_sector(records: &[SectorRecord]) -> Vec<SectorRecord> {
    let mut latest: Vec<SectorRecord> = Vec::new();
    for record in records {
        match latest.iter_mut().find(|r| r.sector == record.sector) {
            Some(existing) => {
                if record.date > existing.date {
                    *existing = record.clone();
                }
            }
            None => latest.push(record.clone()),
        }
    }
    latest.sort_by(|a, b| a.sector.key().cmp(b.sector.key()));
    latest
}

/// Highest-value record for one sector, if any. Ties keep the earliest.
pub fn peak_value(records: &[SectorRecord], sector: &Sector) -> Option<SectorRecord> {
    records
        .iter()
        .filter(|r| r.sector == *sector)
        .max_by(|a, b| a.value.total_cmp(&b.value).then(b.date.cmp(&a.date)))
        .cloned()
}

/// Distinct sectors present in the records, sorted by key.
pub fn sector_list(records: &[SectorRecord]) -> Vec<Sector> {
    let mut sectors: Vec<Sector> = Vec::new();
    for record in records {
        if !sectors.contains(&record.sector) {
            sectors.push(record.sector.clone());
        }
    }
    sectors.sort_by(|a, b| a.key().cmp(b.key()));
    sectors
}

#[cfg(test)]
#[path = "analysis_tests.rs"]
mod analysis_tests;
