//! Data Transfer Objects for the HTTP API.
//!
//! Query parameter structs plus a few response envelopes. The chart and
//! analysis payloads themselves are re-exported from the api module since
//! they already derive Serialize/Deserialize.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    AiPressureResponse, AiSkillSnapshot, MarketAnalysis, MultiChartView, RateOverview,
    SectorInfo, SectorPressureEntry, SimpleChartView,
};

use crate::models::{Month, SectorRecord, TimePoint};
use crate::services::LogEntry;

/// Query parameters for the raw series endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SeriesQuery {
    pub sector: String,
    /// Inclusive lower month bound ("YYYY-MM").
    #[serde(default)]
    pub start: Option<Month>,
    /// Inclusive upper month bound ("YYYY-MM").
    #[serde(default)]
    pub end: Option<Month>,
}

/// Raw series response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesResponse {
    pub sector: String,
    pub points: Vec<TimePoint>,
}

/// Query parameters shared by the chart endpoints.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ChartQuery {
    /// Range label: 1Y, 3Y, 5Y, 10Y, ALL. Default 3Y.
    #[serde(default)]
    pub range: Option<String>,
    /// Comma-separated sector keys.
    #[serde(default)]
    pub sectors: Option<String>,
}

/// Query parameters for the simple rate chart.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RateChartQuery {
    /// Which rate pseudo-series to plot. Default unemployment_rate.
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub range: Option<String>,
}

/// Query parameters for the live pressure endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PressureQuery {
    /// Posting look-back in days, clamped 1..60.
    #[serde(default)]
    pub days: Option<u32>,
}

/// Query parameters for the stored snapshot endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SnapshotQuery {
    /// Snapshot date "YYYY-MM-DD"; latest run when absent.
    #[serde(default)]
    pub date: Option<String>,
    /// Comma-separated sector keys for the cross-sector rollup.
    #[serde(default)]
    pub sectors: Option<String>,
}

/// Stored snapshots plus the rollup for the requested selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotResponse {
    pub snapshots: Vec<AiSkillSnapshot>,
    pub rollup: crate::services::AiPressureResult,
}

/// Request body for the bulk series upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSeriesRequest {
    pub records: Vec<SectorRecord>,
}

/// Response for the bulk series upsert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkSeriesResponse {
    pub written: usize,
}

/// Response for starting a refresh run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Run ID for tracking the async refresh
    pub run_id: String,
    /// Message about the operation
    pub message: String,
}

/// Run status response for async refreshes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatusResponse {
    pub run_id: String,
    pub status: String,
    pub logs: Vec<LogEntry>,
    pub result: Option<serde_json::Value>,
}

/// Latest point for one sector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatestEntry {
    pub sector: SectorInfo,
    pub date: Month,
    pub value: f64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Storage backend status
    pub store: String,
    /// Last series refresh timestamp, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}
