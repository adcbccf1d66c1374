//! Service layer: the transform and keyword engines plus supporting logic.
//!
//! Everything here is pure, synchronous compute over plain data; the HTTP
//! and ingest layers feed it and serve its outputs. Malformed-but-well-typed
//! input degrades to empty/neutral results instead of erroring.

pub mod analysis;
pub mod controls;
pub mod keywords;
pub mod multi_series;
pub mod pressure;
pub mod regression;
pub mod run_tracker;
pub mod simple_series;
pub mod window;

pub use analysis::{latest_by_sector, market_analysis, peak_value, rate_overview, sector_list};
pub use controls::ChartControls;
pub use keywords::{find_ai_keywords, find_ai_matches, has_ai_matches};
pub use multi_series::{multi_series_view, MultiSeriesOptions};
pub use pressure::{
    aggregate_pressure, compute_ai_pressure, AiPressureResult, KeywordCount, PostingItem,
    PressureExample, PressureOptions,
};
pub use regression::linear_regression;
pub use run_tracker::{LogEntry, LogLevel, RefreshRun, RunStatus, RunTracker};
pub use simple_series::{simple_series_view, TrendUnit};
pub use window::filter_by_time_range;
