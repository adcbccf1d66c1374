//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the actual transform or keyword work.

use axum::{
    extract::{Path, Query, State},
    response::sse::{Event, Sse},
    Json,
};
use futures::stream::Stream;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::time::Duration;

use super::dto::{
    BulkSeriesRequest, BulkSeriesResponse, ChartQuery, HealthResponse, LatestEntry,
    PressureQuery, RateChartQuery, RefreshResponse, RunStatusResponse, SeriesQuery,
    SeriesResponse, SnapshotQuery, SnapshotResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    AiPressureResponse, AiSkillSnapshot, MarketAnalysis, MultiChartView, RateOverview,
    SectorInfo, SectorPressureEntry, SimpleChartView,
};
use crate::db::services as db_services;
use crate::ingest::{SearchOptions, UsaJobsClient, SECTOR_CATEGORY_CODES};
use crate::models::{Sector, TimeRange};
use crate::services::{self, MultiSeriesOptions, PressureOptions, RunStatus, TrendUnit};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

fn parse_range(label: Option<&str>) -> Result<TimeRange, AppError> {
    match label {
        None => Ok(TimeRange::ThreeYears),
        Some(label) => label
            .parse::<TimeRange>()
            .map_err(|e| AppError::BadRequest(e.to_string())),
    }
}

fn parse_sectors(csv: Option<&str>) -> Option<Vec<Sector>> {
    let csv = csv?;
    let sectors: Vec<Sector> = csv
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Sector::from_key)
        .collect();
    if sectors.is_empty() {
        None
    } else {
        Some(sectors)
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let store_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(()) => "connected".to_string(),
        Err(e) => format!("error: {}", e),
    };
    let last_updated = db_services::last_refreshed(state.repository.as_ref())
        .await
        .unwrap_or(None);

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        store: store_status,
        last_updated,
    }))
}

// =============================================================================
// Series and catalog
// =============================================================================

/// GET /v1/series?sector=&start=&end=
///
/// Raw monthly points for one sector, ascending, with optional inclusive
/// month bounds.
pub async fn get_series(
    State(state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> HandlerResult<SeriesResponse> {
    let sector = Sector::from_key(&query.sector);
    let mut points = db_services::get_sector_series(state.repository.as_ref(), &sector).await?;

    if let Some(start) = query.start {
        points.retain(|p| p.date >= start);
    }
    if let Some(end) = query.end {
        points.retain(|p| p.date <= end);
    }

    Ok(Json(SeriesResponse {
        sector: sector.key().to_string(),
        points,
    }))
}

/// GET /v1/sectors
///
/// Catalog of sectors present in the store with display metadata.
pub async fn get_sectors(State(state): State<AppState>) -> HandlerResult<Vec<SectorInfo>> {
    let sectors = db_services::list_sectors(state.repository.as_ref()).await?;
    Ok(Json(sectors.iter().map(SectorInfo::from).collect()))
}

/// GET /v1/latest
///
/// Latest stored point per sector.
pub async fn get_latest(State(state): State<AppState>) -> HandlerResult<Vec<LatestEntry>> {
    let records = db_services::get_all_records(state.repository.as_ref()).await?;
    let latest = services::latest_by_sector(&records);
    Ok(Json(
        latest
            .into_iter()
            .map(|r| LatestEntry {
                sector: SectorInfo::from(&r.sector),
                date: r.date,
                value: r.value,
            })
            .collect(),
    ))
}

// =============================================================================
// Chart views
// =============================================================================

/// Openings sectors present in the store: everything except the rate
/// pseudo-series and the per-industry unemployment series.
fn default_openings_sectors(records: &[crate::models::SectorRecord]) -> Vec<Sector> {
    services::sector_list(records)
        .into_iter()
        .filter(|s| !s.is_rate() && !s.key().starts_with("unemployment_"))
        .collect()
}

/// Unemployment chart working set: the headline rate plus every
/// per-industry unemployment series present.
fn default_unemployment_sectors(records: &[crate::models::SectorRecord]) -> Vec<Sector> {
    let mut sectors: Vec<Sector> = services::sector_list(records)
        .into_iter()
        .filter(|s| s.key().starts_with("unemployment_"))
        .collect();
    sectors.insert(0, Sector::UnemploymentRate);
    sectors
}

/// GET /v1/charts/openings?range=&sectors=
pub async fn openings_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> HandlerResult<MultiChartView> {
    let range = parse_range(query.range.as_deref())?;
    let records = db_services::get_all_records(state.repository.as_ref()).await?;
    let selected =
        parse_sectors(query.sectors.as_deref()).unwrap_or_else(|| default_openings_sectors(&records));

    let view = tokio::task::spawn_blocking(move || {
        services::multi_series_view(
            &records,
            &selected,
            MultiSeriesOptions {
                range,
                include_unemployment_rate: false,
                trend_unit: TrendUnit::Percent,
            },
        )
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(view))
}

/// GET /v1/charts/unemployment-by-industry?range=&sectors=
pub async fn unemployment_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> HandlerResult<MultiChartView> {
    let range = parse_range(query.range.as_deref())?;
    let records = db_services::get_all_records(state.repository.as_ref()).await?;
    let selected = parse_sectors(query.sectors.as_deref())
        .unwrap_or_else(|| default_unemployment_sectors(&records));

    let view = tokio::task::spawn_blocking(move || {
        services::multi_series_view(
            &records,
            &selected,
            MultiSeriesOptions {
                range,
                include_unemployment_rate: true,
                trend_unit: TrendUnit::PercentagePoints,
            },
        )
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(view))
}

/// GET /v1/charts/rate?series=&range=
pub async fn rate_chart(
    State(state): State<AppState>,
    Query(query): Query<RateChartQuery>,
) -> HandlerResult<SimpleChartView> {
    let range = parse_range(query.range.as_deref())?;
    let sector = match query.series.as_deref() {
        None | Some("unemployment_rate") => Sector::UnemploymentRate,
        Some("participation_rate") => Sector::ParticipationRate,
        Some(other) => {
            return Err(AppError::BadRequest(format!(
                "unknown rate series '{other}': expected unemployment_rate or participation_rate"
            )))
        }
    };

    let points = db_services::get_sector_series(state.repository.as_ref(), &sector).await?;
    let view = tokio::task::spawn_blocking(move || services::simple_series_view(&points, range))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(view))
}

// =============================================================================
// Analysis
// =============================================================================

/// GET /v1/analysis
pub async fn get_analysis(State(state): State<AppState>) -> HandlerResult<MarketAnalysis> {
    let records = db_services::get_all_records(state.repository.as_ref()).await?;
    let analysis = tokio::task::spawn_blocking(move || services::market_analysis(&records))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .ok_or_else(|| AppError::NotFound("no openings data stored".to_string()))?;

    Ok(Json(analysis))
}

/// GET /v1/rate-overview
pub async fn get_rate_overview(State(state): State<AppState>) -> HandlerResult<RateOverview> {
    let points = db_services::get_sector_series(
        state.repository.as_ref(),
        &Sector::UnemploymentRate,
    )
    .await?;
    let overview = services::rate_overview(&points)
        .ok_or_else(|| AppError::NotFound("no unemployment rate data stored".to_string()))?;

    Ok(Json(overview))
}

// =============================================================================
// AI pressure
// =============================================================================

/// GET /v1/ai-pressure?days=
///
/// Live AI-pressure signal across all mapped sectors. The whole response
/// is cached per days value; missing USAJOBS credentials yield a 501.
pub async fn get_ai_pressure(
    State(state): State<AppState>,
    Query(query): Query<PressureQuery>,
) -> HandlerResult<AiPressureResponse> {
    let days = query
        .days
        .unwrap_or(state.config.posting_lookback_days)
        .clamp(1, 60);

    if let Some(cached) = state.pressure_cache.get(&days) {
        return Ok(Json(cached));
    }

    let Some((auth_key, user_agent)) = state.config.usajobs_credentials() else {
        return Err(AppError::NotConfigured(
            "Missing USAJOBS configuration. Set USAJOBS_AUTH_KEY and USAJOBS_USER_AGENT."
                .to_string(),
        ));
    };

    let client = UsaJobsClient::new(reqwest::Client::new(), auth_key, user_agent);
    let mut sectors = BTreeMap::new();

    for (sector_key, codes) in SECTOR_CATEGORY_CODES {
        let options = SearchOptions {
            page_limit: if sector_key == "total" { 1 } else { 2 },
            ..SearchOptions::default()
        };

        let entry = match client.search_postings(codes, days, options).await {
            Ok(items) => {
                let result = services::compute_ai_pressure(&items, PressureOptions::live());
                SectorPressureEntry::condensed(result)
            }
            Err(err) => {
                log::warn!("pressure search for {sector_key} failed: {err}");
                SectorPressureEntry::failed(err.to_string())
            }
        };
        sectors.insert(sector_key.to_string(), entry);
    }

    let response = AiPressureResponse {
        days,
        generated_at: chrono::Utc::now(),
        sectors,
    };
    state.pressure_cache.insert(days, response.clone());

    Ok(Json(response))
}

/// GET /v1/ai-pressure/snapshots?date=&sectors=
///
/// Stored snapshots for a date (latest run when absent) plus the
/// cross-sector rollup for the requested selection.
pub async fn get_pressure_snapshots(
    State(state): State<AppState>,
    Query(query): Query<SnapshotQuery>,
) -> HandlerResult<SnapshotResponse> {
    let snapshots: Vec<AiSkillSnapshot> = match &query.date {
        Some(date) => db_services::get_snapshots_since(state.repository.as_ref(), date)
            .await?
            .into_iter()
            .filter(|s| &s.date == date)
            .collect(),
        None => db_services::get_latest_snapshots(state.repository.as_ref()).await?,
    };

    let selected = parse_sectors(query.sectors.as_deref())
        .unwrap_or_else(|| snapshots.iter().map(|s| s.sector.clone()).collect());

    let by_sector: BTreeMap<String, crate::services::AiPressureResult> = snapshots
        .iter()
        .map(|s| (s.sector.key().to_string(), s.pressure.clone()))
        .collect();
    let rollup = services::aggregate_pressure(&by_sector, &selected);

    Ok(Json(SnapshotResponse { snapshots, rollup }))
}

// =============================================================================
// Ingest endpoints
// =============================================================================

/// POST /v1/series/bulk
///
/// Bulk upsert of series records, used by backfill tooling.
pub async fn bulk_upsert(
    State(state): State<AppState>,
    Json(request): Json<BulkSeriesRequest>,
) -> HandlerResult<BulkSeriesResponse> {
    if request.records.is_empty() {
        return Err(AppError::BadRequest("no records in request".to_string()));
    }

    let written = db_services::store_records(state.repository.as_ref(), request.records).await?;
    Ok(Json(BulkSeriesResponse { written }))
}

/// POST /v1/refresh
///
/// Start a background refresh run. Returns 202 and a run ID for tracking.
pub async fn start_refresh(
    State(state): State<AppState>,
) -> Result<(axum::http::StatusCode, Json<RefreshResponse>), AppError> {
    let run_id = state.run_tracker.create_run();
    let response_run_id = run_id.clone();

    let tracker = state.run_tracker.clone();
    let repo = state.repository.clone();
    let config = state.config.clone();

    tokio::spawn(async move {
        crate::ingest::execute_refresh(repo.as_ref(), &config, &tracker, &run_id).await;
    });

    Ok((
        axum::http::StatusCode::ACCEPTED,
        Json(RefreshResponse {
            run_id: response_run_id.clone(),
            message: format!(
                "Refresh started. Track progress at /v1/runs/{}/logs",
                response_run_id
            ),
        }),
    ))
}

// =============================================================================
// Async run management
// =============================================================================

/// GET /v1/runs/{run_id}
pub async fn get_run_status(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> HandlerResult<RunStatusResponse> {
    let run = state
        .run_tracker
        .get_run(&run_id)
        .ok_or_else(|| AppError::NotFound(format!("Run {} not found", run_id)))?;

    Ok(Json(RunStatusResponse {
        run_id: run.run_id,
        status: format!("{:?}", run.status).to_lowercase(),
        logs: run.logs,
        result: run.result,
    }))
}

/// GET /v1/runs/{run_id}/logs
///
/// Stream run logs via Server-Sent Events until the run completes.
pub async fn stream_run_logs(
    State(state): State<AppState>,
    Path(run_id): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    if state.run_tracker.get_run(&run_id).is_none() {
        return Err(AppError::NotFound(format!("Run {} not found", run_id)));
    }

    let tracker = state.run_tracker.clone();
    let stream = async_stream::stream! {
        let mut last_log_count = 0;
        loop {
            let logs = tracker.get_logs(&run_id);
            for log in logs.iter().skip(last_log_count) {
                let event_data = serde_json::to_string(log).unwrap_or_default();
                yield Ok(Event::default().data(event_data));
            }
            last_log_count = logs.len();

            if let Some(run) = tracker.get_run(&run_id) {
                if run.status != RunStatus::Running {
                    let final_event = serde_json::json!({
                        "status": run.status,
                        "result": run.result,
                    });
                    yield Ok(Event::default()
                        .event("complete")
                        .data(serde_json::to_string(&final_event).unwrap_or_default()));
                    break;
                }
            } else {
                break;
            }

            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    };

    Ok(Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(1))
            .text("keep-alive"),
    ))
}
