//! Refresh orchestration: pulls fresh data from the external APIs and
//! writes it through the repository, logging progress into a
//! [`RunTracker`] so clients can follow along.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, Utc};

use crate::config::IngestConfig;
use crate::db::{self, FullRepository};
use crate::services::{
    compute_ai_pressure, LogLevel, PressureOptions, RunTracker,
};

use super::bls::BlsClient;
use super::usajobs::{SearchOptions, UsaJobsClient, SECTOR_CATEGORY_CODES};

/// Fetch the latest BLS window and store it, logging into the tracker
/// under `run_id`. Returns the number of records written.
pub async fn refresh_series(
    repo: &dyn FullRepository,
    client: &BlsClient,
    tracker: &RunTracker,
    run_id: &str,
) -> anyhow::Result<usize> {
    tracker.log(run_id, LogLevel::Info, "fetching latest BLS window");

    let current_year = Utc::now().year();
    let records = match client.fetch_latest(current_year).await {
        Ok(records) => records,
        Err(err) => {
            tracker.log(run_id, LogLevel::Error, format!("BLS fetch failed: {err}"));
            return Err(err.into());
        }
    };

    tracker.log(
        run_id,
        LogLevel::Info,
        format!("fetched {} observations", records.len()),
    );

    let written = db::store_records(repo, records).await?;
    db::mark_refreshed(repo, &Utc::now().to_rfc3339()).await?;

    tracker.log(
        run_id,
        LogLevel::Success,
        format!("stored {written} records"),
    );
    Ok(written)
}

/// One-time historical backfill from 2015 onward.
pub async fn backfill_series(
    repo: &dyn FullRepository,
    client: &BlsClient,
) -> anyhow::Result<usize> {
    let current_year = Utc::now().year();
    let records = client.fetch_historical(current_year).await?;
    let written = db::store_records(repo, records).await?;
    db::mark_refreshed(repo, &Utc::now().to_rfc3339()).await?;
    Ok(written)
}

/// Compute today's AI-pressure snapshot for every mapped sector and store
/// it, then prune snapshots past the retention window. Sectors whose
/// search fails are skipped with a warning; the run still succeeds if any
/// sector came through.
pub async fn refresh_pressure_snapshots(
    repo: &dyn FullRepository,
    client: &UsaJobsClient,
    config: &IngestConfig,
    tracker: &RunTracker,
    run_id: &str,
) -> anyhow::Result<usize> {
    let today = Utc::now().format("%Y-%m-%d").to_string();
    let mut snapshots = Vec::new();
    let mut failures = 0usize;

    for (sector_key, codes) in SECTOR_CATEGORY_CODES {
        // the catch-all category pulls enough volume in one page
        let options = SearchOptions {
            page_limit: if sector_key == "total" { 1 } else { 2 },
            ..SearchOptions::default()
        };

        match client
            .search_postings(codes, config.posting_lookback_days, options)
            .await
        {
            Ok(items) => {
                let pressure =
                    compute_ai_pressure(&items, PressureOptions::daily_snapshot());
                tracker.log(
                    run_id,
                    LogLevel::Info,
                    format!(
                        "{sector_key}: {} postings, {} AI matches",
                        pressure.total, pressure.ai_count
                    ),
                );
                snapshots.push(crate::api::AiSkillSnapshot {
                    date: today.clone(),
                    sector: crate::models::Sector::from_key(sector_key),
                    pressure,
                });
            }
            Err(err) => {
                failures += 1;
                tracker.log(
                    run_id,
                    LogLevel::Warning,
                    format!("{sector_key}: search failed: {err}"),
                );
            }
        }
    }

    if snapshots.is_empty() && failures > 0 {
        anyhow::bail!("every sector search failed");
    }

    let written = db::store_snapshots(repo, snapshots).await?;
    repo.set_metadata(db::AI_SKILLS_LAST_UPDATED_KEY, &Utc::now().to_rfc3339())
        .await?;

    let cutoff = (Utc::now()
        - chrono::Duration::days(i64::from(config.snapshot_retention_days)))
    .format("%Y-%m-%d")
    .to_string();
    db::prune_snapshots(repo, &cutoff).await?;

    tracker.log(
        run_id,
        LogLevel::Success,
        format!("stored {written} snapshots"),
    );
    Ok(written)
}

/// Execute a full refresh under an existing tracker run: BLS series
/// always, pressure snapshots when USAJOBS credentials are configured.
/// Marks the run completed or failed.
pub async fn execute_refresh(
    repo: &dyn FullRepository,
    config: &IngestConfig,
    tracker: &RunTracker,
    run_id: &str,
) {
    let http = reqwest::Client::new();

    let bls = BlsClient::new(http.clone(), config.bls_api_key.clone());
    let series_result = refresh_series(repo, &bls, tracker, run_id).await;

    let snapshot_result = match config.usajobs_credentials() {
        Some((key, agent)) => {
            let usajobs = UsaJobsClient::new(http, key, agent);
            refresh_pressure_snapshots(repo, &usajobs, config, tracker, run_id)
                .await
                .map(Some)
        }
        None => {
            tracker.log(
                run_id,
                LogLevel::Info,
                "USAJOBS credentials not configured, skipping snapshots",
            );
            Ok(None)
        }
    };

    match (series_result, snapshot_result) {
        (Ok(records), Ok(snapshots)) => {
            tracker.complete_run(
                run_id,
                Some(serde_json::json!({
                    "records": records,
                    "snapshots": snapshots,
                })),
            );
        }
        (Err(err), _) | (_, Err(err)) => {
            log::error!("refresh run {run_id} failed: {err}");
            tracker.fail_run(run_id, err.to_string());
        }
    }
}

/// Run one full refresh under a fresh tracker run. Returns the run id.
pub async fn run_refresh(
    repo: &dyn FullRepository,
    config: &IngestConfig,
    tracker: &RunTracker,
) -> String {
    let run_id = tracker.create_run();
    execute_refresh(repo, config, tracker, &run_id).await;
    run_id
}

/// Spawn the periodic refresh loop. No-op when the interval is zero.
pub fn spawn_refresh_loop(
    repo: Arc<dyn FullRepository>,
    config: IngestConfig,
    tracker: RunTracker,
) {
    if !config.refresh_loop_enabled() {
        log::info!("periodic refresh disabled");
        return;
    }

    let interval = Duration::from_secs(config.refresh_interval_hours * 3600);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let run_id = run_refresh(repo.as_ref(), &config, &tracker).await;
            log::info!("scheduled refresh finished: run {run_id}");
        }
    });
}
