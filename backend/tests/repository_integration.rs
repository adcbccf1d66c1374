//! Integration tests for the local repository through the service layer.

use std::sync::Arc;

use lmi_rust::api::AiSkillSnapshot;
use lmi_rust::db::{self, FullRepository, LocalRepository};
use lmi_rust::models::{Month, Sector, SectorRecord};
use lmi_rust::services::AiPressureResult;

fn record(date: &str, sector: &str, value: f64) -> SectorRecord {
    SectorRecord::new(
        date.parse::<Month>().unwrap(),
        Sector::from_key(sector),
        value,
    )
}

fn repo() -> Arc<dyn FullRepository> {
    Arc::new(LocalRepository::new())
}

#[tokio::test]
async fn store_and_fetch_roundtrip() {
    let repo = repo();
    let written = db::store_records(
        repo.as_ref(),
        vec![
            record("2024-01", "total", 8000.0),
            record("2024-02", "total", 7900.0),
            record("2024-01", "manufacturing", 600.0),
        ],
    )
    .await
    .unwrap();
    assert_eq!(written, 3);

    let all = db::get_all_records(repo.as_ref()).await.unwrap();
    assert_eq!(all.len(), 3);

    let series = db::get_sector_series(repo.as_ref(), &Sector::Total)
        .await
        .unwrap();
    assert_eq!(series.len(), 2);
    assert!(series[0].date < series[1].date);
}

#[tokio::test]
async fn upsert_overwrites_by_sector_and_month() {
    let repo = repo();
    db::store_records(repo.as_ref(), vec![record("2024-01", "total", 100.0)])
        .await
        .unwrap();
    db::store_records(repo.as_ref(), vec![record("2024-01", "total", 200.0)])
        .await
        .unwrap();

    let all = db::get_all_records(repo.as_ref()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].value, 200.0);
}

#[tokio::test]
async fn sector_filters_and_latest_month() {
    let repo = repo();
    db::store_records(
        repo.as_ref(),
        vec![
            record("2023-12", "total", 1.0),
            record("2024-03", "healthcare", 2.0),
            record("2024-02", "unemployment_rate", 3.9),
        ],
    )
    .await
    .unwrap();

    let sectors = db::list_sectors(repo.as_ref()).await.unwrap();
    let keys: Vec<&str> = sectors.iter().map(|s| s.key()).collect();
    assert_eq!(keys, vec!["healthcare", "total", "unemployment_rate"]);

    let filtered = db::get_records_for_sectors(
        repo.as_ref(),
        &[Sector::Total, Sector::from_key("healthcare")],
    )
    .await
    .unwrap();
    assert_eq!(filtered.len(), 2);

    assert_eq!(
        db::latest_month(repo.as_ref()).await.unwrap(),
        Some("2024-03".parse().unwrap())
    );
}

#[tokio::test]
async fn snapshot_lifecycle() {
    let repo = repo();

    let make = |date: &str, sector: &str| AiSkillSnapshot {
        date: date.to_string(),
        sector: Sector::from_key(sector),
        pressure: AiPressureResult::empty(),
    };

    db::store_snapshots(
        repo.as_ref(),
        vec![
            make("2026-05-01", "total"),
            make("2026-08-15", "total"),
            make("2026-08-15", "information"),
        ],
    )
    .await
    .unwrap();

    let latest = db::get_latest_snapshots(repo.as_ref()).await.unwrap();
    assert_eq!(latest.len(), 2);
    assert!(latest.iter().all(|s| s.date == "2026-08-15"));

    let removed = db::prune_snapshots(repo.as_ref(), "2026-06-01")
        .await
        .unwrap();
    assert_eq!(removed, 1);

    let remaining = db::get_snapshots_since(repo.as_ref(), "2026-01-01")
        .await
        .unwrap();
    assert_eq!(remaining.len(), 2);
}

#[tokio::test]
async fn metadata_and_health() {
    let repo = repo();
    assert!(db::health_check(repo.as_ref()).await.is_ok());

    assert_eq!(db::last_refreshed(repo.as_ref()).await.unwrap(), None);
    db::mark_refreshed(repo.as_ref(), "2026-08-29T12:00:00Z")
        .await
        .unwrap();
    assert_eq!(
        db::last_refreshed(repo.as_ref()).await.unwrap().as_deref(),
        Some("2026-08-29T12:00:00Z")
    );
}

#[tokio::test]
async fn global_repository_initializes_once() {
    lmi_rust::db::init_repository().unwrap();
    let first = lmi_rust::db::get_repository().unwrap();
    let second = lmi_rust::db::get_repository().unwrap();
    assert!(Arc::ptr_eq(first, second));
}
