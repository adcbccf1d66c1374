use super::*;
use crate::services::AiPressureResult;

fn record(date: &str, sector: &str, value: f64) -> SectorRecord {
    SectorRecord::new(date.parse().unwrap(), Sector::from_key(sector), value)
}

fn snapshot(date: &str, sector: &str) -> AiSkillSnapshot {
    AiSkillSnapshot {
        date: date.to_string(),
        sector: Sector::from_key(sector),
        pressure: AiPressureResult::empty(),
    }
}

#[tokio::test]
async fn test_upsert_replaces_on_same_sector_and_month() {
    let repo = LocalRepository::new();
    repo.upsert_records(vec![record("2024-05", "total", 7000.0)])
        .await
        .unwrap();
    repo.upsert_records(vec![record("2024-05", "total", 7744.0)])
        .await
        .unwrap();

    let all = repo.fetch_all_records().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].value, 7744.0);
}

#[tokio::test]
async fn test_sector_series_is_sorted_by_month() {
    let repo = LocalRepository::new();
    repo.seed_records([
        record("2024-05", "total", 3.0),
        record("2024-01", "total", 1.0),
        record("2024-03", "total", 2.0),
        record("2024-02", "manufacturing", 9.0),
    ]);

    let series = repo
        .fetch_sector_series(&Sector::Total)
        .await
        .unwrap();
    let values: Vec<f64> = series.iter().map(|p| p.value).collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0]);
}

#[tokio::test]
async fn test_list_sectors_sorted_and_distinct() {
    let repo = LocalRepository::new();
    repo.seed_records([
        record("2024-01", "total", 1.0),
        record("2024-02", "total", 2.0),
        record("2024-01", "healthcare", 3.0),
        record("2024-01", "manufacturing", 4.0),
    ]);

    let sectors = repo.list_sectors().await.unwrap();
    let keys: Vec<&str> = sectors.iter().map(|s| s.key()).collect();
    assert_eq!(keys, vec!["healthcare", "manufacturing", "total"]);
}

#[tokio::test]
async fn test_latest_month() {
    let repo = LocalRepository::new();
    assert_eq!(repo.latest_month().await.unwrap(), None);

    repo.seed_records([
        record("2024-05", "total", 1.0),
        record("2024-07", "healthcare", 2.0),
    ]);
    assert_eq!(
        repo.latest_month().await.unwrap(),
        Some("2024-07".parse().unwrap())
    );
}

#[tokio::test]
async fn test_snapshot_upsert_and_since_filter() {
    let repo = LocalRepository::new();
    repo.upsert_snapshots(vec![
        snapshot("2026-08-01", "total"),
        snapshot("2026-08-15", "total"),
        snapshot("2026-08-15", "information"),
    ])
    .await
    .unwrap();

    let since = repo.fetch_snapshots_since("2026-08-10").await.unwrap();
    let keys: Vec<(&str, &str)> = since
        .iter()
        .map(|s| (s.date.as_str(), s.sector.key()))
        .collect();
    assert_eq!(
        keys,
        vec![("2026-08-15", "information"), ("2026-08-15", "total")]
    );
}

#[tokio::test]
async fn test_latest_snapshots_only_most_recent_date() {
    let repo = LocalRepository::new();
    repo.upsert_snapshots(vec![
        snapshot("2026-08-01", "total"),
        snapshot("2026-08-15", "information"),
        snapshot("2026-08-15", "total"),
    ])
    .await
    .unwrap();

    let latest = repo.fetch_latest_snapshots().await.unwrap();
    assert_eq!(latest.len(), 2);
    assert!(latest.iter().all(|s| s.date == "2026-08-15"));
}

#[tokio::test]
async fn test_snapshot_retention_delete() {
    let repo = LocalRepository::new();
    repo.upsert_snapshots(vec![
        snapshot("2026-05-01", "total"),
        snapshot("2026-08-15", "total"),
    ])
    .await
    .unwrap();

    let removed = repo.delete_snapshots_before("2026-06-01").await.unwrap();
    assert_eq!(removed, 1);
    assert_eq!(repo.snapshot_count(), 1);
}

#[tokio::test]
async fn test_metadata_roundtrip() {
    let repo = LocalRepository::new();
    assert_eq!(repo.get_metadata("last_updated").await.unwrap(), None);
    repo.set_metadata("last_updated", "2026-08-29T00:00:00Z")
        .await
        .unwrap();
    assert_eq!(
        repo.get_metadata("last_updated").await.unwrap().as_deref(),
        Some("2026-08-29T00:00:00Z")
    );
}

#[tokio::test]
async fn test_health_check_follows_flag() {
    let repo = LocalRepository::new();
    assert!(repo.health_check().await.is_ok());
    repo.set_healthy(false);
    assert!(repo.health_check().await.is_err());
}
