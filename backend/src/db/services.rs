//! High-level storage operations.
//!
//! Thin business-logic wrappers over the repository traits. These are the
//! functions application code should call; they work with any repository
//! implementation.

use log::info;

use crate::api::AiSkillSnapshot;
use crate::models::{Month, Sector, SectorRecord, TimePoint};

use super::repository::{FullRepository, RepositoryResult};

/// Metadata key holding the RFC 3339 timestamp of the last series refresh.
pub const LAST_UPDATED_KEY: &str = "last_updated";

/// Metadata key holding the RFC 3339 timestamp of the last snapshot run.
pub const AI_SKILLS_LAST_UPDATED_KEY: &str = "ai_skills_last_updated";

/// Store a batch of monthly records, replacing existing `(sector, month)`
/// entries.
pub async fn store_records(
    repo: &dyn FullRepository,
    records: Vec<SectorRecord>,
) -> RepositoryResult<usize> {
    let written = repo.upsert_records(records).await?;
    info!("stored {written} series records");
    Ok(written)
}

/// Every stored record.
pub async fn get_all_records(repo: &dyn FullRepository) -> RepositoryResult<Vec<SectorRecord>> {
    repo.fetch_all_records().await
}

/// Records restricted to the given sectors.
pub async fn get_records_for_sectors(
    repo: &dyn FullRepository,
    sectors: &[Sector],
) -> RepositoryResult<Vec<SectorRecord>> {
    repo.fetch_records_for_sectors(sectors).await
}

/// One sector's series, sorted ascending by month.
pub async fn get_sector_series(
    repo: &dyn FullRepository,
    sector: &Sector,
) -> RepositoryResult<Vec<TimePoint>> {
    repo.fetch_sector_series(sector).await
}

/// Distinct sectors present in the store.
pub async fn list_sectors(repo: &dyn FullRepository) -> RepositoryResult<Vec<Sector>> {
    repo.list_sectors().await
}

/// Most recent month with any data.
pub async fn latest_month(repo: &dyn FullRepository) -> RepositoryResult<Option<Month>> {
    repo.latest_month().await
}

/// Store a day's pressure snapshots.
pub async fn store_snapshots(
    repo: &dyn FullRepository,
    snapshots: Vec<AiSkillSnapshot>,
) -> RepositoryResult<usize> {
    let written = repo.upsert_snapshots(snapshots).await?;
    info!("stored {written} pressure snapshots");
    Ok(written)
}

/// Snapshots on or after the cutoff date ("YYYY-MM-DD").
pub async fn get_snapshots_since(
    repo: &dyn FullRepository,
    cutoff_date: &str,
) -> RepositoryResult<Vec<AiSkillSnapshot>> {
    repo.fetch_snapshots_since(cutoff_date).await
}

/// All snapshots from the most recent snapshot date.
pub async fn get_latest_snapshots(
    repo: &dyn FullRepository,
) -> RepositoryResult<Vec<AiSkillSnapshot>> {
    repo.fetch_latest_snapshots().await
}

/// Delete snapshots older than the cutoff. Returns the number removed.
pub async fn prune_snapshots(
    repo: &dyn FullRepository,
    cutoff_date: &str,
) -> RepositoryResult<usize> {
    let removed = repo.delete_snapshots_before(cutoff_date).await?;
    if removed > 0 {
        info!("pruned {removed} snapshots older than {cutoff_date}");
    }
    Ok(removed)
}

/// Record when the series data was last refreshed.
pub async fn mark_refreshed(repo: &dyn FullRepository, timestamp: &str) -> RepositoryResult<()> {
    repo.set_metadata(LAST_UPDATED_KEY, timestamp).await
}

/// RFC 3339 timestamp of the last refresh, if any.
pub async fn last_refreshed(repo: &dyn FullRepository) -> RepositoryResult<Option<String>> {
    repo.get_metadata(LAST_UPDATED_KEY).await
}

/// Verify the storage backend is reachable.
pub async fn health_check(repo: &dyn FullRepository) -> RepositoryResult<()> {
    repo.health_check().await
}
