//! Repository trait definitions.
//!
//! Storage is split into three narrow traits so callers can depend on just
//! the slice they touch; [`FullRepository`] ties them together for the
//! application wiring.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::AiSkillSnapshot;
use crate::models::{Month, Sector, SectorRecord, TimePoint};

/// Monthly labor-market series storage.
///
/// At most one record exists per `(sector, date)` pair; `upsert_records`
/// replaces on conflict.
#[async_trait]
pub trait SeriesStore: Send + Sync {
    /// Insert or replace records. Returns the number written.
    async fn upsert_records(&self, records: Vec<SectorRecord>) -> RepositoryResult<usize>;

    /// Every stored record, unordered.
    async fn fetch_all_records(&self) -> RepositoryResult<Vec<SectorRecord>>;

    /// Records for the given sectors only.
    async fn fetch_records_for_sectors(
        &self,
        sectors: &[Sector],
    ) -> RepositoryResult<Vec<SectorRecord>>;

    /// One sector's series as dated points, sorted ascending by month.
    async fn fetch_sector_series(&self, sector: &Sector) -> RepositoryResult<Vec<TimePoint>>;

    /// Distinct sectors present in the store, sorted by key.
    async fn list_sectors(&self) -> RepositoryResult<Vec<Sector>>;

    /// The most recent month with any data.
    async fn latest_month(&self) -> RepositoryResult<Option<Month>>;
}

/// Daily AI-pressure snapshot storage, keyed by `(sector, date)`.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Insert or replace snapshots. Returns the number written.
    async fn upsert_snapshots(&self, snapshots: Vec<AiSkillSnapshot>) -> RepositoryResult<usize>;

    /// Snapshots with `date >= cutoff_date` ("YYYY-MM-DD"), sorted by date
    /// then sector key.
    async fn fetch_snapshots_since(
        &self,
        cutoff_date: &str,
    ) -> RepositoryResult<Vec<AiSkillSnapshot>>;

    /// All snapshots from the most recent snapshot date.
    async fn fetch_latest_snapshots(&self) -> RepositoryResult<Vec<AiSkillSnapshot>>;

    /// Delete snapshots older than the cutoff. Returns the number removed.
    async fn delete_snapshots_before(&self, cutoff_date: &str) -> RepositoryResult<usize>;
}

/// Small string key/value store for operational markers such as the last
/// refresh timestamp.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    async fn set_metadata(&self, key: &str, value: &str) -> RepositoryResult<()>;
    async fn get_metadata(&self, key: &str) -> RepositoryResult<Option<String>>;
}

/// The complete storage interface the application wires against.
#[async_trait]
pub trait FullRepository: SeriesStore + SnapshotStore + MetadataStore {
    /// Verify the backend is reachable and usable.
    async fn health_check(&self) -> RepositoryResult<()>;
}
