//! In-memory local repository implementation.
//!
//! All data lives in process memory behind a single lock, which keeps
//! execution fast, deterministic, and isolated. Suitable for tests and for
//! single-process deployments where the dataset is a few thousand monthly
//! observations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::api::AiSkillSnapshot;
use crate::db::repository::{
    FullRepository, MetadataStore, RepositoryError, RepositoryResult, SeriesStore, SnapshotStore,
};
use crate::models::{Month, Sector, SectorRecord, TimePoint};

/// In-memory repository. Cloning shares the underlying data.
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    /// Keyed by `(sector key, month)`.
    records: HashMap<(String, Month), SectorRecord>,
    /// Keyed by `(sector key, snapshot date "YYYY-MM-DD")`.
    snapshots: HashMap<(String, String), AiSkillSnapshot>,
    metadata: HashMap<String, String>,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            records: HashMap::new(),
            snapshots: HashMap::new(),
            metadata: HashMap::new(),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate records without going through the async trait. Test
    /// setup helper.
    pub fn seed_records(&self, records: impl IntoIterator<Item = SectorRecord>) {
        let mut data = self.data.write();
        for record in records {
            data.records
                .insert((record.sector.key().to_string(), record.date), record);
        }
    }

    /// Drop all stored data.
    pub fn clear(&self) {
        let mut data = self.data.write();
        data.records.clear();
        data.snapshots.clear();
        data.metadata.clear();
    }

    /// Number of stored series records.
    pub fn record_count(&self) -> usize {
        self.data.read().records.len()
    }

    /// Number of stored snapshots.
    pub fn snapshot_count(&self) -> usize {
        self.data.read().snapshots.len()
    }

    /// Force health checks to fail. Test helper.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }
}

#[async_trait]
impl SeriesStore for LocalRepository {
    async fn upsert_records(&self, records: Vec<SectorRecord>) -> RepositoryResult<usize> {
        let mut data = self.data.write();
        let written = records.len();
        for record in records {
            data.records
                .insert((record.sector.key().to_string(), record.date), record);
        }
        Ok(written)
    }

    async fn fetch_all_records(&self) -> RepositoryResult<Vec<SectorRecord>> {
        Ok(self.data.read().records.values().cloned().collect())
    }

    async fn fetch_records_for_sectors(
        &self,
        sectors: &[Sector],
    ) -> RepositoryResult<Vec<SectorRecord>> {
        let data = self.data.read();
        Ok(data
            .records
            .values()
            .filter(|r| sectors.contains(&r.sector))
            .cloned()
            .collect())
    }

    async fn fetch_sector_series(&self, sector: &Sector) -> RepositoryResult<Vec<TimePoint>> {
        let data = self.data.read();
        let mut points: Vec<TimePoint> = data
            .records
            .values()
            .filter(|r| &r.sector == sector)
            .map(|r| TimePoint {
                date: r.date,
                value: r.value,
            })
            .collect();
        points.sort_by_key(|p| p.date);
        Ok(points)
    }

    async fn list_sectors(&self) -> RepositoryResult<Vec<Sector>> {
        let data = self.data.read();
        let mut sectors: Vec<Sector> = Vec::new();
        for record in data.records.values() {
            if !sectors.contains(&record.sector) {
                sectors.push(record.sector.clone());
            }
        }
        sectors.sort_by(|a, b| a.key().cmp(b.key()));
        Ok(sectors)
    }

    async fn latest_month(&self) -> RepositoryResult<Option<Month>> {
        Ok(self.data.read().records.values().map(|r| r.date).max())
    }
}

#[async_trait]
impl SnapshotStore for LocalRepository {
    async fn upsert_snapshots(&self, snapshots: Vec<AiSkillSnapshot>) -> RepositoryResult<usize> {
        let mut data = self.data.write();
        let written = snapshots.len();
        for snapshot in snapshots {
            data.snapshots.insert(
                (snapshot.sector.key().to_string(), snapshot.date.clone()),
                snapshot,
            );
        }
        Ok(written)
    }

    async fn fetch_snapshots_since(
        &self,
        cutoff_date: &str,
    ) -> RepositoryResult<Vec<AiSkillSnapshot>> {
        let data = self.data.read();
        let mut matching: Vec<AiSkillSnapshot> = data
            .snapshots
            .values()
            .filter(|s| s.date.as_str() >= cutoff_date)
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.sector.key().cmp(b.sector.key()))
        });
        Ok(matching)
    }

    async fn fetch_latest_snapshots(&self) -> RepositoryResult<Vec<AiSkillSnapshot>> {
        let data = self.data.read();
        let Some(latest_date) = data.snapshots.values().map(|s| s.date.clone()).max() else {
            return Ok(Vec::new());
        };
        let mut matching: Vec<AiSkillSnapshot> = data
            .snapshots
            .values()
            .filter(|s| s.date == latest_date)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.sector.key().cmp(b.sector.key()));
        Ok(matching)
    }

    async fn delete_snapshots_before(&self, cutoff_date: &str) -> RepositoryResult<usize> {
        let mut data = self.data.write();
        let before = data.snapshots.len();
        data.snapshots.retain(|(_, date), _| date.as_str() >= cutoff_date);
        Ok(before - data.snapshots.len())
    }
}

#[async_trait]
impl MetadataStore for LocalRepository {
    async fn set_metadata(&self, key: &str, value: &str) -> RepositoryResult<()> {
        self.data
            .write()
            .metadata
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_metadata(&self, key: &str) -> RepositoryResult<Option<String>> {
        Ok(self.data.read().metadata.get(key).cloned())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::connection("local repository marked unhealthy"))
        }
    }
}

#[cfg(test)]
#[path = "local_tests.rs"]
mod tests;
