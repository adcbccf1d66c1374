//! Storage module for labor-market series and pressure snapshots.
//!
//! Access goes through the Repository pattern so storage backends can be
//! swapped without touching callers:
//!
//! - `services`: high-level business logic functions (use these!)
//! - `repository`: trait definitions and error types
//! - `repositories::local`: in-memory implementation
//!
//! A process-wide singleton is available through [`init_repository`] /
//! [`get_repository`] for the HTTP layer; tests construct repositories
//! directly instead.

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod repositories;
pub mod repository;
pub mod services;

pub use repositories::LocalRepository;
pub use repository::{
    ErrorContext, FullRepository, MetadataStore, RepositoryError, RepositoryResult, SeriesStore,
    SnapshotStore,
};
pub use services::{
    get_all_records, get_latest_snapshots, get_records_for_sectors, get_sector_series,
    get_snapshots_since, health_check, last_refreshed, latest_month, list_sectors, mark_refreshed,
    prune_snapshots, store_records, store_snapshots, AI_SKILLS_LAST_UPDATED_KEY, LAST_UPDATED_KEY,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

#[cfg(feature = "local-repo")]
fn create_selected_repository() -> Arc<dyn FullRepository> {
    Arc::new(LocalRepository::new())
}

/// Initialize the global repository singleton for the selected backend.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let _ = REPOSITORY.set(create_selected_repository());
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Storage not initialized. Call init_repository() first.")
}
