//! Application state for the HTTP server.

use std::sync::Arc;
use std::time::Duration;

use crate::api::AiPressureResponse;
use crate::config::IngestConfig;
use crate::db::repository::FullRepository;
use crate::ingest::TtlCache;
use crate::services::RunTracker;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// Tracker for background refresh runs
    pub run_tracker: RunTracker,
    /// Cache for live pressure responses, keyed by look-back days
    pub pressure_cache: Arc<TtlCache<u32, AiPressureResponse>>,
    /// Ingest configuration (credentials, look-back, retention)
    pub config: Arc<IngestConfig>,
}

impl AppState {
    /// Create application state with a cache TTL taken from the config.
    pub fn new(repository: Arc<dyn FullRepository>, config: IngestConfig) -> Self {
        let ttl = Duration::from_secs(config.cache_ttl_hours * 3600);
        Self {
            repository,
            run_tracker: RunTracker::new(),
            pressure_cache: Arc::new(TtlCache::new(ttl)),
            config: Arc::new(config),
        }
    }

    /// Swap in a pre-built cache. Test use.
    pub fn with_pressure_cache(mut self, cache: Arc<TtlCache<u32, AiPressureResponse>>) -> Self {
        self.pressure_cache = cache;
        self
    }
}
