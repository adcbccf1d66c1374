//! External data ingest: BLS time series and USAJOBS posting searches,
//! a TTL cache for live responses, and the refresh orchestration that
//! writes fetched data through the repository.

pub mod bls;
pub mod cache;
pub mod refresh;
pub mod usajobs;

pub use bls::{BlsClient, SeriesCatalogEntry, SERIES_CATALOG};
pub use cache::{Clock, ManualClock, SystemClock, TtlCache};
pub use refresh::{
    backfill_series, execute_refresh, refresh_pressure_snapshots, refresh_series, run_refresh,
    spawn_refresh_loop,
};
pub use usajobs::{category_codes_for_sector, SearchOptions, UsaJobsClient, SECTOR_CATEGORY_CODES};

use thiserror::Error;

/// Errors raised by the ingest clients.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("request to {service} failed: {source}")]
    Http {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned status {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("failed to decode {service} response at {path}: {message}")]
    Decode {
        service: &'static str,
        path: String,
        message: String,
    },

    #[error("{0} credentials are not configured")]
    NotConfigured(&'static str),
}

impl IngestError {
    pub(crate) fn http(service: &'static str, source: reqwest::Error) -> Self {
        IngestError::Http { service, source }
    }

    pub(crate) fn status(service: &'static str, status: reqwest::StatusCode) -> Self {
        IngestError::Status { service, status }
    }

    /// Decode a JSON payload, reporting the path to the offending field.
    pub(crate) fn decode_json<T: serde::de::DeserializeOwned>(
        service: &'static str,
        body: &str,
    ) -> Result<T, IngestError> {
        let deserializer = &mut serde_json::Deserializer::from_str(body);
        serde_path_to_error::deserialize(deserializer).map_err(|err| IngestError::Decode {
            service,
            path: err.path().to_string(),
            message: err.inner().to_string(),
        })
    }
}
