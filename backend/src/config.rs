//! Ingest and server configuration.
//!
//! Configuration is read from a TOML file (path via `LMI_CONFIG`, default
//! `lmi.toml` beside the binary) with environment variables taking
//! precedence for credentials. A missing file yields defaults; a malformed
//! file is a hard configuration error.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the ingest clients and refresh loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// BLS registration key. Optional: the v2 endpoint is used when
    /// present, the public v1 endpoint otherwise.
    pub bls_api_key: Option<String>,
    /// USAJOBS API credentials. Both must be set for posting ingest.
    pub usajobs_auth_key: Option<String>,
    pub usajobs_user_agent: Option<String>,
    /// Posting look-back window in days for snapshots and live queries.
    pub posting_lookback_days: u32,
    /// Interval between background series refreshes, in hours. 0 disables
    /// the periodic loop.
    pub refresh_interval_hours: u64,
    /// Live pressure response cache TTL, in hours.
    pub cache_ttl_hours: u64,
    /// Snapshots older than this many days are deleted during cleanup.
    pub snapshot_retention_days: u32,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            bls_api_key: None,
            usajobs_auth_key: None,
            usajobs_user_agent: None,
            posting_lookback_days: 14,
            refresh_interval_hours: 24,
            cache_ttl_hours: 6,
            snapshot_retention_days: 90,
        }
    }
}

impl IngestConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("failed to read config file {}", path.as_ref().display())
        })?;
        let config: IngestConfig = toml::from_str(&content).with_context(|| {
            format!("failed to parse config file {}", path.as_ref().display())
        })?;
        Ok(config)
    }

    /// Load configuration the way the server binary does: the `LMI_CONFIG`
    /// file if set, else `lmi.toml` if present, else defaults; then apply
    /// credential overrides from the environment.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("LMI_CONFIG") {
            // an explicitly named file must exist and parse
            Ok(path) => Self::from_file(path)?,
            Err(_) => {
                let default_path = Path::new("lmi.toml");
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    IngestConfig::default()
                }
            }
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Environment variables win over file values for credentials.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("BLS_API_KEY") {
            if !key.is_empty() {
                self.bls_api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var("USAJOBS_AUTH_KEY") {
            if !key.is_empty() {
                self.usajobs_auth_key = Some(key);
            }
        }
        if let Ok(agent) = std::env::var("USAJOBS_USER_AGENT") {
            if !agent.is_empty() {
                self.usajobs_user_agent = Some(agent);
            }
        }
    }

    /// Both USAJOBS credentials present.
    pub fn usajobs_credentials(&self) -> Option<(&str, &str)> {
        match (&self.usajobs_auth_key, &self.usajobs_user_agent) {
            (Some(key), Some(agent)) if !key.is_empty() && !agent.is_empty() => {
                Some((key.as_str(), agent.as_str()))
            }
            _ => None,
        }
    }

    /// Whether the periodic refresh loop should run.
    pub fn refresh_loop_enabled(&self) -> bool {
        self.refresh_interval_hours > 0
    }
}
