//! Tracking for background refresh runs.
//!
//! A refresh run is a data-ingest pass started over HTTP or by the periodic
//! loop. The tracker keeps per-run status and timestamped logs in memory so
//! callers can poll or stream progress.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// A single log entry with timestamp and message.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LogEntry {
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Run status enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

/// Run metadata and logs.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RefreshRun {
    pub run_id: String,
    pub status: RunStatus,
    pub logs: Vec<LogEntry>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    /// Result of the run (e.g. inserted point count) when completed.
    pub result: Option<serde_json::Value>,
}

/// In-memory refresh-run tracker.
#[derive(Clone)]
pub struct RunTracker {
    runs: Arc<RwLock<HashMap<String, RefreshRun>>>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self {
            runs: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a new run and return its ID.
    pub fn create_run(&self) -> String {
        let run_id = Uuid::new_v4().to_string();
        let run = RefreshRun {
            run_id: run_id.clone(),
            status: RunStatus::Running,
            logs: vec![],
            created_at: chrono::Utc::now(),
            completed_at: None,
            result: None,
        };
        self.runs.write().insert(run_id.clone(), run);
        run_id
    }

    /// Add a log entry to a run.
    pub fn log(&self, run_id: &str, level: LogLevel, message: impl Into<String>) {
        let mut runs = self.runs.write();
        if let Some(run) = runs.get_mut(run_id) {
            run.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level,
                message: message.into(),
            });
        }
    }

    /// Mark a run as completed with an optional result payload.
    pub fn complete_run(&self, run_id: &str, result: Option<serde_json::Value>) {
        let mut runs = self.runs.write();
        if let Some(run) = runs.get_mut(run_id) {
            run.status = RunStatus::Completed;
            run.completed_at = Some(chrono::Utc::now());
            run.result = result;
        }
    }

    /// Mark a run as failed, recording the error as a final log entry.
    pub fn fail_run(&self, run_id: &str, error_message: impl Into<String>) {
        let mut runs = self.runs.write();
        if let Some(run) = runs.get_mut(run_id) {
            run.status = RunStatus::Failed;
            run.completed_at = Some(chrono::Utc::now());
            run.logs.push(LogEntry {
                timestamp: chrono::Utc::now(),
                level: LogLevel::Error,
                message: error_message.into(),
            });
        }
    }

    pub fn get_run(&self, run_id: &str) -> Option<RefreshRun> {
        self.runs.read().get(run_id).cloned()
    }

    pub fn get_logs(&self, run_id: &str) -> Vec<LogEntry> {
        self.runs
            .read()
            .get(run_id)
            .map(|run| run.logs.clone())
            .unwrap_or_default()
    }
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new()
    }
}
