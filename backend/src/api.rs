//! Public API surface for the Rust backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::Month;
pub use crate::models::Sector;
pub use crate::models::SectorRecord;
pub use crate::models::TimePoint;
pub use crate::models::TimeRange;
pub use crate::services::analysis::MarketAnalysis;
pub use crate::services::analysis::RateOverview;
pub use crate::services::analysis::SectorChange;
pub use crate::services::analysis::ValueAtDate;
pub use crate::services::keywords::AiMatch;
pub use crate::services::multi_series::MultiChartView;
pub use crate::services::multi_series::PivotRow;
pub use crate::services::pressure::AiPressureResult;
pub use crate::services::pressure::KeywordCount;
pub use crate::services::pressure::PressureExample;
pub use crate::services::simple_series::SimpleChartView;
pub use crate::services::simple_series::SimplePoint;
pub use crate::services::simple_series::TrendDirection;
pub use crate::services::simple_series::TrendInfo;
pub use crate::services::simple_series::TrendUnit;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Catalog entry for a sector: storage key plus display metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorInfo {
    pub sector: Sector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl From<&Sector> for SectorInfo {
    fn from(sector: &Sector) -> Self {
        Self {
            label: sector.label().map(str::to_string),
            color: sector.color().map(str::to_string),
            sector: sector.clone(),
        }
    }
}

/// One day's stored AI-pressure snapshot for one sector.
///
/// `date` is the run date as "YYYY-MM-DD"; snapshots are upserted by
/// `(sector, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSkillSnapshot {
    pub date: String,
    pub sector: Sector,
    #[serde(flatten)]
    pub pressure: AiPressureResult,
}

/// Condensed per-sector entry in the live pressure payload.
///
/// A failing sector is reported as an empty entry with `error` set; the
/// other sectors still come through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorPressureEntry {
    pub total: usize,
    pub ai_count: usize,
    pub ai_share: Option<f64>,
    pub top_keywords: Vec<KeywordCount>,
    pub examples: Vec<PressureExample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SectorPressureEntry {
    /// Condense a full result: keyword ranking trimmed to the top 2.
    pub fn condensed(result: AiPressureResult) -> Self {
        let mut top_keywords = result.top_keywords;
        top_keywords.truncate(2);
        Self {
            total: result.total,
            ai_count: result.ai_count,
            ai_share: result.ai_share,
            top_keywords,
            examples: result.examples,
            note: result.note,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            total: 0,
            ai_count: 0,
            ai_share: None,
            top_keywords: Vec::new(),
            examples: Vec::new(),
            note: None,
            error: Some(message.into()),
        }
    }
}

/// Live AI-pressure payload across all mapped sectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPressureResponse {
    /// Posting look-back window in days.
    pub days: u32,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub sectors: BTreeMap<String, SectorPressureEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_info_carries_catalog_metadata() {
        let info = SectorInfo::from(&Sector::Total);
        assert_eq!(info.label.as_deref(), Some("TOTAL NONFARM"));
        assert_eq!(info.color.as_deref(), Some("#ef4444"));

        let unknown = SectorInfo::from(&Sector::from_key("mining"));
        assert_eq!(unknown.label, None);
        assert_eq!(unknown.color, None);
    }

    #[test]
    fn test_snapshot_serializes_flattened() {
        let snapshot = AiSkillSnapshot {
            date: "2026-08-29".to_string(),
            sector: Sector::Total,
            pressure: AiPressureResult::empty(),
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["date"], "2026-08-29");
        assert_eq!(json["sector"], "total");
        // pressure fields sit at the top level
        assert_eq!(json["total"], 0);
        assert_eq!(json["aiCount"], 0);
    }

    #[test]
    fn test_condensed_entry_trims_keywords_to_two() {
        let result = AiPressureResult {
            total: 30,
            ai_count: 6,
            ai_share: Some(0.2),
            top_keywords: vec![
                KeywordCount {
                    keyword: "llm".into(),
                    count: 4,
                },
                KeywordCount {
                    keyword: "nlp".into(),
                    count: 3,
                },
                KeywordCount {
                    keyword: "rag".into(),
                    count: 1,
                },
            ],
            examples: Vec::new(),
            note: None,
        };
        let entry = SectorPressureEntry::condensed(result);
        assert_eq!(entry.top_keywords.len(), 2);
        assert_eq!(entry.error, None);
    }
}
