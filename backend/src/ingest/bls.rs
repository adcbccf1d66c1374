//! Bureau of Labor Statistics time-series client.
//!
//! Fetches JOLTS job-opening counts and CPS rate series over the public
//! timeseries API. The v2 endpoint is used when a registration key is
//! configured; v1 is public but limited to ten years per request.

use serde::{Deserialize, Serialize};

use crate::models::{Month, Sector, SectorRecord};

use super::IngestError;

const BLS_V1_URL: &str = "https://api.bls.gov/publicAPI/v1/timeseries/data/";
const BLS_V2_URL: &str = "https://api.bls.gov/publicAPI/v2/timeseries/data/";

/// Historical backfill starts here.
pub const BACKFILL_START_YEAR: i32 = 2015;

/// A tracked BLS series and the sector key its observations land under.
#[derive(Debug, Clone, Copy)]
pub struct SeriesCatalogEntry {
    pub sector_key: &'static str,
    pub series_id: &'static str,
}

/// Every series the store tracks: JOLTS openings per industry, the two
/// headline CPS rates, and per-industry CPS unemployment rates.
pub const SERIES_CATALOG: [SeriesCatalogEntry; 15] = [
    SeriesCatalogEntry { sector_key: "total", series_id: "JTS000000000000000JOL" },
    SeriesCatalogEntry { sector_key: "manufacturing", series_id: "JTS300000000000000JOL" },
    SeriesCatalogEntry { sector_key: "healthcare", series_id: "JTS620000000000000JOL" },
    SeriesCatalogEntry { sector_key: "retail", series_id: "JTS440000000000000JOL" },
    SeriesCatalogEntry { sector_key: "professional", series_id: "JTS540000000000000JOL" },
    SeriesCatalogEntry { sector_key: "information", series_id: "JTS510000000000000JOL" },
    SeriesCatalogEntry { sector_key: "government", series_id: "JTS900000000000000JOL" },
    SeriesCatalogEntry { sector_key: "unemployment_rate", series_id: "LNS14000000" },
    SeriesCatalogEntry { sector_key: "participation_rate", series_id: "LNS11300000" },
    SeriesCatalogEntry { sector_key: "unemployment_manufacturing", series_id: "LNU04032300" },
    SeriesCatalogEntry { sector_key: "unemployment_healthcare", series_id: "LNU04032622" },
    SeriesCatalogEntry { sector_key: "unemployment_retail", series_id: "LNU04032400" },
    SeriesCatalogEntry { sector_key: "unemployment_professional", series_id: "LNU04032540" },
    SeriesCatalogEntry { sector_key: "unemployment_information", series_id: "LNU04032500" },
    SeriesCatalogEntry { sector_key: "unemployment_government", series_id: "LNU04032900" },
];

fn sector_for_series(series_id: &str) -> Option<Sector> {
    SERIES_CATALOG
        .iter()
        .find(|entry| entry.series_id == series_id)
        .map(|entry| Sector::from_key(entry.sector_key))
}

#[derive(Debug, Serialize)]
struct BlsRequest<'a> {
    seriesid: Vec<&'static str>,
    startyear: String,
    endyear: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    registrationkey: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct BlsResponse {
    pub status: String,
    #[serde(default)]
    pub message: Vec<String>,
    #[serde(rename = "Results")]
    pub results: Option<BlsResults>,
}

#[derive(Debug, Deserialize)]
pub struct BlsResults {
    #[serde(default)]
    pub series: Vec<BlsSeries>,
}

#[derive(Debug, Deserialize)]
pub struct BlsSeries {
    #[serde(rename = "seriesID")]
    pub series_id: String,
    #[serde(default)]
    pub data: Vec<BlsObservation>,
}

/// One raw observation. `period` is `M01`..`M12` for months, `M13` for
/// the annual average.
#[derive(Debug, Deserialize)]
pub struct BlsObservation {
    pub year: String,
    pub period: String,
    pub value: String,
}

/// HTTP client for the BLS timeseries endpoints.
pub struct BlsClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: Option<String>,
}

impl BlsClient {
    pub fn new(http: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            http,
            api_key,
            base_url: None,
        }
    }

    /// Point the client at a fake endpoint. Test use.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn endpoint(&self) -> &str {
        if let Some(url) = &self.base_url {
            return url;
        }
        if self.api_key.is_some() {
            BLS_V2_URL
        } else {
            BLS_V1_URL
        }
    }

    /// Years coverable by a single request on the active endpoint.
    fn max_years_per_request(&self) -> i32 {
        if self.api_key.is_some() {
            20
        } else {
            10
        }
    }

    /// Fetch the full catalog over one year window and flatten to records.
    pub async fn fetch_window(
        &self,
        start_year: i32,
        end_year: i32,
    ) -> Result<Vec<SectorRecord>, IngestError> {
        let request = BlsRequest {
            seriesid: SERIES_CATALOG.iter().map(|e| e.series_id).collect(),
            startyear: start_year.to_string(),
            endyear: end_year.to_string(),
            registrationkey: self.api_key.as_deref(),
        };

        let response = self
            .http
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| IngestError::http("BLS", e))?;

        if !response.status().is_success() {
            return Err(IngestError::status("BLS", response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| IngestError::http("BLS", e))?;
        let parsed: BlsResponse = IngestError::decode_json("BLS", &body)?;

        if parsed.status != "REQUEST_SUCCEEDED" {
            log::warn!(
                "BLS request reported status {}: {:?}",
                parsed.status,
                parsed.message
            );
            return Err(IngestError::Decode {
                service: "BLS",
                path: "status".to_string(),
                message: format!("request status {}", parsed.status),
            });
        }

        Ok(transform_response(parsed))
    }

    /// Fetch the latest window: the previous and current calendar years.
    pub async fn fetch_latest(&self, current_year: i32) -> Result<Vec<SectorRecord>, IngestError> {
        self.fetch_window(current_year - 1, current_year).await
    }

    /// Backfill from [`BACKFILL_START_YEAR`] through `current_year`,
    /// chunked to the endpoint's per-request year limit.
    pub async fn fetch_historical(
        &self,
        current_year: i32,
    ) -> Result<Vec<SectorRecord>, IngestError> {
        let chunk = self.max_years_per_request();
        let mut all = Vec::new();
        let mut year = BACKFILL_START_YEAR;
        while year <= current_year {
            let end = (year + chunk - 1).min(current_year);
            log::info!("fetching BLS series for {year}-{end}");
            all.extend(self.fetch_window(year, end).await?);
            year += chunk;
        }
        Ok(all)
    }
}

/// Flatten a BLS envelope into monthly records. Annual averages (`M13`)
/// and non-numeric values are skipped; unknown series IDs are ignored.
pub fn transform_response(response: BlsResponse) -> Vec<SectorRecord> {
    let mut records = Vec::new();
    let Some(results) = response.results else {
        return records;
    };

    for series in results.series {
        let Some(sector) = sector_for_series(&series.series_id) else {
            continue;
        };
        for obs in series.data {
            if !obs.period.starts_with('M') || obs.period == "M13" {
                continue;
            }
            let Ok(month_num) = obs.period[1..].parse::<u32>() else {
                continue;
            };
            let Ok(year) = obs.year.parse::<i32>() else {
                continue;
            };
            let Ok(date) = Month::new(year, month_num) else {
                continue;
            };
            let Ok(value) = obs.value.trim().parse::<f64>() else {
                continue;
            };
            records.push(SectorRecord::new(date, sector.clone(), value));
        }
    }

    records
}

#[cfg(test)]
#[path = "bls_tests.rs"]
mod tests;
