//! USAJOBS search client.
//!
//! Pulls recent federal postings per job category, assembles the free-text
//! blob the keyword matcher runs over, and exposes a per-sector category
//! map. Federal postings are a proxy for the broader market, so some
//! sectors (`retail` especially) return thin samples.

use serde::Deserialize;

use crate::services::PostingItem;

use super::IngestError;

const USAJOBS_BASE: &str = "https://data.usajobs.gov";
const USAJOBS_HOST: &str = "data.usajobs.gov";

/// USAJOBS JobCategoryCode values per sector key. Approximate mappings;
/// `total` uses the catch-all category.
pub const SECTOR_CATEGORY_CODES: [(&str, &[&str]); 7] = [
    ("total", &["0000"]),
    ("information", &["2200"]),
    ("healthcare", &["0600"]),
    ("professional", &["0300", "0500", "0900", "1100"]),
    ("manufacturing", &["0800", "1600", "1700"]),
    ("government", &["0000"]),
    ("retail", &["0300"]),
];

/// Category codes for one sector key, if it is mapped.
pub fn category_codes_for_sector(sector_key: &str) -> Option<&'static [&'static str]> {
    SECTOR_CATEGORY_CODES
        .iter()
        .find(|(key, _)| *key == sector_key)
        .map(|(_, codes)| *codes)
}

/// Search paging knobs, clamped on use: pages to 1..=10, page size to
/// 25..=500.
#[derive(Debug, Clone, Copy)]
pub struct SearchOptions {
    pub page_limit: u32,
    pub results_per_page: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page_limit: 2,
            results_per_page: 250,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "SearchResult")]
    search_result: Option<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(rename = "SearchResultItems", default)]
    items: Vec<SearchResultItem>,
}

#[derive(Debug, Deserialize)]
struct SearchResultItem {
    #[serde(rename = "MatchedObjectDescriptor")]
    descriptor: Option<MatchedObjectDescriptor>,
}

#[derive(Debug, Deserialize)]
struct MatchedObjectDescriptor {
    #[serde(rename = "PositionTitle")]
    position_title: Option<String>,
    #[serde(rename = "OrganizationName")]
    organization_name: Option<String>,
    #[serde(rename = "DepartmentName")]
    department_name: Option<String>,
    #[serde(rename = "PositionURI")]
    position_uri: Option<String>,
    #[serde(rename = "QualificationSummary")]
    qualification_summary: Option<String>,
    #[serde(rename = "UserArea")]
    user_area: Option<UserArea>,
}

#[derive(Debug, Deserialize)]
struct UserArea {
    #[serde(rename = "Details")]
    details: Option<PostingDetails>,
}

#[derive(Debug, Deserialize)]
struct PostingDetails {
    #[serde(rename = "MajorDuties")]
    major_duties: Option<String>,
    #[serde(rename = "MajorDutiesList")]
    major_duties_list: Option<Vec<String>>,
    #[serde(rename = "Requirements")]
    requirements: Option<String>,
    #[serde(rename = "RequirementsSummary")]
    requirements_summary: Option<String>,
    #[serde(rename = "KeyRequirements")]
    key_requirements: Option<String>,
}

impl MatchedObjectDescriptor {
    /// Title plus every qualification/duty field, newline-joined, for the
    /// keyword matcher.
    fn match_text(&self) -> String {
        let mut pieces: Vec<&str> = Vec::new();
        if let Some(title) = &self.position_title {
            pieces.push(title);
        }
        if let Some(summary) = &self.qualification_summary {
            pieces.push(summary);
        }
        let joined_duties;
        if let Some(details) = self.user_area.as_ref().and_then(|u| u.details.as_ref()) {
            if let Some(duties) = &details.major_duties {
                pieces.push(duties);
            }
            if let Some(list) = &details.major_duties_list {
                joined_duties = list.join(" ");
                pieces.push(&joined_duties);
            }
            if let Some(req) = &details.requirements {
                pieces.push(req);
            }
            if let Some(summary) = &details.requirements_summary {
                pieces.push(summary);
            }
            if let Some(key) = &details.key_requirements {
                pieces.push(key);
            }
        }
        pieces.join("\n")
    }

    fn into_posting(self) -> PostingItem {
        let match_text = self.match_text();
        PostingItem {
            title: self.position_title,
            agency: self.organization_name,
            department: self.department_name,
            url: self.position_uri,
            match_text,
        }
    }
}

/// HTTP client for the USAJOBS search API.
pub struct UsaJobsClient {
    http: reqwest::Client,
    auth_key: String,
    user_agent: String,
    base_url: String,
}

impl UsaJobsClient {
    pub fn new(
        http: reqwest::Client,
        auth_key: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            http,
            auth_key: auth_key.into(),
            user_agent: user_agent.into(),
            base_url: USAJOBS_BASE.to_string(),
        }
    }

    /// Point the client at a fake endpoint. Test use.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch postings for a set of category codes within the last `days`
    /// days. Pages sequentially per category and stops early on an empty
    /// page.
    pub async fn search_postings(
        &self,
        category_codes: &[&str],
        days: u32,
        options: SearchOptions,
    ) -> Result<Vec<PostingItem>, IngestError> {
        let page_limit = options.page_limit.clamp(1, 10);
        let results_per_page = options.results_per_page.clamp(25, 500);

        let mut postings = Vec::new();
        for code in category_codes {
            for page in 1..=page_limit {
                let items = self
                    .fetch_page(code, days, results_per_page, page)
                    .await?;
                if items.is_empty() {
                    break;
                }
                postings.extend(
                    items
                        .into_iter()
                        .filter_map(|item| item.descriptor)
                        .map(MatchedObjectDescriptor::into_posting),
                );
            }
        }
        Ok(postings)
    }

    async fn fetch_page(
        &self,
        category_code: &str,
        days: u32,
        results_per_page: u32,
        page: u32,
    ) -> Result<Vec<SearchResultItem>, IngestError> {
        let response = self
            .http
            .get(format!("{}/api/search", self.base_url))
            .query(&[
                ("JobCategoryCode", category_code),
                ("DatePosted", &days.to_string()),
                ("ResultsPerPage", &results_per_page.to_string()),
                ("Page", &page.to_string()),
                ("Fields", "Full"),
            ])
            .header("Host", USAJOBS_HOST)
            .header("User-Agent", &self.user_agent)
            .header("Authorization-Key", &self.auth_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| IngestError::http("USAJOBS", e))?;

        if !response.status().is_success() {
            return Err(IngestError::status("USAJOBS", response.status()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| IngestError::http("USAJOBS", e))?;
        let parsed: SearchResponse = IngestError::decode_json("USAJOBS", &body)?;
        Ok(parsed.search_result.map(|r| r.items).unwrap_or_default())
    }
}

#[cfg(test)]
#[path = "usajobs_tests.rs"]
mod tests;
