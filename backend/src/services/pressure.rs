//! AI-pressure aggregation over job postings.
//!
//! Turns a batch of posting text blobs into a summary signal: how many
//! postings mention AI skills, which keywords dominate, and a handful of
//! example postings. Small samples suppress the share instead of reporting a
//! misleading fraction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::Sector;
use crate::services::keywords::find_ai_keywords;

/// One job posting as handed to the aggregator. Only `match_text` is
/// required; the rest is display metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostingItem {
    pub title: Option<String>,
    pub agency: Option<String>,
    pub department: Option<String>,
    pub url: Option<String>,
    /// Free-text blob assembled from title + summary + duties + requirements.
    pub match_text: String,
}

/// Tuning knobs for [`compute_ai_pressure`].
#[derive(Debug, Clone, Copy)]
pub struct PressureOptions {
    /// Cap on example postings, clamped to 1..=10.
    pub max_examples: usize,
    /// Below this many total postings the share is suppressed; clamped >= 1.
    pub min_sample_for_share: usize,
    /// How many matched keywords each example carries.
    pub keywords_per_example: usize,
}

impl Default for PressureOptions {
    fn default() -> Self {
        Self {
            max_examples: 5,
            min_sample_for_share: 20,
            keywords_per_example: 6,
        }
    }
}

impl PressureOptions {
    /// Caps used by the daily snapshot job: 5 examples, 3 keywords each.
    pub fn daily_snapshot() -> Self {
        Self {
            max_examples: 5,
            min_sample_for_share: 20,
            keywords_per_example: 3,
        }
    }

    /// Caps used by the live pressure endpoint: 3 examples, 6 keywords each.
    pub fn live() -> Self {
        Self {
            max_examples: 3,
            min_sample_for_share: 20,
            keywords_per_example: 6,
        }
    }
}

/// A keyword and how many matched postings mentioned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Example posting shown alongside the aggregate numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PressureExample {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub matched_keywords: Vec<String>,
    /// Source sector, set only by the cross-sector rollup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<Sector>,
}

/// Aggregate AI-pressure signal for one batch of postings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiPressureResult {
    /// Number of postings sampled, matched or not.
    pub total: usize,
    /// Postings with at least one dictionary hit.
    pub ai_count: usize,
    /// `ai_count / total`, or `None` below the minimum sample size.
    pub ai_share: Option<f64>,
    /// Top keywords by match count, descending, at most 8.
    pub top_keywords: Vec<KeywordCount>,
    pub examples: Vec<PressureExample>,
    /// Present when the sample was too small for a meaningful share.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl AiPressureResult {
    pub fn empty() -> Self {
        Self {
            total: 0,
            ai_count: 0,
            ai_share: None,
            top_keywords: Vec::new(),
            examples: Vec::new(),
            note: None,
        }
    }
}

const TOP_KEYWORDS_CAP: usize = 8;

/// Score a batch of postings for AI-skill mentions.
///
/// A posting counts toward `ai_count` iff its text has at least one
/// dictionary hit. Every hit on every matched posting increments its
/// keyword's counter. Examples are the first matched postings that carry a
/// non-empty title; titleless postings never occupy an example slot.
pub fn compute_ai_pressure(items: &[PostingItem], options: PressureOptions) -> AiPressureResult {
    let max_examples = options.max_examples.clamp(1, 10);
    let min_sample_for_share = options.min_sample_for_share.max(1);

    // Vec keyed by first-seen order keeps ranking ties deterministic; the
    // dictionary is small so linear lookup is fine.
    let mut keyword_counts: Vec<(String, usize)> = Vec::new();
    let mut examples: Vec<PressureExample> = Vec::new();
    let mut ai_count = 0usize;

    for item in items {
        let matched = find_ai_keywords(&item.match_text);
        if matched.is_empty() {
            continue;
        }

        ai_count += 1;
        for keyword in &matched {
            match keyword_counts.iter_mut().find(|(k, _)| k == keyword) {
                Some((_, count)) => *count += 1,
                None => keyword_counts.push((keyword.to_string(), 1)),
            }
        }

        if examples.len() < max_examples {
            if let Some(title) = item.title.as_deref().filter(|t| !t.is_empty()) {
                examples.push(PressureExample {
                    title: title.to_string(),
                    agency: item.agency.clone(),
                    department: item.department.clone(),
                    url: item.url.clone(),
                    matched_keywords: matched
                        .iter()
                        .take(options.keywords_per_example)
                        .map(|k| k.to_string())
                        .collect(),
                    sector: None,
                });
            }
        }
    }

    let total = items.len();
    let ai_share = (total >= min_sample_for_share).then(|| ai_count as f64 / total as f64);

    AiPressureResult {
        total,
        ai_count,
        ai_share,
        top_keywords: rank_keywords(keyword_counts),
        examples,
        note: (total < min_sample_for_share).then(|| format!("Low sample ({total} postings)")),
    }
}

fn rank_keywords(counts: Vec<(String, usize)>) -> Vec<KeywordCount> {
    let mut ranked: Vec<KeywordCount> = counts
        .into_iter()
        .map(|(keyword, count)| KeywordCount { keyword, count })
        .collect();
    // stable sort keeps first-seen order among equal counts
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_KEYWORDS_CAP);
    ranked
}

const ROLLUP_EXAMPLES_CAP: usize = 5;

/// Merge per-sector pressure results into one view for a sector selection.
///
/// The catch-all `total` bucket is an aggregate of the others, so it is
/// never summed against them: selecting `total` uses only that bucket, and
/// selecting specific sectors ignores it. Exactly one specific sector
/// selected returns that sector's result unchanged.
pub fn aggregate_pressure(
    by_sector: &BTreeMap<String, AiPressureResult>,
    selected: &[Sector],
) -> AiPressureResult {
    if selected.iter().any(|s| *s == Sector::Total) {
        return by_sector
            .get(Sector::Total.key())
            .cloned()
            .unwrap_or_else(AiPressureResult::empty);
    }

    let picked: Vec<(&String, &AiPressureResult)> = by_sector
        .iter()
        .filter(|(key, _)| selected.iter().any(|s| s.key() == key.as_str()))
        .collect();

    if picked.is_empty() {
        return AiPressureResult::empty();
    }
    if picked.len() == 1 && selected.len() == 1 {
        return picked[0].1.clone();
    }

    let mut total = 0usize;
    let mut ai_count = 0usize;
    let mut keyword_counts: Vec<(String, usize)> = Vec::new();
    let mut examples: Vec<PressureExample> = Vec::new();

    for (key, result) in picked {
        total += result.total;
        ai_count += result.ai_count;

        for kc in &result.top_keywords {
            match keyword_counts.iter_mut().find(|(k, _)| k == &kc.keyword) {
                Some((_, count)) => *count += kc.count,
                None => keyword_counts.push((kc.keyword.clone(), kc.count)),
            }
        }

        for example in &result.examples {
            if examples.len() >= ROLLUP_EXAMPLES_CAP {
                break;
            }
            let mut tagged = example.clone();
            tagged.sector = Some(Sector::from_key(key));
            examples.push(tagged);
        }
    }

    let min_sample = PressureOptions::default().min_sample_for_share;
    let ai_share = (total >= min_sample).then(|| ai_count as f64 / total as f64);

    AiPressureResult {
        total,
        ai_count,
        ai_share,
        top_keywords: rank_keywords(keyword_counts),
        examples,
        note: (total < min_sample).then(|| format!("Low sample ({total} postings)")),
    }
}

#[cfg(test)]
#[path = "pressure_tests.rs"]
mod pressure_tests;
