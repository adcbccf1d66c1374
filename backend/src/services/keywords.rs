//! AI-keyword detection over free-text job postings.
//!
//! The dictionary is a fixed list of high-precision phrases; the bare token
//! "ai" is deliberately excluded to keep the false-positive rate down.
//! Matching happens on a normalized form of the text so punctuation-adjacent
//! phrases ("machine learning,") and hyphenated entries ("fine-tuning") match
//! cleanly.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Canonical dictionary phrases, lowercase. Matching de-hyphenates both the
/// phrase and the input, so hyphen/space variants are kept as separate
/// entries on purpose (they count separately in keyword rankings).
pub const AI_KEYWORDS: [&str; 37] = [
    "artificial intelligence",
    "machine learning",
    "deep learning",
    "generative ai",
    "genai",
    "large language model",
    "large-language model",
    "llm",
    "llmops",
    "ai/ml",
    "ai-ml",
    "prompt engineering",
    "prompt engineer",
    "retrieval augmented generation",
    "retrieval-augmented generation",
    "rag",
    "vector database",
    "embedding",
    "fine-tuning",
    "finetuning",
    "model evaluation",
    "evals",
    "transformer model",
    "transformers",
    "natural language processing",
    "nlp",
    "computer vision",
    "pytorch",
    "tensorflow",
    "openai",
    "chatgpt",
    "gpt-4",
    "gpt-3.5",
    "copilot",
    "github copilot",
    "claude",
    "gemini",
];

/// One dictionary hit in a text blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiMatch {
    /// Canonical dictionary phrase that matched.
    pub keyword: &'static str,
    /// Byte offset of the match in the normalized text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
}

/// Lowercase and collapse every run of non-alphanumeric characters to a
/// single space, trimming the ends. Turns "fine-tuning." into "fine tuning".
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(ch.to_ascii_lowercase());
        } else {
            pending_space = true;
        }
    }
    out
}

// Word-boundary patterns, precompiled once. Each phrase must be preceded by
// start-or-whitespace and followed by whitespace-or-end on the normalized
// text, so "rag" never matches inside "storage".
static KEYWORD_REGEXES: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    AI_KEYWORDS
        .iter()
        .map(|&keyword| {
            let normalized = normalize(keyword);
            let pattern = format!(r"(^|\s){}(\s|$)", regex::escape(&normalized));
            // escaped literal over a fixed dictionary; cannot fail to compile
            let regex = Regex::new(&pattern).expect("static keyword pattern");
            (keyword, regex)
        })
        .collect()
});

/// Find dictionary phrases in `text`, one match per keyword at most.
///
/// Results are in dictionary-definition order filtered to hits, not
/// position-in-text order. Empty or punctuation-only input yields an empty
/// list; nothing here ever fails.
pub fn find_ai_matches(text: &str) -> Vec<AiMatch> {
    let normalized = normalize(text);
    if normalized.is_empty() {
        return Vec::new();
    }

    KEYWORD_REGEXES
        .iter()
        .filter_map(|(keyword, regex)| {
            regex.find(&normalized).map(|m| AiMatch {
                keyword,
                index: Some(m.start()),
            })
        })
        .collect()
}

/// True when `text` contains at least one dictionary phrase.
pub fn has_ai_matches(text: &str) -> bool {
    !find_ai_matches(text).is_empty()
}

/// Keyword strings only, same order and dedup rules as [`find_ai_matches`].
pub fn find_ai_keywords(text: &str) -> Vec<&'static str> {
    find_ai_matches(text).into_iter().map(|m| m.keyword).collect()
}

#[cfg(test)]
#[path = "keywords_tests.rs"]
mod keywords_tests;
