//! Core data types for the relevance scoring engine
//!
//! Knowledge-base shapes are built by the caller for every scoring call and
//! are never mutated here. Analyses and score breakdowns are derived inside a
//! single call and dropped when it returns.

use crate::utils::string::take_chars;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier attached to one scoring run for log correlation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One atomic fact, pre-joined by the caller as `"Q: ...\nA: ..."`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBaseEntry {
    pub content: String,
}

impl KnowledgeBaseEntry {
    /// Join a question/answer pair the way callers store entries
    pub fn from_qa(question: &str, answer: &str) -> Self {
        Self {
            content: format!("Q: {}\nA: {}", question, answer),
        }
    }
}

/// Coalesced narrative view over all entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeBaseSummary {
    pub content: String,
}

/// Everything the recipient knows and cares about
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedKnowledgeBase {
    #[serde(default)]
    pub entries: Vec<KnowledgeBaseEntry>,
    #[serde(default)]
    pub coalesced_summary: Option<KnowledgeBaseSummary>,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub use_case: String,
    #[serde(default)]
    pub main_goals: Vec<String>,
}

impl FormattedKnowledgeBase {
    /// Text the analyzer should run on.
    ///
    /// The coalesced summary wins when it has content. Otherwise the raw
    /// entries are joined by newlines and cut to `char_limit` characters.
    pub fn analysis_text(&self, char_limit: usize) -> String {
        if let Some(summary) = &self.coalesced_summary {
            if !summary.content.trim().is_empty() {
                return summary.content.clone();
            }
        }

        let joined = self
            .entries
            .iter()
            .map(|e| e.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        take_chars(&joined, char_limit)
    }
}

/// Features extracted from one block of text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    pub keywords: Vec<String>,
    pub entities: Vec<String>,
    pub concepts: Vec<String>,
    /// Dictionary hits in text order, duplicates kept
    pub technical_terms: Vec<String>,
    pub sentiment: f64,
    /// [0.0, 1.0]
    pub complexity: f64,
}

/// Request and knowledge-base analyses from one scoring call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPair {
    pub request: TextAnalysis,
    pub knowledge_base: TextAnalysis,
}

/// Four-factor breakdown returned by the model.
///
/// Only constructed through [`crate::evaluation::schema::validate_detailed_score`],
/// which guarantees every factor is finite and in [0.0, 1.0] and that the
/// explanation is non-blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedScore {
    pub content_alignment: f64,
    pub technical_level_match: f64,
    pub domain_relevance: f64,
    pub contextual_fit: f64,
    pub explanation: String,
}

impl DetailedScore {
    /// Factor values in aggregation order
    pub fn factors(&self) -> [f64; 4] {
        [
            self.content_alignment,
            self.technical_level_match,
            self.domain_relevance,
            self.contextual_fit,
        ]
    }
}
