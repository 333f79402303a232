//! Similarity features computed before the model is consulted.
//!
//! Two pre-scores come out of a pair of analyses:
//! - **Content alignment**: `0.4 * keywords + 0.4 * concepts + 0.2 * entities`
//! - **Technical match**: `0.6 * technical terms + 0.4 * (1 - |complexity gap|)`
//!
//! Each sub-similarity is Jaccard overlap of lower-cased token sets. Both
//! pre-scores are embedded in the scoring prompt as calibration hints.

use crate::analysis::tokenizer::lower_words;
use crate::types::{AnalysisPair, TextAnalysis};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

const KEYWORD_WEIGHT: f64 = 0.4;
const CONCEPT_WEIGHT: f64 = 0.4;
const ENTITY_WEIGHT: f64 = 0.2;

const TECHNICAL_TERM_WEIGHT: f64 = 0.6;
const COMPLEXITY_WEIGHT: f64 = 0.4;

/// Pre-calculated metrics for one request / knowledge-base pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreScores {
    pub content_alignment: f64,
    pub technical_match: f64,
}

impl PreScores {
    pub fn from_analyses(pair: &AnalysisPair) -> Self {
        let scores = Self {
            content_alignment: content_alignment(&pair.request, &pair.knowledge_base),
            technical_match: technical_match(&pair.request, &pair.knowledge_base),
        };

        debug!(
            "Pre-scores: content alignment {:.3}, technical match {:.3}",
            scores.content_alignment, scores.technical_match
        );

        scores
    }
}

/// Jaccard similarity of the lower-cased token sets of `a` and `b`.
///
/// Two empty sets carry no signal and score 0.
pub fn set_similarity(a: &str, b: &str) -> f64 {
    let a_set: HashSet<String> = lower_words(a).into_iter().collect();
    let b_set: HashSet<String> = lower_words(b).into_iter().collect();

    let union = a_set.union(&b_set).count();
    if union == 0 {
        return 0.0;
    }

    let intersection = a_set.intersection(&b_set).count();
    intersection as f64 / union as f64
}

fn joined_similarity(a: &[String], b: &[String]) -> f64 {
    set_similarity(&a.join(" "), &b.join(" "))
}

pub fn content_alignment(a: &TextAnalysis, b: &TextAnalysis) -> f64 {
    KEYWORD_WEIGHT * joined_similarity(&a.keywords, &b.keywords)
        + CONCEPT_WEIGHT * joined_similarity(&a.concepts, &b.concepts)
        + ENTITY_WEIGHT * joined_similarity(&a.entities, &b.entities)
}

pub fn technical_match(a: &TextAnalysis, b: &TextAnalysis) -> f64 {
    let term_similarity = joined_similarity(&a.technical_terms, &b.technical_terms);
    let complexity_closeness = 1.0 - (a.complexity - b.complexity).abs();

    TECHNICAL_TERM_WEIGHT * term_similarity + COMPLEXITY_WEIGHT * complexity_closeness
}
