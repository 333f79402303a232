//! Turns one block of free text into a [`TextAnalysis`].

use crate::analysis::entities::extract_entities;
use crate::analysis::lexicon::{is_technical_term, NEGATOR_SET, SENTIMENT_LEXICON, TOPICS};
use crate::analysis::tfidf::TfIdf;
use crate::analysis::tokenizer::{lower_words, sentences, words};
use crate::types::{AnalysisPair, TextAnalysis};
use std::collections::HashSet;
use tracing::debug;

/// Default cap on keywords per analysis
pub const DEFAULT_KEYWORD_LIMIT: usize = 10;

/// TF-IDF terms must be longer than this many characters
const MIN_TERM_CHARS: usize = 3;

/// Words longer than this count as "long" for complexity
const LONG_WORD_CHARS: usize = 8;

/// Stateless text analyzer
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    keyword_limit: usize,
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_KEYWORD_LIMIT)
    }
}

impl TextAnalyzer {
    pub fn new(keyword_limit: usize) -> Self {
        Self { keyword_limit }
    }

    /// Analyze a single text; TF-IDF runs over a one-document corpus
    pub fn analyze(&self, text: &str) -> TextAnalysis {
        let index = TfIdf::from_documents(&[text]);
        self.analyze_indexed(text, &index, 0)
    }

    /// Analyze request and knowledge base against a shared two-document
    /// corpus, so terms both sides use weigh less as keywords
    pub fn analyze_pair(&self, request: &str, knowledge_base: &str) -> AnalysisPair {
        let index = TfIdf::from_documents(&[request, knowledge_base]);
        AnalysisPair {
            request: self.analyze_indexed(request, &index, 0),
            knowledge_base: self.analyze_indexed(knowledge_base, &index, 1),
        }
    }

    fn analyze_indexed(&self, text: &str, index: &TfIdf, doc: usize) -> TextAnalysis {
        if text.trim().is_empty() {
            return TextAnalysis::default();
        }

        let tokens = lower_words(text);
        let entities = extract_entities(text);
        let technical_terms = technical_terms(&tokens);

        let analysis = TextAnalysis {
            keywords: self.keywords(index, doc, &entities, &technical_terms),
            concepts: concepts(&tokens),
            sentiment: sentiment(&tokens),
            complexity: complexity(text),
            entities,
            technical_terms,
        };

        debug!(
            "Analyzed {} chars: {} keywords, {} entities, {} concepts, {} technical terms, complexity {:.3}",
            text.len(),
            analysis.keywords.len(),
            analysis.entities.len(),
            analysis.concepts.len(),
            analysis.technical_terms.len(),
            analysis.complexity
        );

        analysis
    }

    /// Top TF-IDF terms, then lower-cased entities, then dictionary hits;
    /// deduplicated and capped at the keyword limit
    fn keywords(
        &self,
        index: &TfIdf,
        doc: usize,
        entities: &[String],
        technical_terms: &[String],
    ) -> Vec<String> {
        let ranked = index
            .ranked_terms(doc)
            .into_iter()
            .map(|(term, _)| term)
            .filter(|term| term.chars().count() > MIN_TERM_CHARS)
            .take(self.keyword_limit);

        let mut seen = HashSet::new();
        ranked
            .chain(entities.iter().map(|e| e.to_lowercase()))
            .chain(technical_terms.iter().cloned())
            .filter(|k| seen.insert(k.clone()))
            .take(self.keyword_limit)
            .collect()
    }
}

/// Dictionary hits in token order, duplicates kept
pub fn technical_terms(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| is_technical_term(t))
        .cloned()
        .collect()
}

/// Topic tags whose triggers appear, most hits first
pub fn concepts(tokens: &[String]) -> Vec<String> {
    let mut hits: Vec<(&str, usize)> = TOPICS
        .iter()
        .filter_map(|(topic, triggers)| {
            let count = tokens
                .iter()
                .filter(|t| triggers.contains(&t.as_str()))
                .count();
            (count > 0).then_some((*topic, count))
        })
        .collect();

    // stable: equal counts keep lexicon order
    hits.sort_by(|a, b| b.1.cmp(&a.1));
    hits.into_iter().map(|(topic, _)| topic.to_string()).collect()
}

/// Average lexicon polarity per token; a negator flips the next hit
pub fn sentiment(tokens: &[String]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }

    let mut total = 0i32;
    let mut negate = false;
    for token in tokens {
        if NEGATOR_SET.contains(token.as_str()) {
            negate = true;
            continue;
        }
        if let Some(&score) = SENTIMENT_LEXICON.get(token.as_str()) {
            total += if negate { -score } else { score };
            negate = false;
        }
    }

    total as f64 / tokens.len() as f64
}

/// `0.5 * words per sentence + 0.5 * share of long words`, capped at 1.0
pub fn complexity(text: &str) -> f64 {
    let sentence_count = sentences(text).len();
    let words = words(text);
    if sentence_count == 0 || words.is_empty() {
        return 0.0;
    }

    let avg_words_per_sentence = words.len() as f64 / sentence_count as f64;
    let long_words = words
        .iter()
        .filter(|w| w.chars().count() > LONG_WORD_CHARS)
        .count();
    let long_word_share = long_words as f64 / words.len() as f64;

    (0.5 * avg_words_per_sentence + 0.5 * long_word_share).min(1.0)
}
