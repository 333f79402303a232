//! Per-call TF-IDF weighting.
//!
//! A [`TfIdf`] is built from the handful of documents compared in one scoring
//! call and dropped with it. Nothing accumulates between calls.
//!
//! Weight of term `t` in document `d`:
//! `tf(t, d) * (1 + ln(N / (1 + df(t))))`

use crate::analysis::lexicon::is_stop_word;
use crate::analysis::tokenizer::lower_words;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct TfIdf {
    documents: Vec<HashMap<String, usize>>,
}

impl TfIdf {
    /// Index every document; stop words are skipped
    pub fn from_documents<S: AsRef<str>>(documents: &[S]) -> Self {
        let documents = documents
            .iter()
            .map(|doc| {
                let mut counts = HashMap::new();
                for token in lower_words(doc.as_ref()) {
                    if !is_stop_word(&token) {
                        *counts.entry(token).or_insert(0) += 1;
                    }
                }
                counts
            })
            .collect();

        Self { documents }
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    fn document_frequency(&self, term: &str) -> usize {
        self.documents
            .iter()
            .filter(|doc| doc.contains_key(term))
            .count()
    }

    fn idf(&self, term: &str) -> f64 {
        let n = self.documents.len() as f64;
        let df = self.document_frequency(term) as f64;
        1.0 + (n / (1.0 + df)).ln()
    }

    /// Weight of `term` in document `doc`; 0 for unknown terms or documents
    pub fn weight(&self, term: &str, doc: usize) -> f64 {
        match self.documents.get(doc).and_then(|d| d.get(term)) {
            Some(&tf) => tf as f64 * self.idf(term),
            None => 0.0,
        }
    }

    /// Terms of document `doc` by weight, highest first, ties alphabetical
    pub fn ranked_terms(&self, doc: usize) -> Vec<(String, f64)> {
        let Some(counts) = self.documents.get(doc) else {
            return Vec::new();
        };

        let mut ranked: Vec<(String, f64)> = counts
            .iter()
            .map(|(term, &tf)| (term.clone(), tf as f64 * self.idf(term)))
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}
