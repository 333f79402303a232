//! Lightweight NLP feature extraction.
//!
//! Everything here is stateless: word lists are static and the TF-IDF index
//! is rebuilt for every call, so concurrent scoring calls never share state.
//!
//! - **tokenizer**: word and sentence splitting
//! - **lexicon**: technical terms, stop words, sentiment and topic lists
//! - **tfidf**: per-call term weighting
//! - **entities**: person / place / organization recognition
//! - **analyzer**: assembles a [`crate::types::TextAnalysis`]

pub mod analyzer;
pub mod entities;
pub mod lexicon;
pub mod tfidf;
pub mod tokenizer;

pub use analyzer::{TextAnalyzer, DEFAULT_KEYWORD_LIMIT};
pub use tfidf::TfIdf;
