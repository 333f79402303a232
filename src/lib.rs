//! Triage Relevance - relevance scoring for inbound email triage
//!
//! Given a candidate request (summary + considerations) and a recipient's
//! knowledge base, computes one relevance score in [0, 1] used to gate and
//! triage inbound requests.
//!
//! # Architecture
//!
//! The crate is one pipeline with separable stages:
//! - **Analysis**: keywords, entities, concepts, technical terms, sentiment, complexity
//! - **Evaluation**: pre-score metrics, LLM breakdown with validation and retries,
//!   weighted aggregation, and the orchestrating [`RelevanceEngine`]
//! - **Services**: the [`TextCompletion`] seam and its Anthropic implementation
//!
//! The engine never returns an error to its caller, and never lets a panic
//! escape. When scoring cannot complete it returns the neutral score 0.5 and reports the reason through
//! [`ScoreOutcome`].
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use triage_relevance::{
//!     FormattedKnowledgeBase, KnowledgeBaseEntry, RelevanceEngine, ScoringConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> triage_relevance::Result<()> {
//!     let config = ScoringConfig::load(Some(Path::new("relevance.toml")))?;
//!     let engine = RelevanceEngine::from_env(config)?;
//!
//!     let knowledge_base = FormattedKnowledgeBase {
//!         entries: vec![KnowledgeBaseEntry::from_qa(
//!             "What do you do?",
//!             "Database architecture and performance tuning.",
//!         )],
//!         industry: "e-commerce".to_string(),
//!         ..Default::default()
//!     };
//!
//!     let scored = engine
//!         .score_with_outcome("database performance", "need replication", &knowledge_base)
//!         .await;
//!     if scored.outcome.is_fallback() {
//!         tracing::warn!("neutral score: {}", scored.outcome);
//!     }
//!     Ok(())
//! }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use analysis::TextAnalyzer;
pub use config::{AnthropicConfig, GenerationOptions, ScoreWeights, ScoringConfig};
pub use error::{RelevanceError, Result};
pub use evaluation::{DetailedRelevance, RelevanceEngine, ScoreOutcome, ScoredRelevance};
pub use services::{AnthropicCompletion, TextCompletion};
pub use types::{
    AnalysisPair, DetailedScore, FormattedKnowledgeBase, KnowledgeBaseEntry,
    KnowledgeBaseSummary, TextAnalysis,
};
