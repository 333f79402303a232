//! Relevance evaluation pipeline.
//!
//! Scores how well an inbound request matches a recipient's knowledge base.
//!
//! # Architecture
//!
//! - **FeatureExtractor** (`feature_extractor`): Jaccard similarities and the two pre-scores
//! - **Schema** (`schema`): strict parsing of the model's four-factor breakdown
//! - **Prompts** (`prompts`): the structured scoring prompt
//! - **LlmScoringAdapter** (`llm_adapter`): completion call with bounded retries
//! - **Aggregator** (`aggregator`): weighted final score and confidence
//! - **RelevanceEngine** (`relevance_scorer`): public entry point, owns every fallback
//!
//! Data flows one way: text → analyses → prompt → validated breakdown → score.
//! No stage keeps state between calls.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use triage_relevance::{
//!     AnthropicCompletion, AnthropicConfig, FormattedKnowledgeBase, KnowledgeBaseSummary,
//!     RelevanceEngine, ScoringConfig,
//! };
//!
//! # async fn example() -> triage_relevance::Result<()> {
//! let completion = AnthropicCompletion::new(AnthropicConfig::new("sk-ant-..."))?;
//! let engine = RelevanceEngine::new(ScoringConfig::default(), Arc::new(completion))?;
//!
//! let knowledge_base = FormattedKnowledgeBase {
//!     coalesced_summary: Some(KnowledgeBaseSummary {
//!         content: "We specialize in database architecture and caching.".to_string(),
//!     }),
//!     industry: "e-commerce".to_string(),
//!     ..Default::default()
//! };
//!
//! let score = engine
//!     .calculate_relevance_score("slow checkout queries", "need caching", &knowledge_base)
//!     .await;
//! assert!((0.0..=1.0).contains(&score));
//! # Ok(())
//! # }
//! ```

pub mod aggregator;
pub mod feature_extractor;
pub mod llm_adapter;
pub mod prompts;
pub mod relevance_scorer;
pub mod schema;

pub use aggregator::{aggregate_score, confidence};
pub use feature_extractor::{content_alignment, set_similarity, technical_match, PreScores};
pub use llm_adapter::LlmScoringAdapter;
pub use relevance_scorer::{DetailedRelevance, RelevanceEngine, ScoreOutcome, ScoredRelevance};
pub use schema::{parse_detailed_score, validate_detailed_score};
