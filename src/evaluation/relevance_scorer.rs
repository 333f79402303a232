//! Relevance scoring entry point.
//!
//! Drives the pipeline for one request against one knowledge base:
//! 1. Analyze request text and knowledge-base text
//! 2. Compute pre-scores (content alignment, technical match)
//! 3. Build the prompt and obtain a validated breakdown (bounded retries)
//! 4. Aggregate the breakdown into one score
//!
//! Every path ends in a number within [0, 1]. When the pipeline cannot
//! finish, the neutral score (0.5) is returned and the [`ScoreOutcome`] says
//! why: scoring disabled, retries exhausted, or an error along the way.
//! A panic in analysis or in the completion provider is caught here and
//! reported as [`ScoreOutcome::Failed`].

use crate::analysis::TextAnalyzer;
use crate::config::{AnthropicConfig, ScoringConfig};
use crate::error::{RelevanceError, Result};
use crate::evaluation::aggregator::{aggregate_score, confidence};
use crate::evaluation::feature_extractor::PreScores;
use crate::evaluation::llm_adapter::LlmScoringAdapter;
use crate::evaluation::prompts::{build_scoring_prompt, PromptInput};
use crate::services::{AnthropicCompletion, TextCompletion};
use crate::types::{AnalysisPair, DetailedScore, FormattedKnowledgeBase, RunId};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, info, info_span, warn, Instrument};

/// How a scoring call ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ScoreOutcome {
    /// The model produced a valid breakdown
    Scored,

    /// No completion credential; scoring was skipped
    Disabled,

    /// Every attempt returned malformed output
    RetriesExhausted { attempts: u32 },

    /// Transport or internal error
    Failed { error: String },
}

impl ScoreOutcome {
    /// Whether the score is the neutral "could not determine" value
    pub fn is_fallback(&self) -> bool {
        !matches!(self, ScoreOutcome::Scored)
    }

    /// Short tag used in log events
    pub fn reason(&self) -> &'static str {
        match self {
            ScoreOutcome::Scored => "scored",
            ScoreOutcome::Disabled => "disabled",
            ScoreOutcome::RetriesExhausted { .. } => "retries_exhausted",
            ScoreOutcome::Failed { .. } => "failed",
        }
    }
}

impl std::fmt::Display for ScoreOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreOutcome::RetriesExhausted { attempts } => {
                write!(f, "retries_exhausted after {} attempts", attempts)
            }
            ScoreOutcome::Failed { error } => write!(f, "failed: {}", error),
            other => write!(f, "{}", other.reason()),
        }
    }
}

/// Score plus the reason it was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRelevance {
    pub score: f64,
    pub outcome: ScoreOutcome,
}

/// Explainable result of the extended API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedRelevance {
    pub score: f64,

    /// `None` whenever the outcome is a fallback
    pub breakdown: Option<DetailedScore>,

    /// Factor agreement in [0.5, 1.0]; 0.0 on fallback
    pub confidence: f64,

    /// Present once analysis has run, even if a later stage failed
    pub analysis: Option<AnalysisPair>,

    pub outcome: ScoreOutcome,
}

/// Relevance scoring engine
///
/// Holds no per-call state; one engine can serve concurrent calls.
pub struct RelevanceEngine {
    config: ScoringConfig,
    analyzer: TextAnalyzer,
    adapter: Option<LlmScoringAdapter>,
}

impl RelevanceEngine {
    /// Create an engine around an injected completion provider
    pub fn new(config: ScoringConfig, completion: Arc<dyn TextCompletion>) -> Result<Self> {
        Self::build(config, Some(completion))
    }

    /// Engine that always returns the neutral score
    pub fn disabled() -> Self {
        let config = ScoringConfig::disabled();
        Self {
            analyzer: TextAnalyzer::new(config.keyword_limit),
            config,
            adapter: None,
        }
    }

    /// Production constructor: Anthropic client when `ANTHROPIC_API_KEY` is
    /// set, disabled mode otherwise
    pub fn from_env(config: ScoringConfig) -> Result<Self> {
        match AnthropicConfig::from_env() {
            Some(anthropic) => {
                let completion = AnthropicCompletion::new(anthropic)?;
                Self::build(config, Some(Arc::new(completion)))
            }
            None => {
                info!("No completion API key configured; relevance scoring disabled");
                Self::build(
                    ScoringConfig {
                        disabled: true,
                        ..config
                    },
                    None,
                )
            }
        }
    }

    fn build(config: ScoringConfig, completion: Option<Arc<dyn TextCompletion>>) -> Result<Self> {
        config.validate()?;

        let adapter = completion.filter(|_| !config.disabled).map(|completion| {
            LlmScoringAdapter::new(completion, config.generation.clone(), config.max_attempts)
        });

        Ok(Self {
            analyzer: TextAnalyzer::new(config.keyword_limit),
            config,
            adapter,
        })
    }

    pub fn is_disabled(&self) -> bool {
        self.adapter.is_none()
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Relevance of a request to a knowledge base, always within [0, 1]
    pub async fn calculate_relevance_score(
        &self,
        summary: &str,
        considerations: &str,
        knowledge_base: &FormattedKnowledgeBase,
    ) -> f64 {
        self.run(summary, considerations, knowledge_base).await.score
    }

    /// Score together with why it was produced
    pub async fn score_with_outcome(
        &self,
        summary: &str,
        considerations: &str,
        knowledge_base: &FormattedKnowledgeBase,
    ) -> ScoredRelevance {
        let result = self.run(summary, considerations, knowledge_base).await;
        ScoredRelevance {
            score: result.score,
            outcome: result.outcome,
        }
    }

    /// Score with breakdown, confidence and both analyses
    pub async fn calculate_detailed_score(
        &self,
        summary: &str,
        considerations: &str,
        knowledge_base: &FormattedKnowledgeBase,
    ) -> DetailedRelevance {
        self.run(summary, considerations, knowledge_base).await
    }

    async fn run(
        &self,
        summary: &str,
        considerations: &str,
        knowledge_base: &FormattedKnowledgeBase,
    ) -> DetailedRelevance {
        let span = info_span!("relevance_score", run_id = %RunId::new());

        let pipeline = self
            .pipeline(summary, considerations, knowledge_base)
            .instrument(span.clone());

        // Analysis and the injected provider must never unwind into the caller
        match AssertUnwindSafe(pipeline).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => span.in_scope(|| {
                self.fallback(
                    ScoreOutcome::Failed {
                        error: format!("panic: {}", panic_message(panic.as_ref())),
                    },
                    None,
                )
            }),
        }
    }

    async fn pipeline(
        &self,
        summary: &str,
        considerations: &str,
        knowledge_base: &FormattedKnowledgeBase,
    ) -> DetailedRelevance {
        let Some(adapter) = &self.adapter else {
            return self.fallback(ScoreOutcome::Disabled, None);
        };

        let request_text = format!("{} {}", summary, considerations);
        let kb_text = knowledge_base.analysis_text(self.config.knowledge_base_char_limit);
        debug!(
            "Scoring request ({} chars) against knowledge base ({} chars, summary: {})",
            request_text.len(),
            kb_text.len(),
            knowledge_base.coalesced_summary.is_some()
        );

        let analysis = self.analyzer.analyze_pair(&request_text, &kb_text);
        let pre_scores = PreScores::from_analyses(&analysis);

        let prompt = build_scoring_prompt(&PromptInput {
            summary,
            considerations,
            request: &analysis.request,
            knowledge_base,
            knowledge_base_analysis: &analysis.knowledge_base,
            pre_scores,
        });

        match adapter.score(&prompt).await {
            Ok(breakdown) => self.scored(breakdown, analysis),
            Err(RelevanceError::RetriesExhausted { attempts, last_error }) => {
                debug!("Last rejection: {}", last_error);
                self.fallback(ScoreOutcome::RetriesExhausted { attempts }, Some(analysis))
            }
            Err(e) => self.fallback(
                ScoreOutcome::Failed {
                    error: e.to_string(),
                },
                Some(analysis),
            ),
        }
    }

    fn scored(&self, breakdown: DetailedScore, analysis: AnalysisPair) -> DetailedRelevance {
        let score = aggregate_score(&breakdown, &self.config.weights).clamp(0.0, 1.0);
        let confidence = confidence(&breakdown);

        info!(
            score,
            confidence,
            explanation = %breakdown.explanation,
            "Relevance score computed"
        );

        DetailedRelevance {
            score,
            breakdown: Some(breakdown),
            confidence,
            analysis: Some(analysis),
            outcome: ScoreOutcome::Scored,
        }
    }

    fn fallback(&self, outcome: ScoreOutcome, analysis: Option<AnalysisPair>) -> DetailedRelevance {
        let score = self.config.neutral_score;

        match &outcome {
            ScoreOutcome::Disabled => {
                debug!(reason = outcome.reason(), score, "Relevance scoring skipped")
            }
            _ => warn!(
                reason = outcome.reason(),
                detail = %outcome,
                score,
                "Relevance scoring fell back to neutral score"
            ),
        }

        DetailedRelevance {
            score,
            breakdown: None,
            confidence: 0.0,
            analysis,
            outcome,
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenerationOptions, API_KEY_ENV};
    use crate::services::llm::MockTextCompletion;
    use crate::types::KnowledgeBaseSummary;
    use serial_test::serial;
    use std::env;

    fn knowledge_base() -> FormattedKnowledgeBase {
        FormattedKnowledgeBase {
            coalesced_summary: Some(KnowledgeBaseSummary {
                content: "We specialize in database architecture, caching layers, and \
                          replication strategies for e-commerce."
                    .to_string(),
            }),
            industry: "e-commerce".to_string(),
            use_case: "database consulting".to_string(),
            ..Default::default()
        }
    }

    fn engine_with(mock: MockTextCompletion) -> RelevanceEngine {
        RelevanceEngine::new(ScoringConfig::default(), Arc::new(mock)).expect("engine")
    }

    #[tokio::test]
    async fn test_disabled_engine_never_calls_provider() {
        let mut mock = MockTextCompletion::new();
        mock.expect_generate().never();

        let engine = RelevanceEngine::new(ScoringConfig::disabled(), Arc::new(mock)).unwrap();
        assert!(engine.is_disabled());

        let result = engine
            .score_with_outcome("anything", "at all", &knowledge_base())
            .await;
        assert_eq!(result.score, 0.5);
        assert_eq!(result.outcome, ScoreOutcome::Disabled);
    }

    #[tokio::test]
    async fn test_disabled_constructor() {
        let engine = RelevanceEngine::disabled();
        let detailed = engine
            .calculate_detailed_score("summary", "", &knowledge_base())
            .await;
        assert_eq!(detailed.score, 0.5);
        assert!(detailed.analysis.is_none());
        assert!(detailed.breakdown.is_none());
        assert_eq!(detailed.confidence, 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ScoringConfig {
            max_attempts: 0,
            ..Default::default()
        };
        let result = RelevanceEngine::new(config, Arc::new(MockTextCompletion::new()));
        assert!(matches!(result, Err(RelevanceError::Config(_))));
    }

    #[tokio::test]
    async fn test_detailed_success_populates_everything() {
        let mut mock = MockTextCompletion::new();
        mock.expect_model_name().return_const("mock".to_string());
        mock.expect_generate().times(1).returning(|_, _| {
            Ok(r#"{"contentAlignment":0.4,"technicalLevelMatch":0.6,"domainRelevance":0.4,"contextualFit":0.6,"explanation":"partial"}"#.to_string())
        });

        let detailed = engine_with(mock)
            .calculate_detailed_score("database caching", "replication", &knowledge_base())
            .await;

        assert_eq!(detailed.outcome, ScoreOutcome::Scored);
        // 0.4*0.35 + 0.6*0.20 + 0.4*0.25 + 0.6*0.20 = 0.48
        assert!((detailed.score - 0.48).abs() < 1e-9);
        assert!((detailed.confidence - 0.8).abs() < 1e-9);
        let analysis = detailed.analysis.expect("analysis present");
        assert!(analysis
            .knowledge_base
            .technical_terms
            .contains(&"architecture".to_string()));
        assert_eq!(detailed.breakdown.expect("breakdown").explanation, "partial");
    }

    #[tokio::test]
    async fn test_prompt_carries_request_and_knowledge_base() {
        let mut mock = MockTextCompletion::new();
        mock.expect_model_name().return_const("mock".to_string());
        mock.expect_generate()
            .withf(|prompt, _| {
                prompt.contains("Summary: database caching")
                    && prompt.contains("Industry: e-commerce")
                    && prompt.contains("Use case: database consulting")
            })
            .times(1)
            .returning(|_, _| Err(RelevanceError::LlmApi("offline".into())));

        let result = engine_with(mock)
            .score_with_outcome("database caching", "", &knowledge_base())
            .await;
        assert!(result.outcome.is_fallback());
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back_with_analysis() {
        let mut mock = MockTextCompletion::new();
        mock.expect_model_name().return_const("mock".to_string());
        mock.expect_generate()
            .times(1)
            .returning(|_, _| Err(RelevanceError::LlmApi("connection reset".into())));

        let detailed = engine_with(mock)
            .calculate_detailed_score("database caching", "", &knowledge_base())
            .await;

        assert_eq!(detailed.score, 0.5);
        assert!(matches!(detailed.outcome, ScoreOutcome::Failed { .. }));
        assert_eq!(detailed.outcome.reason(), "failed");
        assert!(detailed.analysis.is_some());
        assert!(detailed.breakdown.is_none());
    }

    struct PanickingCompletion;

    #[async_trait::async_trait]
    impl TextCompletion for PanickingCompletion {
        async fn generate(&self, _prompt: &str, _options: &GenerationOptions) -> Result<String> {
            panic!("provider bug")
        }

        fn model_name(&self) -> &str {
            "panicking"
        }
    }

    #[tokio::test]
    async fn test_provider_panic_becomes_neutral_score() {
        let engine =
            RelevanceEngine::new(ScoringConfig::default(), Arc::new(PanickingCompletion)).unwrap();

        let detailed = engine
            .calculate_detailed_score("database caching", "", &knowledge_base())
            .await;

        assert_eq!(detailed.score, 0.5);
        assert_eq!(
            detailed.outcome,
            ScoreOutcome::Failed {
                error: "panic: provider bug".to_string()
            }
        );
        assert!(detailed.breakdown.is_none());
        assert!(detailed.analysis.is_none());
        assert_eq!(detailed.confidence, 0.0);
    }

    #[test]
    fn test_panic_message_payloads() {
        let owned: Box<dyn Any + Send> = Box::new(format!("index {} out of range", 3));
        assert_eq!(panic_message(owned.as_ref()), "index 3 out of range");

        let borrowed: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(borrowed.as_ref()), "static message");

        let other: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }

    #[tokio::test]
    #[serial]
    async fn test_from_env_without_key_is_disabled() {
        let saved = env::var(API_KEY_ENV).ok();
        env::remove_var(API_KEY_ENV);

        let engine = RelevanceEngine::from_env(ScoringConfig::default());

        if let Some(key) = saved {
            env::set_var(API_KEY_ENV, key);
        }

        let engine = engine.expect("engine");
        assert!(engine.is_disabled());
        assert!(engine.config().disabled);

        let scored = engine
            .score_with_outcome("database caching", "replication", &knowledge_base())
            .await;
        assert_eq!(scored.score, 0.5);
        assert_eq!(scored.outcome, ScoreOutcome::Disabled);
    }

    #[test]
    #[serial]
    fn test_from_env_with_key_is_enabled() {
        let saved = env::var(API_KEY_ENV).ok();
        env::set_var(API_KEY_ENV, "sk-ant-test");

        let engine = RelevanceEngine::from_env(ScoringConfig::default());

        match saved {
            Some(key) => env::set_var(API_KEY_ENV, key),
            None => env::remove_var(API_KEY_ENV),
        }

        let engine = engine.expect("engine");
        assert!(!engine.is_disabled());
        assert!(!engine.config().disabled);
    }

    #[test]
    fn test_outcome_reasons() {
        assert!(!ScoreOutcome::Scored.is_fallback());
        assert!(ScoreOutcome::Disabled.is_fallback());
        assert_eq!(
            ScoreOutcome::RetriesExhausted { attempts: 3 }.to_string(),
            "retries_exhausted after 3 attempts"
        );
        assert_eq!(ScoreOutcome::Disabled.to_string(), "disabled");
    }
}
