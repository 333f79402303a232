//! Common test utilities and helpers

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use triage_relevance::{
    FormattedKnowledgeBase, GenerationOptions, KnowledgeBaseEntry, KnowledgeBaseSummary,
    RelevanceEngine, RelevanceError, Result, ScoringConfig, TextCompletion,
};

/// Install a test-writer tracing subscriber once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("triage_relevance=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Scripted reply from [`StubCompletion`]
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    TransportError(String),
    /// Provider bug: `generate` panics with this message
    Panic(String),
}

/// Completion provider that replays a script and counts calls.
///
/// Once the script runs out, the last reply repeats.
pub struct StubCompletion {
    replies: Mutex<VecDeque<Reply>>,
    last: Mutex<Option<Reply>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl StubCompletion {
    pub fn new(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Always answer with the same text
    pub fn always(text: &str) -> Arc<Self> {
        Self::new(vec![Reply::Text(text.to_string())])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompts lock").clone()
    }
}

#[async_trait]
impl TextCompletion for StubCompletion {
    async fn generate(&self, prompt: &str, _options: &GenerationOptions) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("prompts lock")
            .push(prompt.to_string());

        let next = self.replies.lock().expect("replies lock").pop_front();
        let reply = match next {
            Some(reply) => {
                *self.last.lock().expect("last lock") = Some(reply.clone());
                reply
            }
            None => self
                .last
                .lock()
                .expect("last lock")
                .clone()
                .unwrap_or_else(|| Reply::TransportError("empty script".to_string())),
        };

        match reply {
            Reply::Text(text) => Ok(text),
            Reply::TransportError(message) => Err(RelevanceError::LlmApi(message)),
            Reply::Panic(message) => panic!("{}", message),
        }
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

/// JSON breakdown with every factor set to `value`
pub fn uniform_breakdown(value: f64) -> String {
    format!(
        r#"{{"contentAlignment":{v},"technicalLevelMatch":{v},"domainRelevance":{v},"contextualFit":{v},"explanation":"uniform {v}"}}"#,
        v = value
    )
}

/// Engine with default settings around `stub`
pub fn engine_with(stub: Arc<StubCompletion>) -> RelevanceEngine {
    RelevanceEngine::new(ScoringConfig::default(), stub).expect("valid default config")
}

/// Knowledge base of a database consultancy, summarised
pub fn database_consultancy() -> FormattedKnowledgeBase {
    FormattedKnowledgeBase {
        entries: vec![
            KnowledgeBaseEntry::from_qa(
                "What do you do?",
                "Database architecture and performance tuning.",
            ),
            KnowledgeBaseEntry::from_qa("Do you do caching?", "Yes, Redis and CDN layers."),
        ],
        coalesced_summary: Some(KnowledgeBaseSummary {
            content: "We specialize in database architecture, caching layers, and replication \
                      strategies for e-commerce."
                .to_string(),
        }),
        industry: "e-commerce".to_string(),
        use_case: "database consulting".to_string(),
        main_goals: vec![
            "land performance engagements".to_string(),
            "grow replication practice".to_string(),
        ],
    }
}

/// Same knowledge base without the coalesced summary
pub fn entries_only(entry_count: usize) -> FormattedKnowledgeBase {
    FormattedKnowledgeBase {
        entries: (0..entry_count)
            .map(|i| {
                KnowledgeBaseEntry::from_qa(
                    &format!("Question {} about database replication?", i),
                    "We run primary/replica clusters with automated failover.",
                )
            })
            .collect(),
        coalesced_summary: None,
        ..database_consultancy()
    }
}
