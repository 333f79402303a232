//! Configuration for the relevance scoring engine
//!
//! Settings are layered with the `config` crate:
//! 1. Built-in defaults
//! 2. Optional TOML file
//! 3. `TRIAGE_RELEVANCE__*` environment overrides (`__` separates nested keys)
//!
//! The completion credential lives apart from these settings in
//! [`AnthropicConfig`], wrapped in a [`SecretString`] so it never shows up in
//! debug output.

use crate::error::{RelevanceError, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::debug;

/// Environment prefix for setting overrides
pub const ENV_PREFIX: &str = "TRIAGE_RELEVANCE";

/// Environment variable holding the completion API key
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Score returned whenever the pipeline cannot produce a real score
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Upper bound on completion attempts per scoring call
pub const MAX_ATTEMPTS: u32 = 3;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Sampling parameters passed to the completion provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
    /// Must be 1; providers return a single candidate
    pub candidate_count: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            top_k: 1,
            top_p: 0.1,
            max_output_tokens: 1024,
            candidate_count: 1,
        }
    }
}

/// Aggregation weights for the four score factors (sum to 1.0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub content_alignment: f64,
    pub technical_level_match: f64,
    pub domain_relevance: f64,
    pub contextual_fit: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            content_alignment: 0.35,
            technical_level_match: 0.20,
            domain_relevance: 0.25,
            contextual_fit: 0.20,
        }
    }
}

impl ScoreWeights {
    /// Weights in factor order (content, technical, domain, context)
    pub fn as_array(&self) -> [f64; 4] {
        [
            self.content_alignment,
            self.technical_level_match,
            self.domain_relevance,
            self.contextual_fit,
        ]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    /// Reject negative weights and sets that do not sum to 1.0
    pub fn validate(&self) -> Result<()> {
        if self.as_array().iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(RelevanceError::Config(format!(
                "score weights must be finite and non-negative: {:?}",
                self
            )));
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(RelevanceError::Config(format!(
                "score weights must sum to 1.0, got {}",
                sum
            )));
        }

        Ok(())
    }
}

/// Settings for one relevance engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Skip scoring entirely and return the neutral score
    pub disabled: bool,

    /// Completion attempts per call (1 initial + retries), at most [`MAX_ATTEMPTS`]
    pub max_attempts: u32,

    /// Cap applied to joined raw entries when no summary exists
    pub knowledge_base_char_limit: usize,

    /// Maximum keywords kept per analysis
    pub keyword_limit: usize,

    pub neutral_score: f64,

    pub weights: ScoreWeights,

    pub generation: GenerationOptions,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            max_attempts: MAX_ATTEMPTS,
            knowledge_base_char_limit: 1500,
            keyword_limit: 10,
            neutral_score: NEUTRAL_SCORE,
            weights: ScoreWeights::default(),
            generation: GenerationOptions::default(),
        }
    }
}

impl ScoringConfig {
    /// Defaults with scoring switched off
    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Load defaults, then the optional TOML file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            debug!("Loading scoring config from {}", path.display());
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let loaded: Self = builder.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;

        if !(1..=MAX_ATTEMPTS).contains(&self.max_attempts) {
            return Err(RelevanceError::Config(format!(
                "max_attempts must be between 1 and {}, got {}",
                MAX_ATTEMPTS, self.max_attempts
            )));
        }

        if self.generation.candidate_count != 1 {
            return Err(RelevanceError::Config(format!(
                "candidate_count must be 1, got {}",
                self.generation.candidate_count
            )));
        }

        if !(0.0..=1.0).contains(&self.neutral_score) {
            return Err(RelevanceError::Config(format!(
                "neutral_score must be within [0, 1], got {}",
                self.neutral_score
            )));
        }

        Ok(())
    }
}

/// Connection settings for the Anthropic Messages API
#[derive(Debug)]
pub struct AnthropicConfig {
    pub api_key: SecretString,

    /// Model to use (default: claude-3-5-haiku-20241022)
    pub model: String,

    pub base_url: String,

    pub timeout_secs: u64,
}

impl AnthropicConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            model: "claude-3-5-haiku-20241022".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
            timeout_secs: 30,
        }
    }

    /// Read the key from `ANTHROPIC_API_KEY`; `None` when unset or empty
    pub fn from_env() -> Option<Self> {
        match env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => {
                debug!("Using API key from {} environment variable", API_KEY_ENV);
                Some(Self::new(key))
            }
            _ => None,
        }
    }
}
