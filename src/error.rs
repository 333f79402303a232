//! Error types for the relevance scoring engine
//!
//! Internal stages return [`Result`]; only the orchestrator turns an error
//! into the neutral fallback score, so nothing here ever reaches callers of
//! the public scoring entry points.

use thiserror::Error;

/// Main error type for relevance scoring operations
#[derive(Error, Debug)]
pub enum RelevanceError {
    /// Scoring is switched off (no completion credential configured)
    #[error("Relevance scoring is disabled")]
    Disabled,

    /// Invalid configuration values
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration source could not be read or deserialized
    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// LLM API request failed (non-success status, empty content)
    #[error("LLM API error: {0}")]
    LlmApi(String),

    /// Model output was not valid JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Model output was JSON but violated the score schema
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    /// Every attempt produced malformed output
    #[error("Gave up after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl RelevanceError {
    /// Whether another completion attempt may fix this error.
    ///
    /// Only malformed model output is retried. Transport failures abort the
    /// attempt loop and fall through to the neutral score.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Serialization(_) | Self::InvalidResponse(_))
    }
}

/// Result type alias for relevance scoring operations
pub type Result<T> = std::result::Result<T, RelevanceError>;
