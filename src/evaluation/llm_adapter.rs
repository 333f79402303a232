//! Obtains a validated four-factor breakdown from the completion provider.
//!
//! Malformed output (bad JSON or a schema violation) is retried up to the
//! attempt budget with no backoff. A transport error from the provider ends
//! the loop at once and is returned unchanged.

use crate::config::GenerationOptions;
use crate::error::{RelevanceError, Result};
use crate::evaluation::schema::parse_detailed_score;
use crate::services::TextCompletion;
use crate::types::DetailedScore;
use crate::utils::string::truncate_at_char_boundary;
use std::sync::Arc;
use tracing::{debug, warn};

/// Longest response excerpt written to the log
const RESPONSE_LOG_CHARS: usize = 200;

pub struct LlmScoringAdapter {
    completion: Arc<dyn TextCompletion>,
    options: GenerationOptions,
    max_attempts: u32,
}

impl LlmScoringAdapter {
    pub fn new(
        completion: Arc<dyn TextCompletion>,
        options: GenerationOptions,
        max_attempts: u32,
    ) -> Self {
        Self {
            completion,
            options,
            max_attempts,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Ask for a breakdown until one validates or the budget runs out
    pub async fn score(&self, prompt: &str) -> Result<DetailedScore> {
        let mut last_error: Option<RelevanceError> = None;

        for attempt in 1..=self.max_attempts {
            debug!(
                attempt,
                max_attempts = self.max_attempts,
                model = self.completion.model_name(),
                "Requesting score breakdown"
            );

            let raw = self.completion.generate(prompt, &self.options).await?;

            match parse_detailed_score(&raw) {
                Ok(breakdown) => {
                    debug!(attempt, "Model returned a valid breakdown");
                    return Ok(breakdown);
                }
                Err(e) if e.is_retryable() => {
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %e,
                        response = %truncate_at_char_boundary(&raw, RESPONSE_LOG_CHARS),
                        "Rejected model response"
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(RelevanceError::RetriesExhausted {
            attempts: self.max_attempts,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempts made".to_string()),
        })
    }
}
