//! Parsing and validation of the model's score breakdown.
//!
//! The response must be a JSON object carrying:
//! - `contentAlignment`, `technicalLevelMatch`, `domainRelevance`, `contextualFit`:
//!   finite numbers within [0.0, 1.0]
//! - `explanation`: a non-blank string
//!
//! The first violation rejects the whole object. Values are never clamped or
//! defaulted. Extra keys are ignored.

use crate::error::{RelevanceError, Result};
use crate::types::DetailedScore;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

pub const CONTENT_ALIGNMENT: &str = "contentAlignment";
pub const TECHNICAL_LEVEL_MATCH: &str = "technicalLevelMatch";
pub const DOMAIN_RELEVANCE: &str = "domainRelevance";
pub const CONTEXTUAL_FIT: &str = "contextualFit";
pub const EXPLANATION: &str = "explanation";

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^```[A-Za-z]*\s*(.*?)\s*```$").expect("valid code fence regex")
});

/// Strip a surrounding markdown code fence, if any
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    match CODE_FENCE.captures(trimmed).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str(),
        None => trimmed,
    }
}

/// Parse raw completion text into a validated breakdown
pub fn parse_detailed_score(raw: &str) -> Result<DetailedScore> {
    let value: Value = serde_json::from_str(strip_code_fence(raw))?;
    validate_detailed_score(&value)
}

/// Check every field of an already-parsed response
pub fn validate_detailed_score(value: &Value) -> Result<DetailedScore> {
    let object = value.as_object().ok_or_else(|| {
        RelevanceError::InvalidResponse(format!("expected a JSON object, got {}", kind(value)))
    })?;

    Ok(DetailedScore {
        content_alignment: unit_interval(object, CONTENT_ALIGNMENT)?,
        technical_level_match: unit_interval(object, TECHNICAL_LEVEL_MATCH)?,
        domain_relevance: unit_interval(object, DOMAIN_RELEVANCE)?,
        contextual_fit: unit_interval(object, CONTEXTUAL_FIT)?,
        explanation: explanation(object)?,
    })
}

fn unit_interval(object: &Map<String, Value>, field: &str) -> Result<f64> {
    let value = object
        .get(field)
        .ok_or_else(|| RelevanceError::InvalidResponse(format!("{} is missing", field)))?;

    let number = value.as_f64().ok_or_else(|| {
        RelevanceError::InvalidResponse(format!("{} must be a number, got {}", field, kind(value)))
    })?;

    if !number.is_finite() || !(0.0..=1.0).contains(&number) {
        return Err(RelevanceError::InvalidResponse(format!(
            "{} must be within [0, 1], got {}",
            field, number
        )));
    }

    Ok(number)
}

fn explanation(object: &Map<String, Value>) -> Result<String> {
    match object.get(EXPLANATION) {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.clone()),
        Some(Value::String(_)) => Err(RelevanceError::InvalidResponse(format!(
            "{} must not be blank",
            EXPLANATION
        ))),
        Some(other) => Err(RelevanceError::InvalidResponse(format!(
            "{} must be a string, got {}",
            EXPLANATION,
            kind(other)
        ))),
        None => Err(RelevanceError::InvalidResponse(format!(
            "{} is missing",
            EXPLANATION
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "contentAlignment": 0.9,
            "technicalLevelMatch": 0.85,
            "domainRelevance": 0.9,
            "contextualFit": 0.8,
            "explanation": "strong technical and domain match"
        })
    }

    fn rejection(value: Value) -> String {
        match validate_detailed_score(&value) {
            Err(RelevanceError::InvalidResponse(msg)) => msg,
            other => panic!("expected InvalidResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_breakdown_accepted() {
        let score = validate_detailed_score(&valid()).expect("valid breakdown");
        assert_eq!(score.content_alignment, 0.9);
        assert_eq!(score.technical_level_match, 0.85);
        assert_eq!(score.explanation, "strong technical and domain match");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let mut value = valid();
        value[CONTENT_ALIGNMENT] = json!(0);
        value[CONTEXTUAL_FIT] = json!(1);
        let score = validate_detailed_score(&value).expect("0 and 1 are valid");
        assert_eq!(score.content_alignment, 0.0);
        assert_eq!(score.contextual_fit, 1.0);
    }

    #[test]
    fn test_missing_field_rejected() {
        let mut value = valid();
        value.as_object_mut().unwrap().remove(CONTEXTUAL_FIT);
        assert_eq!(rejection(value), "contextualFit is missing");
    }

    #[test]
    fn test_out_of_range_rejected_not_clamped() {
        let mut value = valid();
        value[TECHNICAL_LEVEL_MATCH] = json!(1.5);
        assert_eq!(
            rejection(value),
            "technicalLevelMatch must be within [0, 1], got 1.5"
        );

        let mut value = valid();
        value[DOMAIN_RELEVANCE] = json!(-0.1);
        assert!(rejection(value).starts_with("domainRelevance"));
    }

    #[test]
    fn test_non_numeric_rejected() {
        let mut value = valid();
        value[CONTENT_ALIGNMENT] = json!("0.9");
        assert_eq!(
            rejection(value),
            "contentAlignment must be a number, got string"
        );
    }

    #[test]
    fn test_explanation_rules() {
        let mut value = valid();
        value[EXPLANATION] = json!(42);
        assert_eq!(rejection(value), "explanation must be a string, got number");

        let mut value = valid();
        value[EXPLANATION] = json!("  ");
        assert_eq!(rejection(value), "explanation must not be blank");

        let mut value = valid();
        value.as_object_mut().unwrap().remove(EXPLANATION);
        assert_eq!(rejection(value), "explanation is missing");
    }

    #[test]
    fn test_non_object_rejected() {
        assert_eq!(rejection(json!([0.5])), "expected a JSON object, got array");
    }

    #[test]
    fn test_extra_keys_ignored() {
        let mut value = valid();
        value["confidence"] = json!("high");
        assert!(validate_detailed_score(&value).is_ok());
    }

    #[test]
    fn test_parse_plain_and_fenced_json() {
        let raw = valid().to_string();
        assert!(parse_detailed_score(&raw).is_ok());

        let fenced = format!("```json\n{}\n```", raw);
        assert!(parse_detailed_score(&fenced).is_ok());

        let bare_fence = format!("```\n{}\n```", raw);
        assert!(parse_detailed_score(&bare_fence).is_ok());
    }

    #[test]
    fn test_parse_non_json_is_serialization_error() {
        let err = parse_detailed_score("Sure! The scores are high.").unwrap_err();
        assert!(matches!(err, RelevanceError::Serialization(_)));
        assert!(err.is_retryable());
    }
}
