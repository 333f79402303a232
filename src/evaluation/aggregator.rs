//! Reduces a validated breakdown to the final score and a confidence value.

use crate::config::ScoreWeights;
use crate::types::DetailedScore;

/// Spread at which confidence bottoms out
const MAX_CONFIDENCE_PENALTY: f64 = 0.5;

/// Weighted sum of the four factors
pub fn aggregate_score(score: &DetailedScore, weights: &ScoreWeights) -> f64 {
    score
        .factors()
        .iter()
        .zip(weights.as_array())
        .map(|(factor, weight)| factor * weight)
        .sum()
}

/// `1 - min(2 * stddev(factors), 0.5)`
///
/// 1.0 when all four factors agree, never below 0.5.
pub fn confidence(score: &DetailedScore) -> f64 {
    let factors = score.factors();
    let n = factors.len() as f64;
    let mean = factors.iter().sum::<f64>() / n;
    let variance = factors.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n;

    1.0 - (2.0 * variance.sqrt()).min(MAX_CONFIDENCE_PENALTY)
}
