//! Scoring invariant enforcer.
//!
//! Every successful improvement must score at least `min_improvement(original)`
//! points above the original. When the model's own improved score falls short
//! it is overridden with `min(100, original + margin)`. Near the top of the
//! scale the cap wins: an original of 96 or more can only reach 100.
//!
//! Persuasiveness is reported as-is and never forced upward.

use crate::negotiation::models::{ComparativeAnalysis, ScoreSnapshot, MAX_SCORE};

/// Originals at or above this score need only the smaller margin.
pub const HIGH_SCORE_THRESHOLD: u8 = 85;
pub const STANDARD_MARGIN: u8 = 10;
pub const HIGH_SCORE_MARGIN: u8 = 5;

pub fn min_improvement(original_score: u8) -> u8 {
    if original_score >= HIGH_SCORE_THRESHOLD {
        HIGH_SCORE_MARGIN
    } else {
        STANDARD_MARGIN
    }
}

/// Returns the improved score to report. Unchanged when the candidate already
/// clears the margin.
pub fn enforce_min_improvement(original_score: u8, candidate: u8) -> u8 {
    let margin = min_improvement(original_score);
    let clears = candidate > original_score && candidate - original_score >= margin;
    if clears {
        candidate
    } else {
        original_score.saturating_add(margin).min(MAX_SCORE)
    }
}

/// Builds the final comparison from two score snapshots, enforcing the margin.
pub fn compare(
    original: &ScoreSnapshot,
    improved: &ScoreSnapshot,
    improvements: Vec<String>,
    addressed_weaknesses: Vec<String>,
) -> ComparativeAnalysis {
    let original_score = original.score.min(MAX_SCORE);
    let improved_score = enforce_min_improvement(original_score, improved.score.min(MAX_SCORE));

    if improved_score != improved.score {
        tracing::info!(
            "Adjusted improved score {} -> {} to keep the minimum improvement over {}",
            improved.score,
            improved_score,
            original_score
        );
    }

    ComparativeAnalysis {
        original_score,
        improved_score,
        score_difference: improved_score as i32 - original_score as i32,
        original_persuasiveness: original.persuasive_strength,
        improved_persuasiveness: improved.persuasive_strength,
        persuasiveness_difference: improved.persuasive_strength as i32
            - original.persuasive_strength as i32,
        improvements,
        addressed_weaknesses,
    }
}

/// Strengths the improved text gained and weaknesses it shed, for when the
/// model did not list them itself. Exact string match, order preserved.
pub fn diff_feedback(
    original: &ScoreSnapshot,
    improved: &ScoreSnapshot,
) -> (Vec<String>, Vec<String>) {
    let gained = improved
        .strengths
        .iter()
        .filter(|s| !original.strengths.contains(s))
        .cloned()
        .collect();
    let addressed = original
        .weaknesses
        .iter()
        .filter(|w| !improved.weaknesses.contains(w))
        .cloned()
        .collect();
    (gained, addressed)
}
