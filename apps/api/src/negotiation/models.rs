//! Wire and domain types for analysis and improvement results.
//!
//! Field names follow the camelCase the model is asked to emit and the
//! client reads back.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Upper bound for `score` and `persuasiveStrength`.
pub const MAX_SCORE: u8 = 100;

/// Suffix appended to the user's text when no rewrite could be produced.
pub const CANNED_IMPROVEMENT_SUFFIX: &str = "\n\n[This would be an improved version of your text \
    with better structure, more persuasive language, and clearer points. \
    The AI rewrite is temporarily unavailable.]";

/// Structured output of scoring one piece of negotiation text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sentiment: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub persuasive_strength: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weaknesses: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub frameworks_used: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub techniques_identified: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_dynamics: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negotiation_phase: Option<String>,
}

impl AnalysisResult {
    /// Representative result returned when the model's output is unusable.
    pub fn canned() -> Self {
        Self {
            score: 75,
            tone: "Collaborative".to_string(),
            sentiment: "Positive".to_string(),
            persuasive_strength: 70,
            strengths: strings(&[
                "Clear communication of objectives",
                "Professional tone throughout",
                "Good use of supporting evidence",
                "Addresses potential concerns proactively",
            ]),
            weaknesses: strings(&[
                "Could be more concise in some sections",
                "Missing specific examples in key areas",
                "Some arguments could be stronger",
                "Limited use of persuasive techniques",
            ]),
            suggestions: strings(&[
                "Add more specific data points to strengthen your position",
                "Consider addressing the timeline more explicitly",
                "Include a clearer call to action at the end",
                "Incorporate more reciprocity principles to build rapport",
            ]),
            frameworks_used: strings(&[
                "Interest-based negotiation",
                "Harvard Principled Negotiation",
                "BATNA (Best Alternative To a Negotiated Agreement)",
            ]),
            techniques_identified: strings(&[
                "Tactical empathy",
                "Mirroring",
                "Calibrated questions",
                "Strategic silence",
            ]),
            power_dynamics: Some("Balanced with slight advantage to counterparty".to_string()),
            negotiation_phase: Some("Bargaining".to_string()),
        }
    }
}

/// The subset of an analysis the comparison needs. Also the shape of
/// `originalAnalysis` / `improvedAnalysis` in the combined response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSnapshot {
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
    #[serde(deserialize_with = "deserialize_score")]
    pub persuasive_strength: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub weaknesses: Vec<String>,
}

impl From<&AnalysisResult> for ScoreSnapshot {
    fn from(analysis: &AnalysisResult) -> Self {
        Self {
            score: analysis.score,
            persuasive_strength: analysis.persuasive_strength,
            strengths: analysis.strengths.clone(),
            weaknesses: analysis.weaknesses.clone(),
        }
    }
}

/// The single JSON object the combined prompt asks for.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedAnalysis {
    pub original_analysis: ScoreSnapshot,
    pub improved_text: String,
    pub improved_analysis: ScoreSnapshot,
    #[serde(default, deserialize_with = "null_as_default")]
    pub improvements: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub addressed_weaknesses: Vec<String>,
}

/// Before/after comparison produced by one improvement request.
///
/// `improved_score - original_score` is at least the minimum improvement
/// margin unless the improved score is capped at 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparativeAnalysis {
    pub original_score: u8,
    pub improved_score: u8,
    pub score_difference: i32,
    pub original_persuasiveness: u8,
    pub improved_persuasiveness: u8,
    pub persuasiveness_difference: i32,
    pub improvements: Vec<String>,
    pub addressed_weaknesses: Vec<String>,
}

impl ComparativeAnalysis {
    /// Fixed comparison for the last-resort tier. Satisfies the margin (75 → 90).
    pub fn canned() -> Self {
        Self {
            original_score: 75,
            improved_score: 90,
            score_difference: 15,
            original_persuasiveness: 70,
            improved_persuasiveness: 85,
            persuasiveness_difference: 15,
            improvements: strings(&[
                "Better framing of value proposition",
                "Stronger call to action",
            ]),
            addressed_weaknesses: strings(&["Lack of specific details", "Weak opening"]),
        }
    }
}

/// Which strategy produced an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImprovementTier {
    /// One combined analyze-improve-analyze call.
    Combined,
    /// Analyze, improve, analyze as three separate calls.
    Sequential,
    /// No model output was usable; fixed values.
    Canned,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementOutcome {
    pub improved_text: String,
    pub comparative_analysis: ComparativeAnalysis,
    pub tier: ImprovementTier,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts any JSON number (or numeric string), rounds it, and clamps it
/// into 0..=100. Anything else is a deserialization error.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let raw = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };

    match raw {
        Some(n) if n.is_finite() => Ok(n.round().clamp(0.0, MAX_SCORE as f64) as u8),
        _ => Err(serde::de::Error::custom(format!(
            "expected a numeric score, got {value}"
        ))),
    }
}
