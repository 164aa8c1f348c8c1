//! Response parser: turns raw model output into typed results.
//!
//! Cascade, each step tried only if the previous one failed:
//! 1. parse the whole payload as JSON → `Trusted`
//! 2. parse the span from the first `{` to the last `}` → `Degraded`
//! 3. (analysis only) substitute `AnalysisResult::canned()` → `Fallback`
//!
//! The model is told to emit bare JSON but does not always comply, so an
//! analysis request always yields something usable. The outcome tag lets
//! callers tell a trusted result from a substituted one.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::negotiation::models::AnalysisResult;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("model output does not match the expected shape: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// How much to trust a parsed value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome<T> {
    /// The payload was clean JSON.
    Trusted(T),
    /// JSON had to be cut out of surrounding prose.
    Degraded { value: T, reason: String },
    /// Nothing usable; a canned value was substituted.
    Fallback { value: T, reason: String },
}

/// Serializable label for a `ParseOutcome` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Trusted,
    Degraded,
    Fallback,
}

impl<T> ParseOutcome<T> {
    pub fn value(&self) -> &T {
        match self {
            ParseOutcome::Trusted(value)
            | ParseOutcome::Degraded { value, .. }
            | ParseOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            ParseOutcome::Trusted(value)
            | ParseOutcome::Degraded { value, .. }
            | ParseOutcome::Fallback { value, .. } => value,
        }
    }

    pub fn source(&self) -> ResultSource {
        match self {
            ParseOutcome::Trusted(_) => ResultSource::Trusted,
            ParseOutcome::Degraded { .. } => ResultSource::Degraded,
            ParseOutcome::Fallback { .. } => ResultSource::Fallback,
        }
    }

    #[cfg(test)]
    pub fn is_fallback(&self) -> bool {
        matches!(self, ParseOutcome::Fallback { .. })
    }
}

/// Steps 1 and 2 of the cascade. Never returns `Fallback`.
pub fn extract_json<T: DeserializeOwned>(raw: &str) -> Result<ParseOutcome<T>, ParseError> {
    let direct_err = match serde_json::from_str::<T>(raw.trim()) {
        Ok(value) => {
            debug!("Parsed full model response as JSON");
            return Ok(ParseOutcome::Trusted(value));
        }
        Err(e) => e,
    };

    let span = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if end > start => &raw[start..=end],
        _ => return Err(ParseError::NoJsonObject),
    };

    let value = serde_json::from_str::<T>(span)?;
    debug!("Extracted JSON object from surrounding model output");
    Ok(ParseOutcome::Degraded {
        value,
        reason: format!("response was not bare JSON: {direct_err}"),
    })
}

/// Full cascade for analysis output.
pub fn parse_analysis(raw: &str) -> ParseOutcome<AnalysisResult> {
    match extract_json::<AnalysisResult>(raw) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Could not parse analysis from model output, using canned result: {e}");
            ParseOutcome::Fallback {
                value: AnalysisResult::canned(),
                reason: e.to_string(),
            }
        }
    }
}
