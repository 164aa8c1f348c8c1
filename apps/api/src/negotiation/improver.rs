//! Improvement orchestrator: rewrites negotiation text and reports a
//! before/after comparison.
//!
//! Tiers, strictly in order, first success wins:
//! 1. `Combined`: a single JSON call that analyzes, rewrites and re-analyzes
//! 2. `Sequential`: the same three steps as separate calls
//! 3. `Canned`: original text plus a placeholder suffix, fixed comparison
//!
//! A tier that fails is never retried. Only empty input is surfaced as an
//! error; every other failure moves the request down a tier. The minimum
//! improvement margin is enforced on tiers 1 and 2 and holds by construction
//! on tier 3.

use thiserror::Error;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{CompletionGateway, CompletionRequest, GatewayError};
use crate::negotiation::analyzer::{request_analysis, validate_text};
use crate::negotiation::industry::IndustryModel;
use crate::negotiation::models::{
    AnalysisResult, CombinedAnalysis, ComparativeAnalysis, ImprovementOutcome, ImprovementTier,
    ScoreSnapshot, CANNED_IMPROVEMENT_SUFFIX,
};
use crate::negotiation::parser::{extract_json, ParseError, ParseOutcome};
use crate::negotiation::prompts::{build_combined_prompt, build_improvement_prompt};
use crate::negotiation::scoring::{compare, diff_feedback};

pub const COMBINED_TEMPERATURE: f32 = 0.4;
pub const COMBINED_MAX_TOKENS: u32 = 2000;
pub const REWRITE_TEMPERATURE: f32 = 0.4;
pub const REWRITE_MAX_TOKENS: u32 = 1500;

/// Why a tier gave up. Logged, never returned to callers.
#[derive(Debug, Error)]
pub enum ImprovementError {
    #[error("gateway: {0}")]
    Gateway(#[from] GatewayError),

    #[error("parse: {0}")]
    Parse(#[from] ParseError),

    #[error("unusable model output: {0}")]
    Unusable(String),
}

/// Produces an improved rewrite of `text` with its comparison.
pub async fn improve_text(
    gateway: &dyn CompletionGateway,
    text: &str,
    industry: IndustryModel,
) -> Result<ImprovementOutcome, AppError> {
    validate_text(text)?;

    info!("Improving {} chars of {} text", text.len(), industry.tag());

    match combined_attempt(gateway, text, industry).await {
        Ok(outcome) => return Ok(outcome),
        Err(e) => warn!("Combined improvement failed, falling back to sequential calls: {e}"),
    }

    match sequential_attempt(gateway, text, industry).await {
        Ok(outcome) => return Ok(outcome),
        Err(e) => warn!("Sequential improvement failed, returning canned result: {e}"),
    }

    Ok(canned_outcome(text))
}

/// Tier 1: a single JSON call carrying both analyses and the rewrite.
pub async fn combined_attempt(
    gateway: &dyn CompletionGateway,
    text: &str,
    industry: IndustryModel,
) -> Result<ImprovementOutcome, ImprovementError> {
    let request = CompletionRequest {
        system_prompt: build_combined_prompt(industry),
        user_text: text.to_string(),
        temperature: COMBINED_TEMPERATURE,
        max_tokens: COMBINED_MAX_TOKENS,
        json_mode: true,
    };

    let raw = gateway.complete(&request).await?;
    let CombinedAnalysis {
        original_analysis,
        improved_text,
        improved_analysis,
        improvements,
        addressed_weaknesses,
    } = extract_json::<CombinedAnalysis>(&raw)?.into_value();

    let improved_text = improved_text.trim().to_string();
    if improved_text.is_empty() {
        return Err(ImprovementError::Unusable(
            "combined response had no improved text".to_string(),
        ));
    }

    let (gained, addressed) = diff_feedback(&original_analysis, &improved_analysis);
    let comparative = compare(
        &original_analysis,
        &improved_analysis,
        non_empty_or(improvements, gained),
        non_empty_or(addressed_weaknesses, addressed),
    );

    info!(
        "Combined improvement: {} -> {}",
        comparative.original_score, comparative.improved_score
    );

    Ok(ImprovementOutcome {
        improved_text,
        comparative_analysis: comparative,
        tier: ImprovementTier::Combined,
    })
}

/// Tier 2: three sequential calls. The third analyzes the output of the second.
pub async fn sequential_attempt(
    gateway: &dyn CompletionGateway,
    text: &str,
    industry: IndustryModel,
) -> Result<ImprovementOutcome, ImprovementError> {
    let original = require_model_analysis(request_analysis(gateway, text, industry).await?)?;
    let improved_text = request_rewrite(gateway, text, industry).await?;
    let improved =
        require_model_analysis(request_analysis(gateway, &improved_text, industry).await?)?;

    let original = ScoreSnapshot::from(&original);
    let improved = ScoreSnapshot::from(&improved);
    let (gained, addressed) = diff_feedback(&original, &improved);
    let comparative = compare(&original, &improved, gained, addressed);

    info!(
        "Sequential improvement: {} -> {}",
        comparative.original_score, comparative.improved_score
    );

    Ok(ImprovementOutcome {
        improved_text,
        comparative_analysis: comparative,
        tier: ImprovementTier::Sequential,
    })
}

/// Tier 3: always succeeds.
pub fn canned_outcome(text: &str) -> ImprovementOutcome {
    ImprovementOutcome {
        improved_text: format!("{text}{CANNED_IMPROVEMENT_SUFFIX}"),
        comparative_analysis: ComparativeAnalysis::canned(),
        tier: ImprovementTier::Canned,
    }
}

/// Plain-text rewrite call.
async fn request_rewrite(
    gateway: &dyn CompletionGateway,
    text: &str,
    industry: IndustryModel,
) -> Result<String, GatewayError> {
    let request = CompletionRequest {
        system_prompt: build_improvement_prompt(industry),
        user_text: text.to_string(),
        temperature: REWRITE_TEMPERATURE,
        max_tokens: REWRITE_MAX_TOKENS,
        json_mode: false,
    };

    let rewrite = gateway.complete(&request).await?;
    let rewrite = rewrite.trim();
    if rewrite.is_empty() {
        return Err(GatewayError::EmptyContent);
    }
    Ok(rewrite.to_string())
}

/// A canned analysis inside the sequential tier is a parse failure, not a score.
fn require_model_analysis(
    outcome: ParseOutcome<AnalysisResult>,
) -> Result<AnalysisResult, ImprovementError> {
    match outcome {
        ParseOutcome::Fallback { reason, .. } => Err(ImprovementError::Unusable(reason)),
        other => Ok(other.into_value()),
    }
}

fn non_empty_or(listed: Vec<String>, derived: Vec<String>) -> Vec<String> {
    if listed.is_empty() {
        derived
    } else {
        listed
    }
}
