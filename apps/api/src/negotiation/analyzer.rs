//! Analysis: scores one piece of negotiation text.
//!
//! Flow: validate → build analysis prompt → gateway → parser cascade.
//! A gateway failure degrades to the canned result instead of failing the
//! request; only empty input is an error.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{CompletionGateway, CompletionRequest, GatewayError};
use crate::negotiation::industry::IndustryModel;
use crate::negotiation::models::AnalysisResult;
use crate::negotiation::parser::{parse_analysis, ParseOutcome};
use crate::negotiation::prompts::build_analysis_prompt;

pub const ANALYSIS_TEMPERATURE: f32 = 0.3;
pub const ANALYSIS_MAX_TOKENS: u32 = 1500;

/// Rejects empty or whitespace-only text before any gateway call.
pub fn validate_text(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    Ok(())
}

/// One analysis call. Gateway errors are returned; parse failures are
/// absorbed into `ParseOutcome::Fallback`.
pub async fn request_analysis(
    gateway: &dyn CompletionGateway,
    text: &str,
    industry: IndustryModel,
) -> Result<ParseOutcome<AnalysisResult>, GatewayError> {
    let request = CompletionRequest {
        system_prompt: build_analysis_prompt(industry),
        user_text: text.to_string(),
        temperature: ANALYSIS_TEMPERATURE,
        max_tokens: ANALYSIS_MAX_TOKENS,
        json_mode: true,
    };

    let raw = gateway.complete(&request).await?;
    Ok(parse_analysis(&raw))
}

/// Analyzes `text` for the given industry. Always yields a result for
/// non-empty input.
pub async fn analyze_text(
    gateway: &dyn CompletionGateway,
    text: &str,
    industry: IndustryModel,
) -> Result<ParseOutcome<AnalysisResult>, AppError> {
    validate_text(text)?;

    info!(
        "Analyzing {} chars for {}",
        text.len(),
        industry.display_name()
    );

    match request_analysis(gateway, text, industry).await {
        Ok(outcome) => {
            info!(
                "Analysis complete: score={} source={:?}",
                outcome.value().score,
                outcome.source()
            );
            Ok(outcome)
        }
        Err(e) => {
            warn!("Analysis LLM call failed, using canned result: {e}");
            Ok(ParseOutcome::Fallback {
                value: AnalysisResult::canned(),
                reason: e.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::scripted::ScriptedGateway;
    use crate::negotiation::parser::ResultSource;

    const SALES_REPLY: &str = r#"{
        "score": 38,
        "tone": "Aggressive",
        "sentiment": "Negative",
        "persuasiveStrength": 30,
        "strengths": ["States a concrete number", "Clear walk-away point"],
        "weaknesses": ["Ultimatum framing", "No rationale for the figure", "No relationship building"],
        "suggestions": ["Justify the $5000 with market data", "Offer options", "Invite a response"],
        "frameworksUsed": ["BATNA"],
        "techniquesIdentified": [],
        "powerDynamics": "Speaker asserts leverage without evidence",
        "negotiationPhase": "Bargaining"
    }"#;

    #[tokio::test]
    async fn test_empty_text_is_rejected_without_gateway_call() {
        let gateway = ScriptedGateway::new().then_text(SALES_REPLY);
        for text in ["", "   ", "\n\t"] {
            let err = analyze_text(&gateway, text, IndustryModel::Sales)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_sales_scenario_produces_bounded_result() {
        let gateway = ScriptedGateway::new().then_text(SALES_REPLY);
        let outcome = analyze_text(&gateway, "I want $5000 or I walk.", IndustryModel::Sales)
            .await
            .unwrap();

        assert_eq!(outcome.source(), ResultSource::Trusted);
        let result = outcome.value();
        assert!(result.score <= 100);
        assert!(result.persuasive_strength <= 100);
        assert!(!result.strengths.is_empty());
        assert!(!result.weaknesses.is_empty());
        assert!(!result.suggestions.is_empty());

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].user_text, "I want $5000 or I walk.");
        assert!(calls[0].json_mode);
        assert!(calls[0].system_prompt.contains("sales and pricing negotiations"));
    }

    #[tokio::test]
    async fn test_gateway_failure_yields_canned_fallback() {
        let gateway = ScriptedGateway::new().then_fail("provider down");
        let outcome = analyze_text(&gateway, "Can we meet at 4%?", IndustryModel::General)
            .await
            .unwrap();
        assert!(outcome.is_fallback());
        assert_eq!(outcome.value().score, 75);
    }

    #[tokio::test]
    async fn test_request_analysis_surfaces_gateway_error() {
        let gateway = ScriptedGateway::new().then_fail("timeout");
        let result = request_analysis(&gateway, "Offer", IndustryModel::Legal).await;
        assert!(result.is_err());
    }
}
