//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::{AppError, AppJson};
use crate::models::analysis::{AnalysisRecord, NewAnalysis};
use crate::negotiation::analyzer::analyze_text;
use crate::negotiation::improver::improve_text;
use crate::negotiation::industry::IndustryModel;
use crate::negotiation::models::{ComparativeAnalysis, ImprovementTier};
use crate::negotiation::parser::ResultSource;
use crate::state::AppState;
use crate::store::Store;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Body for both analyze and improve. A missing `text` is treated as empty
/// so it fails validation with a 400 rather than a deserialization error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationTextRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub industry_model_id: Option<String>,
}

impl NegotiationTextRequest {
    fn industry(&self) -> IndustryModel {
        self.industry_model_id
            .as_deref()
            .map(IndustryModel::from_tag)
            .unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub analysis: AnalysisRecord,
    pub source: ResultSource,
}

#[derive(Debug, Serialize)]
pub struct AnalysisListResponse {
    pub count: usize,
    pub analyses: Vec<AnalysisRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveResponse {
    pub original_text: String,
    pub improved_text: String,
    pub industry_model_id: IndustryModel,
    pub comparative_analysis: ComparativeAnalysis,
    pub tier: ImprovementTier,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analysis
///
/// Scores the text and stores the result under the caller.
pub async fn handle_create_analysis(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(request): AppJson<NegotiationTextRequest>,
) -> Result<(StatusCode, Json<AnalysisResponse>), AppError> {
    let industry = request.industry();
    let outcome = analyze_text(state.llm.as_ref(), &request.text, industry).await?;
    let source = outcome.source();

    let analysis = state
        .store
        .create_analysis(NewAnalysis {
            user_id,
            text: request.text,
            industry_model_id: industry.tag().to_string(),
            results: outcome.into_value(),
        })
        .await?;

    info!(
        "Stored analysis {} for user {} (source={:?})",
        analysis.id, user_id, source
    );

    Ok((
        StatusCode::CREATED,
        Json(AnalysisResponse { analysis, source }),
    ))
}

/// GET /api/v1/analysis
pub async fn handle_list_analyses(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<AnalysisListResponse>, AppError> {
    let analyses = state.store.find_analyses_by_user(user_id).await?;
    Ok(Json(AnalysisListResponse {
        count: analyses.len(),
        analyses,
    }))
}

/// GET /api/v1/analysis/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisRecord>, AppError> {
    let analysis = load_owned_analysis(state.store.as_ref(), id, user_id).await?;
    Ok(Json(analysis))
}

/// DELETE /api/v1/analysis/:id
pub async fn handle_delete_analysis(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    load_owned_analysis(state.store.as_ref(), id, user_id).await?;
    state.store.delete_analysis(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/analysis/improve
///
/// Returns a rewrite with its before/after comparison. Not persisted.
pub async fn handle_improve(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(request): AppJson<NegotiationTextRequest>,
) -> Result<Json<ImproveResponse>, AppError> {
    let industry = request.industry();
    let outcome = improve_text(state.llm.as_ref(), &request.text, industry).await?;

    info!(
        "Improvement for user {} served by {:?} tier",
        user_id, outcome.tier
    );

    Ok(Json(ImproveResponse {
        original_text: request.text,
        improved_text: outcome.improved_text,
        industry_model_id: industry,
        comparative_analysis: outcome.comparative_analysis,
        tier: outcome.tier,
    }))
}

/// Loads an analysis the caller owns: 404 if absent, 403 if someone else's.
pub async fn load_owned_analysis(
    store: &dyn Store,
    id: Uuid,
    user_id: Uuid,
) -> Result<AnalysisRecord, AppError> {
    let analysis = store
        .find_analysis(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;

    if analysis.user_id != user_id {
        return Err(AppError::Forbidden(
            "Not authorized to access this analysis".to_string(),
        ));
    }

    Ok(analysis)
}
