//! Axum route handlers for the Feedback API.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::{AppError, AppJson};
use crate::feedback::stats::{compute_feedback_stats, FeedbackStats};
use crate::models::feedback::{FeedbackRecord, NewFeedback, SuggestionType};
use crate::negotiation::handlers::load_owned_analysis;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    pub analysis_id: Option<Uuid>,
    pub rating: Option<i64>,
    pub comment: Option<String>,
    pub model_id: Option<String>,
    pub suggestion_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackListResponse {
    pub count: usize,
    pub feedback: Vec<FeedbackRecord>,
}

/// Checks field presence and ranges without touching the store.
fn validate_submission(
    request: SubmitFeedbackRequest,
    user_id: Uuid,
) -> Result<NewFeedback, AppError> {
    let analysis_id = request
        .analysis_id
        .ok_or_else(|| AppError::Validation("analysisId is required".to_string()))?;

    let rating = request
        .rating
        .filter(|r| (1..=5).contains(r))
        .and_then(|r| u8::try_from(r).ok())
        .ok_or_else(|| AppError::Validation("Rating must be between 1 and 5".to_string()))?;

    let model_id = request
        .model_id
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::Validation("modelId is required".to_string()))?;

    let suggestion_type = request
        .suggestion_type
        .as_deref()
        .and_then(SuggestionType::parse)
        .ok_or_else(|| {
            AppError::Validation(
                "suggestionType must be 'analysis' or 'improvement'".to_string(),
            )
        })?;

    let comment = request
        .comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    Ok(NewFeedback {
        user_id,
        analysis_id,
        rating,
        comment,
        model_id,
        suggestion_type,
    })
}

/// POST /api/v1/feedback
pub async fn handle_submit_feedback(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(request): AppJson<SubmitFeedbackRequest>,
) -> Result<(StatusCode, Json<FeedbackRecord>), AppError> {
    let new = validate_submission(request, user_id)?;
    load_owned_analysis(state.store.as_ref(), new.analysis_id, user_id).await?;

    let record = state.store.create_feedback(new).await?;
    info!(
        "Recorded {}-star {} feedback on analysis {}",
        record.rating,
        record.suggestion_type.as_str(),
        record.analysis_id
    );

    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/v1/feedback
pub async fn handle_list_feedback(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<FeedbackListResponse>, AppError> {
    let feedback = state.store.find_feedback_by_user(user_id).await?;
    Ok(Json(FeedbackListResponse {
        count: feedback.len(),
        feedback,
    }))
}

/// GET /api/v1/feedback/stats
pub async fn handle_feedback_stats(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<FeedbackStats>, AppError> {
    let feedback = state.store.find_feedback_by_user(user_id).await?;
    Ok(Json(compute_feedback_stats(&feedback)))
}
