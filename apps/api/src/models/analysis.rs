use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::negotiation::models::AnalysisResult;

/// A stored analysis, owned by `user_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub industry_model_id: String,
    pub results: AnalysisResult,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub user_id: Uuid,
    pub text: String,
    pub industry_model_id: String,
    pub results: AnalysisResult,
}

/// `analyses` table row. `results` is JSONB.
#[derive(Debug, FromRow)]
pub struct AnalysisRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub industry_model_id: String,
    pub results: Json<AnalysisResult>,
    pub created_at: DateTime<Utc>,
}

impl From<AnalysisRow> for AnalysisRecord {
    fn from(row: AnalysisRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            text: row.text,
            industry_model_id: row.industry_model_id,
            results: row.results.0,
            created_at: row.created_at,
        }
    }
}
