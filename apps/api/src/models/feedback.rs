use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// What the rated suggestion was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionType {
    Analysis,
    Improvement,
}

impl SuggestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionType::Analysis => "analysis",
            SuggestionType::Improvement => "improvement",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "analysis" => Some(SuggestionType::Analysis),
            "improvement" => Some(SuggestionType::Improvement),
            _ => None,
        }
    }
}

/// A user's 1–5 rating of one AI suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub analysis_id: Uuid,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub model_id: String,
    pub suggestion_type: SuggestionType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewFeedback {
    pub user_id: Uuid,
    pub analysis_id: Uuid,
    pub rating: u8,
    pub comment: Option<String>,
    pub model_id: String,
    pub suggestion_type: SuggestionType,
}

/// `feedback` table row.
#[derive(Debug, FromRow)]
pub struct FeedbackRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub analysis_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub model_id: String,
    pub suggestion_type: String,
    pub created_at: DateTime<Utc>,
}

impl FeedbackRow {
    /// `None` if the row violates the table's CHECK constraints.
    pub fn into_record(self) -> Option<FeedbackRecord> {
        Some(FeedbackRecord {
            id: self.id,
            user_id: self.user_id,
            analysis_id: self.analysis_id,
            rating: u8::try_from(self.rating).ok()?,
            comment: self.comment,
            model_id: self.model_id,
            suggestion_type: SuggestionType::parse(&self.suggestion_type)?,
            created_at: self.created_at,
        })
    }
}
