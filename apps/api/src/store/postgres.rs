use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::analysis::{AnalysisRecord, AnalysisRow, NewAnalysis};
use crate::models::feedback::{FeedbackRecord, FeedbackRow, NewFeedback};
use crate::store::{AnalysisStore, FeedbackStore, StoreError};

/// Postgres-backed store. Schema lives in `migrations/`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn feedback_record(row: FeedbackRow) -> Result<FeedbackRecord, StoreError> {
    let id = row.id;
    row.into_record()
        .ok_or_else(|| StoreError::Backend(format!("feedback row {id} is malformed")))
}

#[async_trait]
impl AnalysisStore for PgStore {
    async fn create_analysis(&self, new: NewAnalysis) -> Result<AnalysisRecord, StoreError> {
        let row = sqlx::query_as::<_, AnalysisRow>(
            r#"
            INSERT INTO analyses (id, user_id, text, industry_model_id, results)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, text, industry_model_id, results, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(&new.text)
        .bind(&new.industry_model_id)
        .bind(Json(&new.results))
        .fetch_one(&self.pool)
        .await?;

        info!("Inserted analysis {} for user {}", row.id, row.user_id);
        Ok(row.into())
    }

    async fn find_analyses_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AnalysisRecord>, StoreError> {
        let rows = sqlx::query_as::<_, AnalysisRow>(
            "SELECT * FROM analyses WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AnalysisRecord::from).collect())
    }

    async fn find_analysis(&self, id: Uuid) -> Result<Option<AnalysisRecord>, StoreError> {
        let row = sqlx::query_as::<_, AnalysisRow>("SELECT * FROM analyses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(AnalysisRecord::from))
    }

    async fn delete_analysis(&self, id: Uuid) -> Result<(), StoreError> {
        // feedback rows go with it (ON DELETE CASCADE)
        sqlx::query("DELETE FROM analyses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        info!("Deleted analysis {id}");
        Ok(())
    }
}

#[async_trait]
impl FeedbackStore for PgStore {
    async fn create_feedback(&self, new: NewFeedback) -> Result<FeedbackRecord, StoreError> {
        let row = sqlx::query_as::<_, FeedbackRow>(
            r#"
            INSERT INTO feedback
                (id, user_id, analysis_id, rating, comment, model_id, suggestion_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.analysis_id)
        .bind(new.rating as i16)
        .bind(&new.comment)
        .bind(&new.model_id)
        .bind(new.suggestion_type.as_str())
        .fetch_one(&self.pool)
        .await?;

        feedback_record(row)
    }

    async fn find_feedback_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FeedbackRecord>, StoreError> {
        let rows = sqlx::query_as::<_, FeedbackRow>(
            "SELECT * FROM feedback WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(feedback_record).collect()
    }
}
