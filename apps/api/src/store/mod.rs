//! Persistence: the document store behind analyses and feedback.
//!
//! Handlers only see `Arc<dyn Store>`. `PgStore` is used when `DATABASE_URL`
//! is set; `MemoryStore` otherwise and in tests. Each completed request makes
//! at most one create call.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::analysis::{AnalysisRecord, NewAnalysis};
use crate::models::feedback::{FeedbackRecord, NewFeedback};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Backend(String),
}

#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn create_analysis(&self, new: NewAnalysis) -> Result<AnalysisRecord, StoreError>;

    /// Newest first.
    async fn find_analyses_by_user(&self, user_id: Uuid)
        -> Result<Vec<AnalysisRecord>, StoreError>;

    async fn find_analysis(&self, id: Uuid) -> Result<Option<AnalysisRecord>, StoreError>;

    /// Also removes feedback attached to the analysis.
    async fn delete_analysis(&self, id: Uuid) -> Result<(), StoreError>;
}

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    async fn create_feedback(&self, new: NewFeedback) -> Result<FeedbackRecord, StoreError>;

    /// Newest first.
    async fn find_feedback_by_user(&self, user_id: Uuid)
        -> Result<Vec<FeedbackRecord>, StoreError>;
}

/// Everything the HTTP layer needs from persistence.
pub trait Store: AnalysisStore + FeedbackStore {}

impl<T: AnalysisStore + FeedbackStore> Store for T {}
