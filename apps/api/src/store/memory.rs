use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::analysis::{AnalysisRecord, NewAnalysis};
use crate::models::feedback::{FeedbackRecord, NewFeedback};
use crate::store::{AnalysisStore, FeedbackStore, StoreError};

/// Process-local store. Records are kept in insertion order, so "newest
/// first" is reverse iteration. Data is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    analyses: RwLock<Vec<AnalysisRecord>>,
    feedback: RwLock<Vec<FeedbackRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AnalysisStore for MemoryStore {
    async fn create_analysis(&self, new: NewAnalysis) -> Result<AnalysisRecord, StoreError> {
        let record = AnalysisRecord {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            text: new.text,
            industry_model_id: new.industry_model_id,
            results: new.results,
            created_at: Utc::now(),
        };
        self.analyses.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_analyses_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<AnalysisRecord>, StoreError> {
        Ok(self
            .analyses
            .read()
            .await
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_analysis(&self, id: Uuid) -> Result<Option<AnalysisRecord>, StoreError> {
        Ok(self
            .analyses
            .read()
            .await
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn delete_analysis(&self, id: Uuid) -> Result<(), StoreError> {
        self.analyses.write().await.retain(|a| a.id != id);
        self.feedback.write().await.retain(|f| f.analysis_id != id);
        Ok(())
    }
}

#[async_trait]
impl FeedbackStore for MemoryStore {
    async fn create_feedback(&self, new: NewFeedback) -> Result<FeedbackRecord, StoreError> {
        let record = FeedbackRecord {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            analysis_id: new.analysis_id,
            rating: new.rating,
            comment: new.comment,
            model_id: new.model_id,
            suggestion_type: new.suggestion_type,
            created_at: Utc::now(),
        };
        self.feedback.write().await.push(record.clone());
        Ok(record)
    }

    async fn find_feedback_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<FeedbackRecord>, StoreError> {
        Ok(self
            .feedback
            .read()
            .await
            .iter()
            .rev()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feedback::SuggestionType;
    use crate::negotiation::models::AnalysisResult;

    fn new_analysis(user_id: Uuid, text: &str) -> NewAnalysis {
        NewAnalysis {
            user_id,
            text: text.to_string(),
            industry_model_id: "general".to_string(),
            results: AnalysisResult::canned(),
        }
    }

    #[tokio::test]
    async fn test_analyses_listed_newest_first_per_user() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        store.create_analysis(new_analysis(alice, "first")).await.unwrap();
        store.create_analysis(new_analysis(bob, "other")).await.unwrap();
        store.create_analysis(new_analysis(alice, "second")).await.unwrap();

        let listed = store.find_analyses_by_user(alice).await.unwrap();
        let texts: Vec<_> = listed.iter().map(|a| a.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_delete_removes_analysis_and_its_feedback() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let record = store.create_analysis(new_analysis(user, "x")).await.unwrap();
        store
            .create_feedback(NewFeedback {
                user_id: user,
                analysis_id: record.id,
                rating: 4,
                comment: None,
                model_id: "general".to_string(),
                suggestion_type: SuggestionType::Analysis,
            })
            .await
            .unwrap();

        store.delete_analysis(record.id).await.unwrap();

        assert!(store.find_analysis(record.id).await.unwrap().is_none());
        assert!(store.find_feedback_by_user(user).await.unwrap().is_empty());
    }
}
