//! Aggregate ratings over a user's feedback.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::feedback::FeedbackRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackStats {
    pub average_rating: f64,
    pub total_feedback: usize,
    pub model_ratings: BTreeMap<String, f64>,
    pub suggestion_type_ratings: BTreeMap<String, f64>,
}

#[derive(Default)]
struct Tally {
    sum: u32,
    count: u32,
}

impl Tally {
    fn add(&mut self, rating: u8) {
        self.sum += u32::from(rating);
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            f64::from(self.sum) / f64::from(self.count)
        }
    }
}

fn means(tallies: BTreeMap<String, Tally>) -> BTreeMap<String, f64> {
    tallies.into_iter().map(|(k, t)| (k, t.mean())).collect()
}

/// Zero average and empty maps when there is no feedback.
pub fn compute_feedback_stats(records: &[FeedbackRecord]) -> FeedbackStats {
    let mut overall = Tally::default();
    let mut by_model: BTreeMap<String, Tally> = BTreeMap::new();
    let mut by_type: BTreeMap<String, Tally> = BTreeMap::new();

    for record in records {
        overall.add(record.rating);
        by_model
            .entry(record.model_id.clone())
            .or_default()
            .add(record.rating);
        by_type
            .entry(record.suggestion_type.as_str().to_string())
            .or_default()
            .add(record.rating);
    }

    FeedbackStats {
        average_rating: overall.mean(),
        total_feedback: records.len(),
        model_ratings: means(by_model),
        suggestion_type_ratings: means(by_type),
    }
}
