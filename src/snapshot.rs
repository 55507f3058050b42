//! Immutable view of the store's collections, passed explicitly to every
//! engine query. Nothing here is mutated or persisted; callers replace the
//! whole snapshot when the underlying data changes.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::model::{QuestionOutcome, TestAttempt, TopicProgress};

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub attempts: Vec<TestAttempt>,
    pub outcomes: Vec<QuestionOutcome>,
    pub progress: HashMap<String, TopicProgress>,
}

impl Snapshot {
    pub fn new(
        attempts: Vec<TestAttempt>,
        outcomes: Vec<QuestionOutcome>,
        progress: HashMap<String, TopicProgress>,
    ) -> Self {
        Self {
            attempts,
            outcomes,
            progress,
        }
    }

    pub fn attempt(&self, id: &str) -> Option<&TestAttempt> {
        self.attempts.iter().find(|a| a.id == id)
    }

    /// Attempts in chronological order, oldest first.
    pub fn attempts_by_date(&self) -> Vec<&TestAttempt> {
        let mut sorted: Vec<&TestAttempt> = self.attempts.iter().collect();
        sorted.sort_by_key(|a| a.date);
        sorted
    }

    /// Outcomes for one topic in chronological order of their attempts.
    /// Rows referencing an unknown attempt are kept and sort first, so a
    /// dangling reference never silently drops history.
    pub fn outcomes_for_topic(&self, topic: &str) -> Vec<&QuestionOutcome> {
        let mut matched: Vec<&QuestionOutcome> = self
            .outcomes
            .iter()
            .filter(|o| o.topic == topic)
            .collect();
        matched.sort_by_key(|o| self.attempt(&o.attempt_id).map(|a| a.date));
        matched
    }

    /// Date of the most recent attempt in which the topic was answered.
    pub fn last_interaction(&self, topic: &str) -> Option<DateTime<Utc>> {
        self.outcomes
            .iter()
            .filter(|o| o.topic == topic)
            .filter_map(|o| self.attempt(&o.attempt_id).map(|a| a.date))
            .max()
    }

    /// Study state for a topic; topics the user never touched get the
    /// untouched default.
    pub fn topic_progress(&self, topic: &str) -> TopicProgress {
        self.progress.get(topic).cloned().unwrap_or_default()
    }
}
