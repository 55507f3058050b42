use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ease factor assigned to brand-new cards.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Raw review state for one flashcard. Only these fields are persisted by
/// the external store; everything derived from them is recomputed on demand.
/// Mutated exclusively through the scheduler's rating operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashcardState {
    pub id: String,
    pub topic: String,
    pub prompt: String,
    pub interval_days: u32,
    pub ease_factor: f64,
    /// Consecutive successful reviews.
    pub reviews: u32,
    pub next_review: DateTime<Utc>,
}

impl FlashcardState {
    /// Explicitly generated card: due immediately, fresh scheduling state.
    pub fn new(topic: &str, prompt: &str, now: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), topic, prompt, now)
    }

    /// Card keyed by a caller-supplied stable id (e.g. the question outcome
    /// that spawned it).
    pub fn with_id(id: String, topic: &str, prompt: &str, now: DateTime<Utc>) -> Self {
        Self {
            id,
            topic: topic.to_string(),
            prompt: prompt.to_string(),
            interval_days: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            reviews: 0,
            next_review: now,
        }
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review <= now
    }
}
