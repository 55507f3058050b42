//! Spaced-repetition scheduling (SM-2 variant) and review-session selection.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::config::SchedulerConfig;
use crate::model::{FlashcardState, OutcomeStatus, QuestionOutcome};

/// Quality at or above this counts as a successful recall.
const PASS_QUALITY: u8 = 3;

/// Apply one review rating and return the card's next state.
///
/// Pure read-modify-write: callers that share cards across tasks must apply
/// the returned state atomically per card. Invalid prior state is clamped
/// (ease below the floor is lifted to it) rather than rejected.
pub fn rate(
    card: &FlashcardState,
    quality: u8,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> FlashcardState {
    let quality = quality.min(5);
    let mut next = card.clone();
    next.ease_factor = next.ease_factor.max(config.min_ease_factor);

    if quality < PASS_QUALITY {
        // Failed recall: restart the ladder and make the card slightly
        // harder to grow.
        next.reviews = 0;
        next.interval_days = 1;
        next.ease_factor =
            (next.ease_factor - config.failure_ease_penalty).max(config.min_ease_factor);
    } else {
        next.reviews = card.reviews + 1;
        let ease = next.ease_factor;
        next.interval_days = match card.interval_days {
            0 => 1,
            1 => 3,
            n => (f64::from(n) * ease).round() as u32,
        };
        let lapse = f64::from(5 - quality);
        next.ease_factor =
            (ease + (0.1 - lapse * (0.08 + lapse * 0.02))).max(config.min_ease_factor);
    }

    next.next_review = now + Duration::days(i64::from(next.interval_days));
    next
}

/// Cards due for review: `next_review <= now`, most overdue first, capped at
/// the session size so one sitting stays bounded.
pub fn due_session(
    cards: &[FlashcardState],
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) -> Vec<FlashcardState> {
    let mut due: Vec<FlashcardState> = cards.iter().filter(|c| c.is_due(now)).cloned().collect();
    due.sort_by_key(|c| c.next_review);
    due.truncate(config.session_cap);
    due
}

/// Mint cards for wrong answers that have no card yet. Card ids reuse the
/// outcome id, so re-running over the same logs is idempotent.
pub fn generate_from_outcomes(
    outcomes: &[QuestionOutcome],
    existing: &[FlashcardState],
    now: DateTime<Utc>,
) -> Vec<FlashcardState> {
    let known: HashSet<&str> = existing.iter().map(|c| c.id.as_str()).collect();

    outcomes
        .iter()
        .filter(|o| {
            o.status == OutcomeStatus::Wrong && o.has_topic() && !known.contains(o.id.as_str())
        })
        .map(|o| {
            let prompt = match o.error_reason {
                Some(reason) => format!("Revisit {} ({})", o.topic, reason.as_str()),
                None => format!("Revisit {}", o.topic),
            };
            FlashcardState::with_id(o.id.clone(), &o.topic, &prompt, now)
        })
        .collect()
}
