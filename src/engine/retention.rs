//! Per-topic mastery rating and the forgetting-curve retention estimate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{MasteryConfig, RetentionConfig};
use crate::model::{OutcomeStatus, TopicStatus};
use crate::snapshot::Snapshot;

/// Sentinel `days_since` for topics with no recorded interaction.
pub const NO_INTERACTION_DAYS: i64 = -1;

const SECS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RetentionStatus {
    /// Never tested and never started.
    Dormant,
    /// Theory progress exists but the topic has not been tested yet.
    Fresh,
    Critical,
    Fading,
    Good,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionOutlook {
    /// Estimated recall probability, 0-100.
    pub percentage: i64,
    pub status: RetentionStatus,
    /// Days since the topic was last answered in a test; -1 when never.
    pub days_since: i64,
}

/// ELO-style skill rating for one topic, replayed from its question history
/// in chronological order. High-value questions move the rating more in both
/// directions; finished theory adds a flat bonus. Unclamped: the typical
/// range is 0-2000+ but outliers are legitimate.
pub fn mastery_score(topic: &str, snapshot: &Snapshot, config: &MasteryConfig) -> f64 {
    let mut rating = config.base_rating;

    for outcome in snapshot.outcomes_for_topic(topic) {
        let scheme = outcome.marking_scheme();
        match outcome.status {
            OutcomeStatus::FullyCorrect => rating += config.gain_per_mark * scheme.correct,
            OutcomeStatus::Wrong | OutcomeStatus::PartiallyCorrect => {
                rating -= config.loss_per_mark * scheme.wrong;
            }
            OutcomeStatus::Unanswered => {}
        }
    }

    let status = snapshot.topic_progress(topic).status;
    if matches!(status, TopicStatus::Completed | TopicStatus::Revising) {
        rating += config.progress_bonus;
    }

    rating
}

/// Exponential-decay recall estimate for one topic.
///
/// Stability starts at `stability_base_days` and every manual revision
/// extends it by `revision_stability_bonus`, so active recall keeps pushing
/// the half-life out.
pub fn retention(
    topic: &str,
    snapshot: &Snapshot,
    now: DateTime<Utc>,
    config: &RetentionConfig,
) -> RetentionOutlook {
    let progress = snapshot.topic_progress(topic);

    let Some(last) = snapshot.last_interaction(topic) else {
        if progress.status == TopicStatus::NotStarted {
            return RetentionOutlook {
                percentage: 0,
                status: RetentionStatus::Dormant,
                days_since: NO_INTERACTION_DAYS,
            };
        }
        // Theory-only progress: nothing has decayed because nothing was tested.
        return RetentionOutlook {
            percentage: 100,
            status: RetentionStatus::Fresh,
            days_since: 0,
        };
    };

    let days_since = days_between(last, now);
    let stability = config.stability_base_days
        * (1.0 + progress.revision_count as f64 * config.revision_stability_bonus);
    let recall = (-(days_since as f64) / stability).exp();
    let percentage = (recall * 100.0).round() as i64;

    let status = if percentage < config.critical_below {
        RetentionStatus::Critical
    } else if percentage < config.fading_below {
        RetentionStatus::Fading
    } else {
        RetentionStatus::Good
    };

    RetentionOutlook {
        percentage,
        status,
        days_since,
    }
}

fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let secs = (to - from).num_seconds().abs();
    (secs as f64 / SECS_PER_DAY).ceil() as i64
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{Duration, TimeZone};

    use crate::model::{
        MarkingScheme, QuestionOutcome, SubjectResult, TestAttempt, TopicProgress, TotalResult,
    };

    use super::*;

    fn attempt(id: &str, date: DateTime<Utc>) -> TestAttempt {
        TestAttempt {
            id: id.to_string(),
            name: id.to_string(),
            date,
            subjects: vec![SubjectResult {
                subject: "Maths".to_string(),
                correct: 1,
                wrong: 0,
                partial: 0,
                marks: 4.0,
            }],
            total: TotalResult {
                marks: 4.0,
                rank: 100,
                percentile: None,
            },
        }
    }

    fn outcome(id: &str, attempt_id: &str, status: OutcomeStatus) -> QuestionOutcome {
        QuestionOutcome {
            id: id.to_string(),
            attempt_id: attempt_id.to_string(),
            subject: "Maths".to_string(),
            topic: "Calculus".to_string(),
            scheme: Some(MarkingScheme::new(4.0, 1.0)),
            scheme_label: None,
            status,
            marks_awarded: 0.0,
            confidence: None,
            error_reason: None,
        }
    }

    fn snapshot_with(statuses: &[OutcomeStatus], progress: Option<TopicProgress>) -> Snapshot {
        let date = Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap();
        let outcomes = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| outcome(&format!("q{i}"), "t1", *s))
            .collect();
        let mut progress_map = HashMap::new();
        if let Some(p) = progress {
            progress_map.insert("Calculus".to_string(), p);
        }
        Snapshot::new(vec![attempt("t1", date)], outcomes, progress_map)
    }

    #[test]
    fn correct_answers_raise_the_rating() {
        let snapshot = snapshot_with(&[OutcomeStatus::FullyCorrect], None);
        let cfg = MasteryConfig::default();
        let score = mastery_score("Calculus", &snapshot, &cfg);
        assert_eq!(score, cfg.base_rating + cfg.gain_per_mark * 4.0);
    }

    #[test]
    fn wrong_and_partial_lower_the_rating() {
        let snapshot = snapshot_with(
            &[OutcomeStatus::Wrong, OutcomeStatus::PartiallyCorrect],
            None,
        );
        let cfg = MasteryConfig::default();
        let score = mastery_score("Calculus", &snapshot, &cfg);
        assert_eq!(score, cfg.base_rating - 2.0 * cfg.loss_per_mark);
    }

    #[test]
    fn unanswered_is_neutral() {
        let snapshot = snapshot_with(&[OutcomeStatus::Unanswered], None);
        let cfg = MasteryConfig::default();
        assert_eq!(mastery_score("Calculus", &snapshot, &cfg), cfg.base_rating);
    }

    #[test]
    fn completed_topic_gets_the_bonus() {
        let progress = TopicProgress {
            status: TopicStatus::Completed,
            ..TopicProgress::default()
        };
        let snapshot = snapshot_with(&[], Some(progress));
        let cfg = MasteryConfig::default();
        assert_eq!(
            mastery_score("Calculus", &snapshot, &cfg),
            cfg.base_rating + cfg.progress_bonus
        );
    }

    #[test]
    fn untested_unstarted_topic_is_dormant() {
        let snapshot = Snapshot::default();
        let outlook = retention("Calculus", &snapshot, Utc::now(), &RetentionConfig::default());
        assert_eq!(outlook.status, RetentionStatus::Dormant);
        assert_eq!(outlook.percentage, 0);
        assert_eq!(outlook.days_since, NO_INTERACTION_DAYS);
    }

    #[test]
    fn untested_started_topic_is_fresh() {
        let progress = TopicProgress {
            status: TopicStatus::InProgress,
            ..TopicProgress::default()
        };
        let snapshot = snapshot_with(&[], Some(progress));
        let outlook = retention("Calculus", &snapshot, Utc::now(), &RetentionConfig::default());
        assert_eq!(outlook.status, RetentionStatus::Fresh);
        assert_eq!(outlook.percentage, 100);
        assert_eq!(outlook.days_since, 0);
    }

    #[test]
    fn recall_decays_with_distance() {
        let snapshot = snapshot_with(&[OutcomeStatus::FullyCorrect], None);
        let cfg = RetentionConfig::default();
        let base = Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap();

        let soon = retention("Calculus", &snapshot, base + Duration::days(2), &cfg);
        let later = retention("Calculus", &snapshot, base + Duration::days(21), &cfg);

        assert!(soon.percentage > later.percentage);
        assert_eq!(later.status, RetentionStatus::Critical);
    }

    #[test]
    fn revisions_extend_stability() {
        let fresh = snapshot_with(&[OutcomeStatus::FullyCorrect], None);
        let revised = snapshot_with(
            &[OutcomeStatus::FullyCorrect],
            Some(TopicProgress {
                status: TopicStatus::Revising,
                revision_count: 4,
                ..TopicProgress::default()
            }),
        );
        let cfg = RetentionConfig::default();
        let base = Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap();
        let probe = base + Duration::days(10);

        let without = retention("Calculus", &fresh, probe, &cfg);
        let with = retention("Calculus", &revised, probe, &cfg);
        assert!(with.percentage > without.percentage);
    }

    #[test]
    fn partial_days_round_up() {
        let from = Utc.with_ymd_and_hms(2026, 4, 1, 10, 0, 0).unwrap();
        let to = from + Duration::hours(30);
        assert_eq!(days_between(from, to), 2);
    }
}
