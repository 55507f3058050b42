//! Revision triage: turns retention estimates and user-tagged study state
//! into a short, ordered list of topics to revise next.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{RetentionConfig, RevisionConfig};
use crate::engine::retention::{self, RetentionStatus};
use crate::model::{StrengthTag, SyllabusTopic, TopicStatus};
use crate::snapshot::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RevisionReason {
    FadingMemory,
    MarkedWeakness,
    InProgress,
}

impl RevisionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FadingMemory => "Fading Memory",
            Self::MarkedWeakness => "Marked Weakness",
            Self::InProgress => "In Progress",
        }
    }
}

impl std::fmt::Display for RevisionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionAdvice {
    pub topic: String,
    pub weight: f64,
    pub reason: RevisionReason,
}

/// Rank syllabus topics by revision urgency.
///
/// Each topic is scored by the first matching rule only (no stacking):
/// fading memory, then marked weakness, then in-progress. Topics matching
/// nothing are excluded. Dormant topics skip the fading rule; memory that
/// was never built cannot fade.
pub fn rank(
    syllabus: &[SyllabusTopic],
    snapshot: &Snapshot,
    now: DateTime<Utc>,
    retention_config: &RetentionConfig,
    config: &RevisionConfig,
) -> Vec<RevisionAdvice> {
    let mut ranked: Vec<RevisionAdvice> = syllabus
        .iter()
        .filter_map(|topic| {
            let base = topic.weightage.base_weight();
            let progress = snapshot.topic_progress(&topic.name);
            let outlook = retention::retention(&topic.name, snapshot, now, retention_config);

            let tested_and_fading = outlook.status != RetentionStatus::Dormant
                && outlook.percentage < config.fading_threshold_pct;

            let (weight, reason) = if tested_and_fading {
                let urgency = if outlook.percentage < config.critical_threshold_pct {
                    config.critical_extra_multiplier
                } else {
                    1.0
                };
                (
                    base * config.fading_multiplier * urgency,
                    RevisionReason::FadingMemory,
                )
            } else if progress.strength == Some(StrengthTag::Weakness) {
                (base * config.weakness_multiplier, RevisionReason::MarkedWeakness)
            } else if progress.status == TopicStatus::InProgress {
                (base * config.in_progress_multiplier, RevisionReason::InProgress)
            } else {
                return None;
            };

            Some(RevisionAdvice {
                topic: topic.name.clone(),
                weight,
                reason,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap_or(Ordering::Equal));
    ranked.truncate(config.max_items);

    if ranked.is_empty() {
        // Nothing is urgent; surface whatever is actively being studied so
        // the list is never silently empty for an active user.
        ranked = syllabus
            .iter()
            .filter(|t| snapshot.topic_progress(&t.name).status == TopicStatus::InProgress)
            .take(config.max_items)
            .map(|t| RevisionAdvice {
                topic: t.name.clone(),
                weight: 1.0,
                reason: RevisionReason::InProgress,
            })
            .collect();
    }

    ranked
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::TimeZone;

    use crate::model::{
        MarkingScheme, OutcomeStatus, QuestionOutcome, SubjectResult, TestAttempt, TopicProgress,
        TotalResult, WeightageTier,
    };

    use super::*;

    fn topic(name: &str, weightage: WeightageTier) -> SyllabusTopic {
        SyllabusTopic {
            name: name.to_string(),
            subject: "Physics".to_string(),
            weightage,
        }
    }

    fn progress(status: TopicStatus, strength: Option<StrengthTag>) -> TopicProgress {
        TopicProgress {
            status,
            strength,
            revision_count: 0,
            subtopics: HashMap::new(),
        }
    }

    fn tested_snapshot(topic_name: &str, days_ago: i64, now: DateTime<Utc>) -> Snapshot {
        let date = now - chrono::Duration::days(days_ago);
        let attempt = TestAttempt {
            id: "t1".to_string(),
            name: "mock".to_string(),
            date,
            subjects: vec![SubjectResult {
                subject: "Physics".to_string(),
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
        };
        let outcome = QuestionOutcome {
            id: "q1".to_string(),
            attempt_id: "t1".to_string(),
            subject: "Physics".to_string(),
            topic: topic_name.to_string(),
            scheme: Some(MarkingScheme::default()),
            scheme_label: None,
            status: OutcomeStatus::FullyCorrect,
            marks_awarded: 4.0,
            confidence: None,
            error_reason: None,
        };
        Snapshot::new(vec![attempt], vec![outcome], HashMap::new())
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn fading_memory_outranks_a_marked_weakness() {
        // Tested 10 days ago with no revisions: retention ~24%, under the
        // critical threshold, so the fading boost doubles: 2 * 5 * 2 = 20.
        // The weakness scores 3 * 4 = 12.
        let mut snapshot = tested_snapshot("Rotation", 10, now());
        snapshot.progress.insert(
            "Waves".to_string(),
            progress(TopicStatus::InProgress, Some(StrengthTag::Weakness)),
        );

        let syllabus = vec![
            topic("Rotation", WeightageTier::Medium),
            topic("Waves", WeightageTier::High),
        ];
        let ranked = rank(
            &syllabus,
            &snapshot,
            now(),
            &RetentionConfig::default(),
            &RevisionConfig::default(),
        );

        assert_eq!(ranked[0].topic, "Rotation");
        assert_eq!(ranked[0].reason, RevisionReason::FadingMemory);
        assert_eq!(ranked[1].topic, "Waves");
        assert_eq!(ranked[1].reason, RevisionReason::MarkedWeakness);
        assert!(ranked[0].weight > ranked[1].weight);
    }

    #[test]
    fn first_matching_rule_wins_without_stacking() {
        // A fading topic that is ALSO marked weak and in progress must be
        // tagged with the fading reason only.
        let mut snapshot = tested_snapshot("Rotation", 10, now());
        snapshot.progress.insert(
            "Rotation".to_string(),
            progress(TopicStatus::InProgress, Some(StrengthTag::Weakness)),
        );

        let syllabus = vec![topic("Rotation", WeightageTier::Medium)];
        let ranked = rank(
            &syllabus,
            &snapshot,
            now(),
            &RetentionConfig::default(),
            &RevisionConfig::default(),
        );

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].reason, RevisionReason::FadingMemory);
    }

    #[test]
    fn dormant_topics_do_not_fade() {
        let snapshot = Snapshot::default();
        let syllabus = vec![topic("Rotation", WeightageTier::High)];
        let ranked = rank(
            &syllabus,
            &snapshot,
            now(),
            &RetentionConfig::default(),
            &RevisionConfig::default(),
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn recently_tested_topics_are_excluded() {
        let snapshot = tested_snapshot("Rotation", 1, now());
        let syllabus = vec![topic("Rotation", WeightageTier::High)];
        let ranked = rank(
            &syllabus,
            &snapshot,
            now(),
            &RetentionConfig::default(),
            &RevisionConfig::default(),
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn list_is_capped() {
        let mut snapshot = Snapshot::default();
        let mut syllabus = Vec::new();
        for i in 0..8 {
            let name = format!("Topic {i}");
            snapshot.progress.insert(
                name.clone(),
                progress(TopicStatus::NotStarted, Some(StrengthTag::Weakness)),
            );
            syllabus.push(topic(&name, WeightageTier::Medium));
        }

        let ranked = rank(
            &syllabus,
            &snapshot,
            now(),
            &RetentionConfig::default(),
            &RevisionConfig::default(),
        );
        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn in_progress_topic_matches_the_last_rule() {
        let mut snapshot = Snapshot::default();
        snapshot
            .progress
            .insert("Waves".to_string(), progress(TopicStatus::InProgress, None));
        let syllabus = vec![topic("Waves", WeightageTier::Low)];
        let ranked = rank(
            &syllabus,
            &snapshot,
            now(),
            &RetentionConfig::default(),
            &RevisionConfig::default(),
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].reason, RevisionReason::InProgress);
        assert_eq!(
            ranked[0].weight,
            WeightageTier::Low.base_weight() * RevisionConfig::default().in_progress_multiplier
        );
    }
}
