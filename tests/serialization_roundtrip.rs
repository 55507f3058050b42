//! Public types cross a JSON boundary into the consuming layer; make sure
//! they survive the trip and keep their camelCase wire shape.

use chrono::{TimeZone, Utc};

use exam_analytics::config::EngineConfig;
use exam_analytics::model::{
    FlashcardState, MarkingScheme, OutcomeStatus, QuestionOutcome, TopicProgress,
};

#[test]
fn outcome_roundtrip_keeps_camel_case() {
    let outcome = QuestionOutcome {
        id: "q1".to_string(),
        attempt_id: "t1".to_string(),
        subject: "Physics".to_string(),
        topic: "Rotation".to_string(),
        scheme: Some(MarkingScheme::new(4.0, 1.0)),
        scheme_label: None,
        status: OutcomeStatus::PartiallyCorrect,
        marks_awarded: 2.0,
        confidence: Some(40),
        error_reason: None,
    };

    let raw = serde_json::to_string(&outcome).unwrap();
    assert!(raw.contains("attemptId"));
    assert!(raw.contains("marksAwarded"));
    assert!(raw.contains("partiallyCorrect"));

    let decoded: QuestionOutcome = serde_json::from_str(&raw).unwrap();
    assert_eq!(decoded.status, outcome.status);
    assert_eq!(decoded.scheme, outcome.scheme);
}

#[test]
fn flashcard_roundtrip_preserves_scheduling_fields() {
    let now = Utc.with_ymd_and_hms(2026, 5, 1, 8, 0, 0).unwrap();
    let mut card = FlashcardState::with_id("q9".to_string(), "Optics", "Revisit Optics", now);
    card.interval_days = 12;
    card.ease_factor = 2.18;
    card.reviews = 4;

    let raw = serde_json::to_string(&card).unwrap();
    assert!(raw.contains("easeFactor"));
    assert!(raw.contains("nextReview"));

    let decoded: FlashcardState = serde_json::from_str(&raw).unwrap();
    assert_eq!(decoded, card);
}

#[test]
fn progress_defaults_fill_missing_fields() {
    let decoded: TopicProgress =
        serde_json::from_str(r#"{"status":"inProgress","strength":null,"revisionCount":3}"#)
            .unwrap();
    assert_eq!(decoded.revision_count, 3);
    assert!(decoded.subtopics.is_empty());
}

#[test]
fn config_roundtrip_is_lossless() {
    let config = EngineConfig::default();
    let raw = serde_json::to_string(&config).unwrap();
    let decoded: EngineConfig = serde_json::from_str(&raw).unwrap();
    assert!(decoded.validate().is_ok());
    assert_eq!(decoded.forecast.samples, config.forecast.samples);
    assert_eq!(decoded.strategy.risk_scale, config.strategy.risk_scale);
}
