use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::marking::MarkingScheme;

/// Topic label used when a question could not be mapped to a syllabus entry.
pub const UNTAGGED_TOPIC: &str = "N/A";

/// One full mock-test sitting. Owned by the data store; the engine only ever
/// reads these.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestAttempt {
    pub id: String,
    pub name: String,
    pub date: DateTime<Utc>,
    pub subjects: Vec<SubjectResult>,
    pub total: TotalResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    pub subject: String,
    pub correct: u32,
    pub wrong: u32,
    pub partial: u32,
    pub marks: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalResult {
    pub marks: f64,
    /// Positive integer, 1 = best.
    pub rank: u32,
    pub percentile: Option<f64>,
}

impl TestAttempt {
    /// Sum of per-subject marks. User corrections may leave this out of sync
    /// with `total.marks`; callers must not assume equality.
    pub fn subject_marks_sum(&self) -> f64 {
        self.subjects.iter().map(|s| s.marks).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OutcomeStatus {
    FullyCorrect,
    Wrong,
    PartiallyCorrect,
    Unanswered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorReason {
    Conceptual,
    Silly,
    Calculation,
    TimePressure,
    NotRevised,
    Other,
}

impl ErrorReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conceptual => "conceptual gap",
            Self::Silly => "silly mistake",
            Self::Calculation => "calculation error",
            Self::TimePressure => "time pressure",
            Self::NotRevised => "not revised",
            Self::Other => "other",
        }
    }
}

/// Per-question outcome log row, tied to one attempt via `attempt_id`.
///
/// Validation rules such as "Wrong implies non-positive marks" are flagged at
/// entry time by the consuming layer but are NOT guaranteed here; the engine
/// tolerates violating rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOutcome {
    pub id: String,
    pub attempt_id: String,
    pub subject: String,
    pub topic: String,
    /// Structured scheme when the producer supplies one.
    pub scheme: Option<MarkingScheme>,
    /// Legacy question-type label, e.g. `"MCQ (+4, -1)"`.
    pub scheme_label: Option<String>,
    pub status: OutcomeStatus,
    pub marks_awarded: f64,
    /// Self-reported confidence, 0-100.
    pub confidence: Option<u8>,
    pub error_reason: Option<ErrorReason>,
}

impl QuestionOutcome {
    /// Resolve the effective marking scheme: structured value first, then the
    /// legacy label, then the default.
    pub fn marking_scheme(&self) -> MarkingScheme {
        if let Some(scheme) = self.scheme {
            return scheme;
        }
        self.scheme_label
            .as_deref()
            .map(MarkingScheme::parse_label)
            .unwrap_or_default()
    }

    pub fn has_topic(&self) -> bool {
        !self.topic.is_empty() && self.topic != UNTAGGED_TOPIC
    }
}
