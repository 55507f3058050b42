//! Structured marking schemes, plus the legacy label parser kept as a
//! boundary adapter for question-type strings like `"MCQ (+4, -1)"`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

const DEFAULT_CORRECT_MARKS: f64 = 4.0;
const DEFAULT_WRONG_PENALTY: f64 = 1.0;

static SCHEME_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(\s*\+?\s*(\d+(?:\.\d+)?)\s*,\s*-?\s*(\d+(?:\.\d+)?)\s*\)")
        .expect("marking-scheme label regex")
});

/// Marks awarded for a fully correct answer and the penalty magnitude for a
/// wrong one. `wrong` is always stored as a non-negative magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkingScheme {
    pub correct: f64,
    pub wrong: f64,
}

impl Default for MarkingScheme {
    fn default() -> Self {
        Self {
            correct: DEFAULT_CORRECT_MARKS,
            wrong: DEFAULT_WRONG_PENALTY,
        }
    }
}

impl MarkingScheme {
    pub fn new(correct: f64, wrong: f64) -> Self {
        Self {
            correct,
            wrong: wrong.abs(),
        }
    }

    /// Extract a scheme from a legacy question-type label. Malformed or
    /// schemeless labels fall back to the default scheme instead of erroring.
    pub fn parse_label(label: &str) -> Self {
        match SCHEME_LABEL.captures(label) {
            Some(caps) => {
                let correct = caps[1].parse().unwrap_or(DEFAULT_CORRECT_MARKS);
                let wrong = caps[2].parse().unwrap_or(DEFAULT_WRONG_PENALTY);
                Self { correct, wrong }
            }
            None => {
                tracing::debug!(label, "No marking scheme in label, using default");
                Self::default()
            }
        }
    }
}
