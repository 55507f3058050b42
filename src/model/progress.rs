use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TopicStatus {
    NotStarted,
    InProgress,
    Completed,
    Revising,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrengthTag {
    Strength,
    Weakness,
}

/// User-maintained study state for one syllabus topic. Mutated only by
/// explicit user action; `revision_count` is never auto-decremented.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicProgress {
    pub status: TopicStatus,
    pub strength: Option<StrengthTag>,
    pub revision_count: u32,
    #[serde(default)]
    pub subtopics: HashMap<String, bool>,
}

impl Default for TopicProgress {
    fn default() -> Self {
        Self {
            status: TopicStatus::NotStarted,
            strength: None,
            revision_count: 0,
            subtopics: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeightageTier {
    High,
    Medium,
    Low,
}

impl WeightageTier {
    pub fn base_weight(self) -> f64 {
        match self {
            Self::High => 3.0,
            Self::Medium => 2.0,
            Self::Low => 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusTopic {
    pub name: String,
    pub subject: String,
    pub weightage: WeightageTier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weightage_ordering() {
        assert!(WeightageTier::High.base_weight() > WeightageTier::Medium.base_weight());
        assert!(WeightageTier::Medium.base_weight() > WeightageTier::Low.base_weight());
    }

    #[test]
    fn default_progress_is_untouched() {
        let p = TopicProgress::default();
        assert_eq!(p.status, TopicStatus::NotStarted);
        assert!(p.strength.is_none());
        assert_eq!(p.revision_count, 0);
    }
}
