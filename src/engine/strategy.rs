//! Exam time-budget "what-if" model.
//!
//! Deterministic and side-effect free; the consuming layer recomputes it on
//! every slider change, so cost stays O(subjects) with no caching.

use serde::{Deserialize, Serialize};

use crate::config::StrategyConfig;
use crate::model::{MarkingScheme, TestAttempt};

/// One subject's slice of the exam plan, in attempt order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectPlan {
    pub subject: String,
    /// Minutes allocated to the subject.
    pub time_alloc_mins: f64,
    /// Questions the student intends to attempt.
    pub attempt_target: u32,
    /// Questions available in the paper.
    pub max_attempts: u32,
    /// Self-assessed confidence, 0-1.
    pub confidence: f64,
    /// Historical accuracy under no time pressure, 0-1.
    pub base_accuracy: f64,
    /// Minutes per question at which accuracy stops degrading.
    pub ideal_time_per_question_mins: f64,
    pub scheme: MarkingScheme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectOutcome {
    pub subject: String,
    pub expected_correct: f64,
    pub expected_wrong: f64,
    pub expected_score: f64,
    pub effective_accuracy: f64,
    pub panic_factor: f64,
    pub fatigue_factor: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyOutcome {
    pub per_subject: Vec<SubjectOutcome>,
    pub total_score: f64,
    /// Aggregate risk, 0-100.
    pub risk_score: f64,
}

/// Score an exam plan. Subject position in `plans` is the attempt order;
/// later subjects take the fatigue penalty.
pub fn simulate(plans: &[SubjectPlan], config: &StrategyConfig) -> StrategyOutcome {
    let mut per_subject = Vec::with_capacity(plans.len());
    let mut total_score = 0.0;
    let mut risk = 0.0;

    for (index, plan) in plans.iter().enumerate() {
        let confidence = plan.confidence.clamp(0.0, 1.0);
        let time_per_question = if plan.attempt_target == 0 {
            0.0
        } else {
            plan.time_alloc_mins / f64::from(plan.attempt_target)
        };

        let panic_factor = panic_factor(
            time_per_question,
            plan.ideal_time_per_question_mins,
            confidence,
            config,
        );
        let fatigue_factor = 1.0 - index as f64 * config.fatigue_step;

        let effective_accuracy = ((plan.base_accuracy
            + confidence * config.confidence_accuracy_bonus)
            * panic_factor
            * fatigue_factor)
            .clamp(0.0, 1.0);

        let attempts = f64::from(plan.attempt_target);
        let expected_correct = attempts * effective_accuracy;
        let expected_wrong = attempts * (1.0 - effective_accuracy);
        let expected_score =
            expected_correct * plan.scheme.correct - expected_wrong * plan.scheme.wrong;

        total_score += expected_score;
        risk += risk_contribution(time_per_question, plan, confidence, config);

        per_subject.push(SubjectOutcome {
            subject: plan.subject.clone(),
            expected_correct,
            expected_wrong,
            expected_score,
            effective_accuracy,
            panic_factor,
            fatigue_factor,
        });
    }

    StrategyOutcome {
        per_subject,
        total_score,
        risk_score: risk.clamp(0.0, 100.0),
    }
}

/// Non-linear accuracy penalty for rushing. Exactly 1 when the plan leaves
/// at least the ideal time per question; below that the penalty curve
/// steepens as confidence drops.
fn panic_factor(
    time_per_question: f64,
    ideal: f64,
    confidence: f64,
    config: &StrategyConfig,
) -> f64 {
    if ideal <= 0.0 || time_per_question >= ideal {
        return 1.0;
    }
    let ratio = time_per_question / ideal;
    let exponent =
        config.panic_exponent_base * (1.0 - confidence * config.panic_confidence_damping);
    ratio.powf(exponent)
}

/// Risk grows with the time deficit, the fraction of the paper attempted,
/// and how unsure the student is. Zero-denominator plans contribute nothing.
fn risk_contribution(
    time_per_question: f64,
    plan: &SubjectPlan,
    confidence: f64,
    config: &StrategyConfig,
) -> f64 {
    if plan.ideal_time_per_question_mins <= 0.0 || plan.max_attempts == 0 {
        return 0.0;
    }
    let time_deficit = ((plan.ideal_time_per_question_mins - time_per_question)
        / plan.ideal_time_per_question_mins)
        .max(0.0);
    let attempt_rate = f64::from(plan.attempt_target) / f64::from(plan.max_attempts);
    time_deficit * attempt_rate * config.risk_scale * (1.0 - confidence)
}

/// Historical accuracy for one subject across the attempt history; `None`
/// when the subject never appears with answered questions.
pub fn suggest_base_accuracy(subject: &str, attempts: &[TestAttempt]) -> Option<f64> {
    let mut answered = 0u32;
    let mut correct = 0u32;

    for attempt in attempts {
        for result in attempt.subjects.iter().filter(|s| s.subject == subject) {
            correct += result.correct;
            answered += result.correct + result.wrong + result.partial;
        }
    }

    if answered == 0 {
        None
    } else {
        Some(f64::from(correct) / f64::from(answered))
    }
}
