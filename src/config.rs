use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryConfig {
    /// Rating every topic starts from.
    pub base_rating: f64,
    /// Rating gained per positive mark of a correctly answered question.
    pub gain_per_mark: f64,
    /// Rating lost per penalty mark of a wrong or partial answer.
    pub loss_per_mark: f64,
    /// Flat bonus for topics the user has completed or is revising.
    pub progress_bonus: f64,
}

impl Default for MasteryConfig {
    fn default() -> Self {
        Self {
            base_rating: 1000.0,
            gain_per_mark: 12.0,
            loss_per_mark: 15.0,
            progress_bonus: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionConfig {
    /// Memory stability in days for a topic never revised.
    pub stability_base_days: f64,
    /// Stability extension per manual revision (0.5 = +50% each).
    pub revision_stability_bonus: f64,
    /// Below this percentage retention is critical.
    pub critical_below: i64,
    /// Below this percentage (and at or above critical) retention is fading.
    pub fading_below: i64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            stability_base_days: 7.0,
            revision_stability_bonus: 0.5,
            critical_below: 50,
            fading_below: 80,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastConfig {
    /// Monte Carlo sample count.
    pub samples: usize,
    /// Buckets in the charting histogram.
    pub histogram_buckets: usize,
    /// Bounded wait for the forecast worker before giving up.
    pub timeout_ms: u64,
    /// Depth of the worker's request queue.
    pub channel_capacity: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            samples: 5000,
            histogram_buckets: 40,
            timeout_ms: 5000,
            channel_capacity: 16,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerConfig {
    /// Ease factor floor.
    pub min_ease_factor: f64,
    /// Ease factor deduction on a failed review.
    pub failure_ease_penalty: f64,
    /// Maximum cards handed out per review session.
    pub session_cap: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_ease_factor: 1.3,
            failure_ease_penalty: 0.2,
            session_cap: 20,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionConfig {
    /// Retention percentage below which a topic counts as fading.
    pub fading_threshold_pct: i64,
    /// Retention percentage below which the fading boost doubles.
    pub critical_threshold_pct: i64,
    pub fading_multiplier: f64,
    pub critical_extra_multiplier: f64,
    pub weakness_multiplier: f64,
    pub in_progress_multiplier: f64,
    /// Length cap on the ranked list.
    pub max_items: usize,
}

impl Default for RevisionConfig {
    fn default() -> Self {
        Self {
            fading_threshold_pct: 70,
            critical_threshold_pct: 40,
            fading_multiplier: 5.0,
            critical_extra_multiplier: 2.0,
            weakness_multiplier: 4.0,
            in_progress_multiplier: 2.0,
            max_items: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyConfig {
    /// Accuracy lost per position in the attempt order.
    pub fatigue_step: f64,
    /// Exponent of the panic curve at zero confidence.
    pub panic_exponent_base: f64,
    /// How strongly confidence flattens the panic curve (0-1).
    pub panic_confidence_damping: f64,
    /// Accuracy added per unit of confidence.
    pub confidence_accuracy_bonus: f64,
    /// Scale of one subject's worst-case risk contribution.
    pub risk_scale: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            fatigue_step: 0.05,
            panic_exponent_base: 1.5,
            panic_confidence_damping: 0.5,
            confidence_accuracy_bonus: 0.05,
            risk_scale: 33.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    #[serde(default)]
    pub mastery: MasteryConfig,
    #[serde(default)]
    pub retention: RetentionConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub revision: RevisionConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.mastery.base_rating <= 0.0 {
            return Err("mastery.base_rating must be > 0".to_string());
        }
        if self.mastery.gain_per_mark < 0.0 || self.mastery.loss_per_mark < 0.0 {
            return Err("mastery gain/loss per mark must be >= 0".to_string());
        }
        if self.mastery.progress_bonus < 0.0 {
            return Err("mastery.progress_bonus must be >= 0".to_string());
        }

        if self.retention.stability_base_days <= 0.0 {
            return Err("retention.stability_base_days must be > 0".to_string());
        }
        if self.retention.revision_stability_bonus < 0.0 {
            return Err("retention.revision_stability_bonus must be >= 0".to_string());
        }
        if !(0..=100).contains(&self.retention.critical_below)
            || !(0..=100).contains(&self.retention.fading_below)
        {
            return Err("retention thresholds must be in [0,100]".to_string());
        }
        if self.retention.critical_below > self.retention.fading_below {
            return Err("retention.critical_below must be <= fading_below".to_string());
        }

        if self.forecast.samples == 0 {
            return Err("forecast.samples must be > 0".to_string());
        }
        if self.forecast.histogram_buckets == 0 {
            return Err("forecast.histogram_buckets must be > 0".to_string());
        }
        if self.forecast.timeout_ms == 0 {
            return Err("forecast.timeout_ms must be > 0".to_string());
        }
        if self.forecast.channel_capacity == 0 {
            return Err("forecast.channel_capacity must be > 0".to_string());
        }

        if self.scheduler.min_ease_factor < 1.0 {
            return Err("scheduler.min_ease_factor must be >= 1.0".to_string());
        }
        if self.scheduler.failure_ease_penalty < 0.0 {
            return Err("scheduler.failure_ease_penalty must be >= 0".to_string());
        }
        if self.scheduler.session_cap == 0 {
            return Err("scheduler.session_cap must be > 0".to_string());
        }

        if !(0..=100).contains(&self.revision.critical_threshold_pct)
            || !(0..=100).contains(&self.revision.fading_threshold_pct)
        {
            return Err("revision thresholds must be in [0,100]".to_string());
        }
        if self.revision.critical_threshold_pct > self.revision.fading_threshold_pct {
            return Err(
                "revision.critical_threshold_pct must be <= fading_threshold_pct".to_string(),
            );
        }
        if self.revision.fading_multiplier <= 0.0
            || self.revision.critical_extra_multiplier <= 0.0
            || self.revision.weakness_multiplier <= 0.0
            || self.revision.in_progress_multiplier <= 0.0
        {
            return Err("revision multipliers must be > 0".to_string());
        }
        if self.revision.max_items == 0 {
            return Err("revision.max_items must be > 0".to_string());
        }

        if !(0.0..=1.0).contains(&self.strategy.fatigue_step) {
            return Err("strategy.fatigue_step must be in [0,1]".to_string());
        }
        if self.strategy.panic_exponent_base <= 0.0 {
            return Err("strategy.panic_exponent_base must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.strategy.panic_confidence_damping) {
            return Err("strategy.panic_confidence_damping must be in [0,1]".to_string());
        }
        if self.strategy.confidence_accuracy_bonus < 0.0 {
            return Err("strategy.confidence_accuracy_bonus must be >= 0".to_string());
        }
        if self.strategy.risk_scale <= 0.0 {
            return Err("strategy.risk_scale must be > 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn inverted_retention_thresholds_are_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.retention.critical_below = 90;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_samples_are_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.forecast.samples = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn ease_floor_below_one_is_rejected() {
        let mut cfg = EngineConfig::default();
        cfg.scheduler.min_ease_factor = 0.5;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn config_deserializes_from_partial_json() {
        let raw = r#"{"forecast":{"samples":100,"histogramBuckets":10,"timeoutMs":1000,"channelCapacity":4}}"#;
        let cfg: EngineConfig = serde_json::from_str(raw).unwrap();
        assert_eq!(cfg.forecast.samples, 100);
        assert_eq!(cfg.retention.critical_below, 50);
    }
}
