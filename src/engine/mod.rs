//! The analytics engine facade.
//!
//! Every query takes an explicit [`Snapshot`](crate::snapshot::Snapshot) and
//! recomputes from raw logs; derived numbers (ratings, retention, rankings)
//! are never cached or persisted, so they cannot go stale.

pub mod flashcards;
pub mod forecast;
mod forecast_worker;
pub mod retention;
pub mod revision;
pub mod strategy;
pub mod tier;

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot, RwLock};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::model::{FlashcardState, QuestionOutcome, SyllabusTopic};
use crate::snapshot::Snapshot;

use forecast::{PercentileForecast, RankForecast};
use retention::RetentionOutlook;
use revision::RevisionAdvice;
use strategy::{StrategyOutcome, SubjectPlan};

/// Combined per-topic view for dashboard consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicInsight {
    pub topic: String,
    pub mastery: f64,
    pub tier_name: String,
    pub tier_color: String,
    pub retention: RetentionOutlook,
    pub questions_seen: u32,
    pub questions_correct: u32,
}

pub struct AnalyticsEngine {
    config: Arc<RwLock<EngineConfig>>,
    forecast_tx: mpsc::Sender<forecast_worker::ForecastJob>,
}

impl AnalyticsEngine {
    /// Validate the config and start the forecast worker. Must be called
    /// from within a tokio runtime.
    pub fn spawn(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::Config)?;
        let channel_capacity = config.forecast.channel_capacity;
        let config = Arc::new(RwLock::new(config));
        let forecast_tx = forecast_worker::spawn(config.clone(), channel_capacity);
        Ok(Self {
            config,
            forecast_tx,
        })
    }

    /// Swap in a new config after validating it. Applies to subsequent
    /// queries, including queued forecast jobs.
    pub async fn reload_config(&self, new_config: EngineConfig) -> Result<(), EngineError> {
        new_config.validate().map_err(EngineError::Config)?;
        *self.config.write().await = new_config;
        tracing::info!("Engine config reloaded");
        Ok(())
    }

    pub async fn config(&self) -> EngineConfig {
        self.config.read().await.clone()
    }

    pub async fn mastery_score(&self, topic: &str, snapshot: &Snapshot) -> f64 {
        let config = self.config.read().await;
        retention::mastery_score(topic, snapshot, &config.mastery)
    }

    pub async fn retention(
        &self,
        topic: &str,
        snapshot: &Snapshot,
        now: DateTime<Utc>,
    ) -> RetentionOutlook {
        let config = self.config.read().await;
        retention::retention(topic, snapshot, now, &config.retention)
    }

    pub async fn topic_overview(
        &self,
        topic: &str,
        snapshot: &Snapshot,
        now: DateTime<Utc>,
    ) -> TopicInsight {
        let config = self.config.read().await;
        let mastery = retention::mastery_score(topic, snapshot, &config.mastery);
        let tier = tier::tier_for(mastery);
        let outlook = retention::retention(topic, snapshot, now, &config.retention);

        let mut seen = 0u32;
        let mut correct = 0u32;
        for outcome in snapshot.outcomes_for_topic(topic) {
            seen += 1;
            if outcome.status == crate::model::OutcomeStatus::FullyCorrect {
                correct += 1;
            }
        }

        TopicInsight {
            topic: topic.to_string(),
            mastery,
            tier_name: tier.name.to_string(),
            tier_color: tier.color.to_string(),
            retention: outlook,
            questions_seen: seen,
            questions_correct: correct,
        }
    }

    /// Rank forecast, computed on the worker. Waits at most
    /// `forecast.timeout_ms`; a worker that never answers surfaces as
    /// [`EngineError::ForecastTimeout`] instead of hanging the caller.
    pub async fn forecast_rank(
        &self,
        snapshot: &Snapshot,
    ) -> Result<Option<RankForecast>, EngineError> {
        let timeout_ms = self.config.read().await.forecast.timeout_ms;

        let attempts = snapshot
            .attempts_by_date()
            .into_iter()
            .cloned()
            .collect();
        let (reply_tx, reply_rx) = oneshot::channel();
        self.forecast_tx
            .send(forecast_worker::ForecastJob {
                attempts,
                reply: reply_tx,
            })
            .await
            .map_err(|_| EngineError::ForecastUnavailable)?;

        match tokio::time::timeout(Duration::from_millis(timeout_ms), reply_rx).await {
            Ok(Ok(result)) => Ok(result),
            Ok(Err(_)) => Err(EngineError::ForecastUnavailable),
            Err(_) => {
                tracing::warn!(timeout_ms, "Forecast request timed out");
                Err(EngineError::ForecastTimeout { timeout_ms })
            }
        }
    }

    /// Percentile forecast; cheap enough to run inline.
    pub async fn forecast_percentile(&self, snapshot: &Snapshot) -> Option<PercentileForecast> {
        let attempts: Vec<_> = snapshot
            .attempts_by_date()
            .into_iter()
            .cloned()
            .collect();
        forecast::fit_percentile_forecast(&attempts)
    }

    pub async fn revision_plan(
        &self,
        syllabus: &[SyllabusTopic],
        snapshot: &Snapshot,
        now: DateTime<Utc>,
    ) -> Vec<RevisionAdvice> {
        let config = self.config.read().await;
        revision::rank(syllabus, snapshot, now, &config.retention, &config.revision)
    }

    pub async fn simulate_strategy(&self, plans: &[SubjectPlan]) -> StrategyOutcome {
        let config = self.config.read().await;
        strategy::simulate(plans, &config.strategy)
    }

    pub async fn due_flashcards(
        &self,
        cards: &[FlashcardState],
        now: DateTime<Utc>,
    ) -> Vec<FlashcardState> {
        let config = self.config.read().await;
        flashcards::due_session(cards, now, &config.scheduler)
    }

    pub async fn rate_flashcard(
        &self,
        card: &FlashcardState,
        quality: u8,
        now: DateTime<Utc>,
    ) -> FlashcardState {
        let config = self.config.read().await;
        flashcards::rate(card, quality, now, &config.scheduler)
    }

    pub fn generate_flashcards(
        &self,
        outcomes: &[QuestionOutcome],
        existing: &[FlashcardState],
        now: DateTime<Utc>,
    ) -> Vec<FlashcardState> {
        flashcards::generate_from_outcomes(outcomes, existing, now)
    }
}
