//! Dedicated worker for the Monte Carlo rank simulation.
//!
//! The simulation is the one computation here heavy enough to keep off the
//! caller's context, so it runs behind a typed request/response channel: the
//! caller ships an attempt snapshot, the worker fits and simulates, and the
//! reply comes back over a oneshot.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::{mpsc, oneshot, RwLock};

use crate::config::EngineConfig;
use crate::engine::forecast::{self, RankForecast};
use crate::model::TestAttempt;

#[derive(Debug)]
pub(crate) struct ForecastJob {
    pub attempts: Vec<TestAttempt>,
    pub reply: oneshot::Sender<Option<RankForecast>>,
}

/// Spawn the worker task. Must be called from within a tokio runtime. The
/// worker re-reads the shared config per job so hot reloads apply without a
/// restart; it exits when every request handle is dropped.
pub(crate) fn spawn(
    config: Arc<RwLock<EngineConfig>>,
    channel_capacity: usize,
) -> mpsc::Sender<ForecastJob> {
    let (tx, mut rx) = mpsc::channel::<ForecastJob>(channel_capacity);

    tokio::spawn(async move {
        let mut rng = StdRng::from_entropy();
        tracing::debug!("Forecast worker started");

        while let Some(job) = rx.recv().await {
            let forecast_config = config.read().await.forecast.clone();
            let result = forecast::fit_rank_forecast(&job.attempts, &mut rng, &forecast_config);
            if job.reply.send(result).is_err() {
                tracing::warn!("Forecast requester went away before the reply");
            }
        }

        tracing::debug!("Forecast worker stopped");
    });

    tx
}
