//! Rank and percentile forecasting.
//!
//! Rank-vs-score is fitted as ln(rank) against marks because rank
//! distributions are heavy-tailed and approximately log-linear in score; the
//! fitted line is then resampled with a Monte Carlo pass over a normal score
//! distribution estimated from history. Fewer than three attempts, or a
//! degenerate fit, yields `None` rather than an error: "not enough data" is a
//! first-class outcome the consuming layer renders explicitly.

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::ForecastConfig;
use crate::model::TestAttempt;

/// Attempts required before any forecast is produced.
pub const MIN_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankForecast {
    pub slope: f64,
    pub intercept: f64,
    /// 5th percentile of the simulated ranks (best plausible outcome).
    pub best_case: u32,
    /// Median simulated rank.
    pub likely: u32,
    /// 95th percentile of the simulated ranks.
    pub worst_case: u32,
    pub distribution: Vec<RankBucket>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankBucket {
    /// Midpoint rank of the bucket.
    pub rank: f64,
    /// Fraction of simulated outcomes landing in the bucket.
    pub probability: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PercentileForecast {
    pub slope: f64,
    pub intercept: f64,
    /// Extrapolated percentile for the next test, clamped to [0, 100].
    pub next_percentile: f64,
}

#[derive(Debug, Clone, Copy)]
struct LinearFit {
    slope: f64,
    intercept: f64,
}

/// Ordinary least squares. `None` when all x values coincide (zero
/// denominator), which the callers treat as "no fit".
fn least_squares(points: &[(f64, f64)]) -> Option<LinearFit> {
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.0).sum();
    let sum_y: f64 = points.iter().map(|p| p.1).sum();
    let sum_xy: f64 = points.iter().map(|p| p.0 * p.1).sum();
    let sum_x2: f64 = points.iter().map(|p| p.0 * p.0).sum();

    let denom = n * sum_x2 - sum_x * sum_x;
    if denom.abs() < f64::EPSILON {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denom;
    let intercept = (sum_y - slope * sum_x) / n;
    Some(LinearFit { slope, intercept })
}

/// Fit the log-rank regression and simulate a rank distribution.
///
/// `attempts` must be in chronological order (the snapshot provides this);
/// the fit itself is order-independent but the caller contract keeps the two
/// forecasters consistent.
pub fn fit_rank_forecast(
    attempts: &[TestAttempt],
    rng: &mut impl Rng,
    config: &ForecastConfig,
) -> Option<RankForecast> {
    if attempts.len() < MIN_ATTEMPTS {
        return None;
    }

    let points: Vec<(f64, f64)> = attempts
        .iter()
        .map(|a| (a.total.marks, f64::from(a.total.rank.max(1)).ln()))
        .collect();
    let fit = least_squares(&points)?;

    let scores: Vec<f64> = points.iter().map(|p| p.0).collect();
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / scores.len() as f64;
    let std_dev = variance.sqrt();

    let predict = |score: f64| (fit.slope * score + fit.intercept).exp();

    if std_dev <= f64::EPSILON {
        // All recorded scores are equal: the simulation would collapse
        // anyway, so return a zero-width distribution around the single
        // predicted rank.
        tracing::debug!(mean, "Degenerate score variance, zero-width forecast");
        let rank = clamp_rank(predict(mean));
        return Some(RankForecast {
            slope: fit.slope,
            intercept: fit.intercept,
            best_case: rank,
            likely: rank,
            worst_case: rank,
            distribution: vec![RankBucket {
                rank: f64::from(rank),
                probability: 1.0,
            }],
        });
    }

    let mut simulated: Vec<f64> = Vec::with_capacity(config.samples);
    for _ in 0..config.samples {
        let score = mean + std_dev * standard_normal(rng);
        simulated.push(predict(score).max(1.0));
    }
    simulated.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    Some(RankForecast {
        slope: fit.slope,
        intercept: fit.intercept,
        best_case: clamp_rank(percentile_of(&simulated, 5.0)),
        likely: clamp_rank(percentile_of(&simulated, 50.0)),
        worst_case: clamp_rank(percentile_of(&simulated, 95.0)),
        distribution: histogram(&simulated, config.histogram_buckets),
    })
}

/// Sibling forecaster: the same fit-and-extrapolate idea over
/// percentile-vs-test-index. Only attempts carrying a percentile participate;
/// fewer than three of them means no forecast.
pub fn fit_percentile_forecast(attempts: &[TestAttempt]) -> Option<PercentileForecast> {
    let points: Vec<(f64, f64)> = attempts
        .iter()
        .filter_map(|a| a.total.percentile)
        .enumerate()
        .map(|(i, p)| (i as f64, p))
        .collect();
    if points.len() < MIN_ATTEMPTS {
        return None;
    }

    let fit = least_squares(&points)?;
    let next_index = points.len() as f64;
    let next_percentile = (fit.slope * next_index + fit.intercept).clamp(0.0, 100.0);

    Some(PercentileForecast {
        slope: fit.slope,
        intercept: fit.intercept,
        next_percentile,
    })
}

/// Box-Muller draw from the standard normal.
fn standard_normal(rng: &mut impl Rng) -> f64 {
    let u1: f64 = rng.gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

fn percentile_of(sorted: &[f64], pct: f64) -> f64 {
    let idx = ((pct / 100.0) * sorted.len() as f64) as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn clamp_rank(rank: f64) -> u32 {
    rank.round().max(1.0) as u32
}

/// Equal-width histogram between the 1st and 99th percentile of the
/// simulated ranks; tail samples outside that window are dropped from the
/// chart but still counted in the denominators above.
fn histogram(sorted: &[f64], buckets: usize) -> Vec<RankBucket> {
    let lo = percentile_of(sorted, 1.0);
    let hi = percentile_of(sorted, 99.0);
    let total = sorted.len() as f64;

    if hi <= lo {
        return vec![RankBucket {
            rank: lo,
            probability: 1.0,
        }];
    }

    let width = (hi - lo) / buckets as f64;
    let mut counts = vec![0usize; buckets];
    for &rank in sorted {
        if rank < lo || rank > hi {
            continue;
        }
        let idx = (((rank - lo) / width) as usize).min(buckets - 1);
        counts[idx] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| RankBucket {
            rank: lo + (i as f64 + 0.5) * width,
            probability: count as f64 / total,
        })
        .collect()
}
