//! Adaptive performance analytics for exam preparation.
//!
//! Converts a student's raw test-attempt history and per-question outcome
//! logs into forward-looking predictions and prioritized study actions:
//! per-topic mastery ratings with a forgetting-curve retention model, a
//! log-rank Monte Carlo forecaster, an SM-2 flashcard scheduler, a
//! revision-priority ranker, and an exam time-budget simulator.
//!
//! The crate is a library with no I/O: callers hand every query an immutable
//! [`Snapshot`] of the store's collections and persist only raw state
//! (topic progress, flashcard scheduling fields) themselves.

pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod model;
pub mod snapshot;

pub use config::EngineConfig;
pub use engine::AnalyticsEngine;
pub use error::EngineError;
pub use snapshot::Snapshot;
