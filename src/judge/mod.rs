//! Smart judgment engine for fill-in-the-blank poem recitation.
//!
//! Scores each submitted character against the canonical text using four
//! static similarity tables (shape, meaning, radical, pronunciation),
//! generates per-position hints, and aggregates the run into an accuracy
//! rate with study suggestions. The store behind [`LearningStore`] supplies
//! historical mistakes and receives the finished record; everything else is
//! pure computation over read-only tables.

pub mod analyzer;
pub mod hints;
pub mod scorer;
pub mod suggest;
pub mod tables;

use std::collections::HashMap;

use crate::domain::NewLearningRecord;

pub use analyzer::SmartJudge;
pub use tables::{tables, SimilarityTables};

/// Similarity at or above this counts as a partial match.
pub const PARTIAL_THRESHOLD: f64 = 0.5;

/// Accuracy at or above this marks the attempt completed.
pub const COMPLETION_THRESHOLD: f64 = 0.8;

pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Store boundary consumed by the judge. Implemented by the rusqlite layer
/// for production and by in-memory fakes in tests.
pub trait LearningStore {
    /// Previously seen wrong submissions, keyed by character position.
    fn historical_mistakes(&self, poem_id: i64) -> Result<HashMap<usize, Vec<String>>, StoreError>;

    /// Persist a finished learning record, returning its id.
    fn save_learning_record(&self, record: &NewLearningRecord) -> Result<i64, StoreError>;
}
