//! Persisted learning-record shapes.

use serde::Serialize;
use std::collections::BTreeMap;

/// One position of the per-position answer map stored with a learning
/// record. Serialized into the record's `answers` JSON column.
#[derive(Debug, Clone, Serialize)]
pub struct PositionAnswer {
    pub correct: String,
    pub user_input: String,
    pub is_correct: bool,
    pub similarity: f64,
    pub attempts: Vec<String>,
    pub success_rate: f64,
    pub mistakes: Vec<String>,
}

/// A learning record about to be saved (no id yet).
#[derive(Debug, Clone, Serialize)]
pub struct NewLearningRecord {
    pub user_id: String,
    pub poem_id: i64,
    pub learning_mode: String,
    /// Keyed by character position. BTreeMap keeps the JSON ordered.
    pub answers: BTreeMap<usize, PositionAnswer>,
    pub score: i64,
    pub accuracy_rate: f64,
    pub completion_status: String,
    pub completion_time: Option<String>,
}

/// A saved record joined with its poem, for the history endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub poem_id: i64,
    pub title: String,
    pub author: String,
    pub learning_mode: String,
    pub score: i64,
    pub accuracy_rate: f64,
    pub completion_status: String,
    pub start_time: String,
    pub completion_time: Option<String>,
}
