//! Result types produced by the smart judge for one recitation attempt.

use serde::Serialize;

/// Per-position verdict for a single character of the poem.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterAnalysis {
    pub position: usize,
    /// Expected character from the canonical text.
    pub character: String,
    /// What the user actually submitted; empty when the position was skipped.
    pub user_input: String,
    pub is_correct: bool,
    pub similarity: f64,
    /// Wrong submissions previously seen at this position, plus this attempt's
    /// if it is a new one.
    pub common_mistakes: Vec<String>,
    pub hints: Vec<String>,
}

/// Aggregate result for a whole submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningAnalysis {
    pub total_characters: usize,
    pub correct_count: usize,
    pub partial_count: usize,
    pub incorrect_count: usize,
    /// Weighted: (correct + 0.5 * partial) / total, 0 for an empty poem.
    pub accuracy_rate: f64,
    pub character_analyses: Vec<CharacterAnalysis>,
    pub suggestions: Vec<String>,
}
