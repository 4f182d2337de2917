//! Whole-submission analysis and record persistence.

use chrono::Utc;
use std::collections::BTreeMap;

use crate::db::LogOnError;
use crate::domain::{CharacterAnalysis, LearningAnalysis, NewLearningRecord, PositionAnswer};

use super::suggest::suggest;
use super::tables::{tables, SimilarityTables};
use super::{LearningStore, StoreError, COMPLETION_THRESHOLD, PARTIAL_THRESHOLD};

/// Full-width punctuation stripped from canonical text before scoring.
const PUNCTUATION: &[char] = &['，', '。', '！', '？', '、', '；', '：'];

/// Canonical text minus punctuation, one entry per character. This defines
/// the iteration bound, not the answer array.
fn canonical_chars(content: &str) -> Vec<String> {
    content
        .chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .map(|c| c.to_string())
        .collect()
}

/// The judge: static similarity tables plus the store boundary.
pub struct SmartJudge<'a> {
    tables: &'static SimilarityTables,
    store: &'a dyn LearningStore,
}

impl<'a> SmartJudge<'a> {
    pub fn new(store: &'a dyn LearningStore) -> Self {
        Self {
            tables: tables(),
            store,
        }
    }

    /// Analyze a submission against the poem's canonical text.
    ///
    /// Missing trailing answers are treated as blank submissions. The
    /// historical-mistake fetch degrades to no history on failure; nothing
    /// in this method writes to the store.
    pub fn analyze(
        &self,
        poem_id: i64,
        canonical_text: &str,
        user_answers: &[String],
    ) -> LearningAnalysis {
        let chars = canonical_chars(canonical_text);

        let mut history = self
            .store
            .historical_mistakes(poem_id)
            .log_warn_default("Failed to load historical mistakes");

        let mut character_analyses = Vec::with_capacity(chars.len());
        let mut correct_count = 0;
        let mut partial_count = 0;
        let mut incorrect_count = 0;

        for (position, expected) in chars.iter().enumerate() {
            let submitted = user_answers.get(position).map(String::as_str).unwrap_or("");
            let similarity = self.tables.score(expected, submitted);

            let is_correct = similarity == 1.0;
            if is_correct {
                correct_count += 1;
            } else if similarity >= PARTIAL_THRESHOLD {
                partial_count += 1;
            } else {
                incorrect_count += 1;
            }

            let mut common_mistakes = history.remove(&position).unwrap_or_default();
            if submitted != expected.as_str() && !submitted.is_empty() {
                if !common_mistakes.iter().any(|m| m == submitted) {
                    common_mistakes.push(submitted.to_string());
                }
            }

            character_analyses.push(CharacterAnalysis {
                position,
                character: expected.clone(),
                user_input: submitted.to_string(),
                is_correct,
                similarity,
                common_mistakes,
                hints: self.tables.hints(expected, submitted, position),
            });
        }

        let total_characters = chars.len();
        let accuracy_rate = if total_characters > 0 {
            (correct_count as f64 + partial_count as f64 * 0.5) / total_characters as f64
        } else {
            0.0
        };

        let suggestions = suggest(&character_analyses, accuracy_rate);

        LearningAnalysis {
            total_characters,
            correct_count,
            partial_count,
            incorrect_count,
            accuracy_rate,
            character_analyses,
            suggestions,
        }
    }

    /// Convert an analysis into a learning record and save it. Store errors
    /// propagate unmodified; no retry at this layer.
    pub fn persist(
        &self,
        poem_id: i64,
        user_id: &str,
        analysis: &LearningAnalysis,
    ) -> Result<i64, StoreError> {
        let mut answers = BTreeMap::new();
        for ca in &analysis.character_analyses {
            answers.insert(
                ca.position,
                PositionAnswer {
                    correct: ca.character.clone(),
                    user_input: ca.user_input.clone(),
                    is_correct: ca.is_correct,
                    similarity: ca.similarity,
                    attempts: if ca.user_input.is_empty() {
                        vec![]
                    } else {
                        vec![ca.user_input.clone()]
                    },
                    success_rate: if ca.is_correct { 1.0 } else { 0.0 },
                    mistakes: if ca.is_correct {
                        vec![]
                    } else {
                        vec![ca.user_input.clone()]
                    },
                },
            );
        }

        let completed = analysis.accuracy_rate >= COMPLETION_THRESHOLD;
        let record = NewLearningRecord {
            user_id: user_id.to_string(),
            poem_id,
            learning_mode: "immersive".to_string(),
            answers,
            score: (analysis.accuracy_rate * 100.0).round() as i64,
            accuracy_rate: analysis.accuracy_rate,
            completion_status: if completed { "completed" } else { "started" }.to_string(),
            completion_time: if completed {
                Some(Utc::now().to_rfc3339())
            } else {
                None
            },
        };

        self.store.save_learning_record(&record)
    }
}
