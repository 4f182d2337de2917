//! Character similarity scoring.
//!
//! Produces one of six discrete levels, never an interpolation:
//! 1.0 exact, 0.7 visually similar, 0.5 same semantic group,
//! 0.4 shared radical cluster, 0.3 shared tone cluster, 0.0 unrelated.

use super::tables::SimilarityTables;

pub const SIMILAR_SHAPE_SCORE: f64 = 0.7;
pub const SEMANTIC_SCORE: f64 = 0.5;
pub const RADICAL_SCORE: f64 = 0.4;
pub const TONE_SCORE: f64 = 0.3;

/// A submission is compared as a whole string: anything other than exactly
/// one character can never match the tables and falls through to 0.0.
fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl SimilarityTables {
    /// Score a submitted answer against the expected character.
    ///
    /// Equality is checked before the empty-input rule, and all four tables
    /// are probed with the maximum candidate winning (a pair can be both
    /// visually and semantically related).
    pub fn score(&self, expected: &str, submitted: &str) -> f64 {
        if expected == submitted {
            return 1.0;
        }
        if expected.is_empty() || submitted.is_empty() {
            return 0.0;
        }

        let (exp, sub) = match (single_char(expected), single_char(submitted)) {
            (Some(e), Some(s)) => (e, s),
            _ => return 0.0,
        };

        let mut similarity: f64 = 0.0;

        if self.visually_similar(exp, sub) {
            similarity = similarity.max(SIMILAR_SHAPE_SCORE);
        }
        if self.semantically_related(exp, sub) {
            similarity = similarity.max(SEMANTIC_SCORE);
        }
        if self.shares_radical(exp, sub) {
            similarity = similarity.max(RADICAL_SCORE);
        }
        if self.similar_tone(exp, sub) {
            similarity = similarity.max(TONE_SCORE);
        }

        similarity
    }
}
