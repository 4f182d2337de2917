//! Hint text generation for a single answer position.

use super::scorer::{SEMANTIC_SCORE, SIMILAR_SHAPE_SCORE, TONE_SCORE};
use super::tables::SimilarityTables;

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

impl SimilarityTables {
    /// Build the ranked hint list for one position.
    ///
    /// Blank submissions short-circuit to a fixed two-hint sequence without
    /// running the scorer. Otherwise the similarity band picks the template,
    /// with a pair/group callout when that table caused the score.
    pub fn hints(&self, expected: &str, submitted: &str, position: usize) -> Vec<String> {
        let mut hints = Vec::new();

        if submitted.is_empty() {
            hints.push("这个位置不能为空".to_string());
            hints.push(format!("正确答案是\"{expected}\""));
            return hints;
        }

        let similarity = self.score(expected, submitted);
        let pair = (single_char(expected), single_char(submitted));

        if similarity >= SIMILAR_SHAPE_SCORE {
            hints.push("答案很接近了！注意字形的细微差别".to_string());
            if let (Some(exp), Some(sub)) = pair {
                if self.visually_similar(exp, sub) {
                    hints.push(format!(
                        "\"{submitted}\"和\"{expected}\"确实很相似，但在这里应该是\"{expected}\""
                    ));
                }
            }
        } else if similarity >= SEMANTIC_SCORE {
            hints.push("意思相近，但用字不对".to_string());
            if let (Some(exp), Some(sub)) = pair {
                if self.semantically_related(exp, sub) {
                    hints.push(format!(
                        "\"{submitted}\"和\"{expected}\"语义相关，但这里需要\"{expected}\""
                    ));
                }
            }
        } else if similarity >= TONE_SCORE {
            hints.push("字形或读音有相似之处".to_string());
            hints.push(format!("正确答案是\"{expected}\""));
        } else {
            hints.push("答案偏差较大".to_string());
            hints.push(format!("这个位置应该是\"{expected}\""));
            if position > 0 {
                hints.push("可以结合前面的字来思考".to_string());
            }
        }

        hints
    }
}
