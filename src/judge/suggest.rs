//! Study suggestions derived from a finished analysis.

use crate::domain::CharacterAnalysis;

/// Base message ladder on the accuracy rate (inclusive lower bounds), plus
/// independent notes when shape or meaning errors pile up. Additive, never
/// mutually exclusive.
pub fn suggest(analyses: &[CharacterAnalysis], accuracy_rate: f64) -> Vec<String> {
    let mut suggestions = Vec::new();

    if accuracy_rate >= 0.9 {
        suggestions.push("太棒了！你已经完全掌握了这首诗".to_string());
        suggestions.push("可以尝试学习更有挑战性的诗词".to_string());
    } else if accuracy_rate >= 0.7 {
        suggestions.push("不错的表现！还有几个字需要注意".to_string());

        let incorrect_chars: Vec<&str> = analyses
            .iter()
            .filter(|a| !a.is_correct)
            .map(|a| a.character.as_str())
            .collect();

        if !incorrect_chars.is_empty() {
            suggestions.push(format!("特别注意这些字：{}", incorrect_chars.join("、")));
        }
    } else if accuracy_rate >= 0.5 {
        suggestions.push("基本掌握，还需要多练习".to_string());
        suggestions.push("建议重点复习错误较多的部分".to_string());

        // Near misses: wrong but in a related table
        let similar_errors: Vec<String> = analyses
            .iter()
            .filter(|a| !a.is_correct && a.similarity >= 0.5)
            .map(|a| format!("\"{}\"应该是\"{}\"", a.user_input, a.character))
            .collect();

        if !similar_errors.is_empty() {
            suggestions.push(format!("这些字很接近了：{}", similar_errors.join("；")));
        }
    } else {
        suggestions.push("需要更多练习，不要灰心！".to_string());
        suggestions.push("建议先熟读原文，理解诗词的意境".to_string());
        suggestions.push("可以尝试分段练习，逐步提高".to_string());
    }

    let form_errors = analyses
        .iter()
        .filter(|a| !a.is_correct && a.similarity >= 0.6)
        .count();
    if form_errors > 2 {
        suggestions.push("注意区分形似字，多观察字形细节".to_string());
    }

    let semantic_errors = analyses
        .iter()
        .filter(|a| !a.is_correct && a.similarity >= 0.4 && a.similarity < 0.6)
        .count();
    if semantic_errors > 2 {
        suggestions.push("理解诗词含义，避免用意思相近但不正确的字".to_string());
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(character: &str, user_input: &str, similarity: f64) -> CharacterAnalysis {
        CharacterAnalysis {
            position: 0,
            character: character.to_string(),
            user_input: user_input.to_string(),
            is_correct: similarity == 1.0,
            similarity,
            common_mistakes: vec![],
            hints: vec![],
        }
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        assert_eq!(suggest(&[], 0.9)[0], "太棒了！你已经完全掌握了这首诗");
        assert_eq!(suggest(&[], 0.7)[0], "不错的表现！还有几个字需要注意");
        assert_eq!(suggest(&[], 0.5)[0], "基本掌握，还需要多练习");
        assert_eq!(suggest(&[], 0.49)[0], "需要更多练习，不要灰心！");
    }

    #[test]
    fn test_good_tier_lists_wrong_characters() {
        let analyses = vec![analysis("月", "夜", 0.0), analysis("光", "光", 1.0)];
        let suggestions = suggest(&analyses, 0.75);
        assert!(suggestions.iter().any(|s| s.contains('月')));
    }

    #[test]
    fn test_basic_tier_lists_near_miss_pairs() {
        let analyses = vec![analysis("明", "朋", 0.7), analysis("天", "云", 0.5)];
        let suggestions = suggest(&analyses, 0.5);
        assert!(suggestions.iter().any(|s| s.contains("\"朋\"应该是\"明\"")));
        assert!(suggestions.iter().any(|s| s.contains("\"云\"应该是\"天\"")));
    }

    #[test]
    fn test_shape_error_note_needs_more_than_two() {
        let two = vec![analysis("明", "朋", 0.7), analysis("青", "清", 0.7)];
        assert!(!suggest(&two, 0.9).iter().any(|s| s.contains("形似字")));

        let three = vec![
            analysis("明", "朋", 0.7),
            analysis("青", "清", 0.7),
            analysis("鸟", "乌", 0.7),
        ];
        assert!(suggest(&three, 0.9).iter().any(|s| s.contains("形似字")));
    }

    #[test]
    fn test_semantic_error_note_uses_half_open_band() {
        // 0.4 and 0.5 are in the band, 0.6 is not
        let in_band = vec![
            analysis("河", "湖", 0.4),
            analysis("天", "云", 0.5),
            analysis("山", "水", 0.5),
        ];
        assert!(suggest(&in_band, 0.3).iter().any(|s| s.contains("意思相近")));

        let out_of_band = vec![
            analysis("河", "湖", 0.6),
            analysis("天", "云", 0.6),
            analysis("山", "水", 0.6),
        ];
        assert!(!suggest(&out_of_band, 0.3).iter().any(|s| s.contains("意思相近")));
    }

    #[test]
    fn test_notes_are_additive_to_tier_message() {
        let analyses = vec![
            analysis("明", "朋", 0.7),
            analysis("青", "清", 0.7),
            analysis("鸟", "乌", 0.7),
        ];
        let suggestions = suggest(&analyses, 0.95);
        // Mastery tier message and the shape note both present
        assert_eq!(suggestions[0], "太棒了！你已经完全掌握了这首诗");
        assert!(suggestions.iter().any(|s| s.contains("形似字")));
    }
}
