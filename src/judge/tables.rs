//! Static character-similarity lookup tables.
//!
//! Four relations feed the scorer:
//! - visually-similar pairs (expanded bidirectionally into an adjacency map)
//! - semantic groups (each member maps to the rest of its group)
//! - radical clusters (queried by joint membership)
//! - tone clusters (queried by joint membership)
//!
//! All tables are built once on first access and never mutated afterward,
//! so the shared reference is safe across concurrent handlers.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Visually confusable character pairs. Symmetric: expansion inserts both
/// directions, so a→b implies b→a.
const SIMILAR_PAIRS: &[(char, char)] = &[
    ('明', '朋'), ('月', '肉'), ('日', '曰'), ('天', '夫'),
    ('人', '入'), ('大', '太'), ('中', '忠'), ('心', '必'),
    ('青', '清'), ('情', '晴'), ('鸟', '乌'), ('马', '鸟'),
    ('春', '青'), ('花', '华'), ('风', '凤'), ('雨', '两'),
    ('山', '仙'), ('水', '永'), ('白', '自'), ('来', '末'),
    ('去', '云'), ('头', '买'), ('低', '底'), ('思', '斯'),
    ('故', '古'), ('乡', '香'), ('夜', '液'), ('声', '生'),
    ('知', '智'), ('多', '夕'), ('少', '沙'), ('处', '外'),
    ('闻', '间'), ('啼', '蹄'), ('落', '洛'), ('黄', '皇'),
    ('河', '何'), ('海', '梅'), ('流', '留'), ('望', '忘'),
    ('千', '干'), ('里', '理'), ('目', '眼'), ('更', '便'),
    ('上', '止'), ('层', '曾'), ('楼', '搂'), ('尽', '荆'),
];

/// Thematic character groups (weather, landscape, seasons, ...).
/// A character appearing in two groups keeps only the last-built mapping;
/// the source data treats groups as disjoint.
const SEMANTIC_GROUPS: &[&[char]] = &[
    &['天', '空', '云', '风', '雨', '雪'],
    &['山', '水', '河', '海', '川', '流'],
    &['春', '夏', '秋', '冬', '季', '节'],
    &['花', '草', '树', '叶', '枝', '根'],
    &['月', '日', '星', '光', '明', '暗'],
    &['红', '绿', '青', '白', '黄', '黑'],
    &['大', '小', '长', '短', '高', '低'],
    &['来', '去', '出', '入', '上', '下'],
    &['思', '想', '念', '忆', '怀', '恋'],
    &['喜', '怒', '哀', '乐', '愁', '愉'],
];

/// Characters sharing a radical family.
const RADICAL_CLUSTERS: &[&[char]] = &[
    &['明', '晓', '昏', '暗', '晴', '时'],
    &['情', '怀', '思', '想', '愁', '怨'],
    &['花', '草', '菊', '荷', '莲', '梅'],
    &['河', '海', '湖', '江', '池', '流'],
    &['鸟', '鸡', '鸭', '鹅', '雁', '燕'],
];

/// Characters sharing a pronunciation cluster.
const TONE_CLUSTERS: &[&[char]] = &[
    &['明', '名', '鸣', '茗'], // ming
    &['思', '私', '司', '丝'], // si
    &['花', '华', '话', '化'], // hua
    &['风', '丰', '封', '峰'], // feng
    &['月', '越', '乐', '岳'], // yue
];

pub struct SimilarityTables {
    similar: HashMap<char, Vec<char>>,
    semantic: HashMap<char, Vec<char>>,
}

impl SimilarityTables {
    fn build() -> Self {
        let mut similar: HashMap<char, Vec<char>> = HashMap::new();
        for &(a, b) in SIMILAR_PAIRS {
            similar.entry(a).or_default().push(b);
            similar.entry(b).or_default().push(a);
        }

        let mut semantic: HashMap<char, Vec<char>> = HashMap::new();
        for group in SEMANTIC_GROUPS {
            for &ch in *group {
                let others: Vec<char> = group.iter().copied().filter(|&c| c != ch).collect();
                // Deliberate overwrite: a char in two groups keeps the last group
                semantic.insert(ch, others);
            }
        }

        Self { similar, semantic }
    }

    /// Are the two characters a configured visually-similar pair?
    pub fn visually_similar(&self, expected: char, submitted: char) -> bool {
        self.similar
            .get(&expected)
            .is_some_and(|set| set.contains(&submitted))
    }

    /// Does the submitted character belong to the expected character's
    /// semantic group?
    pub fn semantically_related(&self, expected: char, submitted: char) -> bool {
        self.semantic
            .get(&expected)
            .is_some_and(|set| set.contains(&submitted))
    }

    /// Do both characters appear in the same radical cluster?
    pub fn shares_radical(&self, expected: char, submitted: char) -> bool {
        RADICAL_CLUSTERS
            .iter()
            .any(|group| group.contains(&expected) && group.contains(&submitted))
    }

    /// Do both characters appear in the same pronunciation cluster?
    pub fn similar_tone(&self, expected: char, submitted: char) -> bool {
        TONE_CLUSTERS
            .iter()
            .any(|group| group.contains(&expected) && group.contains(&submitted))
    }
}

/// Shared read-only tables, built on first access.
pub fn tables() -> &'static SimilarityTables {
    static TABLES: OnceLock<SimilarityTables> = OnceLock::new();
    TABLES.get_or_init(SimilarityTables::build)
}
