use serde::{Deserialize, Serialize};

/// A poem as stored and served to the frontend.
#[derive(Debug, Clone, Serialize)]
pub struct Poem {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub dynasty: String,
    pub content: String,
    pub translation: Option<String>,
    pub difficulty: String,
    pub category: Option<String>,
}

impl Poem {
    pub fn new(
        title: &str,
        author: &str,
        dynasty: &str,
        content: &str,
        translation: Option<&str>,
        difficulty: &str,
        category: Option<&str>,
    ) -> Self {
        Self {
            id: 0,
            title: title.to_string(),
            author: author.to_string(),
            dynasty: dynasty.to_string(),
            content: content.to_string(),
            translation: translation.map(|s| s.to_string()),
            difficulty: difficulty.to_string(),
            category: category.map(|s| s.to_string()),
        }
    }
}

/// Search filters for the poem list endpoint. All fields optional; an empty
/// filter returns everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PoemFilter {
    pub search: Option<String>,
    pub difficulty: Option<String>,
    pub dynasty: Option<String>,
    pub category: Option<String>,
    pub limit: Option<i64>,
}
