use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Result};
use serde::Serialize;

use crate::domain::{Poem, PoemFilter};

pub fn insert_poem(conn: &Connection, poem: &Poem) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO poems (title, author, dynasty, content, translation, difficulty, category)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            poem.title,
            poem.author,
            poem.dynasty,
            poem.content,
            poem.translation,
            poem.difficulty,
            poem.category,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_poem_by_id(conn: &Connection, id: i64) -> Result<Option<Poem>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, title, author, dynasty, content, translation, difficulty, category
        FROM poems WHERE id = ?1
        "#,
    )?;

    let mut rows = stmt.query(params![id])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row_to_poem(row)?))
    } else {
        Ok(None)
    }
}

/// List poems, optionally narrowed by search text and column filters.
/// The SQL is assembled from fixed clause strings; only values are bound.
pub fn list_poems(conn: &Connection, filter: &PoemFilter) -> Result<Vec<Poem>> {
    let mut sql = String::from(
        "SELECT id, title, author, dynasty, content, translation, difficulty, category \
          FROM poems WHERE 1=1",
    );
    let mut values: Vec<Value> = Vec::new();

    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        sql.push_str(" AND (title LIKE ? OR author LIKE ? OR content LIKE ?)");
        let term = format!("%{}%", search);
        values.push(Value::from(term.clone()));
        values.push(Value::from(term.clone()));
        values.push(Value::from(term));
    }
    if let Some(difficulty) = filter.difficulty.as_deref().filter(|s| !s.is_empty()) {
        sql.push_str(" AND difficulty = ?");
        values.push(Value::from(difficulty.to_string()));
    }
    if let Some(dynasty) = filter.dynasty.as_deref().filter(|s| !s.is_empty()) {
        sql.push_str(" AND dynasty = ?");
        values.push(Value::from(dynasty.to_string()));
    }
    if let Some(category) = filter.category.as_deref().filter(|s| !s.is_empty()) {
        sql.push_str(" AND category LIKE ?");
        values.push(Value::from(format!("%{}%", category)));
    }

    sql.push_str(" ORDER BY id");

    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        values.push(Value::from(limit));
    }

    let mut stmt = conn.prepare(&sql)?;
    let poems = stmt
        .query_map(params_from_iter(values), |row| row_to_poem(row))?
        .collect::<Result<Vec<_>>>()?;
    Ok(poems)
}

#[derive(Debug, Clone, Serialize)]
pub struct DifficultyCount {
    pub difficulty: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PoemStats {
    pub total_poems: i64,
    pub total_authors: i64,
    pub total_dynasties: i64,
    pub difficulty_distribution: Vec<DifficultyCount>,
}

pub fn get_poem_stats(conn: &Connection) -> Result<PoemStats> {
    let (total_poems, total_authors, total_dynasties) = conn.query_row(
        r#"
        SELECT COUNT(*),
                      COUNT(DISTINCT author),
                      COUNT(DISTINCT dynasty)
        FROM poems
        "#,
        [],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;

    let mut stmt = conn.prepare(
        "SELECT difficulty, COUNT(*) FROM poems GROUP BY difficulty ORDER BY difficulty",
    )?;
    let difficulty_distribution = stmt
        .query_map([], |row| {
            Ok(DifficultyCount {
                difficulty: row.get(0)?,
                count: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(PoemStats {
        total_poems,
        total_authors,
        total_dynasties,
        difficulty_distribution,
    })
}

fn row_to_poem(row: &rusqlite::Row) -> Result<Poem> {
    Ok(Poem {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        dynasty: row.get(3)?,
        content: row.get(4)?,
        translation: row.get(5)?,
        difficulty: row.get(6)?,
        category: row.get(7)?,
    })
}
