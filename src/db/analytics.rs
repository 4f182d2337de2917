//! Per-position learning analytics: which characters get missed, and what
//! gets submitted instead.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Position-keyed mistake lists consumed by the judge's history seeding.
pub fn get_historical_mistakes(
    conn: &Connection,
    poem_id: i64,
) -> Result<HashMap<usize, Vec<String>>> {
    let mut stmt = conn.prepare(
        "SELECT character_position, common_mistakes FROM learning_analytics WHERE poem_id = ?1",
    )?;

    let mut mistakes = HashMap::new();
    let rows = stmt.query_map(params![poem_id], |row| {
        let position: i64 = row.get(0)?;
        let raw: String = row.get(1)?;
        Ok((position, raw))
    })?;

    for row in rows {
        let (position, raw) = row?;
        // Stored as a JSON array; unparseable history degrades to empty
        let list: Vec<String> = serde_json::from_str(&raw).unwrap_or_default();
        mistakes.insert(position as usize, list);
    }
    Ok(mistakes)
}

/// Full analytics row for the reporting endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct PositionAnalytics {
    pub character: String,
    pub success_rate: f64,
    pub wrong_attempts: Vec<String>,
    pub common_mistakes: Vec<String>,
}

pub fn get_learning_analytics(
    conn: &Connection,
    poem_id: i64,
) -> Result<BTreeMap<usize, PositionAnalytics>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT character_position, character_text, success_rate, wrong_attempts, common_mistakes
        FROM learning_analytics
        WHERE poem_id = ?1
        ORDER BY character_position
        "#,
    )?;

    let mut analytics = BTreeMap::new();
    let rows = stmt.query_map(params![poem_id], |row| {
        let position: i64 = row.get(0)?;
        let character: String = row.get(1)?;
        let success_rate: f64 = row.get(2)?;
        let wrong_attempts: String = row.get(3)?;
        let common_mistakes: String = row.get(4)?;
        Ok((position, character, success_rate, wrong_attempts, common_mistakes))
    })?;

    for row in rows {
        let (position, character, success_rate, wrong_attempts, common_mistakes) = row?;
        analytics.insert(
            position as usize,
            PositionAnalytics {
                character,
                success_rate,
                wrong_attempts: serde_json::from_str(&wrong_attempts).unwrap_or_default(),
                common_mistakes: serde_json::from_str(&common_mistakes).unwrap_or_default(),
            },
        );
    }
    Ok(analytics)
}

/// Upsert one position's analytics after an attempt. Wrong attempts keep
/// every submission; common mistakes stay de-duplicated.
pub fn record_attempt(
    conn: &Connection,
    poem_id: i64,
    position: usize,
    character: &str,
    is_correct: bool,
    user_input: &str,
) -> Result<()> {
    let existing: Option<(String, String)> = conn
        .query_row(
            "SELECT wrong_attempts, common_mistakes FROM learning_analytics \
              WHERE poem_id = ?1 AND character_position = ?2",
            params![poem_id, position as i64],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let record_mistake = !is_correct && !user_input.is_empty();

    match existing {
        Some((wrong_raw, common_raw)) => {
            let mut wrong_attempts: Vec<String> =
                serde_json::from_str(&wrong_raw).unwrap_or_default();
            let mut common_mistakes: Vec<String> =
                serde_json::from_str(&common_raw).unwrap_or_default();

            if record_mistake {
                wrong_attempts.push(user_input.to_string());
                if !common_mistakes.iter().any(|m| m == user_input) {
                    common_mistakes.push(user_input.to_string());
                }
            }

            conn.execute(
                "UPDATE learning_analytics \
                  SET wrong_attempts = ?1, common_mistakes = ?2, updated_at = ?3 \
                  WHERE poem_id = ?4 AND character_position = ?5",
                params![
                    serde_json::to_string(&wrong_attempts).unwrap_or_else(|_| "[]".to_string()),
                    serde_json::to_string(&common_mistakes).unwrap_or_else(|_| "[]".to_string()),
                    Utc::now().to_rfc3339(),
                    poem_id,
                    position as i64,
                ],
            )?;
        }
        None => {
            let list = if record_mistake {
                serde_json::to_string(&[user_input]).unwrap_or_else(|_| "[]".to_string())
            } else {
                "[]".to_string()
            };

            conn.execute(
                "INSERT INTO learning_analytics \
                   (poem_id, character_position, character_text, wrong_attempts, \
                    common_mistakes, success_rate, updated_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    poem_id,
                    position as i64,
                    character,
                    list,
                    list,
                    if is_correct { 100.0 } else { 0.0 },
                    Utc::now().to_rfc3339(),
                ],
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{seed_poems, test_conn};

    #[test]
    fn test_record_attempt_inserts_then_updates() {
        let conn = test_conn();
        seed_poems(&conn).unwrap();

        record_attempt(&conn, 1, 3, "月", false, "夜").unwrap();
        record_attempt(&conn, 1, 3, "月", false, "夜").unwrap();
        record_attempt(&conn, 1, 3, "月", false, "日").unwrap();

        let analytics = get_learning_analytics(&conn, 1).unwrap();
        let position = &analytics[&3];
        assert_eq!(position.character, "月");
        // every wrong attempt kept, common mistakes de-duplicated
        assert_eq!(position.wrong_attempts, vec!["夜", "夜", "日"]);
        assert_eq!(position.common_mistakes, vec!["夜", "日"]);
    }

    #[test]
    fn test_correct_attempt_records_no_mistake() {
        let conn = test_conn();
        seed_poems(&conn).unwrap();

        record_attempt(&conn, 1, 0, "床", true, "床").unwrap();
        let analytics = get_learning_analytics(&conn, 1).unwrap();
        assert!(analytics[&0].common_mistakes.is_empty());
        assert_eq!(analytics[&0].success_rate, 100.0);
    }

    #[test]
    fn test_historical_mistakes_shape() {
        let conn = test_conn();
        seed_poems(&conn).unwrap();

        record_attempt(&conn, 1, 3, "月", false, "夜").unwrap();
        record_attempt(&conn, 1, 4, "光", false, "星").unwrap();

        let mistakes = get_historical_mistakes(&conn, 1).unwrap();
        assert_eq!(mistakes[&3], vec!["夜"]);
        assert_eq!(mistakes[&4], vec!["星"]);
        assert!(!mistakes.contains_key(&0));

        // unrelated poem has no history
        assert!(get_historical_mistakes(&conn, 2).unwrap().is_empty());
    }
}
