use chrono::Utc;
use rusqlite::{params, Connection, Result};
use std::collections::HashMap;

use crate::domain::{HistoryEntry, NewLearningRecord};
use crate::judge::{LearningStore, StoreError};

pub fn save_learning_record(conn: &Connection, record: &NewLearningRecord) -> Result<i64> {
    let answers_json = serde_json::to_string(&record.answers)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    conn.execute(
        r#"
        INSERT INTO user_learning_records
            (user_id, poem_id, learning_mode, answers, score, accuracy_rate,
              completion_status, start_time, completion_time)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
        params![
            record.user_id,
            record.poem_id,
            record.learning_mode,
            answers_json,
            record.score,
            record.accuracy_rate,
            record.completion_status,
            Utc::now().to_rfc3339(),
            record.completion_time,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// A user's past attempts joined with poem metadata, newest first.
pub fn get_learning_history(
    conn: &Connection,
    user_id: &str,
    limit: i64,
) -> Result<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT lr.id, lr.poem_id, p.title, p.author, lr.learning_mode, lr.score,
                      lr.accuracy_rate, lr.completion_status, lr.start_time, lr.completion_time
        FROM user_learning_records lr
        JOIN poems p ON lr.poem_id = p.id
        WHERE lr.user_id = ?1
        ORDER BY lr.start_time DESC
        LIMIT ?2
        "#,
    )?;

    let entries = stmt
        .query_map(params![user_id, limit], |row| {
            Ok(HistoryEntry {
                id: row.get(0)?,
                poem_id: row.get(1)?,
                title: row.get(2)?,
                author: row.get(3)?,
                learning_mode: row.get(4)?,
                score: row.get(5)?,
                accuracy_rate: row.get(6)?,
                completion_status: row.get(7)?,
                start_time: row.get(8)?,
                completion_time: row.get(9)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;
    Ok(entries)
}

/// The judge's store boundary, backed by this connection.
impl LearningStore for Connection {
    fn historical_mistakes(
        &self,
        poem_id: i64,
    ) -> std::result::Result<HashMap<usize, Vec<String>>, StoreError> {
        crate::db::analytics::get_historical_mistakes(self, poem_id).map_err(|e| e.into())
    }

    fn save_learning_record(
        &self,
        record: &NewLearningRecord,
    ) -> std::result::Result<i64, StoreError> {
        save_learning_record(self, record).map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{seed_poems, test_conn};
    use crate::judge::SmartJudge;

    fn answers(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_save_and_history_roundtrip() {
        let conn = test_conn();
        seed_poems(&conn).unwrap();

        let judge = SmartJudge::new(&conn);
        let analysis = judge.analyze(1, "床前明月光", &answers(&["床", "前", "明", "月", "光"]));
        let id = judge.persist(1, "guest", &analysis).unwrap();
        assert!(id > 0);

        let history = get_learning_history(&conn, "guest", 10).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].title, "静夜思");
        assert_eq!(history[0].score, 100);
        assert_eq!(history[0].completion_status, "completed");
        assert!(history[0].completion_time.is_some());
    }

    #[test]
    fn test_history_is_scoped_to_user_and_limited() {
        let conn = test_conn();
        seed_poems(&conn).unwrap();

        let judge = SmartJudge::new(&conn);
        let analysis = judge.analyze(1, "床前明月光", &[]);
        for _ in 0..3 {
            judge.persist(1, "alice", &analysis).unwrap();
        }
        judge.persist(1, "bob", &analysis).unwrap();

        assert_eq!(get_learning_history(&conn, "alice", 10).unwrap().len(), 3);
        assert_eq!(get_learning_history(&conn, "alice", 2).unwrap().len(), 2);
        assert_eq!(get_learning_history(&conn, "bob", 10).unwrap().len(), 1);
    }

    #[test]
    fn test_answers_column_is_valid_json() {
        let conn = test_conn();
        seed_poems(&conn).unwrap();

        let judge = SmartJudge::new(&conn);
        let analysis = judge.analyze(1, "床前明月光", &answers(&["床", "前", "明", "夜", "光"]));
        judge.persist(1, "guest", &analysis).unwrap();

        let raw: String = conn
            .query_row("SELECT answers FROM user_learning_records LIMIT 1", [], |row| row.get(0))
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["3"]["correct"], "月");
        assert_eq!(parsed["3"]["user_input"], "夜");
        assert_eq!(parsed["3"]["is_correct"], false);
    }
}
