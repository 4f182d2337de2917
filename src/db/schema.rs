use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
    // Create tables with COMPLETE schema for new databases
    // Migrations below handle upgrades for existing databases
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS poems (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            dynasty TEXT NOT NULL,
            content TEXT NOT NULL,
            translation TEXT,
            difficulty TEXT NOT NULL DEFAULT 'easy',
            category TEXT
        );

        CREATE TABLE IF NOT EXISTS user_learning_records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id TEXT NOT NULL,
            poem_id INTEGER NOT NULL,
            learning_mode TEXT NOT NULL,
            answers TEXT NOT NULL,
            score INTEGER NOT NULL,
            accuracy_rate REAL NOT NULL,
            completion_status TEXT NOT NULL DEFAULT 'started',
            start_time TEXT NOT NULL,
            completion_time TEXT,
            FOREIGN KEY (poem_id) REFERENCES poems(id)
        );

        CREATE TABLE IF NOT EXISTS learning_analytics (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            poem_id INTEGER NOT NULL,
            character_position INTEGER NOT NULL,
            character_text TEXT NOT NULL,
            wrong_attempts TEXT NOT NULL DEFAULT '[]',
            common_mistakes TEXT NOT NULL DEFAULT '[]',
            success_rate REAL NOT NULL DEFAULT 0,
            updated_at TEXT,
            UNIQUE (poem_id, character_position),
            FOREIGN KEY (poem_id) REFERENCES poems(id)
        );

        CREATE TABLE IF NOT EXISTS poem_ratings (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            poem_id INTEGER NOT NULL,
            user_id TEXT NOT NULL,
            content_rating INTEGER NOT NULL,
            image_rating INTEGER NOT NULL,
            overall_rating INTEGER NOT NULL,
            comment TEXT,
            created_at TEXT,
            UNIQUE (poem_id, user_id),
            FOREIGN KEY (poem_id) REFERENCES poems(id)
        );

        -- Indexes
        CREATE INDEX IF NOT EXISTS idx_records_user ON user_learning_records(user_id);
        CREATE INDEX IF NOT EXISTS idx_records_poem ON user_learning_records(poem_id);
        CREATE INDEX IF NOT EXISTS idx_analytics_poem ON learning_analytics(poem_id);
        CREATE INDEX IF NOT EXISTS idx_ratings_poem ON poem_ratings(poem_id);
        "#,
    )?;

    // Migration: translation column (added after initial schema)
    add_column_if_missing(conn, "poems", "translation", "TEXT")?;

    Ok(())
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    conn.prepare(&format!("SELECT {} FROM {} LIMIT 1", column, table))
        .is_ok()
}

/// Add a column if it doesn't already exist
fn add_column_if_missing(
    conn: &Connection,
    table: &str,
    column: &str,
    column_def: &str,
) -> Result<()> {
    if !column_exists(conn, table, column) {
        conn.execute(
            &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def),
            [],
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        assert!(column_exists(&conn, "poems", "translation"));
        assert!(column_exists(&conn, "learning_analytics", "common_mistakes"));
    }
}
