use chrono::Utc;
use rusqlite::{params, Connection, Result};
use serde::Serialize;

/// A submitted star rating (1-5 each). Range checking happens at the
/// handler; this layer stores what it is given.
#[derive(Debug, Clone)]
pub struct NewRating {
    pub poem_id: i64,
    pub user_id: String,
    pub content_rating: i64,
    pub image_rating: i64,
    pub overall_rating: i64,
    pub comment: Option<String>,
}

/// One row per (poem, user): re-rating replaces the previous rating.
pub fn upsert_rating(conn: &Connection, rating: &NewRating) -> Result<i64> {
    conn.execute(
        r#"
        INSERT OR REPLACE INTO poem_ratings
            (poem_id, user_id, content_rating, image_rating, overall_rating, comment, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
        params![
            rating.poem_id,
            rating.user_id,
            rating.content_rating,
            rating.image_rating,
            rating.overall_rating,
            rating.comment,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingStats {
    pub average_content: f64,
    pub average_image: f64,
    pub average_overall: f64,
    pub total_ratings: i64,
}

pub fn get_rating_stats(conn: &Connection, poem_id: i64) -> Result<RatingStats> {
    conn.query_row(
        r#"
        SELECT COALESCE(AVG(content_rating), 0),
                      COALESCE(AVG(image_rating), 0),
                      COALESCE(AVG(overall_rating), 0),
                      COUNT(*)
        FROM poem_ratings
        WHERE poem_id = ?1
        "#,
        params![poem_id],
        |row| {
            Ok(RatingStats {
                average_content: row.get(0)?,
                average_image: row.get(1)?,
                average_overall: row.get(2)?,
                total_ratings: row.get(3)?,
            })
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{seed_poems, test_conn};

    fn rating(poem_id: i64, user_id: &str, overall: i64) -> NewRating {
        NewRating {
            poem_id,
            user_id: user_id.to_string(),
            content_rating: 4,
            image_rating: 3,
            overall_rating: overall,
            comment: None,
        }
    }

    #[test]
    fn test_stats_average_over_users() {
        let conn = test_conn();
        seed_poems(&conn).unwrap();

        upsert_rating(&conn, &rating(1, "alice", 5)).unwrap();
        upsert_rating(&conn, &rating(1, "bob", 3)).unwrap();

        let stats = get_rating_stats(&conn, 1).unwrap();
        assert_eq!(stats.total_ratings, 2);
        assert_eq!(stats.average_overall, 4.0);
    }

    #[test]
    fn test_rerating_replaces_previous() {
        let conn = test_conn();
        seed_poems(&conn).unwrap();

        upsert_rating(&conn, &rating(1, "alice", 2)).unwrap();
        upsert_rating(&conn, &rating(1, "alice", 5)).unwrap();

        let stats = get_rating_stats(&conn, 1).unwrap();
        assert_eq!(stats.total_ratings, 1);
        assert_eq!(stats.average_overall, 5.0);
    }

    #[test]
    fn test_unrated_poem_has_zero_stats() {
        let conn = test_conn();
        seed_poems(&conn).unwrap();
        let stats = get_rating_stats(&conn, 2).unwrap();
        assert_eq!(stats.total_ratings, 0);
        assert_eq!(stats.average_overall, 0.0);
    }
}
