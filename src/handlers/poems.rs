//! Poem catalogue endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;

use crate::db::{self, DbPool, RatingStats};
use crate::domain::{Poem, PoemFilter};

use super::{db_unavailable, error, ok};

#[derive(Serialize)]
struct PoemList {
    poems: Vec<Poem>,
    total: usize,
}

pub async fn list_poems(State(pool): State<DbPool>, Query(filter): Query<PoemFilter>) -> Response {
    let conn = match db::try_lock(&pool) {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    match db::list_poems(&conn, &filter) {
        Ok(poems) => {
            let total = poems.len();
            ok(PoemList { poems, total })
        }
        Err(e) => {
            tracing::error!("Failed to list poems: {}", e);
            error(StatusCode::INTERNAL_SERVER_ERROR, "获取诗词列表失败")
        }
    }
}

#[derive(Serialize)]
struct PoemDetail {
    #[serde(flatten)]
    poem: Poem,
    ratings: RatingStats,
}

pub async fn get_poem(State(pool): State<DbPool>, Path(id): Path<i64>) -> Response {
    let conn = match db::try_lock(&pool) {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let poem = match db::get_poem_by_id(&conn, id) {
        Ok(Some(poem)) => poem,
        Ok(None) => return error(StatusCode::NOT_FOUND, "诗词不存在"),
        Err(e) => {
            tracing::error!("Failed to load poem {}: {}", id, e);
            return error(StatusCode::INTERNAL_SERVER_ERROR, "获取诗词详情失败");
        }
    };

    match db::get_rating_stats(&conn, id) {
        Ok(ratings) => ok(PoemDetail { poem, ratings }),
        Err(e) => {
            tracing::error!("Failed to load ratings for poem {}: {}", id, e);
            error(StatusCode::INTERNAL_SERVER_ERROR, "获取诗词详情失败")
        }
    }
}

pub async fn poem_stats(State(pool): State<DbPool>) -> Response {
    let conn = match db::try_lock(&pool) {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    match db::get_poem_stats(&conn) {
        Ok(stats) => ok(stats),
        Err(e) => {
            tracing::error!("Failed to load poem stats: {}", e);
            error(StatusCode::INTERNAL_SERVER_ERROR, "获取诗词统计失败")
        }
    }
}
