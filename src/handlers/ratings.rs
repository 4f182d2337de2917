//! Star-rating endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::db::{self, DbPool, NewRating};

use super::{db_unavailable, error, ok};

#[derive(Debug, Deserialize)]
pub struct RatingRequest {
    pub content_rating: i64,
    pub image_rating: i64,
    pub overall_rating: i64,
    pub comment: Option<String>,
    #[serde(default = "default_user")]
    pub user_id: String,
}

fn default_user() -> String {
    "guest".to_string()
}

fn in_range(value: i64) -> bool {
    (1..=5).contains(&value)
}

pub async fn submit_rating(
    State(pool): State<DbPool>,
    Path(id): Path<i64>,
    Json(request): Json<RatingRequest>,
) -> Response {
    if !in_range(request.content_rating)
        || !in_range(request.image_rating)
        || !in_range(request.overall_rating)
    {
        return error(StatusCode::BAD_REQUEST, "评分必须是1-5的整数");
    }

    let conn = match db::try_lock(&pool) {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    match db::get_poem_by_id(&conn, id) {
        Ok(Some(_)) => {}
        Ok(None) => return error(StatusCode::NOT_FOUND, "诗词不存在"),
        Err(e) => {
            tracing::error!("Failed to load poem {}: {}", id, e);
            return error(StatusCode::INTERNAL_SERVER_ERROR, "保存评分失败");
        }
    }

    let rating = NewRating {
        poem_id: id,
        user_id: request.user_id,
        content_rating: request.content_rating,
        image_rating: request.image_rating,
        overall_rating: request.overall_rating,
        comment: request.comment,
    };

    if let Err(e) = db::upsert_rating(&conn, &rating) {
        tracing::error!("Failed to save rating for poem {}: {}", id, e);
        return error(StatusCode::INTERNAL_SERVER_ERROR, "保存评分失败");
    }

    match db::get_rating_stats(&conn, id) {
        Ok(stats) => ok(stats),
        Err(e) => {
            tracing::error!("Failed to load ratings for poem {}: {}", id, e);
            error(StatusCode::INTERNAL_SERVER_ERROR, "保存评分失败")
        }
    }
}

pub async fn rating_stats(State(pool): State<DbPool>, Path(id): Path<i64>) -> Response {
    let conn = match db::try_lock(&pool) {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    match db::get_rating_stats(&conn, id) {
        Ok(stats) => ok(stats),
        Err(e) => {
            tracing::error!("Failed to load ratings for poem {}: {}", id, e);
            error(StatusCode::INTERNAL_SERVER_ERROR, "获取评分统计失败")
        }
    }
}
