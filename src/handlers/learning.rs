//! Smart-judge analysis and learning-history endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::db::{self, DbPool, LogOnError};
use crate::judge::SmartJudge;

use super::{db_unavailable, error, ok};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub user_answers: Vec<String>,
    #[serde(default = "default_user")]
    pub user_id: String,
}

fn default_user() -> String {
    "guest".to_string()
}

/// Analyze a recitation attempt: score it, persist the learning record,
/// and fold the attempt into the per-position analytics.
pub async fn analyze_poem(
    State(pool): State<DbPool>,
    Path(id): Path<i64>,
    Json(request): Json<AnalyzeRequest>,
) -> Response {
    let conn = match db::try_lock(&pool) {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    let poem = match db::get_poem_by_id(&conn, id) {
        Ok(Some(poem)) => poem,
        Ok(None) => return error(StatusCode::NOT_FOUND, "诗词不存在"),
        Err(e) => {
            tracing::error!("Failed to load poem {}: {}", id, e);
            return error(StatusCode::INTERNAL_SERVER_ERROR, "学习分析失败");
        }
    };

    let judge = SmartJudge::new(&*conn);
    let analysis = judge.analyze(id, &poem.content, &request.user_answers);

    if let Err(e) = judge.persist(id, &request.user_id, &analysis) {
        tracing::error!("Failed to save learning record for poem {}: {}", id, e);
        return error(StatusCode::INTERNAL_SERVER_ERROR, "学习分析失败");
    }

    // Analytics updates are best-effort; the analysis already succeeded
    for ca in &analysis.character_analyses {
        db::record_attempt(&conn, id, ca.position, &ca.character, ca.is_correct, &ca.user_input)
            .log_warn("Failed to update learning analytics");
    }

    ok(analysis)
}

pub async fn poem_analytics(State(pool): State<DbPool>, Path(id): Path<i64>) -> Response {
    let conn = match db::try_lock(&pool) {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    match db::get_learning_analytics(&conn, id) {
        Ok(analytics) => ok(analytics),
        Err(e) => {
            tracing::error!("Failed to load analytics for poem {}: {}", id, e);
            error(StatusCode::INTERNAL_SERVER_ERROR, "获取学习分析失败")
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

pub async fn learning_history(
    State(pool): State<DbPool>,
    Path(user_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Response {
    let conn = match db::try_lock(&pool) {
        Ok(conn) => conn,
        Err(_) => return db_unavailable(),
    };

    match db::get_learning_history(&conn, &user_id, query.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)) {
        Ok(history) => ok(history),
        Err(e) => {
            tracing::error!("Failed to load history for {}: {}", user_id, e);
            error(StatusCode::INTERNAL_SERVER_ERROR, "获取学习历史失败")
        }
    }
}
