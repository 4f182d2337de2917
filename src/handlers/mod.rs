//! JSON API handlers. Every response uses the
//! `{"success": bool, "data": ..., "error": ...}` envelope the frontend
//! expects.

pub mod learning;
pub mod poems;
pub mod ratings;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::db::DbPool;

#[derive(Serialize)]
struct ApiEnvelope<T: Serialize> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn ok<T: Serialize>(data: T) -> Response {
    Json(ApiEnvelope {
        success: true,
        data: Some(data),
        error: None,
    })
    .into_response()
}

pub fn error(status: StatusCode, message: &str) -> Response {
    let body = Json(ApiEnvelope::<()> {
        success: false,
        data: None,
        error: Some(message.to_string()),
    });
    (status, body).into_response()
}

pub fn db_unavailable() -> Response {
    error(StatusCode::INTERNAL_SERVER_ERROR, "数据库不可用")
}

async fn health() -> Response {
    ok(serde_json::json!({ "status": "ok" }))
}

pub fn router(pool: DbPool) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/poems", get(poems::list_poems))
        .route("/api/poems-stats", get(poems::poem_stats))
        .route("/api/poems/{id}", get(poems::get_poem))
        .route("/api/poems/{id}/analyze", post(learning::analyze_poem))
        .route("/api/poems/{id}/analytics", get(learning::poem_analytics))
        .route("/api/poems/{id}/rating", post(ratings::submit_rating))
        .route("/api/poems/{id}/ratings", get(ratings::rating_stats))
        .route("/api/learning/history/{user_id}", get(learning::learning_history))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    fn test_server() -> TestServer {
        let conn = Connection::open_in_memory().unwrap();
        db::run_migrations(&conn).unwrap();
        db::seed_poems(&conn).unwrap();
        let pool: DbPool = Arc::new(Mutex::new(conn));
        TestServer::new(router(pool)).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let server = test_server();
        let response = server.get("/api/health").await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_poems_returns_seed_data() {
        let server = test_server();
        let body: Value = server.get("/api/poems").await.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["total"], 6);
        assert_eq!(body["data"]["poems"][0]["title"], "静夜思");
    }

    #[tokio::test]
    async fn test_list_poems_with_search() {
        let server = test_server();
        let body: Value = server
            .get("/api/poems")
            .add_query_param("search", "李白")
            .await
            .json();
        assert_eq!(body["data"]["total"], 1);
    }

    #[tokio::test]
    async fn test_get_poem_includes_ratings() {
        let server = test_server();
        let body: Value = server.get("/api/poems/1").await.json();
        assert_eq!(body["data"]["title"], "静夜思");
        assert_eq!(body["data"]["ratings"]["total_ratings"], 0);
    }

    #[tokio::test]
    async fn test_get_missing_poem_is_404() {
        let server = test_server();
        let response = server.get("/api/poems/999").await;
        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_analyze_persists_record_and_analytics() {
        let server = test_server();

        // 静夜思 has 20 characters after punctuation stripping
        let mut answers: Vec<String> = "床前明月光疑是地上霜举头望明月低头思故乡"
            .chars()
            .map(|c| c.to_string())
            .collect();
        answers[3] = "夜".to_string(); // wrong character at position 3

        let response = server
            .post("/api/poems/1/analyze")
            .json(&json!({ "userAnswers": answers, "userId": "alice" }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["totalCharacters"], 20);
        assert_eq!(body["data"]["correctCount"], 19);
        let position = &body["data"]["characterAnalyses"][3];
        assert_eq!(position["character"], "月");
        assert_eq!(position["userInput"], "夜");
        assert_eq!(position["isCorrect"], false);

        // The attempt shows up in per-position analytics
        let analytics: Value = server.get("/api/poems/1/analytics").await.json();
        assert_eq!(analytics["data"]["3"]["common_mistakes"][0], "夜");

        // And in the user's history
        let history: Value = server.get("/api/learning/history/alice").await.json();
        assert_eq!(history["data"][0]["poem_id"], 1);
        assert_eq!(history["data"][0]["completion_status"], "completed");
    }

    #[tokio::test]
    async fn test_analyze_missing_poem_is_404() {
        let server = test_server();
        let response = server
            .post("/api/poems/999/analyze")
            .json(&json!({ "userAnswers": ["床"] }))
            .await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_rating_flow_and_validation() {
        let server = test_server();

        let response = server
            .post("/api/poems/1/rating")
            .json(&json!({
                "content_rating": 5,
                "image_rating": 4,
                "overall_rating": 5,
                "user_id": "alice"
            }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["data"]["total_ratings"], 1);

        let stats: Value = server.get("/api/poems/1/ratings").await.json();
        assert_eq!(stats["data"]["average_overall"], 5.0);

        // Out-of-range rating rejected
        let response = server
            .post("/api/poems/1/rating")
            .json(&json!({
                "content_rating": 6,
                "image_rating": 4,
                "overall_rating": 5
            }))
            .await;
        response.assert_status_bad_request();
    }
}
