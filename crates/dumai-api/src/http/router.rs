//! Axum router configuration with middleware.
//!
//! Routes live under `/api/`, plus `/health`. Middleware: CORS, tracing.
//!
//! When `DUMAI_WEB_DIR` points at a built web client, it is served as a
//! static SPA: API routes take priority and unknown paths fall through to
//! `index.html`. Without it only the API is served.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Environment variable naming the static web client directory.
pub const WEB_DIR_ENV: &str = "DUMAI_WEB_DIR";

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/users", post(handlers::user::register_user))
        .route("/users/{id}/sessions", get(handlers::user::list_sessions))
        .route("/sessions/{id}/messages", get(handlers::session::get_messages))
        .route("/messages", get(handlers::message::list_messages));

    let mut router = Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::stats::health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Ok(web_dir) = std::env::var(WEB_DIR_ENV) {
        if std::path::Path::new(&web_dir).exists() {
            let index_path = format!("{web_dir}/index.html");
            let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %web_dir, "SPA static file serving enabled");
        } else {
            tracing::warn!(path = %web_dir, "Web directory does not exist, serving API only");
        }
    }

    router
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use dumai_core::reply::{BoxReplyGenerator, ReplyGenerator};
    use dumai_types::config::AppConfig;
    use dumai_types::error::ReplyError;

    struct Stub;

    impl ReplyGenerator for Stub {
        fn name(&self) -> &str {
            "stub"
        }

        async fn generate_reply(
            &self,
            text: &str,
            is_initial: bool,
            _personality: Option<&str>,
        ) -> Result<String, ReplyError> {
            if text == "break" {
                return Err(ReplyError::Unavailable("connection reset".into()));
            }
            Ok(if is_initial {
                "Hello, I am always wrong.".to_string()
            } else {
                format!("{text}? Obviously bananas.")
            })
        }
    }

    fn app() -> Router {
        build_router(AppState::with_generator(
            AppConfig::default(),
            BoxReplyGenerator::new(Stub),
        ))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_reports_counts() {
        let app = app();
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["users"], 0);
        assert_eq!(body["messages"], 0);
    }

    #[tokio::test]
    async fn test_chat_flow_with_username() {
        let app = app();

        let (status, welcome) = send(
            &app,
            "POST",
            "/api/chat",
            Some(json!({"initial": true, "username": "ada"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(welcome["message"], "Hello, I am always wrong.");
        assert_eq!(welcome["language"], "und");
        let session_id = welcome["sessionId"].as_str().unwrap().to_string();

        let (status, reply) = send(
            &app,
            "POST",
            "/api/chat",
            Some(json!({"message": "What is the sun made of?", "sessionId": session_id})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply["sessionId"], session_id.as_str());
        assert_eq!(reply["language"], "en");

        let (status, user) = send(&app, "POST", "/api/users", Some(json!({"username": "ada"}))).await;
        assert_eq!(status, StatusCode::OK);
        let user_id = user["user"]["id"].as_u64().unwrap();
        assert!(user["user"].get("credential").is_none());

        let (status, sessions) =
            send(&app, "GET", &format!("/api/users/{user_id}/sessions"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sessions["sessions"][0]["id"], session_id.as_str());
        assert_eq!(sessions["sessions"][0]["title"], "What is the sun made of?");
        assert!(sessions["sessions"][0]["createdAt"].is_string());

        let (status, messages) =
            send(&app, "GET", &format!("/api/sessions/{session_id}/messages"), None).await;
        assert_eq!(status, StatusCode::OK);
        let messages = messages["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0]["role"], "assistant");
        assert_eq!(messages[1]["role"], "user");
        assert_eq!(messages[1]["sessionId"], session_id.as_str());

        let (_, all) = send(&app, "GET", "/api/messages", None).await;
        assert_eq!(all["messages"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_register_user_is_idempotent() {
        let app = app();
        let (_, first) = send(&app, "POST", "/api/users", Some(json!({"username": "bob"}))).await;
        let (_, second) = send(&app, "POST", "/api/users", Some(json!({"username": "bob"}))).await;
        assert_eq!(first["user"]["id"], second["user"]["id"]);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_validation_errors_list_fields() {
        let app = app();
        let (status, body) = send(&app, "POST", "/api/chat", Some(json!({"username": "   "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["field"], "username");
    }

    #[tokio::test]
    async fn test_unknown_session_messages_is_not_found() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/sessions/nope/messages", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["message"].as_str().unwrap().contains("nope"));
    }

    #[tokio::test]
    async fn test_unknown_user_sessions_is_not_found() {
        let app = app();
        let (status, _) = send(&app, "GET", "/api/users/77/sessions", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_user_id_is_bad_request() {
        let app = app();
        let (status, _) = send(&app, "GET", "/api/users/abc/sessions", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway_and_writes_nothing() {
        let app = app();
        let (status, body) = send(
            &app,
            "POST",
            "/api/chat",
            Some(json!({"message": "break", "username": "ada"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["message"].as_str().unwrap().contains("Even my errors are wrong"));

        let (_, all) = send(&app, "GET", "/api/messages", None).await;
        assert!(all["messages"].as_array().unwrap().is_empty());
    }
}
