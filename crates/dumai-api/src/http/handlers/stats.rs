//! Health endpoint with store counts.

use axum::extract::State;
use axum::Json;

use crate::http::dto::HealthResponse;
use crate::http::error::AppError;
use crate::state::AppState;

/// GET /health - No auth; reports version and record counts.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let stats = state.chat.stats().await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        users: stats.users,
        sessions: stats.sessions,
        messages: stats.messages,
    }))
}
