//! User HTTP handlers.
//!
//! Endpoints:
//! - POST /api/users                - Register (or fetch) a username
//! - GET  /api/users/{id}/sessions  - List a user's sessions, most recent first

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::Json;

use dumai_types::identity::UserId;

use crate::http::dto::{RegisterUserRequest, RegisterUserResponse, SessionSummary, SessionsResponse};
use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/users - idempotent; the same username always yields the same id.
pub async fn register_user(
    State(state): State<AppState>,
    body: Result<Json<RegisterUserRequest>, JsonRejection>,
) -> Result<Json<RegisterUserResponse>, AppError> {
    let Json(request) = body?;
    let identity = state.chat.register_user(&request.username).await?;
    Ok(Json(RegisterUserResponse {
        user: identity.into(),
    }))
}

/// GET /api/users/{id}/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    path: Result<Path<UserId>, PathRejection>,
) -> Result<Json<SessionsResponse>, AppError> {
    let Path(user_id) = path?;
    let sessions = state.chat.list_sessions(user_id).await?;
    Ok(Json(SessionsResponse {
        sessions: sessions.into_iter().map(SessionSummary::from).collect(),
    }))
}
