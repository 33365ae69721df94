//! Session HTTP handlers.
//!
//! Endpoint:
//! - GET /api/sessions/{id}/messages - Messages of a stored session, oldest first

use axum::extract::{Path, State};
use axum::Json;

use crate::http::dto::MessagesResponse;
use crate::http::error::AppError;
use crate::state::AppState;

/// GET /api/sessions/{id}/messages
///
/// 404 when the id is unknown, including transient anonymous ids.
pub async fn get_messages(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<MessagesResponse>, AppError> {
    let messages = state.chat.list_messages(&session_id).await?;
    Ok(Json(MessagesResponse::from_messages(messages)))
}
