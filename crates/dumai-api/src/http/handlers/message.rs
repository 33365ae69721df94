//! Global message log HTTP handler.
//!
//! Endpoint:
//! - GET /api/messages - Every stored message, ascending by id

use axum::extract::State;
use axum::Json;

use crate::http::dto::MessagesResponse;
use crate::http::error::AppError;
use crate::state::AppState;

pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<MessagesResponse>, AppError> {
    let messages = state.chat.list_all_messages().await?;
    Ok(Json(MessagesResponse::from_messages(messages)))
}
