//! Chat turn HTTP handler.
//!
//! Endpoint:
//! - POST /api/chat - Run one chat turn and return the assistant reply

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use dumai_core::chat::{TurnOutcome, TurnRequest};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/chat
///
/// Body: `{message?, initial?, sessionId?, userId?, username?}`.
/// Returns `{message, sessionId, language}`.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<TurnRequest>, JsonRejection>,
) -> Result<Json<TurnOutcome>, AppError> {
    let Json(request) = body?;
    let outcome = state.chat.handle_turn(request).await?;
    Ok(Json(outcome))
}
