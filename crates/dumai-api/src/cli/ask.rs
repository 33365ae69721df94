//! One-shot question from the command line.

use anyhow::Result;
use console::style;

use dumai_core::chat::TurnRequest;
use dumai_types::error::ChatError;

use crate::state::AppState;

/// Run a single chat turn and print the reply.
///
/// Stores are in-memory, so nothing outlives the process.
pub async fn ask(state: &AppState, message: String, username: Option<String>, json: bool) -> Result<()> {
    let mut request = TurnRequest::message(message);
    if let Some(username) = username {
        request = request.with_username(username);
    }

    let outcome = state
        .chat
        .handle_turn(request)
        .await
        .map_err(|e| match e {
            ChatError::Upstream(reply) => {
                tracing::debug!(error = %reply, "Reply generation failed");
                anyhow::anyhow!(reply.user_message())
            }
            other => other.into(),
        })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style("DumAI").magenta().bold(),
        style(format!("[{}]", outcome.language)).dim()
    );
    println!();
    for line in outcome.message.lines() {
        println!("  {line}");
    }
    println!();

    Ok(())
}
