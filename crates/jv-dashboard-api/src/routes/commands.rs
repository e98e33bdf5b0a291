//! Chat command endpoint.

use axum::Json;
use axum::extract::State;

use jv_protocol::commands::{ChatCommand, CommandOutcome};

use crate::error::ApiResult;
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/v1/commands: run a chat assistant action.
pub async fn run_command(
    State(state): State<AppState>,
    AppJson(command): AppJson<ChatCommand>,
) -> ApiResult<Json<CommandOutcome>> {
    let outcome = state.command_handler().handle(command).await?;
    Ok(Json(outcome))
}
