//! Filter inference and quick-action endpoints.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use jv_interpreter::QuickAction;
use jv_protocol::filters::{FilterRequest, FilterState};

use crate::error::{ApiError, ApiResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// POST /api/v1/filters/infer: derive filters from a chat query.
pub async fn infer_filters(
    State(state): State<AppState>,
    AppJson(req): AppJson<FilterRequest>,
) -> Json<FilterState> {
    let filters = state.interpreter.interpret(&req);
    Json(filters)
}

/// GET /api/v1/filters/quick-actions: button labels in display order.
pub async fn list_quick_actions() -> Json<Vec<&'static str>> {
    Json(QuickAction::ALL.iter().map(|a| a.label()).collect())
}

#[derive(Debug, Deserialize)]
pub struct QuickActionRequest {
    pub label: String,
}

/// POST /api/v1/filters/quick-actions: filters for one button.
pub async fn run_quick_action(
    AppJson(req): AppJson<QuickActionRequest>,
) -> ApiResult<Json<FilterState>> {
    let action = QuickAction::from_label(&req.label)
        .ok_or_else(|| ApiError::NotFound(format!("quick action '{}' not found", req.label)))?;
    Ok(Json(action.filters()))
}
