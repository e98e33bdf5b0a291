//! FinOps pass-through endpoints: upstream catalog names and CSV export.

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use serde::Deserialize;

use jv_protocol::catalog::Provider;
use jv_protocol::filters::{DatePreset, Granularity};
use jv_protocol::finops::to_csv;

use crate::dispatch::DEFAULT_PRESET;
use crate::error::{ApiError, ApiResult};
use crate::extract::AppQuery;
use crate::state::AppState;

/// GET /api/v1/finops/providers: provider names known to the cost store.
pub async fn list_providers(State(state): State<AppState>) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.backend.providers().await?))
}

#[derive(Debug, Deserialize)]
pub struct ServicesQuery {
    /// Provider display name, e.g. "AWS".
    pub cloud_provider: Option<String>,
}

/// GET /api/v1/finops/services[?cloud_provider=]: service names.
pub async fn list_services(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ServicesQuery>,
) -> ApiResult<Json<Vec<String>>> {
    let provider = match query.cloud_provider.as_deref() {
        Some(name) => Some(
            Provider::from_name(name)
                .ok_or_else(|| ApiError::BadRequest(format!("unknown cloud provider '{name}'")))?,
        ),
        None => None,
    };
    Ok(Json(state.backend.services(provider).await?))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub preset: Option<DatePreset>,
    #[serde(default)]
    pub granularity: Granularity,
}

/// GET /api/v1/finops/costs/export: cost rows for a preset as CSV.
pub async fn export_costs(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ExportQuery>,
) -> ApiResult<impl IntoResponse> {
    let preset = query.preset.unwrap_or(DEFAULT_PRESET);
    let costs = state.backend.costs(preset, query.granularity).await?;
    tracing::info!(preset = %preset, rows = costs.data.len(), "exporting costs");

    let disposition = format!("attachment; filename=\"finops-costs-{preset}.csv\"");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        to_csv(&costs.data),
    ))
}
