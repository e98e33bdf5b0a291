//! User preference endpoints.
//!
//! The store does blocking file I/O, so each call runs on the blocking pool.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use jv_preferences::{PrefResult, PreferencesPatch, UserPreferences, UserPreferencesStore};

use crate::error::{ApiError, ApiResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// Stored preferences plus the derived first-visit flag.
#[derive(Debug, Serialize)]
pub struct PreferencesView {
    #[serde(flatten)]
    pub preferences: UserPreferences,
    pub is_first_visit: bool,
}

impl From<UserPreferences> for PreferencesView {
    fn from(preferences: UserPreferences) -> Self {
        Self {
            is_first_visit: preferences.is_first_visit(),
            preferences,
        }
    }
}

async fn with_store<F>(state: &AppState, op: F) -> ApiResult<Json<PreferencesView>>
where
    F: FnOnce(&dyn UserPreferencesStore) -> PrefResult<UserPreferences> + Send + 'static,
{
    let store: Arc<dyn UserPreferencesStore> = state.preferences.clone();
    let prefs = tokio::task::spawn_blocking(move || op(store.as_ref()))
        .await
        .map_err(|e| ApiError::Internal(format!("preferences task failed: {e}")))??;
    Ok(Json(prefs.into()))
}

/// GET /api/v1/preferences
pub async fn get_preferences(State(state): State<AppState>) -> ApiResult<Json<PreferencesView>> {
    with_store(&state, |store| store.load()).await
}

/// PATCH /api/v1/preferences: merge the fields present in the body.
pub async fn update_preferences(
    State(state): State<AppState>,
    AppJson(patch): AppJson<PreferencesPatch>,
) -> ApiResult<Json<PreferencesView>> {
    with_store(&state, move |store| store.save(&patch)).await
}

/// DELETE /api/v1/preferences: back to defaults.
pub async fn reset_preferences(State(state): State<AppState>) -> ApiResult<Json<PreferencesView>> {
    tracing::info!("resetting user preferences");
    with_store(&state, |store| store.reset()).await
}

/// POST /api/v1/preferences/favorites/{id}: add or remove a favorite.
pub async fn toggle_favorite(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> ApiResult<Json<PreferencesView>> {
    if item_id.trim().is_empty() {
        return Err(ApiError::BadRequest("favorite id must not be empty".into()));
    }
    with_store(&state, move |store| store.toggle_favorite(&item_id)).await
}
