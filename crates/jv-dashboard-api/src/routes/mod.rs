//! API route definitions and router builder.

pub mod commands;
pub mod filters;
pub mod finops;
pub mod health;
pub mod preferences;
pub mod tickets;

use axum::Router;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Filter inference
        .route("/filters/infer", post(filters::infer_filters))
        .route(
            "/filters/quick-actions",
            get(filters::list_quick_actions).post(filters::run_quick_action),
        )
        // Chat commands
        .route("/commands", post(commands::run_command))
        .route("/tickets", get(tickets::list_tickets))
        // Upstream FinOps catalog and export
        .route("/finops/providers", get(finops::list_providers))
        .route("/finops/services", get(finops::list_services))
        .route("/finops/costs/export", get(finops::export_costs))
        // User preferences
        .route(
            "/preferences",
            get(preferences::get_preferences)
                .patch(preferences::update_preferences)
                .delete(preferences::reset_preferences),
        )
        .route(
            "/preferences/favorites/{id}",
            post(preferences::toggle_favorite),
        );

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
