//! Jarvis dashboard service binary.
//!
//! Usage: `jv-dashboard-api [config.toml]`. `JARVIS_*` environment variables
//! override file values. Set `JARVIS_SAMPLE_DATA=1` to serve the built-in
//! sample backend instead of the upstream API.

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use jv_dashboard_api::config::DashboardConfig;
use jv_dashboard_api::routes::build_router;
use jv_dashboard_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "jv-dashboard-api starting");

    jv_protocol::catalog::verify_partition()?;

    let mut config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!(path = %path, "loading config file");
            DashboardConfig::from_file(&path)?
        }
        None => DashboardConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok());

    let sample_data = std::env::var("JARVIS_SAMPLE_DATA")
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(false);

    let state = if sample_data {
        tracing::warn!("JARVIS_SAMPLE_DATA set, using in-memory sample backend");
        AppState::with_sample_data()
    } else {
        tracing::info!(
            backend = %config.backend.url,
            preferences = %config.preferences_path.display(),
            "using upstream API"
        );
        AppState::from_config(&config)?
    };

    let app = build_router(state);

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
