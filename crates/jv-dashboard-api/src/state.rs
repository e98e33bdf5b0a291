//! Shared application state for the Axum server.
//!
//! Supports two modes:
//! - **Upstream mode**: `HttpBackend` plus a JSON preferences file (production).
//! - **Sample mode**: `MockBackend` plus in-memory preferences (tests and development).

use std::sync::Arc;

use tokio::sync::RwLock;

use jv_interpreter::{KeywordInterpreter, QueryInterpreter};
use jv_preferences::{JsonFileStore, MemoryStore, UserPreferencesStore};
use jv_protocol::tickets::Ticket;

use crate::backend::{BackendResult, DashboardBackend, HttpBackend, MockBackend};
use crate::config::DashboardConfig;
use crate::dispatch::CommandHandler;

/// Shared application state, wrapped in `Arc` for Axum handler sharing.
#[derive(Clone)]
pub struct AppState {
    /// Upstream ticket and cost API.
    pub backend: Arc<dyn DashboardBackend>,
    /// Chat query → filter interpreter.
    pub interpreter: Arc<dyn QueryInterpreter>,
    pub preferences: Arc<dyn UserPreferencesStore>,
    /// Ticket list as of the last fetch.
    pub tickets: Arc<RwLock<Vec<Ticket>>>,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn DashboardBackend>,
        preferences: Arc<dyn UserPreferencesStore>,
    ) -> Self {
        Self {
            backend,
            interpreter: Arc::new(KeywordInterpreter::new()),
            preferences,
            tickets: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Real upstream API and preference file, as configured.
    pub fn from_config(config: &DashboardConfig) -> BackendResult<Self> {
        let backend = HttpBackend::new(&config.backend)?;
        let preferences = JsonFileStore::new(config.preferences_path.clone());
        Ok(Self::new(Arc::new(backend), Arc::new(preferences)))
    }

    /// Sample backend data and in-memory preferences.
    pub fn with_sample_data() -> Self {
        Self::new(
            Arc::new(MockBackend::with_sample_data()),
            Arc::new(MemoryStore::new()),
        )
    }

    pub fn command_handler(&self) -> CommandHandler<'_> {
        CommandHandler::new(
            self.backend.as_ref(),
            self.interpreter.as_ref(),
            &self.tickets,
        )
    }
}
