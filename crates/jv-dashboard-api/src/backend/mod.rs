//! Client side of the upstream ticket and FinOps cost API.
//!
//! Two implementations:
//! - `HttpBackend`: the real API over `reqwest` (in `http.rs`)
//! - `MockBackend`: scripted, in-memory data (in `mock.rs`)

pub mod http;
pub mod mock;

use async_trait::async_trait;

use jv_protocol::catalog::Provider;
use jv_protocol::filters::{DatePreset, Granularity};
use jv_protocol::finops::{AiQueryResponse, CostDataResponse, CostSummary};
use jv_protocol::tickets::{NewTicket, Ticket};

pub use http::HttpBackend;
pub use mock::MockBackend;

/// Errors from the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    #[error("upstream returned HTTP {status} for {path}")]
    Status { status: u16, path: String },

    #[error("upstream request failed: {0}")]
    Transport(String),

    #[error("failed to decode upstream response: {0}")]
    Decode(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Operations the dashboard needs from the ticket and cost API.
#[async_trait]
pub trait DashboardBackend: Send + Sync {
    async fn list_tickets(&self) -> BackendResult<Vec<Ticket>>;

    /// Create a ticket. Callers re-fetch the list afterwards.
    async fn create_ticket(&self, ticket: &NewTicket) -> BackendResult<()>;

    async fn costs(
        &self,
        preset: DatePreset,
        granularity: Granularity,
    ) -> BackendResult<CostDataResponse>;

    async fn cost_summary(&self, preset: DatePreset) -> BackendResult<CostSummary>;

    /// Provider names known to the cost store.
    async fn providers(&self) -> BackendResult<Vec<String>>;

    /// Service names, optionally for one provider.
    async fn services(&self, provider: Option<Provider>) -> BackendResult<Vec<String>>;

    /// Ask the AI cost assistant.
    async fn ai_query(&self, query: &str) -> BackendResult<AiQueryResponse>;
}
