//! `reqwest` client for the ticket and FinOps cost API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

use jv_protocol::catalog::Provider;
use jv_protocol::filters::{DatePreset, Granularity};
use jv_protocol::finops::{AiQueryRequest, AiQueryResponse, CostDataResponse, CostSummary};
use jv_protocol::tickets::{NewTicket, Ticket};

use super::{BackendError, BackendResult, DashboardBackend};
use crate::config::BackendConfig;

pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> BackendResult<T> {
        let request = self.client.get(self.url(path)).query(query);
        self.send(path, request).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> BackendResult<T> {
        let request = self.client.post(self.url(path)).json(body);
        self.send(path, request).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> BackendResult<T> {
        let response = match request.send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(path, error = %e, "upstream request failed");
                return Err(BackendError::Transport(e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path, status = %status, "upstream returned non-success status");
            return Err(BackendError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        response.json().await.map_err(|e| {
            tracing::warn!(path, error = %e, "failed to parse upstream response body");
            BackendError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl DashboardBackend for HttpBackend {
    async fn list_tickets(&self) -> BackendResult<Vec<Ticket>> {
        self.get_json("/tickets", &[]).await
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> BackendResult<()> {
        // The created record comes back in whatever shape the API likes; only
        // success matters because the list is re-fetched.
        let _: serde_json::Value = self.post_json("/tickets", ticket).await?;
        Ok(())
    }

    async fn costs(
        &self,
        preset: DatePreset,
        granularity: Granularity,
    ) -> BackendResult<CostDataResponse> {
        self.get_json(
            "/api/finops/costs",
            &[
                ("preset", preset.as_str()),
                ("granularity", granularity.as_str()),
            ],
        )
        .await
    }

    async fn cost_summary(&self, preset: DatePreset) -> BackendResult<CostSummary> {
        self.get_json("/api/finops/costs/summary", &[("preset", preset.as_str())])
            .await
    }

    async fn providers(&self) -> BackendResult<Vec<String>> {
        self.get_json("/api/finops/providers", &[]).await
    }

    async fn services(&self, provider: Option<Provider>) -> BackendResult<Vec<String>> {
        match provider {
            Some(provider) => {
                self.get_json("/api/finops/services", &[("cloud_provider", provider.name())])
                    .await
            }
            None => self.get_json("/api/finops/services", &[]).await,
        }
    }

    async fn ai_query(&self, query: &str) -> BackendResult<AiQueryResponse> {
        let body = AiQueryRequest {
            query: query.to_string(),
        };
        self.post_json("/api/finops/ai/query", &body).await
    }
}
