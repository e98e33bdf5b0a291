//! In-memory backend for tests and offline development.
//!
//! Serves scripted tickets, cost rows, a summary and an assistant answer, and
//! records every call for assertions.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};

use jv_protocol::catalog::{Provider, Service};
use jv_protocol::filters::{DatePreset, Granularity};
use jv_protocol::finops::{AiQueryResponse, CloudCost, CostDataResponse, CostSummary, TopItem};
use jv_protocol::tickets::{NewTicket, Ticket};

use super::{BackendError, BackendResult, DashboardBackend};

/// Days of history before the reference date in the sample data.
const SAMPLE_DAYS: i64 = 90;

pub struct MockBackend {
    tickets: Mutex<Vec<Ticket>>,
    costs: Vec<CloudCost>,
    /// "Today" for resolving date presets.
    as_of: NaiveDate,
    summary: CostSummary,
    answer: Mutex<AiQueryResponse>,
    /// When set, every call fails with this error.
    failure: Mutex<Option<BackendError>>,
    /// Calls made so far, e.g. `"cost_summary last_month"`.
    calls: Mutex<Vec<String>>,
}

impl MockBackend {
    /// Empty mock: no tickets, no cost rows, zero summary.
    pub fn new() -> Self {
        Self {
            tickets: Mutex::new(Vec::new()),
            costs: Vec::new(),
            as_of: chrono::Local::now().date_naive(),
            summary: CostSummary {
                total_cost: 0.0,
                by_provider: BTreeMap::new(),
                by_service: BTreeMap::new(),
                trend: "stable".into(),
                percentage_change: 0.0,
                top_services: Vec::new(),
                top_providers: Vec::new(),
            },
            answer: Mutex::new(AiQueryResponse {
                response: String::new(),
                data: None,
                recommendations: Vec::new(),
            }),
            failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Three tickets, 90 days of costs for every catalog service up to
    /// today, and an assistant answer naming EC2 as the top service.
    pub fn with_sample_data() -> Self {
        Self::sample_as_of(chrono::Local::now().date_naive())
    }

    /// Sample data with `today` as the reference date.
    pub fn sample_as_of(today: NaiveDate) -> Self {
        let tickets = vec![
            sample_ticket(1, "VPN drops every hour", "Open", "bug_fix", "dana"),
            sample_ticket(2, "GitLab access for intern", "Pending Approval", "request_gitlab_access", "sam"),
            sample_ticket(3, "Rotate staging certificates", "Completed", "task", "lee"),
        ];

        let mut costs = Vec::new();
        let mut next_id = 1;
        for offset in (0..=SAMPLE_DAYS).rev() {
            let date = today - Duration::days(offset);
            let wobble = (offset % 7) as f64;
            for service in Service::ALL {
                costs.push(CloudCost {
                    id: Some(next_id),
                    cloud_provider: service.provider().name().to_string(),
                    service_name: service.name().to_string(),
                    cost: sample_cost(service) + wobble,
                    date,
                });
                next_id += 1;
            }
        }

        let mut by_provider = BTreeMap::new();
        let mut by_service = BTreeMap::new();
        for record in &costs {
            *by_provider.entry(record.cloud_provider.clone()).or_insert(0.0) += record.cost;
            *by_service.entry(record.service_name.clone()).or_insert(0.0) += record.cost;
        }
        let total_cost: f64 = by_provider.values().sum();
        let share = |cost: f64| if total_cost > 0.0 { cost / total_cost * 100.0 } else { 0.0 };
        let top_service_cost = by_service.get(Service::Ec2.name()).copied().unwrap_or(0.0);
        let top_provider_cost = by_provider.get(Provider::Aws.name()).copied().unwrap_or(0.0);

        let summary = CostSummary {
            total_cost,
            top_services: vec![TopItem {
                name: Service::Ec2.name().to_string(),
                cost: top_service_cost,
                percentage: share(top_service_cost),
            }],
            top_providers: vec![TopItem {
                name: Provider::Aws.name().to_string(),
                cost: top_provider_cost,
                percentage: share(top_provider_cost),
            }],
            by_provider,
            by_service,
            trend: "increasing".into(),
            percentage_change: 3.5,
        };

        Self {
            tickets: Mutex::new(tickets),
            costs,
            as_of: today,
            summary,
            answer: Mutex::new(AiQueryResponse {
                response: "EC2 was your most expensive service, followed by Compute Engine.".into(),
                data: None,
                recommendations: vec!["Consider reserved instances for steady EC2 workloads.".into()],
            }),
            ..Self::new()
        }
    }

    /// Replace the assistant's scripted answer.
    pub fn set_answer(&self, answer: AiQueryResponse) {
        *lock(&self.answer) = answer;
    }

    /// Make every subsequent call fail with `err`.
    pub fn fail_with(&self, err: BackendError) {
        *lock(&self.failure) = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn tickets(&self) -> Vec<Ticket> {
        lock(&self.tickets).clone()
    }

    fn record(&self, call: String) -> BackendResult<()> {
        lock(&self.calls).push(call);
        match lock(&self.failure).clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

fn sample_ticket(id: i64, title: &str, status: &str, operation: &str, requester: &str) -> Ticket {
    Ticket {
        id,
        title: title.into(),
        status: status.into(),
        operation: operation.into(),
        requester: requester.into(),
    }
}

fn sample_cost(service: Service) -> f64 {
    match service {
        Service::Ec2 => 180.0,
        Service::S3 => 42.0,
        Service::Lambda => 18.0,
        Service::VirtualMachines => 120.0,
        Service::BlobStorage => 25.0,
        Service::AzureFunctions => 12.0,
        Service::ComputeEngine => 140.0,
        Service::CloudStorage => 30.0,
        Service::CloudFunctions => 9.0,
    }
}

#[async_trait]
impl DashboardBackend for MockBackend {
    async fn list_tickets(&self) -> BackendResult<Vec<Ticket>> {
        self.record("list_tickets".into())?;
        Ok(self.tickets())
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> BackendResult<()> {
        self.record(format!("create_ticket {}", ticket.title))?;
        let mut tickets = lock(&self.tickets);
        let id = tickets.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        tickets.push(Ticket {
            id,
            title: ticket.title.clone(),
            status: ticket.status.clone(),
            operation: ticket.operation.clone(),
            requester: ticket.requester.clone(),
        });
        Ok(())
    }

    async fn costs(
        &self,
        preset: DatePreset,
        granularity: Granularity,
    ) -> BackendResult<CostDataResponse> {
        self.record(format!("costs {preset} {}", granularity.as_str()))?;
        let (start, end) = preset.date_range(self.as_of);
        let data: Vec<CloudCost> = self
            .costs
            .iter()
            .filter(|record| (start..=end).contains(&record.date))
            .cloned()
            .collect();
        Ok(CostDataResponse {
            metadata: serde_json::json!({ "record_count": data.len() }),
            query_info: serde_json::json!({
                "preset": preset.as_str(),
                "granularity": granularity.as_str(),
                "start_date": start.to_string(),
                "end_date": end.to_string(),
            }),
            data,
        })
    }

    async fn cost_summary(&self, preset: DatePreset) -> BackendResult<CostSummary> {
        self.record(format!("cost_summary {preset}"))?;
        Ok(self.summary.clone())
    }

    async fn providers(&self) -> BackendResult<Vec<String>> {
        self.record("providers".into())?;
        Ok(Provider::ALL.iter().map(|p| p.name().to_string()).collect())
    }

    async fn services(&self, provider: Option<Provider>) -> BackendResult<Vec<String>> {
        self.record(match provider {
            Some(p) => format!("services {p}"),
            None => "services".into(),
        })?;
        let services: Vec<String> = Service::ALL
            .iter()
            .filter(|s| provider.is_none_or(|p| s.provider() == p))
            .map(|s| s.name().to_string())
            .collect();
        Ok(services)
    }

    async fn ai_query(&self, query: &str) -> BackendResult<AiQueryResponse> {
        self.record(format!("ai_query {query}"))?;
        Ok(lock(&self.answer).clone())
    }
}
