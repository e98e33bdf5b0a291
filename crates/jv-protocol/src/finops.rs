//! FinOps cost records and the client-side derivations the dashboard needs
//! from them (chart series, CSV export).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{Provider, Service};
use crate::filters::FilterState;

/// One daily cost row from `GET /api/finops/costs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudCost {
    #[serde(default)]
    pub id: Option<i64>,
    pub cloud_provider: String,
    pub service_name: String,
    pub cost: f64,
    pub date: NaiveDate,
}

/// Cost rows plus the metadata and echoed query the cost API attaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDataResponse {
    pub data: Vec<CloudCost>,
    #[serde(default)]
    pub metadata: serde_json::Value,
    #[serde(default)]
    pub query_info: serde_json::Value,
}

/// Named share of total spend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub name: String,
    pub cost: f64,
    pub percentage: f64,
}

/// Response of `GET /api/finops/costs/summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_cost: f64,
    #[serde(default)]
    pub by_provider: BTreeMap<String, f64>,
    #[serde(default)]
    pub by_service: BTreeMap<String, f64>,
    /// "increasing", "decreasing" or "stable".
    pub trend: String,
    pub percentage_change: f64,
    #[serde(default)]
    pub top_services: Vec<TopItem>,
    #[serde(default)]
    pub top_providers: Vec<TopItem>,
}

/// Body for `POST /api/finops/ai/query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiQueryRequest {
    pub query: String,
}

/// Answer from the AI cost assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiQueryResponse {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Per-date cost totals, one column per provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    #[serde(rename = "AWS")]
    pub aws: f64,
    #[serde(rename = "Azure")]
    pub azure: f64,
    #[serde(rename = "GCP")]
    pub gcp: f64,
}

impl ChartPoint {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            aws: 0.0,
            azure: 0.0,
            gcp: 0.0,
        }
    }

    fn add(&mut self, provider: Provider, cost: f64) {
        match provider {
            Provider::Aws => self.aws += cost,
            Provider::Azure => self.azure += cost,
            Provider::Gcp => self.gcp += cost,
        }
    }

    pub fn total(&self) -> f64 {
        self.aws + self.azure + self.gcp
    }
}

/// Group the rows `filter` admits by date, summing cost per provider.
///
/// Rows naming a provider or service outside the catalog are skipped.
/// Output is sorted by date ascending.
pub fn chart_series(records: &[CloudCost], filter: &FilterState) -> Vec<ChartPoint> {
    let mut grouped: BTreeMap<NaiveDate, ChartPoint> = BTreeMap::new();

    for record in records {
        let (Some(provider), Some(service)) = (
            Provider::from_name(&record.cloud_provider),
            Service::from_name(&record.service_name),
        ) else {
            continue;
        };
        if !filter.admits(provider, service) {
            continue;
        }
        grouped
            .entry(record.date)
            .or_insert_with(|| ChartPoint::empty(record.date))
            .add(provider, record.cost);
    }

    grouped.into_values().collect()
}

/// Render rows as the dashboard's CSV download (no trailing newline).
pub fn to_csv(records: &[CloudCost]) -> String {
    let mut out = String::from("Date,Provider,Service,Cost");
    for record in records {
        out.push('\n');
        out.push_str(&format!(
            "{},{},{},{:.2}",
            record.date, record.cloud_provider, record.service_name, record.cost
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(provider: &str, service: &str, cost: f64, day: u32) -> CloudCost {
        CloudCost {
            id: None,
            cloud_provider: provider.into(),
            service_name: service.into(),
            cost,
            date: NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
        }
    }

    #[test]
    fn chart_series_groups_and_sorts_by_date() {
        let records = [
            row("GCP", "Cloud Storage", 5.0, 3),
            row("AWS", "EC2", 10.0, 2),
            row("AWS", "S3", 2.5, 2),
            row("Azure", "Blob Storage", 4.0, 2),
        ];
        let series = chart_series(&records, &FilterState::default());
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].date.to_string(), "2025-02-02");
        assert_eq!(series[0].aws, 12.5);
        assert_eq!(series[0].azure, 4.0);
        assert_eq!(series[1].gcp, 5.0);
        assert_eq!(series[0].total(), 16.5);
    }

    #[test]
    fn chart_series_applies_filter() {
        let records = [row("AWS", "EC2", 10.0, 1), row("Azure", "Blob Storage", 4.0, 1)];
        let series = chart_series(&records, &FilterState::for_provider(Provider::Azure));
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].aws, 0.0);
        assert_eq!(series[0].azure, 4.0);
    }

    #[test]
    fn chart_series_skips_unknown_names() {
        let records = [row("Oracle", "OCI Compute", 99.0, 1), row("AWS", "Fargate", 1.0, 1)];
        assert!(chart_series(&records, &FilterState::default()).is_empty());
    }

    #[test]
    fn csv_export_format() {
        let records = [row("AWS", "EC2", 10.0, 1), row("Azure", "Virtual Machines", 3.456, 2)];
        assert_eq!(
            to_csv(&records),
            "Date,Provider,Service,Cost\n2025-02-01,AWS,EC2,10.00\n2025-02-02,Azure,Virtual Machines,3.46"
        );
    }

    #[test]
    fn chart_point_uses_provider_column_names() {
        let point = ChartPoint {
            date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            aws: 1.0,
            azure: 2.0,
            gcp: 3.0,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["AWS"], 1.0);
        assert_eq!(json["GCP"], 3.0);
        assert_eq!(json["date"], "2025-02-01");
    }

    #[test]
    fn summary_deserializes_from_cost_api_shape() {
        let json = r#"{
            "total_cost": 1234.5,
            "by_provider": {"AWS": 800.0, "Azure": 434.5},
            "by_service": {"EC2": 600.0},
            "trend": "increasing",
            "percentage_change": 12.3,
            "top_services": [{"name": "EC2", "cost": 600.0, "percentage": 48.6}],
            "top_providers": []
        }"#;
        let summary: CostSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.by_provider["AWS"], 800.0);
        assert_eq!(summary.top_services[0].name, "EC2");
    }
}
