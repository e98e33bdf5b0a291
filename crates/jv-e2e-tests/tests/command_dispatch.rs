//! E2E tests for chat command dispatch, against the scripted backend and
//! against a wiremock upstream through the real HTTP client.

mod helpers;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use helpers::{TestHarness, strings};
use jv_dashboard_api::backend::{BackendError, MockBackend};
use jv_protocol::finops::AiQueryResponse;

fn summary_body() -> serde_json::Value {
    json!({
        "total_cost": 4210.75,
        "by_provider": {"AWS": 2100.0, "Azure": 1300.75, "GCP": 810.0},
        "by_service": {"EC2": 1500.0, "Virtual Machines": 900.0},
        "trend": "decreasing",
        "percentage_change": -2.1,
        "top_services": [{"name": "EC2", "cost": 1500.0, "percentage": 35.6}],
        "top_providers": [{"name": "AWS", "cost": 2100.0, "percentage": 49.9}]
    })
}

/// Create a ticket, then the cache endpoint serves the refreshed list.
#[tokio::test]
async fn e2e_create_ticket_lifecycle() {
    let backend = Arc::new(MockBackend::with_sample_data());
    let h = TestHarness::with_mock(backend.clone());

    let (status, json) = h
        .command(json!({
            "action": "create_ticket",
            "title": "Grant S3 read access",
            "status": "Pending Approval",
            "operation": "request_s3_access",
            "requester": "morgan"
        }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["view"], "tickets");
    assert_eq!(json["tickets"].as_array().unwrap().len(), 4);

    let (_, cached) = h.get("/api/v1/tickets").await;
    let titles: Vec<&str> = cached
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert!(titles.contains(&"Grant S3 read access"));
    assert_eq!(backend.tickets().len(), 4);
}

/// A cost query chains assistant → interpreter → cost fetch → chart.
#[tokio::test]
async fn e2e_cost_query_builds_chart() {
    let backend = Arc::new(MockBackend::with_sample_data());
    backend.set_answer(AiQueryResponse {
        response: "Compute Engine and Cloud Storage drove GCP spend last week.".into(),
        data: None,
        recommendations: vec!["Delete idle persistent disks.".into()],
    });
    let h = TestHarness::with_mock(backend.clone());

    let (status, json) = h
        .command(json!({"action": "query_fin_ops_costs", "query": "how did google do last week?"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["view"], "finops");

    let filters = &json["filters"];
    assert_eq!(strings(&filters["selected_providers"]), ["GCP"]);
    assert_eq!(
        strings(&filters["selected_services"]),
        ["Compute Engine", "Cloud Storage"]
    );
    assert_eq!(filters["date_preset"], "last_week");

    // Last week is always seven days of sample rows.
    let chart = json["chart"].as_array().unwrap();
    assert_eq!(chart.len(), 7);
    for point in chart {
        assert_eq!(point["AWS"], 0.0);
        assert_eq!(point["Azure"], 0.0);
        assert!(point["GCP"].as_f64().unwrap() > 0.0);
    }
    assert_eq!(strings(&json["recommendations"]), ["Delete idle persistent disks."]);
    assert!(
        backend
            .calls()
            .contains(&"costs last_week daily".to_string())
    );
}

/// OpenCreateTicketForm returns the draft without touching the backend.
#[tokio::test]
async fn e2e_open_ticket_form() {
    let backend = Arc::new(MockBackend::with_sample_data());
    let h = TestHarness::with_mock(backend.clone());

    let (status, json) = h
        .command(json!({"action": "open_create_ticket_form", "title": "Laptop replacement"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["view"], "tickets");
    assert_eq!(json["ticket_form"]["title"], "Laptop replacement");
    assert!(json["ticket_form"].get("requester").is_none());
    assert!(backend.calls().is_empty());
}

/// Backend failure surfaces as 502 and leaves the ticket cache alone.
#[tokio::test]
async fn e2e_backend_failure_is_bad_gateway() {
    let backend = Arc::new(MockBackend::with_sample_data());
    let h = TestHarness::with_mock(backend.clone());

    let (status, _) = h.command(json!({"action": "get_tickets"})).await;
    assert_eq!(status, StatusCode::OK);

    backend.fail_with(BackendError::Transport("connection reset".into()));
    let (status, json) = h.command(json!({"action": "get_tickets"})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("connection reset"));

    let (_, cached) = h.get("/api/v1/tickets").await;
    assert_eq!(cached.as_array().unwrap().len(), 3);
}

/// Malformed command payloads are rejected before dispatch.
#[tokio::test]
async fn e2e_malformed_command_rejected() {
    let backend = Arc::new(MockBackend::with_sample_data());
    let h = TestHarness::with_mock(backend.clone());

    let (status, json) = h
        .command(json!({"action": "create_ticket", "title": "no other fields"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
    assert!(json["error"].as_str().unwrap().contains("status"));
    assert!(backend.calls().is_empty());
}

/// Summary command through the real HTTP client against wiremock.
#[tokio::test]
async fn e2e_summary_via_http_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/finops/costs/summary"))
        .and(query_param("preset", "last_month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_body()))
        .expect(1)
        .mount(&server)
        .await;

    let h = TestHarness::with_upstream(&server.uri());
    let (status, json) = h.command(json!({"action": "show_cost_summary"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["summary"]["trend"], "decreasing");
    assert_eq!(json["filters"]["date_preset"], "last_month");
    assert!(json["message"].as_str().unwrap().contains("4210.75"));
}

/// Cost query through the real HTTP client: assistant answer plus cost rows.
#[tokio::test]
async fn e2e_cost_query_via_http_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/finops/ai/query"))
        .and(body_json(json!({"query": "most expensive service this month"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Lambda was the most expensive service this month.",
            "data": {"top": "Lambda"},
            "recommendations": []
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/finops/costs"))
        .and(query_param("preset", "this_month"))
        .and(query_param("granularity", "daily"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "cloud_provider": "AWS", "service_name": "Lambda", "cost": 10.0, "date": "2026-10-01"},
                {"id": 2, "cloud_provider": "AWS", "service_name": "EC2", "cost": 99.0, "date": "2026-10-01"},
                {"id": 3, "cloud_provider": "AWS", "service_name": "Lambda", "cost": 12.5, "date": "2026-10-02"},
                {"id": 4, "cloud_provider": "GCP", "service_name": "Cloud Functions", "cost": 3.0, "date": "2026-10-02"}
            ],
            "metadata": {},
            "query_info": {}
        })))
        .mount(&server)
        .await;

    let h = TestHarness::with_upstream(&server.uri());
    let (status, json) = h
        .command(json!({"action": "query_fin_ops_costs", "query": "most expensive service this month"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(strings(&json["filters"]["selected_services"]), ["Lambda"]);
    assert_eq!(strings(&json["filters"]["selected_providers"]), ["AWS"]);

    let chart = json["chart"].as_array().unwrap();
    assert_eq!(chart.len(), 2);
    assert_eq!(chart[0]["date"], "2026-10-01");
    assert_eq!(chart[0]["AWS"], 10.0);
    assert_eq!(chart[1]["AWS"], 12.5);
    assert!(json.get("recommendations").is_none());
}

/// Upstream 500 becomes a 502 for the dashboard.
#[tokio::test]
async fn e2e_upstream_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tickets"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let h = TestHarness::with_upstream(&server.uri());
    let (status, json) = h.command(json!({"action": "get_tickets"})).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["status"], 502);
}

/// Service names pass through from the upstream catalog endpoint.
#[tokio::test]
async fn e2e_services_via_http_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/finops/services"))
        .and(query_param("cloud_provider", "GCP"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            "Compute Engine", "Cloud Storage", "Cloud Functions"
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let h = TestHarness::with_upstream(&server.uri());
    let (status, json) = h.get("/api/v1/finops/services?cloud_provider=GCP").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        strings(&json),
        ["Compute Engine", "Cloud Storage", "Cloud Functions"]
    );
}

/// CSV export fetches rows for the requested preset from upstream.
#[tokio::test]
async fn e2e_csv_export_via_http_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/finops/costs"))
        .and(query_param("preset", "this_month"))
        .and(query_param("granularity", "weekly"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "cloud_provider": "Azure", "service_name": "Blob Storage", "cost": 4.5, "date": "2026-10-06"}
            ],
            "metadata": {},
            "query_info": {}
        })))
        .mount(&server)
        .await;

    let h = TestHarness::with_upstream(&server.uri());
    let response = h
        .router
        .clone()
        .oneshot(
            Request::get("/api/v1/finops/costs/export?preset=this_month&granularity=weekly")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        "Date,Provider,Service,Cost\n2026-10-06,Azure,Blob Storage,4.50"
    );
}
