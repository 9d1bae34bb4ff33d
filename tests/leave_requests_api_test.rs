mod common;

use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

use erp_schema::dto::LeaveRequestSearch;
use erp_schema::errors::ServiceError;

use common::{response_json, LeaveRequestSeed, TestApp};

fn day(month: u32, day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, month, day, 0, 0, 0).unwrap()
}

#[tokio::test]
async fn get_returns_camel_case_leave_request() {
    let app = TestApp::new().await;
    let employee = Uuid::new_v4();
    let mut seed = LeaveRequestSeed::new(employee, day(11, 3), day(11, 4));
    seed.reason = "Family trip".into();
    let id = app.insert_leave_request(seed).await;

    let response = app
        .request(Method::GET, &format!("/api/v1/hr/leave-requests/{id}"), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["id"], json!(id));
    assert_eq!(data["employeeId"], json!(employee));
    assert_eq!(data["reason"], "Family trip");
    assert_eq!(data["status"], "Pending");
    assert_eq!(data["numberOfDays"], "1.5");
    assert_eq!(data["isActive"], true);
    assert!(data["approverManagerId"].is_null());
    assert_eq!(
        data["startDate"].as_str().map(|s| s.starts_with("2025-11-03T00:00:00")),
        Some(true)
    );
}

#[tokio::test]
async fn missing_and_deleted_requests_are_not_found() {
    let app = TestApp::new().await;
    let mut seed = LeaveRequestSeed::new(Uuid::new_v4(), day(11, 3), day(11, 4));
    seed.deleted_on = Some(day(11, 10));
    let deleted = app.insert_leave_request(seed).await;

    for id in [deleted, Uuid::new_v4()] {
        let response = app
            .request(Method::GET, &format!("/api/v1/hr/leave-requests/{id}"), None)
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Not Found");
    }
}

#[tokio::test]
async fn search_pages_newest_first_and_skips_deleted_rows() {
    let app = TestApp::new().await;
    let employee = Uuid::new_v4();
    for start in 1..=5 {
        app.insert_leave_request(LeaveRequestSeed::new(
            employee,
            day(10, start),
            day(10, start + 1),
        ))
        .await;
    }
    let mut deleted = LeaveRequestSeed::new(employee, day(10, 20), day(10, 21));
    deleted.deleted_on = Some(day(10, 22));
    app.insert_leave_request(deleted).await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/hr/leave-requests/search",
            Some(json!({ "employeeId": employee, "page": 2, "pageSize": 2 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let page = &body["data"];
    assert_eq!(page["total"], 5);
    assert_eq!(page["page"], 2);
    assert_eq!(page["limit"], 2);
    assert_eq!(page["total_pages"], 3);

    let starts: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["startDate"].as_str().unwrap())
        .collect();
    assert_eq!(starts.len(), 2);
    assert!(starts[0].starts_with("2025-10-03"), "{starts:?}");
    assert!(starts[1].starts_with("2025-10-02"), "{starts:?}");
}

#[rstest]
#[case::status(json!({ "status": "Approved" }), 1)]
#[case::keyword(json!({ "keyword": "dentist" }), 1)]
#[case::window_overlapping_end(json!({ "from": "2025-11-04T00:00:00Z", "to": "2025-11-06T00:00:00Z" }), 1)]
#[case::window_covering_all(json!({ "from": "2025-11-01T00:00:00Z", "to": "2025-11-30T00:00:00Z" }), 2)]
#[case::window_before_all(json!({ "to": "2025-10-31T00:00:00Z" }), 0)]
#[case::unfiltered(json!({}), 2)]
#[tokio::test]
async fn search_filters(#[case] filters: serde_json::Value, #[case] expected: u64) {
    let app = TestApp::new().await;

    let mut approved = LeaveRequestSeed::new(Uuid::new_v4(), day(11, 3), day(11, 5));
    approved.status = "Approved".into();
    approved.reason = "Annual dentist appointment".into();
    app.insert_leave_request(approved).await;

    let mut pending = LeaveRequestSeed::new(Uuid::new_v4(), day(11, 17), day(11, 18));
    pending.days = rust_decimal::Decimal::new(25, 1);
    app.insert_leave_request(pending).await;

    let response = app
        .request(Method::POST, "/api/v1/hr/leave-requests/search", Some(filters))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["total"], expected);
}

#[tokio::test]
async fn search_clamps_page_size_to_configured_maximum() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/hr/leave-requests/search",
            Some(json!({ "pageSize": 10_000 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["data"]["limit"], 100);
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn search_rejects_inverted_window() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/hr/leave-requests/search",
            Some(json!({ "from": "2025-12-01T00:00:00Z", "to": "2025-11-01T00:00:00Z" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_rejects_page_numbers_past_the_limit() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/hr/leave-requests/search",
            Some(json!({ "page": 1_000_000_000_000_000_000u64, "pageSize": 20 })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The repository refuses an offset that does not fit even when called directly.
    let search = LeaveRequestSearch {
        page: u64::MAX,
        ..Default::default()
    };
    let result = app.state.leave_requests.search(&search, 100).await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn migration_status_lists_every_migration_as_applied() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api/v1/schema/migrations", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 7);
    assert!(entries.iter().all(|entry| entry["applied"] == true));
    assert_eq!(entries[0]["name"], "m20250813_120433_create_accounting_tables");
}

#[tokio::test]
async fn health_endpoints_report_ready() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.request(Method::GET, "/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ready"], true);
    assert_eq!(body["status"], "up");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert!(body["paths"]["/api/v1/hr/leave-requests/search"].is_object());
}
