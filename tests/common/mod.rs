#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use chrono::{DateTime, Utc};
use erp_schema::{app_router, config::AppConfig, db, AppState};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Alias, Query, SimpleExpr};
use sea_orm::{ConnectionTrait, DbBackend, Value};
use serde_json::Value as Json;
use tower::ServiceExt;
use uuid::Uuid;

/// Application backed by a migrated in-memory SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
}

impl TestApp {
    pub async fn new() -> Self {
        let cfg = AppConfig::new(
            "sqlite::memory:".to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        let state = AppState::new(Arc::new(pool), cfg);

        state
            .migrations
            .run_pending(None)
            .await
            .expect("failed to run migrations in tests");

        // Leave requests are seeded without their employees and leave types.
        state
            .db
            .execute_unprepared("PRAGMA foreign_keys = OFF")
            .await
            .expect("disable foreign keys");

        Self {
            router: app_router(state.clone()),
            state,
        }
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Json>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("router response")
    }

    pub async fn insert_leave_request(&self, seed: LeaveRequestSeed) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let columns: Vec<(&str, Value)> = vec![
            ("Id", id.into()),
            ("EmployeeId", seed.employee_id.into()),
            ("LeaveTypeId", seed.leave_type_id.into()),
            ("StartDate", seed.start.into()),
            ("EndDate", seed.end.into()),
            ("NumberOfDays", seed.days.into()),
            ("Reason", seed.reason.clone().into()),
            ("Status", seed.status.clone().into()),
            ("IsActive", true.into()),
            ("Name", format!("Leave {}", seed.reason).into()),
            ("CreatedOn", now.into()),
            ("CreatedBy", Uuid::nil().into()),
            ("LastModifiedOn", now.into()),
            ("DeletedOn", seed.deleted_on.into()),
        ];

        let stmt = Query::insert()
            .into_table(Alias::new("LeaveRequests"))
            .columns(columns.iter().map(|(name, _)| Alias::new(*name)))
            .values_panic(columns.into_iter().map(|(_, value)| SimpleExpr::Value(value)))
            .to_owned();
        self.state
            .db
            .execute(DbBackend::Sqlite.build(&stmt))
            .await
            .expect("insert leave request");
        id
    }
}

#[derive(Debug, Clone)]
pub struct LeaveRequestSeed {
    pub employee_id: Uuid,
    pub leave_type_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub days: Decimal,
    pub reason: String,
    pub status: String,
    pub deleted_on: Option<DateTime<Utc>>,
}

impl LeaveRequestSeed {
    pub fn new(employee_id: Uuid, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            employee_id,
            leave_type_id: Uuid::new_v4(),
            start,
            end,
            days: Decimal::new(15, 1),
            reason: "Personal errand".to_string(),
            status: "Pending".to_string(),
            deleted_on: None,
        }
    }
}

pub async fn response_json(response: Response) -> Json {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}
