/*!
 * # Health Check Module
 *
 * - Basic health check (`/health`) - process is up, with uptime and version
 * - Readiness check (`/health/ready`) - database answers a ping
 * - Version (`/health/version`)
 *
 * Readiness also reports how many migrations are still pending. Pending
 * migrations degrade the service but do not make it unready.
 */

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{error, info, warn};

use crate::migrator::MigrationService;

/// Basic health status
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
    Degraded,
}

/// Health check detail
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthDetail {
    pub status: HealthStatus,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Overall health information
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub details: BTreeMap<String, HealthDetail>,
}

/// Health check state
#[derive(Clone)]
pub struct HealthState {
    pub db_pool: Arc<DatabaseConnection>,
    pub migrations: MigrationService,
    pub start_time: SystemTime,
}

impl HealthState {
    pub fn new(db_pool: Arc<DatabaseConnection>) -> Self {
        Self {
            migrations: MigrationService::new(db_pool.clone()),
            db_pool,
            start_time: SystemTime::now(),
        }
    }

    /// Calculate system uptime
    pub fn uptime(&self) -> u64 {
        SystemTime::now()
            .duration_since(self.start_time)
            .unwrap_or(Duration::from_secs(0))
            .as_secs()
    }

    /// Pings the database and reads the migration table.
    pub async fn check(&self) -> HealthInfo {
        let mut details = BTreeMap::new();

        let database = match self.db_pool.ping().await {
            Ok(()) => HealthDetail {
                status: HealthStatus::Up,
                message: None,
                timestamp: Utc::now(),
            },
            Err(e) => {
                error!("Database health check failed: {}", e);
                HealthDetail {
                    status: HealthStatus::Down,
                    message: Some("database unreachable".into()),
                    timestamp: Utc::now(),
                }
            }
        };
        let database_up = database.status == HealthStatus::Up;
        details.insert("database".to_string(), database);

        if database_up {
            let migrations = match self.migrations.status().await {
                Ok(entries) => {
                    let pending = entries.iter().filter(|m| !m.applied).count();
                    HealthDetail {
                        status: if pending == 0 {
                            HealthStatus::Up
                        } else {
                            HealthStatus::Degraded
                        },
                        message: Some(format!("{pending} pending")),
                        timestamp: Utc::now(),
                    }
                }
                Err(e) => {
                    warn!("Migration status check failed: {}", e);
                    HealthDetail {
                        status: HealthStatus::Degraded,
                        message: Some("migration status unavailable".into()),
                        timestamp: Utc::now(),
                    }
                }
            };
            details.insert("migrations".to_string(), migrations);
        }

        let status = if details.values().any(|d| d.status == HealthStatus::Down) {
            HealthStatus::Down
        } else if details.values().any(|d| d.status == HealthStatus::Degraded) {
            HealthStatus::Degraded
        } else {
            HealthStatus::Up
        };

        HealthInfo {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            uptime_seconds: self.uptime(),
            details,
        }
    }
}

/// Returns build and version information
pub async fn version_info() -> impl IntoResponse {
    Json(json!({
        "version": env!("CARGO_PKG_VERSION"),
        "commit": option_env!("GIT_HASH").unwrap_or("unknown"),
    }))
}

/// Basic health check endpoint
pub async fn health_check(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": HealthStatus::Up,
            "version": env!("CARGO_PKG_VERSION"),
            "uptime_seconds": state.uptime(),
            "timestamp": Utc::now(),
        })),
    )
}

/// Readiness check endpoint
pub async fn readiness_check(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    info!("Readiness check endpoint called");

    let health = state.check().await;
    let status_code = match health.status {
        HealthStatus::Up | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };

    (
        status_code,
        Json(json!({
            "ready": health.status != HealthStatus::Down,
            "status": health.status,
            "details": health.details,
            "timestamp": health.timestamp,
        })),
    )
}

/// Creates router with health check endpoints
pub fn health_routes(db_pool: Arc<DatabaseConnection>) -> Router {
    let health_state = Arc::new(HealthState::new(db_pool));

    Router::new()
        .route("/", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/version", get(version_info))
        .with_state(health_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::establish_connection;

    #[tokio::test]
    async fn unmigrated_database_is_degraded() {
        let db = establish_connection("sqlite::memory:").await.unwrap();
        let state = HealthState::new(Arc::new(db));

        let health = state.check().await;
        assert_eq!(health.status, HealthStatus::Degraded);
        assert_eq!(health.details["database"].status, HealthStatus::Up);
        assert_eq!(health.details["migrations"].status, HealthStatus::Degraded);
    }

    #[tokio::test]
    async fn migrated_database_is_up() {
        let db = Arc::new(establish_connection("sqlite::memory:").await.unwrap());
        MigrationService::new(db.clone())
            .run_pending(None)
            .await
            .unwrap();

        let health = HealthState::new(db).check().await;
        assert_eq!(health.status, HealthStatus::Up);
        assert_eq!(health.details["migrations"].message.as_deref(), Some("0 pending"));
    }
}
