use axum::{extract::State, Json};

use crate::migrator::MigrationStatusEntry;
use crate::{ApiResponse, ApiResult, AppState};

#[utoipa::path(
    get,
    path = "/api/v1/schema/migrations",
    summary = "List migrations",
    description = "Every known migration in apply order, with whether it has been applied",
    responses(
        (status = 200, description = "Migration status", body = ApiResponse<Vec<MigrationStatusEntry>>),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    tag = "Schema"
)]
pub async fn list_migrations(State(state): State<AppState>) -> ApiResult<Vec<MigrationStatusEntry>> {
    let status = state.migrations.status().await?;
    Ok(Json(ApiResponse::success(status)))
}
