use axum::{
    extract::{Path, State},
    Json,
};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::dto::{LeaveRequestResponse, LeaveRequestSearch};
use crate::errors::ServiceError;
use crate::{ApiResponse, ApiResult, AppState, PaginatedResponse};

#[utoipa::path(
    get,
    path = "/api/v1/hr/leave-requests/{id}",
    summary = "Get leave request",
    description = "Retrieve a single leave request by its ID",
    params(("id" = Uuid, Path, description = "Leave request ID")),
    responses(
        (status = 200, description = "Leave request retrieved", body = ApiResponse<LeaveRequestResponse>),
        (status = 404, description = "Leave request not found", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    tag = "HR"
)]
pub async fn get_leave_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<LeaveRequestResponse> {
    let request = state
        .leave_requests
        .find_by_id(id)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("leave request {id}")))?;
    Ok(Json(ApiResponse::success(request)))
}

#[utoipa::path(
    post,
    path = "/api/v1/hr/leave-requests/search",
    summary = "Search leave requests",
    description = "Page through leave requests filtered by employee, leave type, status, date window and reason keyword",
    request_body = LeaveRequestSearch,
    responses(
        (status = 200, description = "Matching leave requests", body = ApiResponse<PaginatedResponse<LeaveRequestResponse>>),
        (status = 400, description = "Invalid search", body = crate::errors::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::errors::ErrorResponse),
    ),
    tag = "HR"
)]
pub async fn search_leave_requests(
    State(state): State<AppState>,
    Json(search): Json<LeaveRequestSearch>,
) -> ApiResult<PaginatedResponse<LeaveRequestResponse>> {
    search.validate()?;

    let page_size = state.page_size(search.page_size);
    debug!(?search, page_size, "searching leave requests");

    let (items, total) = state.leave_requests.search(&search, page_size).await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        items,
        total,
        search.page,
        page_size,
    ))))
}
