//! Leave request routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    AppState,
    middleware::AuthUser,
    routes::{app_error, check_policy, error_body},
};
use atrium_core::approval::{ApprovalError, RequestStatus};
use atrium_core::policy::Action;
use atrium_db::{LeaveRepository, entities::leave_requests, entities::users};

/// Creates the leave routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leave", post(create_leave))
        .route("/leave", get(list_all_leave))
        .route("/leave/my", get(list_my_leave))
        .route("/leave/{id}/status", put(set_leave_status))
}

/// Request body for creating a leave request.
#[derive(Debug, Deserialize)]
pub struct CreateLeaveRequest {
    /// First day of leave.
    pub start_date: chrono::NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: chrono::NaiveDate,
    /// Why the leave is needed.
    pub reason: String,
}

/// Request body for deciding a leave request.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// Target status, `approved` or `rejected`.
    pub status: String,
}

/// Response for a leave request.
#[derive(Debug, Serialize)]
pub struct LeaveResponse {
    /// Request ID.
    pub id: Uuid,
    /// The requesting employee.
    pub employee_id: Uuid,
    /// First day of leave.
    pub start_date: chrono::NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: chrono::NaiveDate,
    /// Why the leave is needed.
    pub reason: String,
    /// Current status.
    pub status: String,
    /// Who decided, if decided.
    pub approved_by: Option<Uuid>,
    /// When the request was created.
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    /// When the request was last updated.
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
    /// Requesting employee details, present on the all-requests listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeSummary>,
}

/// Minimal employee details embedded in listings.
#[derive(Debug, Serialize)]
pub struct EmployeeSummary {
    /// Employee ID.
    pub id: Uuid,
    /// Employee name.
    pub name: String,
    /// Employee email.
    pub email: String,
}

impl EmployeeSummary {
    pub(crate) fn from_user(user: &users::Model) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

fn leave_response(model: leave_requests::Model, employee: Option<&users::Model>) -> LeaveResponse {
    LeaveResponse {
        id: model.id,
        employee_id: model.employee_id,
        start_date: model.start_date,
        end_date: model.end_date,
        reason: model.reason,
        status: RequestStatus::from(model.status).as_str().to_string(),
        approved_by: model.approved_by,
        created_at: model.created_at,
        updated_at: model.updated_at,
        employee: employee.map(EmployeeSummary::from_user),
    }
}

fn approval_error(err: &ApprovalError) -> axum::response::Response {
    error_body(err.status_code(), err.error_code(), &err.to_string())
}

/// POST /leave - Create a pending leave request.
async fn create_leave(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateLeaveRequest>,
) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::CreateLeave) {
        return denied;
    }

    if payload.reason.trim().is_empty() {
        return app_error(&atrium_shared::AppError::Validation(
            "Reason is required".to_string(),
        ));
    }

    let repo = LeaveRepository::new((*state.db).clone());
    match repo
        .create(
            user.user_id(),
            payload.start_date,
            payload.end_date,
            payload.reason.trim(),
        )
        .await
    {
        Ok(model) => {
            info!(request_id = %model.id, employee_id = %model.employee_id, "Leave request created");
            (StatusCode::CREATED, Json(leave_response(model, None))).into_response()
        }
        Err(e) => approval_error(&e),
    }
}

/// GET /leave/my - List the caller's leave requests, newest first.
async fn list_my_leave(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::ListOwnLeave) {
        return denied;
    }

    let repo = LeaveRepository::new((*state.db).clone());
    match repo.list_for_employee(user.user_id()).await {
        Ok(models) => Json(
            models
                .into_iter()
                .map(|m| leave_response(m, None))
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => approval_error(&e),
    }
}

/// GET /leave - List all leave requests with employee details.
async fn list_all_leave(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::ListAllLeave) {
        return denied;
    }

    let repo = LeaveRepository::new((*state.db).clone());
    match repo.list_all().await {
        Ok(rows) => Json(
            rows.into_iter()
                .map(|(m, employee)| leave_response(m, employee.as_ref()))
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => approval_error(&e),
    }
}

/// PUT /leave/{id}/status - Approve or reject a pending request.
async fn set_leave_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::SetLeaveStatus) {
        return denied;
    }

    let repo = LeaveRepository::new((*state.db).clone());
    match repo.set_status(id, &payload.status, user.user_id()).await {
        Ok(model) => {
            info!(request_id = %model.id, status = %payload.status, decided_by = %user.user_id(), "Leave request decided");
            Json(leave_response(model, None)).into_response()
        }
        Err(e) => approval_error(&e),
    }
}
