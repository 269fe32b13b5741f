//! Reimbursement claim routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    AppState,
    middleware::AuthUser,
    routes::{app_error, check_policy, error_body, leave::EmployeeSummary},
};
use atrium_core::approval::{ApprovalError, RequestStatus};
use atrium_core::policy::Action;
use atrium_db::{
    ReimbursementRepository,
    entities::{reimbursements, users},
    repositories::CreateReimbursementInput,
};

/// Creates the reimbursement routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reimbursements", post(create_reimbursement))
        .route("/reimbursements", get(list_all_reimbursements))
        .route("/reimbursements/my", get(list_my_reimbursements))
        .route("/reimbursements/{id}/status", put(set_reimbursement_status))
}

/// Request body for creating a reimbursement claim.
#[derive(Debug, Deserialize)]
pub struct CreateReimbursementRequest {
    /// Claimed amount.
    pub amount: Decimal,
    /// What the expense was for.
    pub description: String,
    /// When the expense was incurred.
    pub expense_date: chrono::NaiveDate,
}

/// Request body for deciding a claim.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// Target status, `approved` or `rejected`.
    pub status: String,
    /// Optional reason, only meaningful for rejections.
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

/// Response for a reimbursement claim.
#[derive(Debug, Serialize)]
pub struct ReimbursementResponse {
    /// Claim ID.
    pub id: Uuid,
    /// The claiming employee.
    pub employee_id: Uuid,
    /// Claimed amount.
    pub amount: Decimal,
    /// What the expense was for.
    pub description: String,
    /// Current status.
    pub status: String,
    /// Who decided, if decided.
    pub approved_by: Option<Uuid>,
    /// Reason supplied on rejection, if any.
    pub rejection_reason: Option<String>,
    /// When the expense was incurred.
    pub expense_date: chrono::NaiveDate,
    /// When the claim was created.
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
    /// When the claim was last updated.
    pub updated_at: chrono::DateTime<chrono::FixedOffset>,
    /// Claiming employee details, present on the all-claims listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeSummary>,
}

fn reimbursement_response(
    model: reimbursements::Model,
    employee: Option<&users::Model>,
) -> ReimbursementResponse {
    ReimbursementResponse {
        id: model.id,
        employee_id: model.employee_id,
        amount: model.amount,
        description: model.description,
        status: RequestStatus::from(model.status).as_str().to_string(),
        approved_by: model.approved_by,
        rejection_reason: model.rejection_reason,
        expense_date: model.expense_date,
        created_at: model.created_at,
        updated_at: model.updated_at,
        employee: employee.map(EmployeeSummary::from_user),
    }
}

fn approval_error(err: &ApprovalError) -> axum::response::Response {
    error_body(err.status_code(), err.error_code(), &err.to_string())
}

/// POST /reimbursements - Create a pending claim.
async fn create_reimbursement(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateReimbursementRequest>,
) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::CreateReimbursement) {
        return denied;
    }

    if payload.description.trim().is_empty() {
        return app_error(&atrium_shared::AppError::Validation(
            "Description is required".to_string(),
        ));
    }

    let repo = ReimbursementRepository::new((*state.db).clone());
    match repo
        .create(CreateReimbursementInput {
            employee_id: user.user_id(),
            amount: payload.amount,
            description: payload.description.trim().to_string(),
            expense_date: payload.expense_date,
        })
        .await
    {
        Ok(model) => {
            info!(claim_id = %model.id, employee_id = %model.employee_id, "Reimbursement claim created");
            (
                StatusCode::CREATED,
                Json(reimbursement_response(model, None)),
            )
                .into_response()
        }
        Err(e) => approval_error(&e),
    }
}

/// GET /reimbursements/my - List the caller's claims, newest first.
async fn list_my_reimbursements(
    State(state): State<AppState>,
    user: AuthUser,
) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::ListOwnReimbursements) {
        return denied;
    }

    let repo = ReimbursementRepository::new((*state.db).clone());
    match repo.list_for_employee(user.user_id()).await {
        Ok(models) => Json(
            models
                .into_iter()
                .map(|m| reimbursement_response(m, None))
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => approval_error(&e),
    }
}

/// GET /reimbursements - List all claims with employee details.
async fn list_all_reimbursements(
    State(state): State<AppState>,
    user: AuthUser,
) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::ListAllReimbursements) {
        return denied;
    }

    let repo = ReimbursementRepository::new((*state.db).clone());
    match repo.list_all().await {
        Ok(rows) => Json(
            rows.into_iter()
                .map(|(m, employee)| reimbursement_response(m, employee.as_ref()))
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => approval_error(&e),
    }
}

/// PUT /reimbursements/{id}/status - Approve or reject a pending claim.
async fn set_reimbursement_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::SetReimbursementStatus) {
        return denied;
    }

    let repo = ReimbursementRepository::new((*state.db).clone());
    match repo
        .set_status(
            id,
            &payload.status,
            user.user_id(),
            payload.rejection_reason,
        )
        .await
    {
        Ok(model) => {
            info!(claim_id = %model.id, status = %payload.status, decided_by = %user.user_id(), "Reimbursement claim decided");
            Json(reimbursement_response(model, None)).into_response()
        }
        Err(e) => approval_error(&e),
    }
}
