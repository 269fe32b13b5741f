//! Attendance routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
    AppState,
    middleware::AuthUser,
    routes::{check_policy, error_body},
};
use atrium_core::attendance::AttendanceError;
use atrium_core::policy::Action;
use atrium_db::{AttendanceRepository, entities::attendance_records};

/// Creates the attendance routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/attendance", post(mark_attendance))
        .route("/attendance", get(list_attendance))
}

/// Response for an attendance record.
#[derive(Debug, Serialize)]
pub struct AttendanceResponse {
    /// Record ID.
    pub id: Uuid,
    /// The marked employee.
    pub employee_id: Uuid,
    /// The org-local business day.
    pub date: chrono::NaiveDate,
    /// Always `present`.
    pub status: &'static str,
    /// The instant the mark was made.
    pub marked_at: chrono::DateTime<chrono::FixedOffset>,
}

fn attendance_response(model: attendance_records::Model) -> AttendanceResponse {
    AttendanceResponse {
        id: model.id,
        employee_id: model.employee_id,
        date: model.date,
        status: "present",
        marked_at: model.marked_at,
    }
}

fn attendance_error(err: &AttendanceError) -> axum::response::Response {
    error_body(err.status_code(), err.error_code(), &err.to_string())
}

/// POST /attendance - Mark the caller present for today.
///
/// "Today" is the org-local calendar day, and the mark only succeeds
/// inside the daily window.
async fn mark_attendance(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::MarkAttendance) {
        return denied;
    }

    let repo = AttendanceRepository::new((*state.db).clone());
    match repo.mark(user.user_id(), chrono::Utc::now()).await {
        Ok(model) => {
            info!(employee_id = %model.employee_id, date = %model.date, "Attendance marked");
            (StatusCode::CREATED, Json(attendance_response(model))).into_response()
        }
        Err(e) => attendance_error(&e),
    }
}

/// GET /attendance - List the caller's attendance, most recent day first.
async fn list_attendance(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::ListOwnAttendance) {
        return denied;
    }

    let repo = AttendanceRepository::new((*state.db).clone());
    match repo.list_for_employee(user.user_id()).await {
        Ok(models) => Json(
            models
                .into_iter()
                .map(attendance_response)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => attendance_error(&e),
    }
}
