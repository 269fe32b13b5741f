//! Payslip routes.
//!
//! Upload is a multipart form (`employee_id`, `month`, `year`, `file`);
//! the PDF lands in object storage and only the key is stored in the
//! database. Download streams the stored bytes back with the canonical
//! period in the filename.

use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    AppState,
    middleware::AuthUser,
    routes::{app_error, check_policy, error_body, leave::EmployeeSummary},
};
use atrium_core::payslip::{Month, PayslipError};
use atrium_core::policy::Action;
use atrium_core::storage::{StorageError, StorageService};
use atrium_db::{
    PayslipRepository,
    entities::{payslips, users},
    repositories::CreatePayslipInput,
};

/// Creates the payslip routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payslips", post(upload_payslip))
        .route("/payslips", get(list_my_payslips))
        .route("/payslips/all", get(list_all_payslips))
        .route("/payslips/{id}/download", get(download_payslip))
}

/// Response for a payslip record.
#[derive(Debug, Serialize)]
pub struct PayslipResponse {
    /// Payslip ID.
    pub id: Uuid,
    /// The employee the document belongs to.
    pub employee_id: Uuid,
    /// Covered month, canonical name.
    pub month: String,
    /// Covered year.
    pub year: i32,
    /// Who uploaded the document.
    pub uploaded_by: Uuid,
    /// When the document was uploaded.
    pub uploaded_at: chrono::DateTime<chrono::FixedOffset>,
    /// Employee details, present on the all-payslips listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee: Option<EmployeeSummary>,
}

fn payslip_response(model: payslips::Model, employee: Option<&users::Model>) -> PayslipResponse {
    PayslipResponse {
        id: model.id,
        employee_id: model.employee_id,
        month: model.month,
        year: model.year,
        uploaded_by: model.uploaded_by,
        uploaded_at: model.uploaded_at,
        employee: employee.map(EmployeeSummary::from_user),
    }
}

fn payslip_error(err: &PayslipError) -> axum::response::Response {
    error_body(err.status_code(), err.error_code(), &err.to_string())
}

fn validation(message: impl Into<String>) -> axum::response::Response {
    app_error(&atrium_shared::AppError::Validation(message.into()))
}

fn storage_error(err: &StorageError) -> axum::response::Response {
    match err {
        StorageError::FileTooLarge { .. } => error_body(413, "FILE_TOO_LARGE", &err.to_string()),
        StorageError::InvalidMimeType { .. } => {
            error_body(400, "INVALID_FILE_TYPE", &err.to_string())
        }
        StorageError::NotFound { .. } => error_body(404, "FILE_NOT_FOUND", &err.to_string()),
        StorageError::Configuration(_) | StorageError::Operation(_) => {
            error!(error = %err, "Storage operation failed");
            app_error(&atrium_shared::AppError::Internal(
                "Storage operation failed".to_string(),
            ))
        }
    }
}

/// Fields collected from the upload form.
struct UploadForm {
    employee_id: Uuid,
    month: Month,
    year: i32,
    content_type: String,
    bytes: Vec<u8>,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, axum::response::Response> {
    let mut employee_id = None;
    let mut month = None;
    let mut year = None;
    let mut file = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        validation(format!("Malformed multipart body: {e}"))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "employee_id" => {
                let text = field.text().await.map_err(bad_field)?;
                let id = text
                    .trim()
                    .parse::<Uuid>()
                    .map_err(|_| validation("employee_id must be a UUID"))?;
                employee_id = Some(id);
            }
            "month" => {
                let text = field.text().await.map_err(bad_field)?;
                let parsed = Month::parse(text.trim()).ok_or_else(|| {
                    let err = PayslipError::UnknownMonth(text.trim().to_string());
                    payslip_error(&err)
                })?;
                month = Some(parsed);
            }
            "year" => {
                let text = field.text().await.map_err(bad_field)?;
                let parsed = text
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| validation("year must be an integer"))?;
                year = Some(parsed);
            }
            "file" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(bad_field)?;
                file = Some((content_type, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (Some(employee_id), Some(month), Some(year), Some((content_type, bytes))) =
        (employee_id, month, year, file)
    else {
        return Err(validation(
            "employee_id, month, year, and file are all required",
        ));
    };

    Ok(UploadForm {
        employee_id,
        month,
        year,
        content_type,
        bytes,
    })
}

fn bad_field(err: axum::extract::multipart::MultipartError) -> axum::response::Response {
    validation(format!("Unreadable form field: {err}"))
}

/// POST /payslips - Upload a payslip PDF for an employee's period.
async fn upload_payslip(
    State(state): State<AppState>,
    user: AuthUser,
    multipart: Multipart,
) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::UploadPayslip) {
        return denied;
    }

    let form = match read_upload_form(multipart).await {
        Ok(f) => f,
        Err(resp) => return resp,
    };

    if let Err(e) = state
        .storage
        .validate_upload(&form.content_type, form.bytes.len() as u64)
    {
        return storage_error(&e);
    }

    let file_key =
        StorageService::payslip_key(form.employee_id, form.month, form.year, Uuid::new_v4());

    // Register the period first so a duplicate never leaves an orphan file.
    let repo = PayslipRepository::new((*state.db).clone());
    let model = match repo
        .create(CreatePayslipInput {
            employee_id: form.employee_id,
            month: form.month,
            year: form.year,
            file_key: file_key.clone(),
            uploaded_by: user.user_id(),
        })
        .await
    {
        Ok(m) => m,
        Err(e) => return payslip_error(&e),
    };

    if let Err(e) = state.storage.store(&file_key, form.bytes).await {
        // Roll the registration back; the period must stay claimable.
        if let Err(db_err) = repo.delete(model.id).await {
            warn!(payslip_id = %model.id, error = %db_err, "Failed to roll back payslip row");
        }
        return storage_error(&e);
    }

    info!(payslip_id = %model.id, employee_id = %model.employee_id, "Payslip uploaded");
    (StatusCode::CREATED, Json(payslip_response(model, None))).into_response()
}

/// GET /payslips - List the caller's payslips, most recent period first.
async fn list_my_payslips(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::ListOwnPayslips) {
        return denied;
    }

    let repo = PayslipRepository::new((*state.db).clone());
    match repo.list_for_employee(user.user_id()).await {
        Ok(models) => Json(
            models
                .into_iter()
                .map(|m| payslip_response(m, None))
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => payslip_error(&e),
    }
}

/// GET /payslips/all - List every payslip with employee details.
async fn list_all_payslips(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::ListAllPayslips) {
        return denied;
    }

    let repo = PayslipRepository::new((*state.db).clone());
    match repo.list_all().await {
        Ok(rows) => Json(
            rows.into_iter()
                .map(|(m, employee)| payslip_response(m, employee.as_ref()))
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => payslip_error(&e),
    }
}

/// GET /payslips/{id}/download - Download the stored PDF.
///
/// Employees can fetch their own documents; managers and admins any.
async fn download_payslip(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::ListOwnPayslips) {
        return denied;
    }

    let repo = PayslipRepository::new((*state.db).clone());
    let payslip = match repo.find_by_id(id).await {
        Ok(Some(p)) => p,
        Ok(None) => return payslip_error(&PayslipError::PayslipNotFound(id)),
        Err(e) => return payslip_error(&e),
    };

    // Someone else's document needs the all-payslips privilege.
    if payslip.employee_id != user.user_id() {
        if let Err(denied) = check_policy(user.role(), Action::ListAllPayslips) {
            return denied;
        }
    }

    let bytes = match state.storage.fetch(&payslip.file_key).await {
        Ok(b) => b,
        Err(e) => return storage_error(&e),
    };

    let filename = format!("payslip-{}-{}.pdf", payslip.month, payslip.year);
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}
