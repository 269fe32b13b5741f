//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{AppState, middleware::auth::auth_middleware};
use atrium_core::policy::{Action, PolicyError, Role, authorize};
use atrium_shared::AppError;

pub mod attendance;
pub mod auth;
pub mod health;
pub mod leave;
pub mod payslips;
pub mod reimbursements;
pub mod users;

/// Creates the API router with all routes.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(leave::routes())
        .merge(reimbursements::routes())
        .merge(attendance::routes())
        .merge(payslips::routes())
        .merge(users::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(protected_routes)
}

/// Builds the uniform `{error, message}` JSON error response.
pub(crate) fn error_body(status: u16, code: &str, message: &str) -> Response {
    let status =
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": code, "message": message }))).into_response()
}

/// Converts a cross-cutting [`AppError`] into a response. Domain-specific
/// error enums map through their own `status_code()`/`error_code()` pairs.
pub(crate) fn app_error(err: &AppError) -> Response {
    error_body(err.status_code(), err.error_code(), &err.to_string())
}

/// Runs the policy check and converts a denial into a response.
pub(crate) fn check_policy(actor: Option<Role>, action: Action) -> Result<(), Response> {
    authorize(actor, action).map_err(|err: PolicyError| {
        error_body(err.status_code(), err.error_code(), &err.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_policy_denies_employee_decisions() {
        assert!(check_policy(Some(Role::Employee), Action::SetLeaveStatus).is_err());
        assert!(check_policy(Some(Role::Manager), Action::SetLeaveStatus).is_ok());
        assert!(check_policy(None, Action::ListOwnLeave).is_err());
    }
}
