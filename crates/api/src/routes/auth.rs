//! Authentication routes for login, register, and token refresh.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use atrium_core::auth::{hash_password, verify_password};
use atrium_core::policy::Role;
use atrium_db::{UserRepository, entities::users};
use atrium_shared::AppError;
use atrium_shared::auth::{LoginRequest, LoginResponse, RefreshRequest, RegisterRequest, UserInfo};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/refresh", post(refresh))
}

fn internal_error() -> axum::response::Response {
    crate::routes::app_error(&AppError::Internal(
        "An unexpected error occurred".to_string(),
    ))
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid email or password"
        })),
    )
        .into_response()
}

fn user_info(user: &users::Model) -> UserInfo {
    UserInfo {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: Role::from(user.role).as_str().to_string(),
    }
}

/// POST /auth/login - Authenticate a user and return tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());

    let user = match user_repo.find_by_email(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %payload.email, "Login attempt for non-existent user");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error();
        }
    };

    if !user.is_active {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "account_disabled",
                "message": "This account has been disabled"
            })),
        )
            .into_response();
    }

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error();
        }
    }

    let role = Role::from(user.role).as_str();
    let access_token = match state.jwt_service.generate_access_token(user.id, role) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error();
        }
    };
    let refresh_token = match state.jwt_service.generate_refresh_token(user.id, role) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate refresh token");
            return internal_error();
        }
    };

    info!(user_id = %user.id, "User logged in");

    Json(LoginResponse {
        user: user_info(&user),
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    })
    .into_response()
}

/// POST /auth/register - Register a new employee account.
///
/// New accounts always start as employees; role elevation is an admin
/// operation on `/users/{id}/role`.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return crate::routes::app_error(&AppError::Validation(
            "Name and email are required".to_string(),
        ));
    }
    if payload.password.len() < 8 {
        return crate::routes::app_error(&AppError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Password hashing error");
            return internal_error();
        }
    };

    let user_repo = UserRepository::new((*state.db).clone());
    let user = match user_repo
        .create(payload.name.trim(), payload.email.trim(), &password_hash)
        .await
    {
        Ok(u) => u,
        Err(e) => {
            return crate::routes::error_body(e.status_code(), e.error_code(), &e.to_string());
        }
    };

    info!(user_id = %user.id, "User registered");

    (StatusCode::CREATED, Json(user_info(&user))).into_response()
}

/// POST /auth/refresh - Exchange a refresh token for a new token pair.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state.jwt_service.validate_token(&payload.refresh_token) {
        Ok(c) => c,
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_token",
                    "message": "Invalid or expired refresh token"
                })),
            )
                .into_response();
        }
    };

    // The account may have been disabled or re-roled since issuance.
    let user_repo = UserRepository::new((*state.db).clone());
    let user = match user_repo.find_by_id(claims.user_id()).await {
        Ok(Some(u)) if u.is_active => u,
        Ok(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "account_disabled",
                    "message": "This account is no longer active"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during token refresh");
            return internal_error();
        }
    };

    let role = Role::from(user.role).as_str();
    let (access_token, refresh_token) = match (
        state.jwt_service.generate_access_token(user.id, role),
        state.jwt_service.generate_refresh_token(user.id, role),
    ) {
        (Ok(a), Ok(r)) => (a, r),
        _ => {
            error!("Failed to generate tokens during refresh");
            return internal_error();
        }
    };

    Json(LoginResponse {
        user: user_info(&user),
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    })
    .into_response()
}
