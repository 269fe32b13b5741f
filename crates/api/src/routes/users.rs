//! User management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, put},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    AppState,
    middleware::AuthUser,
    routes::{app_error, check_policy, error_body},
};
use atrium_core::policy::{Action, Role};
use atrium_db::{
    UserRepository,
    entities::{sea_orm_active_enums::UserRole, users},
    repositories::UserError,
};

/// Creates the user management routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/employees", get(list_employees))
        .route("/users/{id}/role", put(update_role))
        .route("/users/{id}", delete(delete_user))
}

/// Request body for changing a user's role.
#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    /// New role name.
    pub role: String,
}

/// Response for a user account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Current role.
    pub role: String,
    /// Whether the account can log in.
    pub is_active: bool,
    /// When the account was created.
    pub created_at: chrono::DateTime<chrono::FixedOffset>,
}

fn user_response(model: users::Model) -> UserResponse {
    UserResponse {
        id: model.id,
        name: model.name,
        email: model.email,
        role: Role::from(model.role).as_str().to_string(),
        is_active: model.is_active,
        created_at: model.created_at,
    }
}

fn user_error(err: &UserError) -> axum::response::Response {
    error_body(err.status_code(), err.error_code(), &err.to_string())
}

/// GET /users - List every account.
async fn list_users(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::ManageUsers) {
        return denied;
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo.list_all().await {
        Ok(models) => Json(models.into_iter().map(user_response).collect::<Vec<_>>())
            .into_response(),
        Err(e) => user_error(&e),
    }
}

/// GET /users/employees - List employees; admins also see managers.
async fn list_employees(State(state): State<AppState>, user: AuthUser) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::ListEmployees) {
        return denied;
    }

    let roles: &[UserRole] = if user.role() == Some(Role::Admin) {
        &[UserRole::Employee, UserRole::Manager]
    } else {
        &[UserRole::Employee]
    };

    let repo = UserRepository::new((*state.db).clone());
    match repo.list_with_roles(roles).await {
        Ok(models) => Json(models.into_iter().map(user_response).collect::<Vec<_>>())
            .into_response(),
        Err(e) => user_error(&e),
    }
}

/// PUT /users/{id}/role - Change an account's role.
async fn update_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoleRequest>,
) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::ManageUsers) {
        return denied;
    }

    let Some(role) = Role::parse(&payload.role) else {
        let err = UserError::UnknownRole(payload.role.clone());
        return user_error(&err);
    };

    let repo = UserRepository::new((*state.db).clone());
    match repo.update_role(id, role.into()).await {
        Ok(model) => {
            info!(user_id = %model.id, role = %role, changed_by = %user.user_id(), "User role changed");
            Json(user_response(model)).into_response()
        }
        Err(e) => user_error(&e),
    }
}

/// DELETE /users/{id} - Delete an account and its dependent records.
async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    if let Err(denied) = check_policy(user.role(), Action::ManageUsers) {
        return denied;
    }

    if id == user.user_id() {
        return app_error(&atrium_shared::AppError::Validation(
            "You cannot delete your own account".to_string(),
        ));
    }

    let repo = UserRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => {
            info!(user_id = %id, deleted_by = %user.user_id(), "User deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => user_error(&e),
    }
}
