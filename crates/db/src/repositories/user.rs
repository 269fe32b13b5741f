//! User repository for account CRUD and role management.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{sea_orm_active_enums::UserRole, users};

/// Error types for user operations.
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// Email already registered.
    #[error("email '{0}' is already registered")]
    EmailTaken(String),

    /// User not found.
    #[error("user {0} not found")]
    NotFound(Uuid),

    /// Unknown role name in a role-change request.
    #[error("unknown role '{0}'")]
    UnknownRole(String),

    /// Record store unavailable (transient, safe to retry).
    #[error("record store unavailable: {0}")]
    StoreUnavailable(String),
}

impl UserError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::EmailTaken(_) => 409,
            Self::NotFound(_) => 404,
            Self::UnknownRole(_) => 400,
            Self::StoreUnavailable(_) => 503,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmailTaken(_) => "EMAIL_TAKEN",
            Self::NotFound(_) => "USER_NOT_FOUND",
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
            Self::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}

fn store_err(err: DbErr) -> UserError {
    UserError::StoreUnavailable(err.to_string())
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by email. Emails are matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<users::Model>, UserError> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email.to_lowercase()))
            .one(&self.db)
            .await
            .map_err(store_err)
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, UserError> {
        users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)
    }

    /// Creates a new user with the `employee` role.
    ///
    /// # Errors
    ///
    /// Returns `UserError::EmailTaken` if the email is already registered.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<users::Model, UserError> {
        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            email: Set(email.to_lowercase()),
            password_hash: Set(password_hash.to_string()),
            role: Set(UserRole::Employee),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await.map_err(|err| {
            if matches!(
                err.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) {
                UserError::EmailTaken(email.to_lowercase())
            } else {
                store_err(err)
            }
        })
    }

    /// Checks if an email is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn email_exists(&self, email: &str) -> Result<bool, UserError> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email.to_lowercase()))
            .count(&self.db)
            .await
            .map_err(store_err)?;

        Ok(count > 0)
    }

    /// Lists all users, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(&self) -> Result<Vec<users::Model>, UserError> {
        users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(store_err)
    }

    /// Lists users holding any of the given roles, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_with_roles(
        &self,
        roles: &[UserRole],
    ) -> Result<Vec<users::Model>, UserError> {
        users::Entity::find()
            .filter(users::Column::Role.is_in(roles.iter().copied()))
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(store_err)
    }

    /// Changes a user's role.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound` if no such user exists.
    pub async fn update_role(&self, id: Uuid, role: UserRole) -> Result<users::Model, UserError> {
        let Some(user) = self.find_by_id(id).await? else {
            return Err(UserError::NotFound(id));
        };

        let mut active: users::ActiveModel = user.into();
        active.role = Set(role);
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await.map_err(store_err)
    }

    /// Deletes a user and, via FK cascade, their dependent records.
    ///
    /// # Errors
    ///
    /// Returns `UserError::NotFound` if no such user exists.
    pub async fn delete(&self, id: Uuid) -> Result<(), UserError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        if result.rows_affected == 0 {
            return Err(UserError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = UserError::EmailTaken("a@b.com".to_string());
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "EMAIL_TAKEN");

        let err = UserError::NotFound(Uuid::nil());
        assert_eq!(err.status_code(), 404);

        let err = UserError::UnknownRole("supervisor".to_string());
        assert_eq!(err.status_code(), 400);

        let err = UserError::StoreUnavailable("timeout".to_string());
        assert_eq!(err.status_code(), 503);
    }
}
