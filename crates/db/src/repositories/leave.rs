//! Leave request repository.
//!
//! Status transitions are persisted with a conditional update filtered on
//! the `pending` status, so two concurrent approvers race on the database
//! row and exactly one wins.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};
use uuid::Uuid;

use atrium_core::approval::{ApprovalError, ApprovalService};

use crate::entities::{leave_requests, sea_orm_active_enums::RequestStatus, users};

fn store_err(err: DbErr) -> ApprovalError {
    ApprovalError::StoreUnavailable(err.to_string())
}

/// Leave request repository.
#[derive(Debug, Clone)]
pub struct LeaveRepository {
    db: DatabaseConnection,
}

impl LeaveRepository {
    /// Creates a new leave repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending leave request.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalError::InvalidDateRange` when the start date falls
    /// after the end date.
    pub async fn create(
        &self,
        employee_id: Uuid,
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
        reason: &str,
    ) -> Result<leave_requests::Model, ApprovalError> {
        ApprovalService::validate_leave_dates(start_date, end_date)?;

        let now = chrono::Utc::now().into();
        let request = leave_requests::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee_id),
            start_date: Set(start_date),
            end_date: Set(end_date),
            reason: Set(reason.to_string()),
            status: Set(RequestStatus::Pending),
            approved_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        request.insert(&self.db).await.map_err(store_err)
    }

    /// Finds a leave request by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<leave_requests::Model>, ApprovalError> {
        leave_requests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)
    }

    /// Lists an employee's leave requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<leave_requests::Model>, ApprovalError> {
        leave_requests::Entity::find()
            .filter(leave_requests::Column::EmployeeId.eq(employee_id))
            .order_by_desc(leave_requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(store_err)
    }

    /// Lists all leave requests with their employee, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(
        &self,
    ) -> Result<Vec<(leave_requests::Model, Option<users::Model>)>, ApprovalError> {
        leave_requests::Entity::find()
            .find_also_related(users::Entity)
            .order_by_desc(leave_requests::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(store_err)
    }

    /// Decides a pending leave request.
    ///
    /// The target is validated before the record is looked up. The status
    /// write is a conditional update filtered on `pending`; when the row
    /// was decided concurrently, the observed status is re-read and the
    /// call fails with `InvalidTransition`.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalError::UnknownStatus`, `RecordNotFound`, or
    /// `InvalidTransition` per the transition rules.
    pub async fn set_status(
        &self,
        id: Uuid,
        target: &str,
        decided_by: Uuid,
    ) -> Result<leave_requests::Model, ApprovalError> {
        // Target validation precedes the record lookup.
        if atrium_core::approval::RequestStatus::parse(target).is_none() {
            return Err(ApprovalError::UnknownStatus(target.to_string()));
        }

        let Some(current) = self.find_by_id(id).await? else {
            return Err(ApprovalError::RecordNotFound(id));
        };

        let action = ApprovalService::decide(current.status.into(), target, decided_by, None)?;
        let new_status = RequestStatus::from(action.new_status());

        let result = leave_requests::Entity::update_many()
            .col_expr(leave_requests::Column::Status, Expr::value(new_status))
            .col_expr(
                leave_requests::Column::ApprovedBy,
                Expr::value(Some(action.decided_by())),
            )
            .col_expr(
                leave_requests::Column::UpdatedAt,
                Expr::value(chrono::Utc::now()),
            )
            .filter(leave_requests::Column::Id.eq(id))
            .filter(leave_requests::Column::Status.eq(RequestStatus::Pending))
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        if result.rows_affected == 0 {
            // Lost the race: another approver decided between read and write.
            let observed = self
                .find_by_id(id)
                .await?
                .ok_or(ApprovalError::RecordNotFound(id))?;
            return Err(ApprovalError::InvalidTransition {
                from: observed.status.into(),
                to: action.new_status(),
            });
        }

        self.find_by_id(id)
            .await?
            .ok_or(ApprovalError::RecordNotFound(id))
    }
}
