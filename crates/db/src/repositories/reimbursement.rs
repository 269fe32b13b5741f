//! Reimbursement repository.
//!
//! Same conditional-update discipline as leave requests, plus the
//! rejection reason column: the reason is persisted only on rejection.

use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};
use uuid::Uuid;

use atrium_core::approval::{ApprovalError, ApprovalService};

use crate::entities::{reimbursements, sea_orm_active_enums::RequestStatus, users};

fn store_err(err: DbErr) -> ApprovalError {
    ApprovalError::StoreUnavailable(err.to_string())
}

/// Input for creating a reimbursement claim.
#[derive(Debug, Clone)]
pub struct CreateReimbursementInput {
    /// The claiming employee.
    pub employee_id: Uuid,
    /// Claimed amount, must not be negative.
    pub amount: Decimal,
    /// What the expense was for.
    pub description: String,
    /// When the expense was incurred.
    pub expense_date: chrono::NaiveDate,
}

/// Reimbursement repository.
#[derive(Debug, Clone)]
pub struct ReimbursementRepository {
    db: DatabaseConnection,
}

impl ReimbursementRepository {
    /// Creates a new reimbursement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending reimbursement claim.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalError::NegativeAmount` for a negative amount.
    pub async fn create(
        &self,
        input: CreateReimbursementInput,
    ) -> Result<reimbursements::Model, ApprovalError> {
        ApprovalService::validate_amount(input.amount)?;

        let now = chrono::Utc::now().into();
        let claim = reimbursements::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(input.employee_id),
            amount: Set(input.amount),
            description: Set(input.description),
            status: Set(RequestStatus::Pending),
            approved_by: Set(None),
            rejection_reason: Set(None),
            expense_date: Set(input.expense_date),
            created_at: Set(now),
            updated_at: Set(now),
        };

        claim.insert(&self.db).await.map_err(store_err)
    }

    /// Finds a reimbursement by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<reimbursements::Model>, ApprovalError> {
        reimbursements::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)
    }

    /// Lists an employee's claims, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<reimbursements::Model>, ApprovalError> {
        reimbursements::Entity::find()
            .filter(reimbursements::Column::EmployeeId.eq(employee_id))
            .order_by_desc(reimbursements::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(store_err)
    }

    /// Lists all claims with their employee, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(
        &self,
    ) -> Result<Vec<(reimbursements::Model, Option<users::Model>)>, ApprovalError> {
        reimbursements::Entity::find()
            .find_also_related(users::Entity)
            .order_by_desc(reimbursements::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(store_err)
    }

    /// Decides a pending claim.
    ///
    /// The rejection reason is optional and only persisted on rejection;
    /// a supplied blank reason is rejected before any write. Concurrency
    /// follows the same conditional-update rule as leave requests.
    ///
    /// # Errors
    ///
    /// Returns `ApprovalError::UnknownStatus`, `BlankRejectionReason`,
    /// `RecordNotFound`, or `InvalidTransition` per the transition rules.
    pub async fn set_status(
        &self,
        id: Uuid,
        target: &str,
        decided_by: Uuid,
        rejection_reason: Option<String>,
    ) -> Result<reimbursements::Model, ApprovalError> {
        // Target validation precedes the record lookup.
        if atrium_core::approval::RequestStatus::parse(target).is_none() {
            return Err(ApprovalError::UnknownStatus(target.to_string()));
        }

        let Some(current) = self.find_by_id(id).await? else {
            return Err(ApprovalError::RecordNotFound(id));
        };

        let action =
            ApprovalService::decide(current.status.into(), target, decided_by, rejection_reason)?;
        let new_status = RequestStatus::from(action.new_status());

        let result = reimbursements::Entity::update_many()
            .col_expr(reimbursements::Column::Status, Expr::value(new_status))
            .col_expr(
                reimbursements::Column::ApprovedBy,
                Expr::value(Some(action.decided_by())),
            )
            .col_expr(
                reimbursements::Column::RejectionReason,
                Expr::value(action.rejection_reason().map(ToString::to_string)),
            )
            .col_expr(
                reimbursements::Column::UpdatedAt,
                Expr::value(chrono::Utc::now()),
            )
            .filter(reimbursements::Column::Id.eq(id))
            .filter(reimbursements::Column::Status.eq(RequestStatus::Pending))
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        if result.rows_affected == 0 {
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
