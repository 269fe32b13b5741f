//! Payslip repository.
//!
//! One document per (employee, month, year), enforced by the unique
//! index; a duplicate insert surfaces as `DuplicatePeriod`. The document
//! bytes live in object storage, only the key is persisted here.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use atrium_core::payslip::{Month, PayslipError};

use crate::entities::{payslips, users};

fn store_err(err: DbErr) -> PayslipError {
    PayslipError::StoreUnavailable(err.to_string())
}

/// Month-aware descending period sort. Years compare numerically, months
/// by calendar position, never alphabetically.
fn period_desc(a: &payslips::Model, b: &payslips::Model) -> std::cmp::Ordering {
    let month_num = |m: &payslips::Model| Month::parse(&m.month).map_or(0, |m| m.number());
    b.year
        .cmp(&a.year)
        .then_with(|| month_num(b).cmp(&month_num(a)))
}

/// Input for registering an uploaded payslip.
#[derive(Debug, Clone)]
pub struct CreatePayslipInput {
    /// The employee the document belongs to.
    pub employee_id: Uuid,
    /// Covered month.
    pub month: Month,
    /// Covered year.
    pub year: i32,
    /// Object storage key of the stored PDF.
    pub file_key: String,
    /// The manager/admin who uploaded it.
    pub uploaded_by: Uuid,
}

/// Payslip repository.
#[derive(Debug, Clone)]
pub struct PayslipRepository {
    db: DatabaseConnection,
}

impl PayslipRepository {
    /// Creates a new payslip repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a payslip for an employee's period.
    ///
    /// # Errors
    ///
    /// Returns `PayslipError::EmployeeNotFound` for an unknown employee
    /// and `PayslipError::DuplicatePeriod` when the period already has a
    /// document.
    pub async fn create(&self, input: CreatePayslipInput) -> Result<payslips::Model, PayslipError> {
        let employee = users::Entity::find_by_id(input.employee_id)
            .one(&self.db)
            .await
            .map_err(store_err)?;
        if employee.is_none() {
            return Err(PayslipError::EmployeeNotFound(input.employee_id));
        }

        let payslip = payslips::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(input.employee_id),
            month: Set(input.month.as_str().to_string()),
            year: Set(input.year),
            file_key: Set(input.file_key),
            uploaded_by: Set(input.uploaded_by),
            uploaded_at: Set(chrono::Utc::now().into()),
        };

        payslip.insert(&self.db).await.map_err(|err| {
            if matches!(
                err.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) {
                PayslipError::DuplicatePeriod {
                    month: input.month,
                    year: input.year,
                }
            } else {
                store_err(err)
            }
        })
    }

    /// Finds a payslip by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<payslips::Model>, PayslipError> {
        payslips::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_err)
    }

    /// Deletes a payslip row, used to roll back a failed document write.
    ///
    /// # Errors
    ///
    /// Returns `PayslipError::PayslipNotFound` if no such row exists.
    pub async fn delete(&self, id: Uuid) -> Result<(), PayslipError> {
        let result = payslips::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(store_err)?;

        if result.rows_affected == 0 {
            return Err(PayslipError::PayslipNotFound(id));
        }
        Ok(())
    }

    /// Lists an employee's payslips, most recent period first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<payslips::Model>, PayslipError> {
        let mut rows = payslips::Entity::find()
            .filter(payslips::Column::EmployeeId.eq(employee_id))
            .order_by_desc(payslips::Column::Year)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        rows.sort_by(period_desc);
        Ok(rows)
    }

    /// Lists all payslips with their employee, most recent period first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all(
        &self,
    ) -> Result<Vec<(payslips::Model, Option<users::Model>)>, PayslipError> {
        let mut rows = payslips::Entity::find()
            .find_also_related(users::Entity)
            .order_by_desc(payslips::Column::Year)
            .all(&self.db)
            .await
            .map_err(store_err)?;

        rows.sort_by(|(a, _), (b, _)| period_desc(a, b));
        Ok(rows)
    }
}
