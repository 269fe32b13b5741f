//! Attendance repository.
//!
//! The at-most-one-per-day rule is enforced by the unique index on
//! `(employee_id, date)`; a duplicate insert surfaces as `AlreadyMarked`
//! no matter how many writers race.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use atrium_core::attendance::{AttendanceError, business_day, check_window};

use crate::entities::{attendance_records, sea_orm_active_enums::AttendanceStatus};

fn store_err(err: DbErr) -> AttendanceError {
    AttendanceError::StoreUnavailable(err.to_string())
}

/// Attendance repository.
#[derive(Debug, Clone)]
pub struct AttendanceRepository {
    db: DatabaseConnection,
}

impl AttendanceRepository {
    /// Creates a new attendance repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Marks the employee present for the org-local day containing `now`.
    ///
    /// The window check happens before any write; the day key is derived
    /// from `now` in the org time zone, not the server's.
    ///
    /// # Errors
    ///
    /// Returns `AttendanceError::OutsideWindow` outside marking hours and
    /// `AttendanceError::AlreadyMarked` for a second mark on the same day.
    pub async fn mark(
        &self,
        employee_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<attendance_records::Model, AttendanceError> {
        check_window(now)?;
        let date = business_day(now);

        let record = attendance_records::ActiveModel {
            id: Set(Uuid::new_v4()),
            employee_id: Set(employee_id),
            date: Set(date),
            status: Set(AttendanceStatus::Present),
            marked_at: Set(now.into()),
            created_at: Set(Utc::now().into()),
        };

        record.insert(&self.db).await.map_err(|err| {
            if matches!(
                err.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ) {
                AttendanceError::AlreadyMarked { date }
            } else {
                store_err(err)
            }
        })
    }

    /// Lists an employee's attendance, most recent day first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_for_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<attendance_records::Model>, AttendanceError> {
        attendance_records::Entity::find()
            .filter(attendance_records::Column::EmployeeId.eq(employee_id))
            .order_by_desc(attendance_records::Column::Date)
            .all(&self.db)
            .await
            .map_err(store_err)
    }
}
