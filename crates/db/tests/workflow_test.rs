//! Integration tests for the workflow repositories.
//!
//! These tests need a migrated Postgres database; they are skipped when
//! `DATABASE_URL` is not set.

use rust_decimal_macros::dec;
use uuid::Uuid;

use atrium_core::approval::ApprovalError;
use atrium_core::attendance::{AttendanceError, business_day};
use atrium_core::payslip::{Month, PayslipError};
use atrium_db::repositories::{
    AttendanceRepository, CreatePayslipInput, CreateReimbursementInput, LeaveRepository,
    PayslipRepository, ReimbursementRepository, UserRepository,
};
use atrium_db::repositories::user::UserError;

async fn test_db() -> Option<sea_orm::DatabaseConnection> {
    let url = std::env::var("DATABASE_URL").ok()?;
    Some(
        sea_orm::Database::connect(&url)
            .await
            .expect("Failed to connect to database"),
    )
}

async fn create_test_user(db: &sea_orm::DatabaseConnection) -> atrium_db::entities::users::Model {
    let repo = UserRepository::new(db.clone());
    let email = format!("test-{}@example.com", Uuid::new_v4());
    repo.create("Test User", &email, "$argon2id$test_hash")
        .await
        .expect("Failed to create user")
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    let Some(db) = test_db().await else { return };
    let repo = UserRepository::new(db.clone());

    let email = format!("test-{}@example.com", Uuid::new_v4());
    repo.create("First", &email, "hash")
        .await
        .expect("Failed to create user");

    // Same address, different case.
    let err = repo
        .create("Second", &email.to_uppercase(), "hash")
        .await
        .expect_err("Duplicate email should be rejected");
    assert!(matches!(err, UserError::EmailTaken(_)));
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_leave_decision_is_single_shot() {
    let Some(db) = test_db().await else { return };
    let employee = create_test_user(&db).await;
    let manager = create_test_user(&db).await;
    let repo = LeaveRepository::new(db.clone());

    let start = chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap();
    let end = chrono::NaiveDate::from_ymd_opt(2026, 9, 3).unwrap();
    let request = repo
        .create(employee.id, start, end, "family event")
        .await
        .expect("Failed to create leave request");

    let approved = repo
        .set_status(request.id, "approved", manager.id)
        .await
        .expect("Approval should succeed");
    assert_eq!(approved.approved_by, Some(manager.id));

    // A second decision must fail, whichever direction it goes.
    let err = repo
        .set_status(request.id, "rejected", manager.id)
        .await
        .expect_err("Re-deciding a terminal record should fail");
    assert!(matches!(err, ApprovalError::InvalidTransition { .. }));

    let err = repo
        .set_status(request.id, "approved", manager.id)
        .await
        .expect_err("Re-approving should fail too");
    assert!(matches!(err, ApprovalError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_leave_unknown_target_before_lookup() {
    let Some(db) = test_db().await else { return };
    let manager = create_test_user(&db).await;
    let repo = LeaveRepository::new(db.clone());

    // Unknown target on a nonexistent id reports the target, not the id.
    let err = repo
        .set_status(Uuid::new_v4(), "cancelled", manager.id)
        .await
        .expect_err("Unknown target should fail");
    assert!(matches!(err, ApprovalError::UnknownStatus(_)));

    // Valid target on a nonexistent id is a not-found.
    let err = repo
        .set_status(Uuid::new_v4(), "approved", manager.id)
        .await
        .expect_err("Unknown id should fail");
    assert!(matches!(err, ApprovalError::RecordNotFound(_)));
}

#[tokio::test]
async fn test_reimbursement_rejection_reason() {
    let Some(db) = test_db().await else { return };
    let employee = create_test_user(&db).await;
    let manager = create_test_user(&db).await;
    let repo = ReimbursementRepository::new(db.clone());

    let claim = repo
        .create(CreateReimbursementInput {
            employee_id: employee.id,
            amount: dec!(150.75),
            description: "travel".to_string(),
            expense_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
        })
        .await
        .expect("Failed to create claim");
    assert!(claim.rejection_reason.is_none());

    // Blank reason is rejected before any write.
    let err = repo
        .set_status(claim.id, "rejected", manager.id, Some("   ".to_string()))
        .await
        .expect_err("Blank reason should be rejected");
    assert!(matches!(err, ApprovalError::BlankRejectionReason));

    let rejected = repo
        .set_status(
            claim.id,
            "rejected",
            manager.id,
            Some("missing receipt".to_string()),
        )
        .await
        .expect("Rejection should succeed");
    assert_eq!(rejected.rejection_reason.as_deref(), Some("missing receipt"));
    assert_eq!(rejected.approved_by, Some(manager.id));
}

#[tokio::test]
async fn test_negative_reimbursement_rejected() {
    let Some(db) = test_db().await else { return };
    let employee = create_test_user(&db).await;
    let repo = ReimbursementRepository::new(db.clone());

    let err = repo
        .create(CreateReimbursementInput {
            employee_id: employee.id,
            amount: dec!(-5),
            description: "negative".to_string(),
            expense_date: chrono::NaiveDate::from_ymd_opt(2026, 8, 20).unwrap(),
        })
        .await
        .expect_err("Negative amount should be rejected");
    assert!(matches!(err, ApprovalError::NegativeAmount(_)));
}

#[tokio::test]
async fn test_attendance_double_mark_is_conflict() {
    use chrono::TimeZone;

    let Some(db) = test_db().await else { return };
    let employee = create_test_user(&db).await;
    let repo = AttendanceRepository::new(db.clone());

    // 05:30 UTC is 11:00 in the org zone, inside the window.
    let now = chrono::Utc.with_ymd_and_hms(2026, 9, 1, 5, 30, 0).unwrap();
    let first = repo
        .mark(employee.id, now)
        .await
        .expect("First mark of the day should succeed");
    assert_eq!(first.date, business_day(now));

    let err = repo
        .mark(employee.id, now)
        .await
        .expect_err("Second mark on the same day should fail");
    assert!(matches!(err, AttendanceError::AlreadyMarked { date } if date == first.date));
    assert_eq!(err.status_code(), 409);

    // The original record survives the duplicate attempt untouched.
    let records = repo
        .list_for_employee(employee.id)
        .await
        .expect("Listing should succeed");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, first.id);
    assert_eq!(records[0].marked_at, first.marked_at);
}

#[tokio::test]
async fn test_payslip_period_is_unique() {
    let Some(db) = test_db().await else { return };
    let employee = create_test_user(&db).await;
    let admin = create_test_user(&db).await;
    let repo = PayslipRepository::new(db.clone());

    let input = CreatePayslipInput {
        employee_id: employee.id,
        month: Month::March,
        year: 2026,
        file_key: format!("{}/2026/March/{}.pdf", employee.id, Uuid::new_v4()),
        uploaded_by: admin.id,
    };

    repo.create(input.clone())
        .await
        .expect("First upload should succeed");

    let err = repo
        .create(input)
        .await
        .expect_err("Second upload for the same period should fail");
    assert!(matches!(err, PayslipError::DuplicatePeriod { .. }));
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
async fn test_payslip_unknown_employee() {
    let Some(db) = test_db().await else { return };
    let admin = create_test_user(&db).await;
    let repo = PayslipRepository::new(db.clone());

    let err = repo
        .create(CreatePayslipInput {
            employee_id: Uuid::new_v4(),
            month: Month::January,
            year: 2026,
            file_key: "orphan.pdf".to_string(),
            uploaded_by: admin.id,
        })
        .await
        .expect_err("Unknown employee should fail");
    assert!(matches!(err, PayslipError::EmployeeNotFound(_)));
}
