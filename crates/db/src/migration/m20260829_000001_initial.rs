//! Initial database migration.
//!
//! Creates the enums, core tables, and the unique indexes that back the
//! at-most-once invariants (one attendance row per employee per day, one
//! payslip per employee per period).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(LEAVE_REQUESTS_SQL).await?;
        db.execute_unprepared(REIMBURSEMENTS_SQL).await?;
        db.execute_unprepared(ATTENDANCE_RECORDS_SQL).await?;
        db.execute_unprepared(PAYSLIPS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const ENUMS_SQL: &str = r"
CREATE TYPE user_role AS ENUM (
    'employee',
    'manager',
    'admin'
);

CREATE TYPE request_status AS ENUM (
    'pending',
    'approved',
    'rejected'
);

CREATE TYPE attendance_status AS ENUM (
    'present'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    password_hash VARCHAR(255) NOT NULL,
    role user_role NOT NULL DEFAULT 'employee',
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE UNIQUE INDEX idx_users_email ON users (LOWER(email));
";

const LEAVE_REQUESTS_SQL: &str = r"
CREATE TABLE leave_requests (
    id UUID PRIMARY KEY,
    employee_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    reason TEXT NOT NULL,
    status request_status NOT NULL DEFAULT 'pending',
    approved_by UUID REFERENCES users(id) ON DELETE SET NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_leave_dates CHECK (start_date <= end_date)
);

CREATE INDEX idx_leave_requests_employee ON leave_requests (employee_id, created_at DESC);
CREATE INDEX idx_leave_requests_status ON leave_requests (status);
";

const REIMBURSEMENTS_SQL: &str = r"
CREATE TABLE reimbursements (
    id UUID PRIMARY KEY,
    employee_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    amount DECIMAL(12, 2) NOT NULL,
    description TEXT NOT NULL,
    status request_status NOT NULL DEFAULT 'pending',
    approved_by UUID REFERENCES users(id) ON DELETE SET NULL,
    rejection_reason TEXT,
    expense_date DATE NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT chk_reimbursement_amount CHECK (amount >= 0)
);

CREATE INDEX idx_reimbursements_employee ON reimbursements (employee_id, created_at DESC);
CREATE INDEX idx_reimbursements_status ON reimbursements (status);
";

const ATTENDANCE_RECORDS_SQL: &str = r"
CREATE TABLE attendance_records (
    id UUID PRIMARY KEY,
    employee_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    date DATE NOT NULL,
    status attendance_status NOT NULL DEFAULT 'present',
    marked_at TIMESTAMPTZ NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_attendance_employee_date UNIQUE (employee_id, date)
);

CREATE INDEX idx_attendance_employee_date ON attendance_records (employee_id, date DESC);
";

const PAYSLIPS_SQL: &str = r"
CREATE TABLE payslips (
    id UUID PRIMARY KEY,
    employee_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    month VARCHAR(16) NOT NULL,
    year INTEGER NOT NULL,
    file_key VARCHAR(512) NOT NULL,
    uploaded_by UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    uploaded_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CONSTRAINT uq_payslip_employee_period UNIQUE (employee_id, month, year)
);

CREATE INDEX idx_payslips_employee ON payslips (employee_id, year DESC);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS payslips CASCADE;
DROP TABLE IF EXISTS attendance_records CASCADE;
DROP TABLE IF EXISTS reimbursements CASCADE;
DROP TABLE IF EXISTS leave_requests CASCADE;
DROP TABLE IF EXISTS users CASCADE;

DROP TYPE IF EXISTS attendance_status;
DROP TYPE IF EXISTS request_status;
DROP TYPE IF EXISTS user_role;
";
