// src/models/mod.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// ─── Employee ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Employee {
    pub id: Uuid,
    /// Stable business identifier (badge number), not the storage key.
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployeeRequest {
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
}

// ─── Rate Card ────────────────────────────────────────────────────────────────

/// Pay rates for one employee. Read-only input to the engine.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EmployeeRateCard {
    pub employee_id: String,
    /// Pay for one full day (8 working hours).
    pub daily_rate: Decimal,
    /// Pay per hour beyond 8 hours, when overtime applies.
    pub overtime_rate: Decimal,
    pub effective_from: NaiveDate,
}

impl EmployeeRateCard {
    pub fn hourly_rate(&self) -> Decimal {
        self.daily_rate / dec!(8)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetRateCardRequest {
    pub daily_rate: Decimal,
    pub overtime_rate: Decimal,
}

// ─── Attendance ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "day_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    /// Open shift: time-in recorded, no time-out yet.
    Incomplete,
    /// Completed shift under the 4-hour minimum. No pay.
    Invalid,
    HalfDay,
    FullDay,
    Overtime,
}

impl DayType {
    /// True for the day types that earn pay and count toward days worked.
    pub fn is_valid_day(self) -> bool {
        matches!(self, DayType::HalfDay | DayType::FullDay | DayType::Overtime)
    }

    /// Contribution to the weekly days-worked total.
    pub fn day_credit(self) -> Decimal {
        match self {
            DayType::FullDay | DayType::Overtime => dec!(1),
            DayType::HalfDay => dec!(0.5),
            DayType::Incomplete | DayType::Invalid => dec!(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "time_in_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TimeInStatus {
    /// Arrived by the 09:30 cutoff.
    OnTime,
    Late,
}

/// One employee's attendance for one calendar day. Derived fields are written
/// exactly once, when the time-out scan finalizes the record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub employee_id: String,
    /// Calendar day in business-local time.
    pub date: NaiveDate,
    pub time_in: Option<DateTime<Utc>>,
    pub time_out: Option<DateTime<Utc>>,
    pub day_type: DayType,
    pub time_in_status: Option<TimeInStatus>,
    pub actual_hours_worked: Decimal,
    pub overtime_hours: Decimal,
    pub day_salary: Decimal,
    pub overtime_pay: Decimal,
    pub total_pay: Decimal,
    pub is_valid_day: bool,
    /// Set when the end-of-day sweep closed the shift. Suppresses overtime pay.
    pub auto_closed: bool,
    pub validation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ScanRequest {
    pub employee_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScanAction {
    TimeIn,
    TimeOut,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScanResponse {
    pub action: ScanAction,
    pub message: String,
    pub record: AttendanceRecord,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AttendanceQuery {
    pub employee_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AutoCloseReport {
    pub closed: u32,
    pub failed: u32,
}

// ─── Cash Advance ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "cash_advance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CashAdvanceStatus {
    Pending,
    Approved,
    Rejected,
    Paid,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CashAdvanceRequest {
    pub id: Uuid,
    pub employee_id: String,
    pub amount: Decimal,
    /// Unpaid portion. Starts equal to amount, reaches zero when settled.
    pub remaining_balance: Decimal,
    /// Business-local date of the request. Never a Sunday.
    pub request_date: NaiveDate,
    pub status: CashAdvanceStatus,
    pub decision_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAdvanceRequest {
    pub employee_id: String,
    pub amount: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DecideAdvanceRequest {
    pub approve: bool,
    pub notes: Option<String>,
}

// ─── Mandatory Deductions ─────────────────────────────────────────────────────

/// Recurring statutory deduction applied to every payroll record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MandatoryDeduction {
    pub id: Uuid,
    pub name: String,
    pub amount: Decimal,
    pub is_active: bool,
}

// ─── Payroll ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payroll_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    Pending,
    Processed,
    Approved,
    Paid,
}

impl PayrollStatus {
    /// The single status that may follow this one. The machine runs strictly
    /// forward: Pending → Processed → Approved → Paid.
    pub fn next(self) -> Option<PayrollStatus> {
        match self {
            PayrollStatus::Pending => Some(PayrollStatus::Processed),
            PayrollStatus::Processed => Some(PayrollStatus::Approved),
            PayrollStatus::Approved => Some(PayrollStatus::Paid),
            PayrollStatus::Paid => None,
        }
    }

    pub fn can_advance_to(self, to: PayrollStatus) -> bool {
        self.next() == Some(to)
    }
}

/// One employee's pay for one Monday–Saturday period. Created at/after the
/// Sunday cutoff, then mutated only through the status state machine.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct PayrollRecord {
    pub id: Uuid,
    pub employee_id: String,
    /// Monday.
    pub period_start: NaiveDate,
    /// Saturday.
    pub period_end: NaiveDate,
    /// Fractional, in 0.5 increments (half days count 0.5).
    pub days_worked: Decimal,
    pub hours_worked: Decimal,
    /// Reporting figure; includes unpaid excess hours from capped days, so
    /// it can be non-zero while `overtime_pay` is zero.
    pub overtime_hours: Decimal,
    pub basic_salary: Decimal,
    pub overtime_pay: Decimal,
    pub gross_salary: Decimal,
    pub cash_advance_deduction: Decimal,
    pub mandatory_deduction: Decimal,
    pub net_salary: Decimal,
    pub status: PayrollStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RunPayrollRequest {
    /// Monday of the period to assemble. Defaults to the most recent period
    /// whose cutoff has passed.
    pub period_start: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct TransitionRequest {
    pub status: PayrollStatus,
}

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct PayrollRunReport {
    pub period_start: Option<NaiveDate>,
    pub generated: u32,
    pub skipped_existing: u32,
    pub failed: u32,
    /// Employees excluded because they still had an open shift in the period.
    pub flagged_for_review: Vec<String>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct PayrollQuery {
    pub employee_id: Option<String>,
    pub period_start: Option<NaiveDate>,
}
