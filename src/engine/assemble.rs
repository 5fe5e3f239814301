// src/engine/assemble.rs

use super::{aggregate::WeeklyTotals, period::PayPeriod, EngineError};
use crate::models::{
    CashAdvanceRequest, CashAdvanceStatus, MandatoryDeduction, PayrollRecord, PayrollStatus,
};
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Builds the payroll record for one employee and one closed period.
///
/// The cash-advance deduction is the sum of remaining balances on approved,
/// unpaid advances requested inside the period; advances from other periods
/// or in other states are filtered out here rather than trusted from the
/// caller's query. Gross is stored as the sum of the already-rounded basic
/// and overtime figures, so re-deriving it from the record is drift-free.
pub fn assemble(
    period: &PayPeriod,
    employee_id: &str,
    totals: &WeeklyTotals,
    advances: &[CashAdvanceRequest],
    mandatory: &[MandatoryDeduction],
) -> PayrollRecord {
    let cash_advance_deduction: Decimal = advances
        .iter()
        .filter(|a| {
            a.status == CashAdvanceStatus::Approved
                && a.remaining_balance > Decimal::ZERO
                && period.contains(a.request_date)
        })
        .map(|a| a.remaining_balance)
        .sum();

    let mandatory_deduction: Decimal = mandatory
        .iter()
        .filter(|d| d.is_active)
        .map(|d| d.amount)
        .sum();

    let gross_salary = totals.gross();
    let net_salary =
        (gross_salary - cash_advance_deduction - mandatory_deduction).max(Decimal::ZERO);

    let now = Utc::now();
    PayrollRecord {
        id: Uuid::new_v4(),
        employee_id: employee_id.to_string(),
        period_start: period.start_date,
        period_end: period.end_date,
        days_worked: totals.days_worked,
        hours_worked: totals.hours_worked,
        overtime_hours: totals.overtime_hours,
        basic_salary: totals.basic_salary,
        overtime_pay: totals.overtime_pay,
        gross_salary,
        cash_advance_deduction,
        mandatory_deduction,
        net_salary,
        status: PayrollStatus::Pending,
        created_at: now,
        updated_at: now,
    }
}

/// Validates one step of the payroll status machine. Strictly forward,
/// one state at a time; every transition is an explicit action.
pub fn transition_status(
    from: PayrollStatus,
    to: PayrollStatus,
) -> Result<PayrollStatus, EngineError> {
    if from.can_advance_to(to) {
        Ok(to)
    } else {
        Err(EngineError::InvalidTransition { from, to })
    }
}
