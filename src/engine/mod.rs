// src/engine/mod.rs
//
// Attendance classification and payroll computation. Every function here is
// pure: no clocks, no I/O, no ambient timezone. Callers supply instants and
// the business-local conversion goes through `BusinessClock` only.

pub mod advance;
pub mod aggregate;
pub mod assemble;
pub mod classify;
pub mod clock;
pub mod pay;
pub mod period;
pub mod time_window;

use crate::models::PayrollStatus;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

pub use advance::{AdvanceContext, AdvancePolicy, AdvanceRejection};
pub use aggregate::{aggregate_week, WeeklyTotals};
pub use assemble::{assemble, transition_status};
pub use classify::{classify, DayClassification};
pub use clock::BusinessClock;
pub use pay::{day_pay, DayPay};
pub use period::PayPeriod;
pub use time_window::worked_hours;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Time-out at or before time-in. The scan must be rejected, never
    /// persisted as a negative duration.
    #[error("time-out {time_out} is not after time-in {time_in}")]
    InvalidInterval {
        time_in: DateTime<Utc>,
        time_out: DateTime<Utc>,
    },

    #[error("{date} is not a Monday; pay periods start on Monday")]
    PeriodNotMonday { date: NaiveDate },

    #[error("payroll status cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        from: PayrollStatus,
        to: PayrollStatus,
    },
}
