// src/engine/advance.rs

use super::aggregate::WeeklyTotals;
use crate::models::EmployeeRateCard;
use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Configured limits for cash-advance requests.
#[derive(Debug, Clone, Copy)]
pub struct AdvancePolicy {
    /// Below this amount a request needs no earnings check.
    pub small_request_max: Decimal,
    /// Outstanding (unpaid) advances plus the new amount may not exceed this.
    pub outstanding_cap: Decimal,
    /// Full-day equivalents required in the current period for large requests.
    pub required_day_equivalents: Decimal,
}

impl Default for AdvancePolicy {
    fn default() -> Self {
        Self {
            small_request_max: dec!(1100),
            outstanding_cap: dec!(1100),
            required_day_equivalents: dec!(2),
        }
    }
}

/// Why a request was turned down, with enough context for the requester to
/// see what is missing. Business rejections, not faults.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, ToSchema)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum AdvanceRejection {
    #[error("cash advances cannot be requested on Sunday; the work week is Monday-Saturday")]
    SundayRequest,

    #[error("a pending cash advance request is already awaiting approval")]
    PendingExists,

    #[error(
        "insufficient earnings: {current_earnings} earned over {days_worked} day(s) this period, \
         {required_earnings} over {required_days} day(s) required"
    )]
    InsufficientEarnings {
        current_earnings: Decimal,
        required_earnings: Decimal,
        days_worked: Decimal,
        required_days: u32,
    },

    #[error("outstanding advances of {outstanding} plus this request would exceed the {cap} cap")]
    BalanceExceeded { outstanding: Decimal, cap: Decimal },
}

/// Everything the gate needs to know about the requester, gathered by the
/// caller so the evaluation itself stays pure.
#[derive(Debug)]
pub struct AdvanceContext<'a> {
    /// Business-local date of the request.
    pub request_date: NaiveDate,
    pub has_pending: bool,
    /// Sum of remaining balances on approved, unpaid advances.
    pub outstanding_balance: Decimal,
    /// Classified attendance for the current, in-progress period.
    pub week_so_far: &'a WeeklyTotals,
    pub rates: &'a EmployeeRateCard,
}

/// Evaluates one request against the eligibility rules, in order: Sunday,
/// single-pending, outstanding cap, then the earnings/days requirement for
/// amounts at or above the small-request threshold.
pub fn evaluate(
    amount: Decimal,
    ctx: &AdvanceContext<'_>,
    policy: &AdvancePolicy,
) -> Result<(), AdvanceRejection> {
    if ctx.request_date.weekday() == Weekday::Sun {
        return Err(AdvanceRejection::SundayRequest);
    }

    if ctx.has_pending {
        return Err(AdvanceRejection::PendingExists);
    }

    if ctx.outstanding_balance + amount > policy.outstanding_cap {
        return Err(AdvanceRejection::BalanceExceeded {
            outstanding: ctx.outstanding_balance,
            cap: policy.outstanding_cap,
        });
    }

    // Small requests are granted on trust.
    if amount < policy.small_request_max {
        return Ok(());
    }

    let earned = ctx.week_so_far.basic_salary;
    let days = ctx.week_so_far.days_worked;
    if days < policy.required_day_equivalents || earned < amount {
        let required_days = (amount / ctx.rates.daily_rate)
            .ceil()
            .to_u32()
            .unwrap_or(u32::MAX);
        return Err(AdvanceRejection::InsufficientEarnings {
            current_earnings: earned,
            required_earnings: amount,
            days_worked: days,
            required_days,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rates() -> EmployeeRateCard {
        EmployeeRateCard {
            employee_id: "EMP-001".to_string(),
            daily_rate: dec!(550),
            overtime_rate: dec!(85.94),
            effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    fn week(days: Decimal, basic: Decimal) -> WeeklyTotals {
        WeeklyTotals {
            days_worked: days,
            basic_salary: basic,
            ..WeeklyTotals::default()
        }
    }

    fn ctx<'a>(week: &'a WeeklyTotals, rates: &'a EmployeeRateCard) -> AdvanceContext<'a> {
        AdvanceContext {
            // A Wednesday.
            request_date: NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
            has_pending: false,
            outstanding_balance: Decimal::ZERO,
            week_so_far: week,
            rates,
        }
    }

    #[test]
    fn small_request_is_approved_with_zero_attendance() {
        let week = week(dec!(0), dec!(0));
        let rates = rates();
        assert_eq!(evaluate(dec!(500), &ctx(&week, &rates), &AdvancePolicy::default()), Ok(()));
    }

    #[test]
    fn sunday_request_is_rejected() {
        let week = week(dec!(3), dec!(1650));
        let rates = rates();
        let mut c = ctx(&week, &rates);
        c.request_date = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
        assert_eq!(
            evaluate(dec!(100), &c, &AdvancePolicy::default()),
            Err(AdvanceRejection::SundayRequest)
        );
    }

    #[test]
    fn second_pending_request_is_rejected() {
        let week = week(dec!(3), dec!(1650));
        let rates = rates();
        let mut c = ctx(&week, &rates);
        c.has_pending = true;
        assert_eq!(
            evaluate(dec!(100), &c, &AdvancePolicy::default()),
            Err(AdvanceRejection::PendingExists)
        );
    }

    #[test]
    fn threshold_amount_with_one_day_worked_is_rejected_with_context() {
        let week = week(dec!(1), dec!(550));
        let rates = rates();
        let rejection = evaluate(dec!(1100), &ctx(&week, &rates), &AdvancePolicy::default());
        assert_eq!(
            rejection,
            Err(AdvanceRejection::InsufficientEarnings {
                current_earnings: dec!(550),
                required_earnings: dec!(1100),
                days_worked: dec!(1),
                required_days: 2,
            })
        );
    }

    #[test]
    fn threshold_amount_with_two_full_days_is_approved() {
        let week = week(dec!(2), dec!(1100));
        let rates = rates();
        assert_eq!(
            evaluate(dec!(1100), &ctx(&week, &rates), &AdvancePolicy::default()),
            Ok(())
        );
    }

    #[test]
    fn two_half_days_do_not_satisfy_the_day_requirement() {
        // 1.0 day-equivalent from two half days, even with enough pesos.
        let week = week(dec!(1), dec!(1200));
        let rates = rates();
        assert!(matches!(
            evaluate(dec!(1100), &ctx(&week, &rates), &AdvancePolicy::default()),
            Err(AdvanceRejection::InsufficientEarnings { .. })
        ));
    }

    #[test]
    fn outstanding_balance_cap_applies_to_small_requests_too() {
        let week = week(dec!(0), dec!(0));
        let rates = rates();
        let mut c = ctx(&week, &rates);
        c.outstanding_balance = dec!(900);
        assert_eq!(
            evaluate(dec!(300), &c, &AdvancePolicy::default()),
            Err(AdvanceRejection::BalanceExceeded {
                outstanding: dec!(900),
                cap: dec!(1100),
            })
        );
    }
}
