// src/engine/pay.rs

use super::classify::{DayClassification, STANDARD_DAY_HOURS};
use crate::models::{DayType, EmployeeRateCard, TimeInStatus};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Pay for one classified day. All currency fields are rounded to 2 dp,
/// round-half-up, exactly once; downstream sums never re-round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPay {
    pub day_salary: Decimal,
    /// Hours beyond the 8-hour day, recorded even when unpaid.
    pub overtime_hours: Decimal,
    pub overtime_pay: Decimal,
    pub total_pay: Decimal,
}

impl DayPay {
    pub fn zero() -> Self {
        Self {
            day_salary: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            total_pay: Decimal::ZERO,
        }
    }
}

fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computes the day's pay from its classification and the employee's rates.
///
/// Half-day pay is flat 50 % of the daily rate when the arrival was late.
/// For on-time arrivals the hours-proportional variant (daily rate × h / 8)
/// is applied only when `half_day_proration` is enabled; the flat rule is
/// the default pending product clarification.
pub fn day_pay(
    classification: &DayClassification,
    rates: &EmployeeRateCard,
    half_day_proration: bool,
) -> DayPay {
    let hours = classification.worked_hours;
    let excess = round_currency((hours - STANDARD_DAY_HOURS).max(Decimal::ZERO));

    match classification.day_type {
        DayType::Incomplete | DayType::Invalid => DayPay::zero(),
        DayType::HalfDay => {
            let day_salary = match classification.time_in_status {
                TimeInStatus::OnTime if half_day_proration => {
                    round_currency(rates.daily_rate * hours / STANDARD_DAY_HOURS)
                }
                _ => round_currency(rates.daily_rate * dec!(0.5)),
            };
            DayPay {
                day_salary,
                overtime_hours: Decimal::ZERO,
                overtime_pay: Decimal::ZERO,
                total_pay: day_salary,
            }
        }
        DayType::FullDay => {
            let day_salary = round_currency(rates.daily_rate);
            DayPay {
                day_salary,
                // Excess hours on a capped day are recorded but unpaid.
                overtime_hours: excess,
                overtime_pay: Decimal::ZERO,
                total_pay: day_salary,
            }
        }
        DayType::Overtime => {
            let day_salary = round_currency(rates.daily_rate);
            let overtime_pay = round_currency(excess * rates.overtime_rate);
            DayPay {
                day_salary,
                overtime_hours: excess,
                overtime_pay,
                total_pay: day_salary + overtime_pay,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rates() -> EmployeeRateCard {
        EmployeeRateCard {
            employee_id: "EMP-001".to_string(),
            daily_rate: dec!(550),
            overtime_rate: dec!(85.94),
            effective_from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    fn classified(day_type: DayType, status: TimeInStatus, hours: Decimal) -> DayClassification {
        DayClassification {
            day_type,
            time_in_status: status,
            worked_hours: hours,
            reason: String::new(),
        }
    }

    #[test]
    fn invalid_and_incomplete_days_pay_nothing() {
        for day_type in [DayType::Invalid, DayType::Incomplete] {
            for status in [TimeInStatus::OnTime, TimeInStatus::Late] {
                let pay = day_pay(&classified(day_type, status, dec!(3.5)), &rates(), false);
                assert_eq!(pay, DayPay::zero());
            }
        }
    }

    #[test]
    fn full_day_pays_the_daily_rate_exactly() {
        let pay = day_pay(
            &classified(DayType::FullDay, TimeInStatus::OnTime, dec!(8)),
            &rates(),
            false,
        );
        assert_eq!(pay.day_salary, dec!(550.00));
        assert_eq!(pay.total_pay, dec!(550.00));
        assert_eq!(pay.overtime_pay, Decimal::ZERO);
    }

    #[test]
    fn late_half_day_pays_flat_fifty_percent() {
        let pay = day_pay(
            &classified(DayType::HalfDay, TimeInStatus::Late, dec!(6)),
            &rates(),
            true,
        );
        assert_eq!(pay.day_salary, dec!(275.00));
    }

    #[test]
    fn on_time_half_day_is_flat_without_proration() {
        let pay = day_pay(
            &classified(DayType::HalfDay, TimeInStatus::OnTime, dec!(6)),
            &rates(),
            false,
        );
        assert_eq!(pay.day_salary, dec!(275.00));
    }

    #[test]
    fn on_time_half_day_prorates_by_hours_when_enabled() {
        // 550 × 6 / 8 = 412.50
        let pay = day_pay(
            &classified(DayType::HalfDay, TimeInStatus::OnTime, dec!(6)),
            &rates(),
            true,
        );
        assert_eq!(pay.day_salary, dec!(412.50));
    }

    #[test]
    fn overtime_pays_rate_card_for_excess_hours() {
        let pay = day_pay(
            &classified(DayType::Overtime, TimeInStatus::OnTime, dec!(10)),
            &rates(),
            false,
        );
        assert_eq!(pay.day_salary, dec!(550.00));
        assert_eq!(pay.overtime_hours, dec!(2.00));
        assert_eq!(pay.overtime_pay, dec!(171.88));
        assert_eq!(pay.total_pay, dec!(721.88));
    }

    #[test]
    fn capped_full_day_records_excess_hours_but_pays_none() {
        let pay = day_pay(
            &classified(DayType::FullDay, TimeInStatus::OnTime, dec!(9)),
            &rates(),
            false,
        );
        assert_eq!(pay.overtime_hours, dec!(1.00));
        assert_eq!(pay.overtime_pay, Decimal::ZERO);
        assert_eq!(pay.total_pay, dec!(550.00));
    }

    #[test]
    fn currency_rounds_half_up_to_two_places() {
        // 1.5 h × 85.94 = 128.91 exactly; use 1.25 h → 107.425 → 107.43
        let pay = day_pay(
            &classified(DayType::Overtime, TimeInStatus::OnTime, dec!(9.25)),
            &rates(),
            false,
        );
        assert_eq!(pay.overtime_pay, dec!(107.43));
    }
}
