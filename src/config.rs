use crate::engine::{AdvancePolicy, BusinessClock};
use dotenvy::dotenv;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    /// Whole hours east of UTC for the business locale (8 = Asia/Manila).
    /// The single source of truth for every local-time decision.
    pub business_utc_offset_hours: i32,
    /// Pay on-time half days proportionally to hours instead of flat 50 %.
    pub half_day_proration: bool,
    pub advance_small_request_max: Decimal,
    pub advance_outstanding_cap: Decimal,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        Self {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .expect("SERVER_PORT must be a valid port number"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            business_utc_offset_hours: env::var("BUSINESS_UTC_OFFSET_HOURS")
                .unwrap_or_else(|_| "8".to_string())
                .parse()
                .expect("BUSINESS_UTC_OFFSET_HOURS must be a whole number of hours"),
            half_day_proration: env::var("HALF_DAY_PRORATION")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            advance_small_request_max: env::var("ADVANCE_SMALL_REQUEST_MAX")
                .unwrap_or_else(|_| "1100".to_string())
                .parse()
                .expect("ADVANCE_SMALL_REQUEST_MAX must be a decimal amount"),
            advance_outstanding_cap: env::var("ADVANCE_OUTSTANDING_CAP")
                .unwrap_or_else(|_| "1100".to_string())
                .parse()
                .expect("ADVANCE_OUTSTANDING_CAP must be a decimal amount"),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    pub fn business_clock(&self) -> BusinessClock {
        BusinessClock::from_offset_hours(self.business_utc_offset_hours)
            .expect("BUSINESS_UTC_OFFSET_HOURS out of range")
    }

    pub fn advance_policy(&self) -> AdvancePolicy {
        AdvancePolicy {
            small_request_max: self.advance_small_request_max,
            outstanding_cap: self.advance_outstanding_cap,
            required_day_equivalents: dec!(2),
        }
    }
}
