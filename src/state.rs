use crate::config::Config;
use crate::engine::{AdvancePolicy, BusinessClock};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared handler context. The business clock and advance policy are parsed
/// from the config once at startup; handlers read them directly instead of
/// re-deriving them per request.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
    pub clock: BusinessClock,
    pub advance_policy: AdvancePolicy,
}

impl AppState {
    pub fn new(db: PgPool, config: Config) -> Self {
        let clock = config.business_clock();
        let advance_policy = config.advance_policy();
        Self {
            db,
            config: Arc::new(config),
            clock,
            advance_policy,
        }
    }
}
