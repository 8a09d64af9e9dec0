use std::net::IpAddr;
use std::sync::Arc;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

use crate::config::Config;
use crate::error::AppError;
use crate::riot::RiotClient;
use crate::winrate::WinRateOptions;

use super::auth::JwtKeys;

/// Shared data accessible in all handlers
#[derive(Clone)]
pub struct AppState {
    pub riot: Arc<RiotClient>,
    pub winrate: WinRateOptions,
    pub jwt: Arc<JwtKeys>,
    pub limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let quota = Quota::per_minute(config.rate_limit_per_minute);

        Ok(Self {
            riot: Arc::new(RiotClient::new(config)?),
            winrate: config.winrate,
            jwt: Arc::new(JwtKeys::new(&config.jwt_secret)),
            limiter: Arc::new(RateLimiter::keyed(quota)),
        })
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("riot", &self.riot)
            .field("winrate", &self.winrate)
            .field("jwt", &"<JwtKeys>")
            .finish()
    }
}
