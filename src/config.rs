use std::env;
use std::num::{NonZeroU32, NonZeroUsize};
use std::time::Duration;

use nonzero_ext::nonzero;

use crate::error::AppError;
use crate::riot::Platform;
use crate::winrate::{MatchErrorPolicy, WinRateOptions};

#[derive(Debug, Clone)]
pub struct Config {
    pub riot_api_key: String,
    pub jwt_secret: String,
    pub platform: Platform,
    /// Overrides both Riot hosts, e.g. to go through a relay or a mock.
    pub riot_base_url: Option<String>,
    pub server_addr: String,
    pub winrate: WinRateOptions,
    pub riot_request_timeout: Duration,
    pub request_timeout: Duration,
    pub riot_rate_limit_per_second: NonZeroU32,
    pub rate_limit_per_minute: NonZeroU32,
    pub cors_allowed_origins: Vec<String>,
    pub production: bool,
}

impl Config {
    /// Reads the process environment. `.env` is loaded by the binary entry point.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        const DEFAULT_REGION: &str = "EUNE";
        const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:8000";
        const DEFAULT_MATCH_WINDOW: u32 = 10;
        // Largest `count` Match-v5 accepts.
        const MAX_MATCH_WINDOW: u32 = 100;
        const DEFAULT_RIOT_REQUEST_TIMEOUT_SECS: u64 = 10;
        const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
        const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:8080";

        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let parsed = |key: &str| non_empty(key).and_then(|v| v.trim().parse::<u64>().ok());

        let riot_api_key = non_empty("RIOT_API_KEY")
            .ok_or_else(|| AppError::Config("RIOT_API_KEY must be set".into()))?;

        let jwt_secret = non_empty("JWT_SECRET")
            .ok_or_else(|| AppError::Config("JWT_SECRET must be set".into()))?;

        let platform: Platform = non_empty("RIOT_REGION")
            .as_deref()
            .unwrap_or(DEFAULT_REGION)
            .parse()?;

        let riot_base_url =
            non_empty("RIOT_BASE_URL").map(|url| url.trim().trim_end_matches('/').to_string());

        let server_addr = non_empty("SERVER_ADDR").unwrap_or_else(|| DEFAULT_SERVER_ADDR.into());

        let on_match_error = match non_empty("WINRATE_ON_MATCH_ERROR") {
            Some(v) => v.parse::<MatchErrorPolicy>()?,
            None => MatchErrorPolicy::default(),
        };

        let winrate = WinRateOptions {
            window: parsed("MATCH_WINDOW")
                .and_then(|v| u32::try_from(v).ok())
                .filter(|v| *v > 0)
                .map(|v| v.min(MAX_MATCH_WINDOW))
                .unwrap_or(DEFAULT_MATCH_WINDOW),
            on_match_error,
            concurrency: parsed("WINRATE_CONCURRENCY")
                .and_then(|v| usize::try_from(v).ok())
                .and_then(NonZeroUsize::new)
                .unwrap_or(nonzero!(1_usize)),
        };

        let riot_request_timeout = Duration::from_secs(
            parsed("RIOT_REQUEST_TIMEOUT_SECS")
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_RIOT_REQUEST_TIMEOUT_SECS),
        );

        let request_timeout = Duration::from_secs(
            parsed("REQUEST_TIMEOUT_SECS")
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        );

        let riot_rate_limit_per_second = parsed("RIOT_RATE_LIMIT_PER_SECOND")
            .and_then(|v| u32::try_from(v).ok())
            .and_then(NonZeroU32::new)
            .unwrap_or(nonzero!(20_u32));

        let rate_limit_per_minute = parsed("RATE_LIMIT_PER_MINUTE")
            .and_then(|v| u32::try_from(v).ok())
            .and_then(NonZeroU32::new)
            .unwrap_or(nonzero!(60_u32));

        let cors_allowed_origins = non_empty("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_CORS_ALLOWED_ORIGINS.into())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let production = non_empty("APP_ENV")
            .map(|v| v.trim().eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(Self {
            riot_api_key,
            jwt_secret,
            platform,
            riot_base_url,
            server_addr,
            winrate,
            riot_request_timeout,
            request_timeout,
            riot_rate_limit_per_second,
            rate_limit_per_minute,
            cors_allowed_origins,
            production,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn missing_api_key_is_fatal() {
        let err = config_from(&[("JWT_SECRET", "secret")]).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("RIOT_API_KEY")));

        let err = config_from(&[("RIOT_API_KEY", "  "), ("JWT_SECRET", "secret")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn defaults_are_applied() {
        let config = config_from(&[("RIOT_API_KEY", "key"), ("JWT_SECRET", "secret")]).unwrap();

        assert_eq!(config.platform, Platform::EUN1);
        assert_eq!(config.server_addr, "127.0.0.1:8000");
        assert_eq!(config.winrate.window, 10);
        assert_eq!(config.winrate.on_match_error, MatchErrorPolicy::Skip);
        assert_eq!(config.winrate.concurrency.get(), 1);
        assert_eq!(config.riot_request_timeout, Duration::from_secs(10));
        assert_eq!(config.rate_limit_per_minute.get(), 60);
        assert_eq!(config.cors_allowed_origins, vec!["http://localhost:8080"]);
        assert!(config.riot_base_url.is_none());
        assert!(!config.production);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("RIOT_API_KEY", "key"),
            ("JWT_SECRET", "secret"),
            ("RIOT_REGION", "na1"),
            ("RIOT_BASE_URL", "http://127.0.0.1:9999/"),
            ("MATCH_WINDOW", "20"),
            ("WINRATE_ON_MATCH_ERROR", "abort"),
            ("WINRATE_CONCURRENCY", "4"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example, https://b.example"),
            ("APP_ENV", "Production"),
        ])
        .unwrap();

        assert_eq!(config.platform, Platform::NA1);
        assert_eq!(config.riot_base_url.as_deref(), Some("http://127.0.0.1:9999"));
        assert_eq!(config.winrate.window, 20);
        assert_eq!(config.winrate.on_match_error, MatchErrorPolicy::Abort);
        assert_eq!(config.winrate.concurrency.get(), 4);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert!(config.production);
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let config = config_from(&[
            ("RIOT_API_KEY", "key"),
            ("JWT_SECRET", "secret"),
            ("MATCH_WINDOW", "0"),
            ("RATE_LIMIT_PER_MINUTE", "lots"),
        ])
        .unwrap();

        assert_eq!(config.winrate.window, 10);
        assert_eq!(config.rate_limit_per_minute.get(), 60);
    }

    #[test]
    fn zero_timeouts_fall_back_to_defaults() {
        let config = config_from(&[
            ("RIOT_API_KEY", "key"),
            ("JWT_SECRET", "secret"),
            ("RIOT_REQUEST_TIMEOUT_SECS", "0"),
            ("REQUEST_TIMEOUT_SECS", "0"),
        ])
        .unwrap();

        assert_eq!(config.riot_request_timeout, Duration::from_secs(10));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn match_window_is_capped_at_match_v5_maximum() {
        let config = config_from(&[
            ("RIOT_API_KEY", "key"),
            ("JWT_SECRET", "secret"),
            ("MATCH_WINDOW", "500"),
        ])
        .unwrap();

        assert_eq!(config.winrate.window, 100);
    }

    #[test]
    fn unknown_region_is_rejected() {
        let err = config_from(&[
            ("RIOT_API_KEY", "key"),
            ("JWT_SECRET", "secret"),
            ("RIOT_REGION", "moon"),
        ])
        .unwrap_err();

        assert!(matches!(err, AppError::InvalidRegion(_)));
    }

    #[test]
    fn unknown_match_error_policy_is_rejected() {
        let err = config_from(&[
            ("RIOT_API_KEY", "key"),
            ("JWT_SECRET", "secret"),
            ("WINRATE_ON_MATCH_ERROR", "retry"),
        ])
        .unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
    }
}
