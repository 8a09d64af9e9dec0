use std::{fmt, sync::Arc};

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::AppError;

use super::metrics::RequestMetrics;

pub struct RiotClient {
    client: reqwest::Client,
    limiter: DefaultDirectRateLimiter,
    /// Riot API Key
    key: String,
    /// Host serving platform routed endpoints (Summoner-v4)
    platform_url: String,
    /// Host serving regional routed endpoints (Match-v5)
    regional_url: String,
    /// Host serving Account-v1
    account_url: String,
    metrics: Arc<RequestMetrics>,
}

impl RiotClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.riot_request_timeout)
            .build()?;

        let (platform_url, regional_url, account_url) = match &config.riot_base_url {
            Some(url) => (url.clone(), url.clone(), url.clone()),
            None => {
                let region = config.platform.to_region();
                (
                    config.platform.base_url(),
                    region.base_url(),
                    region.account_region().base_url(),
                )
            }
        };

        tracing::debug!(%platform_url, %regional_url, %account_url, "🛰️ Riot client configured");

        Ok(Self {
            client,
            limiter: RateLimiter::direct(Quota::per_second(config.riot_rate_limit_per_second)),
            key: config.riot_api_key.clone(),
            platform_url,
            regional_url,
            account_url,
            metrics: RequestMetrics::new(),
        })
    }

    pub fn metrics(&self) -> &Arc<RequestMetrics> {
        &self.metrics
    }

    pub(super) fn platform_url(&self) -> &str {
        &self.platform_url
    }

    pub(super) fn regional_url(&self) -> &str {
        &self.regional_url
    }

    pub(super) fn account_url(&self) -> &str {
        &self.account_url
    }

    /// Shared GET logic for every endpoint.
    ///
    /// Non-2xx answers become [`AppError::RiotApi`] with the upstream body kept
    /// as is, and a 2xx body that does not decode becomes
    /// [`AppError::MalformedResponse`].
    #[tracing::instrument(level = "debug", skip(self, url))]
    pub(super) async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &str,
    ) -> Result<T, AppError> {
        // Ensure we do not exceed the Riot API rate limits before doing any request
        self.limiter.until_ready().await;
        self.metrics.inc();

        tracing::trace!(url, "🛰️ GET");

        let res = self
            .client
            .get(url)
            .header("X-Riot-Token", &self.key)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let message = res.text().await.unwrap_or_default();
            tracing::debug!(endpoint, status = status.as_u16(), "🛰️ ⚠️ Riot API refused request");
            return Err(AppError::RiotApi {
                status: status.as_u16(),
                message,
            });
        }

        let body = res.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| AppError::MalformedResponse { endpoint, source })
    }
}

impl fmt::Debug for RiotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiotClient")
            .field("platform_url", &self.platform_url)
            .field("regional_url", &self.regional_url)
            .field("account_url", &self.account_url)
            .field("key", &"<redacted>")
            .field("metrics", &self.metrics)
            .finish()
    }
}
