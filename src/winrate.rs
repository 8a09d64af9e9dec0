//! Recent win rate aggregation.
//!
//! A PUUID is turned into a window of recent match IDs, every match detail is
//! fetched and the player's own participant entry decides win or loss. The
//! result is `wins / considered`, and exactly `0.0` when nothing was
//! considered. When every detail fetch failed the last fetch error is
//! returned instead, whatever the policy.

use std::num::NonZeroUsize;
use std::str::FromStr;

use futures::{StreamExt, stream};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::error::AppError;
use crate::riot::MatchApi;

/// What to do when a single match detail cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchErrorPolicy {
    /// Log it and leave the match out of the denominator.
    #[default]
    Skip,
    /// Fail the whole aggregation with the first error.
    Abort,
}

impl FromStr for MatchErrorPolicy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => Err(AppError::Config(format!(
                "unknown match error policy `{other}`, expected `skip` or `abort`"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WinRateOptions {
    /// How many of the most recent matches are looked at.
    pub window: u32,
    pub on_match_error: MatchErrorPolicy,
    /// Match details fetched at the same time. `1` keeps fetches sequential.
    pub concurrency: NonZeroUsize,
}

impl Default for WinRateOptions {
    fn default() -> Self {
        Self {
            window: 10,
            on_match_error: MatchErrorPolicy::default(),
            concurrency: NonZeroUsize::MIN,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WinRate {
    pub wins: u32,
    /// Matches where the player was found and the outcome is known.
    pub considered: u32,
    /// Matches left out, either unreachable or without the player in them.
    pub skipped: u32,
}

impl WinRate {
    pub fn ratio(&self) -> f64 {
        if self.considered == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(self.considered)
    }

    pub fn percentage(&self) -> f64 {
        self.ratio() * 100.0
    }

    fn record(&mut self, win: bool) {
        self.considered += 1;
        if win {
            self.wins += 1;
        }
    }
}

#[instrument(skip(api, options), fields(window = options.window))]
pub async fn compute_win_rate<A>(
    api: &A,
    puuid: &str,
    options: &WinRateOptions,
) -> Result<WinRate, AppError>
where
    A: MatchApi + ?Sized,
{
    let match_ids = api.get_match_ids(puuid, 0, options.window).await?;

    let mut rate = WinRate::default();

    if match_ids.is_empty() {
        debug!("📈 No match history, win rate is 0");
        return Ok(rate);
    }

    // `buffered` yields in input order whatever the concurrency.
    let mut details = stream::iter(match_ids)
        .map(|match_id| async move {
            let detail = api.get_match(&match_id).await;
            (match_id, detail)
        })
        .buffered(options.concurrency.get());

    let mut last_fetch_error = None;

    while let Some((match_id, detail)) = details.next().await {
        let detail = match detail {
            Ok(detail) => detail,
            Err(e) => match options.on_match_error {
                MatchErrorPolicy::Abort => return Err(e),
                MatchErrorPolicy::Skip => {
                    warn!(error = %e, match_id = %match_id, "📈 ⚠️ Skipping unreachable match");
                    rate.skipped += 1;
                    last_fetch_error = Some(e);
                    continue;
                }
            },
        };

        match detail.participant(puuid) {
            Some(participant) => rate.record(participant.win),
            None => {
                warn!(match_id = %match_id, "📈 ⚠️ Player not found in match, skipping");
                rate.skipped += 1;
            }
        }
    }

    // Nothing usable and at least one fetch failed: a 0% here would be a lie.
    if rate.considered == 0 {
        if let Some(e) = last_fetch_error {
            warn!(skipped = rate.skipped, "📈 ❌ Every match detail was unreachable");
            return Err(e);
        }
    }

    info!(
        wins = rate.wins,
        considered = rate.considered,
        skipped = rate.skipped,
        "📈 Win rate computed"
    );

    Ok(rate)
}
