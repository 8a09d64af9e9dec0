//! Riot Games API client and the typed payloads the proxy consumes.

mod client;
mod endpoints;
mod metrics;
mod region;
mod traits;
mod types;

pub use client::RiotClient;
pub use metrics::{MetricsSnapshot, RequestMetrics};
pub use region::{Platform, Region};
pub use traits::{AccountApi, MatchApi, SummonerApi};
pub use types::{AccountDto, InfoDto, MatchDto, ParticipantDto, SummonerDto};
