use std::fmt::Debug;

use async_trait::async_trait;

use crate::error::AppError;

use super::types::{AccountDto, MatchDto, SummonerDto};

/// Riot Account-V1 API as described in the official documentation.
#[async_trait]
pub trait AccountApi: Send + Sync + Debug {
    async fn get_account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError>;
}

/// Riot Match-V5 API.
#[async_trait]
pub trait MatchApi: Send + Sync + Debug {
    /// Most recent match IDs first, as ordered upstream.
    async fn get_match_ids(
        &self,
        puuid: &str,
        start: u32,
        count: u32,
    ) -> Result<Vec<String>, AppError>;

    async fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError>;
}

/// Riot Summoner-V4 API.
#[async_trait]
pub trait SummonerApi: Send + Sync + Debug {
    async fn get_summoner_by_puuid(&self, puuid: &str) -> Result<SummonerDto, AppError>;
}
