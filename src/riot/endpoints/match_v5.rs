use async_trait::async_trait;

use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::traits::MatchApi;
use crate::riot::types::MatchDto;

#[async_trait]
impl MatchApi for RiotClient {
    /// Get list of match IDs by PUUID
    /// Uses regional routing (americas, europe, asia, sea)
    async fn get_match_ids(
        &self,
        puuid: &str,
        start: u32,
        count: u32,
    ) -> Result<Vec<String>, AppError> {
        let url = format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids?start={}&count={}",
            self.regional_url(),
            urlencoding::encode(puuid),
            start,
            count
        );

        self.get("match-v5 ids", &url).await
    }

    /// Get match details by match ID
    /// Uses regional routing (americas, europe, asia, sea)
    async fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        let url = format!(
            "{}/lol/match/v5/matches/{}",
            self.regional_url(),
            urlencoding::encode(match_id)
        );

        self.get("match-v5", &url).await
    }
}
