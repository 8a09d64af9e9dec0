use async_trait::async_trait;

use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::traits::SummonerApi;
use crate::riot::types::SummonerDto;

#[async_trait]
impl SummonerApi for RiotClient {
    /// Get summoner profile by PUUID
    /// Uses platform routing (euw1, eun1, na1, ...)
    async fn get_summoner_by_puuid(&self, puuid: &str) -> Result<SummonerDto, AppError> {
        let url = format!(
            "{}/lol/summoner/v4/summoners/by-puuid/{}",
            self.platform_url(),
            urlencoding::encode(puuid)
        );

        self.get("summoner-v4", &url).await
    }
}
