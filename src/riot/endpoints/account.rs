use async_trait::async_trait;

use crate::error::AppError;
use crate::riot::client::RiotClient;
use crate::riot::traits::AccountApi;
use crate::riot::types::AccountDto;

impl RiotClient {
    fn riot_id_url(&self, game_name: &str, tag_line: &str) -> String {
        format!(
            "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            self.account_url(),
            urlencoding::encode(game_name),
            urlencoding::encode(tag_line)
        )
    }
}

#[async_trait]
impl AccountApi for RiotClient {
    /// Get account by Riot ID (game name + tag line)
    /// Uses regional routing (americas, europe, asia)
    async fn get_account_by_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
    ) -> Result<AccountDto, AppError> {
        let url = self.riot_id_url(game_name, tag_line);

        self.get("account-v1", &url).await
    }
}

#[cfg(test)]
mod tests {
    use crate::riot::client::{RiotClient, tests::test_config};

    #[test]
    fn riot_id_segments_are_escaped() {
        let client = RiotClient::new(&test_config(Some("http://riot.test"))).unwrap();

        assert_eq!(
            client.riot_id_url("Le Conservateur", "3012"),
            "http://riot.test/riot/account/v1/accounts/by-riot-id/Le%20Conservateur/3012"
        );
        assert_eq!(
            client.riot_id_url("a?b", "#EU"),
            "http://riot.test/riot/account/v1/accounts/by-riot-id/a%3Fb/%23EU"
        );
    }
}
