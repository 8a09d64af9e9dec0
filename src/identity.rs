//! Riot ID resolution.

use tracing::{debug, instrument};

use crate::error::AppError;
use crate::riot::{AccountApi, SummonerApi, SummonerDto};

/// Resolve a Riot ID (game name + tag line) into the player's PUUID.
///
/// The caller is expected to have validated both segments; they are escaped
/// again before being put in the upstream path.
#[instrument(skip(api), fields(riot_id = %format!("{}#{}", game_name, tag_line)))]
pub async fn resolve_puuid<A>(api: &A, game_name: &str, tag_line: &str) -> Result<String, AppError>
where
    A: AccountApi + ?Sized,
{
    let account = api.get_account_by_riot_id(game_name, tag_line).await?;

    if account.puuid.trim().is_empty() {
        return Err(AppError::MissingField {
            endpoint: "account-v1",
            field: "puuid",
        });
    }

    debug!(puuid = %account.puuid, "🔎 Riot ID resolved");

    Ok(account.puuid)
}

/// Riot ID → PUUID → summoner profile, returned untouched.
pub async fn profile_by_riot_id<A>(
    api: &A,
    game_name: &str,
    tag_line: &str,
) -> Result<SummonerDto, AppError>
where
    A: AccountApi + SummonerApi + ?Sized,
{
    let puuid = resolve_puuid(api, game_name, tag_line).await?;

    api.get_summoner_by_puuid(&puuid).await
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::Map;

    use super::*;
    use crate::riot::AccountDto;

    #[derive(Debug)]
    struct StubApi {
        puuid: Option<&'static str>,
    }

    #[async_trait]
    impl AccountApi for StubApi {
        async fn get_account_by_riot_id(
            &self,
            _game_name: &str,
            _tag_line: &str,
        ) -> Result<AccountDto, AppError> {
            match self.puuid {
                Some(puuid) => Ok(AccountDto {
                    puuid: puuid.to_string(),
                }),
                None => Err(AppError::RiotApi {
                    status: 404,
                    message: "Not found".into(),
                }),
            }
        }
    }

    #[async_trait]
    impl SummonerApi for StubApi {
        async fn get_summoner_by_puuid(&self, puuid: &str) -> Result<SummonerDto, AppError> {
            Ok(SummonerDto {
                puuid: puuid.to_string(),
                id: None,
                account_id: None,
                name: Some("SampleSummoner".into()),
                profile_icon_id: 1,
                revision_date: 0,
                summoner_level: 30,
                extra: Map::new(),
            })
        }
    }

    #[tokio::test]
    async fn resolves_puuid() {
        let api = StubApi {
            puuid: Some("sample-puuid"),
        };

        let puuid = resolve_puuid(&api, "SomeGameName", "NA1").await.unwrap();

        assert_eq!(puuid, "sample-puuid");
    }

    #[tokio::test]
    async fn empty_puuid_is_malformed() {
        let api = StubApi { puuid: Some("") };

        let err = resolve_puuid(&api, "SomeGameName", "NA1").await.unwrap_err();

        assert!(matches!(err, AppError::MissingField { field: "puuid", .. }));
    }

    #[tokio::test]
    async fn upstream_error_is_propagated() {
        let api = StubApi { puuid: None };

        let err = profile_by_riot_id(&api, "Nobody", "XX1").await.unwrap_err();

        assert!(matches!(err, AppError::RiotApi { status: 404, .. }));
    }

    #[tokio::test]
    async fn profile_is_fetched_for_resolved_puuid() {
        let api = StubApi {
            puuid: Some("sample-puuid"),
        };

        let profile = profile_by_riot_id(&api, "SomeGameName", "NA1").await.unwrap();

        assert_eq!(profile.puuid, "sample-puuid");
        assert_eq!(profile.name.as_deref(), Some("SampleSummoner"));
    }
}
