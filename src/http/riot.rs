use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::error::AppError;
use crate::identity;
use crate::riot::SummonerDto;
use crate::winrate;

use super::state::AppState;
use super::validation::path_segment;

/// Riot ID → PUUID → summoner profile.
async fn by_riot_id(
    State(state): State<AppState>,
    Path((game_name, tag_line)): Path<(String, String)>,
) -> Result<Json<SummonerDto>, AppError> {
    path_segment("game_name", &game_name)?;
    path_segment("tag_line", &tag_line)?;

    let profile = identity::profile_by_riot_id(state.riot.as_ref(), &game_name, &tag_line).await?;

    Ok(Json(profile))
}

/// Recent win rate as a percentage.
async fn get_winrate(
    State(state): State<AppState>,
    Path(puuid): Path<String>,
) -> Result<Json<f64>, AppError> {
    path_segment("puuid", &puuid)?;

    let rate = winrate::compute_win_rate(state.riot.as_ref(), &puuid, &state.winrate).await?;

    Ok(Json(rate.percentage()))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/by-riot-id/{game_name}/{tag_line}", get(by_riot_id))
        .route("/api/get-winrate/{puuid}", get(get_winrate))
}
