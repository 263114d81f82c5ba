use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::{
    models::Player,
    types::{
        GetPlayerSeasonAveragesRequest, GetTeamSeasonAveragesRequest, LogGameStatRequest,
        LogGameStatResponse, PageRequest, PlayerSeasonAveragesResponse, PlayersGameStatsResponse,
        TeamSeasonAveragesResponse, TeamsGameStatsResponse,
    },
};
use crate::shared::{AppError, AppState};

/// HTTP handler for logging a player's stat line
///
/// POST /players/:player_id/games
#[instrument(name = "log_game_stat", skip(state, request))]
pub async fn log_game_stat(
    State(state): State<AppState>,
    Path(player_id): Path<i32>,
    Json(request): Json<LogGameStatRequest>,
) -> Result<Json<LogGameStatResponse>, AppError> {
    info!(player_id, game_id = request.game_id, "Received log game stat request");

    state.stats_service.log_game_stat(player_id, request).await?;

    Ok(Json(LogGameStatResponse { success: true }))
}

/// HTTP handler for looking up a player
///
/// GET /players/:player_id
#[instrument(name = "get_player", skip(state))]
pub async fn get_player(
    State(state): State<AppState>,
    Path(player_id): Path<i32>,
) -> Result<Json<Player>, AppError> {
    let player = state.stats_service.get_player(player_id).await?;
    Ok(Json(player))
}

/// HTTP handler for one player's season averages
///
/// POST /players/season-averages
/// Returns `player_stats: null` when the player has no games in the season
#[instrument(name = "get_player_season_averages", skip(state))]
pub async fn get_player_season_averages(
    State(state): State<AppState>,
    Json(request): Json<GetPlayerSeasonAveragesRequest>,
) -> Result<Json<PlayerSeasonAveragesResponse>, AppError> {
    info!(
        player_id = request.player_id,
        season_year = request.season_year,
        "Received player season averages request"
    );

    let player_stats = state
        .stats_service
        .get_player_season_averages(request)
        .await?;

    Ok(Json(PlayerSeasonAveragesResponse { player_stats }))
}

/// HTTP handler for one team's season averages
///
/// POST /teams/season-averages
#[instrument(name = "get_team_season_averages", skip(state))]
pub async fn get_team_season_averages(
    State(state): State<AppState>,
    Json(request): Json<GetTeamSeasonAveragesRequest>,
) -> Result<Json<TeamSeasonAveragesResponse>, AppError> {
    info!(
        team_id = request.team_id,
        season_year = request.season_year,
        "Received team season averages request"
    );

    let team_stats = state.stats_service.get_team_season_averages(request).await?;

    Ok(Json(TeamSeasonAveragesResponse { team_stats }))
}

/// HTTP handler for a page of player averages
///
/// POST /players/game-stats
#[instrument(name = "get_players_game_stats", skip(state))]
pub async fn get_players_game_stats(
    State(state): State<AppState>,
    Json(request): Json<PageRequest>,
) -> Result<Json<PlayersGameStatsResponse>, AppError> {
    let response = state.stats_service.get_players_game_stats(request).await?;
    Ok(Json(response))
}

/// HTTP handler for averages of every team with recorded games
///
/// POST /teams/game-stats
#[instrument(name = "get_teams_game_stats", skip(state))]
pub async fn get_teams_game_stats(
    State(state): State<AppState>,
    Json(request): Json<PageRequest>,
) -> Result<Json<TeamsGameStatsResponse>, AppError> {
    let response = state.stats_service.get_teams_game_stats(request).await?;
    Ok(Json(response))
}
