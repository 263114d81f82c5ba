use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::shared::AppState;
use crate::stats;

/// Builds the service router with every stats operation mounted
pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/players/:player_id", get(stats::get_player))
        .route("/players/:player_id/games", post(stats::log_game_stat))
        .route(
            "/players/season-averages",
            post(stats::get_player_season_averages),
        )
        .route("/players/game-stats", post(stats::get_players_game_stats))
        .route(
            "/teams/season-averages",
            post(stats::get_team_season_averages),
        )
        .route("/teams/game-stats", post(stats::get_teams_game_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
