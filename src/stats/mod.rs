// Public API - what other modules can use
pub use handlers::{
    get_player, get_player_season_averages, get_players_game_stats, get_team_season_averages,
    get_teams_game_stats, log_game_stat,
};

mod errors;
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
pub mod validation;

pub use errors::StatsError;
pub use models::*;
pub use repository::{InMemoryStatRepository, PostgresStatRepository, StatRepository};
pub use service::StatsService;
