use serde::{Deserialize, Serialize};

use super::models::{PlayerSeasonAverage, TeamSeasonAverage};

pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Request payload for logging one player's stat line for a game.
/// The player id travels separately (path parameter).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogGameStatRequest {
    pub game_id: i32,
    pub points: i32,
    pub assists: i32,
    pub rebounds: i32,
    pub steals: i32,
    pub blocks: i32,
    pub turnovers: i32,
    pub fouls: i32,
    pub minutes_played: f64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LogGameStatResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetPlayerSeasonAveragesRequest {
    #[serde(default)]
    pub page_size: i64,
    #[serde(default)]
    pub page_number: i64,
    pub season_year: i32,
    pub player_id: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerSeasonAveragesResponse {
    /// `None` when the player has no games in the season.
    pub player_stats: Option<PlayerSeasonAverage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetTeamSeasonAveragesRequest {
    #[serde(default)]
    pub page_size: i64,
    #[serde(default)]
    pub page_number: i64,
    pub team_id: i32,
    pub season_year: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TeamSeasonAveragesResponse {
    pub team_stats: Option<TeamSeasonAverage>,
}

/// Bare pagination request used by the list endpoints
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub page_size: i64,
    #[serde(default)]
    pub page_number: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayersGameStatsResponse {
    pub player_stats: Vec<PlayerSeasonAverage>,
    /// Number of players overall, not just on this page
    pub total_count: i64,
    pub page_number: i64,
    pub page_size: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TeamsGameStatsResponse {
    pub team_stats: Vec<TeamSeasonAverage>,
}

/// Page coordinates after normalization: a 1-based page number and a size
/// in `1..=MAX_PAGE_SIZE`. Out-of-range input is coerced, never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_number: i64,
    page_size: i64,
}

impl Pagination {
    pub fn normalize(page_number: i64, page_size: i64) -> Self {
        let page_number = if page_number <= 0 {
            DEFAULT_PAGE_NUMBER
        } else {
            page_number
        };
        let page_size = if page_size <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size.min(MAX_PAGE_SIZE)
        };

        Self {
            page_number,
            page_size,
        }
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Number of rows to skip before this page starts
    pub fn offset(&self) -> i64 {
        (self.page_number - 1).saturating_mul(self.page_size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::normalize(DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE)
    }
}

impl From<PageRequest> for Pagination {
    fn from(request: PageRequest) -> Self {
        Self::normalize(request.page_number, request.page_size)
    }
}
