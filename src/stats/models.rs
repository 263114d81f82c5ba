use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for the teams table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Team {
    pub id: i32,
    pub name: String, // Unique across teams
}

/// Database model for the players table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Player {
    pub id: i32,
    pub name: String,
    pub team_id: i32, // Current team only, no transfer history
}

/// Database model for the games table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Game {
    pub id: i32,
    pub date: NaiveDate,
    pub season: i32, // Season year, e.g. 2024
    pub team_a_id: i32,
    pub team_b_id: i32,
}

/// One stat line: a single player's box score for a single game.
/// Keyed by `(player_id, game_id)`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct GameStat {
    pub player_id: i32,
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

/// Per-game means of every box-score field, plus the number of stat lines
/// they were computed from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerGameAverages {
    pub points_per_game: f64,
    pub assists_per_game: f64,
    pub rebounds_per_game: f64,
    pub steals_per_game: f64,
    pub blocks_per_game: f64,
    pub turnovers_per_game: f64,
    pub fouls_per_game: f64,
    pub minutes_played_per_game: f64,
    pub games_played: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSeasonAverage {
    pub player_id: i32,
    pub player_name: String,
    pub team_id: i32,
    /// `None` when averaged over every recorded game rather than one season.
    pub season: Option<i32>,
    #[serde(flatten)]
    pub averages: PerGameAverages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonAverage {
    pub team_id: i32,
    pub team_name: String,
    pub season: Option<i32>,
    #[serde(flatten)]
    pub averages: PerGameAverages,
}

/// Running sums over stat lines. Integer fields are summed exactly and only
/// converted to floating point at division time.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatTotals {
    points: i64,
    assists: i64,
    rebounds: i64,
    steals: i64,
    blocks: i64,
    turnovers: i64,
    fouls: i64,
    minutes_played: f64,
    games: u32,
}

impl StatTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines<'a>(lines: impl IntoIterator<Item = &'a GameStat>) -> Self {
        let mut totals = Self::new();
        totals.extend(lines);
        totals
    }

    pub fn add(&mut self, line: &GameStat) {
        self.points += i64::from(line.points);
        self.assists += i64::from(line.assists);
        self.rebounds += i64::from(line.rebounds);
        self.steals += i64::from(line.steals);
        self.blocks += i64::from(line.blocks);
        self.turnovers += i64::from(line.turnovers);
        self.fouls += i64::from(line.fouls);
        self.minutes_played += line.minutes_played;
        self.games += 1;
    }

    pub fn extend<'a>(&mut self, lines: impl IntoIterator<Item = &'a GameStat>) {
        for line in lines {
            self.add(line);
        }
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    /// Divides every sum by the number of lines added. `None` when no lines
    /// were added.
    pub fn per_game(&self) -> Option<PerGameAverages> {
        if self.games == 0 {
            return None;
        }

        let games = f64::from(self.games);
        Some(PerGameAverages {
            points_per_game: self.points as f64 / games,
            assists_per_game: self.assists as f64 / games,
            rebounds_per_game: self.rebounds as f64 / games,
            steals_per_game: self.steals as f64 / games,
            blocks_per_game: self.blocks as f64 / games,
            turnovers_per_game: self.turnovers as f64 / games,
            fouls_per_game: self.fouls as f64 / games,
            minutes_played_per_game: self.minutes_played / games,
            games_played: self.games,
        })
    }
}
