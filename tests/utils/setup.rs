use chrono::NaiveDate;
use std::sync::Arc;

use hoopstats::stats::{
    models::{Game, Player, Team},
    types::LogGameStatRequest,
    InMemoryStatRepository, StatsService,
};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub stats_service: StatsService,
    pub stat_repository: InMemoryStatRepository,
}

/// Seeds an in-memory repository with teams, players and games.
/// Games are numbered from 1 in the order they are added.
pub struct TestSetupBuilder {
    teams: Vec<(i32, String)>,
    players: Vec<(i32, String, i32)>,
    games: Vec<(i32, i32, i32)>, // (season, team_a_id, team_b_id)
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            teams: vec![],
            players: vec![],
            games: vec![],
        }
    }

    pub fn with_team(mut self, id: i32, name: &str) -> Self {
        self.teams.push((id, name.to_string()));
        self
    }

    pub fn with_player(mut self, id: i32, name: &str, team_id: i32) -> Self {
        self.players.push((id, name.to_string(), team_id));
        self
    }

    pub fn with_games(mut self, count: usize, season: i32, team_a_id: i32, team_b_id: i32) -> Self {
        for _ in 0..count {
            self.games.push((season, team_a_id, team_b_id));
        }
        self
    }

    /// Bulls (1) and Knicks (2), player 7 on the Bulls, player 33 on the
    /// Knicks, three 2024 games and one 2023 game.
    pub fn with_league(self) -> Self {
        self.with_team(1, "Bulls")
            .with_team(2, "Knicks")
            .with_player(7, "Scottie", 1)
            .with_player(33, "Patrick", 2)
            .with_games(3, 2024, 1, 2)
            .with_games(1, 2023, 2, 1)
    }

    pub async fn build(self) -> TestSetup {
        let repo = InMemoryStatRepository::new();

        for (id, name) in self.teams {
            repo.add_team(Team { id, name }).await.unwrap();
        }
        for (id, name, team_id) in self.players {
            repo.add_player(Player { id, name, team_id }).await.unwrap();
        }
        for (index, (season, team_a_id, team_b_id)) in self.games.into_iter().enumerate() {
            let id = index as i32 + 1;
            repo.add_game(Game {
                id,
                date: NaiveDate::from_ymd_opt(season, 11, 1).unwrap() + chrono::Days::new(index as u64),
                season,
                team_a_id,
                team_b_id,
            })
            .await
            .unwrap();
        }

        TestSetup {
            stats_service: StatsService::new(Arc::new(repo.clone())),
            stat_repository: repo,
        }
    }
}

/// A valid stat line: every counting stat 1, two fouls, 30 minutes
pub fn stat_line(game_id: i32, points: i32) -> LogGameStatRequest {
    LogGameStatRequest {
        game_id,
        points,
        assists: 1,
        rebounds: 1,
        steals: 1,
        blocks: 1,
        turnovers: 1,
        fouls: 2,
        minutes_played: 30.0,
    }
}
