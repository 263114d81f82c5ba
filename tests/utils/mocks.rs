use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use hoopstats::stats::{
    models::{Game, GameStat, Player, Team},
    types::Pagination,
    StatRepository, StatsError,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Every call fails with a repository error. Counts calls so tests can
/// assert nothing was retried.
#[derive(Default)]
pub struct FailingStatRepository {
    calls: AtomicUsize,
}

impl FailingStatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn fail<T>(&self) -> Result<T, StatsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StatsError::Repository("connection refused".to_string()))
    }
}

#[async_trait]
impl StatRepository for FailingStatRepository {
    async fn log_game_stat(&self, _stat: &GameStat) -> Result<(), StatsError> {
        self.fail()
    }
    async fn get_player(&self, _player_id: i32) -> Result<Option<Player>, StatsError> {
        self.fail()
    }
    async fn get_game(&self, _game_id: i32) -> Result<Option<Game>, StatsError> {
        self.fail()
    }
    async fn get_team(&self, _team_id: i32) -> Result<Option<Team>, StatsError> {
        self.fail()
    }
    async fn get_player_games_by_season(
        &self,
        _player_id: i32,
        _season: i32,
    ) -> Result<Vec<GameStat>, StatsError> {
        self.fail()
    }
    async fn get_player_games(&self, _player_id: i32) -> Result<Vec<GameStat>, StatsError> {
        self.fail()
    }
    async fn get_team_players_by_season(
        &self,
        _team_id: i32,
        _season: i32,
    ) -> Result<Vec<GameStat>, StatsError> {
        self.fail()
    }
    async fn get_players(&self, _page: Pagination) -> Result<(Vec<Player>, i64), StatsError> {
        self.fail()
    }
    async fn get_team_players(&self, _team_id: i32) -> Result<Vec<Player>, StatsError> {
        self.fail()
    }
    async fn get_teams(&self) -> Result<Vec<Team>, StatsError> {
        self.fail()
    }
}
