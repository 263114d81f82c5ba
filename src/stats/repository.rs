use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use super::{
    models::{Game, GameStat, Player, Team},
    types::Pagination,
    StatsError,
};

/// Data access for stat lines and the entities they reference.
///
/// Single-entity lookups return `Ok(None)` when the row does not exist.
/// Row-returning queries are ordered: stat lines by ascending game id (then
/// player id), entities by ascending id.
#[async_trait]
pub trait StatRepository: Send + Sync {
    async fn log_game_stat(&self, stat: &GameStat) -> Result<(), StatsError>;
    async fn get_player(&self, player_id: i32) -> Result<Option<Player>, StatsError>;
    async fn get_game(&self, game_id: i32) -> Result<Option<Game>, StatsError>;
    async fn get_team(&self, team_id: i32) -> Result<Option<Team>, StatsError>;

    async fn get_player_games_by_season(
        &self,
        player_id: i32,
        season: i32,
    ) -> Result<Vec<GameStat>, StatsError>;

    /// Every stat line recorded for the player, across all seasons
    async fn get_player_games(&self, player_id: i32) -> Result<Vec<GameStat>, StatsError>;

    /// Stat lines of every player currently on the team, for games in the season
    async fn get_team_players_by_season(
        &self,
        team_id: i32,
        season: i32,
    ) -> Result<Vec<GameStat>, StatsError>;

    /// One page of players plus the total number of players
    async fn get_players(&self, page: Pagination) -> Result<(Vec<Player>, i64), StatsError>;

    async fn get_team_players(&self, team_id: i32) -> Result<Vec<Player>, StatsError>;
    async fn get_teams(&self) -> Result<Vec<Team>, StatsError>;
}

#[derive(Debug, Default)]
struct StatTables {
    teams: BTreeMap<i32, Team>,
    players: BTreeMap<i32, Player>,
    games: BTreeMap<i32, Game>,
    stats: BTreeMap<(i32, i32), GameStat>, // (player_id, game_id)
}

/// In-memory implementation of StatRepository for development and testing.
///
/// The `add_*` methods stand in for the provisioning flows that create
/// teams, players and games in production, and enforce the same
/// constraints the relational schema does.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStatRepository {
    tables: Arc<RwLock<StatTables>>,
}

impl InMemoryStatRepository {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(StatTables::default())),
        }
    }

    pub async fn add_team(&self, team: Team) -> Result<(), StatsError> {
        let mut tables = self.tables.write().await;
        if tables.teams.contains_key(&team.id) {
            return Err(StatsError::Repository(format!(
                "team {} already exists",
                team.id
            )));
        }
        if tables.teams.values().any(|t| t.name == team.name) {
            return Err(StatsError::Repository(format!(
                "team name '{}' already taken",
                team.name
            )));
        }
        tables.teams.insert(team.id, team);
        Ok(())
    }

    pub async fn add_player(&self, player: Player) -> Result<(), StatsError> {
        let mut tables = self.tables.write().await;
        if !tables.teams.contains_key(&player.team_id) {
            return Err(StatsError::Repository(format!(
                "team {} does not exist",
                player.team_id
            )));
        }
        if tables.players.contains_key(&player.id) {
            return Err(StatsError::Repository(format!(
                "player {} already exists",
                player.id
            )));
        }
        tables.players.insert(player.id, player);
        Ok(())
    }

    pub async fn add_game(&self, game: Game) -> Result<(), StatsError> {
        let mut tables = self.tables.write().await;
        if game.team_a_id == game.team_b_id {
            return Err(StatsError::Repository(
                "a game must be between two distinct teams".to_string(),
            ));
        }
        for team_id in [game.team_a_id, game.team_b_id] {
            if !tables.teams.contains_key(&team_id) {
                return Err(StatsError::Repository(format!(
                    "team {team_id} does not exist"
                )));
            }
        }
        if tables.games.contains_key(&game.id) {
            return Err(StatsError::Repository(format!(
                "game {} already exists",
                game.id
            )));
        }
        tables.games.insert(game.id, game);
        Ok(())
    }

    /// Removes a player and, like the schema's cascading foreign key, every
    /// stat line that references them.
    pub async fn remove_player(&self, player_id: i32) -> bool {
        let mut tables = self.tables.write().await;
        let removed = tables.players.remove(&player_id).is_some();
        tables.stats.retain(|(pid, _), _| *pid != player_id);
        removed
    }

    pub async fn get_stat(&self, player_id: i32, game_id: i32) -> Option<GameStat> {
        self.tables
            .read()
            .await
            .stats
            .get(&(player_id, game_id))
            .cloned()
    }

    pub async fn stat_count(&self) -> usize {
        self.tables.read().await.stats.len()
    }
}

#[async_trait]
impl StatRepository for InMemoryStatRepository {
    #[instrument(skip(self, stat), fields(player_id = stat.player_id, game_id = stat.game_id))]
    async fn log_game_stat(&self, stat: &GameStat) -> Result<(), StatsError> {
        debug!("Logging stat line in memory");

        let mut tables = self.tables.write().await;
        let key = (stat.player_id, stat.game_id);
        if tables.stats.contains_key(&key) {
            warn!("Stat line already exists in memory");
            return Err(StatsError::Repository(format!(
                "stat line for player {} in game {} already exists",
                stat.player_id, stat.game_id
            )));
        }
        tables.stats.insert(key, stat.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: i32) -> Result<Option<Player>, StatsError> {
        Ok(self.tables.read().await.players.get(&player_id).cloned())
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: i32) -> Result<Option<Game>, StatsError> {
        Ok(self.tables.read().await.games.get(&game_id).cloned())
    }

    #[instrument(skip(self))]
    async fn get_team(&self, team_id: i32) -> Result<Option<Team>, StatsError> {
        Ok(self.tables.read().await.teams.get(&team_id).cloned())
    }

    #[instrument(skip(self))]
    async fn get_player_games_by_season(
        &self,
        player_id: i32,
        season: i32,
    ) -> Result<Vec<GameStat>, StatsError> {
        let tables = self.tables.read().await;
        let lines: Vec<GameStat> = tables
            .stats
            .range((player_id, i32::MIN)..=(player_id, i32::MAX))
            .filter(|(_, stat)| {
                tables
                    .games
                    .get(&stat.game_id)
                    .is_some_and(|game| game.season == season)
            })
            .map(|(_, stat)| stat.clone())
            .collect();

        debug!(line_count = lines.len(), "Fetched player season games from memory");
        Ok(lines)
    }

    #[instrument(skip(self))]
    async fn get_player_games(&self, player_id: i32) -> Result<Vec<GameStat>, StatsError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stats
            .range((player_id, i32::MIN)..=(player_id, i32::MAX))
            .map(|(_, stat)| stat.clone())
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_team_players_by_season(
        &self,
        team_id: i32,
        season: i32,
    ) -> Result<Vec<GameStat>, StatsError> {
        let tables = self.tables.read().await;
        let mut lines: Vec<GameStat> = tables
            .stats
            .values()
            .filter(|stat| {
                tables
                    .players
                    .get(&stat.player_id)
                    .is_some_and(|player| player.team_id == team_id)
            })
            .filter(|stat| {
                tables
                    .games
                    .get(&stat.game_id)
                    .is_some_and(|game| game.season == season)
            })
            .cloned()
            .collect();
        lines.sort_by_key(|stat| (stat.game_id, stat.player_id));

        debug!(line_count = lines.len(), "Fetched team season games from memory");
        Ok(lines)
    }

    #[instrument(skip(self))]
    async fn get_players(&self, page: Pagination) -> Result<(Vec<Player>, i64), StatsError> {
        let tables = self.tables.read().await;
        let total = tables.players.len() as i64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.page_size()).unwrap_or(usize::MAX);

        let players = tables
            .players
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok((players, total))
    }

    #[instrument(skip(self))]
    async fn get_team_players(&self, team_id: i32) -> Result<Vec<Player>, StatsError> {
        let tables = self.tables.read().await;
        Ok(tables
            .players
            .values()
            .filter(|player| player.team_id == team_id)
            .cloned()
            .collect())
    }

    #[instrument(skip(self))]
    async fn get_teams(&self) -> Result<Vec<Team>, StatsError> {
        Ok(self.tables.read().await.teams.values().cloned().collect())
    }
}

/// PostgreSQL implementation of the stat repository
pub struct PostgresStatRepository {
    pool: PgPool,
}

impl PostgresStatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const STAT_COLUMNS: &str = "gs.player_id, gs.game_id, gs.points, gs.assists, gs.rebounds, \
     gs.steals, gs.blocks, gs.turnovers, gs.fouls, gs.minutes_played";

fn database_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> StatsError {
    move |e| {
        warn!(error = %e, operation, "Stat repository query failed");
        StatsError::from(e)
    }
}

#[async_trait]
impl StatRepository for PostgresStatRepository {
    #[instrument(skip(self, stat), fields(player_id = stat.player_id, game_id = stat.game_id))]
    async fn log_game_stat(&self, stat: &GameStat) -> Result<(), StatsError> {
        debug!("Inserting stat line into database");

        sqlx::query(
            "INSERT INTO game_stats (player_id, game_id, points, assists, rebounds, steals, blocks, turnovers, fouls, minutes_played) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(stat.player_id)
        .bind(stat.game_id)
        .bind(stat.points)
        .bind(stat.assists)
        .bind(stat.rebounds)
        .bind(stat.steals)
        .bind(stat.blocks)
        .bind(stat.turnovers)
        .bind(stat.fouls)
        .bind(stat.minutes_played)
        .execute(&self.pool)
        .await
        .map_err(database_error("log_game_stat"))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: i32) -> Result<Option<Player>, StatsError> {
        sqlx::query_as::<_, Player>("SELECT id, name, team_id FROM players WHERE id = $1")
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error("get_player"))
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: i32) -> Result<Option<Game>, StatsError> {
        sqlx::query_as::<_, Game>(
            "SELECT id, date, season, team_a_id, team_b_id FROM games WHERE id = $1",
        )
        .bind(game_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error("get_game"))
    }

    #[instrument(skip(self))]
    async fn get_team(&self, team_id: i32) -> Result<Option<Team>, StatsError> {
        sqlx::query_as::<_, Team>("SELECT id, name FROM teams WHERE id = $1")
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error("get_team"))
    }

    #[instrument(skip(self))]
    async fn get_player_games_by_season(
        &self,
        player_id: i32,
        season: i32,
    ) -> Result<Vec<GameStat>, StatsError> {
        let query = format!(
            "SELECT {STAT_COLUMNS} FROM game_stats gs \
             JOIN games g ON gs.game_id = g.id \
             WHERE gs.player_id = $1 AND g.season = $2 \
             ORDER BY g.id ASC"
        );
        let lines = sqlx::query_as::<_, GameStat>(&query)
            .bind(player_id)
            .bind(season)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error("get_player_games_by_season"))?;

        debug!(line_count = lines.len(), "Fetched player season games");
        Ok(lines)
    }

    #[instrument(skip(self))]
    async fn get_player_games(&self, player_id: i32) -> Result<Vec<GameStat>, StatsError> {
        let query = format!(
            "SELECT {STAT_COLUMNS} FROM game_stats gs \
             WHERE gs.player_id = $1 \
             ORDER BY gs.game_id ASC"
        );
        sqlx::query_as::<_, GameStat>(&query)
            .bind(player_id)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error("get_player_games"))
    }

    #[instrument(skip(self))]
    async fn get_team_players_by_season(
        &self,
        team_id: i32,
        season: i32,
    ) -> Result<Vec<GameStat>, StatsError> {
        let query = format!(
            "SELECT {STAT_COLUMNS} FROM game_stats gs \
             JOIN players p ON gs.player_id = p.id \
             JOIN games g ON gs.game_id = g.id \
             WHERE p.team_id = $1 AND g.season = $2 \
             ORDER BY g.id ASC, p.id ASC"
        );
        let lines = sqlx::query_as::<_, GameStat>(&query)
            .bind(team_id)
            .bind(season)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error("get_team_players_by_season"))?;

        debug!(line_count = lines.len(), "Fetched team season games");
        Ok(lines)
    }

    #[instrument(skip(self))]
    async fn get_players(&self, page: Pagination) -> Result<(Vec<Player>, i64), StatsError> {
        let players = sqlx::query_as::<_, Player>(
            "SELECT id, name, team_id FROM players ORDER BY id ASC LIMIT $1 OFFSET $2",
        )
        .bind(page.page_size())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("get_players"))?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM players")
            .fetch_one(&self.pool)
            .await
            .map_err(database_error("count_players"))?;

        Ok((players, total))
    }

    #[instrument(skip(self))]
    async fn get_team_players(&self, team_id: i32) -> Result<Vec<Player>, StatsError> {
        sqlx::query_as::<_, Player>(
            "SELECT id, name, team_id FROM players WHERE team_id = $1 ORDER BY id ASC",
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error("get_team_players"))
    }

    #[instrument(skip(self))]
    async fn get_teams(&self) -> Result<Vec<Team>, StatsError> {
        sqlx::query_as::<_, Team>("SELECT id, name FROM teams ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(database_error("get_teams"))
    }
}
