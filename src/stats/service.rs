use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::{
    models::{GameStat, Player, PlayerSeasonAverage, StatTotals, TeamSeasonAverage},
    repository::StatRepository,
    types::{
        GetPlayerSeasonAveragesRequest, GetTeamSeasonAveragesRequest, LogGameStatRequest,
        PageRequest, Pagination, PlayersGameStatsResponse, TeamsGameStatsResponse,
    },
    validation::{require_positive_id, require_positive_season, validate_stat_line},
    StatsError,
};

/// Validates stat submissions and computes per-game averages from stored
/// stat lines.
///
/// Holds nothing but the repository handle, so one instance can serve any
/// number of concurrent requests. Repository errors are returned as-is.
#[derive(Clone)]
pub struct StatsService {
    repository: Arc<dyn StatRepository>,
}

impl StatsService {
    pub fn new(repository: Arc<dyn StatRepository>) -> Self {
        Self { repository }
    }

    /// Records one stat line after every rule passes. Issues exactly one
    /// repository write on success and none on failure.
    #[instrument(skip(self, request), fields(game_id = request.game_id))]
    pub async fn log_game_stat(
        &self,
        player_id: i32,
        request: LogGameStatRequest,
    ) -> Result<(), StatsError> {
        validate_stat_line(player_id, &request)?;

        if self.repository.get_game(request.game_id).await?.is_none() {
            return Err(StatsError::not_found("game not found"));
        }
        if self.repository.get_player(player_id).await?.is_none() {
            return Err(StatsError::not_found("player not found"));
        }

        let stat = GameStat {
            player_id,
            game_id: request.game_id,
            points: request.points,
            assists: request.assists,
            rebounds: request.rebounds,
            steals: request.steals,
            blocks: request.blocks,
            turnovers: request.turnovers,
            fouls: request.fouls,
            minutes_played: request.minutes_played,
        };
        self.repository.log_game_stat(&stat).await?;

        info!(player_id, game_id = stat.game_id, "Stat line logged");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_player(&self, player_id: i32) -> Result<Player, StatsError> {
        require_positive_id(player_id, "player")?;
        self.find_player(player_id).await
    }

    /// Season averages for one player. `Ok(None)` when the player exists but
    /// has no stat lines in the season.
    #[instrument(skip(self))]
    pub async fn get_player_season_averages(
        &self,
        request: GetPlayerSeasonAveragesRequest,
    ) -> Result<Option<PlayerSeasonAverage>, StatsError> {
        // Only used to keep the request shape uniform with the list endpoints
        let page = Pagination::normalize(request.page_number, request.page_size);
        debug!(?page, "Normalized pagination");

        require_positive_season(request.season_year)?;
        require_positive_id(request.player_id, "player")?;

        let player = self.find_player(request.player_id).await?;
        let lines = self
            .repository
            .get_player_games_by_season(player.id, request.season_year)
            .await?;

        let average = player_average(&player, &lines, Some(request.season_year));
        if average.is_none() {
            debug!(player_id = player.id, "No games in season");
        }
        Ok(average)
    }

    /// Career averages for one page of players. Players without any stat
    /// lines are left out of the page; `total_count` still counts them.
    #[instrument(skip(self))]
    pub async fn get_players_game_stats(
        &self,
        request: PageRequest,
    ) -> Result<PlayersGameStatsResponse, StatsError> {
        let page = Pagination::from(request);
        let (players, total_count) = self.repository.get_players(page).await?;

        let histories = try_join_all(
            players
                .iter()
                .map(|player| self.repository.get_player_games(player.id)),
        )
        .await?;

        let player_stats: Vec<PlayerSeasonAverage> = players
            .iter()
            .zip(histories.iter())
            .filter_map(|(player, lines)| player_average(player, lines, None))
            .collect();

        info!(
            page_number = page.page_number(),
            page_size = page.page_size(),
            player_count = player_stats.len(),
            total_count,
            "Player averages computed"
        );

        Ok(PlayersGameStatsResponse {
            player_stats,
            total_count,
            page_number: page.page_number(),
            page_size: page.page_size(),
        })
    }

    /// Season averages over every stat line of every player on the team.
    #[instrument(skip(self))]
    pub async fn get_team_season_averages(
        &self,
        request: GetTeamSeasonAveragesRequest,
    ) -> Result<Option<TeamSeasonAverage>, StatsError> {
        let page = Pagination::normalize(request.page_number, request.page_size);
        debug!(?page, "Normalized pagination");

        require_positive_season(request.season_year)?;
        require_positive_id(request.team_id, "team")?;

        let team = self
            .repository
            .get_team(request.team_id)
            .await?
            .ok_or_else(|| StatsError::not_found("team not found"))?;

        let lines = self
            .repository
            .get_team_players_by_season(team.id, request.season_year)
            .await?;

        Ok(StatTotals::from_lines(&lines)
            .per_game()
            .map(|averages| TeamSeasonAverage {
                team_id: team.id,
                team_name: team.name,
                season: Some(request.season_year),
                averages,
            }))
    }

    /// Averages for every team over all recorded games of its current
    /// players. Teams without any stat lines are omitted.
    #[instrument(skip(self))]
    pub async fn get_teams_game_stats(
        &self,
        request: PageRequest,
    ) -> Result<TeamsGameStatsResponse, StatsError> {
        // Normalized for parity with the player list; teams are not paged
        let page = Pagination::from(request);
        debug!(?page, "Normalized pagination");

        let teams = self.repository.get_teams().await?;
        let mut team_stats = Vec::with_capacity(teams.len());

        for team in teams {
            let players = self.repository.get_team_players(team.id).await?;
            let histories = try_join_all(
                players
                    .iter()
                    .map(|player| self.repository.get_player_games(player.id)),
            )
            .await?;

            let mut totals = StatTotals::new();
            for lines in &histories {
                totals.extend(lines);
            }

            match totals.per_game() {
                Some(averages) => team_stats.push(TeamSeasonAverage {
                    team_id: team.id,
                    team_name: team.name,
                    season: None,
                    averages,
                }),
                None => debug!(team_id = team.id, "Team has no recorded games"),
            }
        }

        info!(team_count = team_stats.len(), "Team averages computed");
        Ok(TeamsGameStatsResponse { team_stats })
    }

    async fn find_player(&self, player_id: i32) -> Result<Player, StatsError> {
        self.repository
            .get_player(player_id)
            .await?
            .ok_or_else(|| StatsError::not_found("player not found"))
    }
}

fn player_average(
    player: &Player,
    lines: &[GameStat],
    season: Option<i32>,
) -> Option<PlayerSeasonAverage> {
    StatTotals::from_lines(lines)
        .per_game()
        .map(|averages| PlayerSeasonAverage {
            player_id: player.id,
            player_name: player.name.clone(),
            team_id: player.team_id,
            season,
            averages,
        })
}
