//! Input rules for stat submissions and read requests.
//!
//! Each check returns the first violated rule. The order in
//! [`validate_stat_line`] is part of the contract: callers rely on which
//! message comes back when several fields are bad at once.

use super::{types::LogGameStatRequest, StatsError};

/// Personal-foul limit for one game
pub const MAX_FOULS: i32 = 6;
/// Regulation game length in minutes
pub const MAX_MINUTES_PLAYED: f64 = 48.0;

/// Validates a stat submission before any repository lookup.
///
/// Counting stats must be strictly positive. A legitimate zero (no blocks in
/// a game, say) is rejected; see DESIGN.md.
pub fn validate_stat_line(player_id: i32, request: &LogGameStatRequest) -> Result<(), StatsError> {
    let counting = [
        ("points", request.points),
        ("rebounds", request.rebounds),
        ("assists", request.assists),
        ("steals", request.steals),
        ("blocks", request.blocks),
        ("turnovers", request.turnovers),
    ];
    for (field, value) in counting {
        if value <= 0 {
            return Err(StatsError::validation(format!(
                "{field} must be a positive integer"
            )));
        }
    }

    if !(0..=MAX_FOULS).contains(&request.fouls) {
        return Err(StatsError::validation(
            "fouls must be an integer between 0 and 6",
        ));
    }

    // NaN fails `contains` and is rejected with the range message
    if !(0.0..=MAX_MINUTES_PLAYED).contains(&request.minutes_played) {
        return Err(StatsError::validation(
            "minutes played must be a float between 0 and 48.0",
        ));
    }

    require_positive_id(player_id, "player")?;
    require_positive_id(request.game_id, "game")?;

    Ok(())
}

pub fn require_positive_id(id: i32, entity: &str) -> Result<(), StatsError> {
    if id <= 0 {
        return Err(StatsError::validation(format!(
            "{entity} ID must be a positive integer"
        )));
    }
    Ok(())
}

pub fn require_positive_season(season_year: i32) -> Result<(), StatsError> {
    if season_year <= 0 {
        return Err(StatsError::validation("season must be a positive integer"));
    }
    Ok(())
}
