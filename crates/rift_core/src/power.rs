//! Team power aggregation.
//!
//! Team power is the sum of the four core stat columns over the team's
//! starters. A lineup with fewer than five starters contributes whatever
//! subset exists; only a missing team is an error.

use crate::error::{CoreError, Result};
use crate::models::team::TeamId;
use crate::state::LeagueState;

pub fn team_power(state: &LeagueState, team_id: TeamId) -> Result<u32> {
    state
        .team(team_id)
        .ok_or_else(|| CoreError::NotFound(format!("team {}", team_id)))?;

    let power = state
        .players
        .iter()
        .filter(|p| p.team_id == team_id && p.starter)
        .map(|p| p.stat_sum())
        .sum();

    Ok(power)
}
