//! League table bookkeeping.
//!
//! Counters are only ever moved by `record_result`, in the same state
//! mutation that finishes the fixture, so the table cannot drift from match
//! history the way sequential autocommitted updates could.

use serde::{Deserialize, Serialize};

use crate::models::team::TeamId;

/// Fixed reward rule: a win is always worth three points.
pub const POINTS_PER_WIN: u16 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingRow {
    pub team_id: TeamId,
    pub wins: u16,
    pub losses: u16,
    pub points: u16,
    pub rank: u16,
}

impl StandingRow {
    fn new(team_id: TeamId) -> Self {
        Self { team_id, wins: 0, losses: 0, points: 0, rank: 0 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StandingsTable {
    pub rows: Vec<StandingRow>,
}

impl StandingsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant. Idempotent.
    pub fn ensure_team(&mut self, team_id: TeamId) {
        if !self.rows.iter().any(|r| r.team_id == team_id) {
            self.rows.push(StandingRow::new(team_id));
            self.recompute_ranks();
        }
    }

    pub fn row(&self, team_id: TeamId) -> Option<&StandingRow> {
        self.rows.iter().find(|r| r.team_id == team_id)
    }

    /// Apply a finished match: winner gets a win and three points, loser a
    /// loss. Ranks are recomputed immediately.
    pub fn record_result(&mut self, winner: TeamId, loser: TeamId) {
        self.ensure_team(winner);
        self.ensure_team(loser);

        for row in &mut self.rows {
            if row.team_id == winner {
                row.wins += 1;
                row.points += POINTS_PER_WIN;
            } else if row.team_id == loser {
                row.losses += 1;
            }
        }
        self.recompute_ranks();
    }

    /// Season boundary: zero every counter, keep the participants.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.wins = 0;
            row.losses = 0;
            row.points = 0;
        }
        self.recompute_ranks();
    }

    fn recompute_ranks(&mut self) {
        self.rows.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then(b.wins.cmp(&a.wins))
                .then(a.losses.cmp(&b.losses))
                .then(a.team_id.cmp(&b.team_id))
        });
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.rank = i as u16 + 1;
        }
    }
}
