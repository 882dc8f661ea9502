//! League state manager.
//!
//! `LeagueState` holds all runtime data the core operates on: rosters,
//! fixtures, standings and brackets. Every multi-row mutation (finishing a
//! fixture plus its standings update, a gold transfer) happens through one
//! `&mut LeagueState` call, which is the unit of work here — callers can
//! never observe a half-applied pair of writes.
//!
//! A global `Arc<RwLock<LeagueState>>` is provided for embedding hosts; the
//! core operations and all tests work against a plain `&mut LeagueState`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::bracket::Bracket;
use crate::error::{CoreError, Result};
use crate::models::fixture::{Fixture, FixtureId};
use crate::models::player::Player;
use crate::models::team::{Team, TeamId};
use crate::standings::StandingsTable;

/// Global league state singleton
pub static LEAGUE_STATE: Lazy<Arc<RwLock<LeagueState>>> =
    Lazy::new(|| Arc::new(RwLock::new(LeagueState::default())));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueState {
    pub teams: Vec<Team>,
    pub players: Vec<Player>,
    pub fixtures: Vec<Fixture>,
    pub standings: StandingsTable,
    pub worlds_bracket: Option<Bracket>,
    pub current_season: u16,
    pub next_fixture_id: FixtureId,
}

impl Default for LeagueState {
    fn default() -> Self {
        Self::new()
    }
}

impl LeagueState {
    pub fn new() -> Self {
        Self {
            teams: Vec::new(),
            players: Vec::new(),
            fixtures: Vec::new(),
            standings: StandingsTable::new(),
            worlds_bracket: None,
            current_season: 1,
            next_fixture_id: 1,
        }
    }

    // ========================
    // Team & Player Management
    // ========================

    pub fn add_team(&mut self, team: Team) {
        self.standings.ensure_team(team.id);
        self.teams.push(team);
    }

    pub fn add_player(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn team(&self, team_id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    pub fn team_mut(&mut self, team_id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == team_id)
    }

    /// Move gold between two teams as one mutation. The debit is checked
    /// before anything is written, so a failure leaves both balances intact.
    pub fn transfer_gold(&mut self, from: TeamId, to: TeamId, amount: u64) -> Result<()> {
        if self.team(to).is_none() {
            return Err(CoreError::NotFound(format!("team {}", to)));
        }
        let payer = self
            .team_mut(from)
            .ok_or_else(|| CoreError::NotFound(format!("team {}", from)))?;
        payer.debit_gold(amount)?;
        self.team_mut(to)
            .ok_or_else(|| CoreError::NotFound(format!("team {}", to)))?
            .credit_gold(amount);

        log::debug!("transferred {} gold: team {} -> team {}", amount, from, to);
        Ok(())
    }

    // ========================
    // Fixture Management
    // ========================

    pub fn alloc_fixture_id(&mut self) -> FixtureId {
        let id = self.next_fixture_id;
        self.next_fixture_id += 1;
        id
    }

    pub fn add_fixture(&mut self, fixture: Fixture) {
        if fixture.id >= self.next_fixture_id {
            self.next_fixture_id = fixture.id + 1;
        }
        self.fixtures.push(fixture);
    }

    pub fn add_fixtures(&mut self, fixtures: Vec<Fixture>) {
        for fixture in fixtures {
            self.add_fixture(fixture);
        }
    }

    pub fn fixture(&self, fixture_id: FixtureId) -> Option<&Fixture> {
        self.fixtures.iter().find(|f| f.id == fixture_id)
    }

    pub fn fixture_mut(&mut self, fixture_id: FixtureId) -> Option<&mut Fixture> {
        self.fixtures.iter_mut().find(|f| f.id == fixture_id)
    }

    /// Due fixtures in kickoff order, capped to `limit`.
    pub fn due_fixtures(&self, now: chrono::DateTime<chrono::Utc>, limit: usize) -> Vec<FixtureId> {
        let mut due: Vec<&Fixture> = self.fixtures.iter().filter(|f| f.is_due(now)).collect();
        due.sort_by_key(|f| f.scheduled_at);
        due.into_iter().take(limit).map(|f| f.id).collect()
    }

    // ========================
    // Season Management
    // ========================

    /// Season boundary: bump the counter and zero the standings.
    pub fn start_new_season(&mut self) {
        self.current_season += 1;
        self.standings.reset();
        log::info!("season {} started, standings reset", self.current_season);
    }

    // ========================
    // Snapshots
    // ========================

    pub fn to_snapshot(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_snapshot(snapshot: &str) -> Result<Self> {
        Ok(serde_json::from_str(snapshot)?)
    }
}

// ========================
// Global State Access Functions
// ========================

/// Get a read lock on the global league state
pub fn get_state() -> std::sync::RwLockReadGuard<'static, LeagueState> {
    LEAGUE_STATE.read().expect("LEAGUE_STATE lock poisoned")
}

/// Get a write lock on the global league state
pub fn get_state_mut() -> std::sync::RwLockWriteGuard<'static, LeagueState> {
    LEAGUE_STATE.write().expect("LEAGUE_STATE lock poisoned")
}

/// Reset the global state to default
pub fn reset_state() {
    *LEAGUE_STATE.write().expect("LEAGUE_STATE lock poisoned") = LeagueState::new();
}

/// Replace the entire global state
pub fn set_state(new_state: LeagueState) {
    *LEAGUE_STATE.write().expect("LEAGUE_STATE lock poisoned") = new_state;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixture::{FixtureKind, FixtureStatus};
    use chrono::{Duration, Utc};

    #[test]
    fn test_transfer_gold_atomicity() {
        let mut state = LeagueState::new();
        let mut payer = Team::new(1, "Rift Wolves");
        payer.credit_gold(300);
        state.add_team(payer);
        state.add_team(Team::new(2, "Void Kings"));

        state.transfer_gold(1, 2, 200).unwrap();
        assert_eq!(state.team(1).unwrap().gold, 100);
        assert_eq!(state.team(2).unwrap().gold, 200);

        // Overdraft rejected, neither side changes
        let err = state.transfer_gold(1, 2, 500).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientFunds { .. }));
        assert_eq!(state.team(1).unwrap().gold, 100);
        assert_eq!(state.team(2).unwrap().gold, 200);
    }

    #[test]
    fn test_due_fixtures_order_and_cap() {
        let mut state = LeagueState::new();
        let now = Utc::now();
        for i in 0..8u32 {
            let id = state.alloc_fixture_id();
            state.add_fixture(Fixture::scheduled(
                id,
                FixtureKind::League,
                1,
                2,
                now - Duration::minutes(10 - i as i64),
            ));
        }
        // A future fixture and a cancelled one must not be picked up
        let future_id = state.alloc_fixture_id();
        state.add_fixture(Fixture::scheduled(future_id, FixtureKind::League, 1, 2, now + Duration::hours(1)));
        let cancelled_id = state.alloc_fixture_id();
        state.add_fixture(Fixture::scheduled(cancelled_id, FixtureKind::League, 1, 2, now - Duration::hours(1)));
        state.fixture_mut(cancelled_id).unwrap().status = FixtureStatus::Cancelled;

        let due = state.due_fixtures(now, 5);
        assert_eq!(due.len(), 5);
        // Earliest kickoff first
        assert_eq!(due[0], 1);
        assert!(!due.contains(&future_id));
        assert!(!due.contains(&cancelled_id));
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut state = LeagueState::new();
        state.add_team(Team::new(1, "Rift Wolves"));
        state.add_team(Team::new(2, "Void Kings"));
        state.current_season = 3;
        state.standings.record_result(1, 2);

        let snapshot = state.to_snapshot().unwrap();
        let restored = LeagueState::from_snapshot(&snapshot).unwrap();
        assert_eq!(restored.current_season, 3);
        assert_eq!(restored.teams.len(), 2);
        assert_eq!(restored.standings.row(1).unwrap().points, 3);
    }

    #[test]
    fn test_new_season_resets_standings() {
        let mut state = LeagueState::new();
        state.add_team(Team::new(1, "Rift Wolves"));
        state.add_team(Team::new(2, "Void Kings"));
        state.standings.record_result(1, 2);

        state.start_new_season();
        assert_eq!(state.current_season, 2);
        assert!(state.standings.rows.iter().all(|r| r.points == 0));
    }
}
