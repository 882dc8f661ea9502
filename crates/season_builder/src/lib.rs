//! Season tooling for the Rift league core.
//!
//! Loads team lists from JSON, builds schedules and brackets, and runs whole
//! seasons offline against a manual clock.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::path::Path;

use rift_core::{
    build_round_robin, build_worlds_bracket, Bracket, Fixture, FixtureKind, FixtureStatus,
    LeagueState, ManualClock, MatchScheduler, Player, Region, Role, Round, SeedEntry, Team, TeamId,
};

#[derive(Debug, Deserialize)]
pub struct TeamFile {
    pub teams: Vec<TeamEntry>,
}

#[derive(Debug, Deserialize)]
pub struct TeamEntry {
    pub id: TeamId,
    pub name: String,
    #[serde(default)]
    pub players: Vec<PlayerEntry>,
    /// Bracket seed (1-4), only used by the bracket command.
    #[serde(default)]
    pub seed: Option<u8>,
    /// "east" or "west", only used by the bracket command.
    #[serde(default)]
    pub region: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    pub role: Role,
    pub mental: u8,
    pub teamfight: u8,
    pub focus: u8,
    pub laning: u8,
    #[serde(default)]
    pub starter: bool,
}

pub fn load_team_file(path: &Path) -> Result<TeamFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading team file {}", path.display()))?;
    let file: TeamFile = serde_json::from_str(&raw)
        .with_context(|| format!("parsing team file {}", path.display()))?;
    if file.teams.is_empty() {
        bail!("team file {} contains no teams", path.display());
    }
    Ok(file)
}

/// Populate a fresh league state from a team file.
pub fn build_state(file: &TeamFile) -> LeagueState {
    let mut state = LeagueState::new();
    let mut player_id = 1;
    for entry in &file.teams {
        state.add_team(Team::new(entry.id, entry.name.clone()));
        for player in &entry.players {
            let mut built = Player::new(player_id, entry.id, player.name.clone(), player.role)
                .with_stats(player.mental, player.teamfight, player.focus, player.laning);
            if player.starter {
                built = built.as_starter();
            }
            state.add_player(built);
            player_id += 1;
        }
    }
    state
}

pub fn build_schedule(
    state: &mut LeagueState,
    start: DateTime<Utc>,
    spacing_hours: i64,
) -> Vec<Fixture> {
    let team_ids: Vec<TeamId> = state.teams.iter().map(|t| t.id).collect();
    let mut next_id = state.next_fixture_id;
    let fixtures = build_round_robin(
        &team_ids,
        FixtureKind::League,
        start,
        Duration::hours(spacing_hours),
        &mut next_id,
    );
    state.next_fixture_id = next_id;
    fixtures
}

/// Build the eight-team worlds bracket and schedule its quarterfinals.
pub fn build_bracket(
    state: &mut LeagueState,
    file: &TeamFile,
    start: DateTime<Utc>,
) -> Result<(Bracket, Vec<Fixture>)> {
    let mut seeds = Vec::new();
    for entry in &file.teams {
        let seed = entry.seed.with_context(|| format!("team {} has no seed", entry.name))?;
        let region = match entry.region.as_deref() {
            Some("east") => Region::East,
            Some("west") => Region::West,
            other => bail!("team {} has invalid region {:?}", entry.name, other),
        };
        seeds.push(SeedEntry::new(entry.id, seed, region));
    }

    let mut bracket = build_worlds_bracket(seeds)?;
    let mut next_id = state.next_fixture_id;
    let quarterfinals =
        bracket.schedule_round(Round::Quarterfinal, start, Duration::hours(2), &mut next_id);
    state.next_fixture_id = next_id;
    Ok((bracket, quarterfinals))
}

/// Tick the scheduler against a manual clock until every fixture is resolved.
/// Returns the number of ticks taken.
pub fn run_to_completion(state: &mut LeagueState, seed: u64) -> Result<u32> {
    let last_kickoff = state
        .fixtures
        .iter()
        .map(|f| f.scheduled_at)
        .max()
        .context("no fixtures to run")?;

    let clock = ManualClock::new(last_kickoff + Duration::minutes(1));
    let mut scheduler = MatchScheduler::new(clock, seed);
    scheduler.start();

    let mut ticks = 0;
    while state.fixtures.iter().any(|f| f.status == FixtureStatus::Scheduled) {
        let report = scheduler.tick(state);
        ticks += 1;
        if report.processed == 0 && report.failed == 0 {
            bail!("scheduler made no progress after {} ticks", ticks);
        }
        if report.failed > 0 {
            bail!("{} fixture(s) failed to resolve", report.failed);
        }
    }
    Ok(ticks)
}

pub fn render_table(state: &LeagueState) -> String {
    let mut out = String::from("Rank\tTeam\tW\tL\tPts");
    for row in &state.standings.rows {
        let name = state
            .team(row.team_id)
            .map(|t| t.name.as_str())
            .unwrap_or("?");
        out += &format!("\n{}.\t{}\t{}\t{}\t{}", row.rank, name, row.wins, row.losses, row.points);
    }
    out
}
